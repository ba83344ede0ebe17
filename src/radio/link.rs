
use serde::{Serialize, Deserialize};

use crate::GpsLinkErr;
use super::{Packet, PacketFramer, FRAME_LENGTH};
use super::transport::RadioTransport;

// Raw completion signal the radio driver reports when a command terminates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
	LastCommandDone,
	CommandCancelled,
	CommandAborted,
	CommandStopped,
	Unrecognized(u32),
}

// Raw command status word from the radio driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
	DoneOk,
	DoneRxError,
	DoneRxTimeout,
	DoneBreak,
	DoneEnded,
	DoneStopped,
	DoneAbort,
	ErrorRxBuffer,
	ErrorRxFull,
	ErrorParam,
	ErrorNoSetup,
	ErrorNoSynth,
	ErrorRxOverflow,
	ErrorTxUnderflow,
	Unrecognized(u32),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
	Ok,
	CrcError,
	Timeout,
	BufferError,
	OverflowError,
	ConfigError,
	ParamError,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
	Completed(LinkStatus),
	Cancelled(LinkStatus),
	Aborted(LinkStatus),
	Stopped(LinkStatus),
	Fatal(u32),
}

impl LinkOutcome {

	pub fn is_fatal(&self) -> bool {
		match self {
			LinkOutcome::Fatal(_) => true,
			_ => false,
		}
	}

}

// Two independent axes, each mapped exhaustively.  Anything outside the
// recognized vocabulary is Fatal: an unknown hardware state halts the owning
// flow rather than being guessed into a default.
pub fn classify(signal:TerminationSignal, status:StatusCode) -> LinkOutcome {
	let status = match status {
		StatusCode::DoneOk | StatusCode::DoneStopped | StatusCode::DoneAbort => LinkStatus::Ok,
		StatusCode::DoneRxError => LinkStatus::CrcError,
		StatusCode::DoneRxTimeout | StatusCode::DoneBreak | StatusCode::DoneEnded => LinkStatus::Timeout,
		StatusCode::ErrorRxBuffer | StatusCode::ErrorRxFull => LinkStatus::BufferError,
		StatusCode::ErrorRxOverflow | StatusCode::ErrorTxUnderflow => LinkStatus::OverflowError,
		StatusCode::ErrorNoSetup | StatusCode::ErrorNoSynth => LinkStatus::ConfigError,
		StatusCode::ErrorParam => LinkStatus::ParamError,
		StatusCode::Unrecognized(code) => return LinkOutcome::Fatal(code),
	};

	match signal {
		TerminationSignal::LastCommandDone => LinkOutcome::Completed(status),
		TerminationSignal::CommandCancelled => LinkOutcome::Cancelled(status),
		TerminationSignal::CommandAborted => LinkOutcome::Aborted(status),
		TerminationSignal::CommandStopped => LinkOutcome::Stopped(status),
		TerminationSignal::Unrecognized(mask) => LinkOutcome::Fatal(mask),
	}
}

// Transmit direction: frame, then execute one blocking send per sentence.  The
// sequence advances per framing call whether or not the radio liked the result;
// there is no retry anywhere on this path.
pub struct LinkTransmitter<R: RadioTransport> {
	radio: R,
	framer: PacketFramer,
}

impl<R: RadioTransport> LinkTransmitter<R> {

	pub fn new(radio:R) -> Self {
		Self{ radio, framer: PacketFramer::new() }
	}

	pub fn sequence(&self) -> u16 { self.framer.sequence() }

	pub fn transmit(&mut self, sentence:&[u8]) -> Result<LinkOutcome, GpsLinkErr> {
		let packet = self.framer.next_packet(sentence);
		let bytes = packet.to_bytes();

		let (signal, status) = self.radio.send(&bytes);
		match classify(signal, status) {
			LinkOutcome::Fatal(code) => Err(GpsLinkErr::FatalLink(code)),
			outcome => Ok(outcome),
		}
	}

}

// Receive direction: one blocking receive per call.  A full frame comes back as
// a packet; anything else is just the classified outcome.
pub struct LinkReceiver<R: RadioTransport> {
	radio: R,
}

impl<R: RadioTransport> LinkReceiver<R> {

	pub fn new(radio:R) -> Self { Self{ radio } }

	pub fn receive(&mut self) -> Result<(LinkOutcome, Option<Packet>), GpsLinkErr> {
		let mut buffer = [0u8; FRAME_LENGTH];

		let (signal, status, n) = self.radio.receive(&mut buffer);
		match classify(signal, status) {
			LinkOutcome::Fatal(code) => Err(GpsLinkErr::FatalLink(code)),
			outcome => {
				let packet = if n == FRAME_LENGTH { Some(Packet::from_bytes(&buffer)) } else { None };
				Ok((outcome, packet))
			},
		}
	}

}
