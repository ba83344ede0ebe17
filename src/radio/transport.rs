
use std::collections::VecDeque;
use std::io::{Read, Write};

use super::FRAME_LENGTH;
use super::link::{TerminationSignal, StatusCode};

// Command-queue boundary to the radio hardware.  Both calls block until the
// underlying transaction resolves and report the driver's raw completion pair.
pub trait RadioTransport {
	fn send(&mut self, payload:&[u8]) -> (TerminationSignal, StatusCode);
	fn receive(&mut self, buffer:&mut [u8]) -> (TerminationSignal, StatusCode, usize);
}

// In-memory transport for wiring checks: every send completes cleanly and is
// queued for the next receive
pub struct Loopback {
	queue: VecDeque<Vec<u8>>,
}

impl Loopback {

	pub fn new() -> Self { Self{ queue: VecDeque::new() } }

	pub fn pending(&self) -> usize { self.queue.len() }

}

impl RadioTransport for Loopback {

	fn send(&mut self, payload:&[u8]) -> (TerminationSignal, StatusCode) {
		self.queue.push_back(payload.to_vec());
		(TerminationSignal::LastCommandDone, StatusCode::DoneOk)
	}

	fn receive(&mut self, buffer:&mut [u8]) -> (TerminationSignal, StatusCode, usize) {
		match self.queue.pop_front() {
			Some(frame) => {
				let n = frame.len().min(buffer.len());
				buffer[..n].copy_from_slice(&frame[..n]);
				(TerminationSignal::LastCommandDone, StatusCode::DoneOk, n)
			},
			None => (TerminationSignal::LastCommandDone, StatusCode::DoneRxTimeout, 0),
		}
	}

}

// File-backed capture of the radio medium: the transmit side appends raw frames
// and the receive side replays them.  An I/O failure surfaces as a status word
// the classifier does not recognize, which halts the owning flow.
pub struct FrameWriter<W: Write> {
	out: W,
}

impl<W: Write> FrameWriter<W> {

	pub fn new(out:W) -> Self { Self{ out } }

}

impl<W: Write> RadioTransport for FrameWriter<W> {

	fn send(&mut self, payload:&[u8]) -> (TerminationSignal, StatusCode) {
		match self.out.write_all(payload).and_then(|_| self.out.flush()) {
			Ok(()) => (TerminationSignal::LastCommandDone, StatusCode::DoneOk),
			Err(e) => {
				let code = e.raw_os_error().unwrap_or(-1) as u32;
				(TerminationSignal::CommandAborted, StatusCode::Unrecognized(code))
			},
		}
	}

	fn receive(&mut self, _buffer:&mut [u8]) -> (TerminationSignal, StatusCode, usize) {
		// The capture is write-only on this side
		(TerminationSignal::CommandAborted, StatusCode::ErrorParam, 0)
	}

}

pub struct FrameReader<R: Read> {
	src: R,
}

impl<R: Read> FrameReader<R> {

	pub fn new(src:R) -> Self { Self{ src } }

}

impl<R: Read> RadioTransport for FrameReader<R> {

	fn send(&mut self, _payload:&[u8]) -> (TerminationSignal, StatusCode) {
		(TerminationSignal::CommandAborted, StatusCode::ErrorParam)
	}

	fn receive(&mut self, buffer:&mut [u8]) -> (TerminationSignal, StatusCode, usize) {
		let want = buffer.len().min(FRAME_LENGTH);
		match self.src.read_exact(&mut buffer[..want]) {
			Ok(()) => (TerminationSignal::LastCommandDone, StatusCode::DoneOk, want),
			Err(ref e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
				// End of the capture: a cleanly stopped command, not an error
				(TerminationSignal::CommandStopped, StatusCode::DoneStopped, 0)
			},
			Err(e) => {
				let code = e.raw_os_error().unwrap_or(-1) as u32;
				(TerminationSignal::CommandAborted, StatusCode::Unrecognized(code), 0)
			},
		}
	}

}
