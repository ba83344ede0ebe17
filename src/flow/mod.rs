
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::GpsLinkErr;
use crate::nmea::{Fix, MessageKind, NmeaReceiver, NmeaResult};
use crate::radio::link::{LinkOutcome, LinkTransmitter};
use crate::radio::transport::RadioTransport;


pub enum FlowResult<U> {
	NotReady,
	Ready(U),
	Err(GpsLinkErr),
}

impl<U> FlowResult<U> {

	pub fn unwrap(self) -> U {
		match self {
			Self::Ready(u) => u,
			_ => panic!("Called unwrap on something other than FlowResult::Ready"),
		}
	}

}

// A type that implements FlowFunctionality consumes instances of T and produces
// Ready(U) when an output is available, NotReady when it isn't, or Err(_) when
// the input couldn't be used
pub trait FlowFunctionality<T, U> {
	fn apply(&mut self, input:&T) -> FlowResult<U>;
}

// A pipeline stage moved onto its own task behind a pair of channels.  The stage
// is the single owner and single writer of its working state; the channels are
// the only way in or out.
pub struct Flow<T: 'static + Send, U: 'static + Send> {
	pub tx_input:  mpsc::Sender<T>,
	pub rx_output: mpsc::Receiver<U>,
	pub handle:    JoinHandle<Result<(), &'static str>>,
}

impl<T: 'static + Send + Sync + Clone, U: 'static + Send + Sync> Flow<T, U> {

	pub fn from<B: 'static + FlowFunctionality<T, U> + Send>(b:B) -> Self {

		let (    tx_input, mut rx_input) = mpsc::channel::<T>(10);
		let (mut tx_output,    rx_output) = mpsc::channel::<U>(10);

		let handle:JoinHandle<Result<(), &'static str>> = tokio::spawn(async move {

			let mut owned_b = b;

			while let Some(t) = rx_input.recv().await {

				match owned_b.apply(&t) {
					FlowResult::Ready(u) => tx_output.send(u).await.map_err(|_| "Unable to send output")?,
					FlowResult::NotReady => (),
					FlowResult::Err(GpsLinkErr::FatalLink(code)) => {
						// Unknown hardware state; stop loudly rather than guess
						eprintln!("Fatal link status in flow: {:#x}", code);
						return Err("Fatal link status");
					},
					// Anything else is recovered at the sentence boundary: the
					// input is dropped and the flow moves on to the next one
					FlowResult::Err(_) => (),
				}

			}

			Ok(())
		});

		Flow{ tx_input, rx_output, handle }
	}

	pub async fn shutdown(self) -> Result<(), &'static str> {

		let Flow{ tx_input, rx_output:_, handle } = self;

		drop(tx_input);

		handle.await.unwrap()
	}

}

impl FlowFunctionality<u8, (MessageKind, Fix)> for NmeaReceiver {

	fn apply(&mut self, input:&u8) -> FlowResult<(MessageKind, Fix)> {
		match NmeaReceiver::apply(self, *input) {
			NmeaResult::NotReady => FlowResult::NotReady,
			NmeaResult::Ready{ kind, fix } => FlowResult::Ready((kind, fix)),
			NmeaResult::Err(e) => FlowResult::Err(e),
		}
	}

}

impl<R: RadioTransport> FlowFunctionality<Vec<u8>, LinkOutcome> for LinkTransmitter<R> {

	fn apply(&mut self, input:&Vec<u8>) -> FlowResult<LinkOutcome> {
		match self.transmit(input) {
			Ok(outcome) => FlowResult::Ready(outcome),
			Err(e) => FlowResult::Err(e),
		}
	}

}
