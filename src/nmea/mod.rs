
use serde::{Serialize, Deserialize};

use crate::GpsLinkErr;

pub mod assembler;
pub mod decoder;
pub mod format;

// 82 sentence characters plus the line terminator
pub const SENTENCE_CAPACITY:usize = 83;

#[derive(Debug, Clone, PartialEq)]
pub struct RawSentence(pub Vec<u8>);

impl RawSentence {

	pub fn as_bytes(&self) -> &[u8] { &self.0 }

	// Cheap pre-filter on the three-letter sentence code at bytes 3..6 of a
	// well-formed header, usable before any validation has happened
	pub fn header_is(&self, code:&[u8; 3]) -> bool {
		self.0.len() >= 6 && &self.0[3..6] == code
	}

}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub enum MessageKind {
	Gga,
	Rmc,
	Gsa,
	Gsv,
	Unknown,
}

impl MessageKind {

	// Classification looks at the six-byte header and nothing else
	pub fn from_header(header:&[u8]) -> MessageKind {
		if      header.starts_with(b"$GPGGA") { MessageKind::Gga }
		else if header.starts_with(b"$GPRMC") { MessageKind::Rmc }
		else if header.starts_with(b"$GPGSA") { MessageKind::Gsa }
		else if header.starts_with(b"$GPGSV") { MessageKind::Gsv }
		else                                  { MessageKind::Unknown }
	}

}

// Decoded working record.  Fields keep their sentinel (zero for numerics, a space
// for directions) until some sentence kind populates them; an empty field in a
// later sentence leaves the previous value in place.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
pub struct Fix {
	pub time:f64,
	pub latitude:f64,
	pub lat_direction:char,
	pub longitude:f64,
	pub long_direction:char,
	pub altitude:f64,
	pub ground_speed:f64,
	pub true_course:f64,
}

impl Default for Fix {

	fn default() -> Self {
		Self{ time: 0.0,
		      latitude: 0.0,  lat_direction: ' ',
		      longitude: 0.0, long_direction: ' ',
		      altitude: 0.0, ground_speed: 0.0, true_course: 0.0 }
	}

}

#[derive(Debug)]
pub enum NmeaResult {
	NotReady,
	Ready{ kind:MessageKind, fix:Fix },
	Err(GpsLinkErr),
}

// Composition of the assembler and decoder over a persistent Fix record; this is
// the record's single owner and single writer
pub struct NmeaReceiver {
	assembler: assembler::SentenceAssembler,
	fix: Fix,
}

impl NmeaReceiver {

	pub fn new() -> Self {
		Self{ assembler: assembler::SentenceAssembler::new(), fix: Fix::default() }
	}

	pub fn fix(&self) -> &Fix { &self.fix }

	pub fn apply(&mut self, b:u8) -> NmeaResult {
		match self.assembler.apply(b) {
			None => NmeaResult::NotReady,
			Some(Err(e)) => NmeaResult::Err(e),
			Some(Ok(raw)) => match decoder::validate(&raw) {
				Err(e) => NmeaResult::Err(e),
				Ok(sentence) => match decoder::decode(&sentence, &mut self.fix) {
					Err(e) => NmeaResult::Err(e),
					Ok(()) => NmeaResult::Ready{ kind: sentence.kind(), fix: self.fix },
				},
			},
		}
	}

}

#[cfg(test)]
mod tests {

	use super::*;

	const GGA:&[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
	const RMC:&[u8] = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";

	#[test]
	fn receiver_recovers_at_the_sentence_boundary() {
		let mut rx = NmeaReceiver::new();

		// A good sentence, the same sentence with its checksum clobbered, then a
		// good one of another kind
		let corrupted:Vec<u8> = {
			let mut v = GGA.to_vec();
			let n = v.len();
			v[n - 4] = b'0';
			v[n - 3] = b'0';
			v
		};

		let mut kinds:Vec<MessageKind> = vec![];
		let mut errs:usize = 0;

		for &b in GGA.iter().chain(corrupted.iter()).chain(RMC.iter()) {
			match rx.apply(b) {
				NmeaResult::Ready{ kind, fix:_ } => kinds.push(kind),
				NmeaResult::Err(_) => errs += 1,
				NmeaResult::NotReady => (),
			}
		}

		assert_eq!(kinds, vec![MessageKind::Gga, MessageKind::Rmc]);
		assert_eq!(errs, 1);

		// The corrupted sentence never touched the working record
		assert_eq!(rx.fix().altitude, 545.4);
		assert_eq!(rx.fix().ground_speed, 22.4);
	}

	#[test]
	fn header_prefilter_works_before_validation() {
		let raw = RawSentence(b"$GPGGA,123519".to_vec());
		assert!(raw.header_is(b"GGA"));
		assert!(!raw.header_is(b"RMC"));
		assert!(!RawSentence(b"$GP".to_vec()).header_is(b"GGA"));
	}

	#[test]
	fn classification_is_deterministic_from_the_header() {
		assert_eq!(MessageKind::from_header(b"$GPGGA,x"), MessageKind::Gga);
		assert_eq!(MessageKind::from_header(b"$GPRMC,x"), MessageKind::Rmc);
		assert_eq!(MessageKind::from_header(b"$GPGSA,x"), MessageKind::Gsa);
		assert_eq!(MessageKind::from_header(b"$GPGSV,x"), MessageKind::Gsv);
		assert_eq!(MessageKind::from_header(b"$GPZDA,x"), MessageKind::Unknown);
		assert_eq!(MessageKind::from_header(b"$GP"), MessageKind::Unknown);
	}
}
