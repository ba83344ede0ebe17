
use crate::GpsLinkErr;
use super::{RawSentence, SENTENCE_CAPACITY};

// Accumulates a byte-at-a-time stream into terminator-delimited sentences.  The
// terminator stays in the surfaced sentence and the buffer resets for the next
// line, so sentences come out in the exact order their terminating byte arrived.
pub struct SentenceAssembler {
	buf: Vec<u8>,
}

impl SentenceAssembler {

	pub fn new() -> Self {
		Self{ buf: Vec::with_capacity(SENTENCE_CAPACITY) }
	}

	pub fn apply(&mut self, b:u8) -> Option<Result<RawSentence, GpsLinkErr>> {
		if self.buf.len() >= SENTENCE_CAPACITY {
			// The line never terminated inside the sentence capacity.  Drop what we
			// have; the tail of the oversized line fails validation downstream and
			// the stream resynchronizes at the next terminator.
			self.buf.clear();
			return Some(Err(GpsLinkErr::Overflow));
		}

		self.buf.push(b);

		if b == b'\n' {
			let sentence:Vec<u8> = self.buf.drain(..).collect();
			Some(Ok(RawSentence(sentence)))
		} else {
			None
		}
	}

}

#[cfg(test)]
mod tests {

	use super::*;

	#[test]
	fn splits_on_the_terminator_in_arrival_order() {
		let mut asm = SentenceAssembler::new();
		let stream = b"$GPGGA,1*00\r\n$GPRMC,2*00\r\n";

		let mut sentences:Vec<RawSentence> = vec![];
		for &b in stream.iter() {
			match asm.apply(b) {
				Some(Ok(s)) => sentences.push(s),
				Some(Err(e)) => panic!("Unexpected assembler error: {:?}", e),
				None => (),
			}
		}

		assert_eq!(sentences.len(), 2);
		assert_eq!(sentences[0].as_bytes(), &b"$GPGGA,1*00\r\n"[..]);
		assert_eq!(sentences[1].as_bytes(), &b"$GPRMC,2*00\r\n"[..]);
	}

	#[test]
	fn a_full_length_sentence_still_fits() {
		let mut asm = SentenceAssembler::new();

		// 80 characters of line, then "\r\n": 82 bytes total
		let mut line:Vec<u8> = vec![b'x'; 80];
		line.extend_from_slice(b"\r\n");

		let mut result = None;
		for &b in line.iter() {
			result = asm.apply(b);
		}

		match result {
			Some(Ok(s)) => assert_eq!(s.as_bytes().len(), 82),
			other => panic!("Expected a completed sentence, got {:?}", other),
		}
	}

	#[test]
	fn an_unterminated_line_overflows_and_resynchronizes() {
		let mut asm = SentenceAssembler::new();

		let mut overflows:usize = 0;
		for _ in 0..200 {
			match asm.apply(b'A') {
				Some(Err(GpsLinkErr::Overflow)) => overflows += 1,
				Some(other) => panic!("Unexpected assembler result: {:?}", other),
				None => (),
			}
		}

		// 200 bytes against an 83-byte capacity: the buffer fills and drops twice
		assert_eq!(overflows, 2);

		// The tail of the oversized line comes through as a short garbage line
		// that validation rejects; the next real line is unaffected
		match asm.apply(b'\n') {
			Some(Ok(s)) => assert_eq!(s.as_bytes().len(), 33),
			other => panic!("Expected the garbage tail, got {:?}", other),
		}

		let stream = b"$GPGGA,1*00\r\n";
		let mut sentences:usize = 0;
		for &b in stream.iter() {
			if let Some(Ok(_)) = asm.apply(b) { sentences += 1; }
		}
		assert_eq!(sentences, 1);
	}
}
