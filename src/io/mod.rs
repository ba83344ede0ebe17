
use std::fs::File;
use std::io::Read;

pub const BUFFER_SIZE:usize = 2048;

// Buffered byte-at-a-time reader over a blocking stream.  A read suspends the calling
// flow until the source produces data; a failed or empty read ends the stream.
pub struct ByteSource<S: Read> {
	src: S,
	idx: usize,
	buffer: [u8; BUFFER_SIZE],
	buffer_idx: usize,
	buffer_valid_len: usize,
}

impl<S: Read> ByteSource<S> {

	pub fn new(src:S) -> Result<Self, &'static str> {
		Ok(Self{ src, idx: 0, buffer: [0u8; BUFFER_SIZE], buffer_idx: 0, buffer_valid_len: 0 })
	}

	// Number of bytes surfaced so far
	pub fn position(&self) -> usize { self.idx }

	fn buffer_bytes(&mut self) -> Result<(), &'static str> {
		let bytes_read:usize = self.src.read(&mut self.buffer).map_err(|_| "Unable to read from byte source")?;

		self.buffer_valid_len = bytes_read;
		self.buffer_idx = 0;

		Ok(())
	}

}

impl<S: Read> Iterator for ByteSource<S> {
	type Item = u8;

	fn next(&mut self) -> Option<u8> {
		if self.buffer_idx >= self.buffer_valid_len {
			// If we've run out of buffer, then buffer new bytes
			match self.buffer_bytes() {
				Ok(()) => {
					if self.buffer_idx >= self.buffer_valid_len {
						// The buffering operation might succeed, but still read zero new bytes; if so, the stream is over
						None
					} else {
						let ans = self.buffer[self.buffer_idx];
						self.idx += 1;
						self.buffer_idx += 1;
						Some(ans)
					}
				},
				Err(_) => None
			}
		} else {
			// There's no need to buffer new bytes; just read the next one and return it
			let ans = self.buffer[self.buffer_idx];
			self.idx += 1;
			self.buffer_idx += 1;
			Some(ans)
		}
	}
}

pub fn file_source(fname:&str) -> Result<ByteSource<File>, &'static str> {
	let f = File::open(fname).map_err(|_| "Unable to open input file")?;
	ByteSource::new(f)
}

pub fn stdin_source() -> Result<ByteSource<std::io::Stdin>, &'static str> {
	ByteSource::new(std::io::stdin())
}

// Best-effort text output with no backpressure; a failed write is dropped
pub trait TextSink {
	fn write_text(&mut self, bytes:&[u8]);
}

impl<W: std::io::Write> TextSink for W {
	fn write_text(&mut self, bytes:&[u8]) {
		let _ = self.write_all(bytes);
		let _ = self.flush();
	}
}

#[cfg(test)]
mod tests {

	use super::*;

	#[test]
	fn byte_source_preserves_order_across_refills() {
		let data:Vec<u8> = (0..5000).map(|x| (x % 251) as u8).collect();
		let src = ByteSource::new(&data[..]).unwrap();
		let out:Vec<u8> = src.collect();
		assert_eq!(out, data);
	}

	#[test]
	fn text_sink_is_best_effort() {
		let mut sink:Vec<u8> = vec![];
		sink.write_text(b"12:35:19");
		assert_eq!(&sink, b"12:35:19");
	}
}
