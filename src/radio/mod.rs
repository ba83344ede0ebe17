
use byteorder::{ByteOrder, BigEndian};

pub mod link;
pub mod transport;

// Fixed payload size the radio accepts per transmission
pub const PAYLOAD_LENGTH:usize = 102;
pub const FRAME_LENGTH:usize = PAYLOAD_LENGTH + 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Packet {
	pub sequence:u16,
	pub payload:[u8; PAYLOAD_LENGTH],
}

impl Packet {

	// A shorter payload is zero padded; a longer one is truncated
	pub fn frame(payload:&[u8], sequence:u16) -> Self {
		let mut buf = [0u8; PAYLOAD_LENGTH];
		let n = payload.len().min(PAYLOAD_LENGTH);
		buf[..n].copy_from_slice(&payload[..n]);
		Self{ sequence, payload: buf }
	}

	// Wire form: sequence high byte, sequence low byte, then the payload
	pub fn to_bytes(&self) -> [u8; FRAME_LENGTH] {
		let mut bytes = [0u8; FRAME_LENGTH];
		BigEndian::write_u16(&mut bytes[0..2], self.sequence);
		bytes[2..].copy_from_slice(&self.payload);
		bytes
	}

	pub fn from_bytes(bytes:&[u8; FRAME_LENGTH]) -> Self {
		let sequence = BigEndian::read_u16(&bytes[0..2]);
		let mut payload = [0u8; PAYLOAD_LENGTH];
		payload.copy_from_slice(&bytes[2..]);
		Self{ sequence, payload }
	}

	// Payload bytes up to the zero padding, which is where a framed sentence ends
	pub fn sentence_bytes(&self) -> &[u8] {
		let end = self.payload.iter().position(|&b| b == 0).unwrap_or(PAYLOAD_LENGTH);
		&self.payload[..end]
	}

}

// Owns the running sequence counter: starts at zero, advances by exactly one per
// framed packet, wraps mod 2^16, and is never reset afterward
pub struct PacketFramer {
	sequence:u16,
}

impl PacketFramer {

	pub fn new() -> Self { Self{ sequence: 0 } }

	pub fn sequence(&self) -> u16 { self.sequence }

	pub fn next_packet(&mut self, payload:&[u8]) -> Packet {
		let packet = Packet::frame(payload, self.sequence);
		self.sequence = self.sequence.wrapping_add(1);
		packet
	}

}

#[cfg(test)]
mod tests {

	use super::*;

	#[test]
	fn frames_the_reference_packet() {
		let packet = Packet::frame(&[0xAA; 102], 5);
		let bytes = packet.to_bytes();

		assert_eq!(bytes.len(), 104);
		assert_eq!(bytes[0], 0x00);
		assert_eq!(bytes[1], 0x05);
		assert!(bytes[2..].iter().all(|&b| b == 0xAA));
	}

	#[test]
	fn sequence_is_encoded_high_byte_first() {
		let bytes = Packet::frame(b"x", 0xBEEF).to_bytes();
		assert_eq!(bytes[0], 0xBE);
		assert_eq!(bytes[1], 0xEF);
	}

	#[test]
	fn short_payloads_are_zero_padded_and_long_ones_truncated() {
		let packet = Packet::frame(b"$GPGGA,1*00\r\n", 0x0102);
		assert_eq!(&packet.payload[..13], &b"$GPGGA,1*00\r\n"[..]);
		assert!(packet.payload[13..].iter().all(|&b| b == 0));
		assert_eq!(packet.sentence_bytes(), &b"$GPGGA,1*00\r\n"[..]);

		let long = [0x55u8; 300];
		let packet = Packet::frame(&long, 1);
		assert!(packet.payload.iter().all(|&b| b == 0x55));
		assert_eq!(packet.to_bytes().len(), FRAME_LENGTH);
	}

	#[test]
	fn wire_form_round_trips() {
		let packet = Packet::frame(b"$GPRMC,123519,A*6A\r\n", 0xBEEF);
		let back = Packet::from_bytes(&packet.to_bytes());

		assert_eq!(back, packet);
		assert_eq!(back.sequence, 0xBEEF);
		assert_eq!(back.sentence_bytes(), &b"$GPRMC,123519,A*6A\r\n"[..]);
	}

	#[test]
	fn sequence_advances_by_one_and_wraps() {
		let mut framer = PacketFramer::new();
		for expected in 0u16..=10 {
			assert_eq!(framer.next_packet(b"x").sequence, expected);
		}

		// Wrap from 65535 back to 0 without a reset
		let mut framer = PacketFramer{ sequence: 65535 };
		assert_eq!(framer.next_packet(b"x").sequence, 65535);
		assert_eq!(framer.next_packet(b"x").sequence, 0);
		assert_eq!(framer.next_packet(b"x").sequence, 1);
	}
}
