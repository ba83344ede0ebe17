
extern crate clap;
extern crate colored;
extern crate gps_link;

use std::fs::File;

use clap::{Arg, App};
use colored::*;

use gps_link::GpsLinkErr;
use gps_link::io;
use gps_link::nmea::assembler::SentenceAssembler;
use gps_link::radio::link::LinkTransmitter;
use gps_link::radio::transport::FrameWriter;

fn main() {

	let matches = App::new("GPS Beacon")
		.version("0.1.0")
		.about("Reads a GPS byte stream and transmits each position sentence as a sequenced radio frame")
		.arg(Arg::with_name("filename")
			.short("f").long("filename")
			.help("Input NMEA filename")
			.required(true).takes_value(true))
		.arg(Arg::with_name("output")
			.short("o").long("output")
			.help("Frame capture output filename")
			.required(true).takes_value(true))
		.arg(Arg::with_name("interval_us")
			.short("i").long("interval_us")
			.help("Pause between transmissions in microseconds")
			.takes_value(true))
		.get_matches();

	let fname:&str = matches.value_of("filename").unwrap();
	let out_fname:&str = matches.value_of("output").unwrap();
	let interval_us:u64 = matches.value_of("interval_us").unwrap_or("500").parse().unwrap();

	eprintln!("Transmitting position sentences from {} into {}", fname, out_fname);

	let out = File::create(out_fname).unwrap();
	let mut tx = LinkTransmitter::new(FrameWriter::new(out));
	let mut assembler = SentenceAssembler::new();
	let mut sent:usize = 0;

	for b in io::file_source(fname).unwrap() {
		match assembler.apply(b) {
			Some(Ok(raw)) => {
				// Only position sentences go over the air
				if !raw.header_is(b"GGA") { continue; }

				let seq = tx.sequence();
				match tx.transmit(raw.as_bytes()) {
					Ok(outcome) => {
						sent += 1;
						eprintln!("{}", format!("Sent frame {} -> {:?}", seq, outcome).green());
					},
					Err(GpsLinkErr::FatalLink(code)) => {
						eprintln!("{}", format!("Fatal link status {:#x}; halting", code).red());
						std::process::exit(1);
					},
					Err(e) => {
						eprintln!("{}", format!("Unexpected transmit error: {:?}; halting", e).red());
						std::process::exit(1);
					},
				}

				if interval_us > 0 {
					std::thread::sleep(std::time::Duration::from_micros(interval_us));
				}
			},
			Some(Err(e)) => eprintln!("{}", format!("Dropped line: {:?}", e).yellow()),
			None => (),
		}
	}

	eprintln!("Done; {} frames transmitted, next sequence {}", sent, tx.sequence());
}
