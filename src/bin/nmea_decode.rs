
extern crate clap;
extern crate colored;
extern crate gps_link;
extern crate serde_json;

use clap::{Arg, App};
use colored::*;

use gps_link::io;
use gps_link::nmea::{Fix, MessageKind, NmeaReceiver, NmeaResult};
use gps_link::nmea::format;

fn main() {

	let matches = App::new("NMEA Stream Decoder")
		.version("0.1.0")
		.about("Takes a raw NMEA byte stream from a GPS receiver and produces formatted fix reports")
		.arg(Arg::with_name("filename")
			.short("f").long("filename")
			.help("Input filename; reads stdin when omitted")
			.takes_value(true))
		.get_matches();

	let bytes:Box<dyn Iterator<Item = u8>> = match matches.value_of("filename") {
		Some(fname) => {
			eprintln!("Decoding NMEA sentences from {}", fname);
			Box::new(io::file_source(fname).unwrap())
		},
		None => {
			eprintln!("Decoding NMEA sentences from stdin");
			Box::new(io::stdin_source().unwrap())
		},
	};

	let mut rx = NmeaReceiver::new();
	let mut all_fixes:Vec<Fix> = vec![];
	let mut dropped:usize = 0;

	for b in bytes {
		match rx.apply(b) {
			NmeaResult::Ready{ kind, fix } => match kind {
				MessageKind::Gga | MessageKind::Rmc => {
					eprint!("{}", format::to_text(&fix).green());
					all_fixes.push(fix);
				},
				// Recognized but carrying nothing new to report
				_ => (),
			},
			NmeaResult::Err(e) => {
				dropped += 1;
				eprintln!("{}", format!("Dropped sentence: {:?}", e).yellow());
			},
			NmeaResult::NotReady => (),
		}
	}

	eprintln!("Decoded {} fixes, dropped {} sentences", all_fixes.len(), dropped);
	println!("{}", serde_json::to_string_pretty(&all_fixes).unwrap());
}
