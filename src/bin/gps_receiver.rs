
extern crate clap;
extern crate colored;
extern crate gps_link;
extern crate serde_json;

use clap::{Arg, App};
use colored::*;

use gps_link::io::TextSink;
use gps_link::nmea::{decoder, Fix, RawSentence};
use gps_link::nmea::format;
use gps_link::radio::link::{LinkOutcome, LinkReceiver};
use gps_link::radio::transport::FrameReader;

fn main() {

	let matches = App::new("GPS Link Receiver")
		.version("0.1.0")
		.about("Replays a radio frame capture, unpacks each frame, and reports the decoded fixes")
		.arg(Arg::with_name("filename")
			.short("f").long("filename")
			.help("Frame capture filename")
			.required(true).takes_value(true))
		.get_matches();

	let fname:&str = matches.value_of("filename").unwrap();
	eprintln!("Receiving frames from {}", fname);

	let mut rx = LinkReceiver::new(FrameReader::new(std::fs::File::open(fname).unwrap()));
	let mut fix = Fix::default();
	let mut all_fixes:Vec<Fix> = vec![];
	let mut stdout = std::io::stdout();

	loop {
		match rx.receive() {
			Ok((LinkOutcome::Stopped(_), _)) => {
				// End of the capture
				break;
			},
			Ok((outcome, Some(packet))) => {
				// Echo the raw sentence, then run it through the decode path
				let sentence = RawSentence(packet.sentence_bytes().to_vec());
				stdout.write_text(sentence.as_bytes());

				match decoder::validate(&sentence) {
					Ok(s) => match decoder::decode(&s, &mut fix) {
						Ok(()) => {
							eprintln!("{}", format!("Frame {} -> {:?}", packet.sequence, outcome).green());
							stdout.write_text(format::to_text(&fix).as_bytes());
							all_fixes.push(fix);
						},
						Err(e) => eprintln!("{}", format!("Frame {} dropped: {:?}", packet.sequence, e).yellow()),
					},
					Err(e) => eprintln!("{}", format!("Frame {} dropped: {:?}", packet.sequence, e).yellow()),
				}
			},
			Ok((outcome, None)) => eprintln!("{}", format!("No frame: {:?}", outcome).yellow()),
			Err(e) => {
				eprintln!("{}", format!("Fatal link status: {:?}; halting", e).red());
				std::process::exit(1);
			},
		}
	}

	println!("{}", serde_json::to_string_pretty(&all_fixes).unwrap());
}
