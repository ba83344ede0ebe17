
use super::Fix;

// Renders the working record the way the original ground display printed it: the
// time as HH:MM:SS, then labeled latitude/longitude as integer degrees plus
// fractional minutes, then the raw speed and course values.  Rendering never
// fails, sentinel values included.
pub fn to_text(fix:&Fix) -> String {
	let t = fix.time as u32;

	let lat_deg = (fix.latitude as i32) / 100;
	let lat_min = fix.latitude - (((fix.latitude as u32) / 100) * 100) as f64;
	let long_deg = (fix.longitude as i32) / 100;
	let long_min = fix.longitude - (((fix.longitude as u32) / 100) * 100) as f64;

	format!("{:02}:{:02}:{:02}\tlatitude:\t{} {:.6}{}\tlongitude:\t{} {:.6}{}\tground speed:\t{:.6}\ttrue course:\t{:.6}\r\n",
		(t / 10000) % 100, (t / 100) % 100, t % 100,
		lat_deg, lat_min, fix.lat_direction,
		long_deg, long_min, fix.long_direction,
		fix.ground_speed, fix.true_course)
}

#[cfg(test)]
mod tests {

	use super::*;

	#[test]
	fn renders_the_reference_fix() {
		let fix = Fix{ time: 123519.0,
		               latitude: 4807.038, lat_direction: 'N',
		               longitude: 1131.0,  long_direction: 'E',
		               altitude: 545.4, ground_speed: 22.4, true_course: 84.4 };

		let text = to_text(&fix);

		assert!(text.starts_with("12:35:19\t"));
		assert!(text.contains("latitude:\t48 7.038000N"));
		assert!(text.contains("longitude:\t11 31.000000E"));
		assert!(text.contains("ground speed:\t22.400000"));
		assert!(text.contains("true course:\t84.400000"));
		assert!(text.ends_with("\r\n"));
	}

	#[test]
	fn time_components_are_zero_padded() {
		let fix = Fix{ time: 10203.0, ..Fix::default() };
		assert!(to_text(&fix).starts_with("01:02:03\t"));
	}

	#[test]
	fn renders_sentinel_values_without_failing() {
		let text = to_text(&Fix::default());
		assert!(text.starts_with("00:00:00\t"));
		assert!(text.contains("latitude:\t0 0.000000 "));
		assert!(text.contains("longitude:\t0 0.000000 "));
		assert!(text.ends_with("\r\n"));
	}
}
