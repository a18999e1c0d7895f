//! Calendar formatting for the simulated date readout.
//!
//! Uses f64 seconds since the Unix epoch; only the final string is lossy.

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// 1970-01-01T00:00Z expressed in days from J2000 (2000-01-01T12:00).
const UNIX_EPOCH_FROM_J2000: f64 = -10_957.5;

/// Convert days from J2000 to (year, month, day).
/// J2000.0 = January 1, 2000, 12:00 TT (Julian Day 2451545.0).
pub fn days_to_date(days_from_j2000: f64) -> (i64, u32, u32) {
    let jd = days_from_j2000 + 2_451_545.0;
    let z = (jd + 0.5).floor() as i64;
    let a = if z < 2_299_161 {
        z
    } else {
        let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
        z + 1 + alpha - alpha / 4
    };
    let b = a + 1524;
    let c = ((b as f64 - 122.1) / 365.25).floor() as i64;
    let d = (365.25 * c as f64).floor() as i64;
    let e = ((b - d) as f64 / 30.6001).floor() as i64;

    let day = (b - d - (30.6001 * e as f64).floor() as i64) as u32;
    let month = if e < 14 { (e - 1) as u32 } else { (e - 13) as u32 };
    let year = if month > 2 { c - 4716 } else { c - 4715 };

    (year, month, day)
}

/// Format Unix seconds as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn format_utc(unix_seconds: f64) -> String {
    let day_index = unix_seconds.div_euclid(SECONDS_PER_DAY);
    let secs = unix_seconds.rem_euclid(SECONDS_PER_DAY).floor() as u32;
    let (year, month, day) = days_to_date(day_index + UNIX_EPOCH_FROM_J2000);
    format!(
        "{year:04}-{month:02}-{day:02} {:02}:{:02}:{:02} UTC",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
    )
}

/// The display clock: current wall clock shifted by this frame's time factor.
pub fn simulated_datetime(wall_clock_unix: f64, time_factor: f64) -> String {
    format_utc(wall_clock_unix + time_factor)
}
