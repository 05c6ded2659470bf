//! Elapsed-time counter and `HH:MM:SS:CC` formatting
//!
//! Pure functions only. The controller owns the counter and calls into here.

use crate::types::{ElapsedTime, Result, StopwatchError};

const HUNDREDTHS_PER_MINUTE: u64 = 6_000;
const HUNDREDTHS_PER_HOUR: u64 = 360_000;

/// Advance the counter by one hundredth of a second
pub fn tick(current: ElapsedTime) -> ElapsedTime {
    ElapsedTime::from_hundredths(current.hundredths().saturating_add(1))
}

/// Format elapsed time as `HH:MM:SS:CC`
///
/// Every field is zero-padded to two digits. Hours are not wrapped, so more
/// than 99 hours produces a wider hour field.
pub fn format(time: ElapsedTime) -> String {
    let t = time.hundredths();
    let hours = t / HUNDREDTHS_PER_HOUR;
    let minutes = (t / HUNDREDTHS_PER_MINUTE) % 60;
    let seconds = (t / 100) % 60;
    let hundredths = t % 100;

    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, seconds, hundredths)
}

/// Parse text produced by [`format`] back into an elapsed time
///
/// # Example
/// ```
/// use stopwatch_core::clock;
///
/// let t = clock::parse("01:02:03:04").unwrap();
/// assert_eq!(clock::format(t), "01:02:03:04");
/// ```
pub fn parse(text: &str) -> Result<ElapsedTime> {
    let invalid = || StopwatchError::InvalidTimeFormat(text.to_string());

    let fields: Vec<&str> = text.split(':').collect();
    let [hh, mm, ss, cc] = fields.as_slice() else {
        return Err(invalid());
    };

    if hh.len() < 2 || [mm, ss, cc].iter().any(|f| f.len() != 2) {
        return Err(invalid());
    }
    if !fields.iter().all(|f| f.bytes().all(|b| b.is_ascii_digit())) {
        return Err(invalid());
    }

    let hours: u64 = hh.parse().map_err(|_| invalid())?;
    let minutes: u64 = mm.parse().map_err(|_| invalid())?;
    let seconds: u64 = ss.parse().map_err(|_| invalid())?;
    let hundredths: u64 = cc.parse().map_err(|_| invalid())?;

    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    hours
        .checked_mul(HUNDREDTHS_PER_HOUR)
        .and_then(|h| h.checked_add(minutes * HUNDREDTHS_PER_MINUTE + seconds * 100 + hundredths))
        .map(ElapsedTime::from_hundredths)
        .ok_or_else(invalid)
}
