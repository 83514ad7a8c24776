//! DateTime and duration display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that provides system timezone formatting via
/// the `Display` trait.
///
/// # Format
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Millisecond duration rendered at a human scale: seconds under a minute,
/// minutes under an hour, then hours and days.
pub struct HumanDuration(pub i64);

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.0 / 1000;
        if seconds < 60 {
            write!(f, "{seconds}s")
        } else if seconds < 3600 {
            write!(f, "{}m {}s", seconds / 60, seconds % 60)
        } else if seconds < 86_400 {
            write!(f, "{}h {}m", seconds / 3600, (seconds % 3600) / 60)
        } else {
            write!(f, "{}d {}h", seconds / 86_400, (seconds % 86_400) / 3600)
        }
    }
}
