//! Rotation interval parsing.

use std::time::Duration;

use crate::error::ConfigError;

/// Parse an interval such as `300`, `45s`, `5m` or `2h`.
///
/// A trailing `s`, `m` or `h` selects seconds, minutes or hours; a bare
/// number is seconds. Fractional values are accepted and truncated to whole
/// seconds (`1.5m` is 90 s).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for an empty string, a non-numeric
/// value, or a value that is not strictly positive.
pub fn parse_interval(raw: &str) -> Result<Duration, ConfigError> {
    let s = raw.trim().to_ascii_lowercase();
    if s.is_empty() {
        return Err(ConfigError::invalid("interval", "interval cannot be empty"));
    }

    let (number, factor) = match s.as_bytes()[s.len() - 1] {
        b's' => (&s[..s.len() - 1], 1.0),
        b'm' => (&s[..s.len() - 1], 60.0),
        b'h' => (&s[..s.len() - 1], 3600.0),
        _ => (s.as_str(), 1.0),
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid("interval", format!("'{raw}' is not a number")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::invalid("interval", "interval must be > 0"));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let secs = (value * factor) as u64;
    if secs == 0 {
        return Err(ConfigError::invalid(
            "interval",
            format!("'{raw}' is shorter than one second"),
        ));
    }

    Ok(Duration::from_secs(secs))
}
