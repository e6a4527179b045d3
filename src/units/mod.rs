//! Unit token parsing
//!
//! Criteria values for size, bitrate and duration are written as
//! `<number>:<unit>` tokens, e.g. `100:mb` or `90:min`. This module turns
//! those tokens into canonical numbers:
//!
//! - sizes into bytes, using **binary** multiples (1 kb = 1024 b)
//! - bitrates into the probe's kbps-equivalent scale, using **decimal**
//!   multiples (1 mb = 1000 kb)
//! - durations into seconds
//!
//! The probe reports bitrate already divided by 1000, so bitrate tokens are
//! scaled relative to `kb`.
//!
//! # Examples
//!
//! ```
//! use vidsift::units::{parse_duration, parse_size, SizeUnit};
//!
//! assert_eq!(parse_size("100:MB").unwrap(), (100.0, SizeUnit::Mb));
//! assert_eq!(parse_duration("2:min").unwrap(), 120.0);
//! ```

pub mod error;

pub use error::FormatError;

/// Unit suffix accepted in size and bitrate tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    B,
    Kb,
    Mb,
    Gb,
}

impl SizeUnit {
    /// Multiplier that converts a value in this unit to bytes (1024-based)
    #[must_use]
    pub const fn bytes(self) -> f64 {
        match self {
            Self::B => 1.0,
            Self::Kb => 1024.0,
            Self::Mb => 1024.0 * 1024.0,
            Self::Gb => 1024.0 * 1024.0 * 1024.0,
        }
    }

    /// Multiplier that converts a value in this unit to the kbps-equivalent
    /// bitrate scale (1000-based, `kb` is the base)
    #[must_use]
    pub const fn bitrate(self) -> f64 {
        match self {
            Self::B => 0.001,
            Self::Kb => 1.0,
            Self::Mb => 1_000.0,
            Self::Gb => 1_000_000.0,
        }
    }
}

impl TryFrom<&str> for SizeUnit {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "b" => Ok(Self::B),
            "kb" => Ok(Self::Kb),
            "mb" => Ok(Self::Mb),
            "gb" => Ok(Self::Gb),
            _ => Err(()),
        }
    }
}

/// Split a `<number>:<unit>` token into its parts.
///
/// Exactly one separator is allowed and the number must be finite.
fn split_token(token: &str) -> Option<(f64, &str)> {
    let (number, unit) = token.split_once(':')?;
    if unit.contains(':') {
        return None;
    }
    let value: f64 = number.trim().parse().ok()?;
    value.is_finite().then_some((value, unit.trim()))
}

/// Parse a size token such as `"100:mb"` into its value and unit.
///
/// # Errors
///
/// Returns `FormatError::InvalidFormat` if the separator is missing, the
/// number is not numeric, or the unit is not one of `b`, `kb`, `mb`, `gb`.
pub fn parse_size(token: &str) -> Result<(f64, SizeUnit), FormatError> {
    let (value, unit) = split_token(token).ok_or_else(|| FormatError::size(token))?;
    let unit = SizeUnit::try_from(unit).map_err(|()| FormatError::size(token))?;
    Ok((value, unit))
}

/// Parse a size token straight into bytes.
///
/// # Errors
///
/// Same as [`parse_size`].
pub fn parse_size_bytes(token: &str) -> Result<f64, FormatError> {
    parse_size(token).map(|(value, unit)| value * unit.bytes())
}

/// Parse a bitrate token (same syntax as sizes) into the kbps-equivalent
/// scale reported by the probe.
///
/// # Errors
///
/// Same as [`parse_size`].
pub fn parse_bitrate(token: &str) -> Result<f64, FormatError> {
    parse_size(token).map(|(value, unit)| value * unit.bitrate())
}

/// Parse a duration token such as `"60:sec"` or `"1.5:h"` into seconds.
///
/// Accepted units: `sec`, `s`, `seconds`, `min`, `m`, `minutes`, `hr`, `h`,
/// `hours` (case-insensitive).
///
/// # Errors
///
/// Returns `FormatError::InvalidFormat` for a malformed token or an unknown
/// unit.
pub fn parse_duration(token: &str) -> Result<f64, FormatError> {
    let (value, unit) = split_token(token).ok_or_else(|| FormatError::duration(token))?;
    let factor = match unit.to_ascii_lowercase().as_str() {
        "sec" | "s" | "seconds" => 1.0,
        "min" | "m" | "minutes" => 60.0,
        "hr" | "h" | "hours" => 3600.0,
        _ => return Err(FormatError::duration(token)),
    };
    Ok(value * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_units_are_binary() {
        assert_eq!(parse_size_bytes("3:b").unwrap(), 3.0);
        assert_eq!(parse_size_bytes("3:kb").unwrap(), 3.0 * 1024.0);
        assert_eq!(parse_size_bytes("3:mb").unwrap(), 3.0 * 1024.0 * 1024.0);
        assert_eq!(
            parse_size_bytes("3:gb").unwrap(),
            3.0 * 1024.0 * 1024.0 * 1024.0
        );
    }

    #[test]
    fn test_parse_size_unit_is_case_insensitive() {
        assert_eq!(parse_size("1.5:GB").unwrap(), (1.5, SizeUnit::Gb));
        assert_eq!(parse_size("700:Mb").unwrap(), (700.0, SizeUnit::Mb));
    }

    #[test]
    fn test_parse_size_rejects_malformed_tokens() {
        for token in ["100", "100mb", "abc:mb", "100:tb", ":mb", "100:", "1:2:mb", "inf:mb"] {
            assert!(
                matches!(parse_size(token), Err(FormatError::InvalidFormat { kind: "size", .. })),
                "expected {token} to be rejected"
            );
        }
    }

    #[test]
    fn test_parse_bitrate_units_are_decimal() {
        assert_eq!(parse_bitrate("800:kb").unwrap(), 800.0);
        assert_eq!(parse_bitrate("5:mb").unwrap(), 5_000.0);
        assert_eq!(parse_bitrate("2:gb").unwrap(), 2_000_000.0);
    }

    #[test]
    fn test_parse_duration_multipliers() {
        assert_eq!(parse_duration("45:sec").unwrap(), 45.0);
        assert_eq!(parse_duration("45:s").unwrap(), 45.0);
        assert_eq!(parse_duration("45:seconds").unwrap(), 45.0);
        assert_eq!(parse_duration("2:min").unwrap(), 120.0);
        assert_eq!(parse_duration("2:M").unwrap(), 120.0);
        assert_eq!(parse_duration("2:minutes").unwrap(), 120.0);
        assert_eq!(parse_duration("1.5:hr").unwrap(), 5400.0);
        assert_eq!(parse_duration("1.5:h").unwrap(), 5400.0);
        assert_eq!(parse_duration("1.5:hours").unwrap(), 5400.0);
    }

    #[test]
    fn test_parse_duration_rejects_unknown_unit() {
        let err = parse_duration("3:days").unwrap_err();
        assert_eq!(err.to_string(), "Invalid duration argument format: 3:days");
        assert!(parse_duration("60").is_err());
        assert!(parse_duration("sixty:sec").is_err());
    }
}
