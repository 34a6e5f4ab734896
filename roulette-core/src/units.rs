//! Conversion between display units and on-chain minimal units.
//!
//! One display unit is `10^24` minimal units. Chips are the betting
//! denomination used by the contract: one chip is `0.01` display units.
//! All arithmetic is integer; nothing here touches floating point.

use crate::error::{GatewayError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MINIMAL_UNIT_DECIMALS: usize = 24;
pub const ONE_DISPLAY_UNIT: u128 = 1_000_000_000_000_000_000_000_000;
pub const CHIPS_PER_DISPLAY_UNIT: u128 = 100;
pub const ONE_CHIP: u128 = ONE_DISPLAY_UNIT / CHIPS_PER_DISPLAY_UNIT;

/// Fractional digits shown by [`format_display_amount`] callers that have no preference.
pub const DEFAULT_DISPLAY_DIGITS: usize = 5;

/// Parse a human-entered display amount ("1", "0.25", "1,000.5") into minimal units.
pub fn to_minimal_units(value: &str) -> Result<u128> {
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return Err(GatewayError::invalid_amount("empty amount"));
    }
    if cleaned.starts_with('-') {
        return Err(GatewayError::invalid_amount(format!(
            "negative amount: {}",
            value
        )));
    }

    let (int_part, frac_part) = match cleaned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (cleaned.as_str(), ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(GatewayError::invalid_amount(format!("no digits in '{}'", value)));
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(GatewayError::invalid_amount(format!(
            "not a decimal number: '{}'",
            value
        )));
    }
    if frac_part.len() > MINIMAL_UNIT_DECIMALS {
        return Err(GatewayError::invalid_amount(format!(
            "more than {} fractional digits: '{}'",
            MINIMAL_UNIT_DECIMALS, value
        )));
    }

    let integer: u128 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| GatewayError::invalid_amount(format!("amount too large: '{}'", value)))?
    };

    let fraction: u128 = if frac_part.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_part, width = MINIMAL_UNIT_DECIMALS);
        padded
            .parse()
            .map_err(|_| GatewayError::invalid_amount(format!("invalid fraction: '{}'", value)))?
    };

    integer
        .checked_mul(ONE_DISPLAY_UNIT)
        .and_then(|v| v.checked_add(fraction))
        .ok_or_else(|| GatewayError::invalid_amount(format!("amount too large: '{}'", value)))
}

/// Exact display representation of a minimal-unit value, without trailing zeros.
pub fn from_minimal_units(value: u128) -> String {
    let whole = value / ONE_DISPLAY_UNIT;
    let remainder = value % ONE_DISPLAY_UNIT;
    if remainder == 0 {
        whole.to_string()
    } else {
        let fraction = format!("{:0width$}", remainder, width = MINIMAL_UNIT_DECIMALS);
        format!("{}.{}", whole, fraction.trim_end_matches('0'))
    }
}

/// Display amount rounded half-up to `frac_digits` digits, with thousands separators.
pub fn format_display_amount(value: u128, frac_digits: usize) -> String {
    let frac_digits = frac_digits.min(MINIMAL_UNIT_DECIMALS);
    let unit = 10u128.pow((MINIMAL_UNIT_DECIMALS - frac_digits) as u32);
    let mut rounded = value / unit;
    if (value % unit) * 2 >= unit && unit > 1 {
        rounded += 1;
    }

    let scale = 10u128.pow(frac_digits as u32);
    let whole = group_thousands(rounded / scale);
    let fraction = rounded % scale;
    if fraction == 0 {
        whole
    } else {
        let fraction = format!("{:0width$}", fraction, width = frac_digits);
        format!("{}.{}", whole, fraction.trim_end_matches('0'))
    }
}

pub fn chips_to_minimal(chips: u64) -> Result<u128> {
    (chips as u128)
        .checked_mul(ONE_CHIP)
        .ok_or_else(|| GatewayError::invalid_amount(format!("{} chips overflow", chips)))
}

/// Whole chips contained in `value`, rounded down.
pub fn minimal_to_chips(value: u128) -> u128 {
    value / ONE_CHIP
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// A minimal-unit amount. Serialized as a decimal string so no JSON
/// consumer ever rounds it through a double.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinimalAmount(pub u128);

impl MinimalAmount {
    pub fn from_chips(chips: u64) -> Result<Self> {
        chips_to_minimal(chips).map(Self)
    }

    pub fn as_u128(&self) -> u128 {
        self.0
    }

    pub fn to_display(&self) -> String {
        from_minimal_units(self.0)
    }
}

impl From<u128> for MinimalAmount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for MinimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MinimalAmount {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u128>()
            .map(Self)
            .map_err(|_| GatewayError::invalid_amount(format!("not a minimal-unit integer: '{}'", s)))
    }
}

impl Serialize for MinimalAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for MinimalAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u128>()
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_minimal_units() {
        assert_eq!(to_minimal_units("1").unwrap(), ONE_DISPLAY_UNIT);
        assert_eq!(to_minimal_units("0.01").unwrap(), ONE_CHIP);
        assert_eq!(
            to_minimal_units("1,000.5").unwrap(),
            1_000 * ONE_DISPLAY_UNIT + ONE_DISPLAY_UNIT / 2
        );
        assert_eq!(to_minimal_units(".5").unwrap(), ONE_DISPLAY_UNIT / 2);
        assert_eq!(to_minimal_units("0.000000000000000000000001").unwrap(), 1);
    }

    #[test]
    fn test_to_minimal_units_rejects_garbage() {
        assert!(to_minimal_units("").is_err());
        assert!(to_minimal_units("-1").is_err());
        assert!(to_minimal_units("1.2.3").is_err());
        assert!(to_minimal_units("abc").is_err());
        assert!(to_minimal_units(".").is_err());
        assert!(to_minimal_units("0.0000000000000000000000001").is_err());
        assert!(to_minimal_units("999999999999999999999999999").is_err());
    }

    #[test]
    fn test_from_minimal_units() {
        assert_eq!(from_minimal_units(0), "0");
        assert_eq!(from_minimal_units(ONE_DISPLAY_UNIT), "1");
        assert_eq!(from_minimal_units(ONE_CHIP * 150), "1.5");
        assert_eq!(from_minimal_units(1), "0.000000000000000000000001");
    }

    #[test]
    fn test_round_trip_is_stable() {
        for display in ["0", "1", "0.01", "12.345678", "3.000000000000000000000007"] {
            let minimal = to_minimal_units(display).unwrap();
            let back = to_minimal_units(&from_minimal_units(minimal)).unwrap();
            assert_eq!(back, minimal, "round trip of {}", display);
        }
        for minimal in [0u128, 1, ONE_CHIP - 1, ONE_DISPLAY_UNIT + 7, u128::MAX] {
            assert_eq!(to_minimal_units(&from_minimal_units(minimal)).unwrap(), minimal);
        }
    }

    #[test]
    fn test_format_display_amount() {
        assert_eq!(format_display_amount(1_234_567 * ONE_DISPLAY_UNIT, 2), "1,234,567");
        assert_eq!(format_display_amount(ONE_DISPLAY_UNIT / 3, 5), "0.33333");
        assert_eq!(format_display_amount(ONE_DISPLAY_UNIT * 2 / 3, 2), "0.67");
        assert_eq!(format_display_amount(ONE_CHIP * 150, 0), "2");
        assert_eq!(format_display_amount(1, MINIMAL_UNIT_DECIMALS), "0.000000000000000000000001");
    }

    #[test]
    fn test_chips() {
        assert_eq!(chips_to_minimal(100).unwrap(), ONE_DISPLAY_UNIT);
        assert_eq!(minimal_to_chips(ONE_DISPLAY_UNIT + ONE_CHIP - 1), 100);
        assert!(chips_to_minimal(u64::MAX).is_err());
    }

    #[test]
    fn test_minimal_amount_serializes_as_string() {
        let amount = MinimalAmount::from_chips(5).unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"50000000000000000000000\"");
        let parsed: MinimalAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, amount);
        assert!(serde_json::from_str::<MinimalAmount>("\"-3\"").is_err());
    }
}
