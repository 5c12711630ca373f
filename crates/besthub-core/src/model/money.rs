// ── Money ──
//
// One typed amount for every boundary: integer minor units (pesewas) plus a
// currency code. The backend speaks major units for orders and display and
// minor units for top-up initiation; both conversions live here and nowhere
// else.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO 4217 currency. The platform only trades in Ghana cedis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "GHS")]
    Ghs,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Self::Ghs => "GHS",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("'{0}' is not a decimal amount")]
    NotANumber(String),

    #[error("'{0}' has more than two decimal places")]
    TooPrecise(String),

    #[error("'{0}' is out of range")]
    Overflow(String),
}

/// An amount of money in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money {
    minor: i64,
    currency: Currency,
}

impl Money {
    pub const ZERO: Self = Self::from_minor(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self {
            minor,
            currency: Currency::Ghs,
        }
    }

    /// Whole major units, e.g. `Money::from_major(50)` is GHS 50.00.
    pub const fn from_major(major: i64) -> Self {
        Self::from_minor(major * 100)
    }

    pub fn minor(self) -> i64 {
        self.minor
    }

    pub fn currency(self) -> Currency {
        self.currency
    }

    pub fn is_positive(self) -> bool {
        self.minor > 0
    }

    pub fn is_negative(self) -> bool {
        self.minor < 0
    }

    /// Parse user input in major units. At most two decimals are accepted.
    pub fn parse_major(text: &str) -> Result<Self, MoneyError> {
        parse_decimal(text, Rounding::Reject)
    }

    /// Parse a backend amount in major units. Extra precision (from float
    /// encoding, e.g. `0.30000000000000004`) is rounded half away from zero.
    pub fn from_major_lenient(text: &str) -> Result<Self, MoneyError> {
        parse_decimal(text, Rounding::HalfAwayFromZero)
    }

    /// Major-unit decimal string without currency, e.g. `"50.00"`.
    pub fn major_string(self) -> String {
        let sign = if self.minor < 0 { "-" } else { "" };
        let abs = self.minor.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }

    /// Major units as a JSON number, for endpoints that take decimals.
    pub fn to_major_json(self) -> serde_json::Value {
        self.major_string()
            .parse::<f64>()
            .map_or(serde_json::Value::Null, serde_json::Value::from)
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.minor.checked_add(other.minor).map(Self::from_minor)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_minor(self.minor.saturating_add(rhs.minor))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_minor(self.minor.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.major_string())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix("GHS")
            .or_else(|| s.strip_prefix("GH₵"))
            .or_else(|| s.strip_prefix('₵'))
            .unwrap_or(s);
        Self::parse_major(s.trim())
    }
}

// ── Parsing ─────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Rounding {
    Reject,
    HalfAwayFromZero,
}

fn parse_decimal(text: &str, rounding: Rounding) -> Result<Money, MoneyError> {
    let raw = text.trim();
    let bad = || MoneyError::NotANumber(raw.to_owned());

    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(bad());
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(bad());
    }

    let overflow = || MoneyError::Overflow(raw.to_owned());
    let major: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| overflow())?
    };

    let mut digits = frac_part.chars().filter_map(|c| c.to_digit(10));
    let tenths = i64::from(digits.next().unwrap_or(0));
    let hundredths = i64::from(digits.next().unwrap_or(0));
    let rest: Vec<u32> = digits.collect();

    let mut minor = major
        .checked_mul(100)
        .and_then(|m| m.checked_add(tenths * 10 + hundredths))
        .ok_or_else(overflow)?;

    if rest.iter().any(|d| *d != 0) {
        match rounding {
            Rounding::Reject => return Err(MoneyError::TooPrecise(raw.to_owned())),
            Rounding::HalfAwayFromZero => {
                if rest.first().is_some_and(|d| *d >= 5) {
                    minor = minor.checked_add(1).ok_or_else(overflow)?;
                }
            }
        }
    }

    Ok(Money::from_minor(if negative { -minor } else { minor }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_units() {
        assert_eq!(Money::parse_major("50").unwrap().minor(), 5000);
        assert_eq!(Money::parse_major("50.5").unwrap().minor(), 5050);
        assert_eq!(Money::parse_major("0.07").unwrap().minor(), 7);
        assert_eq!(Money::parse_major(".5").unwrap().minor(), 50);
        assert_eq!(Money::parse_major("-3.25").unwrap().minor(), -325);
    }

    #[test]
    fn rejects_garbage_and_extra_precision() {
        assert!(matches!(Money::parse_major("abc"), Err(MoneyError::NotANumber(_))));
        assert!(matches!(Money::parse_major(""), Err(MoneyError::NotANumber(_))));
        assert!(matches!(Money::parse_major("1.2.3"), Err(MoneyError::NotANumber(_))));
        assert!(matches!(Money::parse_major("1.005"), Err(MoneyError::TooPrecise(_))));
        assert!(matches!(
            Money::parse_major("99999999999999999999"),
            Err(MoneyError::Overflow(_))
        ));
    }

    #[test]
    fn lenient_parse_rounds_float_noise() {
        assert_eq!(Money::from_major_lenient("0.30000000000000004").unwrap().minor(), 30);
        assert_eq!(Money::from_major_lenient("2.675").unwrap().minor(), 268);
        assert_eq!(Money::from_major_lenient("-2.675").unwrap().minor(), -268);
    }

    #[test]
    fn trailing_zero_precision_is_fine() {
        assert_eq!(Money::parse_major("50.000").unwrap().minor(), 5000);
    }

    #[test]
    fn display_and_major_string() {
        assert_eq!(Money::from_minor(5000).to_string(), "GHS 50.00");
        assert_eq!(Money::from_minor(-505).to_string(), "GHS -5.05");
        assert_eq!(Money::from_minor(7).major_string(), "0.07");
        assert_eq!("GHS 12.30".parse::<Money>().unwrap().minor(), 1230);
    }

    #[test]
    fn major_json_is_a_number() {
        assert_eq!(Money::from_minor(650).to_major_json(), serde_json::json!(6.5));
        assert_eq!(Money::from_minor(-500).to_major_json(), serde_json::json!(-5.0));
    }

    #[test]
    fn sums_saturate_instead_of_wrapping() {
        let total: Money = [Money::from_major(1), Money::from_minor(50)].iter().sum();
        assert_eq!(total.minor(), 150);
        assert_eq!((Money::from_minor(i64::MAX) + Money::from_minor(1)).minor(), i64::MAX);
    }
}
