use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed money amount represented as **integer øre** (minor units).
///
/// Use this type for **all** monetary values in the engine (amounts,
/// settlements, summary totals) to avoid floating-point drift.
///
/// The value is signed:
/// - positive = credit / money in
/// - negative = expense / money out
///
/// # Examples
///
/// ```rust
/// use engine::MoneyOre;
///
/// let amount = MoneyOre::new(12_50);
/// assert_eq!(amount.ore(), 1250);
/// assert_eq!(amount.to_string(), "12.50 kr");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more than 2 decimals):
///
/// ```rust
/// use engine::MoneyOre;
///
/// assert_eq!("10".parse::<MoneyOre>().unwrap().ore(), 1000);
/// assert_eq!("10,5".parse::<MoneyOre>().unwrap().ore(), 1050);
/// assert!("12.345".parse::<MoneyOre>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MoneyOre(i64);

impl MoneyOre {
    pub const ZERO: MoneyOre = MoneyOre(0);

    /// Creates a new amount from integer øre.
    #[must_use]
    pub const fn new(ore: i64) -> Self {
        Self(ore)
    }

    /// Returns the raw value in øre.
    #[must_use]
    pub const fn ore(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[must_use]
    pub const fn abs(self) -> MoneyOre {
        MoneyOre(self.0.abs())
    }

    /// Returns half the amount, rounded toward negative infinity.
    ///
    /// This is the personal share of a shared expense: the odd øre goes to
    /// the partner, so `-45.01 kr` halves to `-22.51 kr`.
    #[must_use]
    pub const fn halved(self) -> MoneyOre {
        MoneyOre(self.0.div_euclid(2))
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyOre) -> Option<MoneyOre> {
        self.0.checked_add(rhs.0).map(MoneyOre)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyOre) -> Option<MoneyOre> {
        self.0.checked_sub(rhs.0).map(MoneyOre)
    }
}

impl fmt::Display for MoneyOre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let kroner = abs / 100;
        let ore = abs % 100;
        write!(f, "{sign}{kroner}.{ore:02} kr")
    }
}

impl From<i64> for MoneyOre {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyOre> for i64 {
    fn from(value: MoneyOre) -> Self {
        value.0
    }
}

impl Add for MoneyOre {
    type Output = MoneyOre;

    fn add(self, rhs: MoneyOre) -> Self::Output {
        MoneyOre(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyOre {
    fn add_assign(&mut self, rhs: MoneyOre) {
        self.0 += rhs.0;
    }
}

impl Sub for MoneyOre {
    type Output = MoneyOre;

    fn sub(self, rhs: MoneyOre) -> Self::Output {
        MoneyOre(self.0 - rhs.0)
    }
}

impl SubAssign for MoneyOre {
    fn sub_assign(&mut self, rhs: MoneyOre) {
        self.0 -= rhs.0;
    }
}

impl Neg for MoneyOre {
    type Output = MoneyOre;

    fn neg(self) -> Self::Output {
        MoneyOre(-self.0)
    }
}

impl FromStr for MoneyOre {
    type Err = EngineError;

    /// Parses a decimal string into øre.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::Validation("empty amount".to_string());
        let invalid = || EngineError::Validation("invalid amount".to_string());
        let overflow = || EngineError::Validation("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let kroner_str = parts.next().ok_or_else(invalid)?;
        let ore_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if kroner_str.is_empty() || !kroner_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let kroner: i64 = kroner_str.parse().map_err(|_| invalid())?;

        let ore: i64 = match ore_str {
            None => 0,
            Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    0 => 0,
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::Validation("too many decimals".to_string())),
                }
            }
        };

        let total = kroner
            .checked_mul(100)
            .and_then(|v| v.checked_add(ore))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(MoneyOre(signed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_kroner() {
        assert_eq!(MoneyOre::new(0).to_string(), "0.00 kr");
        assert_eq!(MoneyOre::new(1).to_string(), "0.01 kr");
        assert_eq!(MoneyOre::new(10).to_string(), "0.10 kr");
        assert_eq!(MoneyOre::new(1050).to_string(), "10.50 kr");
        assert_eq!(MoneyOre::new(-1050).to_string(), "-10.50 kr");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<MoneyOre>().unwrap().ore(), 1000);
        assert_eq!("10.5".parse::<MoneyOre>().unwrap().ore(), 1050);
        assert_eq!("10,50".parse::<MoneyOre>().unwrap().ore(), 1050);
        assert_eq!("-0.01".parse::<MoneyOre>().unwrap().ore(), -1);
        assert_eq!("+1.00".parse::<MoneyOre>().unwrap().ore(), 100);
        assert_eq!("  2.30 ".parse::<MoneyOre>().unwrap().ore(), 230);
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert!("12.345".parse::<MoneyOre>().is_err());
        assert!("0.001".parse::<MoneyOre>().is_err());
    }

    #[test]
    fn halved_floors_toward_negative_infinity() {
        assert_eq!(MoneyOre::new(-4500).halved().ore(), -2250);
        assert_eq!(MoneyOre::new(-4501).halved().ore(), -2251);
        assert_eq!(MoneyOre::new(4501).halved().ore(), 2250);
        assert_eq!(MoneyOre::new(0).halved().ore(), 0);
    }
}
