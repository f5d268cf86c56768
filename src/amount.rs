//! Amount newtypes.
//!
//! The specification distinguishes two amount shapes: container control
//! totals and summary amounts carry an explicit sign (debits negative,
//! credits positive), while transaction detail amounts are always unsigned.
//! Modeling these as distinct types means a transaction amount can never be
//! accidentally compared against a signed control total.

use crate::errors::{Bai2Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// A signed BAI2 amount token (e.g. `+500`, `-12`, `+0`). Bare tokens with no
/// leading sign (e.g. `500`) parse as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub fn zero() -> Self {
        Amount(0)
    }

    pub fn from_minor_units(value: i64) -> Self {
        Amount(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Parses a signed decimal token. `record_type`/`field`/`offset` are used
    /// only to annotate the error if the token is malformed.
    pub fn parse(token: &str, record_type: &str, field: &str, offset: usize) -> Result<Self> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Ok(Amount(0));
        }
        let bytes = trimmed.as_bytes();
        let (sign, digits): (i64, &str) = match bytes[0] {
            b'+' => (1, &trimmed[1..]),
            b'-' => (-1, &trimmed[1..]),
            _ => (1, trimmed),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Bai2Error::field(
                record_type,
                field,
                offset,
                format!("invalid amount token '{token}'"),
            ));
        }
        let magnitude: i64 = digits.parse().map_err(|_| {
            Bai2Error::field(
                record_type,
                field,
                offset,
                format!("amount out of range '{token}'"),
            )
        })?;
        Ok(Amount(sign * magnitude))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-{}", -self.0)
        } else {
            write!(f, "+{}", self.0)
        }
    }
}

impl Add for Amount {
    type Output = Amount;
    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, x| acc + x)
    }
}

/// An unsigned BAI2 amount token, used for transaction detail amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnsignedAmount(u64);

impl UnsignedAmount {
    pub fn zero() -> Self {
        UnsignedAmount(0)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn parse(token: &str, record_type: &str, field: &str, offset: usize) -> Result<Self> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Ok(UnsignedAmount(0));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Bai2Error::field(
                record_type,
                field,
                offset,
                format!("invalid unsigned amount token '{token}'"),
            ));
        }
        let value: u64 = trimmed.parse().map_err(|_| {
            Bai2Error::field(
                record_type,
                field,
                offset,
                format!("amount out of range '{token}'"),
            )
        })?;
        Ok(UnsignedAmount(value))
    }
}

impl fmt::Display for UnsignedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_explicit_sign() {
        assert_eq!(Amount::parse("+0", "03", "amount", 0).unwrap().value(), 0);
        assert_eq!(
            Amount::parse("-1234", "03", "amount", 0).unwrap().value(),
            -1234
        );
    }

    #[test]
    fn test_amount_bare_token_is_positive() {
        assert_eq!(
            Amount::parse("500", "03", "amount", 0).unwrap().value(),
            500
        );
    }

    #[test]
    fn test_amount_empty_token_is_zero() {
        assert_eq!(Amount::parse("", "03", "amount", 0).unwrap(), Amount::zero());
    }

    #[test]
    fn test_amount_display_always_signed() {
        assert_eq!(Amount::from_minor_units(500).to_string(), "+500");
        assert_eq!(Amount::from_minor_units(-500).to_string(), "-500");
        assert_eq!(Amount::from_minor_units(0).to_string(), "+0");
    }

    #[test]
    fn test_amount_rejects_non_numeric() {
        assert!(Amount::parse("abc", "03", "amount", 0).is_err());
    }

    #[test]
    fn test_amount_sum() {
        let items = vec![
            Amount::from_minor_units(100),
            Amount::from_minor_units(-40),
            Amount::from_minor_units(5),
        ];
        let total: Amount = items.into_iter().sum();
        assert_eq!(total.value(), 65);
    }

    #[test]
    fn test_unsigned_amount() {
        assert_eq!(
            UnsignedAmount::parse("1912", "16", "amount", 0)
                .unwrap()
                .value(),
            1912
        );
        assert!(UnsignedAmount::parse("-5", "16", "amount", 0).is_err());
    }
}
