use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::{Error, ErrorKind, Result};

/// Surrogate identifier for a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookingId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PaymentId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

macro_rules! id_impl {
    ($name:ident) => {
        impl $name {
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }

            pub fn value(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                // 36-character hyphenated form
                write!(f, "{}", self.0)
            }
        }
    };
}

id_impl!(UserId);
id_impl!(PropertyId);
id_impl!(BookingId);
id_impl!(PaymentId);
id_impl!(ReviewId);
id_impl!(MessageId);

/// Fixed-point money amount with two fractional digits, stored as cents.
///
/// Parsing and display use the `"123.45"` textual form; arithmetic stays in
/// integer cents so repeated aggregation never loses precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn from_major(units: i64) -> Self {
        Money(units * 100)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = Error;

    fn from_str(s: &str) -> Result<Money> {
        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, s),
        };

        let (whole, frac) = match rest.split_once('.') {
            Some((w, f)) => (w, f),
            None => (rest, ""),
        };

        let all_digits =
            |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || frac.len() > 2 || (!frac.is_empty() && !all_digits(frac)) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("invalid money literal: {:?}", s),
            ));
        }

        let units: i64 = whole.parse().map_err(|_| {
            Error::new(ErrorKind::InvalidInput, format!("invalid money literal: {:?}", s))
        })?;

        let cents: i64 = if frac.is_empty() {
            0
        } else {
            // "5.5" means 50 cents, "5.05" means 5
            let parsed: i64 = frac.parse().map_err(|_| {
                Error::new(ErrorKind::InvalidInput, format!("invalid money literal: {:?}", s))
            })?;
            if frac.len() == 1 { parsed * 10 } else { parsed }
        };

        Ok(Money(sign * (units * 100 + cents)))
    }
}

impl Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Money, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
