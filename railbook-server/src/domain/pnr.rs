//! PNR (Passenger Name Record) codes.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid PNR.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid PNR: {reason}")]
pub struct InvalidPnr {
    reason: &'static str,
}

/// A reservation's unique lookup code: exactly 10 ASCII digits.
///
/// Generation draws 10 independent uniform digits. Collisions are not
/// checked; with a handful of bookings against a 10^10 space this is an
/// acknowledged weakness rather than a practical problem.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pnr(String);

impl Pnr {
    /// Parse a PNR from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidPnr> {
        if s.len() != 10 {
            return Err(InvalidPnr {
                reason: "must be exactly 10 digits",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPnr {
                reason: "must contain only digits 0-9",
            });
        }
        Ok(Pnr(s.to_string()))
    }

    /// Generate a fresh PNR from the given RNG.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let digits: String = (0..10)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        Pnr(digits)
    }

    /// Returns the PNR as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pnr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pnr({})", self.0)
    }
}

impl fmt::Display for Pnr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Pnr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Pnr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pnr::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert!(Pnr::parse("0123456789").is_ok());
        assert!(Pnr::parse("9999999999").is_ok());
    }

    #[test]
    fn reject_invalid() {
        assert!(Pnr::parse("").is_err());
        assert!(Pnr::parse("123456789").is_err());
        assert!(Pnr::parse("12345678901").is_err());
        assert!(Pnr::parse("12345abcde").is_err());
    }

    #[test]
    fn generated_pnr_parses() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let pnr = Pnr::generate(&mut rng);
            assert!(Pnr::parse(pnr.as_str()).is_ok());
        }
    }
}
