//! Input validation for profile and payment forms.
//!
//! The domain operations themselves are total; these checks sit at the
//! boundary where free-form user input enters the system.

use std::sync::LazyLock;

use common::Money;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$").expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("valid phone regex"));

/// Validation failures for user-entered fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid email address: {0}")]
    Email(String),

    #[error("invalid phone number: {0}")]
    Phone(String),

    #[error("invalid price: {0}")]
    Price(String),

    #[error("quantity out of range: {0} (must be between 1 and 999)")]
    Quantity(i64),

    #[error("rating out of range: {0} (must be between 1 and 5)")]
    Rating(u8),
}

/// Checks that `input` is a plausible email address.
pub fn email(input: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(input) {
        Ok(())
    } else {
        Err(ValidationError::Email(input.to_string()))
    }
}

/// Checks that `input` is 10-15 digits with an optional leading `+`.
///
/// Spaces are ignored, so `+1 555 123 4567` passes.
pub fn phone(input: &str) -> Result<(), ValidationError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if PHONE_RE.is_match(&compact) {
        Ok(())
    } else {
        Err(ValidationError::Phone(input.to_string()))
    }
}

/// Parses a non-negative price string with at most two decimal places.
pub fn parse_price(input: &str) -> Result<Money, ValidationError> {
    let err = || ValidationError::Price(input.to_string());
    let s = input.trim();

    let (dollars, cents) = match s.split_once('.') {
        Some((d, c)) => (d, c),
        None => (s, ""),
    };

    if dollars.is_empty() && cents.is_empty() {
        return Err(err());
    }
    if cents.len() > 2
        || !dollars.chars().all(|c| c.is_ascii_digit())
        || !cents.chars().all(|c| c.is_ascii_digit())
    {
        return Err(err());
    }

    let dollars: i64 = if dollars.is_empty() {
        0
    } else {
        dollars.parse().map_err(|_| err())?
    };
    // "5" after the point means 50 cents, so right-pad to two digits.
    let cents: i64 = if cents.is_empty() {
        0
    } else {
        format!("{cents:0<2}").parse().map_err(|_| err())?
    };

    Ok(Money::from_cents(dollars * 100 + cents))
}

/// Checks that `n` is a valid cart quantity, in `[1, 999]`.
pub fn quantity(n: i64) -> Result<u32, ValidationError> {
    if (1..=999).contains(&n) {
        Ok(n as u32)
    } else {
        Err(ValidationError::Quantity(n))
    }
}

/// Checks that `n` is a valid review rating, in `[1, 5]`.
pub fn rating(n: u8) -> Result<(), ValidationError> {
    if (1..=5).contains(&n) {
        Ok(())
    } else {
        Err(ValidationError::Rating(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_email() {
        assert!(email("jane.doe@example.com").is_ok());
        assert!(email("a+b@sub.domain.co").is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["", "no-at-sign", "a@b", "a@b.", "@example.com", "a b@c.com"] {
            assert!(email(bad).is_err(), "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn accepts_phone_with_spaces_and_plus() {
        assert!(phone("+1 555 123 4567").is_ok());
        assert!(phone("5551234567").is_ok());
    }

    #[test]
    fn rejects_short_long_or_lettered_phone() {
        assert!(phone("12345").is_err());
        assert!(phone("1234567890123456").is_err());
        assert!(phone("555-123-4567").is_err());
    }

    #[test]
    fn parses_whole_and_fractional_prices() {
        assert_eq!(parse_price("12").unwrap().cents(), 1200);
        assert_eq!(parse_price("12.34").unwrap().cents(), 1234);
        assert_eq!(parse_price("12.5").unwrap().cents(), 1250);
        assert_eq!(parse_price("0.05").unwrap().cents(), 5);
        assert_eq!(parse_price(".99").unwrap().cents(), 99);
        assert_eq!(parse_price("0").unwrap().cents(), 0);
    }

    #[test]
    fn rejects_negative_and_malformed_prices() {
        for bad in ["", "-1", "1.234", "12,34", "abc", "1.2.3"] {
            assert!(parse_price(bad).is_err(), "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn quantity_bounds() {
        assert_eq!(quantity(1).unwrap(), 1);
        assert_eq!(quantity(999).unwrap(), 999);
        assert!(quantity(0).is_err());
        assert!(quantity(-3).is_err());
        assert!(quantity(1000).is_err());
    }

    #[test]
    fn rating_bounds() {
        assert!(rating(1).is_ok());
        assert!(rating(5).is_ok());
        assert!(rating(0).is_err());
        assert!(rating(6).is_err());
    }
}
