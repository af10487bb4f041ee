//! Shipping address type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StoreError;

/// A shipping address.
///
/// All four structural parts are required; a missing part makes the
/// address incomplete and checkout rejects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    /// Street address of residence.
    pub street: String,
    /// A well-known location near the residence.
    pub landmark: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
}

impl Address {
    /// Create a new address.
    pub fn new(
        street: impl Into<String>,
        landmark: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            landmark: landmark.into(),
            city: city.into(),
            state: state.into(),
        }
    }

    /// Parse the comma-separated single-line form.
    ///
    /// Expects exactly `street, landmark, city, state` with every part
    /// non-empty; anything else is `InvalidAddress`.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [street, landmark, city, state] => {
                let address = Self::new(*street, *landmark, *city, *state);
                if address.is_complete() {
                    Ok(address)
                } else {
                    Err(StoreError::InvalidAddress(raw.to_string()))
                }
            }
            _ => Err(StoreError::InvalidAddress(raw.to_string())),
        }
    }

    /// Check that every structural part is present.
    pub fn is_complete(&self) -> bool {
        !self.street.trim().is_empty()
            && !self.landmark.trim().is_empty()
            && !self.city.trim().is_empty()
            && !self.state.trim().is_empty()
    }

    /// Format as a single line.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.street, self.landmark, self.city, self.state
        )
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_complete() {
        let addr = Address::new("123 St", "Landmark", "City", "State");
        assert!(addr.is_complete());
        assert_eq!(addr.one_line(), "123 St, Landmark, City, State");
    }

    #[test]
    fn test_address_missing_part_incomplete() {
        let addr = Address::new("123 St", "", "City", "State");
        assert!(!addr.is_complete());
    }

    #[test]
    fn test_parse_round_trips() {
        let addr = Address::parse("12 Hill Rd, Old Clock Tower, Pune, MH").unwrap();
        assert_eq!(addr.city, "Pune");
        assert_eq!(
            Address::parse(&addr.one_line()).unwrap(),
            addr
        );
    }

    #[test]
    fn test_parse_rejects_short_or_empty() {
        assert!(matches!(
            Address::parse("only, three, parts"),
            Err(StoreError::InvalidAddress(_))
        ));
        assert!(matches!(
            Address::parse("a, , c, d"),
            Err(StoreError::InvalidAddress(_))
        ));
        assert!(matches!(
            Address::parse(""),
            Err(StoreError::InvalidAddress(_))
        ));
    }
}
