//! Typed identifiers for store entities.
//!
//! Each identifier is its own newtype so a `ProductId` can never slip
//! into a slot expecting an `OrderId`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Defines a prefixed identifier newtype.
///
/// Minted values look like `ord-18c6f09a3b1e4d2-0`: the prefix names the
/// entity kind, the rest is a nanosecond timestamp plus a process-local
/// counter.
macro_rules! store_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Mint a fresh identifier.
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, next_suffix()))
            }

            /// View the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

store_id!(ProductId, "prod");
store_id!(CartId, "cart");
store_id!(OrderId, "ord");

/// A username, the key every per-user record hangs off.
///
/// Unlike the minted ids above, usernames come from the account
/// collaborator; there is nothing to generate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a username.
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    /// View the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(username: String) -> Self {
        Self(username)
    }
}

impl From<&str> for UserId {
    fn from(username: &str) -> Self {
        Self(username.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn next_suffix() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let serial = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}", nanos, serial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_carry_their_prefix() {
        assert!(ProductId::generate().as_str().starts_with("prod-"));
        assert!(CartId::generate().as_str().starts_with("cart-"));
        assert!(OrderId::generate().as_str().starts_with("ord-"));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let first = OrderId::generate();
        let second = OrderId::generate();
        assert_ne!(first, second);
    }

    #[test]
    fn test_wrapping_preserves_the_raw_value() {
        let id = OrderId::new("ord-ffee-0");
        assert_eq!(id.as_str(), "ord-ffee-0");
        assert_eq!(id.to_string(), "ord-ffee-0");
    }

    #[test]
    fn test_username_conversions() {
        let user: UserId = "maya01".into();
        assert_eq!(user, UserId::new("maya01".to_string()));
        assert_eq!(user.as_ref(), "maya01");
    }
}
