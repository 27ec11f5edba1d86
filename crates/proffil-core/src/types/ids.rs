//! Identifier types for profile records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a profile record.
///
/// Opaque to the watcher: the only operation the fetch machinery performs on
/// it is equality, to decide whether a newly supplied identifier replaces the
/// one currently being watched. Serializes as a bare number, matching the
/// `id` field of the profile endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(u64);

impl UserId {
    /// Creates a user ID from a raw number.
    ///
    /// # Examples
    ///
    /// ```
    /// use proffil_core::UserId;
    ///
    /// let id = UserId::new(3);
    /// assert_eq!(id.as_u64(), 3);
    /// ```
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId::new(5).to_string(), "5");
    }

    #[test]
    fn test_user_id_from_str() {
        let id: UserId = "17".parse().unwrap();
        assert_eq!(id, UserId::new(17));
        assert!("seventeen".parse::<UserId>().is_err());
    }

    #[test]
    fn test_user_id_serializes_as_number() {
        let json = serde_json::to_string(&UserId::new(9)).unwrap();
        assert_eq!(json, "9");
        let id: UserId = serde_json::from_str("9").unwrap();
        assert_eq!(id, UserId::new(9));
    }

    #[test]
    fn test_user_id_equality() {
        assert_eq!(UserId::new(1), UserId::from(1));
        assert_ne!(UserId::new(1), UserId::new(2));
    }
}
