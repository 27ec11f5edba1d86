//! The transport seam: where profile records come from.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::{Profile, UserId};

/// A place profile records can be fetched from.
///
/// The watcher holds one of these behind an `Arc<dyn ProfileSource>` and
/// drives it with at most one outstanding `fetch` at a time. Cancellation is
/// cooperative through future drop: when the watcher abandons a fetch (the
/// identifier changed, or the watcher was torn down), it stops polling the
/// future and drops it. Implementations must not let side effects escape an
/// abandoned future.
///
/// No retry semantics belong here. A failed fetch is final for its epoch; the
/// only recovery path is the caller supplying an identifier again.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the profile record for one identifier.
    async fn fetch(&self, user: UserId) -> Result<Profile>;
}

/// An in-memory source backed by a map.
///
/// For tests and offline demos. Lookups resolve immediately; a missing
/// identifier yields [`Error::UserNotFound`], same as the HTTP source maps a
/// 404.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    profiles: HashMap<UserId, Profile>,
}

impl StaticSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, keyed by its own id.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles.insert(profile.id, profile);
        self
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl ProfileSource for StaticSource {
    async fn fetch(&self, user: UserId) -> Result<Profile> {
        self.profiles
            .get(&user)
            .cloned()
            .ok_or(Error::UserNotFound { user })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile(id: u64, name: &str) -> Profile {
        Profile {
            id: UserId::new(id),
            name: name.to_string(),
            email: format!("{}@example.net", name.to_lowercase()),
            username: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_static_source_hit() {
        let source = StaticSource::new().with_profile(profile(1, "Leanne"));

        let fetched = source.fetch(UserId::new(1)).await.unwrap();
        assert_eq!(fetched.name, "Leanne");
    }

    #[tokio::test]
    async fn test_static_source_miss() {
        let source = StaticSource::new().with_profile(profile(1, "Leanne"));

        let err = source.fetch(UserId::new(2)).await.unwrap_err();
        let Error::UserNotFound { user } = err else {
            unreachable!("Expected UserNotFound");
        };
        assert_eq!(user, UserId::new(2));
    }

    #[test]
    fn test_static_source_len() {
        let source = StaticSource::new()
            .with_profile(profile(1, "Leanne"))
            .with_profile(profile(2, "Ervin"));
        assert_eq!(source.len(), 2);
        assert!(!source.is_empty());
        assert!(StaticSource::new().is_empty());
    }

    #[test]
    fn test_source_is_object_safe() {
        fn assert_object_safe(_: &dyn ProfileSource) {}
        let source = StaticSource::new();
        assert_object_safe(&source);
    }
}
