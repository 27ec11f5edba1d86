//! Shared test fixtures: a gated profile source whose fetches block until
//! the test releases them, so resolution order can be scripted.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Notify, watch};

use proffil_core::{Error, Profile, ProfileSource, Result, UserId};

/// Builds a record the way the upstream endpoint would shape it.
pub fn profile(id: u64, name: &str) -> Profile {
    Profile {
        id: UserId::new(id),
        name: name.to_string(),
        email: format!("{}@example.net", name.to_lowercase()),
        username: name.to_string(),
    }
}

/// A source whose fetches park on a per-identifier gate until released.
///
/// Lets a test issue several identifiers, then resolve their fetches in any
/// order it likes. Also counts every `fetch` call and publishes how many
/// fetches have *started* (reached their gate), so tests can sequence
/// identifier changes against fetches actually being in flight.
pub struct GatedSource {
    profiles: HashMap<UserId, Profile>,
    failing: HashSet<UserId>,
    gates: Mutex<HashMap<UserId, Arc<Notify>>>,
    started_tx: watch::Sender<usize>,
    fetches: AtomicUsize,
}

impl GatedSource {
    pub fn new() -> Self {
        let (started_tx, _rx) = watch::channel(0);
        Self {
            profiles: HashMap::new(),
            failing: HashSet::new(),
            gates: Mutex::new(HashMap::new()),
            started_tx,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles.insert(profile.id, profile);
        self
    }

    /// Fetches for this identifier fail with HTTP 500 once released.
    pub fn with_failing(mut self, user: UserId) -> Self {
        self.failing.insert(user);
        self
    }

    /// Lets the fetch for `user` proceed. May be called before the fetch
    /// starts; the permit is held until it arrives.
    pub fn release(&self, user: UserId) {
        self.gate(user).notify_one();
    }

    /// A receiver over how many fetches have started so far.
    pub fn started(&self) -> watch::Receiver<usize> {
        self.started_tx.subscribe()
    }

    /// Total number of `fetch` calls, released or not.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn gate(&self, user: UserId) -> Arc<Notify> {
        let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(gates.entry(user).or_default())
    }
}

#[async_trait]
impl ProfileSource for GatedSource {
    async fn fetch(&self, user: UserId) -> Result<Profile> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate(user);
        self.started_tx.send_modify(|count| *count += 1);

        gate.notified().await;

        if self.failing.contains(&user) {
            return Err(Error::Status { code: 500 });
        }
        self.profiles
            .get(&user)
            .cloned()
            .ok_or(Error::UserNotFound { user })
    }
}
