//! Cancellable fetch-by-identifier.
//!
//! [`ProfileWatcher`] keeps at most one fetch in flight. Supplying a new
//! identifier aborts the previous fetch before the replacement is issued;
//! dropping the watcher aborts whatever is still outstanding. Results are
//! published through a [`watch`] channel, and only a result whose fetch is
//! still the current one may publish — a stale completion, however it races
//! the abort signal, is discarded.

use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{AbortHandle, Abortable, Aborted};
use tokio::sync::watch;

use proffil_core::{Profile, ProfileSource, ProfileState, UserId};

/// Watches one changing identifier and keeps the state channel on the latest
/// non-cancelled fetch outcome.
///
/// Single-owner by design: teardown is `Drop`, and `Drop` must mean "the
/// consumer is gone", so the handle is not `Clone`. Hand out state receivers
/// with [`subscribe`](Self::subscribe) instead.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use proffil_client::{HttpSource, ProfileWatcher};
/// use proffil_core::UserId;
///
/// # async fn demo() -> proffil_core::Result<()> {
/// let source = Arc::new(HttpSource::with_defaults()?);
/// let watcher = ProfileWatcher::new(source);
/// let mut state = watcher.subscribe();
///
/// watcher.watch(UserId::new(1));
/// state.changed().await.ok();
/// println!("{}", *state.borrow());
/// # Ok(())
/// # }
/// ```
pub struct ProfileWatcher {
    shared: Arc<Shared>,
}

struct Shared {
    source: Arc<dyn ProfileSource>,
    state_tx: watch::Sender<ProfileState>,
    flight: Mutex<Flight>,
}

/// Bookkeeping for the identifier currently being watched.
///
/// `epoch` increases on every identifier change, clear, and teardown. A fetch
/// carries the epoch it was issued under and may only publish while that
/// epoch is still current; the check and the publish happen under this lock,
/// the same lock that bumps the epoch.
#[derive(Default)]
struct Flight {
    epoch: u64,
    user: Option<UserId>,
    abort: Option<AbortHandle>,
}

impl ProfileWatcher {
    /// Creates a watcher over the given source. Initial state is
    /// [`ProfileState::Idle`]; nothing is fetched until
    /// [`watch`](Self::watch) is called.
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        let (state_tx, _rx) = watch::channel(ProfileState::Idle);
        Self {
            shared: Arc::new(Shared {
                source,
                state_tx,
                flight: Mutex::new(Flight::default()),
            }),
        }
    }

    /// Subscribe to state changes.
    ///
    /// Receivers stay valid for the life of the watcher; after the watcher is
    /// dropped they keep returning the last published value.
    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.shared.state_tx.subscribe()
    }

    /// The current state.
    pub fn state(&self) -> ProfileState {
        self.shared.state_tx.borrow().clone()
    }

    /// Observe an identifier.
    ///
    /// Supplying the identifier already being watched is a no-op, whatever
    /// its fetch did — resolved, failed, or still pending — so callers may
    /// re-send the current identifier freely without triggering traffic. To
    /// refetch after a failure, watch a different identifier (or
    /// [`clear`](Self::clear)) and come back.
    ///
    /// Any outstanding fetch is aborted before the new one is issued.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn watch(&self, user: UserId) {
        let mut flight = self.shared.flight();
        if flight.user == Some(user) {
            tracing::trace!(%user, "identifier unchanged, fetch not re-issued");
            return;
        }

        if let Some(handle) = flight.abort.take() {
            handle.abort();
        }
        flight.epoch += 1;
        flight.user = Some(user);
        let epoch = flight.epoch;

        let (abort, registration) = AbortHandle::new_pair();
        flight.abort = Some(abort);

        self.shared
            .state_tx
            .send_replace(ProfileState::Loading { user });
        tracing::debug!(%user, epoch, "fetch issued");

        let source = Arc::clone(&self.shared.source);
        let shared = Arc::downgrade(&self.shared);
        tokio::spawn(async move {
            let outcome = Abortable::new(source.fetch(user), registration).await;
            match shared.upgrade() {
                Some(shared) => shared.complete(epoch, user, outcome),
                None => tracing::trace!(%user, epoch, "watcher gone, result discarded"),
            }
        });
    }

    /// Stop watching.
    ///
    /// Aborts any outstanding fetch and publishes [`ProfileState::Idle`].
    /// The consumer-hides-the-view operation: watching the same identifier
    /// again afterwards issues a fresh fetch.
    pub fn clear(&self) {
        let mut flight = self.shared.flight();
        if flight.user.is_none() {
            return;
        }

        if let Some(handle) = flight.abort.take() {
            handle.abort();
        }
        flight.epoch += 1;
        flight.user = None;

        self.shared.state_tx.send_replace(ProfileState::Idle);
        tracing::debug!("watch cleared");
    }
}

impl Drop for ProfileWatcher {
    fn drop(&mut self) {
        // Guaranteed release: the outstanding fetch dies with its owner. The
        // epoch bump closes the window where a completing task upgraded its
        // weak reference just before this drop.
        let mut flight = self.shared.flight();
        flight.epoch += 1;
        if let Some(handle) = flight.abort.take() {
            handle.abort();
        }
    }
}

impl Shared {
    /// A poisoned flight lock only means a fetch task panicked mid-publish;
    /// the bookkeeping itself is still consistent, so keep going.
    fn flight(&self) -> MutexGuard<'_, Flight> {
        match self.flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn complete(
        &self,
        epoch: u64,
        user: UserId,
        outcome: Result<proffil_core::Result<Profile>, Aborted>,
    ) {
        let mut flight = self.flight();
        if flight.epoch != epoch {
            tracing::trace!(%user, epoch, current = flight.epoch, "stale fetch result discarded");
            return;
        }

        let result = match outcome {
            Ok(result) => result,
            Err(Aborted) => {
                tracing::trace!(%user, epoch, "fetch cancelled");
                return;
            }
        };

        match result {
            Ok(profile) => {
                flight.abort = None;
                tracing::debug!(%user, epoch, "fetch resolved");
                self.state_tx.send_replace(ProfileState::Ready { profile });
            }
            Err(err) if err.is_cancelled() => {
                tracing::trace!(%user, epoch, "fetch cancelled by source");
            }
            Err(err) => {
                flight.abort = None;
                tracing::warn!(%user, epoch, error = %err, "fetch failed");
                self.state_tx.send_replace(ProfileState::Failed {
                    user,
                    reason: err.to_string(),
                });
            }
        }
    }
}
