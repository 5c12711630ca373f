// ── Generic state container ──
//
// Every domain container keeps its state in a `Slice`: the data, the two
// in-flight flags, the last error and the fetch timestamp, published via
// a `watch` channel so views can subscribe.
//
// Fetches carry a request token. Only the response for the most recently
// issued token is applied; earlier ones are dropped on arrival, so two
// overlapping refreshes can never leave the older result on screen.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;

use crate::error::{CoreError, ErrorKind};
use crate::model::EntityId;
use crate::stream::SliceStream;

/// An error as a container records it: its class plus the display message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SliceError {
    pub fn is_auth_expired(&self) -> bool {
        self.kind == ErrorKind::AuthExpired
    }
}

impl From<&CoreError> for SliceError {
    fn from(err: &CoreError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Published state of one container.
#[derive(Debug)]
pub struct SliceState<V> {
    pub data: Arc<V>,
    /// A fetch is outstanding.
    pub loading: bool,
    /// At least one mutation is outstanding.
    pub updating: bool,
    pub error: Option<SliceError>,
    pub last_fetch: Option<DateTime<Utc>>,
    /// Ids patched locally since the last successful fetch.
    pub provisional: BTreeSet<EntityId>,
}

impl<V> Clone for SliceState<V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            loading: self.loading,
            updating: self.updating,
            error: self.error.clone(),
            last_fetch: self.last_fetch,
            provisional: self.provisional.clone(),
        }
    }
}

impl<V> SliceState<V> {
    pub fn is_provisional(&self, id: &EntityId) -> bool {
        self.provisional.contains(id)
    }
}

pub struct Slice<V> {
    state: watch::Sender<SliceState<V>>,
    fetch_seq: AtomicU64,
    updates_in_flight: AtomicUsize,
}

impl<V: Default> Default for Slice<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V> Slice<V> {
    pub fn new(initial: V) -> Self {
        let (state, _) = watch::channel(SliceState {
            data: Arc::new(initial),
            loading: false,
            updating: false,
            error: None,
            last_fetch: None,
            provisional: BTreeSet::new(),
        });
        Self {
            state,
            fetch_seq: AtomicU64::new(0),
            updates_in_flight: AtomicUsize::new(0),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> SliceState<V> {
        self.state.borrow().clone()
    }

    pub fn data(&self) -> Arc<V> {
        Arc::clone(&self.state.borrow().data)
    }

    pub fn error(&self) -> Option<SliceError> {
        self.state.borrow().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn subscribe(&self) -> SliceStream<V>
    where
        V: Send + Sync + 'static,
    {
        SliceStream::new(self.state.subscribe())
    }

    // ── Error surface ────────────────────────────────────────────────

    /// Dismiss the current error.
    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    /// Record an error that did not come from a fetch or update ticket,
    /// e.g. input refused before any request.
    pub fn record_error(&self, err: &CoreError) {
        let error = SliceError::from(err);
        self.state.send_modify(|s| s.error = Some(error));
    }

    /// Drop all data and flags back to `initial`.
    pub fn reset(&self, initial: V) {
        self.fetch_seq.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|s| {
            s.data = Arc::new(initial);
            s.loading = false;
            s.error = None;
            s.last_fetch = None;
            s.provisional.clear();
        });
    }

    // ── Fetch ────────────────────────────────────────────────────────

    /// Issue a new request token and mark the slice as loading.
    pub fn begin_fetch(&self) -> FetchTicket<'_, V> {
        let token = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| s.loading = true);
        FetchTicket {
            slice: self,
            token,
            settled: false,
        }
    }

    /// Run `request` under a fresh fetch ticket. On success the data is
    /// replaced (when still current); on failure prior data is kept and the
    /// error recorded. Returns the data as published after the call.
    pub async fn fetch_with<Fut>(&self, request: Fut) -> Result<Arc<V>, CoreError>
    where
        Fut: Future<Output = Result<V, CoreError>>,
    {
        let ticket = self.begin_fetch();
        match request.await {
            Ok(data) => {
                ticket.succeed(data);
                Ok(self.data())
            }
            Err(err) => {
                ticket.fail(&err);
                Err(err)
            }
        }
    }

    fn is_latest(&self, token: u64) -> bool {
        self.fetch_seq.load(Ordering::SeqCst) == token
    }

    // ── Update ───────────────────────────────────────────────────────

    pub fn begin_update(&self) -> UpdateTicket<'_, V> {
        self.updates_in_flight.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|s| s.updating = true);
        UpdateTicket { slice: self }
    }

    /// Run a mutation under an update ticket. `apply` merges the response
    /// into the data and may mark ids provisional; the data is left alone
    /// when the request fails.
    pub async fn update_with<T, Fut, F>(&self, request: Fut, apply: F) -> Result<T, CoreError>
    where
        V: Clone,
        Fut: Future<Output = Result<T, CoreError>>,
        F: FnOnce(&mut V, &mut BTreeSet<EntityId>, &T),
    {
        let ticket = self.begin_update();
        match request.await {
            Ok(value) => {
                ticket.succeed(|data, provisional| apply(data, provisional, &value));
                Ok(value)
            }
            Err(err) => {
                ticket.fail(&err);
                Err(err)
            }
        }
    }
}

/// Proof of an outstanding fetch. Dropping it unsettled (the request
/// future was cancelled) still clears `loading` if it was the latest.
pub struct FetchTicket<'a, V> {
    slice: &'a Slice<V>,
    token: u64,
    settled: bool,
}

impl<V> FetchTicket<'_, V> {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn is_latest(&self) -> bool {
        self.slice.is_latest(self.token)
    }

    /// Apply fetched data. Returns `false` when a newer fetch superseded
    /// this one and the data was discarded.
    pub fn succeed(mut self, data: V) -> bool {
        self.settled = true;
        if !self.is_latest() {
            warn!(token = self.token, "discarding superseded fetch response");
            return false;
        }
        let now = Utc::now();
        self.slice.state.send_modify(|s| {
            s.data = Arc::new(data);
            s.loading = false;
            s.error = None;
            s.last_fetch = Some(now);
            s.provisional.clear();
        });
        true
    }

    /// Record a failed fetch. Prior data stays in place.
    pub fn fail(mut self, err: &CoreError) -> bool {
        self.settled = true;
        if !self.is_latest() {
            warn!(token = self.token, error = %err, "discarding superseded fetch failure");
            return false;
        }
        let error = SliceError::from(err);
        self.slice.state.send_modify(|s| {
            s.loading = false;
            s.error = Some(error);
        });
        true
    }
}

impl<V> Drop for FetchTicket<'_, V> {
    fn drop(&mut self) {
        if !self.settled && self.is_latest() {
            self.slice.state.send_modify(|s| s.loading = false);
        }
    }
}

/// Proof of an outstanding mutation. `updating` stays set while any
/// ticket is alive.
pub struct UpdateTicket<'a, V> {
    slice: &'a Slice<V>,
}

impl<V> UpdateTicket<'_, V> {
    /// Merge the result into the data.
    pub fn succeed(self, apply: impl FnOnce(&mut V, &mut BTreeSet<EntityId>))
    where
        V: Clone,
    {
        self.slice.state.send_modify(|s| {
            let mut provisional = std::mem::take(&mut s.provisional);
            apply(Arc::make_mut(&mut s.data), &mut provisional);
            s.provisional = provisional;
            s.error = None;
        });
    }

    /// Record a failed mutation; the data is untouched.
    pub fn fail(self, err: &CoreError) {
        let error = SliceError::from(err);
        self.slice.state.send_modify(|s| s.error = Some(error));
    }
}

impl<V> Drop for UpdateTicket<'_, V> {
    fn drop(&mut self) {
        let remaining = self.slice.updates_in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        if remaining == 0 {
            self.slice.state.send_modify(|s| s.updating = false);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rejected(message: &str) -> CoreError {
        CoreError::Rejected {
            message: message.into(),
        }
    }

    #[test]
    fn loading_follows_the_ticket() {
        let slice: Slice<Vec<u32>> = Slice::default();
        let ticket = slice.begin_fetch();
        assert!(slice.is_loading());
        assert!(ticket.succeed(vec![1, 2]));
        let state = slice.snapshot();
        assert!(!state.loading);
        assert_eq!(*state.data, vec![1, 2]);
        assert!(state.last_fetch.is_some());
    }

    #[test]
    fn superseded_response_is_dropped() {
        let slice: Slice<Vec<u32>> = Slice::default();
        let first = slice.begin_fetch();
        let second = slice.begin_fetch();

        assert!(second.succeed(vec![2]));
        assert!(!first.succeed(vec![1]));
        assert_eq!(*slice.data(), vec![2]);
        assert!(!slice.is_loading());
    }

    #[test]
    fn stale_completion_does_not_clear_loading_of_newer_request() {
        let slice: Slice<Vec<u32>> = Slice::default();
        let first = slice.begin_fetch();
        let second = slice.begin_fetch();

        assert!(!first.fail(&rejected("old")));
        assert!(slice.is_loading());
        assert!(slice.error().is_none());

        drop(second);
        assert!(!slice.is_loading());
    }

    #[test]
    fn failure_keeps_prior_entities() {
        let slice: Slice<Vec<u32>> = Slice::default();
        slice.begin_fetch().succeed(vec![7]);
        slice.begin_fetch().fail(&rejected("boom"));

        let state = slice.snapshot();
        assert_eq!(*state.data, vec![7]);
        assert_eq!(state.error.unwrap().kind, ErrorKind::Rejected);
        assert!(!state.loading);
    }

    #[test]
    fn cancelled_fetch_clears_loading() {
        let slice: Slice<Vec<u32>> = Slice::default();
        drop(slice.begin_fetch());
        assert!(!slice.is_loading());
    }

    #[test]
    fn refetch_clears_provisional_marks() {
        let slice: Slice<Vec<u32>> = Slice::default();
        slice.begin_update().succeed(|data, provisional| {
            data.push(1);
            provisional.insert(EntityId::new("1"));
        });
        assert!(slice.snapshot().is_provisional(&EntityId::new("1")));

        slice.begin_fetch().succeed(vec![1]);
        assert!(slice.snapshot().provisional.is_empty());
    }

    #[test]
    fn updating_stays_set_until_last_ticket_drops() {
        let slice: Slice<Vec<u32>> = Slice::default();
        let a = slice.begin_update();
        let b = slice.begin_update();
        a.fail(&rejected("nope"));
        assert!(slice.snapshot().updating);
        drop(b);
        let state = slice.snapshot();
        assert!(!state.updating);
        assert_eq!(state.error.unwrap().message, "Rejected by the backend: nope");
    }

    #[test]
    fn clear_error_dismisses() {
        let slice: Slice<Vec<u32>> = Slice::default();
        slice.record_error(&CoreError::validation("recipient", "required"));
        assert!(slice.error().is_some());
        slice.clear_error();
        assert!(slice.error().is_none());
    }

    #[tokio::test]
    async fn fetch_with_applies_and_reports() {
        let slice: Slice<Vec<u32>> = Slice::default();
        let data = slice.fetch_with(async { Ok(vec![3, 4]) }).await.unwrap();
        assert_eq!(*data, vec![3, 4]);

        let err = slice
            .fetch_with(async { Err(rejected("down")) })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(*slice.data(), vec![3, 4]);
    }
}
