// ── Reactive slice streams ──
//
// Subscription types for consuming container changes. A view holds one of
// these and re-renders whenever the container publishes a new state.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::SliceState;

/// A subscription to one container's state.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via `changed()` or by converting to a `Stream`.
pub struct SliceStream<V: Send + Sync + 'static> {
    current: SliceState<V>,
    receiver: watch::Receiver<SliceState<V>>,
}

impl<V: Send + Sync + 'static> SliceStream<V> {
    pub(crate) fn new(receiver: watch::Receiver<SliceState<V>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation (or at the last `changed()`).
    pub fn current(&self) -> &SliceState<V> {
        &self.current
    }

    /// Get the latest snapshot (may have changed since creation).
    pub fn latest(&self) -> SliceState<V> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` if the container has been dropped.
    pub async fn changed(&mut self) -> Option<SliceState<V>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> SliceWatchStream<V> {
        SliceWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields the current state first, then a new snapshot each time the
/// container publishes.
pub struct SliceWatchStream<V: Send + Sync + 'static> {
    inner: WatchStream<SliceState<V>>,
}

impl<V: Send + Sync + 'static> Stream for SliceWatchStream<V> {
    type Item = SliceState<V>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
