// ── Reactive state stream ──
//
// Subscription type for consuming published player state.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::state::PlayerState;

/// A subscription to the coordinator's published state.
///
/// Provides point-in-time access and change notification via
/// [`changed`](Self::changed) or by converting into a `Stream`.
pub struct StateStream {
    current: Arc<PlayerState>,
    receiver: watch::Receiver<Arc<PlayerState>>,
}

impl StateStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<PlayerState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot seen at creation or at the last `changed()`.
    pub fn current(&self) -> &Arc<PlayerState> {
        &self.current
    }

    /// The latest published snapshot.
    pub fn latest(&self) -> Arc<PlayerState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next publish, returning the new snapshot.
    /// Returns `None` once the coordinator has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<PlayerState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` that yields the current snapshot first,
    /// then every later publish.
    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct StateWatchStream {
    inner: WatchStream<Arc<PlayerState>>,
}

impl Stream for StateWatchStream {
    type Item = Arc<PlayerState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
