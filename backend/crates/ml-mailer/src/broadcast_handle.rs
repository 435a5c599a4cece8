use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// Cancellation handle for one pending broadcast.
///
/// Clones share the same signal. The signal can only be raised through the
/// registry, which removes the handle in the same critical section.
#[derive(Debug, Clone)]
pub struct BroadcastHandle {
    id: u64,
    token: CancellationToken,
}

impl BroadcastHandle {
    pub(crate) fn new() -> Self {
        Self {
            id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
            token: CancellationToken::new(),
        }
    }

    /// Process-unique identity of this handle
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the handle has been cancelled (immediately if it already was)
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Token view for APIs that accept a `CancellationToken`
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }
}

impl PartialEq for BroadcastHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BroadcastHandle {}
