use crate::{BroadcastHandle, MailerError, Result as MailerResult};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use error_location::ErrorLocation;
use log::{debug, info};

/// Process-wide map from list name to the handle of its pending broadcast.
///
/// Cloning shares the underlying map. Every operation holds the lock only for
/// the duration of the map access, so callers never wait on a send or a timer.
pub struct CancellationRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

struct RegistryInner {
    /// Broadcasts still inside their grace period
    pending: HashMap<String, BroadcastHandle>,
    /// Lists whose send loop is running, with the id of the owning handle
    sending: HashMap<String, u64>,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                pending: HashMap::new(),
                sending: HashMap::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the pending handle for `list_name`, creating and storing a new
    /// one if none exists. Concurrent callers for the same list observe the
    /// same handle.
    pub fn handle_for(&self, list_name: &str) -> BroadcastHandle {
        let mut inner = self.lock();
        inner
            .pending
            .entry(list_name.to_string())
            .or_insert_with(|| {
                debug!("Created cancellation handle for list '{list_name}'");
                BroadcastHandle::new()
            })
            .clone()
    }

    /// Signal and remove the pending handle for `list_name`.
    ///
    /// Returns `false` (and does nothing) when the list has no pending
    /// broadcast.
    pub fn cancel(&self, list_name: &str) -> bool {
        let mut inner = self.lock();
        match inner.pending.remove(list_name) {
            Some(handle) => {
                handle.cancel();
                info!("Cancelled pending broadcast for list '{list_name}'");
                true
            }
            None => false,
        }
    }

    pub fn has_pending(&self, list_name: &str) -> bool {
        self.lock().pending.contains_key(list_name)
    }

    pub fn is_sending(&self, list_name: &str) -> bool {
        self.lock().sending.contains_key(list_name)
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    /// Remove the entry for `list_name` only if it is still `handle`.
    ///
    /// A newer handle stored under the same name is left alone. Broadcast
    /// tasks call this when they are dropped, so an aborted task never
    /// leaves its list blocked.
    pub fn release(&self, list_name: &str, handle: &BroadcastHandle) -> bool {
        let mut inner = self.lock();
        if inner.pending.get(list_name) == Some(handle) {
            inner.pending.remove(list_name);
            true
        } else {
            false
        }
    }

    /// Reserve `list_name` for a new broadcast.
    ///
    /// Fails with [`MailerError::BroadcastInProgress`] while another broadcast
    /// for the list is pending or sending.
    #[track_caller]
    pub fn claim(&self, list_name: &str) -> MailerResult<BroadcastHandle> {
        let mut inner = self.lock();
        if inner.pending.contains_key(list_name) || inner.sending.contains_key(list_name) {
            return Err(MailerError::BroadcastInProgress {
                list_name: list_name.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let handle = BroadcastHandle::new();
        inner.pending.insert(list_name.to_string(), handle.clone());
        Ok(handle)
    }

    /// Move `list_name` from pending to sending.
    ///
    /// Succeeds only while `handle` is still the pending handle for the list.
    /// A handle that was cancelled or released in the meantime gets `None`,
    /// and its broadcast must not send. From this point `cancel` no longer
    /// affects the broadcast. The returned guard clears the sending mark when
    /// dropped.
    pub fn begin_sending(&self, list_name: &str, handle: &BroadcastHandle) -> Option<SendingGuard> {
        let mut inner = self.lock();
        if inner.pending.get(list_name) != Some(handle) || handle.is_cancelled() {
            debug!("Handle {} for list '{list_name}' is no longer pending", handle.id());
            return None;
        }

        inner.pending.remove(list_name);
        inner.sending.insert(list_name.to_string(), handle.id());

        Some(SendingGuard {
            inner: Arc::clone(&self.inner),
            list_name: list_name.to_string(),
            handle_id: handle.id(),
        })
    }
}

impl Default for CancellationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CancellationRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Marks a list as sending for as long as it lives
#[must_use = "the list stops being marked as sending when the guard is dropped"]
pub struct SendingGuard {
    inner: Arc<Mutex<RegistryInner>>,
    list_name: String,
    handle_id: u64,
}

impl SendingGuard {
    pub fn list_name(&self) -> &str {
        &self.list_name
    }
}

impl Drop for SendingGuard {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.sending.get(&self.list_name) == Some(&self.handle_id) {
            inner.sending.remove(&self.list_name);
        }
    }
}
