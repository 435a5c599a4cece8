/// How a dispatched broadcast ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastOutcome {
    /// Cancelled during the grace period; nothing was sent
    Cancelled,
    /// The send loop ran over the whole snapshot
    Completed {
        attempted: usize,
        succeeded: usize,
        failed: usize,
    },
}

impl BroadcastOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
