use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out increasing tickets so that only the response of the latest
/// request of a kind is applied.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request, making every earlier ticket stale
    pub fn issue(&self) -> Ticket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            id,
            latest: self.latest.clone(),
        }
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        assert!(first.is_current());

        let second = sequencer.issue();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_clones_share_the_sequence() {
        let sequencer = RequestSequencer::new();
        let other = sequencer.clone();
        let ticket = sequencer.issue();
        let _newer = other.issue();
        assert!(!ticket.is_current());
    }

    #[test]
    fn test_independent_sequencers() {
        let columns = RequestSequencer::new();
        let results = RequestSequencer::new();
        let column_ticket = columns.issue();
        let _ = results.issue();
        assert!(column_ticket.is_current());
    }
}
