use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of the link's sequence counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    pub messages_sent: u64,
    pub messages_received: u64,
}

/// Outgoing/incoming sequence counters.
///
/// The outgoing counter assigns message ids: an id is the low 16 bits of
/// the running total and wraps with it. The incoming counter feeds receipt
/// telemetry only and has no wire effect.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    sent: AtomicU64,
    received: AtomicU64,
}

impl Counters {
    /// Claim the next outgoing message id.
    pub fn next_message_id(&self) -> u16 {
        self.sent.fetch_add(1, Ordering::Relaxed) as u16
    }

    /// Record an accepted receipt; returns the new running total.
    pub fn record_receipt(&self) -> u64 {
        self.received.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn snapshot(&self) -> LinkStats {
        LinkStats {
            messages_sent: self.sent.load(Ordering::Relaxed),
            messages_received: self.received.load(Ordering::Relaxed),
        }
    }

    #[cfg(test)]
    pub fn with_sent(sent: u64) -> Self {
        Self {
            sent: AtomicU64::new(sent),
            received: AtomicU64::new(0),
        }
    }
}
