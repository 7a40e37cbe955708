use bytes::Bytes;
use seapack_wire::{NavFix, PoseTarget};

/// Transport collaborator: hands complete envelopes to the modem's
/// pub/sub layer.
///
/// Publication is fire-and-forget; delivery guarantees belong to the
/// transport, not to this layer.
pub trait Transport {
    fn publish(&self, envelope: Bytes, address: u8);
}

/// Consumer collaborator: one sink per decoded payload type.
pub trait Consumer {
    fn nav(&self, fix: NavFix);
    fn position_request(&self, pose: PoseTarget);
    fn body_request(&self, pose: PoseTarget);
    fn blob(&self, payload: Bytes);
    /// An acknowledgment arrived for a message this link sent earlier.
    fn ack_confirmed(&self, message_id: u16);
    /// A general payload arrived; forward it to its bound topic unchanged.
    fn general(&self, topic: &str, payload: Bytes);
}

/// Per-receipt transit telemetry.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Transmitter clock at send time, seconds.
    pub sent_at: f64,
    /// Receiver clock at receipt, seconds.
    pub received_at: f64,
    /// Total envelope length in bytes.
    pub length: usize,
    /// Bytes per second across the link. `None` when the transit time is
    /// not positive (clock skew or identical timestamps) rather than an
    /// infinity or NaN.
    pub throughput: Option<f64>,
    /// Envelopes accepted by this link so far, this one included.
    pub receive_count: u64,
}

/// Observability collaborator for receipt telemetry records.
pub trait Observer {
    fn receipt(&self, receipt: &Receipt);
}

/// Time source for send timestamps and receipt telemetry.
pub trait Clock {
    /// Current time in seconds.
    fn now(&self) -> f64;
}

/// Wall-clock seconds since the Unix epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
        assert!(first > 0.0);
    }
}
