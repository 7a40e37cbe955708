//! Envelope pipelines for the seapack acoustic link.
//!
//! This is the dispatch layer: it assembles complete envelopes from typed
//! application messages, reconstructs typed messages from received
//! envelopes, tracks outgoing/incoming sequence counters, and applies the
//! acknowledgment-requirement policy. The pub/sub transport delivering the
//! raw bytes, the per-type consumers, and the telemetry sink are all
//! collaborator traits supplied by the caller.

pub mod config;
pub mod counters;
pub mod error;
pub mod link;
pub mod traits;

pub use config::LinkConfig;
pub use counters::LinkStats;
pub use error::{LinkError, Result};
pub use link::{Link, Outbound};
pub use traits::{Clock, Consumer, Observer, Receipt, SystemClock, Transport};
