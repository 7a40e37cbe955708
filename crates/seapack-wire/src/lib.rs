//! Fixed-layout binary envelope codec for acoustic modem payloads.
//!
//! This is the wire layer of seapack. Every envelope is a fixed 11-byte
//! header followed by a type-specific body:
//! - A 1-byte payload type id
//! - A 2-byte big-endian message id
//! - An 8-byte big-endian IEEE-754 send timestamp (seconds)
//!
//! All multi-byte fields are big-endian, in the header and in every body.

pub mod body;
pub mod envelope;
pub mod error;
pub mod header;

pub use body::{
    decode_ack, encode_ack, NavFix, PoseTarget, ACK_BODY_LEN, NAV_BODY_LEN, POSE_BODY_LEN,
};
pub use envelope::{assemble, split, DEFAULT_MAX_ENVELOPE};
pub use error::{Result, WireError};
pub use header::{Header, HEADER_LEN};
