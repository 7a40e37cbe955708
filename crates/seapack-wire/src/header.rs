use bytes::{BufMut, BytesMut};

use crate::error::{Result, WireError};

/// Envelope header: type id (1) + message id (2) + send timestamp (8) = 11 bytes.
pub const HEADER_LEN: usize = 11;

/// The fixed header preceding every envelope body.
///
/// Wire format (big-endian):
/// ```text
/// ┌─────────────┬──────────────┬────────────────────┐
/// │ Type (1B)   │ Msg ID (2B)  │ Sent-at (8B f64)   │
/// │ u8          │ u16 BE       │ IEEE-754 BE        │
/// └─────────────┴──────────────┴────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    /// Compact payload type id (1-255).
    pub type_id: u8,
    /// Per-link message sequence number, wraps at 16 bits.
    pub message_id: u16,
    /// Transmitter clock at send time, seconds.
    pub sent_at: f64,
}

impl Header {
    /// Create a new header.
    pub fn new(type_id: u8, message_id: u16, sent_at: f64) -> Self {
        Self {
            type_id,
            message_id,
            sent_at,
        }
    }

    /// Serialize the header into `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(HEADER_LEN);
        dst.put_u8(self.type_id);
        dst.put_u16(self.message_id);
        dst.put_f64(self.sent_at);
    }

    /// Deserialize a header from the front of `src`.
    pub fn decode(src: &[u8]) -> Result<Self> {
        if src.len() < HEADER_LEN {
            return Err(WireError::HeaderTooShort {
                got: src.len(),
                need: HEADER_LEN,
            });
        }

        let message_id = u16::from_be_bytes(src[1..3].try_into().unwrap());
        let sent_at = f64::from_be_bytes(src[3..11].try_into().unwrap());

        Ok(Self {
            type_id: src[0],
            message_id,
            sent_at,
        })
    }
}
