use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WireError};

/// Body length of a pose request: 6 x f32.
pub const POSE_BODY_LEN: usize = 24;

/// Body length of a navigation fix: 2 x f64 + 6 x f32.
pub const NAV_BODY_LEN: usize = 40;

/// Body length of an acknowledgment: 1 x u16.
pub const ACK_BODY_LEN: usize = 2;

/// A requested pose on six axes, used by both the world-frame and
/// body-frame motion request types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseTarget {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl PoseTarget {
    /// Serialize the six axes into `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(POSE_BODY_LEN);
        dst.put_f32(self.x);
        dst.put_f32(self.y);
        dst.put_f32(self.z);
        dst.put_f32(self.roll);
        dst.put_f32(self.pitch);
        dst.put_f32(self.yaw);
    }

    /// Deserialize a pose body. The byte count must match the layout exactly.
    pub fn decode(src: &[u8]) -> Result<Self> {
        if src.len() != POSE_BODY_LEN {
            return Err(WireError::BodyLengthMismatch {
                got: src.len(),
                expected: POSE_BODY_LEN,
            });
        }

        Ok(Self {
            x: read_f32(src, 0),
            y: read_f32(src, 4),
            z: read_f32(src, 8),
            roll: read_f32(src, 12),
            pitch: read_f32(src, 16),
            yaw: read_f32(src, 20),
        })
    }
}

/// A navigation fix: global position plus local pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavFix {
    pub latitude: f64,
    pub longitude: f64,
    pub north: f32,
    pub east: f32,
    pub depth: f32,
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl NavFix {
    /// Serialize the fix into `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(NAV_BODY_LEN);
        dst.put_f64(self.latitude);
        dst.put_f64(self.longitude);
        dst.put_f32(self.north);
        dst.put_f32(self.east);
        dst.put_f32(self.depth);
        dst.put_f32(self.roll);
        dst.put_f32(self.pitch);
        dst.put_f32(self.yaw);
    }

    /// Deserialize a nav body. The byte count must match the layout exactly.
    pub fn decode(src: &[u8]) -> Result<Self> {
        if src.len() != NAV_BODY_LEN {
            return Err(WireError::BodyLengthMismatch {
                got: src.len(),
                expected: NAV_BODY_LEN,
            });
        }

        Ok(Self {
            latitude: read_f64(src, 0),
            longitude: read_f64(src, 8),
            north: read_f32(src, 16),
            east: read_f32(src, 20),
            depth: read_f32(src, 24),
            roll: read_f32(src, 28),
            pitch: read_f32(src, 32),
            yaw: read_f32(src, 36),
        })
    }
}

/// Serialize an acknowledgment body carrying the acknowledged message id.
pub fn encode_ack(message_id: u16, dst: &mut BytesMut) {
    dst.reserve(ACK_BODY_LEN);
    dst.put_u16(message_id);
}

/// Deserialize an acknowledgment body.
pub fn decode_ack(src: &[u8]) -> Result<u16> {
    if src.len() != ACK_BODY_LEN {
        return Err(WireError::BodyLengthMismatch {
            got: src.len(),
            expected: ACK_BODY_LEN,
        });
    }

    Ok(u16::from_be_bytes([src[0], src[1]]))
}

fn read_f32(src: &[u8], at: usize) -> f32 {
    f32::from_be_bytes(src[at..at + 4].try_into().unwrap())
}

fn read_f64(src: &[u8], at: usize) -> f64 {
    f64::from_be_bytes(src[at..at + 8].try_into().unwrap())
}
