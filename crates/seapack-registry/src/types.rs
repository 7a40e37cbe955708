//! Builtin payload type ids.
//!
//! Ids 1-99 cover the fixed-layout vehicle messages; 100-101 are the
//! general passthrough classes. Configuration-supplied general types may
//! claim any id not taken by a builtin.

/// World-frame pose request.
pub const POSITION_REQUEST: u8 = 1;

/// Body-frame pose request.
pub const BODY_REQUEST: u8 = 2;

/// Navigation fix broadcast.
pub const NAV: u8 = 5;

/// Raw byte blob (compressed imagery, free-form strings).
pub const STRING_IMAGE: u8 = 10;

/// Acknowledgment of a received message id.
pub const ACK: u8 = 32;

/// General passthrough message class.
pub const ROS_MESSAGE: u8 = 100;

/// General passthrough service class.
pub const ROS_SERVICE: u8 = 101;

/// How a payload type's body is laid out on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Exact body length in bytes.
    Fixed(usize),
    /// Raw blob, bounded only by the maximum envelope length.
    Variable,
    /// Opaque passthrough; this layer never decodes the body.
    Opaque,
}

/// A registered payload type: a user-friendly name bound to a compact
/// wire id, plus the body layout descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadType {
    pub name: String,
    pub id: u8,
    pub layout: Layout,
    /// External topic binding, present on config-supplied general types.
    pub topic: Option<String>,
}

impl PayloadType {
    /// A type with an exact body length.
    pub fn fixed(name: &str, id: u8, body_len: usize) -> Self {
        Self {
            name: name.to_string(),
            id,
            layout: Layout::Fixed(body_len),
            topic: None,
        }
    }

    /// A variable-length blob type.
    pub fn variable(name: &str, id: u8) -> Self {
        Self {
            name: name.to_string(),
            id,
            layout: Layout::Variable,
            topic: None,
        }
    }

    /// A general passthrough class with no topic binding yet.
    pub fn opaque(name: &str, id: u8) -> Self {
        Self {
            name: name.to_string(),
            id,
            layout: Layout::Opaque,
            topic: None,
        }
    }

    /// A general passthrough type bound to an external topic.
    pub fn bound(name: &str, id: u8, topic: &str) -> Self {
        Self {
            name: name.to_string(),
            id,
            layout: Layout::Opaque,
            topic: Some(topic.to_string()),
        }
    }
}
