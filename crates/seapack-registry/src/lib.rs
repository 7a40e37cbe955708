//! Bidirectional payload type registry for the seapack acoustic link.
//!
//! Maps user-friendly type names to compact wire ids (1-255) and carries
//! each type's body layout descriptor. Builtin types are registered first;
//! configuration may extend the registry with "general" passthrough types
//! bound to external topics. The registry is populated once at startup and
//! read-only afterwards.

pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use config::GeneralBinding;
pub use error::{RegistryError, Result};
pub use registry::TypeRegistry;
pub use types::{
    Layout, PayloadType, ACK, BODY_REQUEST, NAV, POSITION_REQUEST, ROS_MESSAGE, ROS_SERVICE,
    STRING_IMAGE,
};
