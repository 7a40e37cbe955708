/// Errors surfaced by the send and receive pipelines.
///
/// Every variant is per-envelope and non-fatal: the pipelines report the
/// failure and remain ready for the next envelope.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Wire-level encode/decode failure.
    #[error("wire error: {0}")]
    Wire(#[from] seapack_wire::WireError),

    /// Registry lookup failure.
    #[error("registry error: {0}")]
    Registry(#[from] seapack_registry::RegistryError),

    /// A general-class envelope arrived with no configured topic binding.
    #[error("no topic binding for general payload type '{0}'")]
    Unroutable(String),
}

pub type Result<T> = std::result::Result<T, LinkError>;
