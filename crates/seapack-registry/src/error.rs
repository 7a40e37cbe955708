/// Errors that can occur during registry construction and lookup.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The wire id is already registered under another name.
    #[error("duplicate payload id {id} for '{name}'")]
    DuplicateId { id: u8, name: String },

    /// The name is already registered under another id.
    #[error("duplicate payload name '{0}'")]
    DuplicateName(String),

    /// The topic is already bound to another general type.
    #[error("duplicate topic binding '{0}'")]
    DuplicateTopic(String),

    /// Id 0 is not a valid wire id.
    #[error("payload id 0 is reserved")]
    ReservedId,

    /// No type registered under the given wire id.
    #[error("unknown payload id {0}")]
    UnknownId(u8),

    /// No type registered under the given name.
    #[error("unknown payload type '{0}'")]
    UnknownName(String),

    /// No general type bound to the given topic.
    #[error("no payload type bound to topic '{0}'")]
    UnknownTopic(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
