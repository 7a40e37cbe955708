use std::fmt;
use std::io;

use seapack_link::LinkError;
use seapack_registry::RegistryError;
use seapack_wire::WireError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn wire_error(context: &str, err: WireError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

pub fn registry_error(context: &str, err: RegistryError) -> CliError {
    let code = match err {
        RegistryError::UnknownName(_) | RegistryError::UnknownTopic(_) => USAGE,
        _ => DATA_INVALID,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn link_error(context: &str, err: LinkError) -> CliError {
    match err {
        LinkError::Wire(err) => wire_error(context, err),
        LinkError::Registry(err) => registry_error(context, err),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}
