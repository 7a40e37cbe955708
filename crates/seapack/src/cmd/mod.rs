use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use seapack_link::LinkConfig;
use seapack_registry::TypeRegistry;

use crate::exit::{io_error, registry_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod pack;
pub mod types;
pub mod unpack;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an envelope from a typed payload.
    Pack(PackArgs),
    /// Decode an envelope into its payload fields.
    Unpack(UnpackArgs),
    /// List registered payload types.
    Types(TypesArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Pack(args) => pack::run(args, format),
        Command::Unpack(args) => unpack::run(args, format),
        Command::Types(args) => types::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct PackArgs {
    /// Payload type name (e.g. nav, position_request).
    #[arg(long = "type", value_name = "NAME", conflicts_with = "topic")]
    pub type_name: Option<String>,
    /// External topic of a configured general type.
    #[arg(long, value_name = "TOPIC")]
    pub topic: Option<String>,
    /// JSON fields for fixed-layout types.
    #[arg(long, conflicts_with_all = ["data", "file"])]
    pub json: Option<String>,
    /// Raw string payload (string_image and general types).
    #[arg(long, conflicts_with_all = ["json", "file"])]
    pub data: Option<String>,
    /// Read the payload from a file.
    #[arg(long, conflicts_with_all = ["json", "data"])]
    pub file: Option<PathBuf>,
    /// Message id stamped into the header.
    #[arg(long, default_value = "0")]
    pub id: u16,
    /// Send timestamp in seconds; defaults to the current wall clock.
    #[arg(long, value_name = "SECS")]
    pub sent_at: Option<f64>,
    /// Link config file (JSON) supplying general bindings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Write the binary envelope to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct UnpackArgs {
    /// Hex-encoded envelope.
    #[arg(conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read the binary envelope from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Link config file (JSON) supplying general bindings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Link config file (JSON) supplying general bindings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn load_config(path: Option<&Path>) -> CliResult<LinkConfig> {
    let Some(path) = path else {
        return Ok(LinkConfig::default());
    };

    let contents = std::fs::read_to_string(path)
        .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
    serde_json::from_str(&contents)
        .map_err(|err| CliError::new(USAGE, format!("invalid config {}: {err}", path.display())))
}

pub fn build_registry(config: &LinkConfig) -> CliResult<TypeRegistry> {
    config
        .build_registry()
        .map_err(|err| registry_error("config bindings rejected", err))
}
