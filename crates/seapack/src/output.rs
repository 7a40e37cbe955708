use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use seapack_registry::Layout;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// A decoded envelope as presented by `unpack`.
#[derive(Serialize)]
pub struct EnvelopeOutput {
    pub type_id: u8,
    pub type_name: String,
    pub message_id: u16,
    pub sent_at: f64,
    pub body_length: usize,
    /// Decoded fields for fixed-layout types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<serde_json::Value>,
    /// Hex body for blob and general payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_hex: Option<String>,
    /// Bound topic for general payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

pub fn print_envelope(out: &EnvelopeOutput, body: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["TYPE", "ID", "MSG", "SENT-AT", "BODY"])
                .add_row(vec![
                    out.type_name.clone(),
                    out.type_id.to_string(),
                    out.message_id.to_string(),
                    out.sent_at.to_string(),
                    summarize_body(out),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "type={} ({}) message_id={} sent_at={} body={}",
                out.type_name,
                out.type_id,
                out.message_id,
                out.sent_at,
                summarize_body(out)
            );
        }
        OutputFormat::Raw => print_raw(body),
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn layout_name(layout: &Layout) -> String {
    match layout {
        Layout::Fixed(len) => format!("fixed({len})"),
        Layout::Variable => "variable".to_string(),
        Layout::Opaque => "opaque".to_string(),
    }
}

fn summarize_body(out: &EnvelopeOutput) -> String {
    if let Some(fields) = &out.fields {
        return fields.to_string();
    }
    if let Some(hex) = &out.body_hex {
        return format!("<{} bytes> {hex}", out.body_length);
    }
    format!("<{} bytes>", out.body_length)
}
