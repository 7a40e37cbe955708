use seapack_registry::{Layout, ACK, BODY_REQUEST, NAV, POSITION_REQUEST};
use seapack_wire::{decode_ack, split, NavFix, PoseTarget};
use serde_json::json;

use crate::cmd::{build_registry, load_config, UnpackArgs};
use crate::exit::{io_error, registry_error, wire_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE};
use crate::output::{print_envelope, EnvelopeOutput, OutputFormat};

pub fn run(args: UnpackArgs, format: OutputFormat) -> CliResult<i32> {
    let config = load_config(args.config.as_deref())?;
    let registry = build_registry(&config)?;

    let raw = read_envelope(&args)?;
    let (header, body) = split(&raw).map_err(|err| wire_error("malformed envelope", err))?;

    let ty = registry
        .resolve_by_id(header.type_id)
        .map_err(|err| registry_error("unresolvable envelope", err))?;

    let fields = decode_fields(ty.id, body)?;
    let out = EnvelopeOutput {
        type_id: header.type_id,
        type_name: ty.name.clone(),
        message_id: header.message_id,
        sent_at: header.sent_at,
        body_length: body.len(),
        fields,
        body_hex: matches!(ty.layout, Layout::Variable | Layout::Opaque)
            .then(|| hex::encode(body)),
        topic: ty.topic.clone(),
    };

    print_envelope(&out, body, format);
    Ok(SUCCESS)
}

fn read_envelope(args: &UnpackArgs) -> CliResult<Vec<u8>> {
    if let Some(hex_str) = &args.hex {
        return hex::decode(hex_str.trim())
            .map_err(|err| CliError::new(USAGE, format!("invalid hex envelope: {err}")));
    }
    if let Some(path) = &args.file {
        return std::fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "an envelope argument or --file is required"))
}

fn decode_fields(type_id: u8, body: &[u8]) -> CliResult<Option<serde_json::Value>> {
    let fields = match type_id {
        POSITION_REQUEST | BODY_REQUEST => {
            let pose = PoseTarget::decode(body).map_err(|err| wire_error("bad pose body", err))?;
            Some(to_value(&pose)?)
        }
        NAV => {
            let fix = NavFix::decode(body).map_err(|err| wire_error("bad nav body", err))?;
            Some(to_value(&fix)?)
        }
        ACK => {
            let acked = decode_ack(body).map_err(|err| wire_error("bad ack body", err))?;
            Some(json!({ "message_id": acked }))
        }
        _ => None,
    };
    Ok(fields)
}

fn to_value<T: serde::Serialize>(value: &T) -> CliResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|err| CliError::new(INTERNAL, format!("field serialization failed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unpack_args(hex: Option<&str>) -> UnpackArgs {
        UnpackArgs {
            hex: hex.map(|s| s.to_string()),
            file: None,
            config: None,
        }
    }

    #[test]
    fn read_envelope_decodes_hex() {
        let raw = read_envelope(&unpack_args(Some("0a0b0c"))).unwrap();
        assert_eq!(raw, vec![0x0A, 0x0B, 0x0C]);
    }

    #[test]
    fn read_envelope_rejects_bad_hex() {
        let err = read_envelope(&unpack_args(Some("not hex"))).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn read_envelope_requires_a_source() {
        let err = read_envelope(&unpack_args(None)).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn decode_fields_for_ack() {
        let fields = decode_fields(ACK, &[0x00, 0x2A]).unwrap().unwrap();
        assert_eq!(fields["message_id"], 42);
    }

    #[test]
    fn decode_fields_opaque_is_none() {
        assert!(decode_fields(100, b"anything").unwrap().is_none());
    }
}
