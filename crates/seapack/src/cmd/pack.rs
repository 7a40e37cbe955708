use bytes::BytesMut;
use seapack_link::{Clock, SystemClock};
use seapack_registry::{PayloadType, ACK, BODY_REQUEST, NAV, POSITION_REQUEST};
use seapack_wire::{assemble, encode_ack, Header, NavFix, PoseTarget};
use serde::{Deserialize, Serialize};

use crate::cmd::{build_registry, load_config, PackArgs};
use crate::exit::{io_error, registry_error, wire_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_json, print_raw, OutputFormat};

#[derive(Deserialize)]
struct AckFields {
    message_id: u16,
}

#[derive(Serialize)]
struct PackOutput {
    type_name: String,
    type_id: u8,
    message_id: u16,
    length: usize,
    hex: String,
}

pub fn run(args: PackArgs, format: OutputFormat) -> CliResult<i32> {
    let config = load_config(args.config.as_deref())?;
    let registry = build_registry(&config)?;

    let ty = match (&args.type_name, &args.topic) {
        (Some(name), None) => registry
            .resolve_by_name(name)
            .map_err(|err| registry_error("unknown type", err))?,
        (None, Some(topic)) => registry
            .resolve_by_topic(topic)
            .map_err(|err| registry_error("unknown topic", err))?,
        _ => {
            return Err(CliError::new(
                USAGE,
                "exactly one of --type or --topic is required",
            ))
        }
    };

    let body = encode_body(ty, &args)?;
    let sent_at = args.sent_at.unwrap_or_else(|| SystemClock.now());
    let header = Header::new(ty.id, args.id, sent_at);
    let envelope = assemble(&header, &body, config.max_envelope_len)
        .map_err(|err| wire_error("envelope rejected", err))?;

    if let Some(path) = &args.out {
        std::fs::write(path, &envelope)
            .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?;
        return Ok(SUCCESS);
    }

    match format {
        OutputFormat::Raw => print_raw(&envelope),
        OutputFormat::Json => print_json(&PackOutput {
            type_name: ty.name.clone(),
            type_id: ty.id,
            message_id: args.id,
            length: envelope.len(),
            hex: hex::encode(&envelope),
        }),
        OutputFormat::Table | OutputFormat::Pretty => println!("{}", hex::encode(&envelope)),
    }

    Ok(SUCCESS)
}

fn encode_body(ty: &PayloadType, args: &PackArgs) -> CliResult<BytesMut> {
    let mut body = BytesMut::new();
    match ty.id {
        POSITION_REQUEST | BODY_REQUEST => {
            let pose: PoseTarget = parse_fields(args, &ty.name)?;
            pose.encode(&mut body);
        }
        NAV => {
            let fix: NavFix = parse_fields(args, &ty.name)?;
            fix.encode(&mut body);
        }
        ACK => {
            let fields: AckFields = parse_fields(args, &ty.name)?;
            encode_ack(fields.message_id, &mut body);
        }
        _ => {
            body.extend_from_slice(&raw_payload(args)?);
        }
    }
    Ok(body)
}

fn parse_fields<T: serde::de::DeserializeOwned>(args: &PackArgs, type_name: &str) -> CliResult<T> {
    let Some(json) = &args.json else {
        return Err(CliError::new(
            USAGE,
            format!("--json fields are required for type '{type_name}'"),
        ));
    };
    serde_json::from_str(json).map_err(|err| {
        CliError::new(USAGE, format!("invalid fields for '{type_name}': {err}"))
    })
}

fn raw_payload(args: &PackArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return std::fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "--data or --file payload is required"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack_args(json: Option<&str>, data: Option<&str>) -> PackArgs {
        PackArgs {
            type_name: Some("nav".to_string()),
            topic: None,
            json: json.map(|s| s.to_string()),
            data: data.map(|s| s.to_string()),
            file: None,
            id: 0,
            sent_at: None,
            config: None,
            out: None,
        }
    }

    #[test]
    fn parse_fields_accepts_valid_nav_json() {
        let args = pack_args(
            Some(
                r#"{"latitude": 55.0, "longitude": -3.0, "north": 10.0, "east": 20.0,
                    "depth": 5.0, "roll": 0.01, "pitch": 0.02, "yaw": 1.57}"#,
            ),
            None,
        );
        let fix: NavFix = parse_fields(&args, "nav").unwrap();
        assert_eq!(fix.latitude, 55.0);
        assert_eq!(fix.yaw, 1.57);
    }

    #[test]
    fn parse_fields_rejects_missing_json() {
        let args = pack_args(None, None);
        let err = parse_fields::<NavFix>(&args, "nav").unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn parse_fields_rejects_wrong_shape() {
        let args = pack_args(Some(r#"{"latitude": "not a number"}"#), None);
        let err = parse_fields::<NavFix>(&args, "nav").unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn raw_payload_requires_a_source() {
        let err = raw_payload(&pack_args(None, None)).unwrap_err();
        assert_eq!(err.code, USAGE);

        let payload = raw_payload(&pack_args(None, Some("blob"))).unwrap();
        assert_eq!(payload, b"blob");
    }
}
