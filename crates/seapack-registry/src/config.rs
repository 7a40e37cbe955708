use serde::{Deserialize, Serialize};

/// A configuration-supplied general message binding.
///
/// The payload body of a general type is passed through opaquely between
/// the acoustic link and the named external topic; this layer never
/// decodes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralBinding {
    /// User-friendly type name, unique across the registry.
    pub name: String,
    /// Compact wire id (1-255), unique across the registry.
    pub id: u8,
    /// External topic the payload is bound to.
    pub topic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_config_json() {
        let binding: GeneralBinding = serde_json::from_str(
            r#"{"name": "sidescan_ping", "id": 110, "topic": "/sonar/sidescan"}"#,
        )
        .unwrap();

        assert_eq!(binding.name, "sidescan_ping");
        assert_eq!(binding.id, 110);
        assert_eq!(binding.topic, "/sonar/sidescan");
    }

    #[test]
    fn rejects_out_of_range_id() {
        let result: Result<GeneralBinding, _> =
            serde_json::from_str(r#"{"name": "x", "id": 300, "topic": "/x"}"#);
        assert!(result.is_err());
    }
}
