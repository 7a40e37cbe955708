use std::collections::BTreeSet;

use seapack_registry::{GeneralBinding, TypeRegistry};
use seapack_wire::DEFAULT_MAX_ENVELOPE;
use serde::{Deserialize, Serialize};

/// Link configuration.
///
/// `retries` and `retry_delay_secs` are reserved for unacknowledged-send
/// retry logic layered above this crate; the core pipelines do not consume
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Link name, carried in log events.
    pub name: String,
    /// Modem destination address for outgoing envelopes.
    pub target_address: u8,
    /// Payload type names whose receipt triggers an automatic ack.
    pub requiring_ack: BTreeSet<String>,
    /// Reserved: resend attempts when no ack arrives.
    pub retries: u32,
    /// Reserved: seconds between resend attempts.
    pub retry_delay_secs: u64,
    /// Maximum envelope length (header + body) admitted for send.
    pub max_envelope_len: usize,
    /// General types packed from external topics and sent over the link.
    pub general_messages_outgoing: Vec<GeneralBinding>,
    /// General types received over the link and forwarded to external topics.
    pub general_messages_incoming: Vec<GeneralBinding>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            name: "seapack".to_string(),
            target_address: 5,
            requiring_ack: ["position_request", "body_request"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            retries: 3,
            retry_delay_secs: 30,
            max_envelope_len: DEFAULT_MAX_ENVELOPE,
            general_messages_outgoing: Vec::new(),
            general_messages_incoming: Vec::new(),
        }
    }
}

impl LinkConfig {
    /// Build the type registry for this link: builtins plus the config's
    /// general bindings.
    ///
    /// A binding listed in both directions registers once; conflicting
    /// bindings fail registration, which is fatal at startup.
    pub fn build_registry(&self) -> seapack_registry::Result<TypeRegistry> {
        let mut bindings: Vec<GeneralBinding> = Vec::new();
        for binding in self
            .general_messages_outgoing
            .iter()
            .chain(&self.general_messages_incoming)
        {
            if !bindings.contains(binding) {
                bindings.push(binding.clone());
            }
        }

        let mut registry = TypeRegistry::builtin();
        registry.extend_from_bindings(&bindings)?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment_profile() {
        let config = LinkConfig::default();

        assert_eq!(config.target_address, 5);
        assert_eq!(config.retries, 3);
        assert_eq!(config.retry_delay_secs, 30);
        assert_eq!(config.max_envelope_len, 9000);
        assert!(config.requiring_ack.contains("position_request"));
        assert!(config.requiring_ack.contains("body_request"));
        assert_eq!(config.requiring_ack.len(), 2);
    }

    #[test]
    fn deserializes_partial_config() {
        let config: LinkConfig = serde_json::from_str(
            r#"{
                "target_address": 9,
                "requiring_ack": ["nav"],
                "general_messages_incoming": [
                    {"name": "sidescan_ping", "id": 110, "topic": "/sonar/sidescan"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.target_address, 9);
        assert_eq!(config.requiring_ack.len(), 1);
        assert!(config.requiring_ack.contains("nav"));
        assert_eq!(config.max_envelope_len, 9000);
        assert_eq!(config.general_messages_incoming.len(), 1);
    }

    #[test]
    fn registry_includes_general_bindings() {
        let config: LinkConfig = serde_json::from_str(
            r#"{
                "general_messages_outgoing": [
                    {"name": "chem_sample", "id": 120, "topic": "/science/chem"}
                ],
                "general_messages_incoming": [
                    {"name": "abort_mission", "id": 121, "topic": "/mission/abort"}
                ]
            }"#,
        )
        .unwrap();

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.resolve_by_name("chem_sample").unwrap().id, 120);
        assert_eq!(registry.resolve_by_topic("/mission/abort").unwrap().id, 121);
    }

    #[test]
    fn bidirectional_binding_registers_once() {
        let binding = GeneralBinding {
            name: "status_report".to_string(),
            id: 130,
            topic: "/vehicle/status".to_string(),
        };
        let config = LinkConfig {
            general_messages_outgoing: vec![binding.clone()],
            general_messages_incoming: vec![binding],
            ..LinkConfig::default()
        };

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.resolve_by_id(130).unwrap().name, "status_report");
    }

    #[test]
    fn colliding_bindings_fail_registry_build() {
        let config = LinkConfig {
            general_messages_outgoing: vec![GeneralBinding {
                name: "rogue".to_string(),
                id: 5,
                topic: "/rogue".to_string(),
            }],
            ..LinkConfig::default()
        };

        assert!(config.build_registry().is_err());
    }
}
