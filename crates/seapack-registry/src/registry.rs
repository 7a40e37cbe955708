use std::collections::HashMap;

use seapack_wire::{ACK_BODY_LEN, NAV_BODY_LEN, POSE_BODY_LEN};
use tracing::debug;

use crate::config::GeneralBinding;
use crate::error::{RegistryError, Result};
use crate::types::{
    Layout, PayloadType, ACK, BODY_REQUEST, NAV, POSITION_REQUEST, ROS_MESSAGE, ROS_SERVICE,
    STRING_IMAGE,
};

/// Bidirectional registry of payload types keyed by wire id, name, and
/// (for general types) external topic.
///
/// The name-id mapping is a bijection: `register` rejects any entry that
/// would reuse an id, a name, or a topic already taken.
pub struct TypeRegistry {
    by_id: HashMap<u8, PayloadType>,
    name_to_id: HashMap<String, u8>,
    topic_to_id: HashMap<String, u8>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            by_id: HashMap::new(),
            name_to_id: HashMap::new(),
            topic_to_id: HashMap::new(),
        }
    }

    /// Create a registry populated with the builtin vehicle types.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for ty in [
            PayloadType::fixed("position_request", POSITION_REQUEST, POSE_BODY_LEN),
            PayloadType::fixed("body_request", BODY_REQUEST, POSE_BODY_LEN),
            PayloadType::fixed("nav", NAV, NAV_BODY_LEN),
            PayloadType::variable("string_image", STRING_IMAGE),
            PayloadType::fixed("ack", ACK, ACK_BODY_LEN),
            PayloadType::opaque("ros_message", ROS_MESSAGE),
            PayloadType::opaque("ros_service", ROS_SERVICE),
        ] {
            // Builtin ids and names are distinct literals; insert directly.
            registry.insert(ty);
        }
        registry
    }

    /// Register a payload type.
    ///
    /// Fails if the id, name, or topic binding is already taken. Fatal at
    /// startup; the registry is never mutated after construction.
    pub fn register(&mut self, ty: PayloadType) -> Result<()> {
        if ty.id == 0 {
            return Err(RegistryError::ReservedId);
        }
        if let Some(existing) = self.by_id.get(&ty.id) {
            return Err(RegistryError::DuplicateId {
                id: ty.id,
                name: existing.name.clone(),
            });
        }
        if self.name_to_id.contains_key(&ty.name) {
            return Err(RegistryError::DuplicateName(ty.name));
        }
        if let Some(topic) = &ty.topic {
            if self.topic_to_id.contains_key(topic) {
                return Err(RegistryError::DuplicateTopic(topic.clone()));
            }
        }

        self.insert(ty);
        Ok(())
    }

    /// Register config-supplied general types, one per binding.
    pub fn extend_from_bindings(&mut self, bindings: &[GeneralBinding]) -> Result<()> {
        for binding in bindings {
            self.register(PayloadType::bound(&binding.name, binding.id, &binding.topic))?;
            debug!(
                name = %binding.name,
                id = binding.id,
                topic = %binding.topic,
                "registered general payload binding"
            );
        }
        Ok(())
    }

    /// Resolve a payload type by wire id.
    pub fn resolve_by_id(&self, id: u8) -> Result<&PayloadType> {
        self.by_id.get(&id).ok_or(RegistryError::UnknownId(id))
    }

    /// Resolve a payload type by name.
    pub fn resolve_by_name(&self, name: &str) -> Result<&PayloadType> {
        self.name_to_id
            .get(name)
            .and_then(|id| self.by_id.get(id))
            .ok_or_else(|| RegistryError::UnknownName(name.to_string()))
    }

    /// Resolve a general payload type by its external topic binding.
    pub fn resolve_by_topic(&self, topic: &str) -> Result<&PayloadType> {
        self.topic_to_id
            .get(topic)
            .and_then(|id| self.by_id.get(id))
            .ok_or_else(|| RegistryError::UnknownTopic(topic.to_string()))
    }

    /// All registered types in wire-id order.
    pub fn types(&self) -> Vec<&PayloadType> {
        let mut types: Vec<&PayloadType> = self.by_id.values().collect();
        types.sort_unstable_by_key(|ty| ty.id);
        types
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn insert(&mut self, ty: PayloadType) {
        self.name_to_id.insert(ty.name.clone(), ty.id);
        if let Some(topic) = &ty.topic {
            self.topic_to_id.insert(topic.clone(), ty.id);
        }
        self.by_id.insert(ty.id, ty);
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_and_names() {
        let registry = TypeRegistry::builtin();

        assert_eq!(registry.resolve_by_name("position_request").unwrap().id, 1);
        assert_eq!(registry.resolve_by_name("body_request").unwrap().id, 2);
        assert_eq!(registry.resolve_by_name("nav").unwrap().id, 5);
        assert_eq!(registry.resolve_by_name("string_image").unwrap().id, 10);
        assert_eq!(registry.resolve_by_name("ack").unwrap().id, 32);
        assert_eq!(registry.resolve_by_name("ros_message").unwrap().id, 100);
        assert_eq!(registry.resolve_by_name("ros_service").unwrap().id, 101);
    }

    #[test]
    fn name_id_mapping_is_a_bijection() {
        let registry = TypeRegistry::builtin();

        for ty in registry.types() {
            let by_name = registry.resolve_by_name(&ty.name).unwrap();
            let by_id = registry.resolve_by_id(by_name.id).unwrap();
            assert_eq!(by_id.name, ty.name);
        }
    }

    #[test]
    fn builtin_layouts() {
        let registry = TypeRegistry::builtin();

        assert_eq!(
            registry.resolve_by_id(5).unwrap().layout,
            Layout::Fixed(NAV_BODY_LEN)
        );
        assert_eq!(registry.resolve_by_id(10).unwrap().layout, Layout::Variable);
        assert_eq!(registry.resolve_by_id(100).unwrap().layout, Layout::Opaque);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut registry = TypeRegistry::builtin();
        let err = registry
            .register(PayloadType::fixed("nav2", NAV, NAV_BODY_LEN))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { id: 5, .. }));
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut registry = TypeRegistry::builtin();
        let err = registry
            .register(PayloadType::fixed("nav", 200, NAV_BODY_LEN))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "nav"));
    }

    #[test]
    fn id_zero_rejected() {
        let mut registry = TypeRegistry::new();
        let err = registry
            .register(PayloadType::opaque("zero", 0))
            .unwrap_err();
        assert!(matches!(err, RegistryError::ReservedId));
    }

    #[test]
    fn unknown_lookups() {
        let registry = TypeRegistry::builtin();

        assert!(matches!(
            registry.resolve_by_id(77),
            Err(RegistryError::UnknownId(77))
        ));
        assert!(matches!(
            registry.resolve_by_name("no_such_type"),
            Err(RegistryError::UnknownName(_))
        ));
        assert!(matches!(
            registry.resolve_by_topic("/no/topic"),
            Err(RegistryError::UnknownTopic(_))
        ));
    }

    #[test]
    fn general_bindings_extend_and_resolve_by_topic() {
        let mut registry = TypeRegistry::builtin();
        registry
            .extend_from_bindings(&[
                GeneralBinding {
                    name: "sidescan_ping".to_string(),
                    id: 110,
                    topic: "/sonar/sidescan".to_string(),
                },
                GeneralBinding {
                    name: "leak_alarm".to_string(),
                    id: 111,
                    topic: "/safety/leak".to_string(),
                },
            ])
            .unwrap();

        let ty = registry.resolve_by_topic("/sonar/sidescan").unwrap();
        assert_eq!(ty.id, 110);
        assert_eq!(ty.layout, Layout::Opaque);
        assert_eq!(registry.resolve_by_id(111).unwrap().name, "leak_alarm");
    }

    #[test]
    fn binding_colliding_with_builtin_rejected() {
        let mut registry = TypeRegistry::builtin();
        let err = registry
            .extend_from_bindings(&[GeneralBinding {
                name: "rogue".to_string(),
                id: ACK,
                topic: "/rogue".to_string(),
            }])
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { id: 32, .. }));
    }

    #[test]
    fn duplicate_topic_rejected() {
        let mut registry = TypeRegistry::builtin();
        let err = registry
            .extend_from_bindings(&[
                GeneralBinding {
                    name: "a".to_string(),
                    id: 110,
                    topic: "/shared".to_string(),
                },
                GeneralBinding {
                    name: "b".to_string(),
                    id: 111,
                    topic: "/shared".to_string(),
                },
            ])
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateTopic(topic) if topic == "/shared"));
    }

    #[test]
    fn types_listing_is_id_ordered() {
        let registry = TypeRegistry::builtin();
        let ids: Vec<u8> = registry.types().iter().map(|ty| ty.id).collect();
        assert_eq!(ids, vec![1, 2, 5, 10, 32, 100, 101]);
    }
}
