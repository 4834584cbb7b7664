//! Message registry: the catalog of message kinds with their precomputed
//! arbitration IDs and the last payload computed for each.
//!
//! Definitions are built once at startup and never removed. The payload slot
//! is the only mutable part; it is rewritten every cycle and kept for
//! diagnostics only.
use crate::core::{Payload, StaticIdentity};
use crate::error::RegistryError;
use crate::protocol::messages::MessageKind;
use crate::protocol::transport::can_id::ArbitrationId;

//==================================================================================DEFINITION
/// One registered message kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDefinition {
    pub kind: MessageKind,
    /// DGN embedded in the arbitration ID.
    pub protocol_id: u32,
    /// Transmission period in milliseconds, `0` for on-demand kinds.
    pub period_ms: u32,
    /// Identifier computed once through the codec.
    pub arbitration_id: ArbitrationId,
    /// Last payload produced by the encoder; `None` before the first encode
    /// or after a failed one.
    pub payload: Option<Payload>,
}

impl MessageDefinition {
    fn new(kind: MessageKind, identity: &StaticIdentity) -> Result<Self, RegistryError> {
        let arbitration_id = ArbitrationId::encode(
            kind.dgn(),
            identity.message_priority as u32,
            identity.source_address as u32,
        )
        .map_err(|source| RegistryError::ArbitrationId {
            kind: kind.name(),
            source,
        })?;
        Ok(Self {
            kind,
            protocol_id: kind.dgn(),
            period_ms: kind.period_ms(),
            arbitration_id,
            payload: None,
        })
    }
}

//==================================================================================REGISTRY
/// Ordered collection of [`MessageDefinition`]s. Iteration order is the order
/// kinds were registered and is the processing order within a cycle.
#[derive(Debug, Clone)]
pub struct MessageRegistry {
    definitions: Vec<MessageDefinition>,
}

impl MessageRegistry {
    /// Register the full catalog for `identity`.
    pub fn new(identity: &StaticIdentity) -> Result<Self, RegistryError> {
        Self::with_kinds(&MessageKind::ALL, identity)
    }

    /// Register a subset of the catalog, in the given order. Duplicates are ignored.
    pub fn with_kinds(
        kinds: &[MessageKind],
        identity: &StaticIdentity,
    ) -> Result<Self, RegistryError> {
        let mut definitions: Vec<MessageDefinition> = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            if definitions.iter().any(|definition| definition.kind == kind) {
                continue;
            }
            definitions.push(MessageDefinition::new(kind, identity)?);
        }
        Ok(Self { definitions })
    }

    /// All definitions, in registry order.
    pub fn definitions(&self) -> &[MessageDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn contains(&self, kind: MessageKind) -> bool {
        self.definition(kind).is_some()
    }

    /// Definition of `kind`, if registered.
    pub fn definition(&self, kind: MessageKind) -> Option<&MessageDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.kind == kind)
    }

    fn definition_mut(&mut self, kind: MessageKind) -> Result<&mut MessageDefinition, RegistryError> {
        self.definitions
            .iter_mut()
            .find(|definition| definition.kind == kind)
            .ok_or(RegistryError::UnknownMessageKind { kind: kind.name() })
    }

    /// Kinds sharing `period_ms`, in registry order.
    ///
    /// `0` selects the on-demand kinds.
    pub fn get_definitions_by_period(&self, period_ms: u32) -> Vec<MessageKind> {
        self.definitions
            .iter()
            .filter(|definition| definition.period_ms == period_ms)
            .map(|definition| definition.kind)
            .collect()
    }

    /// Distinct non-zero periods, in order of first appearance.
    pub fn periods(&self) -> Vec<u32> {
        let mut periods: Vec<u32> = Vec::new();
        for definition in &self.definitions {
            if definition.period_ms != 0 && !periods.contains(&definition.period_ms) {
                periods.push(definition.period_ms);
            }
        }
        periods
    }

    /// Precomputed arbitration ID of `kind`.
    pub fn get_arbitration_id(&self, kind: MessageKind) -> Result<ArbitrationId, RegistryError> {
        self.definition(kind)
            .map(|definition| definition.arbitration_id)
            .ok_or(RegistryError::UnknownMessageKind { kind: kind.name() })
    }

    /// Store the payload computed for `kind` this cycle.
    pub fn set_payload(&mut self, kind: MessageKind, payload: Payload) -> Result<(), RegistryError> {
        self.definition_mut(kind)?.payload = Some(payload);
        Ok(())
    }

    /// Forget the payload of `kind` so no stale bytes remain after a failed encode.
    pub fn clear_payload(&mut self, kind: MessageKind) -> Result<(), RegistryError> {
        self.definition_mut(kind)?.payload = None;
        Ok(())
    }

    /// Last payload computed for `kind`.
    pub fn payload(&self, kind: MessageKind) -> Option<&Payload> {
        self.definition(kind)
            .and_then(|definition| definition.payload.as_ref())
    }
}
