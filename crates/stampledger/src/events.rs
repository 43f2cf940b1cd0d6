//! Audit events emitted after every successful mutation.
//!
//! Events are a side channel for an external audit collaborator. The
//! ledger never reads them back, and a sink cannot fail a mutation.

use std::sync::Mutex;

/// The operation an [`AuditEvent`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StampCreated,
    StampRevoked,
    DocumentStored,
    EntityCreated,
    EntityMemberAdded,
    EntityMemberRemoved,
    SpecVersionCreated,
}

impl EventKind {
    /// Wire name of the event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::StampCreated => "stamp_created",
            EventKind::StampRevoked => "stamp_revoked",
            EventKind::DocumentStored => "document_stored",
            EventKind::EntityCreated => "entity_created",
            EventKind::EntityMemberAdded => "entity_member_added",
            EventKind::EntityMemberRemoved => "entity_member_removed",
            EventKind::SpecVersionCreated => "spec_version_created",
        }
    }
}

/// An operation name plus its identifying attributes, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub kind: EventKind,
    pub attributes: Vec<(String, String)>,
}

impl AuditEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.push((key.to_string(), value.into()));
        self
    }

    /// First value recorded under `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Consumer of audit events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: AuditEvent);
}

/// Logs every event at `info` level. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: AuditEvent) {
        tracing::info!(
            event = event.kind.as_str(),
            attributes = ?event.attributes,
            "audit event"
        );
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event emitted so far.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn of_kind(&self, kind: EventKind) -> Vec<AuditEvent> {
        self.events().into_iter().filter(|e| e.kind == kind).collect()
    }

    pub fn last(&self) -> Option<AuditEvent> {
        self.events().pop()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: AuditEvent) {
        // A poisoned buffer drops the event; sinks cannot fail a mutation.
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
