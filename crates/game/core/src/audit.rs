//! Audit trail of gameplay events.
//!
//! The engine reports every placement, action and consequence to an
//! [`AuditSink`]. [`TracingAudit`] forwards to `tracing` on the `audit`
//! target; [`AuditLog`] keeps events in memory for tests and replays.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuditKind {
    Placement,
    Movement,
    Loot,
    Attack,
    DamageReceived,
    Skip,
    Defeat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuditEvent {
    /// Display name of the creature the event is about.
    pub actor: String,
    pub kind: AuditKind,
    pub detail: String,
}

impl AuditEvent {
    pub fn new(actor: impl Into<String>, kind: AuditKind, detail: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            kind,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.actor, self.detail)
    }
}

pub trait AuditSink {
    fn record(&mut self, event: AuditEvent);
}

/// Emits each event as a `tracing::info!` on target `audit`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAudit;

impl AuditSink for TracingAudit {
    fn record(&mut self, event: AuditEvent) {
        tracing::info!(
            target: "audit",
            actor = %event.actor,
            kind = %event.kind,
            "{}",
            event.detail
        );
    }
}

/// In-memory event list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditLog {
    events: Vec<AuditEvent>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    pub fn of_kind(&self, kind: AuditKind) -> impl Iterator<Item = &AuditEvent> {
        self.events.iter().filter(move |event| event.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl AuditSink for AuditLog {
    fn record(&mut self, event: AuditEvent) {
        self.events.push(event);
    }
}

impl<S: AuditSink + ?Sized> AuditSink for &mut S {
    fn record(&mut self, event: AuditEvent) {
        (**self).record(event);
    }
}

impl<S: AuditSink + ?Sized> AuditSink for Box<S> {
    fn record(&mut self, event: AuditEvent) {
        (**self).record(event);
    }
}
