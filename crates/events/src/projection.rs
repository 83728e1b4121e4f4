use crate::{Event, EventEnvelope};

/// A projection builds a read model from an append-only event feed.
///
/// Projections transform events (write model) into queryable state (read
/// model): the dashboard statistics and revenue report are projections over
/// invoice/quotation events.
///
/// Read models are **disposable**: they can be deleted and rebuilt from
/// events at any time. Events are the source of truth; read models are
/// optimized views.
pub trait Projection {
    type Ev: Event;

    /// Apply a single event to the projection, updating the read model.
    ///
    /// Must be **idempotent**: applying the same event twice should produce
    /// the same result (or be a no-op if already processed). Events can be
    /// delivered more than once; `ProjectionRunner` helps by tracking
    /// sequence numbers, but projections should still be designed to tolerate
    /// replays at the domain level.
    fn apply(&mut self, envelope: &EventEnvelope<Self::Ev>);
}
