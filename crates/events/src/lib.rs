//! `billkit-events` — domain event plumbing.
//!
//! Events are facts emitted by document aggregates (invoices, quotations,
//! purchases). This crate provides the event contract, the envelope that
//! carries an event through a feed, a lightweight pub/sub bus, and the
//! projection machinery that turns event feeds into read models.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;
pub mod projection;
pub mod runner;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use projection::Projection;
pub use runner::{ProjectionError, ProjectionRunner};
