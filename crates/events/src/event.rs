use chrono::{DateTime, Utc};

/// Contract every billing event implements.
///
/// An event is a fact about a document (an invoice was issued, a quotation
/// was rejected). Facts never change after the fact, so implementors expose
/// metadata only; there are no mutators here.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable dotted identifier, `"<module>.<aggregate>.<what-happened>"`
    /// (e.g. `"invoicing.invoice.issued"`). Consumers route and filter on
    /// this string, so it must never be renamed once events are persisted.
    fn event_type(&self) -> &'static str;

    /// Payload schema version, bumped when the event's shape changes.
    fn version(&self) -> u32;

    /// Business time: when the fact occurred, not when it was stored.
    fn occurred_at(&self) -> DateTime<Utc>;
}
