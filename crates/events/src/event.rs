use chrono::{DateTime, Utc};

/// A fact recorded after a command was accepted.
///
/// Events are never edited once appended to a journal. `event_type` names are
/// dotted `<module>.<aggregate>.<what happened>` strings such as
/// `billing.bill.quantity_set`.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;

    /// Payload schema version; bump when a variant's fields change shape.
    fn version(&self) -> u32 {
        1
    }

    /// Business time at which the originating command was issued.
    fn occurred_at(&self) -> DateTime<Utc>;
}
