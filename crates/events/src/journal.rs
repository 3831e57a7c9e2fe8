//! Append-only, in-memory event journal.

use mmbill_core::AggregateId;

use crate::envelope::EventEnvelope;
use crate::event::Event;

/// Ordered record of every event applied to one aggregate.
///
/// - No IO, single owner
/// - Sequence numbers start at 1 and never repeat
#[derive(Debug, Clone, PartialEq)]
pub struct EventJournal<E> {
    aggregate_id: AggregateId,
    aggregate_type: &'static str,
    entries: Vec<EventEnvelope<E>>,
}

impl<E: Event> EventJournal<E> {
    pub fn new(aggregate_id: AggregateId, aggregate_type: &'static str) -> Self {
        Self {
            aggregate_id,
            aggregate_type,
            entries: Vec::new(),
        }
    }

    /// Append one event and return its envelope.
    pub fn append(&mut self, event: E) -> &EventEnvelope<E> {
        let sequence_number = self.entries.len() as u64 + 1;
        self.entries.push(EventEnvelope::new(
            self.aggregate_id,
            self.aggregate_type,
            sequence_number,
            event,
        ));
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[EventEnvelope<E>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_sequence(&self) -> u64 {
        self.entries.last().map_or(0, EventEnvelope::sequence_number)
    }
}
