//! Domain events and the in-memory journal a bill session records them into.

pub mod envelope;
pub mod event;
pub mod journal;

pub use envelope::EventEnvelope;
pub use event::Event;
pub use journal::EventJournal;
