//! `mmbill-core`: domain building blocks shared by every crate.
//!
//! This crate contains **pure domain** primitives shared by the catalog, billing and
//! export crates (no IO, no drawing, no logging setup).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::AggregateId;
pub use money::{Money, Percent};
pub use value_object::ValueObject;
