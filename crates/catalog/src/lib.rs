//! Catalog domain module.
//!
//! This crate contains the sellable items a bill is built from, implemented purely
//! as deterministic domain logic (no IO, no drawing, no storage).

pub mod catalog;
pub mod product;

pub use catalog::{Catalog, CatalogEntry};
pub use product::{Product, ProductId};
