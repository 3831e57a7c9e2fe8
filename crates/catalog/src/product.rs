use serde::{Deserialize, Serialize};

use mmbill_core::{AggregateId, DomainError, DomainResult, Money};

/// Product identifier.
///
/// Assigned once when the product enters a catalog and never reused, so a
/// quantity stays attached to its product when other lines are removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A sellable item: display name and unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    unit_price: Money,
}

impl Product {
    /// Create a product with a fresh identifier.
    pub fn new(name: impl Into<String>, unit_price: Money) -> DomainResult<Self> {
        Self::with_id(ProductId::generate(), name, unit_price)
    }

    pub fn with_id(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            unit_price,
        })
    }

    /// Built-in catalog items, whose names are known to be valid.
    pub(crate) fn stock(name: &str, unit_price: Money) -> Self {
        Self {
            id: ProductId::generate(),
            name: name.to_string(),
            unit_price,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }
}
