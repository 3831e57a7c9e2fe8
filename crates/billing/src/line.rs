//! Line-item state keyed by product identity.
//!
//! The catalog keeps display order; quantities and line totals live in a map keyed
//! by `ProductId`, so removing a product can never shift a quantity onto its
//! neighbour.

use std::collections::HashMap;

use mmbill_catalog::{Catalog, Product, ProductId};
use mmbill_core::{DomainResult, Money};

/// Quantity entered for one product and the derived line total.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LineState {
    pub quantity: u32,
    pub line_total: Money,
}

impl LineState {
    /// `line_total = quantity * unit_price`.
    pub fn priced(unit_price: Money, quantity: u32) -> DomainResult<Self> {
        Ok(Self {
            quantity,
            line_total: unit_price.times(quantity)?,
        })
    }
}

/// One row of the bill as seen by readers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LineView<'a> {
    pub product: &'a Product,
    pub quantity: u32,
    pub line_total: Money,
}

/// Catalog plus the line state for every product in it.
///
/// Invariant: every catalog product has exactly one `LineState` entry and there are
/// no entries for products outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItems {
    catalog: Catalog,
    state: HashMap<ProductId, LineState>,
}

impl LineItems {
    /// All products at quantity zero.
    pub fn from_catalog(catalog: Catalog) -> Self {
        let state = catalog
            .products()
            .iter()
            .map(|p| (p.id_typed(), LineState::default()))
            .collect();
        Self { catalog, state }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LineView<'_>> {
        self.catalog.products().iter().map(|product| {
            let state = self.state_of(product.id_typed());
            LineView {
                product,
                quantity: state.quantity,
                line_total: state.line_total,
            }
        })
    }

    pub fn get(&self, id: ProductId) -> Option<LineView<'_>> {
        let position = self.catalog.position_of(id)?;
        self.iter().nth(position)
    }

    /// Identifier of the product displayed at `index` (0-based).
    pub fn id_at(&self, index: usize) -> Option<ProductId> {
        self.catalog.get(index).map(Product::id_typed)
    }

    pub fn quantities(&self) -> Vec<u32> {
        self.iter().map(|line| line.quantity).collect()
    }

    pub fn line_totals(&self) -> Vec<Money> {
        self.iter().map(|line| line.line_total).collect()
    }

    /// Line totals as they would be if `id` were set to `replacement`.
    pub(crate) fn line_totals_with(&self, id: ProductId, replacement: Money) -> Vec<Money> {
        self.iter()
            .map(|line| {
                if line.product.id_typed() == id {
                    replacement
                } else {
                    line.line_total
                }
            })
            .collect()
    }

    pub(crate) fn set(&mut self, id: ProductId, state: LineState) {
        if self.catalog.position_of(id).is_some() {
            self.state.insert(id, state);
        }
    }

    pub(crate) fn push(&mut self, product: Product, state: LineState) {
        self.state.insert(product.id_typed(), state);
        self.catalog.push(product);
    }

    /// Remove a product and its line state together. Returns the old position.
    pub(crate) fn remove(&mut self, id: ProductId) -> Option<usize> {
        let position = self.catalog.position_of(id)?;
        self.catalog.remove(position).ok()?;
        self.state.remove(&id);
        Some(position)
    }

    fn state_of(&self, id: ProductId) -> LineState {
        self.state.get(&id).copied().unwrap_or_default()
    }
}
