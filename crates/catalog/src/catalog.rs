//! Ordered product catalog.

use serde::{Deserialize, Serialize};

use mmbill_core::{DomainError, DomainResult, Money};

use crate::product::{Product, ProductId};

/// The stock list every new bill starts from, in display order (name, whole-unit price).
const DEFAULT_ITEMS: [(&str, u64); 11] = [
    ("On On", 270),
    ("Crazy Egg", 815),
    ("Jimsim10", 263),
    ("Cola10", 263),
    ("OrangeSlice", 420),
    ("TooToo", 270),
    ("Trexo", 423),
    ("Rockeys", 157),
    ("Tiny Egg", 275),
    ("Candle jelly", 310),
    ("Cotton Candy", 207),
];

/// Serialized catalog record, as found in a store profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub price: Money,
}

/// Ordered sequence of products. Order is the display order on screen and on the bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// The fixed default list of 11 items.
    pub fn default_list() -> Self {
        let products = DEFAULT_ITEMS
            .iter()
            .map(|&(name, price)| Product::stock(name, Money::from_major(price)))
            .collect();
        Self { products }
    }

    pub fn from_entries<I>(entries: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let products = entries
            .into_iter()
            .map(|entry| Product::new(entry.name, entry.price))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self { products })
    }

    pub fn to_entries(&self) -> Vec<CatalogEntry> {
        self.products
            .iter()
            .map(|p| CatalogEntry {
                name: p.name().to_string(),
                price: p.unit_price(),
            })
            .collect()
    }

    pub fn push(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Remove the product at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> DomainResult<Product> {
        if index >= self.products.len() {
            return Err(DomainError::not_found(format!(
                "no catalog entry at position {index}"
            )));
        }
        Ok(self.products.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn position_of(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id_typed() == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_list()
    }
}
