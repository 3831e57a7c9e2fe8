//! Bill snapshot: the state captured at export time.

use chrono::NaiveDate;

use mmbill_core::{Money, Percent};

use crate::line::{LineItems, LineView};
use crate::session::BillId;
use crate::totals::Totals;

/// A printable row: only lines with a quantity above zero, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillRow {
    pub serial: usize,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

/// Everything the exported document is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillSnapshot {
    bill_id: BillId,
    customer_name: String,
    date: NaiveDate,
    items: LineItems,
    totals: Totals,
}

impl BillSnapshot {
    pub fn new(
        bill_id: BillId,
        customer_name: String,
        date: NaiveDate,
        items: LineItems,
        totals: Totals,
    ) -> Self {
        Self {
            bill_id,
            customer_name,
            date,
            items,
            totals,
        }
    }

    pub fn bill_id(&self) -> BillId {
        self.bill_id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Date as printed on the bill (`dd/mm/yyyy`).
    pub fn formatted_date(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    pub fn lines(&self) -> impl Iterator<Item = LineView<'_>> {
        self.items.iter()
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn discount(&self) -> Percent {
        self.totals.discount
    }

    pub fn rows(&self) -> Vec<BillRow> {
        self.items
            .iter()
            .filter(|line| line.quantity > 0)
            .enumerate()
            .map(|(i, line)| BillRow {
                serial: i + 1,
                name: line.product.name().to_string(),
                unit_price: line.product.unit_price(),
                quantity: line.quantity,
                line_total: line.line_total,
            })
            .collect()
    }
}
