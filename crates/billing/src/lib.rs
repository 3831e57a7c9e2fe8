//! Billing domain module.
//!
//! A bill session holds the catalog being sold from, the quantity entered for each
//! product, the selected discount and the customer name. Every change goes through
//! a command, is validated without side effects, and is applied as an event, after
//! which the totals are already up to date.

pub mod discount;
pub mod line;
pub mod session;
pub mod snapshot;
pub mod totals;

pub use discount::{DiscountPreset, DiscountSetting};
pub use line::{LineItems, LineState, LineView};
pub use session::{
    AddProduct, BillCommand, BillEvent, BillId, BillReset, BillSession, CustomerNamed,
    DiscountSelected, ProductAdded, ProductRemoved, QuantitySet, RemoveProduct, ResetBill,
    SelectDiscount, SetCustomerName, SetQuantity,
};
pub use snapshot::{BillRow, BillSnapshot};
pub use totals::{final_total, grand_total, Totals};
