use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use mmbill_catalog::{Catalog, Product, ProductId};
use mmbill_core::{Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult, Money};
use mmbill_events::{Event, EventJournal};

use crate::discount::DiscountSetting;
use crate::line::{LineItems, LineState, LineView};
use crate::snapshot::BillSnapshot;
use crate::totals::Totals;

const JOURNAL_TYPE: &str = "billing.bill";

/// Bill session identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(pub AggregateId);

impl BillId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for BillId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: one bill being filled in.
///
/// The seed catalog is what `ResetBill` restores; products added during the session
/// only live until the next reset.
#[derive(Debug, Clone, PartialEq)]
pub struct BillSession {
    id: BillId,
    seed: Catalog,
    items: LineItems,
    discount: DiscountSetting,
    customer_name: String,
    totals: Totals,
    version: u64,
    journal: EventJournal<BillEvent>,
}

impl BillSession {
    pub fn new(seed: Catalog) -> Self {
        Self::with_id(BillId::new(AggregateId::new()), seed)
    }

    pub fn with_id(id: BillId, seed: Catalog) -> Self {
        Self {
            id,
            items: LineItems::from_catalog(seed.clone()),
            seed,
            discount: DiscountSetting::default(),
            customer_name: String::new(),
            totals: Totals::default(),
            version: 0,
            journal: EventJournal::new(id.0, JOURNAL_TYPE),
        }
    }

    /// A session over the built-in 11 item catalog.
    pub fn with_default_catalog() -> Self {
        Self::new(Catalog::default_list())
    }

    pub fn seed_catalog(&self) -> &Catalog {
        &self.seed
    }

    pub fn catalog(&self) -> &Catalog {
        self.items.catalog()
    }

    pub fn items(&self) -> &LineItems {
        &self.items
    }

    pub fn lines(&self) -> impl Iterator<Item = LineView<'_>> {
        self.items.iter()
    }

    pub fn quantities(&self) -> Vec<u32> {
        self.items.quantities()
    }

    pub fn line_totals(&self) -> Vec<Money> {
        self.items.line_totals()
    }

    pub fn discount(&self) -> DiscountSetting {
        self.discount
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Events of the current bill. A reset starts a new journal whose first entry is
    /// the `BillReset` itself.
    pub fn journal(&self) -> &EventJournal<BillEvent> {
        &self.journal
    }

    /// Capture everything the exported document needs.
    pub fn snapshot(&self, date: NaiveDate) -> BillSnapshot {
        BillSnapshot::new(
            self.id,
            self.customer_name.clone(),
            date,
            self.items.clone(),
            self.totals,
        )
    }

    /// Handle a command and apply the resulting events.
    ///
    /// Returns the applied events; an empty vector means the bill did not change.
    pub fn execute(&mut self, command: &BillCommand) -> DomainResult<Vec<BillEvent>> {
        let events = self.handle(command)?;
        if events.is_empty() {
            tracing::debug!(
                bill_id = %self.id,
                command = command.name(),
                "command left the bill unchanged"
            );
        }

        for event in &events {
            self.apply(event);
            let envelope = self.journal.append(event.clone());
            let (event_id, sequence) = (envelope.event_id(), envelope.sequence_number());
            tracing::debug!(
                bill_id = %self.id,
                %event_id,
                event_type = event.event_type(),
                schema_version = event.version(),
                sequence,
                grand_total = %self.totals.grand_total,
                final_total = %self.totals.final_total,
                "bill event applied"
            );
        }

        Ok(events)
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        self.execute(&BillCommand::SetCustomerName(SetCustomerName {
            name: name.into(),
            occurred_at: Utc::now(),
        }))
        .map(drop)
    }

    /// Set the quantity of the line displayed at `index` (0-based).
    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> DomainResult<()> {
        let product_id = self.product_at(index)?;
        self.set_quantity_for(product_id, quantity)
    }

    pub fn set_quantity_for(&mut self, product_id: ProductId, quantity: u32) -> DomainResult<()> {
        self.execute(&BillCommand::SetQuantity(SetQuantity {
            product_id,
            quantity,
            occurred_at: Utc::now(),
        }))
        .map(drop)
    }

    /// Append a product from raw form input.
    ///
    /// Returns `None` (and changes nothing) when any field is missing or unparseable.
    pub fn add_product(
        &mut self,
        name: &str,
        price: &str,
        quantity: &str,
    ) -> DomainResult<Option<ProductId>> {
        let product_id = ProductId::generate();
        let events = self.execute(&BillCommand::AddProduct(AddProduct {
            product_id,
            name: name.to_string(),
            price: price.to_string(),
            quantity: quantity.to_string(),
            occurred_at: Utc::now(),
        }))?;
        Ok((!events.is_empty()).then_some(product_id))
    }

    /// Remove the line displayed at `index` (0-based).
    pub fn remove_product(&mut self, index: usize) -> DomainResult<()> {
        let product_id = self.product_at(index)?;
        self.remove_product_by_id(product_id)
    }

    pub fn remove_product_by_id(&mut self, product_id: ProductId) -> DomainResult<()> {
        self.execute(&BillCommand::RemoveProduct(RemoveProduct {
            product_id,
            occurred_at: Utc::now(),
        }))
        .map(drop)
    }

    pub fn select_discount(&mut self, setting: DiscountSetting) -> DomainResult<()> {
        self.execute(&BillCommand::SelectDiscount(SelectDiscount {
            setting,
            occurred_at: Utc::now(),
        }))
        .map(drop)
    }

    /// Back to the seed catalog with every quantity, the discount and the customer
    /// name cleared.
    pub fn reset(&mut self) -> DomainResult<()> {
        self.execute(&BillCommand::ResetBill(ResetBill {
            occurred_at: Utc::now(),
        }))
        .map(drop)
    }

    fn product_at(&self, index: usize) -> DomainResult<ProductId> {
        self.items.id_at(index).ok_or_else(|| {
            DomainError::not_found(format!(
                "no line at position {index} (bill has {} lines)",
                self.items.len()
            ))
        })
    }
}

impl AggregateRoot for BillSession {
    type Id = BillId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: SetCustomerName.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCustomerName {
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetQuantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetQuantity {
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddProduct.
///
/// Fields are the raw text typed into the "add product" inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProduct {
    pub product_id: ProductId,
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveProduct {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SelectDiscount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectDiscount {
    pub setting: DiscountSetting,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ResetBill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetBill {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillCommand {
    SetCustomerName(SetCustomerName),
    SetQuantity(SetQuantity),
    AddProduct(AddProduct),
    RemoveProduct(RemoveProduct),
    SelectDiscount(SelectDiscount),
    ResetBill(ResetBill),
}

impl BillCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BillCommand::SetCustomerName(_) => "set_customer_name",
            BillCommand::SetQuantity(_) => "set_quantity",
            BillCommand::AddProduct(_) => "add_product",
            BillCommand::RemoveProduct(_) => "remove_product",
            BillCommand::SelectDiscount(_) => "select_discount",
            BillCommand::ResetBill(_) => "reset_bill",
        }
    }
}

/// Event: CustomerNamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerNamed {
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantitySet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantitySet {
    pub product_id: ProductId,
    pub quantity: u32,
    pub line_total: Money,
    pub totals: Totals,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Money,
    pub totals: Totals,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRemoved {
    pub product_id: ProductId,
    pub totals: Totals,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DiscountSelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSelected {
    pub setting: DiscountSetting,
    pub totals: Totals,
    pub occurred_at: DateTime<Utc>,
}

/// Event: BillReset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillReset {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillEvent {
    CustomerNamed(CustomerNamed),
    QuantitySet(QuantitySet),
    ProductAdded(ProductAdded),
    ProductRemoved(ProductRemoved),
    DiscountSelected(DiscountSelected),
    BillReset(BillReset),
}

impl Event for BillEvent {
    fn event_type(&self) -> &'static str {
        match self {
            BillEvent::CustomerNamed(_) => "billing.bill.customer_named",
            BillEvent::QuantitySet(_) => "billing.bill.quantity_set",
            BillEvent::ProductAdded(_) => "billing.bill.product_added",
            BillEvent::ProductRemoved(_) => "billing.bill.product_removed",
            BillEvent::DiscountSelected(_) => "billing.bill.discount_selected",
            BillEvent::BillReset(_) => "billing.bill.reset",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            BillEvent::CustomerNamed(e) => e.occurred_at,
            BillEvent::QuantitySet(e) => e.occurred_at,
            BillEvent::ProductAdded(e) => e.occurred_at,
            BillEvent::ProductRemoved(e) => e.occurred_at,
            BillEvent::DiscountSelected(e) => e.occurred_at,
            BillEvent::BillReset(e) => e.occurred_at,
        }
    }
}

impl Aggregate for BillSession {
    type Command = BillCommand;
    type Event = BillEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            BillEvent::CustomerNamed(e) => {
                self.customer_name = e.name.clone();
            }
            BillEvent::QuantitySet(e) => {
                self.items.set(
                    e.product_id,
                    LineState {
                        quantity: e.quantity,
                        line_total: e.line_total,
                    },
                );
                self.totals = e.totals;
            }
            BillEvent::ProductAdded(e) => {
                self.items.push(
                    e.product.clone(),
                    LineState {
                        quantity: e.quantity,
                        line_total: e.line_total,
                    },
                );
                self.totals = e.totals;
            }
            BillEvent::ProductRemoved(e) => {
                self.items.remove(e.product_id);
                self.totals = e.totals;
            }
            BillEvent::DiscountSelected(e) => {
                self.discount = e.setting;
                self.totals = e.totals;
            }
            BillEvent::BillReset(_) => {
                self.items = LineItems::from_catalog(self.seed.clone());
                self.discount = DiscountSetting::default();
                self.customer_name.clear();
                self.totals = Totals::default();
                self.journal = EventJournal::new(self.id.0, JOURNAL_TYPE);
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            BillCommand::SetCustomerName(cmd) => Ok(vec![BillEvent::CustomerNamed(CustomerNamed {
                name: cmd.name.clone(),
                occurred_at: cmd.occurred_at,
            })]),
            BillCommand::SetQuantity(cmd) => self.handle_set_quantity(cmd),
            BillCommand::AddProduct(cmd) => self.handle_add_product(cmd),
            BillCommand::RemoveProduct(cmd) => self.handle_remove_product(cmd),
            BillCommand::SelectDiscount(cmd) => self.handle_select_discount(cmd),
            BillCommand::ResetBill(cmd) => Ok(vec![BillEvent::BillReset(BillReset {
                occurred_at: cmd.occurred_at,
            })]),
        }
    }
}

impl BillSession {
    fn ensure_line(&self, product_id: ProductId) -> DomainResult<LineView<'_>> {
        self.items
            .get(product_id)
            .ok_or_else(|| {
                DomainError::not_found(format!("product {product_id} is not on the bill"))
            })
    }

    fn handle_set_quantity(&self, cmd: &SetQuantity) -> DomainResult<Vec<BillEvent>> {
        let line = self.ensure_line(cmd.product_id)?;
        let state = LineState::priced(line.product.unit_price(), cmd.quantity)?;
        let totals = Totals::compute(
            self.items.line_totals_with(cmd.product_id, state.line_total),
            self.discount.percent(),
        )?;

        Ok(vec![BillEvent::QuantitySet(QuantitySet {
            product_id: cmd.product_id,
            quantity: state.quantity,
            line_total: state.line_total,
            totals,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_product(&self, cmd: &AddProduct) -> DomainResult<Vec<BillEvent>> {
        let Some((name, price, quantity)) = parse_new_product(cmd) else {
            return Ok(Vec::new());
        };

        if self.items.get(cmd.product_id).is_some() {
            return Err(DomainError::invariant(format!(
                "product {} is already on the bill",
                cmd.product_id
            )));
        }

        let product = Product::with_id(cmd.product_id, name, price)?;
        let state = LineState::priced(price, quantity)?;
        let totals = Totals::compute(
            self.items
                .line_totals()
                .into_iter()
                .chain(std::iter::once(state.line_total)),
            self.discount.percent(),
        )?;

        Ok(vec![BillEvent::ProductAdded(ProductAdded {
            product,
            quantity: state.quantity,
            line_total: state.line_total,
            totals,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_product(&self, cmd: &RemoveProduct) -> DomainResult<Vec<BillEvent>> {
        self.ensure_line(cmd.product_id)?;
        let totals = Totals::compute(
            self.items
                .iter()
                .filter(|line| line.product.id_typed() != cmd.product_id)
                .map(|line| line.line_total),
            self.discount.percent(),
        )?;

        Ok(vec![BillEvent::ProductRemoved(ProductRemoved {
            product_id: cmd.product_id,
            totals,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_select_discount(&self, cmd: &SelectDiscount) -> DomainResult<Vec<BillEvent>> {
        let totals = Totals::compute(self.items.line_totals(), cmd.setting.percent())?;

        Ok(vec![BillEvent::DiscountSelected(DiscountSelected {
            setting: cmd.setting,
            totals,
            occurred_at: cmd.occurred_at,
        })])
    }
}

/// Name, price and quantity from the add-product inputs, or `None` if any of them
/// is blank or does not parse.
fn parse_new_product(cmd: &AddProduct) -> Option<(&str, Money, u32)> {
    let name = cmd.name.trim();
    if name.is_empty() {
        return None;
    }
    let price = Money::parse(&cmd.price).ok()?;
    let quantity = cmd.quantity.trim().parse::<u32>().ok()?;
    Some((name, price, quantity))
}
