use anyhow::Context;
use chrono::NaiveDate;

use mmbill_billing::BillSession;
use mmbill_catalog::Catalog;
use mmbill_export::{BillExporter, ExportReceipt};

use crate::config::ExportArgs;

/// Fill a fresh bill from `args` and write its PDF.
pub fn export_once(
    args: &ExportArgs,
    catalog: Catalog,
    exporter: &BillExporter,
    date: NaiveDate,
) -> anyhow::Result<ExportReceipt> {
    let mut session = BillSession::new(catalog);
    session.set_customer_name(args.customer.as_str())?;
    for item in &args.items {
        let index = item.row.checked_sub(1).context("rows start at 1")?;
        session
            .set_quantity(index, item.quantity)
            .with_context(|| format!("--item {}={}", item.row, item.quantity))?;
    }
    session.select_discount(args.discount_setting()?)?;

    let receipt = exporter
        .export_pdf(&mut session, date)
        .with_context(|| format!("writing bill to {}", exporter.output_dir().display()))?;
    Ok(receipt)
}
