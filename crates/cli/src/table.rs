//! Plain-text rendering of the bill for the terminal.

use std::fmt::Write;

use mmbill_billing::BillSession;

/// Every line (including zero quantities) numbered from 1, followed by the totals.
pub fn render_table(session: &BillSession) -> String {
    let mut out = String::new();
    let customer = match session.customer_name() {
        "" => "(none)",
        name => name,
    };
    let _ = writeln!(out, "Customer: {customer}");
    let _ = writeln!(
        out,
        "{:>3}  {:<20} {:>10} {:>8} {:>12}",
        "#", "Product", "Price", "Qty", "Total"
    );
    for (i, line) in session.lines().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<20} {:>10} {:>8} {:>12}",
            i + 1,
            line.product.name(),
            line.product.unit_price().to_string(),
            line.quantity,
            line.line_total.to_string(),
        );
    }

    let totals = session.totals();
    let _ = writeln!(out, "Grand Total: {}", totals.grand_total);
    let _ = writeln!(out, "Discount: {}", session.discount().label());
    let _ = writeln!(out, "Final Total: {}", totals.final_total);
    out
}
