//! Bill layout.
//!
//! Positions are millimetres on an A4 page, measured from the top-left corner.

use mmbill_billing::{BillRow, BillSnapshot};

use crate::error::ExportResult;
use crate::letterhead::Letterhead;
use crate::surface::{DrawingSurface, TextAlign};

const LEFT: f64 = 14.0;
const RIGHT: f64 = 196.0;

const LOGO_X: f64 = 14.0;
const LOGO_Y: f64 = 10.0;
const LOGO_SIZE: f64 = 30.0;

const BRAND_FONT_SIZE: f64 = 18.0;
const BRAND_X: f64 = 50.0;
const BRAND_Y: f64 = 22.0;

const BODY_FONT_SIZE: f64 = 12.0;
const CONTACT_X: f64 = 140.0;
const CONTACT_Y: f64 = 15.0;
const CONTACT_STEP: f64 = 5.0;
const CUSTOMER_Y: f64 = 45.0;
const DATE_Y: f64 = 55.0;
const HEADER_RULE_Y: f64 = 60.0;
const TABLE_TOP_Y: f64 = 65.0;

const SERIAL_X: f64 = 14.0;
const PRODUCT_X: f64 = 40.0;
const PRICE_X: f64 = 90.0;
const QUANTITY_X: f64 = 120.0;
const TOTAL_X: f64 = 160.0;

const ROW_STEP: f64 = 10.0;
/// Top of the table on continuation pages.
const CONTINUATION_TOP_Y: f64 = 20.0;
/// Nothing is drawn below this line.
const PAGE_BOTTOM_Y: f64 = 280.0;

/// What `render_bill` drew.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub pages: usize,
    pub rows: usize,
}

/// Draw the whole bill onto `surface`.
///
/// Layout, top to bottom: letterhead, customer, date, the table of lines with a
/// quantity above zero, a rule, the grand total, and either the discount plus the
/// final total or the final total alone.
pub fn render_bill<S>(
    snapshot: &BillSnapshot,
    letterhead: &Letterhead,
    surface: &mut S,
) -> ExportResult<RenderSummary>
where
    S: DrawingSurface + ?Sized,
{
    let mut pages = 1;

    draw_letterhead(letterhead, surface)?;

    let customer = format!("Customer: {}", snapshot.customer_name());
    surface.text(&customer, LEFT, CUSTOMER_Y, TextAlign::Left)?;
    let date = format!("Date: {}", snapshot.formatted_date());
    surface.text(&date, LEFT, DATE_Y, TextAlign::Left)?;
    surface.line(LEFT, HEADER_RULE_Y, RIGHT, HEADER_RULE_Y);

    let mut y = TABLE_TOP_Y;
    draw_table_heading(surface, y)?;
    y += ROW_STEP;

    let rows = snapshot.rows();
    for row in &rows {
        if y > PAGE_BOTTOM_Y {
            y = start_continuation_page(surface)?;
            pages += 1;
            draw_table_heading(surface, y)?;
            y += ROW_STEP;
        }
        draw_row(surface, row, y)?;
        y += ROW_STEP;
    }

    let totals = snapshot.totals();
    let has_discount = !totals.discount.is_zero();
    let block_height = (if has_discount { 3.0 } else { 2.0 }) * ROW_STEP;
    if y + block_height > PAGE_BOTTOM_Y {
        y = start_continuation_page(surface)?;
        pages += 1;
    }

    surface.line(LEFT, y, RIGHT, y);
    surface.text(
        &format!("Grand Total: {}", totals.grand_total),
        LEFT,
        y + ROW_STEP,
        TextAlign::Left,
    )?;
    if has_discount {
        surface.text(
            &format!("Discount: {}%", totals.discount),
            LEFT,
            y + 2.0 * ROW_STEP,
            TextAlign::Left,
        )?;
        surface.text(
            &format!("Final Total: {}", totals.final_total),
            LEFT,
            y + 3.0 * ROW_STEP,
            TextAlign::Left,
        )?;
    } else {
        surface.text(
            &format!("Final Total: {}", totals.final_total),
            LEFT,
            y + 2.0 * ROW_STEP,
            TextAlign::Left,
        )?;
    }

    Ok(RenderSummary {
        pages,
        rows: rows.len(),
    })
}

fn draw_letterhead<S>(letterhead: &Letterhead, surface: &mut S) -> ExportResult<()>
where
    S: DrawingSurface + ?Sized,
{
    if let Some(logo) = &letterhead.logo {
        surface.add_image(logo, LOGO_X, LOGO_Y, LOGO_SIZE, LOGO_SIZE)?;
    }

    surface.set_font_size(BRAND_FONT_SIZE);
    surface.text(&letterhead.brand, BRAND_X, BRAND_Y, TextAlign::Left)?;

    surface.set_font_size(BODY_FONT_SIZE);
    for (i, number) in letterhead.contacts.iter().enumerate() {
        let y = CONTACT_Y + i as f64 * CONTACT_STEP;
        surface.text(&format!("Contact: {number}"), CONTACT_X, y, TextAlign::Left)?;
    }
    Ok(())
}

fn draw_table_heading<S>(surface: &mut S, y: f64) -> ExportResult<()>
where
    S: DrawingSurface + ?Sized,
{
    surface.text("Serial", SERIAL_X, y, TextAlign::Left)?;
    surface.text("Product", PRODUCT_X, y, TextAlign::Left)?;
    surface.text("Price", PRICE_X, y, TextAlign::Right)?;
    surface.text("Quantity", QUANTITY_X, y, TextAlign::Right)?;
    surface.text("Total", TOTAL_X, y, TextAlign::Right)?;
    Ok(())
}

fn draw_row<S>(surface: &mut S, row: &BillRow, y: f64) -> ExportResult<()>
where
    S: DrawingSurface + ?Sized,
{
    surface.text(&row.serial.to_string(), SERIAL_X, y, TextAlign::Left)?;
    surface.text(&row.name, PRODUCT_X, y, TextAlign::Left)?;
    surface.text(&row.unit_price.to_string(), PRICE_X, y, TextAlign::Right)?;
    surface.text(&row.quantity.to_string(), QUANTITY_X, y, TextAlign::Right)?;
    surface.text(&row.line_total.to_string(), TOTAL_X, y, TextAlign::Right)?;
    Ok(())
}

fn start_continuation_page<S>(surface: &mut S) -> ExportResult<f64>
where
    S: DrawingSurface + ?Sized,
{
    surface.add_page();
    surface.set_font_size(BODY_FONT_SIZE);
    Ok(CONTINUATION_TOP_Y)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mmbill_billing::{BillSession, DiscountPreset, DiscountSetting};

    use super::*;
    use crate::recording::{DrawOp, RecordingSurface};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn render(bill: &BillSession) -> (RecordingSurface, RenderSummary) {
        let mut surface = RecordingSurface::new();
        let summary =
            render_bill(&bill.snapshot(date()), &Letterhead::default(), &mut surface).unwrap();
        (surface, summary)
    }

    #[test]
    fn draws_header_in_order() {
        let mut bill = BillSession::with_default_catalog();
        bill.set_customer_name("Ali").unwrap();
        let (surface, _) = render(&bill);

        let texts = surface.texts();
        assert_eq!(
            &texts[..6],
            &[
                "MM DISTRIBUTORS",
                "Contact: 03432546206",
                "Contact: 03432558041",
                "Contact: 03332294598",
                "Customer: Ali",
                "Date: 01/06/2024",
            ]
        );
        assert_eq!(surface.ops()[0], DrawOp::FontSize(18.0));
    }

    #[test]
    fn rows_are_right_aligned_with_two_decimals() {
        let mut bill = BillSession::with_default_catalog();
        bill.set_quantity(1, 1).unwrap();
        let (surface, summary) = render(&bill);

        assert_eq!(summary.rows, 1);
        assert!(surface.ops().contains(&DrawOp::Text {
            text: "815.00".into(),
            x: PRICE_X,
            y: TABLE_TOP_Y + ROW_STEP,
            align: TextAlign::Right,
        }));
        assert!(surface.ops().contains(&DrawOp::Text {
            text: "Crazy Egg".into(),
            x: PRODUCT_X,
            y: TABLE_TOP_Y + ROW_STEP,
            align: TextAlign::Left,
        }));
    }

    #[test]
    fn zero_quantity_bill_still_prints_totals() {
        let bill = BillSession::with_default_catalog();
        let (surface, summary) = render(&bill);

        assert_eq!(summary, RenderSummary { pages: 1, rows: 0 });
        let texts = surface.texts();
        assert!(texts.contains(&"Grand Total: 0.00"));
        assert!(texts.contains(&"Final Total: 0.00"));
        assert!(!texts.iter().any(|t| t.starts_with("Discount")));
        // table heading is directly followed by the rule
        assert!(surface.ops().contains(&DrawOp::Line {
            x1: LEFT,
            y1: TABLE_TOP_Y + ROW_STEP,
            x2: RIGHT,
            y2: TABLE_TOP_Y + ROW_STEP,
        }));
    }

    #[test]
    fn discount_line_only_when_discounted() {
        let mut bill = BillSession::with_default_catalog();
        bill.set_quantity(0, 2).unwrap();
        bill.set_quantity(1, 1).unwrap();
        bill.select_discount(DiscountSetting::Preset(DiscountPreset::Seven))
            .unwrap();
        let (surface, _) = render(&bill);

        let texts = surface.texts();
        let tail: Vec<_> = texts[texts.len() - 3..].to_vec();
        assert_eq!(
            tail,
            vec!["Grand Total: 1355.00", "Discount: 7%", "Final Total: 1260.15"]
        );
    }

    #[test]
    fn logo_is_drawn_when_configured() {
        let bill = BillSession::with_default_catalog();
        let mut surface = RecordingSurface::new();
        let letterhead = Letterhead::default().with_logo("assets/logo.jpg");
        render_bill(&bill.snapshot(date()), &letterhead, &mut surface).unwrap();

        assert_eq!(
            surface.ops()[0],
            DrawOp::Image {
                path: "assets/logo.jpg".into(),
                x: LOGO_X,
                y: LOGO_Y,
                width: LOGO_SIZE,
                height: LOGO_SIZE,
            }
        );
    }

    #[test]
    fn totals_block_moves_to_next_page_when_it_would_overflow() {
        let mut bill = BillSession::with_default_catalog();
        for i in 0..19 {
            bill.add_product(&format!("Item {i}"), "10", "1").unwrap().unwrap();
        }
        bill.select_discount(DiscountSetting::Preset(DiscountPreset::Seven))
            .unwrap();
        let (surface, summary) = render(&bill);

        assert_eq!(summary, RenderSummary { pages: 2, rows: 19 });
        let ops = surface.ops();
        let break_at = ops.iter().position(|op| *op == DrawOp::NewPage).unwrap();
        assert_eq!(ops.iter().filter(|op| **op == DrawOp::NewPage).count(), 1);

        // every row stays on page 1, the heading is not repeated
        let page_two = &ops[break_at + 1..];
        assert!(page_two.contains(&DrawOp::Text {
            text: "Grand Total: 190.00".into(),
            x: LEFT,
            y: CONTINUATION_TOP_Y + ROW_STEP,
            align: TextAlign::Left,
        }));
        assert!(page_two.contains(&DrawOp::Text {
            text: "Final Total: 176.70".into(),
            x: LEFT,
            y: CONTINUATION_TOP_Y + 3.0 * ROW_STEP,
            align: TextAlign::Left,
        }));
        let rows_on_page_two = page_two
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { text, .. } if text.starts_with("Item")))
            .count();
        assert_eq!(rows_on_page_two, 0);
        assert_eq!(surface.texts().iter().filter(|t| **t == "Serial").count(), 1);

        for op in ops {
            if let DrawOp::Text { y, .. } = op {
                assert!(*y <= PAGE_BOTTOM_Y, "text at y={y}");
            }
        }
    }

    #[test]
    fn long_bills_continue_on_new_pages() {
        let mut bill = BillSession::with_default_catalog();
        for i in 0..30 {
            bill.add_product(&format!("Item {i}"), "10", "1").unwrap().unwrap();
        }
        let (surface, summary) = render(&bill);

        assert_eq!(summary.rows, 30);
        assert!(summary.pages >= 2);
        let new_pages = surface.ops().iter().filter(|op| **op == DrawOp::NewPage).count();
        assert_eq!(new_pages + 1, summary.pages);
        assert_eq!(surface.texts().iter().filter(|t| **t == "Serial").count(), summary.pages);

        // nothing below the bottom margin
        for op in surface.ops() {
            if let DrawOp::Text { y, .. } = op {
                assert!(*y <= PAGE_BOTTOM_Y, "text at y={y}");
            }
        }
    }
}
