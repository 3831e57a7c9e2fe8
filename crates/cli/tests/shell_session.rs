use std::io::Cursor;

use chrono::NaiveDate;

use mmbill_billing::BillSession;
use mmbill_export::{BillExporter, Letterhead};
use mmbill_cli::Shell;

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default()
}

fn run(exporter: &BillExporter, script: &str) -> (String, BillSession) {
    let mut shell =
        Shell::new(BillSession::with_default_catalog(), exporter).with_clock(fixed_date);
    let mut out = Vec::new();
    shell.run(Cursor::new(script), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), shell.session().clone())
}

#[test]
fn scripted_bill_reaches_discounted_total() {
    let exporter = BillExporter::new(Letterhead::default(), ".");
    let (out, session) = run(
        &exporter,
        "customer Ali\nqty 1 2\nqty 2 1\ndiscount 7\nquit\nqty 3 9\n",
    );

    assert!(out.contains("Final Total: 1260.15"));
    assert_eq!(session.customer_name(), "Ali");
    // nothing after quit is applied
    assert_eq!(session.quantities()[2], 0);
}

#[test]
fn bad_commands_are_reported_and_skipped() {
    let exporter = BillExporter::new(Letterhead::default(), ".");
    let (out, session) = run(
        &exporter,
        "qty 1 -1\nqty 40 1\ndiscount custom 150\nbogus\nqty 1 3\n",
    );

    assert_eq!(out.matches("error:").count(), 4);
    assert_eq!(session.quantities()[0], 3);
    assert!(session.discount().percent().is_zero());
}

#[test]
fn added_product_shows_as_new_row() {
    let exporter = BillExporter::new(Letterhead::default(), ".");
    let (out, session) = run(&exporter, "add Mints | 100 | 3\nadd Broken | abc | 1\n");

    assert_eq!(session.catalog().len(), 12);
    assert!(out.contains("Grand Total: 300.00"));
    assert!(out.contains("nothing added"));
}

#[test]
fn preview_prints_layout_without_saving() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = BillExporter::new(Letterhead::default(), dir.path());
    let (out, session) = run(&exporter, "customer Ali\nqty 1 1\npreview\n");

    assert!(out.contains("MM DISTRIBUTORS"));
    assert!(out.contains("Date: 01/06/2024"));
    assert!(out.contains("(1 rows, 1 pages)"));
    assert_eq!(session.customer_name(), "Ali");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn export_writes_pdf_and_clears_bill() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = BillExporter::new(Letterhead::default(), dir.path());
    let (out, session) = run(&exporter, "customer Ali\nqty 1 2\nexport\n");

    assert!(dir.path().join("Ali.billing-summary.MMdistributors.pdf").exists());
    assert!(out.contains("saved "));
    assert_eq!(session.customer_name(), "");
    assert!(session.totals().grand_total.is_zero());
}

#[test]
fn failed_export_keeps_bill() {
    let dir = tempfile::tempdir().unwrap();
    let letterhead = Letterhead::default().with_logo(dir.path().join("missing.jpg"));
    let exporter = BillExporter::new(letterhead, dir.path());
    let (out, session) = run(&exporter, "customer Ali\nqty 1 2\nexport\n");

    assert!(out.contains("export failed, the bill was kept"));
    assert_eq!(session.customer_name(), "Ali");
    assert_eq!(session.quantities()[0], 2);
}
