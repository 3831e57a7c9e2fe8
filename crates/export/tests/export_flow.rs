use chrono::NaiveDate;

use mmbill_billing::{BillSession, DiscountPreset, DiscountSetting};
use mmbill_catalog::Catalog;
use mmbill_core::Money;
use mmbill_export::{BillExporter, DrawOp, ExportError, Letterhead, RecordingSurface};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn filled_session() -> BillSession {
    let mut session = BillSession::new(Catalog::default_list());
    session.set_customer_name("Ali").unwrap();
    session.set_quantity(0, 2).unwrap();
    session.set_quantity(1, 1).unwrap();
    session
        .select_discount(DiscountSetting::Preset(DiscountPreset::Seven))
        .unwrap();
    session
}

#[test]
fn saved_export_resets_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = BillExporter::new(Letterhead::default(), dir.path());
    let mut session = filled_session();
    let mut surface = RecordingSurface::new();

    let receipt = exporter.export(&mut session, &mut surface, date()).unwrap();

    assert_eq!(receipt.path, dir.path().join("Ali.billing-summary.MMdistributors.pdf"));
    assert_eq!(receipt.rows, 2);
    assert_eq!(receipt.pages, 1);
    assert_eq!(receipt.final_total, Money::from_minor(126_015));
    assert_eq!(surface.ops().last(), Some(&DrawOp::Save(receipt.path.clone())));

    assert_eq!(session.customer_name(), "");
    assert!(session.quantities().iter().all(|q| *q == 0));
    assert!(session.totals().final_total.is_zero());
    assert!(session.discount().percent().is_zero());
    assert_eq!(session.catalog().len(), 11);
}

#[test]
fn failed_save_keeps_the_bill() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = BillExporter::new(Letterhead::default(), dir.path());
    let mut session = filled_session();
    let before = session.clone();
    let mut surface = RecordingSurface::failing_on_save("disk full");

    let err = exporter.export(&mut session, &mut surface, date()).unwrap_err();

    assert!(matches!(err, ExportError::Io(_)));
    assert_eq!(session, before);
}

#[test]
fn pdf_lands_in_the_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bills");
    let exporter = BillExporter::new(Letterhead::default(), &out);
    let mut session = filled_session();

    let receipt = exporter.export_pdf(&mut session, date()).unwrap();

    assert_eq!(receipt.path, out.join("Ali.billing-summary.MMdistributors.pdf"));
    let bytes = std::fs::read(&receipt.path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(session.customer_name(), "");
}

#[test]
fn separators_in_customer_name_stay_inside_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = BillExporter::new(Letterhead::default(), dir.path());
    let mut session = filled_session();
    session.set_customer_name("A/B").unwrap();

    let receipt = exporter.export_pdf(&mut session, date()).unwrap();

    assert_eq!(receipt.path, dir.path().join("A_B.billing-summary.MMdistributors.pdf"));
    assert!(receipt.path.exists());
}

#[test]
fn empty_customer_name_still_exports() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = BillExporter::new(Letterhead::default(), dir.path());
    let mut session = BillSession::new(Catalog::default_list());

    let receipt = exporter.export_pdf(&mut session, date()).unwrap();

    assert_eq!(receipt.rows, 0);
    assert_eq!(receipt.path, dir.path().join(".billing-summary.MMdistributors.pdf"));
    assert!(receipt.path.exists());
}

#[test]
fn unreadable_logo_aborts_without_reset() {
    let dir = tempfile::tempdir().unwrap();
    let missing = Letterhead::default().with_logo(dir.path().join("logo.jpg"));
    let png = Letterhead::default().with_logo(dir.path().join("logo.png"));

    for letterhead in [missing, png] {
        let exporter = BillExporter::new(letterhead, dir.path());
        let mut session = filled_session();
        let before = session.clone();

        assert!(exporter.export_pdf(&mut session, date()).is_err());
        assert_eq!(session, before);
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn preview_render_leaves_session_alone() {
    let exporter = BillExporter::new(Letterhead::default(), ".");
    let session = filled_session();
    let mut surface = RecordingSurface::new();

    let summary = exporter.render(&session, &mut surface, date()).unwrap();

    assert_eq!(summary.rows, 2);
    assert!(surface.texts().contains(&"Final Total: 1260.15"));
    assert!(!surface.ops().iter().any(|op| matches!(op, DrawOp::Save(_))));
    assert_eq!(session.customer_name(), "Ali");
}
