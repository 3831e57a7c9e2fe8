use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use mmbill_billing::BillSession;
use mmbill_core::Money;

use crate::error::ExportResult;
use crate::layout::{render_bill, RenderSummary};
use crate::letterhead::Letterhead;
use crate::naming::bill_file_name;
use crate::pdf::PdfSurface;
use crate::surface::DrawingSurface;

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub customer_name: String,
    pub rows: usize,
    pub pages: usize,
    pub final_total: Money,
}

/// Renders bills into an output directory.
#[derive(Debug, Clone)]
pub struct BillExporter {
    letterhead: Letterhead,
    output_dir: PathBuf,
}

impl BillExporter {
    pub fn new(letterhead: Letterhead, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            letterhead,
            output_dir: output_dir.into(),
        }
    }

    pub fn letterhead(&self) -> &Letterhead {
        &self.letterhead
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Draw the bill without saving or touching the session.
    pub fn render<S>(
        &self,
        session: &BillSession,
        surface: &mut S,
        date: NaiveDate,
    ) -> ExportResult<RenderSummary>
    where
        S: DrawingSurface + ?Sized,
    {
        render_bill(&session.snapshot(date), &self.letterhead, surface)
    }

    /// Render, save, and only then reset the session.
    ///
    /// Any drawing or save failure is returned as-is and the session keeps every
    /// line, the discount and the customer name.
    pub fn export<S>(
        &self,
        session: &mut BillSession,
        surface: &mut S,
        date: NaiveDate,
    ) -> ExportResult<ExportReceipt>
    where
        S: DrawingSurface + ?Sized,
    {
        let snapshot = session.snapshot(date);
        let path = self.output_dir.join(bill_file_name(snapshot.customer_name()));

        let summary = render_bill(&snapshot, &self.letterhead, surface).inspect_err(|e| {
            tracing::warn!(bill_id = %snapshot.bill_id(), error = %e, "bill rendering failed");
        })?;

        std::fs::create_dir_all(&self.output_dir)?;
        surface.save(&path).inspect_err(|e| {
            tracing::warn!(
                bill_id = %snapshot.bill_id(),
                path = %path.display(),
                error = %e,
                "saving bill failed"
            );
        })?;

        tracing::info!(
            bill_id = %snapshot.bill_id(),
            path = %path.display(),
            rows = summary.rows,
            pages = summary.pages,
            final_total = %snapshot.totals().final_total,
            "bill exported"
        );

        session.reset()?;

        Ok(ExportReceipt {
            path,
            customer_name: snapshot.customer_name().to_string(),
            rows: summary.rows,
            pages: summary.pages,
            final_total: snapshot.totals().final_total,
        })
    }

    /// Export to a PDF file through `oxidize-pdf`.
    pub fn export_pdf(
        &self,
        session: &mut BillSession,
        date: NaiveDate,
    ) -> ExportResult<ExportReceipt> {
        let mut surface = PdfSurface::new(format!("{} bill", self.letterhead.brand));
        self.export(session, &mut surface, date)
    }
}
