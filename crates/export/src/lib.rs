//! mmbill-export
//!
//! Bill PDF generation: layout over a drawing surface, the PDF-backed surface, and
//! the export flow that clears the bill once the file is saved.

pub mod error;
pub mod exporter;
pub mod layout;
pub mod letterhead;
pub mod naming;
pub mod pdf;
pub mod recording;
pub mod surface;

pub use error::{ExportError, ExportResult};
pub use exporter::{BillExporter, ExportReceipt};
pub use layout::{render_bill, RenderSummary};
pub use letterhead::Letterhead;
pub use naming::bill_file_name;
pub use pdf::PdfSurface;
pub use recording::{DrawOp, RecordingSurface};
pub use surface::{DrawingSurface, TextAlign};
