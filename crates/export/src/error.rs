use thiserror::Error;

use mmbill_core::DomainError;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] oxidize_pdf::PdfError),

    #[error("unsupported logo image '{0}' (expected .jpg or .jpeg)")]
    UnsupportedImage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bill update failed: {0}")]
    Domain(#[from] DomainError),
}
