//! The drawing collaborator the bill layout talks to.

use std::path::Path;

use crate::error::ExportResult;

/// Horizontal anchoring of a text run relative to its `x` coordinate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

/// Absolute-positioned drawing on A4 pages.
///
/// Coordinates are millimetres from the top-left corner of the current page; text
/// `y` is the baseline.
pub trait DrawingSurface {
    fn add_image(
        &mut self,
        path: &Path,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> ExportResult<()>;

    fn set_font_size(&mut self, size: f64);

    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) -> ExportResult<()>;

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    /// Start a new page; later calls draw on it.
    fn add_page(&mut self);

    /// Write the finished document to `path`.
    fn save(&mut self, path: &Path) -> ExportResult<()>;
}
