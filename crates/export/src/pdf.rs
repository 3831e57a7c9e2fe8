//! `DrawingSurface` backed by `oxidize-pdf`.

use std::path::Path;

use oxidize_pdf::{measure_text, Document, Font, Image, Page};

use crate::error::{ExportError, ExportResult};
use crate::surface::{DrawingSurface, TextAlign};

const POINTS_PER_MM: f64 = 72.0 / 25.4;
const A4_HEIGHT_MM: f64 = 297.0;
const DEFAULT_FONT_SIZE: f64 = 16.0;
const LINE_WIDTH_MM: f64 = 0.2;

/// Builds an A4 document with the standard Helvetica font.
///
/// Callers work in millimetres from the top-left; PDF space is points from the
/// bottom-left, so every coordinate is scaled and the y axis flipped here.
pub struct PdfSurface {
    document: Document,
    page: Page,
    font_size: f64,
    image_count: usize,
}

impl PdfSurface {
    pub fn new(title: impl Into<String>) -> Self {
        let mut document = Document::new();
        document.set_title(title);
        document.set_creator("mmbill");
        Self {
            document,
            page: Page::a4(),
            font_size: DEFAULT_FONT_SIZE,
            image_count: 0,
        }
    }

    fn x(mm: f64) -> f64 {
        mm * POINTS_PER_MM
    }

    fn y(mm: f64) -> f64 {
        (A4_HEIGHT_MM - mm) * POINTS_PER_MM
    }

    fn load_image(path: &Path) -> ExportResult<Image> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => Ok(Image::from_jpeg_file(path)?),
            _ => Err(ExportError::UnsupportedImage(path.display().to_string())),
        }
    }
}

impl DrawingSurface for PdfSurface {
    fn add_image(
        &mut self,
        path: &Path,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> ExportResult<()> {
        let image = Self::load_image(path)?;
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        self.page.add_image(name.clone(), image);
        // PDF images are placed by their lower-left corner.
        self.page.draw_image(
            &name,
            Self::x(x),
            Self::y(y + height),
            width * POINTS_PER_MM,
            height * POINTS_PER_MM,
        )?;
        Ok(())
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) -> ExportResult<()> {
        let mut px = Self::x(x);
        if align == TextAlign::Right {
            px -= measure_text(text, Font::Helvetica, self.font_size);
        }
        self.page
            .text()
            .set_font(Font::Helvetica, self.font_size)
            .at(px, Self::y(y))
            .write(text)?;
        Ok(())
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.page
            .graphics()
            .set_line_width(LINE_WIDTH_MM * POINTS_PER_MM)
            .move_to(Self::x(x1), Self::y(y1))
            .line_to(Self::x(x2), Self::y(y2))
            .stroke();
    }

    fn add_page(&mut self) {
        let finished = std::mem::replace(&mut self.page, Page::a4());
        self.document.add_page(finished);
    }

    fn save(&mut self, path: &Path) -> ExportResult<()> {
        let last = std::mem::replace(&mut self.page, Page::a4());
        self.document.add_page(last);
        self.document.save(path)?;
        tracing::debug!(path = %path.display(), pages = self.document.page_count(), "pdf written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_top_left_millimetres_to_pdf_points() {
        assert!((PdfSurface::x(25.4) - 72.0).abs() < 1e-9);
        assert!((PdfSurface::y(0.0) - 297.0 * POINTS_PER_MM).abs() < 1e-9);
        assert!(PdfSurface::y(0.0) > PdfSurface::y(280.0));
    }

    #[test]
    fn png_logo_is_rejected() {
        let mut surface = PdfSurface::new("test");
        let err = surface
            .add_image(Path::new("logo.png"), 14.0, 10.0, 30.0, 30.0)
            .unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedImage(_)));
    }

    #[test]
    fn missing_jpeg_is_an_error() {
        let mut surface = PdfSurface::new("test");
        let result = surface.add_image(Path::new("does/not/exist.jpg"), 14.0, 10.0, 30.0, 30.0);
        assert!(result.is_err());
    }
}
