//! A surface that records draw calls instead of producing a file.

use std::path::{Path, PathBuf};

use crate::error::{ExportError, ExportResult};
use crate::surface::{DrawingSurface, TextAlign};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Image {
        path: PathBuf,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FontSize(f64),
    Text {
        text: String,
        x: f64,
        y: f64,
        align: TextAlign,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    NewPage,
    Save(PathBuf),
}

/// Records every call in order. Used for previews and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    fail_on_save: Option<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose `save` fails with the given message.
    pub fn failing_on_save(message: impl Into<String>) -> Self {
        Self {
            ops: Vec::new(),
            fail_on_save: Some(message.into()),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text runs in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Plain-text rendering: one line per text run, pages separated by a rule.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for op in &self.ops {
            match op {
                DrawOp::Text { text, .. } => {
                    out.push_str(text);
                    out.push('\n');
                }
                DrawOp::NewPage => out.push_str("----- page break -----\n"),
                _ => {}
            }
        }
        out
    }
}

impl DrawingSurface for RecordingSurface {
    fn add_image(
        &mut self,
        path: &Path,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> ExportResult<()> {
        self.ops.push(DrawOp::Image {
            path: path.to_path_buf(),
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn set_font_size(&mut self, size: f64) {
        self.ops.push(DrawOp::FontSize(size));
    }

    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) -> ExportResult<()> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            align,
        });
        Ok(())
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
    }

    fn add_page(&mut self) {
        self.ops.push(DrawOp::NewPage);
    }

    fn save(&mut self, path: &Path) -> ExportResult<()> {
        if let Some(message) = &self.fail_on_save {
            return Err(ExportError::Io(std::io::Error::other(message.clone())));
        }
        self.ops.push(DrawOp::Save(path.to_path_buf()));
        Ok(())
    }
}
