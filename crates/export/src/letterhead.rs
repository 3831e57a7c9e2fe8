use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Brand block printed at the top of every bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Letterhead {
    pub brand: String,
    /// Phone numbers, printed as `Contact: <number>`.
    pub contacts: Vec<String>,
    /// JPEG logo drawn in the top-left corner; no logo is drawn when unset.
    pub logo: Option<PathBuf>,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            brand: "MM DISTRIBUTORS".to_string(),
            contacts: vec![
                "03432546206".to_string(),
                "03432558041".to_string(),
                "03332294598".to_string(),
            ],
            logo: None,
        }
    }
}

impl Letterhead {
    pub fn with_logo(mut self, logo: impl Into<PathBuf>) -> Self {
        self.logo = Some(logo.into());
        self
    }
}
