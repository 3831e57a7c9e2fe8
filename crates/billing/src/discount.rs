use serde::{Deserialize, Serialize};

use mmbill_core::{DomainError, DomainResult, Percent};

/// The fixed discounts offered by the selector.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountPreset {
    #[default]
    None,
    Three,
    Seven,
}

impl DiscountPreset {
    pub fn percent(self) -> Percent {
        let bp = match self {
            DiscountPreset::None => 0,
            DiscountPreset::Three => 300,
            DiscountPreset::Seven => 700,
        };
        Percent::from_basis_points(bp).unwrap_or(Percent::ZERO)
    }

    pub fn label(self) -> &'static str {
        match self {
            DiscountPreset::None => "No Discount",
            DiscountPreset::Three => "3% Discount",
            DiscountPreset::Seven => "7% Discount",
        }
    }
}

/// Either a preset discount or a user-typed percentage in `[0, 100]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percent", rename_all = "lowercase")]
pub enum DiscountSetting {
    Preset(DiscountPreset),
    Custom(Percent),
}

impl Default for DiscountSetting {
    fn default() -> Self {
        DiscountSetting::Preset(DiscountPreset::None)
    }
}

impl DiscountSetting {
    pub fn percent(&self) -> Percent {
        match self {
            DiscountSetting::Preset(preset) => preset.percent(),
            DiscountSetting::Custom(pct) => *pct,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, DiscountSetting::Custom(_))
    }

    /// Parse a selector choice (`0`, `3`, `7` or `custom`) and, for `custom`, the
    /// typed percentage. Switching to custom without a value starts at 0%.
    pub fn parse(choice: &str, custom_value: Option<&str>) -> DomainResult<Self> {
        match choice.trim() {
            "0" => Ok(DiscountSetting::Preset(DiscountPreset::None)),
            "3" => Ok(DiscountSetting::Preset(DiscountPreset::Three)),
            "7" => Ok(DiscountSetting::Preset(DiscountPreset::Seven)),
            "custom" => match custom_value.map(str::trim).filter(|v| !v.is_empty()) {
                Some(value) => Ok(DiscountSetting::Custom(Percent::parse(value)?)),
                None => Ok(DiscountSetting::Custom(Percent::ZERO)),
            },
            other => Err(DomainError::validation(format!(
                "unknown discount option '{other}' (expected 0, 3, 7 or custom)"
            ))),
        }
    }

    pub fn label(&self) -> String {
        match self {
            DiscountSetting::Preset(preset) => preset.label().to_string(),
            DiscountSetting::Custom(pct) => format!("Custom Discount ({pct}%)"),
        }
    }
}
