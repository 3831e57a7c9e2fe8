use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use mmbill_billing::DiscountSetting;
use mmbill_catalog::{Catalog, CatalogEntry};
use mmbill_core::DomainResult;
use mmbill_export::Letterhead;

#[derive(Debug, Parser)]
#[command(name = "mmbill", about = "MM Distributors billing", version)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Directory the bill PDFs are written to
    #[arg(long, env = "MMBILL_OUTPUT_DIR", default_value = ".", global = true)]
    pub output_dir: PathBuf,

    /// JPEG logo drawn in the top-left corner of the bill
    #[arg(long, env = "MMBILL_LOGO", global = true)]
    pub logo: Option<PathBuf>,

    /// JSON store profile with letterhead and catalog overrides
    #[arg(long, env = "MMBILL_PROFILE", global = true)]
    pub profile: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, env = "MMBILL_JSON_LOGS", global = true)]
    pub json_logs: bool,
}

impl Settings {
    /// The configured profile, or the built-in defaults when none is set.
    pub fn load_profile(&self) -> anyhow::Result<StoreProfile> {
        match &self.profile {
            Some(path) => StoreProfile::load(path),
            None => Ok(StoreProfile::default()),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fill in a bill interactively (default)
    Shell,

    /// Build one bill from arguments and write its PDF
    Export(ExportArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Customer name printed on the bill and used for the file name
    #[arg(long, default_value = "")]
    pub customer: String,

    /// Quantity for a catalog row, as ROW=QTY (rows start at 1)
    #[arg(long = "item", value_parser = parse_item)]
    pub items: Vec<ItemQuantity>,

    /// Discount percentage: 0, 3, 7 or any value from 0 to 100
    #[arg(long, default_value = "0")]
    pub discount: String,
}

impl ExportArgs {
    pub fn discount_setting(&self) -> DomainResult<DiscountSetting> {
        match self.discount.trim() {
            choice @ ("0" | "3" | "7") => DiscountSetting::parse(choice, None),
            custom => DiscountSetting::parse("custom", Some(custom)),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ItemQuantity {
    /// 1-based catalog row.
    pub row: usize,
    pub quantity: u32,
}

fn parse_item(raw: &str) -> Result<ItemQuantity, String> {
    let (row, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ROW=QTY, got '{raw}'"))?;
    let row: usize = row
        .trim()
        .parse()
        .map_err(|_| format!("row must be a positive number, got '{row}'"))?;
    if row == 0 {
        return Err("rows start at 1".to_string());
    }
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("quantity must be a whole number of 0 or more, got '{quantity}'"))?;
    Ok(ItemQuantity { row, quantity })
}

/// Per-store overrides. Prices in `catalog` are in paisa.
///
/// ```json
/// {
///   "letterhead": { "brand": "MM DISTRIBUTORS", "contacts": ["03432546206"] },
///   "catalog": [ { "name": "On On", "price": 27000 } ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreProfile {
    pub letterhead: Option<Letterhead>,
    pub catalog: Option<Vec<CatalogEntry>>,
}

impl StoreProfile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading store profile {}", path.display()))?;
        let profile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing store profile {}", path.display()))?;
        tracing::debug!(path = %path.display(), "store profile loaded");
        Ok(profile)
    }

    pub fn catalog(&self) -> DomainResult<Catalog> {
        match &self.catalog {
            Some(entries) => Catalog::from_entries(entries.iter().cloned()),
            None => Ok(Catalog::default_list()),
        }
    }

    /// Profile letterhead (or the default one), with `logo` taking precedence over
    /// any logo the profile names.
    pub fn letterhead(&self, logo: Option<&Path>) -> Letterhead {
        let letterhead = self.letterhead.clone().unwrap_or_default();
        match logo {
            Some(path) => letterhead.with_logo(path),
            None => letterhead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmbill_core::Percent;

    #[test]
    fn parses_item_pairs() {
        assert_eq!(parse_item("2=5"), Ok(ItemQuantity { row: 2, quantity: 5 }));
        assert_eq!(parse_item(" 11 = 0 "), Ok(ItemQuantity { row: 11, quantity: 0 }));
        assert!(parse_item("0=1").is_err());
        assert!(parse_item("1=-2").is_err());
        assert!(parse_item("1").is_err());
    }

    #[test]
    fn cli_defaults_to_shell_in_current_dir() {
        let cli = Cli::try_parse_from(["mmbill"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.settings.output_dir, PathBuf::from("."));
        assert!(!cli.settings.json_logs);
    }

    #[test]
    fn export_subcommand_collects_items() {
        let cli = Cli::try_parse_from([
            "mmbill", "export", "--customer", "Ali", "--item", "1=2", "--item", "2=1",
            "--discount", "7", "--output-dir", "out",
        ])
        .unwrap();
        let Some(Command::Export(args)) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.customer, "Ali");
        assert_eq!(args.items.len(), 2);
        assert_eq!(args.discount_setting().unwrap().percent(), Percent::whole(7).unwrap());
        assert_eq!(cli.settings.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn custom_export_discount_is_bounded() {
        let args = |d: &str| ExportArgs {
            customer: String::new(),
            items: Vec::new(),
            discount: d.to_string(),
        };
        assert!(args("12.5").discount_setting().unwrap().is_custom());
        assert!(args("101").discount_setting().is_err());
        assert!(args("-1").discount_setting().is_err());
    }

    #[test]
    fn profile_sections_are_optional() {
        let profile: StoreProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(
            profile.catalog().unwrap().to_entries(),
            Catalog::default_list().to_entries()
        );
        assert_eq!(profile.letterhead(None), Letterhead::default());
    }

    #[test]
    fn profile_catalog_and_logo_override() {
        let profile: StoreProfile = serde_json::from_str(
            r#"{
                "letterhead": { "brand": "ACME", "logo": "profile.jpg" },
                "catalog": [ { "name": "Mints", "price": 10000 } ]
            }"#,
        )
        .unwrap();

        let catalog = profile.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].name(), "Mints");

        let letterhead = profile.letterhead(Some(Path::new("cli.jpg")));
        assert_eq!(letterhead.brand, "ACME");
        assert_eq!(letterhead.logo, Some(PathBuf::from("cli.jpg")));
    }

    #[test]
    fn blank_catalog_name_is_rejected() {
        let profile: StoreProfile =
            serde_json::from_str(r#"{ "catalog": [ { "name": " ", "price": 1 } ] }"#).unwrap();
        assert!(profile.catalog().is_err());
    }
}
