//! mmbill-cli
//!
//! Configuration, the interactive bill shell and the one-shot export used by the
//! `mmbill` binary.

pub mod config;
pub mod oneshot;
pub mod shell;
pub mod table;

pub use config::{Cli, Command, ExportArgs, ItemQuantity, Settings, StoreProfile};
pub use oneshot::export_once;
pub use shell::{Shell, ShellCommand};
pub use table::render_table;
