//! Line-oriented bill editor standing in for the billing form.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;

use mmbill_billing::{BillSession, DiscountSetting};
use mmbill_export::{BillExporter, RecordingSurface};

use crate::table::render_table;

const HELP: &str = "\
commands:
  customer <name>             set the customer name
  qty <row> <n>               set the quantity of a row
  add <name> | <price> | <n>  add a product
  remove <row>                remove a row
  discount 0|3|7|custom [pct] choose the discount
  show                        print the bill
  preview                     print the bill layout
  export                      write the PDF and start a new bill
  new                         start a new bill
  help                        this text
  quit                        leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Customer(String),
    Quantity { row: usize, quantity: u32 },
    /// Raw fields as typed; the session ignores the command if any is unusable.
    Add { name: String, price: String, quantity: String },
    Remove { row: usize },
    Discount { choice: String, custom: Option<String> },
    Show,
    Preview,
    Export,
    New,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "customer" => ShellCommand::Customer(rest.to_string()),
            "qty" => {
                let mut args = rest.split_whitespace();
                let row = parse_row(args.next())?;
                let quantity = args
                    .next()
                    .ok_or_else(|| anyhow!("usage: qty <row> <n>"))?
                    .parse::<u32>()
                    .context("quantity must be a whole number of 0 or more")?;
                ShellCommand::Quantity { row, quantity }
            }
            "add" => {
                let mut fields = rest.split('|').map(|f| f.trim().to_string());
                ShellCommand::Add {
                    name: fields.next().unwrap_or_default(),
                    price: fields.next().unwrap_or_default(),
                    quantity: fields.next().unwrap_or_default(),
                }
            }
            "remove" => ShellCommand::Remove {
                row: parse_row(rest.split_whitespace().next())?,
            },
            "discount" => {
                let mut args = rest.split_whitespace();
                let choice = args
                    .next()
                    .ok_or_else(|| anyhow!("usage: discount 0|3|7|custom [pct]"))?
                    .to_ascii_lowercase();
                ShellCommand::Discount {
                    choice,
                    custom: args.next().map(str::to_string),
                }
            }
            "show" => ShellCommand::Show,
            "preview" => ShellCommand::Preview,
            "export" => ShellCommand::Export,
            "new" => ShellCommand::New,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => bail!("unknown command '{other}' (try 'help')"),
        };
        Ok(Some(command))
    }

    fn mutates(&self) -> bool {
        matches!(
            self,
            ShellCommand::Customer(_)
                | ShellCommand::Quantity { .. }
                | ShellCommand::Add { .. }
                | ShellCommand::Remove { .. }
                | ShellCommand::Discount { .. }
                | ShellCommand::New
        )
    }
}

/// 1-based row as displayed, returned 0-based.
fn parse_row(raw: Option<&str>) -> anyhow::Result<usize> {
    let raw = raw.ok_or_else(|| anyhow!("missing row number"))?;
    match raw.parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row - 1),
        _ => bail!("row must be a number from 1, got '{raw}'"),
    }
}

pub struct Shell<'a> {
    session: BillSession,
    exporter: &'a BillExporter,
    today: fn() -> NaiveDate,
}

impl<'a> Shell<'a> {
    pub fn new(session: BillSession, exporter: &'a BillExporter) -> Self {
        Self {
            session,
            exporter,
            today: || chrono::Local::now().date_naive(),
        }
    }

    /// Fix the date printed on bills.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn session(&self) -> &BillSession {
        &self.session
    }

    /// Read commands until `quit` or end of input. Command errors are printed and the
    /// shell carries on; only I/O failures end it early.
    pub fn run<R, W>(&mut self, input: R, mut out: W) -> anyhow::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        write!(out, "{}", render_table(&self.session))?;
        for line in input.lines() {
            let line = line.context("reading command")?;
            let command = match ShellCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "error: {e:#}")?;
                    continue;
                }
            };
            if command == ShellCommand::Quit {
                break;
            }
            if let Err(e) = self.dispatch(&command, &mut out) {
                tracing::debug!(error = %e, "shell command rejected");
                writeln!(out, "error: {e:#}")?;
                continue;
            }
            if command.mutates() {
                write!(out, "{}", render_table(&self.session))?;
            }
        }
        out.flush()?;
        Ok(())
    }

    fn dispatch<W: Write>(&mut self, command: &ShellCommand, out: &mut W) -> anyhow::Result<()> {
        match command {
            ShellCommand::Customer(name) => self.session.set_customer_name(name.as_str())?,
            ShellCommand::Quantity { row, quantity } => {
                self.session.set_quantity(*row, *quantity)?
            }
            ShellCommand::Add { name, price, quantity } => {
                if self.session.add_product(name, price, quantity)?.is_none() {
                    writeln!(out, "nothing added: name, price and quantity are all required")?;
                }
            }
            ShellCommand::Remove { row } => self.session.remove_product(*row)?,
            ShellCommand::Discount { choice, custom } => {
                let setting = DiscountSetting::parse(choice, custom.as_deref())?;
                self.session.select_discount(setting)?;
            }
            ShellCommand::Show => write!(out, "{}", render_table(&self.session))?,
            ShellCommand::Preview => {
                let mut surface = RecordingSurface::new();
                let summary = self
                    .exporter
                    .render(&self.session, &mut surface, (self.today)())?;
                write!(out, "{}", surface.to_text())?;
                writeln!(out, "({} rows, {} pages)", summary.rows, summary.pages)?;
            }
            ShellCommand::Export => {
                let receipt = self
                    .exporter
                    .export_pdf(&mut self.session, (self.today)())
                    .context("export failed, the bill was kept")?;
                writeln!(
                    out,
                    "saved {} ({} rows, final total {})",
                    receipt.path.display(),
                    receipt.rows,
                    receipt.final_total
                )?;
                write!(out, "{}", render_table(&self.session))?;
            }
            ShellCommand::New => self.session.reset()?,
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Quit => {}
        }
        Ok(())
    }
}
