//! Output management and formatting.
//!
//! Status lines (`success`, `info`, ...) are suppressed by `--quiet`; record
//! data is not, since it is the answer to the command.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use fleetbook_core::domain::{Booking, Customer, Taxi};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// A record that can be shown as one row of a table.
pub trait TableRow {
    const HEADERS: &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

fn id_cell<T: ToString>(id: Option<T>) -> String {
    id.map(|i| i.to_string()).unwrap_or_else(|| "-".into())
}

impl TableRow for Customer {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "EMAIL", "PHONE"];

    fn cells(&self) -> Vec<String> {
        vec![
            id_cell(self.id),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
        ]
    }
}

impl TableRow for Taxi {
    const HEADERS: &'static [&'static str] = &["ID", "REG", "SEATS"];

    fn cells(&self) -> Vec<String> {
        vec![id_cell(self.id), self.reg.clone(), self.seats.to_string()]
    }
}

impl TableRow for Booking {
    const HEADERS: &'static [&'static str] = &["ID", "DATE", "CUSTOMER", "TAXI"];

    fn cells(&self) -> Vec<String> {
        vec![
            id_cell(self.id),
            id_cell(self.date),
            id_cell(self.customer_id),
            id_cell(self.taxi_id),
        ]
    }
}

/// Lay out `rows` under `headers`, columns padded to their widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(pad_line(headers.iter().copied(), &widths));
    for row in rows {
        lines.push(pad_line(row.iter().map(String::as_str), &widths));
    }
    lines
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// An explicit `--output-format` wins over `output.format`; `auto` from
    /// either source resolves to Human on a TTY and Plain otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_str(&config.output.format, true).unwrap_or_else(|_| {
                    tracing::warn!(format = %config.output.format, "Unknown output format in config");
                    OutputFormat::Auto
                })
            }
            explicit => explicit,
        };

        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Status lines ──────────────────────────────────────────────────────

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Data ──────────────────────────────────────────────────────────────

    /// Unconditional line on stdout.
    pub fn data(&self, line: &str) -> io::Result<()> {
        self.term.write_line(line)
    }

    /// One record: a JSON object, or a single-row table.
    pub fn record<T: TableRow + Serialize>(&self, record: &T) -> CliResult<()> {
        if self.is_json() {
            return self.json(record);
        }
        self.table(std::slice::from_ref(record))
    }

    /// Many records: a JSON array, or a table (`(none)` when empty).
    pub fn records<T: TableRow + Serialize>(&self, records: &[T]) -> CliResult<()> {
        if self.is_json() {
            return self.json(&records);
        }
        if records.is_empty() {
            self.data("(none)")?;
            return Ok(());
        }
        self.table(records)
    }

    /// Pretty JSON of any serialisable value.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(|e| CliError::IoError {
            message: format!("Failed to serialise output: {e}"),
            source: io::Error::other(e),
        })?;
        self.data(&text)?;
        Ok(())
    }

    fn table<T: TableRow>(&self, records: &[T]) -> CliResult<()> {
        let rows: Vec<Vec<String>> = records.iter().map(TableRow::cells).collect();
        let mut lines = render_table(T::HEADERS, &rows).into_iter();

        if let Some(head) = lines.next() {
            if self.supports_color() {
                self.data(&head.bold().to_string())?;
            } else {
                self.data(&head)?;
            }
        }
        for line in lines {
            self.data(&line)?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_json(&self) -> bool {
        self.format() == OutputFormat::Json
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
