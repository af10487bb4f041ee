//! Message sink for the storefront.
//!
//! In JSON mode the chatty channels go quiet; only [`Output::json`] and
//! errors produce anything, so scripted callers get parseable output.

use console::style;

/// Handles all user-facing CLI output.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create an output handler for the given flags.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Neutral status line.
    pub fn info(&self, msg: &str) {
        if !self.json {
            println!("{} {}", style("::").cyan().bold(), msg);
        }
    }

    /// Something worked.
    pub fn success(&self, msg: &str) {
        if !self.json {
            println!("{} {}", style("ok").green().bold(), msg);
        }
    }

    /// Something is off but the session continues.
    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        }
    }

    /// An operation failed. Printed even in JSON mode, as a JSON object.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        }
    }

    /// Diagnostic line, shown only with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{}", style(format!("debug: {}", msg)).dim());
        }
    }

    /// Underlined section title.
    pub fn header(&self, title: &str) {
        if !self.json {
            println!();
            println!("{}", style(title).bold());
            println!("{}", style("-".repeat(title.chars().count())).dim());
        }
    }

    /// Indented `key: value` line.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {} {}", style(format!("{}:", key)).dim(), value);
        }
    }

    /// Indented bullet line.
    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  - {}", item);
        }
    }

    /// Aligned table with a dimmed header row. Column widths come from
    /// the widest cell in each column.
    pub fn table(&self, columns: &[&str], rows: &[Vec<String>]) {
        if self.json {
            return;
        }
        let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
        for row in rows {
            for (cell, width) in row.iter().zip(widths.iter_mut()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let render = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(widths.iter())
                .map(|(cell, width)| format!("{:width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
        };
        let head: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        println!("  {}", style(render(&head)).dim());
        for row in rows {
            println!("  {}", render(row));
        }
    }

    /// Pretty-printed JSON value.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(text) = serde_json::to_string_pretty(value) {
            println!("{}", text);
        }
    }

    /// Whether `--json` was given.
    pub fn is_json(&self) -> bool {
        self.json
    }
}
