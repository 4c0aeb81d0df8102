//! Output formatting for the CLI.
//!
//! Text goes to stdout for humans; `--json` prints engine results as-is.
//! Logs always go to stderr, so stdout stays machine-readable.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

/// Output handler for command results.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Prints `value` as JSON, or the text lines produced by `text`.
    pub fn emit<T, F>(&self, value: &T, text: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> Vec<String>,
    {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if self.json {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        } else {
            for line in text() {
                writeln!(out, "{line}")?;
            }
        }
        Ok(())
    }
}

/// Left-aligned `label: value` row.
pub fn row(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:<12} {}", format!("{label}:"), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_alignment() {
        assert_eq!(row("Price", "$10.00"), "Price:       $10.00");
        assert_eq!(row("Currency", "INR"), "Currency:    INR");
    }
}
