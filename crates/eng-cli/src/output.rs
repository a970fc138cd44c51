//! Result tables and their text, JSON and CSV renderings.

use crate::OutputFormat;
use anyhow::Result;
use serde_json::{Map, Value};
use std::fmt::Write as _;
use std::io::Write;

/// A command result: named columns and rows of JSON values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<&'static str>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Render the table in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => self.render_json(),
            OutputFormat::Csv => Ok(self.render_csv()),
        }
    }

    fn render_text(&self) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(plain).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(name, w)| format!("{name:<width$}", width = *w))
            .collect();
        let _ = writeln!(out, "{}", header.join("  ").trim_end());
        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{cell:<width$}", width = *w))
                .collect();
            let _ = writeln!(out, "{}", line.join("  ").trim_end());
        }
        out
    }

    fn render_json(&self) -> Result<String> {
        let records: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .map(|c| c.to_string())
                    .zip(row.iter().cloned())
                    .collect();
                Value::Object(object)
            })
            .collect();
        Ok(serde_json::to_string_pretty(&records)? + "\n")
    }

    fn render_csv(&self) -> String {
        let mut out = self.columns.join(",");
        out.push('\n');
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(|v| csv_field(&plain(v))).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }

    /// Render and write to stdout.
    pub fn print(&self, format: OutputFormat) -> Result<()> {
        let rendered = self.render(format)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        Ok(())
    }
}

/// Cell text without JSON quoting.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
