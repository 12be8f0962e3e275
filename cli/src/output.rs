//! Output formatting for commands.
//!
//! Results are either printed as pretty JSON or rendered as aligned tables
//! over a fixed set of columns per resource.

use std::io::Write;

use batchctl_core::time::format_epoch_millis;
use batchctl_core::Result;
use serde_json::Value;

/// One table column: header text and the response field it reads.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Header text.
    pub header: &'static str,
    /// Field name in the response object.
    pub field: &'static str,
}

impl Column {
    /// Create a new column.
    pub const fn new(header: &'static str, field: &'static str) -> Self {
        Self { header, field }
    }
}

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormat {
    json: bool,
}

impl OutputFormat {
    /// Create a new output formatter.
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    /// Write a list of objects, one table row each.
    pub fn write_list<W: Write>(
        &self,
        writer: &mut W,
        items: &[Value],
        columns: &[Column],
        what: &str,
    ) -> Result<()> {
        if self.json {
            return write_json(writer, items);
        }
        if items.is_empty() {
            writeln!(writer, "No {what} found")?;
            return Ok(());
        }

        let rows: Vec<Vec<String>> = items
            .iter()
            .map(|item| columns.iter().map(|c| cell(item, c.field)).collect())
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                rows.iter()
                    .map(|row| row[idx].chars().count())
                    .chain([c.header.len()])
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let header: Vec<String> = columns.iter().map(|c| c.header.to_string()).collect();
        write_row(writer, &header, &widths)?;
        for row in &rows {
            write_row(writer, row, &widths)?;
        }
        Ok(())
    }

    /// Write one object as `FIELD: value` lines.
    pub fn write_object<W: Write>(
        &self,
        writer: &mut W,
        item: &Value,
        fields: &[Column],
    ) -> Result<()> {
        if self.json {
            return write_json(writer, item);
        }

        let width = fields
            .iter()
            .map(|c| c.header.len())
            .max()
            .unwrap_or_default();
        for c in fields {
            writeln!(writer, "{:<width$}  {}", c.header, cell(item, c.field))?;
        }
        Ok(())
    }

    /// Write a confirmation line, or the raw response in JSON mode.
    pub fn write_message<W: Write>(
        &self,
        writer: &mut W,
        message: &str,
        raw: &Value,
    ) -> Result<()> {
        if self.json {
            return write_json(writer, raw);
        }

        writeln!(writer, "{message}")?;
        Ok(())
    }
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, row: &[String], widths: &[usize]) -> Result<()> {
    let line = row
        .iter()
        .zip(widths)
        .map(|(v, width)| format!("{v:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "{}", line.trim_end())?;
    Ok(())
}

/// Render one field for a table cell.
///
/// Timestamps (`*At` fields in epoch milliseconds) are shown as RFC 3339.
fn cell(item: &Value, field: &str) -> String {
    match item.get(field) {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(v)) => v.clone(),
        Some(Value::Number(v)) if field.ends_with("At") => v
            .as_i64()
            .and_then(format_epoch_millis)
            .unwrap_or_else(|| v.to_string()),
        Some(v) => v.to_string(),
    }
}
