//! Delimited-file export of query results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rusqlite::types::Value;

/// Quote a field when it contains the delimiter, a quote or a line break.
pub fn escape_field(s: &str, delimiter: char) -> String {
    if s.contains(delimiter) || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Render one SQL value as a field. NULL becomes an empty field.
pub fn render_value(value: &Value, delimiter: char) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => format!("{f:?}"),
        Value::Text(s) => escape_field(s, delimiter),
        Value::Blob(b) => escape_field(&String::from_utf8_lossy(b), delimiter),
    }
}

/// Format a row as one delimited line without the terminator.
pub fn format_row(row: &[Value], delimiter: char) -> String {
    let mut line = String::new();
    for (i, value) in row.iter().enumerate() {
        if i > 0 {
            line.push(delimiter);
        }
        line.push_str(&render_value(value, delimiter));
    }
    line
}

/// Write rows to `path`, one CRLF-terminated line each, no header.
pub fn write_rows(path: &Path, rows: &[Vec<Value>], delimiter: char) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for row in rows {
        writer.write_all(format_row(row, delimiter).as_bytes())?;
        writer.write_all(b"\r\n")?;
    }
    writer.flush()
}
