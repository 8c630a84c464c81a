use serde_json::Value;

use crate::{CoreError, CoreResult};

/// One exported column: the row key to read and the header label to print.
#[derive(Debug, Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
}

impl Column {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Render rows as semicolon-delimited, quote-escaped CSV with a header row.
///
/// Field values arrive pre-formatted (currency "1.234,56", dates
/// "DD/MM/YYYY", booleans "Sim"/"Não"); this function only projects and
/// escapes. Zero rows produce header-only output.
pub fn write_csv(columns: &[Column], rows: &[Value]) -> CoreResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer
        .write_record(columns.iter().map(|c| c.label.as_str()))
        .map_err(|e| CoreError::InternalError(format!("CSV header: {}", e)))?;

    for row in rows {
        let record: Vec<String> = columns.iter().map(|c| cell_text(row, &c.key)).collect();
        writer
            .write_record(&record)
            .map_err(|e| CoreError::InternalError(format!("CSV row: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::InternalError(format!("CSV flush: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| CoreError::InternalError(format!("CSV encoding: {}", e)))
}

fn cell_text(row: &Value, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Collaborator that turns a column/row projection into a printable visual
/// document. PDF/image rendering itself lives outside this crate.
pub trait DocumentRenderer: Send + Sync {
    /// Render a tabular report.
    fn render_table(&self, title: &str, columns: &[Column], rows: &[Value]) -> CoreResult<Vec<u8>>;

    /// Render one per-passenger voucher from a flat, pre-formatted record.
    fn render_voucher(&self, record: &Value) -> CoreResult<Vec<u8>>;
}

/// Plain-text renderer used in tests and as a stand-in where no PDF engine is
/// wired up.
pub struct PlainTextRenderer;

impl DocumentRenderer for PlainTextRenderer {
    fn render_table(&self, title: &str, columns: &[Column], rows: &[Value]) -> CoreResult<Vec<u8>> {
        let mut out = String::new();
        out.push_str(title);
        out.push('\n');
        let labels: Vec<&str> = columns.iter().map(|c| c.label.as_str()).collect();
        out.push_str(&labels.join(" | "));
        out.push('\n');
        for row in rows {
            let cells: Vec<String> = columns.iter().map(|c| cell_text(row, &c.key)).collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }
        Ok(out.into_bytes())
    }

    fn render_voucher(&self, record: &Value) -> CoreResult<Vec<u8>> {
        let mut out = String::new();
        if let Some(map) = record.as_object() {
            for (key, value) in map {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                out.push_str(key);
                out.push_str(": ");
                out.push_str(&text);
                out.push('\n');
            }
        }
        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Nome"),
            Column::new("seat", "Poltrona"),
            Column::new("paid", "Pago"),
        ]
    }

    #[test]
    fn test_zero_rows_yields_header_only() {
        let out = write_csv(&columns(), &[]).unwrap();
        assert_eq!(out, "Nome;Poltrona;Pago\n");
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_values_are_projected_and_escaped() {
        let rows = vec![
            json!({"name": "Ana; Silva", "seat": "5", "paid": "1.234,56"}),
            json!({"name": "Bruno", "paid": "0,00"}),
        ];
        let out = write_csv(&columns(), &rows).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Nome;Poltrona;Pago"));
        // Delimiter inside a field forces quoting.
        assert_eq!(lines.next(), Some("\"Ana; Silva\";5;1.234,56"));
        // Missing keys render as empty cells.
        assert_eq!(lines.next(), Some("Bruno;;0,00"));
    }

    #[test]
    fn test_plain_text_renderer() {
        let rows = vec![json!({"name": "Ana", "seat": "5", "paid": "200,00"})];
        let bytes = PlainTextRenderer
            .render_table("Lista de passageiros", &columns(), &rows)
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Lista de passageiros\n"));
        assert!(text.contains("Ana | 5 | 200,00"));
    }
}
