use super::{HashRecord, OutputFormatter, render_digest};
use anyhow::Result;
use serde_json::{Value, json};

/// Text formatter producing `sha1sum`-compatible lines
pub struct TextFormatter {
    uppercase: bool,
}

impl TextFormatter {
    pub fn new(uppercase: bool) -> Self {
        Self { uppercase }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_single(&self, record: &HashRecord) -> Result<String> {
        Ok(format!(
            "{}  {}",
            render_digest(&record.digest, self.uppercase),
            record.name
        ))
    }
}

fn to_json(record: &HashRecord, uppercase: bool) -> Value {
    json!({
        "name": record.name,
        "sha1": render_digest(&record.digest, uppercase),
        "size": record.size,
    })
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
    uppercase: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool, uppercase: bool) -> Self {
        Self { pretty, uppercase }
    }

    fn render(&self, value: &Value) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_single(&self, record: &HashRecord) -> Result<String> {
        self.render(&to_json(record, self.uppercase))
    }

    fn format_batch(&self, records: &[HashRecord]) -> Result<String> {
        let values: Vec<Value> = records
            .iter()
            .map(|r| to_json(r, self.uppercase))
            .collect();
        self.render(&Value::Array(values))
    }
}

/// JSON Lines formatter, one object per line
pub struct JsonLinesFormatter {
    uppercase: bool,
}

impl JsonLinesFormatter {
    pub fn new(uppercase: bool) -> Self {
        Self { uppercase }
    }
}

impl OutputFormatter for JsonLinesFormatter {
    fn format_single(&self, record: &HashRecord) -> Result<String> {
        Ok(serde_json::to_string(&to_json(record, self.uppercase))?)
    }
}
