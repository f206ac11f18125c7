mod formatters;

pub use formatters::{JsonFormatter, JsonLinesFormatter, TextFormatter};

use anyhow::Result;
use sha1_core::Digest;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    JsonLines,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-lines" | "jsonl" => Ok(Self::JsonLines),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// One hashed input as presented to the user
#[derive(Debug, Clone)]
pub struct HashRecord {
    /// File path, `-` for standard input, or the quoted string for `sha1 string`
    pub name: String,
    pub digest: Digest,
    pub size: u64,
}

impl HashRecord {
    pub fn new(name: impl Into<String>, digest: Digest, size: u64) -> Self {
        Self {
            name: name.into(),
            digest,
            size,
        }
    }
}

/// Render a digest in the configured case
pub fn render_digest(digest: &Digest, uppercase: bool) -> String {
    if uppercase {
        digest.to_hex_upper()
    } else {
        digest.to_hex()
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format a single result
    fn format_single(&self, record: &HashRecord) -> Result<String>;

    /// Format a batch of results
    fn format_batch(&self, records: &[HashRecord]) -> Result<String> {
        let formatted: Result<Vec<String>> =
            records.iter().map(|r| self.format_single(r)).collect();

        Ok(formatted?.join("\n"))
    }
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, uppercase: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(uppercase)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true, uppercase)),
        OutputFormat::JsonLines => Box::new(JsonLinesFormatter::new(uppercase)),
    }
}
