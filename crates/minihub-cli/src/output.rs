//! Output formatting

use serde::Serialize;
use serde_json::{Map, Value};

/// Horizontal rule used around detail blocks
pub const RULE: &str = "═══════════════════════════════════════";

/// Output builder for formatted CLI output.
///
/// Human mode prints the message; JSON mode prints the collected fields.
pub struct Output {
    json_mode: bool,
    fields: Map<String, Value>,
    message: Option<String>,
}

impl Output {
    /// Create a new output builder
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: Map::new(),
            message: None,
        }
    }

    /// Add a string field to the output
    pub fn field(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Add a u64 field to the output
    pub fn field_u64(mut self, key: &str, value: u64) -> Self {
        self.fields.insert(key.to_string(), Value::Number(value.into()));
        self
    }

    /// Add any serializable value; values that fail to serialize become `null`
    pub fn field_value(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Set the human-readable message
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Rendered text for the current mode
    pub fn render(&self) -> String {
        if self.json_mode {
            serde_json::to_string_pretty(&self.fields).unwrap_or_default()
        } else {
            self.message.clone().unwrap_or_default()
        }
    }

    /// Print the output
    pub fn print(self) {
        println!("{}", self.render());
    }
}

/// Accumulates report lines
#[derive(Debug, Default)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    /// Append an aligned `label: value` line
    pub fn kv(&mut self, label: &str, value: impl std::fmt::Display) -> &mut Self {
        self.lines.push(format!("{:<22}{}", format!("{}:", label), value));
        self
    }

    /// Append an indented `label: value` line for list entries
    pub fn item(&mut self, label: &str, value: impl std::fmt::Display) -> &mut Self {
        self.lines.push(format!("   {}: {}", label, value));
        self
    }

    /// Append an empty line
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Joined text
    pub fn finish(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_modes() {
        let human = Output::new(false).field("a", "b").message("hello");
        assert_eq!(human.render(), "hello");

        let json = Output::new(true).field("a", "b").field_u64("n", 3).message("hello");
        let parsed: Value = serde_json::from_str(&json.render()).unwrap();
        assert_eq!(parsed["a"], "b");
        assert_eq!(parsed["n"], 3);
    }

    #[test]
    fn test_report_alignment() {
        let mut report = Report::new();
        report.kv("Total jobs", 10).item("ID", "0x1");
        let text = report.finish();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("{:<22}10", "Total jobs:"));
        assert_eq!(lines[1], "   ID: 0x1");
    }
}
