//! Raw configuration documents.
//!
//! Stored configuration files are JSON with `//` and `/* */` comments, which
//! strict JSON parsers reject. Comments are blanked out (keeping every byte
//! offset and newline in place, so parser positions still point into the
//! original text) and the result goes through strict `serde_json`. Trailing
//! commas stay errors. Files with a `.yaml`/`.yml` extension are parsed with
//! `serde_yaml` instead.

use figment::Figment;
use figment::providers::{Format as _, Json, Yaml};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::ConfigError;

/// One configuration document to be merged into the final config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A document read from disk.
    File(PathBuf),
    /// A document supplied as text; `name` is used in error messages and
    /// decides the format by extension.
    Inline { name: String, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

fn format_for(name: &str) -> Format {
    let lower = name.to_lowercase();
    if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        Format::Yaml
    } else {
        Format::Json
    }
}

impl ConfigSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ConfigSource::File(path.into())
    }

    pub fn inline(name: impl Into<String>, text: impl Into<String>) -> Self {
        ConfigSource::Inline {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Display name of the document.
    pub fn name(&self) -> String {
        match self {
            ConfigSource::File(path) => path.display().to_string(),
            ConfigSource::Inline { name, .. } => name.clone(),
        }
    }

    /// Directory against which `add_config_files` entries are resolved.
    pub(crate) fn base_dir(&self) -> PathBuf {
        match self {
            ConfigSource::File(path) => path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            ConfigSource::Inline { .. } => PathBuf::from("."),
        }
    }

    /// Reads and parses the document.
    pub(crate) fn read(&self) -> Result<Document, ConfigError> {
        match self {
            ConfigSource::File(path) => {
                let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
                    path: path.clone(),
                    source,
                })?;
                Document::parse(&self.name(), &text)
            }
            ConfigSource::Inline { name, text } => Document::parse(name, text),
        }
    }
}

/// A parsed document: its root mapping plus the text figment merges.
#[derive(Debug, Clone)]
pub(crate) struct Document {
    pub(crate) map: Map<String, Value>,
    format: Format,
    /// Comments blanked out for JSON, verbatim for YAML.
    text: String,
}

impl Document {
    fn parse(name: &str, text: &str) -> Result<Self, ConfigError> {
        let format = format_for(name);
        let (value, text) = match format {
            Format::Json => {
                let stripped = strip_json_comments(name, text)?;
                (parse_json(name, &stripped)?, stripped)
            }
            Format::Yaml => (parse_yaml(name, text)?, text.to_string()),
        };
        Ok(Self {
            map: root_mapping(name, value)?,
            format,
            text,
        })
    }

    /// Layers this document over everything merged so far.
    pub(crate) fn merge_into(&self, figment: Figment) -> Figment {
        match self.format {
            Format::Json => figment.merge(Json::string(&self.text)),
            Format::Yaml => figment.merge(Yaml::string(&self.text)),
        }
    }
}

/// Parses a document, choosing the syntax from the document name.
pub fn parse_document(name: &str, text: &str) -> Result<Map<String, Value>, ConfigError> {
    Document::parse(name, text).map(|document| document.map)
}

fn root_mapping(name: &str, value: Value) -> Result<Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::MalformedDocument {
            document: name.to_string(),
            line: 1,
            column: 1,
            message: format!("document root must be a mapping, found {}", kind_of(&other)),
        }),
    }
}

fn strip_json_comments(name: &str, text: &str) -> Result<String, ConfigError> {
    strip_comments(text).map_err(|(line, column)| ConfigError::MalformedDocument {
        document: name.to_string(),
        line,
        column,
        message: "unterminated block comment".to_string(),
    })
}

fn parse_json(name: &str, stripped: &str) -> Result<Value, ConfigError> {
    serde_json::from_str(stripped).map_err(|e| {
        let mut message = e.to_string();
        if let Some(idx) = message.rfind(" at line ") {
            message.truncate(idx);
        }
        ConfigError::MalformedDocument {
            document: name.to_string(),
            line: e.line(),
            column: e.column(),
            message,
        }
    })
}

fn parse_yaml(name: &str, text: &str) -> Result<Value, ConfigError> {
    serde_yaml::from_str(text).map_err(|e| {
        let (line, column) = e
            .location()
            .map(|l| (l.line(), l.column()))
            .unwrap_or((0, 0));
        ConfigError::MalformedDocument {
            document: name.to_string(),
            line,
            column,
            message: e.to_string(),
        }
    })
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// Blanks out `//` and `/* */` comments outside string literals.
///
/// Every removed byte becomes a space and newlines are kept, so the output
/// has the same length and line structure as the input. Returns the 1-based
/// (line, column) of an unterminated block comment.
pub(crate) fn strip_comments(text: &str) -> Result<String, (usize, usize)> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut line = 1;
    let mut column = 1;

    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            advance(c, &mut line, &mut column);
            continue;
        }

        match (c, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
                advance(c, &mut line, &mut column);
            }
            ('/', Some('/')) => {
                blank(c, &mut out);
                advance(c, &mut line, &mut column);
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                    blank(next, &mut out);
                    advance(next, &mut line, &mut column);
                }
            }
            ('/', Some('*')) => {
                let start = (line, column);
                blank(c, &mut out);
                advance(c, &mut line, &mut column);
                if let Some(star) = chars.next() {
                    blank(star, &mut out);
                    advance(star, &mut line, &mut column);
                }

                let mut closed = false;
                while let Some(next) = chars.next() {
                    blank(next, &mut out);
                    advance(next, &mut line, &mut column);
                    if next == '*' && chars.peek() == Some(&'/') {
                        if let Some(slash) = chars.next() {
                            blank(slash, &mut out);
                            advance(slash, &mut line, &mut column);
                        }
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(start);
                }
            }
            _ => {
                out.push(c);
                advance(c, &mut line, &mut column);
            }
        }
    }

    Ok(out)
}

fn blank(c: char, out: &mut String) {
    if c == '\n' || c == '\r' {
        out.push(c);
    } else {
        out.extend(std::iter::repeat_n(' ', c.len_utf8()));
    }
}

fn advance(c: char, line: &mut usize, column: &mut usize) {
    if c == '\n' {
        *line += 1;
        *column = 1;
    } else {
        *column += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_comment_keeps_length() {
        let text = "{\"a\": 1 // note\n}";
        let stripped = strip_comments(text).unwrap();
        assert_eq!(stripped.len(), text.len());
        assert_eq!(stripped, "{\"a\": 1        \n}");
    }

    #[test]
    fn test_strip_keeps_slashes_inside_strings() {
        let text = r#"{"url": "http://example.com/*x*/", "b": "a\"//b"}"#;
        assert_eq!(strip_comments(text).unwrap(), text);
    }

    #[test]
    fn test_strip_block_comment_across_lines() {
        let text = "{/* one\ntwo */\"a\": 1}";
        let stripped = strip_comments(text).unwrap();
        assert_eq!(stripped, "{      \n      \"a\": 1}");
    }

    #[test]
    fn test_unterminated_block_comment_position() {
        let text = "{\n  \"a\": 1 /* never closed\n}";
        assert_eq!(strip_comments(text), Err((2, 10)));
    }

    #[test]
    fn test_parse_rejects_trailing_comma() {
        let err = parse_document("trailing.json", r#"{"pairs": ["BTC/USDT",]}"#).unwrap_err();
        match err {
            ConfigError::MalformedDocument { document, line, .. } => {
                assert_eq!(document, "trailing.json");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_reports_original_line() {
        let text = "{\n  // comment\n  \"a\": 1\n  \"b\": 2\n}";
        match parse_document("lines.json", text).unwrap_err() {
            ConfigError::MalformedDocument { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_mapping_root() {
        let err = parse_document("list.json", "[1, 2]").unwrap_err();
        assert!(err.to_string().contains("document root must be a mapping"));
    }

    #[test]
    fn test_parse_yaml_by_extension() {
        let map = parse_document("override.yaml", "dry_run: false\nmax_open_trades: 2\n").unwrap();
        assert_eq!(map["dry_run"], Value::Bool(false));
        assert_eq!(map["max_open_trades"], Value::from(2));
    }

    #[test]
    fn test_merge_into_uses_stripped_text() {
        let document = Document::parse("c.json", "{\"a\": 1 // one\n}").unwrap();
        let merged: Map<String, Value> = document.merge_into(Figment::new()).extract().unwrap();
        assert_eq!(merged.get("a"), Some(&Value::from(1)));
    }

    #[test]
    fn test_base_dir_of_bare_file_name() {
        assert_eq!(ConfigSource::file("config.json").base_dir(), PathBuf::from("."));
        assert_eq!(
            ConfigSource::file("configs/config.json").base_dir(),
            PathBuf::from("configs")
        );
    }
}
