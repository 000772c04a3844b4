//! Summaries for JSON, INI, ENV and plain text files.

use crate::core::error::SummaryError;
use crate::core::summarize::{ConfigOutline, Extracted, SummaryBody};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Nested JSON objects are walked until a key path holds this many dots.
const MAX_KEY_DEPTH: usize = 3;

static INI_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]]+)\]").expect("ini section pattern"));
static INI_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^=]+)=(.*)").expect("ini key pattern"));
static ENV_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z_][A-Z0-9_]*)=").expect("env key pattern"));

/// Newline count plus one, so a trailing newline counts as an extra (empty) line.
pub(crate) fn newline_count(content: &str) -> usize {
    content.matches('\n').count() + 1
}

/// Keeps the first `max` lines and appends "... (N more lines)" if anything was cut.
pub(crate) fn head_with_remainder(lines: &[&str], max: usize) -> Vec<String> {
    let mut out: Vec<String> = lines
        .iter()
        .take(max)
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect();
    if lines.len() > max {
        out.push(format!("... ({} more lines)", lines.len() - max));
    }
    out
}

pub(crate) fn json(content: &str) -> Result<Extracted, SummaryError> {
    let value: Value = serde_json::from_str(content)?;
    let mut keys = Vec::new();
    collect_json_keys(&value, "", &mut keys);
    Ok(Extracted {
        line_count: newline_count(content),
        body: SummaryBody::Config(ConfigOutline {
            keys,
            preview: Vec::new(),
        }),
    })
}

/// Walks objects into dotted key paths. Arrays are sampled through their first element only,
/// recorded as `prefix[0]`.
fn collect_json_keys(value: &Value, prefix: &str, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let full = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                out.push(full.clone());
                if full.matches('.').count() < MAX_KEY_DEPTH {
                    collect_json_keys(child, &full, out);
                }
            }
        }
        Value::Array(items) => {
            if let Some(first) = items.first() {
                let indexed = format!("{}[0]", prefix);
                out.push(indexed.clone());
                collect_json_keys(first, &indexed, out);
            }
        }
        _ => {}
    }
}

pub(crate) fn ini(content: &str, max_preview: usize) -> Extracted {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut keys = Vec::new();

    for raw in &lines {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(caps) = INI_SECTION.captures(line) {
            keys.push(format!("[{}]", &caps[1]));
        }
        if let Some(caps) = INI_KEY.captures(line) {
            keys.push(caps[1].trim().to_string());
        }
    }

    Extracted {
        line_count: lines.len(),
        body: SummaryBody::Config(ConfigOutline {
            keys,
            preview: head_with_remainder(&lines, max_preview),
        }),
    }
}

/// Unlike INI, the preview simply stops collecting; there is no "more lines" marker.
pub(crate) fn env(content: &str, max_preview: usize) -> Extracted {
    let mut keys = Vec::new();
    let mut preview = Vec::new();
    let mut line_count = 0;

    for raw in content.lines() {
        line_count += 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(caps) = ENV_KEY.captures(line) {
            keys.push(caps[1].to_string());
        }
        if preview.len() < max_preview {
            preview.push(line.to_string());
        }
    }

    Extracted {
        line_count,
        body: SummaryBody::Config(ConfigOutline { keys, preview }),
    }
}

pub(crate) fn text(content: &str, max_preview: usize) -> Extracted {
    let lines: Vec<&str> = content.split('\n').collect();
    Extracted {
        line_count: lines.len(),
        body: SummaryBody::Text(head_with_remainder(&lines, max_preview)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn config_body(extracted: Extracted) -> ConfigOutline {
        match extracted.body {
            SummaryBody::Config(c) => c,
            other => panic!("expected config body, got {:?}", other),
        }
    }

    #[test]
    fn json_keys_sample_first_array_element() -> Result<(), Box<dyn std::error::Error>> {
        let outline = config_body(json(r#"{"a": {"b": 1}, "c": [1, 2]}"#)?);
        let keys: BTreeSet<_> = outline.keys.iter().map(String::as_str).collect();
        let expected: BTreeSet<_> = ["a", "a.b", "c", "c[0]"].into_iter().collect();
        assert_eq!(keys, expected);
        Ok(())
    }

    #[test]
    fn json_depth_is_capped() -> Result<(), Box<dyn std::error::Error>> {
        let outline = config_body(json(r#"{"a":{"b":{"c":{"d":{"e":1}}}}}"#)?);
        assert_eq!(outline.keys, vec!["a", "a.b", "a.b.c", "a.b.c.d"]);
        Ok(())
    }

    #[test]
    fn json_objects_inside_arrays() -> Result<(), Box<dyn std::error::Error>> {
        let outline = config_body(json(r#"{"items": [{"id": 1}, {"other": 2}], "empty": []}"#)?);
        assert_eq!(outline.keys, vec!["empty", "items", "items[0]", "items[0].id"]);
        Ok(())
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = json("{\"a\": ").err();
        assert!(matches!(err, Some(SummaryError::Parse(_))));
        assert!(
            err.map(|e| e.to_string().starts_with("Invalid JSON"))
                .unwrap_or(false)
        );
    }

    #[test]
    fn ini_sections_keys_and_comments() {
        let src = "; comment\n[server]\nhost = localhost\n# port=1\nport=8080\n\n[db]\nurl=x=y\n";
        let extracted = ini(src, 40);
        assert_eq!(extracted.line_count, 9);
        let outline = config_body(extracted);
        assert_eq!(outline.keys, vec!["[server]", "host", "port", "[db]", "url"]);
        assert_eq!(outline.preview.len(), 9);
    }

    #[test]
    fn ini_preview_collapses_tail() {
        let src = (0..45).map(|i| format!("k{}=v", i)).collect::<Vec<_>>().join("\n");
        let outline = config_body(ini(&src, 40));
        assert_eq!(outline.keys.len(), 45);
        assert_eq!(outline.preview.len(), 41);
        assert_eq!(outline.preview[40], "... (5 more lines)");
    }

    #[test]
    fn env_keys_and_bounded_preview() {
        let mut src = String::from("# secrets\nDATABASE_URL=postgres://x\nlower=ignored\n\n");
        for i in 0..40 {
            src.push_str(&format!("VAR_{}=1\n", i));
        }
        let extracted = env(&src, 30);
        assert_eq!(extracted.line_count, 44);
        let outline = config_body(extracted);
        assert_eq!(outline.keys.len(), 41);
        assert_eq!(outline.keys[0], "DATABASE_URL");
        assert_eq!(outline.preview.len(), 30);
        assert_eq!(outline.preview[1], "lower=ignored");
        assert!(!outline.preview.iter().any(|l| l.starts_with("...")));
    }

    #[test]
    fn text_preview_marks_remaining_lines() {
        let src = (0..60).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let extracted = text(&src, 50);
        assert_eq!(extracted.line_count, 60);
        match extracted.body {
            SummaryBody::Text(lines) => {
                assert_eq!(lines.len(), 51);
                assert_eq!(lines[49], "49");
                assert_eq!(lines[50], "... (10 more lines)");
            }
            other => panic!("expected text body, got {:?}", other),
        }
    }
}
