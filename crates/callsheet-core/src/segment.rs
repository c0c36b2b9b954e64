//! Speaker segmentation: raw transcript content → ordered speaker turns.
//!
//! Two content shapes are understood:
//! - a JSON list of turn objects (optionally wrapped under `turns` / `transcript`);
//! - plain text, one `Name (Title): text` turn per blank-line-separated paragraph.
//!
//! Anything else yields no turns; a bad transcript never poisons the batch.

use crate::transcript::Turn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

const SPEAKER_KEYS: &[&str] = &["speaker", "name", "speaker_name"];
const TITLE_KEYS: &[&str] = &["title", "role", "speaker_title"];
const CONTENT_KEYS: &[&str] = &["content", "text", "speech"];
const WRAPPER_KEYS: &[&str] = &["turns", "transcript"];

/// `<name> (<title>): <text>`; the text may span lines.
static SPEAKER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*([^()\n:]+?)\s*\(([^()\n]*)\)\s*:\s*(.*?)\s*$")
        .expect("speaker line pattern")
});

/// Parse transcript content into turns. Never fails; malformed content yields an empty list.
pub fn parse_turns(content: &str) -> Vec<Turn> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => return turns_from_json(&value),
            Err(e) => {
                // Looks like JSON but isn't; fall through to the text convention.
                warn!("transcript content is not valid JSON ({}), trying plain text", e);
            }
        }
    }
    turns_from_text(trimmed)
}

fn turns_from_json(value: &Value) -> Vec<Turn> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match WRAPPER_KEYS
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array))
        {
            Some(items) => items,
            None => {
                warn!("transcript JSON object has no turn list");
                return Vec::new();
            }
        },
        _ => return Vec::new(),
    };
    items.iter().filter_map(turn_from_object).collect()
}

fn turn_from_object(item: &Value) -> Option<Turn> {
    let obj = item.as_object()?;
    let field = |keys: &[&str]| -> String {
        keys.iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string()
    };
    Some(Turn {
        speaker: field(SPEAKER_KEYS),
        title: field(TITLE_KEYS),
        content: field(CONTENT_KEYS),
    })
}

fn turns_from_text(text: &str) -> Vec<Turn> {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .filter_map(|paragraph| {
            let caps = SPEAKER_LINE.captures(paragraph)?;
            Some(Turn {
                speaker: caps[1].trim().to_string(),
                title: caps[2].trim().to_string(),
                content: caps[3].to_string(),
            })
        })
        .collect()
}
