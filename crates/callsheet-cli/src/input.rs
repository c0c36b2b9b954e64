//! Transcript loading: a JSON file (one transcript or an array), or a directory of them.

use callsheet_core::{CallsheetError, CallsheetResult, Transcript};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Parse one file's JSON: a transcript object or an array of them.
pub fn parse_transcript_file(content: &str) -> CallsheetResult<Vec<Transcript>> {
    let value: Value = serde_json::from_str(content)?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(CallsheetError::from))
            .collect(),
        obj @ Value::Object(_) => Ok(vec![serde_json::from_value(obj)?]),
        other => Err(CallsheetError::Input(format!(
            "expected a transcript object or array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Load transcripts from `path`.
///
/// A file must parse. A directory is walked recursively for `*.json` in path order;
/// files that do not parse are logged and skipped so one bad download doesn't sink the batch.
pub fn load_transcripts(path: &Path) -> CallsheetResult<Vec<Transcript>> {
    if path.is_file() {
        let content = fs::read_to_string(path)?;
        return parse_transcript_file(&content);
    }
    if !path.is_dir() {
        return Err(CallsheetError::Input(format!(
            "no such file or directory: {}",
            path.display()
        )));
    }

    let mut transcripts = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        let p = entry.path();
        let is_json = p
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if !entry.file_type().is_file() || !is_json {
            continue;
        }
        match fs::read_to_string(p)
            .map_err(CallsheetError::from)
            .and_then(|c| parse_transcript_file(&c))
        {
            Ok(found) => {
                debug!("loaded {} transcript(s) from {}", found.len(), p.display());
                transcripts.extend(found);
            }
            Err(e) => warn!("skipping {}: {}", p.display(), e),
        }
    }
    Ok(transcripts)
}

/// Keep only transcripts for `symbol` (case-insensitive). `None` keeps everything.
pub fn filter_by_symbol(transcripts: Vec<Transcript>, symbol: Option<&str>) -> Vec<Transcript> {
    match symbol {
        Some(sym) => transcripts
            .into_iter()
            .filter(|t| t.symbol.trim().eq_ignore_ascii_case(sym.trim()))
            .collect(),
        None => transcripts,
    }
}
