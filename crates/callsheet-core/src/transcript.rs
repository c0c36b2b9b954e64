//! Transcript and speaker-turn types, as supplied by the transcript provider.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fiscal quarter of an earnings call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl FromStr for Quarter {
    type Err = String;

    /// Accepts "Q1", "q1", "1" and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let digits = t.strip_prefix(['Q', 'q']).unwrap_or(t);
        match digits {
            "1" => Ok(Quarter::Q1),
            "2" => Ok(Quarter::Q2),
            "3" => Ok(Quarter::Q3),
            "4" => Ok(Quarter::Q4),
            _ => Err(format!("unknown quarter: {}", s)),
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        };
        f.write_str(s)
    }
}

impl<'de> Deserialize<'de> for Quarter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = serde_json::Value::deserialize(deserializer)?;
        let s = match v {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => return Err(serde::de::Error::custom(format!("invalid quarter: {}", other))),
        };
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One earnings-call transcript.
///
/// `content` is opaque text: either a JSON-encoded list of turns or a plain-text
/// blob using the `Name (Title): text` paragraph convention. Providers that send
/// the turn list inline (a JSON array instead of a string) are accepted too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub id: String,
    pub symbol: String,
    pub quarter: Quarter,
    pub year: i32,
    #[serde(default)]
    pub title: String,
    #[serde(deserialize_with = "content_as_text")]
    pub content: String,
}

fn content_as_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(match v {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// A single speaker turn. Order within a transcript is chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: String,
    pub title: String,
    pub content: String,
}

impl Turn {
    pub fn new(
        speaker: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}
