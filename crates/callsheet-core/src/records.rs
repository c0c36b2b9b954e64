//! Output records handed to export, summarisation and upload collaborators.
//!
//! Field names serialise in camelCase and are part of the export contract.

use crate::normalize::{PersonName, UNKNOWN_COMPANY};
use crate::transcript::{Quarter, Transcript};
use serde::{Deserialize, Serialize};

/// Where a record came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub transcript_id: String,
    pub symbol: String,
    pub quarter: Quarter,
    pub year: i32,
    pub transcript_title: String,
}

impl From<&Transcript> for Provenance {
    fn from(t: &Transcript) -> Self {
        Self {
            transcript_id: t.id.clone(),
            symbol: t.symbol.clone(),
            quarter: t.quarter,
            year: t.year,
            transcript_title: t.title.clone(),
        }
    }
}

/// How `analyst_company` was learned. Operator introductions outrank speaker titles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum CompanySource {
    #[default]
    Title,
    Operator,
}

/// One analyst question. Only `analyst_name` and `analyst_company` change during consolidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystQuestionRecord {
    pub analyst_name: String,
    pub analyst_title: String,
    pub analyst_company: String,
    pub question: String,
    #[serde(flatten)]
    pub provenance: Provenance,
    /// Not exported; consolidation bookkeeping only.
    #[serde(skip)]
    pub company_source: CompanySource,
}

impl AnalystQuestionRecord {
    pub fn has_known_company(&self) -> bool {
        self.analyst_company != UNKNOWN_COMPANY
    }

    /// Stable `First_Last_Institution` key used for per-analyst file naming.
    pub fn mapped_identity(&self) -> String {
        let person = PersonName::parse(&self.analyst_name);
        let institution: String = self
            .analyst_company
            .trim()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!("{}_{}_{}", person.first, person.last, institution)
    }
}

/// One executive monologue from before the Q&A. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedStatementRecord {
    pub speaker_name: String,
    pub speaker_title: String,
    pub statement: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}
