//! End-to-end extraction for one request: transcripts in, attributed questions and
//! prepared statements out.
//!
//! Order matters: every transcript is segmented and mined for operator attributions
//! before any cross-transcript identity merge runs.

use crate::attribution::{extract_attributions, merge_attribution_maps, AttributionMap};
use crate::config::ExtractionConfig;
use crate::consolidate::consolidate;
use crate::normalize::company_from_title;
use crate::prepared::extract_prepared_statements;
use crate::question::has_question;
use crate::records::{AnalystQuestionRecord, CompanySource, PreparedStatementRecord, Provenance};
use crate::roles;
use crate::segment::parse_turns;
use crate::transcript::{Transcript, Turn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Counts for one extraction request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSummary {
    pub transcripts: usize,
    /// Transcripts whose content produced no turns.
    pub empty_transcripts: usize,
    pub turns: usize,
    pub questions: usize,
    pub attributed_questions: usize,
    pub unknown_company_questions: usize,
    pub prepared_statements: usize,
}

/// Everything one request produces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOutput {
    pub questions: Vec<AnalystQuestionRecord>,
    pub prepared_statements: Vec<PreparedStatementRecord>,
    /// Request-wide operator attributions (last transcript wins on a name collision).
    pub attributions: AttributionMap,
    pub summary: ExtractionSummary,
}

/// Candidate question records for one transcript, before any attribution.
///
/// A turn qualifies when its title classifies as analyst and (unless disabled) its
/// content reads as a question. Company starts as whatever the title carries.
pub fn question_records(
    transcript: &Transcript,
    turns: &[Turn],
    config: &ExtractionConfig,
) -> Vec<AnalystQuestionRecord> {
    let provenance = Provenance::from(transcript);
    turns
        .iter()
        .filter(|turn| roles::is_analyst(&turn.title))
        .filter(|turn| !config.require_question || has_question(&turn.content))
        .map(|turn| AnalystQuestionRecord {
            analyst_name: turn.speaker.trim().to_string(),
            analyst_title: turn.title.clone(),
            analyst_company: company_from_title(&turn.title),
            question: turn.content.trim().to_string(),
            provenance: provenance.clone(),
            company_source: CompanySource::Title,
        })
        .collect()
}

/// Run the whole pipeline over already-fetched transcripts.
pub fn extract(transcripts: &[Transcript], config: &ExtractionConfig) -> ExtractionOutput {
    let mut summary = ExtractionSummary {
        transcripts: transcripts.len(),
        ..Default::default()
    };
    let mut candidates = Vec::new();
    let mut prepared_statements = Vec::new();
    let mut maps_by_transcript: HashMap<String, AttributionMap> = HashMap::new();
    let mut map_order: Vec<String> = Vec::new();

    for transcript in transcripts {
        let turns = parse_turns(&transcript.content);
        if turns.is_empty() {
            warn!(
                transcript = %transcript.id,
                symbol = %transcript.symbol,
                "no speaker turns parsed; skipping"
            );
            summary.empty_transcripts += 1;
            continue;
        }
        summary.turns += turns.len();

        let questions = question_records(transcript, &turns, config);
        let map = extract_attributions(&turns, config.attribution_policy);
        let prepared = extract_prepared_statements(transcript, &turns, config.min_statement_chars);
        debug!(
            transcript = %transcript.id,
            turns = turns.len(),
            questions = questions.len(),
            attributions = map.len(),
            prepared = prepared.len(),
            "transcript processed"
        );

        candidates.extend(questions);
        prepared_statements.extend(prepared);
        if !maps_by_transcript.contains_key(&transcript.id) {
            map_order.push(transcript.id.clone());
        }
        // Duplicate transcript ids share one scope; their maps accumulate.
        maps_by_transcript
            .entry(transcript.id.clone())
            .or_default()
            .extend(map);
    }

    let questions = consolidate(&candidates, &maps_by_transcript);
    let attributions =
        merge_attribution_maps(map_order.iter().filter_map(|id| maps_by_transcript.get(id)));

    summary.questions = questions.len();
    summary.unknown_company_questions = questions.iter().filter(|q| !q.has_known_company()).count();
    summary.attributed_questions = summary.questions - summary.unknown_company_questions;
    summary.prepared_statements = prepared_statements.len();
    info!(
        transcripts = summary.transcripts,
        questions = summary.questions,
        attributed = summary.attributed_questions,
        prepared = summary.prepared_statements,
        "extraction complete"
    );

    ExtractionOutput {
        questions,
        prepared_statements,
        attributions,
        summary,
    }
}
