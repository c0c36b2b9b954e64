//! Output writing: JSON records, per-analyst batches and a Markdown digest.

use callsheet_core::{group_by_identity, AnalystQuestionRecord, CallsheetResult, ExtractionOutput};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files written by [`write_outputs`].
#[derive(Debug, Clone, Serialize)]
pub struct OutputPaths {
    pub questions: PathBuf,
    pub prepared_statements: PathBuf,
    pub digest: PathBuf,
    /// One file per mapped identity (`First_Last_Institution.json`).
    pub analyst_batches: Vec<PathBuf>,
}

/// Markdown digest: questions grouped by symbol, then by analyst and institution.
pub fn render_digest(output: &ExtractionOutput, generated_at: DateTime<Local>) -> String {
    let mut md = format!(
        "# Analyst Questions\n\n*Generated: {}*\n\n",
        generated_at.format("%Y-%m-%d %H:%M")
    );
    let s = &output.summary;
    md.push_str(&format!(
        "{} transcript(s), {} question(s) ({} attributed, {} unknown), {} prepared statement(s).\n",
        s.transcripts,
        s.questions,
        s.attributed_questions,
        s.unknown_company_questions,
        s.prepared_statements
    ));
    if output.questions.is_empty() {
        md.push_str("\nNo analyst questions found.\n");
        return md;
    }

    let mut by_symbol: BTreeMap<&str, Vec<&AnalystQuestionRecord>> = BTreeMap::new();
    for q in &output.questions {
        by_symbol.entry(q.provenance.symbol.as_str()).or_default().push(q);
    }
    for (symbol, records) in by_symbol {
        md.push_str(&format!("\n## {}\n", symbol));
        let mut by_analyst: BTreeMap<(&str, &str), Vec<&AnalystQuestionRecord>> = BTreeMap::new();
        for r in records {
            by_analyst
                .entry((r.analyst_name.as_str(), r.analyst_company.as_str()))
                .or_default()
                .push(r);
        }
        for ((name, company), questions) in by_analyst {
            md.push_str(&format!("\n### {} ({})\n\n", name, company));
            for q in questions {
                md.push_str(&format!(
                    "- [{} {}] {}\n",
                    q.provenance.quarter,
                    q.provenance.year,
                    q.question.replace('\n', " ")
                ));
            }
        }
    }
    md
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> CallsheetResult<()> {
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Write every output under `out_dir`, creating it if needed.
pub fn write_outputs(
    out_dir: &Path,
    output: &ExtractionOutput,
    generated_at: DateTime<Local>,
) -> CallsheetResult<OutputPaths> {
    let analysts_dir = out_dir.join("analysts");
    fs::create_dir_all(&analysts_dir)?;

    let questions = out_dir.join("questions.json");
    write_json(&questions, &output.questions)?;
    let prepared_statements = out_dir.join("prepared_statements.json");
    write_json(&prepared_statements, &output.prepared_statements)?;
    let digest = out_dir.join("summary.md");
    fs::write(&digest, render_digest(output, generated_at))?;

    let mut analyst_batches = Vec::new();
    for (identity, records) in group_by_identity(&output.questions) {
        let file_stem = identity.replace(['/', '\\'], "_");
        let path = analysts_dir.join(format!("{}.json", file_stem));
        write_json(&path, &records)?;
        analyst_batches.push(path);
    }
    info!(
        "wrote {} question(s), {} analyst batch(es) to {}",
        output.questions.len(),
        analyst_batches.len(),
        out_dir.display()
    );

    Ok(OutputPaths {
        questions,
        prepared_statements,
        digest,
        analyst_batches,
    })
}
