//! Prepared remarks: executive monologues that precede the Q&A session.

use crate::records::{PreparedStatementRecord, Provenance};
use crate::roles::{self, SpeakerRole};
use crate::transcript::{Transcript, Turn};

/// Operator phrasing that opens (or continues) the question session.
const QA_SESSION_PHRASES: &[&str] = &[
    "question",
    "next question",
    "first question",
    "our next caller",
];

/// Index of the first Q&A turn: an analyst speaking, or the operator opening questions.
/// `turns.len()` when there is none, so every turn counts as prepared.
pub fn qa_boundary(turns: &[Turn]) -> usize {
    turns
        .iter()
        .position(|turn| match SpeakerRole::of(turn) {
            SpeakerRole::Analyst => true,
            SpeakerRole::Operator => {
                let content = turn.content.to_lowercase();
                QA_SESSION_PHRASES.iter().any(|p| content.contains(p))
            }
            _ => false,
        })
        .unwrap_or(turns.len())
}

/// Executive turns before the boundary whose trimmed text is longer than `min_chars`.
pub fn extract_prepared_statements(
    transcript: &Transcript,
    turns: &[Turn],
    min_chars: usize,
) -> Vec<PreparedStatementRecord> {
    let boundary = qa_boundary(turns);
    let provenance = Provenance::from(transcript);
    turns[..boundary]
        .iter()
        .filter(|turn| !roles::is_turn_operator(turn))
        .filter(|turn| roles::is_prepared_statement_speaker(&turn.title))
        .filter(|turn| turn.content.trim().chars().count() > min_chars)
        .map(|turn| PreparedStatementRecord {
            speaker_name: turn.speaker.clone(),
            speaker_title: turn.title.clone(),
            statement: turn.content.clone(),
            provenance: provenance.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Quarter;

    fn transcript() -> Transcript {
        Transcript {
            id: "aapl-2024-q4".into(),
            symbol: "AAPL".into(),
            quarter: Quarter::Q4,
            year: 2024,
            title: "Apple Q4 2024".into(),
            content: String::new(),
        }
    }

    fn long(prefix: &str) -> String {
        format!("{} {}", prefix, "We delivered record revenue across every geographic segment this quarter. ".repeat(3))
    }

    #[test]
    fn boundary_at_operator_question_session() {
        let turns = vec![
            Turn::new("Operator", "Operator", "Good afternoon and welcome."),
            Turn::new("Tim Cook", "CEO", long("Thanks.")),
            Turn::new("Operator", "Operator", "We will now begin the question-and-answer session."),
            Turn::new("Luca Maestri", "CFO", long("Sure.")),
        ];
        assert_eq!(qa_boundary(&turns), 2);
        let out = extract_prepared_statements(&transcript(), &turns, 100);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].speaker_name, "Tim Cook");
        assert_eq!(out[0].provenance.symbol, "AAPL");
    }

    #[test]
    fn no_boundary_means_whole_transcript() {
        let turns = vec![
            Turn::new("Tim Cook", "CEO", long("Hello.")),
            Turn::new("Luca Maestri", "Chief Financial Officer", long("Thanks Tim.")),
        ];
        assert_eq!(qa_boundary(&turns), 2);
        assert_eq!(extract_prepared_statements(&transcript(), &turns, 100).len(), 2);
    }

    #[test]
    fn ir_and_short_turns_are_excluded() {
        let turns = vec![
            Turn::new("Suhasini Chandramouli", "Director of Investor Relations", long("Welcome.")),
            Turn::new("Tim Cook", "CEO", "Thank you. I will now turn the call over to Luca."),
            Turn::new("Keith Weiss", "Analyst", "What about services?"),
        ];
        assert!(extract_prepared_statements(&transcript(), &turns, 100).is_empty());
    }
}
