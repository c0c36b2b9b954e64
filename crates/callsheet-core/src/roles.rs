//! Speaker role classification from free-text titles.
//!
//! All predicates lowercase the title and test substrings. Exclusions are always
//! evaluated after inclusions and win.

use crate::transcript::Turn;
use serde::{Deserialize, Serialize};

const ANALYST_KEYWORDS: &[&str] = &["analyst", "research", "equity"];

const ANALYST_EXCLUSIONS: &[&str] = &["operator", "ceo", "cfo", "investor relations"];

/// C-suite and VP/Director-level title fragments.
const EXECUTIVE_TITLES: &[&str] = &[
    "ceo",
    "chief executive officer",
    "cfo",
    "chief financial officer",
    "coo",
    "chief operating officer",
    "cto",
    "chief technology officer",
    "president",
    "vice president",
    "executive vice president",
    "senior vice president",
    "evp",
    "svp",
    "chairman",
    "chairwoman",
    "chair",
    "founder",
    "co-founder",
    "managing director",
    "director",
];

const INVESTOR_RELATIONS_TITLES: &[&str] = &[
    "investor relations",
    "head of investor relations",
    "director of investor relations",
    "director, investor relations",
    "vp investor relations",
    "vp, investor relations",
    "vp of investor relations",
    "head of ir",
    "director of ir",
    "vp of ir",
    "ir officer",
];

fn contains_any(lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| lower.contains(n))
}

/// "analyst" / "research" / "equity", unless the title also names an operator, CEO, CFO or IR role.
pub fn is_analyst(title: &str) -> bool {
    let t = title.to_lowercase();
    contains_any(&t, ANALYST_KEYWORDS) && !contains_any(&t, ANALYST_EXCLUSIONS)
}

pub fn is_operator(title: &str) -> bool {
    title.to_lowercase().contains("operator")
}

/// True for any C-suite or VP/Director-level fragment. IR staff match too; see [`is_prepared_statement_speaker`].
pub fn is_executive(title: &str) -> bool {
    contains_any(&title.to_lowercase(), EXECUTIVE_TITLES)
}

pub fn is_investor_relations(title: &str) -> bool {
    contains_any(&title.to_lowercase(), INVESTOR_RELATIONS_TITLES)
}

/// Executive for prepared-statement purposes: executive, and none of analyst, operator or IR.
pub fn is_prepared_statement_speaker(title: &str) -> bool {
    is_executive(title)
        && !is_analyst(title)
        && !is_operator(title)
        && !is_investor_relations(title)
}

/// Coarse role of a turn's speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    Analyst,
    Operator,
    Executive,
    InvestorRelations,
    Other,
}

impl SpeakerRole {
    /// Classify a turn by title. Operators are also recognised by display name when
    /// the title is blank, since providers often send `speaker: "Operator", title: ""`.
    pub fn of(turn: &Turn) -> Self {
        if is_turn_operator(turn) {
            SpeakerRole::Operator
        } else {
            Self::from_title(&turn.title)
        }
    }

    pub fn from_title(title: &str) -> Self {
        if is_operator(title) {
            SpeakerRole::Operator
        } else if is_analyst(title) {
            SpeakerRole::Analyst
        } else if is_investor_relations(title) {
            SpeakerRole::InvestorRelations
        } else if is_executive(title) {
            SpeakerRole::Executive
        } else {
            SpeakerRole::Other
        }
    }
}

/// Operator by title, or by speaker name when the title is empty.
pub fn is_turn_operator(turn: &Turn) -> bool {
    is_operator(&turn.title) || (turn.title.trim().is_empty() && is_operator(&turn.speaker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyst_keywords_with_exclusions() {
        assert!(is_analyst("Analyst"));
        assert!(is_analyst("Equity Research, Goldman Sachs"));
        assert!(!is_analyst("Research Analyst and Investor Relations Liaison"));
        assert!(!is_analyst("CFO and Head of Research"));
        assert!(!is_analyst("Conference Operator"));
        assert!(!is_analyst("Chief Executive Officer"));
    }

    #[test]
    fn executive_roster() {
        assert!(is_executive("Chairman and Chief Executive Officer"));
        assert!(is_executive("EVP, Chief Financial Officer"));
        assert!(is_executive("Managing Director"));
        assert!(!is_executive("Analyst"));
    }

    #[test]
    fn investor_relations_overrides_director() {
        let title = "Director of Investor Relations";
        assert!(is_executive(title));
        assert!(is_investor_relations(title));
        assert!(!is_prepared_statement_speaker(title));
        assert_eq!(SpeakerRole::from_title(title), SpeakerRole::InvestorRelations);
    }

    #[test]
    fn operator_by_blank_title_name() {
        let turn = Turn::new("Operator", "", "Our first question comes from...");
        assert_eq!(SpeakerRole::of(&turn), SpeakerRole::Operator);
        let turn = Turn::new("Operator Smith", "Analyst", "What?");
        assert_eq!(SpeakerRole::of(&turn), SpeakerRole::Analyst);
    }
}
