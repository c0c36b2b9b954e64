//! Canonical institution and person names.
//!
//! Both tables are process-wide constants; nothing here mutates at runtime.

use crate::roles;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Company value for "no institution signal at all".
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Lowercase fragment → canonical institution. Fragments match whole words only ("citi"
/// never matches "Citizens"). First match wins, so keep fragments mutually distinguishing
/// and make sure every canonical name matches its own row.
const INSTITUTIONS: &[(&str, &str)] = &[
    ("jpmorgan", "JPMorgan Chase"),
    ("jp morgan", "JPMorgan Chase"),
    ("j.p. morgan", "JPMorgan Chase"),
    ("goldman", "Goldman Sachs"),
    ("morgan stanley", "Morgan Stanley"),
    ("bank of america", "Bank of America"),
    ("bofa", "Bank of America"),
    ("merrill", "Bank of America"),
    ("citigroup", "Citigroup"),
    ("citi", "Citigroup"),
    ("wells fargo", "Wells Fargo"),
    ("barclays", "Barclays"),
    ("credit suisse", "Credit Suisse"),
    ("deutsche", "Deutsche Bank"),
    ("ubs", "UBS"),
    ("evercore", "Evercore ISI"),
    ("bernstein", "Bernstein"),
    ("jefferies", "Jefferies"),
    ("raymond james", "Raymond James"),
    ("piper sandler", "Piper Sandler"),
    ("rbc", "RBC Capital Markets"),
    ("cowen", "TD Cowen"),
    ("oppenheimer", "Oppenheimer"),
    ("mizuho", "Mizuho"),
    ("keybanc", "KeyBanc Capital Markets"),
];

/// Common nickname → formal first name (lowercase both sides).
static NICKNAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("mike", "michael"),
        ("mick", "michael"),
        ("bob", "robert"),
        ("bobby", "robert"),
        ("rob", "robert"),
        ("robbie", "robert"),
        ("bill", "william"),
        ("billy", "william"),
        ("will", "william"),
        ("jim", "james"),
        ("jimmy", "james"),
        ("joe", "joseph"),
        ("joey", "joseph"),
        ("tom", "thomas"),
        ("tommy", "thomas"),
        ("tony", "anthony"),
        ("dave", "david"),
        ("dan", "daniel"),
        ("danny", "daniel"),
        ("chris", "christopher"),
        ("matt", "matthew"),
        ("steve", "steven"),
        ("rick", "richard"),
        ("rich", "richard"),
        ("dick", "richard"),
        ("ben", "benjamin"),
        ("sam", "samuel"),
        ("nick", "nicholas"),
        ("andy", "andrew"),
        ("drew", "andrew"),
        ("ed", "edward"),
        ("ted", "edward"),
        ("greg", "gregory"),
        ("jeff", "jeffrey"),
        ("jon", "jonathan"),
        ("josh", "joshua"),
        ("ken", "kenneth"),
        ("tim", "timothy"),
        ("pat", "patrick"),
        ("pete", "peter"),
        ("ron", "ronald"),
        ("ray", "raymond"),
        ("charlie", "charles"),
        ("chuck", "charles"),
        ("alex", "alexander"),
        ("fred", "frederick"),
        ("larry", "lawrence"),
        ("liz", "elizabeth"),
        ("beth", "elizabeth"),
        ("kate", "katherine"),
        ("katie", "katherine"),
        ("jen", "jennifer"),
        ("jenny", "jennifer"),
        ("sue", "susan"),
    ]
    .into_iter()
    .collect()
});

/// Title segment separators: "Analyst, Goldman Sachs", "Goldman Sachs - Analyst", "Analyst at UBS", "Analyst | BofA".
static TITLE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),|\s+[-–—]\s+|\||\s+at\s+").expect("title separator pattern"));

/// Word-bounded matchers compiled from [`INSTITUTIONS`], in table order.
static INSTITUTION_MATCHERS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    INSTITUTIONS
        .iter()
        .map(|(fragment, canonical)| {
            let re = Regex::new(&format!(r"\b{}\b", regex::escape(fragment)))
                .expect("institution fragment pattern");
            (re, *canonical)
        })
        .collect()
});

/// A title segment that opens with one of these describes a role ("Research Analyst").
static ROLE_LEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:analyst|research|equity|managing director|director|vice president|vp|md|associate|partner|principal|senior|head of|strategist)\b",
    )
    .expect("role lead pattern")
});

/// A title segment that closes with one of these also describes a role ("Software Analyst").
/// "Research" is absent, so "Melius Research" stays a firm.
static ROLE_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:analyst|strategist|director|associate|partner|president|vp|md)$")
        .expect("role tail pattern")
});

fn is_role_segment(segment: &str) -> bool {
    ROLE_LEAD.is_match(segment) || ROLE_TAIL.is_match(segment)
}

fn known_institution(lower: &str) -> Option<&'static str> {
    INSTITUTION_MATCHERS
        .iter()
        .find(|(re, _)| re.is_match(lower))
        .map(|(_, canonical)| *canonical)
}

/// Map free-text institution to its canonical name. Unmatched input comes back trimmed
/// but otherwise unmodified; only an empty input becomes [`UNKNOWN_COMPANY`].
pub fn normalize_company(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN_COMPANY.to_string();
    }
    known_institution(&trimmed.to_lowercase())
        .map(str::to_string)
        .unwrap_or_else(|| trimmed.to_string())
}

/// Institution embedded in a speaker title, or [`UNKNOWN_COMPANY`].
///
/// A known institution anywhere in the title wins. Otherwise the first separator-delimited
/// segment that names no role is taken; a bare role ("Analyst") yields Unknown.
pub fn company_from_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return UNKNOWN_COMPANY.to_string();
    }
    if let Some(canonical) = known_institution(&trimmed.to_lowercase()) {
        return canonical.to_string();
    }
    let segments: Vec<&str> = TITLE_SEPARATORS.split(trimmed).map(str::trim).collect();
    if segments.len() < 2 {
        return UNKNOWN_COMPANY.to_string();
    }
    segments
        .into_iter()
        .find(|seg| {
            !seg.is_empty()
                && !is_role_segment(seg)
                && !roles::is_executive(seg)
                && !roles::is_operator(seg)
        })
        .map(normalize_company)
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}

/// Canonical "First Last" person name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    /// Split on whitespace; first token is the first name, last token the last name.
    ///
    /// Middle names and initials are dropped, so "John A. Smith" and "John B. Smith"
    /// collapse into one identity. Known limitation.
    pub fn parse(display_name: &str) -> Self {
        let tokens: Vec<&str> = display_name.split_whitespace().collect();
        let (first, last) = match tokens.as_slice() {
            [] => ("", ""),
            [only] => (*only, ""),
            [first, .., last] => (*first, *last),
        };
        let first_lower = first.to_lowercase();
        let first = NICKNAMES
            .get(first_lower.as_str())
            .map(|formal| formal.to_string())
            .unwrap_or(first_lower);
        Self {
            first: capitalize(&first),
            last: capitalize(last),
        }
    }

    pub fn canonical(&self) -> String {
        match (self.first.is_empty(), self.last.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.first.clone(),
            (true, false) => self.last.clone(),
            (false, false) => format!("{} {}", self.first, self.last),
        }
    }
}

/// Canonical form of a display name: nickname expanded, both tokens capitalised.
pub fn normalize_person(display_name: &str) -> String {
    PersonName::parse(display_name).canonical()
}

/// Upper-case the first character, lower-case the rest.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_institutions_collapse() {
        assert_eq!(normalize_company("J.P. Morgan Securities"), "JPMorgan Chase");
        assert_eq!(normalize_company("Citi"), "Citigroup");
        assert_eq!(normalize_company("BofA Securities"), "Bank of America");
        assert_eq!(normalize_company("Goldman Sachs & Co."), "Goldman Sachs");
        assert_eq!(normalize_company("Citi Research"), "Citigroup");
    }

    #[test]
    fn fragments_match_whole_words_only() {
        assert_eq!(normalize_company("Citizens JMP"), "Citizens JMP");
        assert_eq!(company_from_title("Analyst, Citizens JMP"), "Citizens JMP");
        assert_eq!(normalize_company("Subsea Capital"), "Subsea Capital");
    }

    #[test]
    fn canonical_names_are_fixed_points() {
        for (_, canonical) in INSTITUTIONS {
            assert_eq!(normalize_company(canonical), *canonical);
        }
    }

    #[test]
    fn unknown_institution_passes_through() {
        assert_eq!(normalize_company(" Loop Capital "), "Loop Capital");
        assert_eq!(normalize_company(""), UNKNOWN_COMPANY);
    }

    #[test]
    fn title_company_extraction() {
        assert_eq!(company_from_title("Analyst"), UNKNOWN_COMPANY);
        assert_eq!(company_from_title("Analyst, Goldman Sachs"), "Goldman Sachs");
        assert_eq!(company_from_title("Loop Capital - Equity Analyst"), "Loop Capital");
        assert_eq!(company_from_title("Research Analyst at Melius Research"), "Melius Research");
        assert_eq!(company_from_title("Software Analyst, Wolfe Research"), "Wolfe Research");
        assert_eq!(company_from_title("Equity Research, Senior Analyst"), UNKNOWN_COMPANY);
        assert_eq!(company_from_title("Managing Director | Guggenheim"), "Guggenheim");
    }

    #[test]
    fn person_names_expand_nicknames() {
        assert_eq!(normalize_person("Mike Ng"), "Michael Ng");
        assert_eq!(normalize_person("bob  SMITH"), "Robert Smith");
        assert_eq!(normalize_person("Keith Weiss"), "Keith Weiss");
    }

    #[test]
    fn middle_tokens_dropped_and_idempotent() {
        assert_eq!(normalize_person("John A. Smith"), "John Smith");
        let once = normalize_person("tom van der berg");
        assert_eq!(once, "Thomas Berg");
        assert_eq!(normalize_person(&once), once);
    }

    #[test]
    fn degenerate_names() {
        assert_eq!(normalize_person(""), "");
        assert_eq!(normalize_person("operator"), "Operator");
    }
}
