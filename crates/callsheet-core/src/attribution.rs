//! Operator attribution: mine operator introductions for "analyst → institution" pairs.
//!
//! Operators introduce each questioner ("Our next question comes from Jane Doe with
//! Goldman Sachs"), which is the most reliable institution signal a transcript carries.
//! The surface forms vary, so extraction runs an ordered list of patterns over every
//! operator turn; each pattern is plain data and can be exercised on its own.

use crate::config::AttributionPolicy;
use crate::normalize::normalize_person;
use crate::roles;
use crate::transcript::Turn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

/// Raw analyst display name → institution string (uncleaned of table normalisation).
pub type AttributionMap = BTreeMap<String, String>;

/// Capitalised name tokens, one to four of them.
const NAME: &str = r"\p{Lu}[\p{L}'’\-]*\.?(?:\s+\p{Lu}[\p{L}'’\-]*\.?){0,3}";
/// At least two capitalised tokens; used where nothing else anchors the name.
const FULL_NAME: &str = r"\p{Lu}[\p{L}'’\-]*\.?(?:\s+\p{Lu}[\p{L}'’\-]*\.?){1,3}";
/// Institution runs to the next sentence punctuation; dotted initials ("J.P.") are allowed.
const INSTITUTION: &str = r"(?:\p{Lu}\.)+(?:\s*[^.,;!?\n]+)?|[^.,;!?\n]+";

/// One named attribution pattern. `regex` must define `name` and `institution` groups.
pub struct AttributionPattern {
    pub label: &'static str,
    pub regex: Regex,
}

impl AttributionPattern {
    fn new(label: &'static str, pattern: String) -> Self {
        Self {
            label,
            regex: Regex::new(&pattern).expect("attribution pattern"),
        }
    }

    /// Every cleaned (name, institution) pair this pattern finds in `text`, in order.
    pub fn matches(&self, text: &str) -> Vec<(String, String)> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let name = clean_name(caps.name("name")?.as_str());
                let institution = clean_institution(caps.name("institution")?.as_str());
                if name.is_empty() || institution.is_empty() {
                    None
                } else {
                    Some((name, institution))
                }
            })
            .collect()
    }
}

/// Ordered pattern cascade.
pub static PATTERNS: Lazy<Vec<AttributionPattern>> = Lazy::new(|| {
    vec![
        // "Our next question comes from the line of Jane Doe with Goldman Sachs."
        // "We'll go next to Jane Doe of Evercore ISI."
        AttributionPattern::new(
            "introduction",
            format!(
                r"(?i:questions?\s+(?:comes?|is\s+coming|is)\s+from|question\s+from|(?:go|move|turn)\s+(?:next\s+|over\s+)?to|next\s+we\s+have|we\s+have)\s+(?i:(?:the\s+)?line\s+of\s+)?(?P<name>{NAME})\s+(?i:with|from|at|of)\s+(?P<institution>{INSTITUTION})"
            ),
        ),
        // "Jane Doe from Goldman Sachs", "Jane Doe with UBS"
        AttributionPattern::new(
            "name_with_institution",
            format!(
                r"(?P<name>{FULL_NAME})\s+(?i:with|from|at)\s+(?P<institution>{INSTITUTION})"
            ),
        ),
        // "... Jane Doe, Goldman Sachs." at a sentence start or after "from"
        AttributionPattern::new(
            "name_comma_institution",
            format!(
                r"(?:^|[.:!?]\s+|(?i:from)\s+)(?P<name>{FULL_NAME}),\s+(?P<institution>{INSTITUTION})"
            ),
        ),
    ]
});

static LEADING_FILLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:the\s+)?line\s+of\s+").expect("leading filler pattern"));

static TRAILING_FILLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)[\s,;:.!\-]*(?:please\s+go\s+ahead|please\s+proceed|your\s+line\s+is\s+(?:now\s+)?open|your\s+question|go\s+ahead|please)[\s,;:.!\-]*$",
    )
    .expect("trailing filler pattern")
});

fn clean_name(raw: &str) -> String {
    let name = LEADING_FILLER.replace(raw.trim(), "");
    name.trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation() && c != '.')
        .trim()
        .to_string()
}

fn clean_institution(raw: &str) -> String {
    let mut current = raw.trim().to_string();
    loop {
        let stripped = TRAILING_FILLER.replace(&current, "").to_string();
        if stripped == current {
            break;
        }
        current = stripped;
    }
    current
        .trim_end_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .trim()
        .to_string()
}

/// Build the attribution map for one transcript from its operator turns.
///
/// Keys are unique per normalised person: when the operator spells one analyst two ways
/// ("Mike Ng", later "Michael Ng"), the policy picks between them in operator-turn order
/// and only the surviving spelling is kept.
pub fn extract_attributions(turns: &[Turn], policy: AttributionPolicy) -> AttributionMap {
    let mut map = AttributionMap::new();
    for turn in turns.iter().filter(|t| roles::is_turn_operator(t)) {
        for pattern in PATTERNS.iter() {
            for (name, institution) in pattern.matches(&turn.content) {
                debug!(pattern = pattern.label, %name, %institution, "operator attribution");
                let person = normalize_person(&name);
                let seen = map.keys().any(|k| normalize_person(k) == person);
                match policy {
                    AttributionPolicy::LastMatchWins => {
                        if seen {
                            map.retain(|k, _| normalize_person(k) != person);
                        }
                        map.insert(name, institution);
                    }
                    AttributionPolicy::FirstMatchWins => {
                        if !seen {
                            map.insert(name, institution);
                        }
                    }
                }
            }
        }
    }
    map
}

/// Request-wide map: later transcripts overwrite earlier ones on a name collision.
pub fn merge_attribution_maps<'a, I>(maps: I) -> AttributionMap
where
    I: IntoIterator<Item = &'a AttributionMap>,
{
    let mut merged = AttributionMap::new();
    for map in maps {
        merged.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(label: &str) -> &'static AttributionPattern {
        PATTERNS.iter().find(|p| p.label == label).unwrap()
    }

    fn operator(content: &str) -> Turn {
        Turn::new("Operator", "Operator", content)
    }

    #[test]
    fn introduction_with_line_of() {
        let found = pattern("introduction").matches(
            "Our first question comes from the line of Keith Weiss with Morgan Stanley. Please go ahead.",
        );
        assert_eq!(found, vec![("Keith Weiss".to_string(), "Morgan Stanley".to_string())]);
    }

    #[test]
    fn introduction_strips_trailing_filler() {
        let found = pattern("introduction")
            .matches("Our next question is from Mark Murphy of J.P. Morgan, please go ahead");
        assert_eq!(found, vec![("Mark Murphy".to_string(), "J.P. Morgan".to_string())]);

        let found = pattern("introduction")
            .matches("Next, we'll go to Brent Thill with Jefferies please go ahead");
        assert_eq!(found, vec![("Brent Thill".to_string(), "Jefferies".to_string())]);
    }

    #[test]
    fn bare_name_forms() {
        let found = pattern("name_with_institution").matches("And that is Jane Doe from Goldman Sachs.");
        assert_eq!(found, vec![("Jane Doe".to_string(), "Goldman Sachs".to_string())]);

        let found = pattern("name_comma_institution").matches("Next up. Jane Doe, Goldman Sachs.");
        assert_eq!(found, vec![("Jane Doe".to_string(), "Goldman Sachs".to_string())]);
    }

    #[test]
    fn only_operator_turns_are_scanned() {
        let turns = vec![
            Turn::new("Keith Weiss", "Analyst", "This is Keith Weiss from Morgan Stanley."),
            operator("Our next question comes from Mike Ng with Goldman Sachs."),
        ];
        let map = extract_attributions(&turns, AttributionPolicy::LastMatchWins);
        assert_eq!(map.len(), 1);
        assert_eq!(map["Mike Ng"], "Goldman Sachs");
    }

    #[test]
    fn later_matches_overwrite_unless_first_wins() {
        let turns = vec![
            operator("Our next question comes from Mike Ng with Goldman Sachs."),
            operator("We have a follow-up question from Mike Ng with Goldman Sachs Research."),
        ];
        let last = extract_attributions(&turns, AttributionPolicy::LastMatchWins);
        assert_eq!(last["Mike Ng"], "Goldman Sachs Research");
        let first = extract_attributions(&turns, AttributionPolicy::FirstMatchWins);
        assert_eq!(first["Mike Ng"], "Goldman Sachs");
    }

    #[test]
    fn one_entry_per_person_in_turn_order() {
        let turns = vec![
            operator("Our next question comes from Mike Ng with Goldman Sachs."),
            operator("Our next question comes from Michael Ng with Bernstein."),
        ];
        let last = extract_attributions(&turns, AttributionPolicy::LastMatchWins);
        assert_eq!(last.len(), 1);
        assert_eq!(last["Michael Ng"], "Bernstein");
        let first = extract_attributions(&turns, AttributionPolicy::FirstMatchWins);
        assert_eq!(first.len(), 1);
        assert_eq!(first["Mike Ng"], "Goldman Sachs");

        // Reversed turn order flips the winner, independent of key sort order.
        let reversed: Vec<Turn> = turns.into_iter().rev().collect();
        let last = extract_attributions(&reversed, AttributionPolicy::LastMatchWins);
        assert_eq!(last["Mike Ng"], "Goldman Sachs");
    }

    #[test]
    fn maps_merge_last_writer_wins() {
        let mut a = AttributionMap::new();
        a.insert("Jane Doe".into(), "UBS".into());
        let mut b = AttributionMap::new();
        b.insert("Jane Doe".into(), "Barclays".into());
        b.insert("John Roe".into(), "Citi".into());
        let merged = merge_attribution_maps([&a, &b]);
        assert_eq!(merged["Jane Doe"], "Barclays");
        assert_eq!(merged.len(), 2);
    }
}
