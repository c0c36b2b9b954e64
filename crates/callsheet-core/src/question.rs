//! Question detection. Deliberately permissive: a missed question costs more than a kept remark.

use once_cell::sync::Lazy;
use regex::Regex;

static QUESTION_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:what|how|when|where|why|can you|could you|would you|do you|are you|will you|is there)\b",
    )
    .expect("question word pattern")
});

/// True if `text` has a literal `?` or any interrogative word/phrase on a word boundary.
pub fn has_question(text: &str) -> bool {
    text.contains('?') || QUESTION_WORDS.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_without_question_mark() {
        assert!(has_question("Can you comment on margins"));
        assert!(has_question("I was curious how the pricing held up."));
        assert!(has_question("Margins?"));
    }

    #[test]
    fn plain_statements_are_not_questions() {
        assert!(!has_question("Thank you for the update."));
        // "somehow" must not trip the word-boundary match on "how".
        assert!(!has_question("Congrats on the quarter, somehow it all worked."));
    }
}
