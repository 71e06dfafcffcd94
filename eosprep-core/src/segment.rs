//! Sentence segmentation
//!
//! Labels are only as good as the boundaries the segmenter reports, so the
//! extractor takes any [`SentenceSegmenter`] and trusts it completely.
//! [`RuleSegmenter`] is a small English rule set good enough for building
//! corpora without an external tokenizer.

use std::collections::HashSet;
use std::sync::Arc;

/// Splits a paragraph into sentences
pub trait SentenceSegmenter {
    /// Ordered, non-overlapping, trimmed sentence slices of `paragraph`
    fn segment<'a>(&self, paragraph: &'a str) -> Vec<&'a str>;
}

impl<T: SentenceSegmenter + ?Sized> SentenceSegmenter for &T {
    fn segment<'a>(&self, paragraph: &'a str) -> Vec<&'a str> {
        (**self).segment(paragraph)
    }
}

impl<T: SentenceSegmenter + ?Sized> SentenceSegmenter for Box<T> {
    fn segment<'a>(&self, paragraph: &'a str) -> Vec<&'a str> {
        (**self).segment(paragraph)
    }
}

impl<T: SentenceSegmenter + ?Sized> SentenceSegmenter for Arc<T> {
    fn segment<'a>(&self, paragraph: &'a str) -> Vec<&'a str> {
        (**self).segment(paragraph)
    }
}

const TERMINATORS: [char; 3] = ['.', '!', '?'];

const CLOSERS: [char; 7] = ['"', '\'', ')', ']', '}', '\u{201D}', '\u{2019}'];

const OPENERS: [char; 7] = ['"', '\'', '(', '[', '{', '\u{201C}', '\u{2018}'];

/// Abbreviations that never end a sentence, stored lowercase without dots
const ENGLISH_ABBREVIATIONS: &[&str] = &[
    // titles
    "dr", "prof", "jr", "sr", "mr", "mrs", "ms", "rev", "fr", "gen", "col", "lt", "sgt", "capt",
    "gov", "sen", "rep", "hon", "st",
    // places
    "ave", "blvd", "rd", "ln", "apt", "bldg", "fl", "mt", "ft",
    // organizations
    "corp", "inc", "ltd", "llc", "co", "assn", "org", "dept", "univ",
    // references
    "etc", "vs", "eg", "ie", "cf", "viz", "approx", "est", "vol", "fig", "pp", "ch", "sec",
    "al",
    // dates
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "tue",
    "tues", "thu", "thurs", "fri",
];

/// Rule-based English sentence splitter
///
/// A terminator (with any trailing closing quotes or brackets) ends a
/// sentence when it is followed by whitespace or the end of the paragraph
/// and the next word does not start in lowercase. A period additionally
/// needs the next word not to start with a digit, and must not close a known
/// abbreviation, an initial (`J.`, but never the pronoun `I`) or a dotted
/// initialism (`U.S.`).
#[derive(Debug, Clone)]
pub struct RuleSegmenter {
    abbreviations: HashSet<String>,
}

impl RuleSegmenter {
    /// Segmenter with the built-in English abbreviation list
    pub fn english() -> Self {
        Self {
            abbreviations: ENGLISH_ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Add abbreviations; case and dots are ignored (`"Ph.D"` == `"phd"`)
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.abbreviations
            .extend(abbreviations.into_iter().map(|a| normalize(a.as_ref())));
        self.abbreviations.remove("");
        self
    }

    /// True if `token` (the word before a period) is a known abbreviation
    pub fn is_abbreviation(&self, token: &str) -> bool {
        let token = token.trim_start_matches(|c| OPENERS.contains(&c));
        if token.is_empty() {
            return false;
        }

        if self.abbreviations.contains(&normalize(token)) {
            return true;
        }

        let mut letters = token.chars();
        if let (Some(first), None) = (letters.next(), letters.next()) {
            // Initials such as "J." in "J. Smith"; "I" is the pronoun
            return first.is_alphabetic() && first != 'I';
        }

        // Dotted initialisms such as "U.S" or "e.g"
        token.contains('.')
            && token
                .split('.')
                .all(|part| !part.is_empty() && part.len() <= 2 && part.chars().all(char::is_alphabetic))
    }

    fn ends_sentence(&self, paragraph: &str, term_pos: usize, run: &str, rest: &str) -> bool {
        let next = rest.trim_start().chars().find(|c| !OPENERS.contains(c));
        if next.is_some_and(char::is_lowercase) {
            return false;
        }

        // Only a plain period run can close an abbreviation or precede a number
        if run.starts_with('.') && !run.contains(['!', '?']) {
            if next.is_some_and(|c| c.is_ascii_digit()) {
                return false;
            }
            let before = &paragraph[..term_pos];
            let token = before.rsplit(char::is_whitespace).next().unwrap_or(before);
            if self.is_abbreviation(token) {
                return false;
            }
        }

        true
    }
}

impl Default for RuleSegmenter {
    fn default() -> Self {
        Self::english()
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment<'a>(&self, paragraph: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = paragraph.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            if !TERMINATORS.contains(&ch) {
                continue;
            }

            // Absorb "?!", "..." and closing quotes or brackets
            let mut end = pos + ch.len_utf8();
            while let Some(&(next_pos, next)) = chars.peek() {
                if TERMINATORS.contains(&next) || CLOSERS.contains(&next) {
                    end = next_pos + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }

            let rest = &paragraph[end..];
            let at_gap = rest.chars().next().map_or(true, char::is_whitespace);
            if at_gap && self.ends_sentence(paragraph, pos, &paragraph[pos..end], rest) {
                push_trimmed(&mut sentences, &paragraph[start..end]);
                start = end;
            }
        }

        push_trimmed(&mut sentences, &paragraph[start..]);
        sentences
    }
}

fn normalize(token: &str) -> String {
    token
        .chars()
        .filter(|&c| c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece);
    }
}
