//! Fixed character alphabet with stable integer IDs
//!
//! IDs start at 1 in alphabet order. ID 0 is shared by padding and by every
//! character outside the alphabet; the collision lives here and nowhere else,
//! so callers only ever see [`Alphabet::id_of`] and [`Alphabet::char_of`].

use crate::error::{CoreError, Result};
use std::collections::HashMap;

/// ID used for padding and for characters outside the alphabet
pub const PAD_ID: u8 = 0;

/// Lowercase letters, digits, ASCII punctuation, then space
pub const STANDARD_CHARS: &str = concat!(
    "abcdefghijklmnopqrstuvwxyz",
    "0123456789",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
    " "
);

/// Ordered character set mapping each member to `position + 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
    ids: HashMap<char, u8>,
}

impl Alphabet {
    /// The alphabet every shipped pipeline uses (69 characters)
    pub fn standard() -> Self {
        Self::from_chars(STANDARD_CHARS).expect("standard alphabet is valid")
    }

    /// Build an alphabet from an ordered character string
    ///
    /// Rejects empty input, duplicates, uppercase letters (lookups are
    /// case-folded, so they could never match) and sets too large for `u8` IDs.
    pub fn from_chars(chars: &str) -> Result<Self> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.is_empty() {
            return Err(CoreError::config("alphabet must not be empty"));
        }
        if chars.len() >= u8::MAX as usize {
            return Err(CoreError::config(format!(
                "alphabet has {} characters; at most {} fit in a byte ID",
                chars.len(),
                u8::MAX - 1
            )));
        }

        let mut ids = HashMap::with_capacity(chars.len());
        for (i, &ch) in chars.iter().enumerate() {
            if ch.to_lowercase().ne(std::iter::once(ch)) {
                return Err(CoreError::config(format!(
                    "alphabet character {ch:?} is not lowercase"
                )));
            }
            if ids.insert(ch, (i + 1) as u8).is_some() {
                return Err(CoreError::config(format!(
                    "alphabet contains {ch:?} more than once"
                )));
            }
        }

        Ok(Self { chars, ids })
    }

    /// Number of characters (excluding the pad/unknown slot)
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false for a constructed alphabet
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of distinct IDs including the pad/unknown slot
    pub fn vocab_size(&self) -> usize {
        self.chars.len() + 1
    }

    /// Case-insensitive lookup; anything unknown maps to [`PAD_ID`]
    pub fn id_of(&self, ch: char) -> u8 {
        let mut lower = ch.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(folded), None) => self.ids.get(&folded).copied().unwrap_or(PAD_ID),
            _ => PAD_ID,
        }
    }

    /// Inverse lookup; `None` for [`PAD_ID`] and IDs past the end
    pub fn char_of(&self, id: u8) -> Option<char> {
        match id {
            PAD_ID => None,
            id => self.chars.get(id as usize - 1).copied(),
        }
    }

    /// The alphabet in ID order, suitable for [`Alphabet::from_chars`]
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_alphabet_layout() {
        let alphabet = Alphabet::standard();
        assert_eq!(alphabet.len(), 69);
        assert_eq!(alphabet.vocab_size(), 70);
        assert_eq!(alphabet.id_of('a'), 1);
        assert_eq!(alphabet.id_of('z'), 26);
        assert_eq!(alphabet.id_of('0'), 27);
        assert_eq!(alphabet.id_of('9'), 36);
        assert_eq!(alphabet.id_of('!'), 37);
        assert_eq!(alphabet.id_of('.'), 50);
        assert_eq!(alphabet.id_of('?'), 57);
        assert_eq!(alphabet.id_of('~'), 68);
        assert_eq!(alphabet.id_of(' '), 69);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let alphabet = Alphabet::standard();
        assert_eq!(alphabet.id_of('A'), alphabet.id_of('a'));
        assert_eq!(alphabet.id_of('Q'), alphabet.id_of('q'));
        // Kelvin sign folds to a plain 'k'
        assert_eq!(alphabet.id_of('\u{212A}'), alphabet.id_of('k'));
    }

    #[test]
    fn test_unknown_characters_map_to_pad() {
        let alphabet = Alphabet::standard();
        assert_eq!(alphabet.id_of('é'), PAD_ID);
        assert_eq!(alphabet.id_of('\t'), PAD_ID);
        assert_eq!(alphabet.id_of('日'), PAD_ID);
        // Folds to two characters, so it cannot match
        assert_eq!(alphabet.id_of('\u{0130}'), PAD_ID);
    }

    #[test]
    fn test_char_of_inverts_id_of() {
        let alphabet = Alphabet::standard();
        for ch in STANDARD_CHARS.chars() {
            assert_eq!(alphabet.char_of(alphabet.id_of(ch)), Some(ch));
        }
        assert_eq!(alphabet.char_of(PAD_ID), None);
        assert_eq!(alphabet.char_of(70), None);
        assert_eq!(alphabet.char_of(255), None);
    }

    #[test]
    fn test_from_chars_rejects_bad_input() {
        assert!(Alphabet::from_chars("").is_err());
        assert!(Alphabet::from_chars("abca").is_err());
        assert!(Alphabet::from_chars("abC").is_err());
        assert!(Alphabet::from_chars(&"x".repeat(300)).is_err());
    }

    #[test]
    fn test_as_string_round_trips() {
        let alphabet = Alphabet::standard();
        assert_eq!(alphabet.as_string(), STANDARD_CHARS);
        assert_eq!(Alphabet::from_chars(&alphabet.as_string()).unwrap(), alphabet);
    }
}
