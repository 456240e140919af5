//! Block text cleanup.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Normalizes the text of a single block.
pub struct TextCleaner {
    edge_regex: Regex,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl TextCleaner {
    /// Create a new cleaner.
    pub fn new() -> Self {
        Self {
            edge_regex: Regex::new(r"^[\W_]+|[\W_]+$").unwrap(),
            ligature_map: vec![
                ("\u{FB00}", "ff"),  // ﬀ
                ("\u{FB01}", "fi"),  // ﬁ
                ("\u{FB02}", "fl"),  // ﬂ
                ("\u{FB03}", "ffi"), // ﬃ
                ("\u{FB04}", "ffl"), // ﬄ
                ("\u{FB05}", "st"),  // ﬅ
                ("\u{FB06}", "st"),  // ﬆ
            ],
        }
    }

    /// Clean a block's text.
    ///
    /// Returns `None` when nothing containing a letter remains.
    pub fn clean(&self, text: &str) -> Option<String> {
        let mut result: String = text.nfc().collect();

        for (ligature, replacement) in &self.ligature_map {
            result = result.replace(ligature, replacement);
        }
        result = result.replace('\u{FFFD}', "");

        result = result.split_whitespace().collect::<Vec<_>>().join(" ");
        result = self.edge_regex.replace_all(&result, "").to_string();

        if result.chars().any(char::is_alphabetic) {
            Some(result)
        } else {
            None
        }
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}
