//! Tokenization helpers shared by the heuristic analyzers

use jdq_core::{Error, Result};
use regex::Regex;

/// Sentence and word statistics for a block of text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStats {
    pub sentences: usize,
    pub words: usize,
    pub syllables: usize,
    /// Words of three or more syllables
    pub complex_words: usize,
    pub long_sentences: usize,
}

impl TextStats {
    pub fn avg_sentence_length(&self) -> f64 {
        if self.sentences == 0 {
            0.0
        } else {
            self.words as f64 / self.sentences as f64
        }
    }

    pub fn syllables_per_word(&self) -> f64 {
        if self.words == 0 {
            0.0
        } else {
            self.syllables as f64 / self.words as f64
        }
    }

    pub fn complex_ratio(&self) -> f64 {
        if self.words == 0 {
            0.0
        } else {
            self.complex_words as f64 / self.words as f64
        }
    }
}

/// Splits text into sentences and words
pub struct Tokenizer {
    sentence_break: Regex,
    word: Regex,
    long_sentence_words: usize,
}

impl Tokenizer {
    pub fn new(long_sentence_words: usize) -> Result<Self> {
        let sentence_break = Regex::new(r"[.!?;]+(?:\s+|$)|\n+")
            .map_err(|e| Error::Configuration(e.to_string()))?;
        let word = Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*")
            .map_err(|e| Error::Configuration(e.to_string()))?;
        Ok(Self {
            sentence_break,
            word,
            long_sentence_words,
        })
    }

    /// Sentences with at least one word. List items count as sentences.
    pub fn sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.sentence_break
            .split(text)
            .map(|s| s.trim().trim_start_matches(['-', '*', '•']).trim())
            .filter(|s| self.word.is_match(s))
            .collect()
    }

    pub fn words<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.word.find_iter(text).map(|m| m.as_str()).collect()
    }

    pub fn stats(&self, text: &str) -> TextStats {
        let mut stats = TextStats::default();
        for sentence in self.sentences(text) {
            let words = self.words(sentence);
            stats.sentences += 1;
            stats.words += words.len();
            if words.len() > self.long_sentence_words {
                stats.long_sentences += 1;
            }
            for word in words {
                let count = syllables(word);
                stats.syllables += count;
                if count >= 3 {
                    stats.complex_words += 1;
                }
            }
        }
        stats
    }
}

/// Approximate English syllable count: vowel groups, minus a silent final e.
pub fn syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    if lower.chars().all(|c| c.is_ascii_digit()) {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'é' | 'è' | 'à' | 'â' | 'ê' | 'î' | 'ô' | 'û');
    let mut count = 0;
    let mut previous_vowel = false;
    for c in lower.chars() {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    if lower.len() > 2 && lower.ends_with('e') && !lower.ends_with("le") && count > 1 {
        count -= 1;
    }

    count.max(1)
}

/// Convert a byte offset in `text` into a character offset
pub fn char_offset(text: &str, byte_offset: usize) -> usize {
    text.get(..byte_offset)
        .map(|prefix| prefix.chars().count())
        .unwrap_or_else(|| text.chars().count())
}
