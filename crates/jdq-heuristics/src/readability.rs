//! Readability indices

use jdq_core::{Language, ReadabilityDetails};

use crate::text::{TextStats, Tokenizer};

/// Points lost per grade level above the target
const GRADE_PENALTY: f64 = 10.0;
const MAX_AVG_SENTENCE_LENGTH: f64 = 20.0;
const MAX_COMPLEX_RATIO: f64 = 0.15;

pub fn analyze(
    tokenizer: &Tokenizer,
    text: &str,
    language: Language,
    target_grade_level: f64,
) -> (f64, ReadabilityDetails) {
    let stats = tokenizer.stats(text);
    if stats.words == 0 {
        return (
            0.0,
            ReadabilityDetails {
                target_grade_level,
                recommendations: vec!["Provide the job description text".to_string()],
                ..Default::default()
            },
        );
    }

    let grade = flesch_kincaid_grade(&stats);
    let mut details = ReadabilityDetails {
        flesch_reading_ease: flesch_reading_ease(&stats, language),
        flesch_kincaid_grade: grade,
        gunning_fog: gunning_fog(&stats),
        smog_index: smog_index(&stats),
        avg_sentence_length: stats.avg_sentence_length(),
        target_grade_level,
        recommendations: Vec::new(),
    };

    if grade > target_grade_level {
        details.recommendations.push(format!(
            "Simplify wording to reach a grade {} reading level (currently {:.1})",
            target_grade_level, grade
        ));
    }
    if details.avg_sentence_length > MAX_AVG_SENTENCE_LENGTH {
        details.recommendations.push(format!(
            "Shorten sentences to an average of {} words or fewer",
            MAX_AVG_SENTENCE_LENGTH
        ));
    }
    if stats.complex_ratio() > MAX_COMPLEX_RATIO {
        details
            .recommendations
            .push("Replace multi-syllable words with plain-language alternatives".to_string());
    }

    let score = (100.0 - GRADE_PENALTY * (grade - target_grade_level).max(0.0)).clamp(0.0, 100.0);
    (score, details)
}

/// Flesch reading ease; Kandel-Moles coefficients for French
pub fn flesch_reading_ease(stats: &TextStats, language: Language) -> f64 {
    let (base, syllable_weight) = match language {
        Language::En => (206.835, 84.6),
        Language::Fr => (207.0, 73.6),
    };
    base - 1.015 * stats.avg_sentence_length() - syllable_weight * stats.syllables_per_word()
}

pub fn flesch_kincaid_grade(stats: &TextStats) -> f64 {
    (0.39 * stats.avg_sentence_length() + 11.8 * stats.syllables_per_word() - 15.59).max(0.0)
}

pub fn gunning_fog(stats: &TextStats) -> f64 {
    0.4 * (stats.avg_sentence_length() + 100.0 * stats.complex_ratio())
}

/// SMOG grade, only meaningful with at least 30 sentences
pub fn smog_index(stats: &TextStats) -> Option<f64> {
    if stats.sentences < 30 {
        return None;
    }
    let polysyllables = stats.complex_words as f64 * (30.0 / stats.sentences as f64);
    Some(1.043 * polysyllables.sqrt() + 3.1291)
}
