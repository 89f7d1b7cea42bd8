//! Clarity: passive voice, sentence length and jargon

use jdq_core::{ClarityDetails, Error, Result};
use regex::Regex;

use crate::text::Tokenizer;

const JARGON: &[&str] = &[
    "leverage",
    "synergy",
    "synergies",
    "utilize",
    "utilise",
    "facilitate",
    "paradigm",
    "going forward",
    "best-in-class",
    "value-add",
    "bandwidth",
    "deliverables",
    "operationalize",
    "incentivize",
    "action items",
    "circle back",
];

pub struct ClarityAnalyzer {
    passive: Regex,
    jargon: Vec<(&'static str, Regex)>,
}

impl ClarityAnalyzer {
    pub fn new() -> Result<Self> {
        let passive = Regex::new(r"(?i)\b(?:am|is|are|was|were|be|been|being)\s+(?:\w+ed|\w+en)\b")
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let jargon = JARGON
            .iter()
            .filter_map(|term| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term)))
                    .ok()
                    .map(|re| (*term, re))
            })
            .collect();

        Ok(Self { passive, jargon })
    }

    pub fn analyze(&self, tokenizer: &Tokenizer, text: &str) -> (f64, ClarityDetails) {
        let stats = tokenizer.stats(text);
        if stats.sentences == 0 {
            return (
                0.0,
                ClarityDetails {
                    recommendations: vec!["Provide the job description text".to_string()],
                    ..Default::default()
                },
            );
        }

        let passive_count = self.passive.find_iter(text).count();
        let passive_voice_ratio = (passive_count as f64 / stats.sentences as f64).min(1.0);
        let long_ratio = stats.long_sentences as f64 / stats.sentences as f64;
        let jargon_terms: Vec<String> = self
            .jargon
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(term, _)| term.to_string())
            .collect();

        let mut recommendations = Vec::new();
        if passive_voice_ratio > 0.2 {
            recommendations.push("Rewrite passive sentences in the active voice".to_string());
        }
        if stats.long_sentences > 0 {
            recommendations.push(format!(
                "Split {} sentence(s) longer than 25 words",
                stats.long_sentences
            ));
        }
        if !jargon_terms.is_empty() {
            recommendations.push(format!(
                "Replace jargon with plain language: {}",
                jargon_terms.join(", ")
            ));
        }

        let penalty = passive_voice_ratio * 40.0 + long_ratio * 40.0 + jargon_terms.len() as f64 * 4.0;
        let score = (100.0 - penalty).clamp(0.0, 100.0);

        (
            score,
            ClarityDetails {
                passive_voice_ratio,
                long_sentences: stats.long_sentences,
                jargon_terms,
                recommendations,
            },
        )
    }
}
