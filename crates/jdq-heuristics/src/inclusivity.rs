//! Inclusive-language scan producing bias issues with character offsets

use jdq_core::{BiasIssue, BiasType, InclusivityDetails, Severity};
use regex::Regex;
use std::collections::HashSet;
use tracing::warn;

use crate::text::char_offset;

struct LexiconEntry {
    pattern: &'static str,
    bias_type: BiasType,
    severity: Severity,
    explanation: &'static str,
    alternatives: &'static [&'static str],
}

const LEXICON: &[LexiconEntry] = &[
    // Gender
    LexiconEntry { pattern: r"chairman", bias_type: BiasType::Gender, severity: Severity::High, explanation: "Gendered job title", alternatives: &["chair", "chairperson"] },
    LexiconEntry { pattern: r"salesman", bias_type: BiasType::Gender, severity: Severity::High, explanation: "Gendered job title", alternatives: &["salesperson", "sales representative"] },
    LexiconEntry { pattern: r"foreman", bias_type: BiasType::Gender, severity: Severity::Medium, explanation: "Gendered job title", alternatives: &["supervisor", "crew lead"] },
    LexiconEntry { pattern: r"manpower", bias_type: BiasType::Gender, severity: Severity::Medium, explanation: "Gendered collective noun", alternatives: &["workforce", "staffing"] },
    LexiconEntry { pattern: r"he or she", bias_type: BiasType::Gender, severity: Severity::Low, explanation: "Binary pronoun pair", alternatives: &["they"] },
    LexiconEntry { pattern: r"he|him|his", bias_type: BiasType::Gender, severity: Severity::Medium, explanation: "Assumes the incumbent's gender", alternatives: &["they", "the incumbent"] },
    LexiconEntry { pattern: r"guys", bias_type: BiasType::Gender, severity: Severity::Low, explanation: "Gendered group address", alternatives: &["everyone", "team"] },
    // Age
    LexiconEntry { pattern: r"young", bias_type: BiasType::Age, severity: Severity::High, explanation: "Signals an age preference", alternatives: &["motivated"] },
    LexiconEntry { pattern: r"recent graduates?", bias_type: BiasType::Age, severity: Severity::High, explanation: "Excludes experienced candidates by career stage", alternatives: &["candidates at any career stage"] },
    LexiconEntry { pattern: r"digital natives?", bias_type: BiasType::Age, severity: Severity::High, explanation: "Age-coded proxy for technical skill", alternatives: &["proficient with digital tools"] },
    LexiconEntry { pattern: r"energetic", bias_type: BiasType::Age, severity: Severity::Medium, explanation: "Often read as an age preference", alternatives: &["motivated", "engaged"] },
    LexiconEntry { pattern: r"overqualified", bias_type: BiasType::Age, severity: Severity::Medium, explanation: "Commonly used to screen out older candidates", alternatives: &[] },
    // Disability
    LexiconEntry { pattern: r"able-bodied", bias_type: BiasType::Disability, severity: Severity::Critical, explanation: "Excludes persons with disabilities", alternatives: &["able to perform the essential duties, with or without accommodation"] },
    LexiconEntry { pattern: r"must be able to (?:stand|walk|see|hear)", bias_type: BiasType::Disability, severity: Severity::High, explanation: "Describes a method rather than the essential task", alternatives: &["able to move between work sites", "able to review documents"] },
    LexiconEntry { pattern: r"crazy|insane", bias_type: BiasType::Disability, severity: Severity::Medium, explanation: "Stigmatizes mental illness", alternatives: &["intense", "demanding"] },
    LexiconEntry { pattern: r"lame", bias_type: BiasType::Disability, severity: Severity::Medium, explanation: "Ableist slang", alternatives: &["weak", "unconvincing"] },
    // Cultural
    LexiconEntry { pattern: r"native (?:english|french) speakers?", bias_type: BiasType::Cultural, severity: Severity::Critical, explanation: "Excludes candidates by national origin", alternatives: &["proficient in English", "proficient in French"] },
    LexiconEntry { pattern: r"mother tongue", bias_type: BiasType::Cultural, severity: Severity::High, explanation: "Ties language ability to origin", alternatives: &["first official language"] },
    LexiconEntry { pattern: r"culture fit", bias_type: BiasType::Cultural, severity: Severity::Medium, explanation: "Invites affinity bias", alternatives: &["values alignment", "culture add"] },
    // Gender-coded wording
    LexiconEntry { pattern: r"aggressive", bias_type: BiasType::GenderCodedMasculine, severity: Severity::Low, explanation: "Masculine-coded wording", alternatives: &["proactive"] },
    LexiconEntry { pattern: r"dominant|dominate", bias_type: BiasType::GenderCodedMasculine, severity: Severity::Low, explanation: "Masculine-coded wording", alternatives: &["leading"] },
    LexiconEntry { pattern: r"competitive", bias_type: BiasType::GenderCodedMasculine, severity: Severity::Low, explanation: "Masculine-coded wording", alternatives: &["ambitious"] },
    LexiconEntry { pattern: r"fearless", bias_type: BiasType::GenderCodedMasculine, severity: Severity::Low, explanation: "Masculine-coded wording", alternatives: &["confident"] },
    LexiconEntry { pattern: r"ninja|rockstar|rock star", bias_type: BiasType::GenderCodedMasculine, severity: Severity::Medium, explanation: "Masculine-coded slang title", alternatives: &["expert", "skilled professional"] },
    LexiconEntry { pattern: r"nurturing", bias_type: BiasType::GenderCodedFeminine, severity: Severity::Low, explanation: "Feminine-coded wording", alternatives: &["developing", "mentoring"] },
    LexiconEntry { pattern: r"gentle", bias_type: BiasType::GenderCodedFeminine, severity: Severity::Low, explanation: "Feminine-coded wording", alternatives: &["considerate"] },
    LexiconEntry { pattern: r"compassionate", bias_type: BiasType::GenderCodedFeminine, severity: Severity::Low, explanation: "Feminine-coded wording", alternatives: &["empathetic"] },
];

fn penalty(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 25.0,
        Severity::High => 15.0,
        Severity::Medium => 8.0,
        Severity::Low => 3.0,
    }
}

/// True when `outer` strictly contains `inner`'s span and is longer
fn encloses(outer: &BiasIssue, inner: &BiasIssue) -> bool {
    outer.start_index <= inner.start_index
        && inner.end_index <= outer.end_index
        && outer.end_index - outer.start_index > inner.end_index - inner.start_index
}

pub struct InclusivityAnalyzer {
    entries: Vec<(Regex, &'static LexiconEntry)>,
}

impl InclusivityAnalyzer {
    pub fn new() -> Self {
        let entries = LEXICON
            .iter()
            .filter_map(|entry| match Regex::new(&format!(r"(?i)\b(?:{})\b", entry.pattern)) {
                Ok(re) => Some((re, entry)),
                Err(e) => {
                    warn!(pattern = entry.pattern, error = %e, "Skipping invalid lexicon pattern");
                    None
                }
            })
            .collect();

        Self { entries }
    }

    /// Find flagged spans. Offsets are character offsets into `text`.
    ///
    /// A match lying inside a longer match is dropped, so "he or she" is
    /// flagged once as a pronoun pair and not again for "he".
    pub fn scan(&self, text: &str) -> Vec<BiasIssue> {
        let mut issues = Vec::new();
        for (re, entry) in &self.entries {
            for m in re.find_iter(text) {
                issues.push(BiasIssue {
                    bias_type: entry.bias_type,
                    severity: entry.severity,
                    problematic_text: m.as_str().to_string(),
                    explanation: entry.explanation.to_string(),
                    suggested_alternatives: entry.alternatives.iter().map(|a| a.to_string()).collect(),
                    start_index: char_offset(text, m.start()) as i64,
                    end_index: char_offset(text, m.end()) as i64,
                });
            }
        }
        let mut issues: Vec<BiasIssue> = issues
            .iter()
            .filter(|inner| !issues.iter().any(|outer| encloses(outer, inner)))
            .cloned()
            .collect();
        issues.sort_by(|a, b| a.start_index.cmp(&b.start_index));
        issues
    }

    pub fn analyze(&self, text: &str) -> (f64, InclusivityDetails) {
        let issues = self.scan(text);

        let masculine_coded = issues
            .iter()
            .filter(|i| i.bias_type == BiasType::GenderCodedMasculine)
            .count();
        let feminine_coded = issues
            .iter()
            .filter(|i| i.bias_type == BiasType::GenderCodedFeminine)
            .count();

        let mut by_severity: Vec<&BiasIssue> = issues.iter().collect();
        by_severity.sort_by(|a, b| b.severity.cmp(&a.severity));

        let mut seen = HashSet::new();
        let mut recommendations: Vec<String> = by_severity
            .iter()
            .filter(|i| seen.insert(i.problematic_text.to_lowercase()))
            .map(|i| match i.suggested_alternatives.first() {
                Some(alternative) => format!("Replace '{}' with '{}'", i.problematic_text, alternative),
                None => format!("Reword or remove '{}'", i.problematic_text),
            })
            .collect();

        if masculine_coded > feminine_coded + 2 {
            recommendations.push(format!(
                "Balance masculine-coded wording ({} terms) with neutral language",
                masculine_coded
            ));
        }

        let total_penalty: f64 = issues.iter().map(|i| penalty(i.severity)).sum();
        let score = (100.0 - total_penalty).clamp(0.0, 100.0);

        (
            score,
            InclusivityDetails {
                issues,
                masculine_coded,
                feminine_coded,
                recommendations,
                rejected_issues: 0,
            },
        )
    }
}

impl Default for InclusivityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
