//! Presence checks for statements a posting is required to carry

use jdq_core::{ComplianceDetails, Error, Result};
use regex::Regex;

struct ComplianceCheck {
    element: &'static str,
    pattern: &'static str,
    recommendation: &'static str,
}

const CHECKS: &[ComplianceCheck] = &[
    ComplianceCheck {
        element: "Employment equity statement",
        pattern: r"employment equity|equal opportunit|diversity and inclusion|équité en matière d'emploi",
        recommendation: "Add an employment equity statement",
    },
    ComplianceCheck {
        element: "Accommodation statement",
        pattern: r"accommodat|adaptation",
        recommendation: "State that accommodation is available on request during the selection process",
    },
    ComplianceCheck {
        element: "Official language requirements",
        pattern: r"bilingual|english essential|french essential|official languages?|language (?:requirement|profile)|bilingue|langues officielles",
        recommendation: "Specify the official language requirements of the position",
    },
    ComplianceCheck {
        element: "Security clearance level",
        pattern: r"security (?:clearance|screening|level)|reliability status|\bsecret\b|cote de sécurité|fiabilité",
        recommendation: "Specify the required security clearance level",
    },
    ComplianceCheck {
        element: "Classification or salary",
        pattern: r"classification|salary|\$\s?\d|\b[A-Z]{2}-\d{2}\b|échelle salariale|salaire",
        recommendation: "State the classification or salary range",
    },
];

pub struct ComplianceAnalyzer {
    checks: Vec<(Regex, &'static ComplianceCheck)>,
}

impl ComplianceAnalyzer {
    pub fn new() -> Result<Self> {
        let checks = CHECKS
            .iter()
            .map(|check| {
                Regex::new(&format!("(?i){}", check.pattern))
                    .map(|re| (re, check))
                    .map_err(|e| Error::Configuration(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { checks })
    }

    pub fn analyze(&self, text: &str) -> (f64, ComplianceDetails) {
        let mut details = ComplianceDetails {
            checks_total: self.checks.len(),
            ..Default::default()
        };

        for (re, check) in &self.checks {
            if re.is_match(text) {
                details.checks_passed += 1;
            } else {
                details.missing_elements.push(check.element.to_string());
                details.recommendations.push(check.recommendation.to_string());
            }
        }

        let score = if details.checks_total == 0 {
            0.0
        } else {
            details.checks_passed as f64 / details.checks_total as f64 * 100.0
        };

        (score, details)
    }
}
