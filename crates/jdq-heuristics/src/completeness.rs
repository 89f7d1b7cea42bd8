//! Section completeness against the expected job description structure

use jdq_core::{CompletenessDetails, Section};

/// Sections with fewer words than this are considered thin
pub const THIN_SECTION_WORDS: usize = 25;

/// An expected section and the headings that satisfy it
pub struct SectionRequirement {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

pub const REQUIRED_SECTIONS: &[SectionRequirement] = &[
    SectionRequirement {
        name: "Summary",
        aliases: &["summary", "overview", "general accountability", "purpose", "about the role", "résumé"],
    },
    SectionRequirement {
        name: "Key Activities",
        aliases: &["key activities", "responsibilities", "duties", "activités principales", "responsabilités"],
    },
    SectionRequirement {
        name: "Qualifications",
        aliases: &["qualifications", "essential requirements", "skills", "skill", "education", "experience", "compétences"],
    },
    SectionRequirement {
        name: "Working Conditions",
        aliases: &["working conditions", "work environment", "effort", "conditions de travail"],
    },
    SectionRequirement {
        name: "Language and Security Requirements",
        aliases: &["language", "security", "conditions of employment", "langue", "sécurité"],
    },
];

pub fn analyze(sections: &[Section]) -> (f64, CompletenessDetails) {
    let mut details = CompletenessDetails::default();

    for requirement in REQUIRED_SECTIONS {
        let matched: Vec<&Section> = sections
            .iter()
            .filter(|s| {
                let heading = s.heading.to_lowercase();
                requirement.aliases.iter().any(|alias| heading.contains(alias))
            })
            .collect();

        if matched.is_empty() {
            details.missing_sections.push(requirement.name.to_string());
            details
                .recommendations
                .push(format!("Add a {} section", requirement.name));
            continue;
        }

        details.present_sections.push(requirement.name.to_string());
        let words: usize = matched.iter().map(|s| s.word_count()).sum();
        if words < THIN_SECTION_WORDS {
            details.thin_sections.push(requirement.name.to_string());
            details.recommendations.push(format!(
                "Expand the {} section (currently {} words)",
                requirement.name, words
            ));
        }
    }

    let total = REQUIRED_SECTIONS.len() as f64;
    let credit = details.present_sections.len() as f64 - 0.5 * details.thin_sections.len() as f64;
    let score = (credit / total * 100.0).clamp(0.0, 100.0);

    (score, details)
}
