//! Presentation adapter: formats an assessment into a display view model
//!
//! Lookup tables only. Language and theme are passed in through
//! [`PresentationContext`] rather than read from ambient state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assessment::{QualityAssessment, QualityColor, QualityLevel};
use crate::dimension::Dimension;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "en" | "en-ca" | "english" => Some(Language::En),
            "fr" | "fr-ca" | "french" | "français" => Some(Language::Fr),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Explicit display context for the presentation layer
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresentationContext {
    pub language: Language,
    pub theme: Theme,
}

impl PresentationContext {
    pub fn new(language: Language, theme: Theme) -> Self {
        Self { language, theme }
    }

    pub fn dimension_name(&self, dimension: Dimension) -> &'static str {
        match (self.language, dimension) {
            (Language::En, Dimension::Readability) => "Readability",
            (Language::En, Dimension::Completeness) => "Completeness",
            (Language::En, Dimension::Clarity) => "Clarity",
            (Language::En, Dimension::Inclusivity) => "Inclusivity",
            (Language::En, Dimension::Compliance) => "Compliance",
            (Language::Fr, Dimension::Readability) => "Lisibilité",
            (Language::Fr, Dimension::Completeness) => "Exhaustivité",
            (Language::Fr, Dimension::Clarity) => "Clarté",
            (Language::Fr, Dimension::Inclusivity) => "Inclusivité",
            (Language::Fr, Dimension::Compliance) => "Conformité",
        }
    }

    pub fn level_label(&self, level: QualityLevel) -> &'static str {
        match (self.language, level) {
            (Language::En, _) => level.label(),
            (Language::Fr, QualityLevel::Excellent) => "Excellent",
            (Language::Fr, QualityLevel::Good) => "Bon",
            (Language::Fr, QualityLevel::Fair) => "Passable",
            (Language::Fr, QualityLevel::NeedsImprovement) => "À améliorer",
        }
    }

    pub fn color_hex(&self, color: QualityColor) -> &'static str {
        match (self.theme, color) {
            (Theme::Light, QualityColor::Green) => "#15803d",
            (Theme::Light, QualityColor::Blue) => "#1d4ed8",
            (Theme::Light, QualityColor::Yellow) => "#a16207",
            (Theme::Light, QualityColor::Red) => "#b91c1c",
            (Theme::Dark, QualityColor::Green) => "#4ade80",
            (Theme::Dark, QualityColor::Blue) => "#60a5fa",
            (Theme::Dark, QualityColor::Yellow) => "#facc15",
            (Theme::Dark, QualityColor::Red) => "#f87171",
        }
    }

    fn text(&self, key: Message) -> &'static str {
        match (self.language, key) {
            (Language::En, Message::NoData) => "No analysis available yet",
            (Language::Fr, Message::NoData) => "Aucune analyse disponible pour le moment",
            (Language::En, Message::Incomplete) => {
                "Incomplete analysis: some dimensions could not be computed"
            }
            (Language::Fr, Message::Incomplete) => {
                "Analyse incomplète : certaines dimensions n'ont pu être calculées"
            }
            (Language::En, Message::Analyzing) => "Analyzing content quality...",
            (Language::Fr, Message::Analyzing) => "Analyse de la qualité en cours...",
            (Language::En, Message::Failed) => "The analysis could not be completed. Try again.",
            (Language::Fr, Message::Failed) => "L'analyse n'a pas pu être effectuée. Réessayez.",
            (Language::En, Message::RetryHint) => "Save the file again to retry",
            (Language::Fr, Message::RetryHint) => "Enregistrez de nouveau le fichier pour réessayer",
            (Language::En, Message::PriorityHeading) => "Improvement priority",
            (Language::Fr, Message::PriorityHeading) => "Priorités d'amélioration",
            (Language::En, Message::RecommendationsHeading) => "Recommendations",
            (Language::Fr, Message::RecommendationsHeading) => "Recommandations",
            (Language::En, Message::FlaggedHeading) => "Flagged language",
            (Language::Fr, Message::FlaggedHeading) => "Formulations signalées",
        }
    }

    /// Status line shown while an analysis is in flight
    pub fn analyzing_message(&self) -> &'static str {
        self.text(Message::Analyzing)
    }

    /// Status line shown with the retry affordance after a failure
    pub fn failed_message(&self) -> &'static str {
        self.text(Message::Failed)
    }

    pub fn retry_hint(&self) -> &'static str {
        self.text(Message::RetryHint)
    }

    pub fn priority_heading(&self) -> &'static str {
        self.text(Message::PriorityHeading)
    }

    pub fn recommendations_heading(&self) -> &'static str {
        self.text(Message::RecommendationsHeading)
    }

    pub fn flagged_heading(&self) -> &'static str {
        self.text(Message::FlaggedHeading)
    }

    /// Note about bias issues that could not be placed in the text
    pub fn unlocated_issues(&self, count: usize) -> String {
        match self.language {
            Language::En => format!("{} issue(s) could not be located in the text", count),
            Language::Fr => format!("{} problème(s) introuvable(s) dans le texte", count),
        }
    }

    /// Header line of a finished analysis
    pub fn analysis_stamp(&self, request: impl fmt::Display, time: impl fmt::Display) -> String {
        match self.language {
            Language::En => format!("Analysis {} at {}", request, time),
            Language::Fr => format!("Analyse {} à {}", request, time),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Message {
    NoData,
    Incomplete,
    Analyzing,
    Failed,
    RetryHint,
    PriorityHeading,
    RecommendationsHeading,
    FlaggedHeading,
}

pub fn dimension_icon(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Readability => "📖",
        Dimension::Completeness => "📋",
        Dimension::Clarity => "🔍",
        Dimension::Inclusivity => "🤝",
        Dimension::Compliance => "⚖️",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Badge {
    pub label: String,
    pub score: u8,
    pub level: QualityLevel,
    pub color: QualityColor,
    pub color_hex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionBar {
    pub dimension: Dimension,
    pub name: String,
    pub icon: String,
    /// Rounded display score; `None` when the dimension was not computed
    pub score: Option<u8>,
    /// Progress-bar fill in [0, 1]
    pub fraction: f64,
    pub computed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriorityBadge {
    pub rank: usize,
    pub dimension: Dimension,
    pub name: String,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub badge: Badge,
    pub dimensions: Vec<DimensionBar>,
    pub priorities: Vec<PriorityBadge>,
    pub recommendations: Vec<String>,
    pub incomplete: bool,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewModel {
    NoData { message: String },
    Dashboard(DashboardView),
}

fn display_score(score: f64) -> u8 {
    score.clamp(0.0, 100.0).round() as u8
}

/// Format an assessment for display, or the "no data" view when there is none.
pub fn present(assessment: Option<&QualityAssessment>, ctx: &PresentationContext) -> ViewModel {
    let Some(assessment) = assessment else {
        return ViewModel::NoData {
            message: ctx.text(Message::NoData).to_string(),
        };
    };

    let badge = Badge {
        label: ctx.level_label(assessment.quality_level).to_string(),
        score: display_score(assessment.overall_score),
        level: assessment.quality_level,
        color: assessment.quality_color,
        color_hex: ctx.color_hex(assessment.quality_color).to_string(),
    };

    let dimensions = assessment
        .dimension_scores
        .iter()
        .map(|(dimension, s)| DimensionBar {
            dimension: *dimension,
            name: ctx.dimension_name(*dimension).to_string(),
            icon: dimension_icon(*dimension).to_string(),
            score: s.computed.then(|| display_score(s.score)),
            fraction: if s.computed {
                s.score.clamp(0.0, 100.0) / 100.0
            } else {
                0.0
            },
            computed: s.computed,
        })
        .collect();

    let priorities = assessment
        .improvement_priority
        .iter()
        .enumerate()
        .map(|(i, dimension)| PriorityBadge {
            rank: i + 1,
            dimension: *dimension,
            name: ctx.dimension_name(*dimension).to_string(),
            score: assessment
                .score(*dimension)
                .map(|s| display_score(s.score))
                .unwrap_or(0),
        })
        .collect();

    let incomplete = assessment.is_incomplete();

    ViewModel::Dashboard(DashboardView {
        badge,
        dimensions,
        priorities,
        recommendations: assessment.top_recommendations.clone(),
        incomplete,
        notice: incomplete.then(|| ctx.text(Message::Incomplete).to_string()),
    })
}
