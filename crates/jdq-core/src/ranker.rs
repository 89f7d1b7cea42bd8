//! Recommendation ranking and improvement priority

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::config::QualityConfig;
use crate::dimension::{Dimension, DimensionScore};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ranking {
    pub top_recommendations: Vec<String>,
    pub improvement_priority: Vec<Dimension>,
}

/// Derive the prioritized recommendations and the improvement priority.
///
/// Dimensions are visited worst score first, ties broken by declaration
/// order; recommendations keep their order within a dimension. The first
/// occurrence of a duplicate text wins, then the list is capped.
pub fn rank(scores: &BTreeMap<Dimension, DimensionScore>, config: &QualityConfig) -> Ranking {
    let mut by_urgency: Vec<(Dimension, &DimensionScore)> =
        scores.iter().map(|(d, s)| (*d, s)).collect();
    by_urgency.sort_by(|(da, a), (db, b)| {
        a.score
            .total_cmp(&b.score)
            .then_with(|| da.ordinal().cmp(&db.ordinal()))
    });

    let mut seen = HashSet::new();
    let top_recommendations = by_urgency
        .iter()
        .flat_map(|(_, s)| s.details.recommendations().iter())
        .filter(|text| seen.insert(*text))
        .take(config.recommendation_cap)
        .cloned()
        .collect();

    let improvement_priority = by_urgency
        .iter()
        .filter(|(_, s)| s.computed && s.score < config.adequate_threshold)
        .map(|(d, _)| *d)
        .collect();

    Ranking {
        top_recommendations,
        improvement_priority,
    }
}
