//! Mapping of bias issues onto renderable highlight spans

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bias::{BiasIssue, Severity};

/// Display color of a highlight, ranked by the severity it represents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightColor {
    Yellow,
    Orange,
    Red,
    DeepRed,
}

impl HighlightColor {
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Critical => HighlightColor::DeepRed,
            Severity::High => HighlightColor::Red,
            Severity::Medium => HighlightColor::Orange,
            Severity::Low => HighlightColor::Yellow,
        }
    }

    /// CSS color used by web renderers
    pub fn hex(&self) -> &'static str {
        match self {
            HighlightColor::DeepRed => "#991b1b",
            HighlightColor::Red => "#ef4444",
            HighlightColor::Orange => "#f97316",
            HighlightColor::Yellow => "#facc15",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub issue: BiasIssue,
    pub color: HighlightColor,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HighlightReport {
    pub spans: Vec<HighlightSpan>,
    /// Issues excluded because their offsets were out of range or inverted
    pub dropped: usize,
}

/// Turn bias issues into highlight spans over a text of `text_len` characters.
///
/// Spans are never merged. Output is ordered by start ascending, then severity
/// descending; remaining ties keep input order.
pub fn map_highlights(issues: &[BiasIssue], text_len: usize) -> HighlightReport {
    let limit = i64::try_from(text_len).unwrap_or(i64::MAX);
    let mut spans = Vec::with_capacity(issues.len());
    let mut dropped = 0;

    for issue in issues {
        let (start, end) = (issue.start_index, issue.end_index);
        if start < 0 || end > limit || start >= end {
            debug!(
                start,
                end,
                text_len,
                text = issue.problematic_text.as_str(),
                "Dropping highlight with invalid offsets"
            );
            dropped += 1;
            continue;
        }

        spans.push(HighlightSpan {
            start: start as usize,
            end: end as usize,
            issue: issue.clone(),
            color: HighlightColor::for_severity(issue.severity),
        });
    }

    spans.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| b.issue.severity.cmp(&a.issue.severity))
    });

    HighlightReport { spans, dropped }
}
