//! Job description document model

use async_trait::async_trait;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

impl Section {
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }
}

/// A job description as supplied by a document source.
///
/// `text` is the exact string that is analyzed; highlight offsets refer to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobDescription {
    pub title: Option<String>,
    pub text: String,
    pub sections: Vec<Section>,
}

impl JobDescription {
    /// Parse Markdown, falling back to `Heading:` lines for plain text.
    pub fn from_markdown(text: impl Into<String>) -> Self {
        let text = text.into();
        let (title, mut sections) = parse_markdown_sections(&text);
        if sections.iter().all(|s| s.heading.is_empty()) {
            sections = parse_plain_sections(&text);
        }

        Self {
            title,
            text,
            sections,
        }
    }

    /// Length of the analyzed text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.heading.eq_ignore_ascii_case(heading))
    }
}

/// Supplies the document being analyzed. Never mutated by the pipeline.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn load(&self) -> Result<JobDescription>;

    /// Human-readable origin, used in logs and headers
    fn describe(&self) -> String;
}

fn parse_markdown_sections(text: &str) -> (Option<String>, Vec<Section>) {
    let mut title = None;
    let mut sections: Vec<Section> = Vec::new();
    let mut current = Section::default();
    let mut heading: Option<(HeadingLevel, String)> = None;

    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((level, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((level, heading_text)) = heading.take() else {
                    continue;
                };
                let heading_text = heading_text.trim().to_string();
                if level == HeadingLevel::H1 && title.is_none() {
                    title = Some(heading_text);
                    continue;
                }
                push_section(&mut sections, std::mem::take(&mut current));
                current.heading = heading_text;
            }
            Event::Text(t) | Event::Code(t) => match heading.as_mut() {
                Some((_, h)) => h.push_str(&t),
                None => current.body.push_str(&t),
            },
            Event::SoftBreak | Event::HardBreak => current.body.push(' '),
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Item) => current.body.push('\n'),
            _ => {}
        }
    }
    push_section(&mut sections, current);

    (title, sections)
}

fn parse_plain_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::default();

    for line in text.lines() {
        let trimmed = line.trim();
        let is_heading = trimmed.ends_with(':')
            && trimmed.split_whitespace().count() <= 6
            && trimmed.len() > 1;

        if is_heading {
            push_section(&mut sections, std::mem::take(&mut current));
            current.heading = trimmed.trim_end_matches(':').trim().to_string();
        } else if !trimmed.is_empty() {
            current.body.push_str(trimmed);
            current.body.push('\n');
        }
    }
    push_section(&mut sections, current);

    sections
}

fn push_section(sections: &mut Vec<Section>, mut section: Section) {
    section.body = section.body.trim().to_string();
    if !section.heading.is_empty() || !section.body.is_empty() {
        sections.push(section);
    }
}
