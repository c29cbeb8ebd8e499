//! Body Compiler — turns header markers into per-category line blocks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parsing::segmenter::HeaderMarker;
use crate::parsing::taxonomy::Category;

/// Lines `start..end` of the document, opened by the header `header`.
/// The marker line itself is the first line of the span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpan {
    pub start: usize,
    pub end: usize,
    pub header: String,
    pub category: Category,
}

/// Body lines grouped by category, in document order within each category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeBody {
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub others: Vec<String>,
}

/// Newline-joined body text, keyed the way the output record exposes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyBlocks {
    #[serde(rename = "Education")]
    pub education: String,
    #[serde(rename = "Experience")]
    pub experience: String,
    #[serde(rename = "Skills")]
    pub skills: String,
    #[serde(rename = "Others")]
    pub others: String,
}

impl ResumeBody {
    pub fn lines(&self, category: Category) -> &[String] {
        match category {
            Category::Education => &self.education,
            Category::Experience => &self.experience,
            Category::Skills => &self.skills,
            Category::Others => &self.others,
        }
    }

    fn lines_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Education => &mut self.education,
            Category::Experience => &mut self.experience,
            Category::Skills => &mut self.skills,
            Category::Others => &mut self.others,
        }
    }

    pub fn to_blocks(&self) -> BodyBlocks {
        BodyBlocks {
            education: self.education.join("\n"),
            experience: self.experience.join("\n"),
            skills: self.skills.join("\n"),
            others: self.others.join("\n"),
        }
    }
}

/// Pairs each marker with the next one: a span runs up to the line before the
/// next marker, and the last span runs to the end of the document.
pub fn category_spans(line_count: usize, markers: &[HeaderMarker]) -> Vec<CategorySpan> {
    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let next = markers.get(i + 1).map_or(line_count, |m| m.index);
            CategorySpan {
                start: marker.index,
                end: next.clamp(marker.index, line_count.max(marker.index)),
                header: marker.text.clone(),
                category: marker.category,
            }
        })
        .collect()
}

/// Collects each category's spans from `lines`. Skills with no lines of its
/// own falls back to the Experience lines.
pub fn extract_resume_body(lines: &[String], markers: &[HeaderMarker]) -> ResumeBody {
    let mut body = ResumeBody::default();

    for span in category_spans(lines.len(), markers) {
        let Some(chunk) = lines.get(span.start..span.end) else {
            continue;
        };
        body.lines_mut(span.category).extend_from_slice(chunk);
    }

    if body.skills.is_empty() {
        debug!("no skills section, borrowing experience lines");
        body.skills = body.experience.clone();
    }

    body
}
