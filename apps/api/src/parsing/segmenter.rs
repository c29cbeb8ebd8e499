//! Section Segmenter — locates section headers in the flat line sequence and
//! splits the document into the header block and the categorised body.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parsing::taxonomy::{normalize_header, Category, Taxonomy};

/// Acceptance gate used by [`extract_sections`]. Scores must be strictly above it.
pub const DEFAULT_SECTION_THRESHOLD: f64 = 0.5;

/// A line recognised as a section header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderMarker {
    pub index: usize,
    pub text: String,
    pub category: Category,
}

/// Result of segmentation. `markers` index into the full line sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionSplit {
    pub header: Vec<String>,
    pub body: Vec<String>,
    pub markers: Vec<HeaderMarker>,
}

impl SectionSplit {
    /// The whole document as header, with an empty body and no markers.
    pub fn unsegmented(lines: &[String]) -> Self {
        Self {
            header: lines.to_vec(),
            ..Self::default()
        }
    }

    /// True when any of header, body or markers came out empty.
    pub fn is_incomplete(&self) -> bool {
        self.header.is_empty() || self.body.is_empty() || self.markers.is_empty()
    }
}

/// Formatting heuristic: headers carry no separators, no digits, and are no
/// longer than the longest synonym phrase.
pub fn is_header_candidate(line: &str, max_words: usize) -> bool {
    !line.contains('|')
        && !line.contains('・')
        && !line.contains('。')
        && !line.chars().any(|c| c.is_ascii_digit())
        && line.split_whitespace().count() <= max_words
}

/// Splits `lines` into header lines, body lines and header markers.
///
/// The first accepted marker is the header/body boundary. Without any marker
/// the whole document is header and the body is empty.
pub fn extract_sections(lines: &[String], taxonomy: &Taxonomy, threshold: f64) -> SectionSplit {
    let max_words = taxonomy.max_header_words();
    let mut markers = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if !is_header_candidate(line, max_words) {
            continue;
        }
        let matched = normalize_header(line, taxonomy, threshold);
        if matched.score > threshold {
            let category = matched.category.unwrap_or(Category::Others);
            debug!(index, line = %line, %category, score = matched.score, "section header");
            markers.push(HeaderMarker {
                index,
                text: line.clone(),
                category,
            });
        }
    }

    let boundary = markers.first().map_or(lines.len(), |m| m.index);

    SectionSplit {
        header: lines[..boundary].to_vec(),
        body: lines[boundary..].to_vec(),
        markers,
    }
}
