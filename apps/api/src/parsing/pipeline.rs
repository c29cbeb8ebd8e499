//! Résumé Parser — wires the segmenter, the optional model fallback, the
//! personal-info extractor and the body compiler into one call per document.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::ResumeRecord;
use crate::parsing::body::extract_resume_body;
use crate::parsing::entities::EntityRecognizer;
use crate::parsing::fallback::FallbackSegmenter;
use crate::parsing::personal_info::extract_personal_information;
use crate::parsing::segmenter::{extract_sections, SectionSplit, DEFAULT_SECTION_THRESHOLD};
use crate::parsing::taxonomy::{Taxonomy, DEFAULT_MATCH_THRESHOLD};

/// Stateless per-document parser. Cheap to clone and safe to share between tasks.
#[derive(Clone)]
pub struct ResumeParser {
    taxonomy: Arc<Taxonomy>,
    recognizer: Arc<dyn EntityRecognizer>,
    /// Strict gate for heuristic header detection.
    section_threshold: f64,
    /// Gate for direct header normalisation (model-proposed headers).
    match_threshold: f64,
    fallback: Option<FallbackSegmenter>,
}

impl ResumeParser {
    pub fn new(taxonomy: Taxonomy, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            taxonomy: Arc::new(taxonomy),
            recognizer,
            section_threshold: DEFAULT_SECTION_THRESHOLD,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            fallback: None,
        }
    }

    pub fn with_thresholds(mut self, section_threshold: f64, match_threshold: f64) -> Self {
        self.section_threshold = section_threshold;
        self.match_threshold = match_threshold;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackSegmenter) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Heuristic segmentation only.
    pub fn sections(&self, lines: &[String]) -> SectionSplit {
        extract_sections(lines, &self.taxonomy, self.section_threshold)
    }

    /// Heuristic pipeline, no model calls.
    pub fn parse_lines(&self, lines: &[String]) -> ResumeRecord {
        let split = self.sections(lines);
        self.compile(lines, &split)
    }

    /// Full pipeline. When the heuristic split is incomplete and a fallback is
    /// configured, the model split replaces it. A failed fallback is logged and
    /// the document is treated as all header with an empty body.
    pub async fn parse(&self, lines: &[String]) -> ResumeRecord {
        let mut split = self.sections(lines);

        if let (true, Some(fallback)) = (split.is_incomplete(), self.fallback.as_ref()) {
            info!(
                header = split.header.len(),
                body = split.body.len(),
                markers = split.markers.len(),
                "heuristic segmentation incomplete, asking model"
            );
            match fallback
                .segment(lines, &self.taxonomy, self.match_threshold)
                .await
            {
                Ok(model_split) => split = model_split,
                Err(e) => {
                    warn!("model segmentation failed, treating document as unsegmented: {e}");
                    split = SectionSplit::unsegmented(lines);
                }
            }
        }

        self.compile(lines, &split)
    }

    fn compile(&self, lines: &[String], split: &SectionSplit) -> ResumeRecord {
        let personal = extract_personal_information(&split.header, self.recognizer.as_ref());
        let body = extract_resume_body(lines, &split.markers);
        debug!(
            lines = lines.len(),
            header = split.header.len(),
            sections = split.markers.len(),
            "resume compiled"
        );
        ResumeRecord {
            personal,
            body: body.to_blocks(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{LlmError, TextGenerator};
    use crate::parsing::entities::GazetteerRecognizer;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingGenerator {
        reply: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for CountingGenerator {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn parser() -> ResumeParser {
        ResumeParser::new(Taxonomy::english(), Arc::new(GazetteerRecognizer::new()))
    }

    fn resume() -> Vec<String> {
        lines(&[
            "Jane Doe",
            "jane.doe@gmail.com",
            "+1 415-555-0100",
            "linkedin.com/in/janedoe",
            "San Francisco",
            "Work Experience",
            "Acme Corp, Staff Engineer, 2019 - 2023",
            "Education",
            "BS Computer Science, 2015",
            "Skills",
            "Rust, Go, PostgreSQL, Kafka, Docker",
            "Awards",
            "Hackathon winner, 2018",
        ])
    }

    #[test]
    fn test_end_to_end_record() {
        let record = parser().parse_lines(&resume());

        assert_eq!(record.personal.name, "Jane Doe");
        assert_eq!(record.personal.email.as_deref(), Some("jane.doe@gmail.com"));
        assert_eq!(record.personal.mobile.as_deref(), Some("+14155550100"));
        assert_eq!(record.personal.websites, vec!["linkedin.com/in/janedoe"]);
        assert_eq!(record.personal.location.as_deref(), Some("San Francisco"));
        assert_eq!(record.personal.others, "");

        assert_eq!(
            record.body.experience,
            "Work Experience\nAcme Corp, Staff Engineer, 2019 - 2023"
        );
        assert_eq!(record.body.education, "Education\nBS Computer Science, 2015");
        assert_eq!(record.body.skills, "Skills\nRust, Go, PostgreSQL, Kafka, Docker");
        assert_eq!(record.body.others, "Awards\nHackathon winner, 2018");
    }

    #[test]
    fn test_headerless_document_is_all_header() {
        let doc = lines(&["Jane Doe", "jane@x.io", "Did things at places, 2020"]);
        let record = parser().parse_lines(&doc);
        assert_eq!(record.personal.name, "Jane Doe");
        assert_eq!(record.personal.others, "Did things at places, 2020");
        assert_eq!(record.body, Default::default());
    }

    #[tokio::test]
    async fn test_complete_split_skips_fallback() {
        let generator = Arc::new(CountingGenerator {
            reply: "{}",
            calls: AtomicUsize::new(0),
        });
        let parser = parser()
            .with_fallback(FallbackSegmenter::new(generator.clone(), Duration::from_secs(5)));

        let record = parser.parse(&resume()).await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(record, parser.parse_lines(&resume()));
    }

    #[tokio::test]
    async fn test_incomplete_split_uses_model_split() {
        let generator = Arc::new(CountingGenerator {
            reply: r#"[{
                "resume_header": ["Jane Doe"],
                "resume_body": ["WHERE I WORKED", "Acme, 2019 - 2023"],
                "resume_body_headers": ["WHERE I WORKED"]
            }]"#,
            calls: AtomicUsize::new(0),
        });
        let parser = parser()
            .with_fallback(FallbackSegmenter::new(generator.clone(), Duration::from_secs(5)));

        let doc = lines(&["Jane Doe", "WHERE I WORKED", "Acme, 2019 - 2023"]);
        let record = parser.parse(&doc).await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(record.personal.name, "Jane Doe");
        assert_eq!(record.body.others, "WHERE I WORKED\nAcme, 2019 - 2023");
    }

    #[tokio::test]
    async fn test_failed_fallback_on_headerless_split_drops_markers() {
        let generator = Arc::new(CountingGenerator {
            reply: "nope",
            calls: AtomicUsize::new(0),
        });
        let parser = parser()
            .with_fallback(FallbackSegmenter::new(generator.clone(), Duration::from_secs(5)));

        let doc = lines(&["Experience", "Built X", "Skills", "Rust"]);
        assert!(!parser.sections(&doc).markers.is_empty());

        let record = parser.parse(&doc).await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(record.body, Default::default());
        assert!(record.personal.others.starts_with("Experience, "));
        assert!(record.personal.others.ends_with("Skills, Rust"));
    }

    #[test]
    fn test_name_containing_a_place_keeps_real_location() {
        let doc = lines(&["Austin Miller", "austin@x.io", "Seattle", "Experience", "Acme"]);
        let record = parser().parse_lines(&doc);

        assert_eq!(record.personal.name, "Austin Miller");
        assert_eq!(record.personal.email.as_deref(), Some("austin@x.io"));
        assert_eq!(record.personal.location.as_deref(), Some("Seattle"));
        assert_eq!(record.personal.others, "");
        assert_eq!(record.body.experience, "Experience\nAcme");
    }

    #[tokio::test]
    async fn test_failed_fallback_on_markerless_split_is_unchanged() {
        let generator = Arc::new(CountingGenerator {
            reply: "not json",
            calls: AtomicUsize::new(0),
        });
        let parser = parser()
            .with_fallback(FallbackSegmenter::new(generator.clone(), Duration::from_secs(5)));

        let doc = lines(&["Jane Doe", "Did things at places, 2020"]);
        let record = parser.parse(&doc).await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(record, parser.parse_lines(&doc));
    }

    #[test]
    fn test_thresholds_are_configurable() {
        // A gate of 1.0 rejects every header, exact hits included.
        let parser = parser().with_thresholds(1.0, 0.6);
        assert!(parser.sections(&resume()).markers.is_empty());
    }
}
