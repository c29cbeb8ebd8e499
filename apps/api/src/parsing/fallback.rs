//! Fallback Segmenter — asks a text-generation model to split the document
//! when the heuristic segmenter comes back empty.
//!
//! The reply must be a JSON object (or a one-element list holding one) with
//! `resume_header`, `resume_body` and `resume_body_headers` string lists.
//! Anything else is an `InvalidStructuredOutput` error, never an empty split.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, LlmError, TextGenerator};
use crate::parsing::prompts::{SECTION_EXTRACT_PROMPT_TEMPLATE, SECTION_EXTRACT_SYSTEM};
use crate::parsing::segmenter::{HeaderMarker, SectionSplit};
use crate::parsing::taxonomy::{normalize_header, Category, Taxonomy};

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("text generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("text generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid structured output: {0}")]
    InvalidStructuredOutput(String),
}

/// The model's proposed split, as plain line texts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FallbackReply {
    pub resume_header: Vec<String>,
    pub resume_body: Vec<String>,
    pub resume_body_headers: Vec<String>,
}

/// Model-backed segmenter with a caller-imposed deadline.
#[derive(Clone)]
pub struct FallbackSegmenter {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl FallbackSegmenter {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Segments `lines` via the model. Header texts in the reply are mapped
    /// back onto line indices and categorised with `threshold`.
    pub async fn segment(
        &self,
        lines: &[String],
        taxonomy: &Taxonomy,
        threshold: f64,
    ) -> Result<SectionSplit, FallbackError> {
        let prompt = build_prompt(lines)?;
        let system = format!("{SECTION_EXTRACT_SYSTEM} {JSON_ONLY_SYSTEM}");

        let reply = tokio::time::timeout(self.timeout, self.generator.complete(&prompt, &system))
            .await
            .map_err(|_| FallbackError::Timeout(self.timeout))??;

        let parsed = parse_fallback_reply(&reply)?;
        Ok(resolve_reply(lines, parsed, taxonomy, threshold))
    }
}

fn build_prompt(lines: &[String]) -> Result<String, LlmError> {
    let encoded = serde_json::to_string_pretty(lines)?;
    Ok(SECTION_EXTRACT_PROMPT_TEMPLATE.replace("{lines}", &encoded))
}

/// Parses the model reply. Accepts a bare object or a list holding exactly one object.
pub fn parse_fallback_reply(text: &str) -> Result<FallbackReply, FallbackError> {
    let value: Value = serde_json::from_str(strip_json_fences(text)).map_err(|e| {
        FallbackError::InvalidStructuredOutput(format!("reply is not valid JSON: {e}"))
    })?;

    let object = match value {
        Value::Object(_) => value,
        Value::Array(mut items) if items.len() == 1 && items[0].is_object() => items.remove(0),
        other => {
            return Err(FallbackError::InvalidStructuredOutput(format!(
                "expected an object or a list holding one object, got {}",
                json_kind(&other)
            )))
        }
    };

    serde_json::from_value(object)
        .map_err(|e| FallbackError::InvalidStructuredOutput(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list of a different shape",
        Value::Object(_) => "an object",
    }
}

/// Turns the model's header texts into markers over `lines`.
///
/// Each header is searched forward from the previous marker (starting at the
/// body start), first by trimmed equality, then case-insensitively. Headers
/// that cannot be found are dropped.
pub fn resolve_reply(
    lines: &[String],
    reply: FallbackReply,
    taxonomy: &Taxonomy,
    threshold: f64,
) -> SectionSplit {
    let mut cursor = reply.resume_header.len().min(lines.len());
    let mut markers = Vec::with_capacity(reply.resume_body_headers.len());

    for text in &reply.resume_body_headers {
        let Some(index) = locate(lines, cursor, text) else {
            warn!(header = %text, "model header not found in document, skipping");
            continue;
        };
        let category = normalize_header(&lines[index], taxonomy, threshold)
            .category
            .unwrap_or(Category::Others);
        debug!(index, header = %text, %category, "model section header");
        markers.push(HeaderMarker {
            index,
            text: lines[index].clone(),
            category,
        });
        cursor = index + 1;
    }

    SectionSplit {
        header: reply.resume_header,
        body: reply.resume_body,
        markers,
    }
}

fn locate(lines: &[String], from: usize, text: &str) -> Option<usize> {
    let wanted = text.trim();
    let tail = lines.get(from..)?;
    tail.iter()
        .position(|l| l.trim() == wanted)
        .or_else(|| {
            let wanted = wanted.to_lowercase();
            tail.iter().position(|l| l.trim().to_lowercase() == wanted)
        })
        .map(|offset| from + offset)
}
