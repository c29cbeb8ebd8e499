//! Screening agents — thin prompt orchestration over a `TextGenerator`.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::GROUNDING_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::models::ResumeRecord;
use crate::screening::formatting::{body_text, format_resume_markdown};
use crate::screening::prompts::{
    CANDIDATE_SCORING_PROMPT_TEMPLATE, CANDIDATE_SCORING_SYSTEM, INTERVIEW_QUESTIONS_PROMPT_TEMPLATE,
    INTERVIEW_QUESTIONS_SYSTEM, JOB_DESCRIPTION_PROMPT_TEMPLATE, JOB_DESCRIPTION_SYSTEM,
};

/// Expands a short role brief into a full job description.
pub async fn describe_job(generator: &dyn TextGenerator, brief: &str) -> Result<String, AppError> {
    let brief = require_text(brief, "brief")?;
    let prompt = JOB_DESCRIPTION_PROMPT_TEMPLATE.replace("{brief}", brief);
    let description = generator
        .complete(&prompt, JOB_DESCRIPTION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Job description failed: {e}")))?;
    info!(chars = description.len(), "job description generated");
    Ok(description)
}

/// Match analysis with a 0-100 score. The candidate is presented as the
/// newline-joined body blocks.
pub async fn score_candidate(
    generator: &dyn TextGenerator,
    job_description: &str,
    record: &ResumeRecord,
) -> Result<String, AppError> {
    let job_description = require_text(job_description, "job_description")?;
    let resume = body_text(record);
    require_text(&resume, "resume")?;

    let prompt = CANDIDATE_SCORING_PROMPT_TEMPLATE
        .replace("{grounding}", GROUNDING_INSTRUCTION)
        .replace("{job_description}", job_description)
        .replace("{resume}", &resume);
    generator
        .complete(&prompt, CANDIDATE_SCORING_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Candidate scoring failed: {e}")))
}

/// Seven to ten interview questions tailored to the candidate. The candidate
/// is presented as the markdown rendering of the record.
pub async fn interview_questions(
    generator: &dyn TextGenerator,
    job_description: &str,
    record: &ResumeRecord,
) -> Result<String, AppError> {
    let job_description = require_text(job_description, "job_description")?;
    let resume = format_resume_markdown(record);
    require_text(&resume, "resume")?;

    let prompt = INTERVIEW_QUESTIONS_PROMPT_TEMPLATE
        .replace("{grounding}", GROUNDING_INSTRUCTION)
        .replace("{job_description}", job_description)
        .replace("{resume}", &resume);
    generator
        .complete(&prompt, INTERVIEW_QUESTIONS_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Interview question generation failed: {e}")))
}

fn require_text<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::parsing::body::BodyBlocks;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every prompt and answers with a fixed reply.
    struct RecordingGenerator {
        reply: Result<&'static str, ()>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl RecordingGenerator {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply: Ok(reply),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last(&self) -> (String, String) {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((prompt.to_string(), system.to_string()));
            self.reply
                .map(str::to_string)
                .map_err(|_| LlmError::EmptyContent)
        }
    }

    fn record() -> ResumeRecord {
        let mut record = ResumeRecord::default();
        record.personal.name = "Jane Doe".to_string();
        record.body = BodyBlocks {
            education: "Education\nBSc, 2015".to_string(),
            experience: "Experience\nAcme, 2019".to_string(),
            skills: "Skills\nRust".to_string(),
            others: String::new(),
        };
        record
    }

    #[tokio::test]
    async fn test_describe_job_embeds_brief() {
        let generator = RecordingGenerator::replying("A great role.");
        let out = describe_job(&generator, "  Rust engineer, seed stage  ")
            .await
            .unwrap();
        assert_eq!(out, "A great role.");

        let (prompt, system) = generator.last();
        assert!(prompt.starts_with("Basic Description: Rust engineer, seed stage\n"));
        assert_eq!(system, JOB_DESCRIPTION_SYSTEM);
    }

    #[tokio::test]
    async fn test_score_candidate_uses_body_blocks() {
        let generator = RecordingGenerator::replying("{\"Score\": \"80/100\"}");
        score_candidate(&generator, "Rust role", &record()).await.unwrap();

        let (prompt, system) = generator.last();
        assert!(prompt.contains(
            "Candidate Resume:\nEducation\nBSc, 2015\nExperience\nAcme, 2019\nSkills\nRust\n"
        ));
        assert!(!prompt.contains("Jane Doe"));
        assert!(prompt.contains("Do NOT infer"));
        assert_eq!(system, CANDIDATE_SCORING_SYSTEM);
    }

    #[tokio::test]
    async fn test_interview_questions_use_markdown() {
        let generator = RecordingGenerator::replying("1. Why Rust?");
        let out = interview_questions(&generator, "Rust role", &record())
            .await
            .unwrap();
        assert_eq!(out, "1. Why Rust?");

        let (prompt, system) = generator.last();
        assert!(prompt.contains("**Name:** Jane Doe"));
        assert!(prompt.contains("### Skills\nSkills\nRust"));
        assert_eq!(system, INTERVIEW_QUESTIONS_SYSTEM);
    }

    #[tokio::test]
    async fn test_empty_inputs_are_rejected_without_a_call() {
        let generator = RecordingGenerator::replying("unused");
        assert!(matches!(
            describe_job(&generator, "   ").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            score_candidate(&generator, "", &record()).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            interview_questions(&generator, "Rust role", &ResumeRecord::default()).await,
            Err(AppError::Validation(_))
        ));
        assert!(generator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generator_failure_maps_to_llm_error() {
        let generator = RecordingGenerator::failing();
        let err = describe_job(&generator, "brief").await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
