//! Profile Summarizer — condenses extracted resume text into the "purified
//! summary" that question generation uses as context.
//!
//! A job description only steers the summary when it carries real content
//! (trimmed length over `MIN_JOB_DESCRIPTION_LEN`); anything shorter is
//! treated as not provided. Generation failure propagates, so space creation
//! stays all-or-nothing.

use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::space::prompts::{GENERAL_SUMMARY_TEMPLATE, TARGETED_SUMMARY_TEMPLATE};

/// Minimum trimmed length a job description must exceed to be used.
pub const MIN_JOB_DESCRIPTION_LEN: usize = 20;

/// Stored in place of a job description that was absent or too short.
pub const JOB_DESCRIPTION_SENTINEL: &str = "N/A";

/// Returns the trimmed job description when it is long enough to matter.
/// Length is counted in characters, not bytes, so multibyte descriptions are
/// measured the same as ASCII ones.
pub fn effective_job_description(job_description: Option<&str>) -> Option<&str> {
    job_description
        .map(str::trim)
        .filter(|jd| jd.chars().count() > MIN_JOB_DESCRIPTION_LEN)
}

/// Picks the targeted or general prompt depending on whether a usable job
/// description is present.
pub fn build_summary_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    match job_description {
        Some(jd) => TARGETED_SUMMARY_TEMPLATE
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", jd),
        None => GENERAL_SUMMARY_TEMPLATE.replace("{resume_text}", resume_text),
    }
}

/// Produces the purified summary for a new space.
/// `job_description` must already be filtered through `effective_job_description`.
pub async fn purify(
    generator: &dyn TextGenerator,
    resume_text: &str,
    job_description: Option<&str>,
) -> Result<String, AppError> {
    debug!(
        targeted = job_description.is_some(),
        "summarizing resume profile"
    );
    let prompt = build_summary_prompt(resume_text, job_description);
    let summary = generator
        .generate_text(&prompt)
        .await
        .map_err(|e| AppError::Generation(format!("resume summarization failed: {e}")))?;

    let summary = summary.trim();
    if summary.is_empty() {
        return Err(AppError::Generation(
            "resume summarization returned no text".to_string(),
        ));
    }
    Ok(summary.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::llm_client::LlmError;

    /// Records the prompt it was called with and returns a canned reply.
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
        reply: String,
    }

    impl RecordingGenerator {
        fn new(reply: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: reply.to_string(),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate_text(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    #[test]
    fn test_short_job_description_is_ignored() {
        assert_eq!(effective_job_description(Some("short")), None);
        assert_eq!(effective_job_description(Some("   ")), None);
        assert_eq!(effective_job_description(None), None);
    }

    #[test]
    fn test_threshold_counts_characters_not_bytes() {
        // 9 characters but 27 UTF-8 bytes: still too short to use.
        assert_eq!(effective_job_description(Some("软件工程师招聘信息")), None);
        // 21 multibyte characters crosses the threshold.
        let jd = "资深后端工程师，负责分布式系统设计与实现。";
        assert_eq!(jd.chars().count(), 21);
        assert_eq!(effective_job_description(Some(jd)), Some(jd));
    }

    #[test]
    fn test_long_job_description_is_kept_trimmed() {
        let jd = "  We are hiring a senior Rust engineer for infra work.  ";
        assert_eq!(
            effective_job_description(Some(jd)),
            Some("We are hiring a senior Rust engineer for infra work.")
        );
    }

    #[test]
    fn test_prompt_branches_on_job_description() {
        let targeted = build_summary_prompt("resume body", Some("a real job description"));
        assert!(targeted.contains("a real job description"));
        assert!(targeted.contains("match the job description"));

        let general = build_summary_prompt("resume body", None);
        assert!(general.contains("general strengths and achievements"));
        assert!(!general.contains("job description:"));
    }

    #[tokio::test]
    async fn test_purify_uses_general_path_without_description() {
        let generator = RecordingGenerator::new("Strong backend engineer.");
        let jd = effective_job_description(Some("tiny"));
        let summary = purify(&generator, "resume body", jd).await.unwrap();
        assert_eq!(summary, "Strong backend engineer.");

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("general strengths and achievements"));
    }

    #[tokio::test]
    async fn test_purify_propagates_generation_failure() {
        let err = purify(&FailingGenerator, "resume body", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }

    #[tokio::test]
    async fn test_purify_rejects_blank_summary() {
        let generator = RecordingGenerator::new("   \n  ");
        let err = purify(&generator, "resume body", None).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
    }
}
