// Prompt templates for the profile summarizer.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Summary prompt used when a usable job description is present.
/// Replace `{resume_text}` and `{job_description}` before sending.
pub const TARGETED_SUMMARY_TEMPLATE: &str = r#"I have the following resume text:
"{resume_text}"

And this job description:
"{job_description}"

Summarize the most relevant skills, experiences, and qualifications from the resume that match the job description. Only include essential and actionable points. Avoid ambiguity."#;

/// Summary prompt used when the job description is absent or too short.
/// Replace `{resume_text}` before sending.
pub const GENERAL_SUMMARY_TEMPLATE: &str = r#"I have the following resume text:
"{resume_text}"

Please summarize the most relevant skills, experiences, and qualifications from the resume, focusing on general strengths and achievements. Avoid ambiguity."#;
