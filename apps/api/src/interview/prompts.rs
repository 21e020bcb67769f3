// All LLM prompt templates for the interview module.

/// Question-generation prompt. Replace `{job_position}`, `{company_name}`,
/// `{job_description}`, `{purified_summary}` and `{round_name}` before
/// sending. The numbered format is load-bearing: the orchestrator keeps only
/// lines that start with `<number>. `.
pub const QUESTIONS_TEMPLATE: &str = r#"Based on the following details:
- Job Role: {job_position}
- Company: {company_name}
- Job Description: {job_description}
- Resume Summary: {purified_summary}
- Interview Round: {round_name}

Generate 12-16 personalized interview questions for this round, considering human psychology. Structure the questions as follows:
1. Start with 2-3 warm-up questions.
2. Ask 8-10 role-specific and challenging questions.
3. End with 2-3 reflective or open-ended questions.

Format the response as:
1. [Question 1]
2. [Question 2]
...
16. [Question 16]"#;

/// Round-summary prompt. Replace `{questions_and_answers}` with the
/// `Q: ...\nA: ...` transcript before sending.
pub const ROUND_SUMMARY_TEMPLATE: &str = r#"Summarize the interview round based on these questions and answers:
{questions_and_answers}

Provide a clear evaluation and key takeaways."#;

/// Follow-up prompt. Replace `{question}`, `{answer}`, `{job_position}`,
/// `{company_name}` and `{round_name}` before sending.
pub const FOLLOW_UP_TEMPLATE: &str = r#"Original Question: "{question}"
Candidate's Answer: "{answer}"

Job Role: "{job_position}"
Company: "{company_name}"
Interview Round: "{round_name}"

Based on the candidate's answer, generate exactly one follow-up question that explores their response in more detail. Return only the question text."#;
