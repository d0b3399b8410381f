// All LLM prompt constants for the AI flows.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for CV tailoring. The answer is the CV itself, as plain text.
pub const TAILOR_CV_SYSTEM: &str = "You are an expert career coach and resume writer. \
    Respond with the full text of the tailored CV only. \
    Do NOT add commentary before or after the CV. \
    Do NOT wrap the CV in markdown code fences.";

/// CV tailoring prompt template.
/// Replace: {job_description}, {current_cv}
pub const TAILOR_CV_PROMPT_TEMPLATE: &str = r#"Your task is to tailor the user's current CV to a specific job description.

Analyze the job description to identify the key skills, experiences, and qualifications the employer is looking for.

Then review the user's current CV and rewrite it to highlight the most relevant aspects that match the job description. Rephrase bullet points, adjust the summary, and reorder sections if necessary to make the CV as compelling as possible for this specific role.

Do NOT invent employers, titles, dates, or qualifications that are not in the current CV.

The output should be the full text of the newly tailored CV.

JOB DESCRIPTION:
{job_description}

CURRENT CV:
{current_cv}"#;

/// Visualization suggestion prompt template. Replace `{job_application_data}` before sending.
pub const VISUALIZATION_PROMPT_TEMPLATE: &str = r#"Based on the following job application data, suggest charts and graphs that would help the user gain insights into their application progress and identify areas for improvement.

Return a JSON object with this EXACT schema (no extra fields):
{
  "suggestions": [
    "A bar chart of applications per status to see where the pipeline stalls"
  ]
}

Each suggestion is one sentence naming the chart type and what it reveals.

DATA:
{job_application_data}"#;
