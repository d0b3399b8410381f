//! Chart and graph suggestions for a user's application history.

use serde::{Deserialize, Serialize};

use crate::ai::prompts::VISUALIZATION_PROMPT_TEMPLATE;
use crate::ai::AiError;
use crate::applications::validation::ValidationErrors;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM};
use crate::llm_client::{generate_json, TextGenerator};
use crate::models::application::JobApplication;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationInput {
    /// The records serialized as JSON.
    pub job_application_data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationOutput {
    pub suggestions: Vec<String>,
}

impl VisualizationInput {
    pub fn from_applications(applications: &[JobApplication]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            job_application_data: serde_json::to_string(applications)?,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let data = self.job_application_data.trim();
        if data.is_empty() {
            errors.push("job_application_data", "Job application data is required.");
        } else if serde_json::from_str::<serde_json::Value>(data).is_err() {
            errors.push(
                "job_application_data",
                "Job application data must be valid JSON.",
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub async fn suggest_visualizations(
    input: &VisualizationInput,
    llm: &dyn TextGenerator,
) -> Result<VisualizationOutput, AiError> {
    input.validate()?;

    let prompt = fill_template(
        VISUALIZATION_PROMPT_TEMPLATE,
        &[("job_application_data", input.job_application_data.trim())],
    );
    let raw: VisualizationOutput = generate_json(llm, &prompt, JSON_ONLY_SYSTEM).await?;

    let suggestions: Vec<String> = raw
        .suggestions
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if suggestions.is_empty() {
        return Err(AiError::UnexpectedShape(
            "no visualization suggestions returned".to_string(),
        ));
    }

    Ok(VisualizationOutput { suggestions })
}
