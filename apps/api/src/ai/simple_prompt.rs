//! Free-form prompt passthrough, used to check the model connection.

use serde::{Deserialize, Serialize};

use crate::ai::AiError;
use crate::applications::validation::ValidationErrors;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::TextGenerator;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplePromptInput {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplePromptOutput {
    pub text: String,
}

pub async fn simple_prompt(
    input: &SimplePromptInput,
    llm: &dyn TextGenerator,
) -> Result<SimplePromptOutput, AiError> {
    let prompt = input.prompt.trim();
    if prompt.is_empty() {
        let mut errors = ValidationErrors::default();
        errors.push("prompt", "Prompt is required.");
        return Err(errors.into());
    }

    let text = llm.generate(prompt, PLAIN_TEXT_SYSTEM).await?;
    if text.trim().is_empty() {
        return Err(AiError::UnexpectedShape("empty answer".to_string()));
    }
    Ok(SimplePromptOutput { text })
}
