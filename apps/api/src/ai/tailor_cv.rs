//! CV tailoring: rewrites a CV to emphasise what a job description asks for.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai::prompts::{TAILOR_CV_PROMPT_TEMPLATE, TAILOR_CV_SYSTEM};
use crate::ai::AiError;
use crate::applications::validation::{require_min_chars, ValidationErrors};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::TextGenerator;

const MIN_INPUT_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailorCvInput {
    pub job_description: String,
    pub current_cv: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailorCvOutput {
    pub tailored_cv: String,
}

impl TailorCvInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require_min_chars(
            &mut errors,
            "job_description",
            "Job description",
            &self.job_description,
            MIN_INPUT_CHARS,
        );
        require_min_chars(&mut errors, "current_cv", "CV", &self.current_cv, MIN_INPUT_CHARS);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub async fn tailor_cv(
    input: &TailorCvInput,
    llm: &dyn TextGenerator,
) -> Result<TailorCvOutput, AiError> {
    input.validate()?;

    let prompt = fill_template(
        TAILOR_CV_PROMPT_TEMPLATE,
        &[
            ("job_description", input.job_description.trim()),
            ("current_cv", input.current_cv.trim()),
        ],
    );

    let text = llm.generate(&prompt, TAILOR_CV_SYSTEM).await?;
    let tailored_cv = text.trim();
    if tailored_cv.is_empty() {
        return Err(AiError::UnexpectedShape(
            "The AI did not return a tailored CV.".to_string(),
        ));
    }

    info!("Tailored CV generated ({} chars)", tailored_cv.chars().count());
    Ok(TailorCvOutput {
        tailored_cv: tailored_cv.to_string(),
    })
}
