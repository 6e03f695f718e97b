//! Résumé analysis: picks the rubric for the requested mode, assembles the prompt and
//! returns the model's report verbatim.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::prompts::{ATS_PROMPT, HR_PROMPT};
use crate::errors::AppError;
use crate::llm_client::prompts::{JOB_DESCRIPTION_LABEL, RESUME_TEXT_LABEL};
use crate::llm_client::TextGenerator;

/// Which reviewer perspective the report is written from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[serde(alias = "HR")]
    Hr,
    #[serde(alias = "ATS")]
    Ats,
}

impl AnalysisMode {
    pub fn template(self) -> &'static str {
        match self {
            AnalysisMode::Hr => HR_PROMPT,
            AnalysisMode::Ats => ATS_PROMPT,
        }
    }

    /// Human-readable report title.
    pub fn title(self) -> &'static str {
        match self {
            AnalysisMode::Hr => "HR Review Results",
            AnalysisMode::Ats => "ATS Match Analysis",
        }
    }

    /// File name offered when the report is downloaded.
    pub fn report_file_name(self) -> String {
        format!(
            "resume_analysis_{}.txt",
            self.title().replace(' ', "_").to_lowercase()
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub job_description: String,
    pub resume_text: String,
    pub mode: AnalysisMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub mode: AnalysisMode,
    pub title: &'static str,
    pub report_text: String,
}

/// Combined prompt: rubric, then the labeled job description, then the labeled résumé.
pub fn build_prompt(mode: AnalysisMode, job_description: &str, resume_text: &str) -> String {
    format!(
        "{template}\n\n{JOB_DESCRIPTION_LABEL}\n{job_description}\n\n{RESUME_TEXT_LABEL}\n{resume_text}",
        template = mode.template(),
    )
}

/// Runs one analysis. Output is returned unmodified; the model's structure is not validated.
pub async fn analyze(
    llm: &dyn TextGenerator,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter a job description before analyzing.".to_string(),
        ));
    }
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Please upload a valid resume PDF to proceed.".to_string(),
        ));
    }

    let prompt = build_prompt(request.mode, &request.job_description, &request.resume_text);
    info!(
        "Running {:?} analysis (prompt {} chars)",
        request.mode,
        prompt.chars().count()
    );

    let report_text = llm.generate(&prompt).await?;

    Ok(AnalysisResult {
        mode: request.mode,
        title: request.mode.title(),
        report_text,
    })
}
