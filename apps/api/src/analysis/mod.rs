// Résumé analysis: PDF extraction, HR/ATS reports, and career insights.
// All LLM calls go through llm_client; no direct Gemini calls here.

pub mod analyzer;
pub mod extract;
pub mod handlers;
pub mod insights;
pub mod prompts;
