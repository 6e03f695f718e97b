// Shared prompt fragments. Each feature keeps its own prompts.rs alongside it;
// only cross-cutting pieces live here.

/// Appended to every prompt whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Section labels used when user-supplied text is appended to a prompt.
pub const JOB_DESCRIPTION_LABEL: &str = "=== JOB DESCRIPTION ===";
pub const RESUME_TEXT_LABEL: &str = "=== RESUME TEXT ===";
pub const TARGET_ROLE_LABEL: &str = "=== TARGET JOB ROLE ===";
pub const EXPERIENCE_LEVEL_LABEL: &str = "=== EXPERIENCE LEVEL ===";
