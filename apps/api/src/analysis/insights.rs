//! Career insights: skill-gap analysis and career roadmaps.
//!
//! Unlike the HR/ATS reports these ask the model for strict JSON and parse it, so the
//! client gets structured data it can chart.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::analysis::prompts::{CAREER_ROADMAP_PROMPT_TEMPLATE, SKILL_GAP_PROMPT};
use crate::errors::AppError;
use crate::llm_client::prompts::{
    EXPERIENCE_LEVEL_LABEL, JSON_ONLY_INSTRUCTION, RESUME_TEXT_LABEL, TARGET_ROLE_LABEL,
};
use crate::llm_client::{generate_json, TextGenerator};

// ────────────────────────────────────────────────────────────────────────────
// Skill gap
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SkillGapRequest {
    pub resume_text: String,
    pub job_role: String,
    #[serde(default)]
    pub experience_level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentProfile {
    pub estimated_current_salary: String,
    pub overall_profile_strength: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillsAnalysis {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub partial_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGapDetail {
    pub skill: String,
    pub importance: String,
    pub hiring_impact: String,
    /// Number or numeric string, depending on the model's mood.
    pub estimated_salary_increase_percent: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryProjection {
    pub projected_salary_range: String,
    pub estimated_total_hike_percent: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGapReport {
    pub current_profile: CurrentProfile,
    pub skills_analysis: SkillsAnalysis,
    pub skill_gap_details: Vec<SkillGapDetail>,
    pub salary_projection: SalaryProjection,
    pub disclaimer: String,
}

pub fn build_skill_gap_prompt(request: &SkillGapRequest) -> String {
    let mut prompt = format!(
        "{SKILL_GAP_PROMPT}\n\n{JSON_ONLY_INSTRUCTION}\n\n{TARGET_ROLE_LABEL}\n{}\n\n",
        request.job_role.trim()
    );
    if let Some(level) = request
        .experience_level
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
    {
        prompt.push_str(&format!("{EXPERIENCE_LEVEL_LABEL}\n{level}\n\n"));
    }
    prompt.push_str(&format!("{RESUME_TEXT_LABEL}\n{}", request.resume_text));
    prompt
}

pub async fn skill_gap(
    llm: &dyn TextGenerator,
    request: &SkillGapRequest,
) -> Result<SkillGapReport, AppError> {
    if request.resume_text.trim().is_empty() || request.job_role.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide resume_text and job_role".to_string(),
        ));
    }

    info!("Running skill gap analysis for role '{}'", request.job_role.trim());
    let report = generate_json(llm, &build_skill_gap_prompt(request)).await?;
    Ok(report)
}

// ────────────────────────────────────────────────────────────────────────────
// Career roadmap
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateFrequency {
    Weekly,
    #[default]
    Monthly,
}

impl UpdateFrequency {
    fn as_str(self) -> &'static str {
        match self {
            UpdateFrequency::Weekly => "weekly",
            UpdateFrequency::Monthly => "monthly",
        }
    }
}

fn default_experience_level() -> String {
    "Beginner".to_string()
}

fn default_duration_months() -> u32 {
    6
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapRequest {
    pub job_role: String,
    pub interest_area: String,
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
    #[serde(default = "default_duration_months")]
    pub duration_months: u32,
    #[serde(default)]
    pub frequency: UpdateFrequency,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoadmapPhase {
    pub phase: String,
    pub skills_to_learn: Vec<String>,
    pub projects_to_build: Vec<String>,
    pub outcome: String,
    pub salary_milestone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinalOutcome {
    pub career_readiness: String,
    pub confidence_level: String,
    pub estimated_final_salary_range: String,
    pub next_steps: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerRoadmap {
    pub roadmap_title: String,
    pub roadmap_theme: String,
    pub duration: String,
    pub frequency: String,
    pub interest_focus: String,
    pub target_role: String,
    pub phases: Vec<RoadmapPhase>,
    pub final_outcome: FinalOutcome,
    pub disclaimer: String,
}

pub fn build_roadmap_prompt(request: &RoadmapRequest) -> String {
    let experience_level = match request.experience_level.trim() {
        "" => "Beginner",
        level => level,
    };
    let prompt = CAREER_ROADMAP_PROMPT_TEMPLATE
        .replace("{job_role}", request.job_role.trim())
        .replace("{interest_area}", request.interest_area.trim())
        .replace("{experience_level}", experience_level)
        .replace("{duration}", &request.duration_months.to_string())
        .replace("{frequency}", request.frequency.as_str());
    format!("{prompt}\n\n{JSON_ONLY_INSTRUCTION}")
}

pub async fn career_roadmap(
    llm: &dyn TextGenerator,
    request: &RoadmapRequest,
) -> Result<CareerRoadmap, AppError> {
    if request.job_role.trim().is_empty() || request.interest_area.trim().is_empty() {
        return Err(AppError::Validation(
            "Job role and interest area are required".to_string(),
        ));
    }
    if request.duration_months == 0 {
        return Err(AppError::Validation(
            "duration_months must be at least 1".to_string(),
        ));
    }

    info!(
        "Generating {}-month {} roadmap for role '{}'",
        request.duration_months,
        request.frequency.as_str(),
        request.job_role.trim()
    );
    let roadmap = generate_json(llm, &build_roadmap_prompt(request)).await?;
    Ok(roadmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::FakeGenerator;
    use crate::llm_client::LlmError;

    const SKILL_GAP_JSON: &str = r#"```json
{
  "currentProfile": {"estimatedCurrentSalary": "₹6 – ₹9 LPA", "overallProfileStrength": "Medium"},
  "skillsAnalysis": {"matchingSkills": ["Rust"], "missingSkills": ["Kubernetes"], "partialSkills": ["SQL"]},
  "skillGapDetails": [
    {"skill": "Kubernetes", "importance": "deploys services", "hiringImpact": "high", "estimatedSalaryIncreasePercent": "12"}
  ],
  "salaryProjection": {"projectedSalaryRange": "₹9 – ₹12 LPA", "estimatedTotalHikePercent": 30},
  "disclaimer": "estimates only"
}
```"#;

    fn skill_gap_request(level: Option<&str>) -> SkillGapRequest {
        SkillGapRequest {
            resume_text: "Rust developer, 3 years".to_string(),
            job_role: "Platform Engineer".to_string(),
            experience_level: level.map(String::from),
        }
    }

    #[test]
    fn test_skill_gap_prompt_sections_in_order() {
        let prompt = build_skill_gap_prompt(&skill_gap_request(Some("Mid")));
        let role = prompt.find("=== TARGET JOB ROLE ===\nPlatform Engineer").unwrap();
        let level = prompt.find("=== EXPERIENCE LEVEL ===\nMid").unwrap();
        let resume = prompt.find("=== RESUME TEXT ===\nRust developer").unwrap();
        assert!(prompt.starts_with(SKILL_GAP_PROMPT));
        assert!(role < level && level < resume);
    }

    #[test]
    fn test_skill_gap_prompt_omits_blank_experience_level() {
        let prompt = build_skill_gap_prompt(&skill_gap_request(Some("  ")));
        assert!(!prompt.contains(EXPERIENCE_LEVEL_LABEL));
    }

    #[tokio::test]
    async fn test_skill_gap_parses_fenced_json() {
        let fake = FakeGenerator::replying(SKILL_GAP_JSON);
        let report = skill_gap(&fake, &skill_gap_request(None)).await.unwrap();
        assert_eq!(report.skills_analysis.missing_skills, vec!["Kubernetes"]);
        assert_eq!(report.skill_gap_details[0].skill, "Kubernetes");
        assert_eq!(report.salary_projection.estimated_total_hike_percent, 30);
    }

    #[tokio::test]
    async fn test_skill_gap_requires_role() {
        let fake = FakeGenerator::replying(SKILL_GAP_JSON);
        let mut req = skill_gap_request(None);
        req.job_role = " ".to_string();
        assert!(matches!(
            skill_gap(&fake, &req).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_skill_gap_unparseable_reply() {
        let fake = FakeGenerator::replying("Sorry, I can't help with that.");
        let err = skill_gap(&fake, &skill_gap_request(None)).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(LlmError::Parse(_))));
    }

    #[test]
    fn test_roadmap_request_defaults() {
        let req: RoadmapRequest =
            serde_json::from_str(r#"{"job_role": "Data Engineer", "interest_area": "Streaming"}"#)
                .unwrap();
        assert_eq!(req.experience_level, "Beginner");
        assert_eq!(req.duration_months, 6);
        assert_eq!(req.frequency, UpdateFrequency::Monthly);
    }

    #[test]
    fn test_roadmap_prompt_fills_every_placeholder() {
        let req = RoadmapRequest {
            job_role: "Data Engineer".to_string(),
            interest_area: "Streaming".to_string(),
            experience_level: "Intermediate".to_string(),
            duration_months: 3,
            frequency: UpdateFrequency::Weekly,
        };
        let prompt = build_roadmap_prompt(&req);
        assert!(prompt.contains("TARGET JOB ROLE: Data Engineer"));
        assert!(prompt.contains("ROADMAP DURATION: 3 months"));
        assert!(prompt.contains("UPDATE FREQUENCY: weekly"));
        for placeholder in [
            "{job_role}",
            "{interest_area}",
            "{experience_level}",
            "{duration}",
            "{frequency}",
        ] {
            assert!(!prompt.contains(placeholder), "{placeholder} left in prompt");
        }
    }

    #[tokio::test]
    async fn test_roadmap_parses_reply() {
        let fake = FakeGenerator::replying(
            r#"{"roadmapTitle": "Stream Quest", "phases": [{"phase": "Month 1", "skillsToLearn": ["Kafka"]}]}"#,
        );
        let req: RoadmapRequest =
            serde_json::from_str(r#"{"job_role": "Data Engineer", "interest_area": "Streaming"}"#)
                .unwrap();
        let roadmap = career_roadmap(&fake, &req).await.unwrap();
        assert_eq!(roadmap.roadmap_title, "Stream Quest");
        assert_eq!(roadmap.phases[0].skills_to_learn, vec!["Kafka"]);
        assert!(roadmap.disclaimer.is_empty());
    }

    #[tokio::test]
    async fn test_roadmap_rejects_zero_duration() {
        let fake = FakeGenerator::replying("{}");
        let req: RoadmapRequest = serde_json::from_str(
            r#"{"job_role": "Data Engineer", "interest_area": "Streaming", "duration_months": 0}"#,
        )
        .unwrap();
        assert!(matches!(
            career_roadmap(&fake, &req).await,
            Err(AppError::Validation(_))
        ));
    }
}
