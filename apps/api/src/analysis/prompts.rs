// All LLM prompt constants for the Analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// HR-perspective rubric. The job description and résumé are appended after it.
pub const HR_PROMPT: &str = r#"You are an experienced HR specialist with strong technical awareness.
Analyze the resume against the job description provided below.

Provide a detailed evaluation with these sections:

## Strengths
- List 3-5 key strengths where the candidate excels
- Highlight relevant experience and skills that match the role well

## Weaknesses/Gaps
- Identify areas where the candidate falls short
- Note missing qualifications or experience

## Key Observations
- Overall fit for the role
- Cultural and technical alignment
- Career progression and growth potential

## Recommendation
- Should we proceed with this candidate? (Yes/No/Maybe)
- Brief reasoning for the recommendation"#;

/// ATS-perspective rubric. The job description and résumé are appended after it.
pub const ATS_PROMPT: &str = r#"You are an ATS (Applicant Tracking System) analyzer.
Evaluate the resume against the job description for ATS compatibility.

Provide a structured analysis with these sections:

## ATS Score: [X/100]
A numerical score based on keyword matching and formatting.

## Keyword Analysis
### Matching Keywords:
- Keywords from the job description found in the resume

### Missing Keywords:
- Critical keywords from the job description NOT found in the resume
- Prioritized by importance (high/medium/low)

## Formatting Assessment
- Formatting quality (Good/Fair/Poor)
- Any ATS compatibility issues
- Any likely parsing problems

## Optimization Suggestions
1. Specific keywords to add: [list]
2. Sections to improve: [list]
3. Formatting fixes: [list]

## Summary
- Overall likelihood of passing ATS screening
- Top 3 actionable improvements"#;

/// Skill-gap and salary-impact analysis. Role, optional experience level and résumé
/// are appended after it.
pub const SKILL_GAP_PROMPT: &str = r#"You are a career advisor, ATS simulator and HR analyst.
Perform a skill gap analysis and salary impact estimation for the resume below,
measured against industry hiring standards for the target job role.
Be realistic and explain your reasoning. Never guarantee a job or a salary.

Steps:
1. Extract the technical and professional skills present in the resume.
2. List the industry-standard skills required for the target role.
3. Classify skills as matching (in both), missing (required but absent) or partial
   (basic exposure that needs improvement).
4. For every missing or partial skill explain why it matters for the role, how it
   improves hiring chances, and the approximate salary increase (typically 5-20%).
5. Estimate the current salary range and the projected range after closing the gaps,
   in LPA (Lakhs Per Annum).
6. Add a short disclaimer that salary values are estimates.

Return a JSON object with this EXACT schema:
{
  "currentProfile": {
    "estimatedCurrentSalary": "₹X – ₹Y LPA",
    "overallProfileStrength": "Low | Medium | High"
  },
  "skillsAnalysis": {
    "matchingSkills": ["skill"],
    "missingSkills": ["skill"],
    "partialSkills": ["skill"]
  },
  "skillGapDetails": [
    {
      "skill": "skill name",
      "importance": "why this skill matters",
      "hiringImpact": "how this improves hiring chances",
      "estimatedSalaryIncreasePercent": 10
    }
  ],
  "salaryProjection": {
    "projectedSalaryRange": "₹X – ₹Y LPA",
    "estimatedTotalHikePercent": 25
  },
  "disclaimer": "Salary values are estimates based on market trends and may vary by location, company and negotiation."
}"#;

/// Career roadmap prompt template.
/// Replace: {job_role}, {interest_area}, {experience_level}, {duration}, {frequency}
pub const CAREER_ROADMAP_PROMPT_TEMPLATE: &str = r#"You are a career mentor and roadmap planner with deep knowledge of industry hiring trends.
Design a realistic, motivating career roadmap.

TARGET JOB ROLE: {job_role}
AREA OF INTEREST: {interest_area}
EXPERIENCE LEVEL: {experience_level}
ROADMAP DURATION: {duration} months
UPDATE FREQUENCY: {frequency}

Rules:
- For weekly frequency, use short phases of 2-4 weeks each.
- For monthly frequency, use broader phases of 1-2 months each.
- Every phase lists skills to learn, practical portfolio projects, the expected outcome,
  and an approximate salary milestone in LPA (Lakhs Per Annum).
- Keep recommendations achievable for students and early professionals.
- Never guarantee a job or a salary.

Return a JSON object with this EXACT schema:
{
  "roadmapTitle": "Engaging title",
  "roadmapTheme": "Flowchart | Game Levels | Career Journey | Timeline",
  "duration": "{duration} months",
  "frequency": "{frequency} updates",
  "interestFocus": "{interest_area}",
  "targetRole": "{job_role}",
  "phases": [
    {
      "phase": "Month 1",
      "skillsToLearn": ["skill"],
      "projectsToBuild": ["project description"],
      "outcome": "What the learner can do after this phase",
      "salaryMilestone": "₹X – ₹Y LPA"
    }
  ],
  "finalOutcome": {
    "careerReadiness": "Readiness after completing the roadmap",
    "confidenceLevel": "Beginner | Intermediate | Advanced",
    "estimatedFinalSalaryRange": "₹X – ₹Y LPA",
    "nextSteps": "Recommended next steps"
  },
  "disclaimer": "Salary values are approximate estimates. This roadmap is a guide, not a guarantee."
}"#;
