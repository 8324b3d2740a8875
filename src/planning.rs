use crate::errors::{AppError, AppResult};
use crate::models::ContentPlanResult;
use crate::services::ContentGenerator;
use serde_json::{json, Value};

/// Briefing behind an intelligent content plan, as filled in by the planning
/// form.
#[derive(Debug, Clone)]
pub struct PlanBriefing {
    pub project_name: String,
    pub plan_name: String,
    pub objectives: String,
    pub niche: String,
    pub audience: String,
    pub author_specialty: String,
    pub instructions: String,
}

pub fn build_prompt(briefing: &PlanBriefing) -> String {
    format!(
        "You are an expert SEO content strategist. Based on the following \
         information, generate a list of 5 content ideas. For each idea, \
         provide a compelling title, a brief description, and a list of 3 to \
         5 primary keywords.\n\
         - **Project**: {}\n\
         - **Objectives**: {}\n\
         - **Niche**: {}\n\
         - **Target audience**: {}\n\
         - **Author specialty**: {}\n\
         - **Additional instructions**: {}",
        briefing.project_name,
        briefing.objectives,
        briefing.niche,
        briefing.audience,
        briefing.author_specialty,
        briefing.instructions,
    )
}

/// Requested output shape: an array of {title, description, keywords[]}.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "Compelling, SEO-optimized title for the content piece."
                },
                "description": {
                    "type": "STRING",
                    "description": "A brief summary of what the content will cover."
                },
                "keywords": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "A list of 3 to 5 primary keywords for this topic."
                }
            },
            "required": ["title", "description", "keywords"]
        }
    })
}

/// Parses the generative reply. No schema validation beyond what parsing
/// naturally enforces, and no retry: a bad reply fails the whole generation.
pub fn parse_plan_results(raw: &str) -> AppResult<Vec<ContentPlanResult>> {
    serde_json::from_str(raw.trim()).map_err(|error| generation_error(&error.to_string()))
}

/// One-shot call: prompt out, parsed results back. Callers keep any
/// previously generated results untouched when this fails.
pub async fn generate_plan(
    generator: &dyn ContentGenerator,
    briefing: &PlanBriefing,
) -> AppResult<Vec<ContentPlanResult>> {
    let prompt = build_prompt(briefing);
    let raw = generator
        .generate(&prompt, &response_schema())
        .await
        .map_err(|error| generation_error(&error.to_string()))?;
    parse_plan_results(&raw)
}

fn generation_error(detail: &str) -> AppError {
    AppError::Generation(format!(
        "An error occurred while generating the plan. Please check your API key and try again. Details: {detail}"
    ))
}

#[cfg(test)]
mod tests {
    use super::{build_prompt, parse_plan_results, PlanBriefing};
    use crate::errors::AppError;

    fn briefing() -> PlanBriefing {
        PlanBriefing {
            project_name: "Acme Blog".into(),
            plan_name: "Smart plan - March".into(),
            objectives: "Grow authority in the digital marketing niche".into(),
            niche: "Digital Marketing".into(),
            audience: "Digital entrepreneurs".into(),
            author_specialty: "SEO and inbound marketing".into(),
            instructions: "Keep it practical and actionable".into(),
        }
    }

    #[test]
    fn prompt_carries_every_briefing_field_except_plan_name() {
        let prompt = build_prompt(&briefing());
        assert!(prompt.contains("Acme Blog"));
        assert!(prompt.contains("Digital Marketing"));
        assert!(prompt.contains("Digital entrepreneurs"));
        assert!(prompt.contains("SEO and inbound marketing"));
        assert!(prompt.contains("Keep it practical and actionable"));
        // The plan's display name is bookkeeping, not model input.
        assert!(!prompt.contains("Smart plan - March"));
    }

    #[test]
    fn well_formed_reply_parses() {
        let raw = r#"[
            {"title": "T1", "description": "D1", "keywords": ["k1", "k2", "k3"]},
            {"title": "T2", "description": "D2", "keywords": ["k4"]}
        ]"#;
        let results = parse_plan_results(raw).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "T1");
        assert_eq!(results[1].keywords, vec!["k4"]);
    }

    #[test]
    fn malformed_reply_surfaces_the_underlying_message() {
        let error = parse_plan_results("not json at all").unwrap_err();
        match error {
            AppError::Generation(message) => {
                assert!(message.starts_with("An error occurred while generating the plan."));
                assert!(message.contains("Details:"));
            }
            other => panic!("expected a generation error, got {other:?}"),
        }
    }
}
