use serde_json::{json, Value};

use crate::domain::{CompletionRequest, Profile, ResponseSchema, RISK_COUNT};

/// Name the output schema is registered under with the provider.
pub const RISK_SCHEMA_NAME: &str = "health_risks";

/// Low sampling temperature so repeated submissions of the same profile pick
/// the same risks.
pub const RISK_TEMPERATURE: f32 = 0.3;

const SYSTEM_PROMPT: &str = "\
You are a health-risk assessment engine. Given a person's self-described health \
profile, identify the 3 most important health risks for that person.

Ground every assessment in established clinical frameworks: cardiovascular risk \
scoring conventions (Framingham, ACC/AHA pooled cohort equations), USPSTF \
screening recommendations, and WHO and CDC public-health guidance.

Rules:
1. Return exactly 3 risks, ordered from most to least urgent.
2. Each explanation must reference specific facts the user stated (age, habits, \
   conditions, family history, measurements) and be 2-3 sentences long.
3. Each action must be concrete and specific to this person (a named screening, \
   a measurable target, a specific specialist), never generic advice such as \
   \"eat healthy\" or \"see a doctor\". Keep it to 1-2 sentences.
4. If the profile is incomplete, state the assumptions you are making inside the \
   explanation instead of refusing or asking follow-up questions.
5. Keep titles short: a few words naming the condition or risk.";

/// JSON schema for the reply: `{ "risks": [ {title, explanation, action} x3 ] }`,
/// with every property required and no additional properties anywhere.
pub fn risk_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "risks": {
                "type": "array",
                "minItems": RISK_COUNT,
                "maxItems": RISK_COUNT,
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "explanation": { "type": "string" },
                        "action": { "type": "string" }
                    },
                    "required": ["title", "explanation", "action"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["risks"],
        "additionalProperties": false
    })
}

pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// Assemble the completion request for a validated profile. The profile text
/// becomes the user message verbatim.
pub fn build_risk_request(profile: &Profile) -> CompletionRequest {
    CompletionRequest::new(
        SYSTEM_PROMPT,
        profile.as_str(),
        ResponseSchema::new(RISK_SCHEMA_NAME, risk_schema()),
        RISK_TEMPERATURE,
    )
}
