//! Wire format of the `generateContent` endpoint.
//!
//! Only the fields this client sends or reads are modelled; unknown
//! response fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::state::data::ToolCondition;

pub const PROMPT: &str = "Analyze this workshop tool image.
1. Identify the tool name.
2. Assess the condition (Good, Fair, or Poor). Look for rust, damage, or wear.
3. Provide a short description of defects if any.
4. Suggest maintenance action.
5. Provide a confidence score (0-100).";

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Standard base64, no data-URL prefix
    pub data: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: &'static str,
    pub response_schema: Value,
}

#[derive(Deserialize, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GenerateContentResponse {
    /// First text part of the first candidate; later candidates are ignored
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|part| part.text.as_deref())
    }
}

/// Structured-output schema restricting the reply to an AnalysisResult
pub fn analysis_schema() -> Value {
    let conditions: Vec<String> = [ToolCondition::Good, ToolCondition::Fair, ToolCondition::Poor]
        .iter()
        .map(ToString::to_string)
        .collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "toolName": { "type": "STRING" },
            "condition": { "type": "STRING", "enum": conditions },
            "description": { "type": "STRING" },
            "maintenanceSuggestion": { "type": "STRING" },
            "confidenceScore": { "type": "NUMBER" }
        },
        "required": [
            "toolName",
            "condition",
            "description",
            "maintenanceSuggestion",
            "confidenceScore"
        ]
    })
}

impl GenerateContentRequest {
    pub fn analyze_image(mime_type: &str, base64_image: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: mime_type.to_string(),
                            data: base64_image,
                        }),
                        text: None,
                    },
                    Part {
                        inline_data: None,
                        text: Some(PROMPT.to_string()),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: analysis_schema(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest::analyze_image("image/png", "aGVsbG8=".to_string());
        let value = serde_json::to_value(&request).unwrap();

        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "aGVsbG8=");
        assert!(parts[0].get("text").is_none());
        assert_eq!(parts[1]["text"], PROMPT);

        let config = &value["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(
            config["responseSchema"]["properties"]["condition"]["enum"],
            json!(["Good", "Fair", "Poor"])
        );
        assert_eq!(config["responseSchema"]["required"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_first_text_reads_only_the_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"a\":1}" }, { "text": "{\"b\":2}" } ] } },
                { "content": { "parts": [ { "text": "{\"c\":3}" } ] } }
            ],
            "usageMetadata": { "totalTokenCount": 12 }
        }))
        .unwrap();

        assert_eq!(response.first_text(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_first_text_skips_non_text_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [ {}, { "text": "{\"a\":1}" } ] } },
                { "content": { "parts": [ { "text": "{\"b\":2}" } ] } }
            ]
        }))
        .unwrap();

        assert_eq!(response.first_text(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_first_candidate_without_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [] } },
                { "content": { "parts": [ { "text": "{\"b\":2}" } ] } }
            ]
        }))
        .unwrap();

        assert!(response.first_text().is_none());
    }

    #[test]
    fn test_first_text_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.first_text().is_none());
    }
}
