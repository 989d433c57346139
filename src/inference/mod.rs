//! Tool inspection via a multimodal inference service.
//!
//! `InferenceClient::analyze` sends one photo to the Gemini
//! `generateContent` endpoint together with a fixed instruction and a
//! structured-output schema, and decodes the reply into an
//! [`AnalysisResult`]. It never fails: any problem yields
//! [`AnalysisResult::fallback`]. Callers that need to tell a real
//! assessment from a failure use [`InferenceClient::try_analyze`].

mod error;
mod wire;

pub use error::{InferenceError, InferenceResult};

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use image::ImageFormat;
use secrecy::ExposeSecret;
use tracing::{debug, info, warn};

use crate::config::InferenceConfig;
use crate::state::data::AnalysisResult;
use wire::{GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Stateless client; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    config: InferenceConfig,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }

    /// Assess a tool photo, falling back to a fixed result on any failure
    pub async fn analyze(&self, image: &[u8]) -> AnalysisResult {
        match self.try_analyze(image).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "tool analysis failed, using fallback result");
                AnalysisResult::fallback()
            }
        }
    }

    /// Assess a tool photo, reporting why it failed
    pub async fn try_analyze(&self, image: &[u8]) -> InferenceResult<AnalysisResult> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
            .ok_or(InferenceError::MissingCredential)?;

        let mime_type = mime_type_of(image);
        let request =
            GenerateContentRequest::analyze_image(mime_type, BASE64_STANDARD.encode(image));

        debug!(
            model = %self.config.model,
            mime_type,
            bytes = image.len(),
            "sending tool image for analysis"
        );

        let response = self
            .http
            .post(self.url())
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status { status, body });
        }

        let reply: GenerateContentResponse = response.json().await?;
        let text = reply.first_text().ok_or(InferenceError::EmptyResponse)?;
        let result = decode_analysis(text)?;

        info!(
            tool = %result.tool_name,
            condition = %result.condition,
            confidence = result.confidence_score,
            "tool analysis complete"
        );
        Ok(result)
    }
}

/// MIME type for the inline payload; anything unrecognised is sent as JPEG
fn mime_type_of(image: &[u8]) -> &'static str {
    match image::guess_format(image) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::WebP) => "image/webp",
        _ => "image/jpeg",
    }
}

/// Decode the structured reply and bring the confidence into 0..=100
fn decode_analysis(text: &str) -> InferenceResult<AnalysisResult> {
    let mut result: AnalysisResult = serde_json::from_str(text)?;

    // serde_json rejects NaN and infinities, so the score is always finite here
    let score = result.confidence_score;
    if !(0.0..=100.0).contains(&score) {
        warn!(score, "confidence score out of range, clamping");
        result.confidence_score = score.clamp(0.0, 100.0);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::ToolCondition;
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn client_for(server: &MockServer) -> InferenceClient {
        InferenceClient::new(InferenceConfig {
            api_key: Some(SecretString::from("test-key")),
            endpoint: server.uri(),
            ..InferenceConfig::default()
        })
    }

    fn reply_with(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [ { "text": text } ] } }
            ]
        }))
    }

    fn assert_fallback(result: &AnalysisResult) {
        assert_eq!(result.condition, ToolCondition::Fair);
        assert_eq!(result.confidence_score, 0.0);
        assert!(result.description.contains("Could not analyze"));
        assert!(result.is_fallback());
    }

    #[tokio::test]
    async fn test_well_formed_result_is_returned_unchanged() {
        let server = MockServer::start().await;
        let payload = json!({
            "toolName": "Kunci Momen",
            "condition": "Good",
            "description": "Minor scratches on the handle",
            "maintenanceSuggestion": "Clean and oil the ratchet",
            "confidenceScore": 87
        });
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(reply_with(&payload.to_string()))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).analyze(JPEG).await;

        assert_eq!(
            result,
            AnalysisResult {
                tool_name: "Kunci Momen".to_string(),
                condition: ToolCondition::Good,
                description: "Minor scratches on the handle".to_string(),
                maintenance_suggestion: "Clean and oil the ratchet".to_string(),
                confidence_score: 87.0,
            }
        );
    }

    #[tokio::test]
    async fn test_request_carries_key_image_prompt_and_schema() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header(API_KEY_HEADER, "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {
                        "properties": {
                            "condition": { "enum": ["Good", "Fair", "Poor"] }
                        }
                    }
                }
            })))
            .respond_with(reply_with(
                r#"{"toolName":"Obeng","condition":"Poor","description":"Rusty tip","maintenanceSuggestion":"Replace","confidenceScore":64.5}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).try_analyze(PNG).await.unwrap();
        assert_eq!(result.condition, ToolCondition::Poor);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], BASE64_STANDARD.encode(PNG));
        assert!(parts[1]["text"].as_str().unwrap().contains("confidence score"));
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.try_analyze(JPEG).await,
            Err(InferenceError::Status { .. })
        ));
        assert_fallback(&client.analyze(JPEG).await);
    }

    #[tokio::test]
    async fn test_malformed_text_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply_with("this is not json"))
            .mount(&server)
            .await;

        assert_fallback(&client_for(&server).analyze(JPEG).await);
    }

    #[tokio::test]
    async fn test_non_json_body_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        assert_fallback(&client_for(&server).analyze(JPEG).await);
    }

    #[tokio::test]
    async fn test_empty_candidates_fall_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.try_analyze(JPEG).await,
            Err(InferenceError::EmptyResponse)
        ));
        assert_fallback(&client.analyze(JPEG).await);
    }

    #[tokio::test]
    async fn test_unknown_condition_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply_with(
                r#"{"toolName":"Tang","condition":"Excellent","description":"","maintenanceSuggestion":"","confidenceScore":90}"#,
            ))
            .mount(&server)
            .await;

        assert_fallback(&client_for(&server).analyze(JPEG).await);
    }

    #[tokio::test]
    async fn test_missing_credential_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply_with("{}"))
            .expect(0)
            .mount(&server)
            .await;

        let client = InferenceClient::new(InferenceConfig {
            api_key: None,
            endpoint: server.uri(),
            ..InferenceConfig::default()
        });

        assert!(matches!(
            client.try_analyze(JPEG).await,
            Err(InferenceError::MissingCredential)
        ));
        let result = client.analyze(b"any bytes at all").await;
        assert_eq!(result.confidence_score, 0.0);
        assert_eq!(result.condition, ToolCondition::Fair);
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back() {
        // Nothing listens on the discard port
        let client = InferenceClient::new(InferenceConfig {
            api_key: Some(SecretString::from("test-key")),
            endpoint: "http://127.0.0.1:9".to_string(),
            ..InferenceConfig::default()
        });

        assert_fallback(&client.analyze(JPEG).await);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let high = decode_analysis(
            r#"{"toolName":"Bor","condition":"Fair","description":"","maintenanceSuggestion":"","confidenceScore":140}"#,
        )
        .unwrap();
        assert_eq!(high.confidence_score, 100.0);

        let low = decode_analysis(
            r#"{"toolName":"Bor","condition":"Fair","description":"","maintenanceSuggestion":"","confidenceScore":-3}"#,
        )
        .unwrap();
        assert_eq!(low.confidence_score, 0.0);
    }

    #[test]
    fn test_overflowing_confidence_is_a_decode_error() {
        let err = decode_analysis(
            r#"{"toolName":"Bor","condition":"Fair","description":"","maintenanceSuggestion":"","confidenceScore":1e400}"#,
        )
        .unwrap_err();
        assert!(matches!(err, InferenceError::Decode(_)));
    }

    #[test]
    fn test_missing_field_is_a_decode_error() {
        let err = decode_analysis(r#"{"toolName":"Bor","condition":"Fair"}"#).unwrap_err();
        assert!(matches!(err, InferenceError::Decode(_)));
    }

    #[test]
    fn test_mime_type_sniffing() {
        assert_eq!(mime_type_of(JPEG), "image/jpeg");
        assert_eq!(mime_type_of(PNG), "image/png");
        assert_eq!(mime_type_of(b"RIFF\x00\x00\x00\x00WEBPVP8 "), "image/webp");
        assert_eq!(mime_type_of(b"garbage"), "image/jpeg");
    }
}
