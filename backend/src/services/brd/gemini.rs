//! Google Gemini client and the generator abstraction the handlers use.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use super::prompt;
use super::schema::{parse_schema, BrdSchema};
use crate::config::Config;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Gemini authentication failed: {0}. Please check your API key.")]
    Auth(String),

    #[error("Gemini API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Gemini returned no text")]
    EmptyResponse,

    #[error("Failed to parse Gemini response as valid JSON")]
    InvalidJson,
}

/// The request URL is dropped so nothing about the endpoint reaches a client.
impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Http(err.without_url())
    }
}

pub type Result<T> = std::result::Result<T, LlmError>;

/// Produces BRD content from prompts. `Arc<dyn BrdGenerator>` is shared by
/// all workers.
#[async_trait]
pub trait BrdGenerator: Send + Sync {
    /// `false` when answers are canned rather than produced by a model.
    fn is_live(&self) -> bool;

    async fn generate_schema(&self, description: &str, model: Option<&str>) -> Result<BrdSchema>;

    /// Improved markdown, or `None` when no model is available.
    async fn improve_document(&self, prompt: &str, model: Option<&str>) -> Result<Option<String>>;
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: config.gemini_base_url.clone(),
            model: config.google_model.clone(),
            temperature: config.llm_temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// One `generateContent` call; returns the text of the first candidate.
    pub async fn generate_text(&self, prompt: &str, model: Option<&str>) -> Result<String> {
        let model = model.map(str::trim).filter(|m| !m.is_empty()).unwrap_or(self.model.as_str());
        debug!("Gemini request: model={}, prompt={} chars", model, prompt.len());

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(LlmError::Auth(body));
            }
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        debug!("Gemini answered with {} chars", text.len());
        Ok(text)
    }
}

#[async_trait]
impl BrdGenerator for GeminiClient {
    fn is_live(&self) -> bool {
        true
    }

    async fn generate_schema(&self, description: &str, model: Option<&str>) -> Result<BrdSchema> {
        let answer = self.generate_text(&prompt::structured(description), model).await?;
        if let Some(schema) = parse_schema(&answer) {
            return Ok(schema);
        }

        warn!("Gemini answer was not a BRD object, retrying with the simplified prompt");
        let answer = self.generate_text(&prompt::simplified(description), model).await?;
        parse_schema(&answer).ok_or(LlmError::InvalidJson)
    }

    async fn improve_document(&self, prompt: &str, model: Option<&str>) -> Result<Option<String>> {
        let answer = self.generate_text(prompt, model).await?;
        Ok(Some(strip_markdown_fence(&answer)))
    }
}

/// Removes a ```markdown fence the model sometimes wraps its answer in.
fn strip_markdown_fence(answer: &str) -> String {
    let trimmed = answer.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.strip_suffix("```").unwrap_or(body).trim().to_string()
}

/// Used without an API key; keeps the UI usable with an empty document.
pub struct FallbackGenerator;

#[async_trait]
impl BrdGenerator for FallbackGenerator {
    fn is_live(&self) -> bool {
        false
    }

    async fn generate_schema(&self, _description: &str, _model: Option<&str>) -> Result<BrdSchema> {
        Ok(BrdSchema::fallback())
    }

    async fn improve_document(&self, _prompt: &str, _model: Option<&str>) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Picks the Gemini client when a key is configured.
pub fn from_config(config: &Config) -> Arc<dyn BrdGenerator> {
    match &config.google_api_key {
        Some(key) => {
            info!("LLM service: Google Gemini, default model {}", config.google_model);
            Arc::new(GeminiClient::new(key.clone(), config))
        }
        None => {
            warn!("No valid GOOGLE_API_KEY found, generation runs in fallback mode");
            Arc::new(FallbackGenerator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::new("test-key", &Config::default()).with_base_url(server.uri())
    }

    fn answer(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }

    #[test]
    fn endpoint_carries_model_but_never_the_key() {
        let client = GeminiClient::new("k123", &Config::default()).with_base_url("https://api.test/v1beta");
        assert_eq!(
            client.endpoint("gemini-2.5-pro"),
            "https://api.test/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[tokio::test]
    async fn transport_error_does_not_mention_the_key() {
        let client = GeminiClient::new("SECRET-KEY-123", &Config::default())
            .with_base_url("http://127.0.0.1:1/v1beta");

        let err = client.generate_text("hello", None).await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
        let message = err.to_string();
        assert!(!message.contains("SECRET-KEY-123"), "{}", message);
        assert!(!message.contains("127.0.0.1:1"), "{}", message);
    }

    #[test]
    fn fences_are_stripped() {
        assert_eq!(strip_markdown_fence("```markdown\n# BRD\nbody\n```"), "# BRD\nbody");
        assert_eq!(strip_markdown_fence("  # Plain  "), "# Plain");
    }

    #[tokio::test]
    async fn sends_generation_config_and_reads_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "generationConfig": {"maxOutputTokens": 4000}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("hi there")))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server).generate_text("hello", None).await.unwrap();
        assert_eq!(text, "hi there");
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client(&server).generate_text("hello", Some("gemini-2.5-pro")).await.unwrap_err();
        match err {
            LlmError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn forbidden_is_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = client(&server).generate_text("hello", None).await.unwrap_err();
        assert!(matches!(err, LlmError::Auth(_)));
    }

    #[tokio::test]
    async fn empty_candidates_are_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let err = client(&server).generate_text("hello", None).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn schema_retries_once_with_simplified_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "contents": [{"parts": [{"text": prompt::simplified("Pet clinic booking")}]}]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(answer(r#"{"project_name": "Pet Clinic", "stakeholders": ["Vets"]}"#)),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("Sorry, no JSON today.")))
            .expect(1)
            .mount(&server)
            .await;

        let schema = client(&server)
            .generate_schema("Pet clinic booking", None)
            .await
            .unwrap();
        assert_eq!(schema.project_name, "Pet Clinic");
        assert_eq!(schema.stakeholders, vec!["Vets"]);
    }

    #[tokio::test]
    async fn schema_fails_after_second_unparsable_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("still prose")))
            .expect(2)
            .mount(&server)
            .await;

        let err = client(&server).generate_schema("Anything", None).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidJson));
    }

    #[tokio::test]
    async fn fallback_generator_is_canned() {
        let generator = FallbackGenerator;
        assert!(!generator.is_live());
        assert_eq!(
            generator.generate_schema("x", None).await.unwrap(),
            BrdSchema::fallback()
        );
        assert_eq!(generator.improve_document("x", None).await.unwrap(), None);
    }
}
