//! Gemini text generation client (generateContent REST API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{
    FinishReason, TextGenError, TextGenPort, TextRequest, TextResponse,
};

/// Default Gemini base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model for Gemini.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Client for Gemini's generateContent endpoint.
///
/// Without an API key every call fails fast with
/// [`TextGenError::MissingApiKey`] and nothing is sent.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenPort for GeminiClient {
    async fn generate(&self, request: TextRequest) -> Result<TextResponse, TextGenError> {
        let Some(api_key) = &self.api_key else {
            return Err(TextGenError::MissingApiKey);
        };

        let api_request = GenerateContentRequest::from(request);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key.as_str())])
            .json(&api_request)
            .send()
            .await
            .map_err(|e| TextGenError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| TextGenError::RequestFailed(e.to_string()))?;
            return Err(TextGenError::RequestFailed(format!(
                "{}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TextGenError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn convert_response(response: GenerateContentResponse) -> Result<TextResponse, TextGenError> {
    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        TextGenError::InvalidResponse("No candidates in Gemini response".to_string())
    })?;

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::MaxTokens,
        Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") => FinishReason::Safety,
        Some(_) => FinishReason::Unknown,
    };

    Ok(TextResponse {
        text,
        finish_reason,
    })
}

// =============================================================================
// Gemini API Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl From<TextRequest> for GenerateContentRequest {
    fn from(request: TextRequest) -> Self {
        Self {
            contents: vec![Content::text(request.prompt)],
            system_instruction: request.system_instruction.map(Content::text),
            generation_config: request.thinking_budget.map(|budget| GenerationConfig {
                thinking_config: ThinkingConfig {
                    thinking_budget: budget,
                },
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(text: String) -> Self {
        Self {
            parts: vec![Part { text: Some(text) }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}
