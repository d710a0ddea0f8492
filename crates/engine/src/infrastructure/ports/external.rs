//! External service port traits (text generation).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::TextGenError;

// =============================================================================
// Text Generation Types
// =============================================================================

/// A single-turn generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    /// The user prompt
    pub prompt: String,
    /// System instruction / persona
    pub system_instruction: Option<String>,
    /// Reasoning budget in tokens; `Some(0)` turns thinking off
    pub thinking_budget: Option<u32>,
}

impl TextRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            thinking_budget: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }
}

/// Response from the text generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResponse {
    /// The generated text (may be empty)
    pub text: String,
    pub finish_reason: FinishReason,
}

/// Reason the generation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    /// Fallback for reasons this client does not know
    #[serde(other)]
    Unknown,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenPort: Send + Sync {
    async fn generate(&self, request: TextRequest) -> Result<TextResponse, TextGenError>;
}
