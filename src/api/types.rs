// ABOUTME: Type definitions for the generation backend API
// Request/response shapes follow the OpenAI-compatible chat and images endpoints

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default chat model used for AI-assisted splitting
pub const DEFAULT_CHAT_MODEL: &str = "doubao-seed-chat";
/// Default image model used for card generation
pub const DEFAULT_IMAGE_MODEL: &str = "doubao-seedream-3";
/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://ark.cn-beijing.volces.com/api/v3";

/// Errors surfaced by the generation backend client
#[derive(Debug, Error)]
pub enum GenError {
    #[error("no API key configured; set CARDFORGE_API_KEY or add one to the config file")]
    MissingAuth,

    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("backend returned an empty response")]
    EmptyResponse,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Authentication and endpoint configuration for the backend
#[derive(Debug, Clone)]
pub struct GenAuth {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl GenAuth {
    pub fn from_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read the key from the environment
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("CARDFORGE_API_KEY").ok(),
            base_url: std::env::var("CARDFORGE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    pub fn bearer_header(&self) -> Option<String> {
        self.api_key
            .as_ref()
            .filter(|k| !k.is_empty())
            .map(|k| format!("Bearer {k}"))
    }
}

impl Default for GenAuth {
    fn default() -> Self {
        Self::from_env()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub size: String,
    /// "url" or "b64_json"
    pub response_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageResponse {
    pub data: Vec<ImageDatum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageDatum {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub b64_json: Option<String>,
}
