// ABOUTME: HTTP client for the generation backend
// Chat completions drive AI splitting; image generations produce the cards

use crate::api::types::{
    ChatMessage, ChatRequest, ChatResponse, GenAuth, GenError, ImageRequest, ImageResponse,
    DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL,
};
use crate::models::ImageData;
use base64::Engine;
use reqwest::Client;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GenClient {
    client: Client,
    auth: GenAuth,
    chat_model: String,
    image_model: String,
}

impl GenClient {
    /// Create a client with the given authentication. Fails fast when no key
    /// is configured so the caller can surface a single clear message.
    pub fn new(auth: GenAuth) -> Result<Self, GenError> {
        if !auth.is_configured() {
            return Err(GenError::MissingAuth);
        }

        let client = Client::builder()
            .user_agent(concat!("cardforge/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            auth,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        })
    }

    pub fn with_models(
        mut self,
        chat_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        self.chat_model = chat_model.into();
        self.image_model = image_model.into();
        self
    }

    /// Send a chat request and return the assistant's text
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, GenError> {
        let request = ChatRequest {
            model: self.chat_model.clone(),
            messages,
            temperature: Some(0.3),
        };

        debug!("Sending chat request: {} messages", request.messages.len());

        let response = self
            .client
            .post(format!("{}/chat/completions", self.auth.base_url))
            .header("Authorization", self.bearer()?)
            .json(&request)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let parsed: ChatResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(GenError::EmptyResponse)
    }

    /// Generate one card image and return its payload (URL or inline base64)
    pub async fn generate_image(
        &self,
        prompt: &str,
        size: &str,
        watermark: bool,
    ) -> Result<ImageData, GenError> {
        let request = ImageRequest {
            model: self.image_model.clone(),
            prompt: prompt.to_string(),
            size: size.to_string(),
            response_format: "url".to_string(),
            watermark: Some(watermark),
        };

        debug!("Requesting image, size {size}, prompt {} chars", prompt.len());

        let response = self
            .client
            .post(format!("{}/images/generations", self.auth.base_url))
            .header("Authorization", self.bearer()?)
            .json(&request)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let parsed: ImageResponse = response.json().await?;
        let datum = parsed.data.into_iter().next().ok_or(GenError::EmptyResponse)?;

        if let Some(url) = datum.url {
            Ok(ImageData::Url(url))
        } else if let Some(b64) = datum.b64_json {
            Ok(ImageData::Base64(b64))
        } else {
            Err(GenError::EmptyResponse)
        }
    }

    /// Fetch raw image bytes from a result URL
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, GenError> {
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Resolve an image payload to raw bytes, downloading when necessary
    pub async fn image_bytes(&self, image: &ImageData) -> anyhow::Result<Vec<u8>> {
        match image {
            ImageData::Url(url) => Ok(self.download(url).await?),
            ImageData::Base64(b64) => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(b64.trim())
                    .map_err(|e| anyhow::anyhow!("Invalid base64 image payload: {e}"))?;
                Ok(bytes)
            }
        }
    }

    fn bearer(&self) -> Result<String, GenError> {
        self.auth.bearer_header().ok_or(GenError::MissingAuth)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GenError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(GenError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
