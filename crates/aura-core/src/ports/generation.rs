//! Text-generation port - the language-model backend behind the AI widgets.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

/// Incremental text fragments from a streaming generation.
pub type TextStream = BoxStream<'static, Result<String, GenerationError>>;

/// Sampling options forwarded to the model. Unset fields use model defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

impl GenerationOptions {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A single prompt submission.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Overrides the client's configured model.
    pub model: Option<String>,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// A model installed on the generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

/// Language-model backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a complete reply.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;

    /// Generate a reply as a stream of fragments. Dropping the stream
    /// cancels the upstream request.
    async fn generate_stream(
        &self,
        request: GenerationRequest,
    ) -> Result<TextStream, GenerationError>;

    /// Models available on the backend.
    async fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError>;
}

/// Upstream generation failures. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Generation service returned status {status}")]
    Upstream { status: u16 },

    #[error("Generation service unreachable: {0}")]
    Transport(String),

    #[error("Unexpected generation response: {0}")]
    Decode(String),
}
