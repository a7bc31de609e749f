//! AI Provider implementations using Rust-idiomatic enum-based design
//!
//! This module contains the unified Provider enum and all provider implementations.
//! Supported providers are the ones requiring bespoke wire-format transcoding:
//! OpenAI, Anthropic, the Google family (Gemini + Vertex AI), AWS Bedrock, and
//! Moonshot. Every other OpenAI-wire-compatible model family (Azure, Groq,
//! DeepInfra, OpenRouter, xAI, DeepSeek, Mistral, v0, Meta Llama, Cloudflare, ...)
//! is served through the `Custom` provider type, which speaks the OpenAI wire
//! format against a configurable base URL.

// Base infrastructure
pub mod base;

// Provider modules
pub mod anthropic;
pub mod bedrock;
pub mod gemini;
pub mod moonshot;
pub mod openai;
pub mod vertex_ai;

// Shared utilities and architecture
pub mod capabilities;
pub mod macros; // Macros for reducing boilerplate
pub mod shared; // Shared utilities for all providers // Compile-time capability verification

// Registry and unified provider
pub mod base_provider;
pub mod provider_registry;
pub mod unified_provider;

// Export main types
pub use crate::core::traits::LLMProvider;
use crate::core::types::common::{ProviderCapability, RequestContext};
use crate::core::types::requests::{ChatRequest, EmbeddingRequest, ImageGenerationRequest};
use crate::core::types::responses::{
    ChatChunk, ChatResponse, EmbeddingResponse, ImageGenerationResponse,
};
use chrono::{DateTime, Utc};
pub use provider_registry::ProviderRegistry;
pub use unified_provider::{ProviderError, UnifiedProviderError}; // Both for compatibility

/// Model pricing information
#[derive(Debug, Clone)]
pub struct ModelPricing {
    pub model: String,
    pub input_cost_per_1k: f64,
    pub output_cost_per_1k: f64,
    pub currency: String,
    pub updated_at: DateTime<Utc>,
}

/// Provider type enumeration
///
/// Only the providers that need dedicated request/response transcoding get a
/// named variant. Every other OpenAI-wire-compatible family is represented by
/// `Custom`, which still participates in routing, pricing, and the default
/// tokenizer table (see the gateway's tokenizer module).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ProviderType {
    OpenAI,
    Anthropic,
    Bedrock,
    Gemini,
    VertexAI,
    Moonshot,
    Custom(String),
}

impl From<&str> for ProviderType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "openai" => ProviderType::OpenAI,
            "anthropic" => ProviderType::Anthropic,
            "bedrock" | "aws-bedrock" => ProviderType::Bedrock,
            "gemini" | "google" | "google-ai-studio" => ProviderType::Gemini,
            "vertex_ai" | "vertexai" | "vertex-ai" => ProviderType::VertexAI,
            "moonshot" | "moonshot-ai" => ProviderType::Moonshot,
            _ => ProviderType::Custom(s.to_string()),
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::OpenAI => write!(f, "openai"),
            ProviderType::Anthropic => write!(f, "anthropic"),
            ProviderType::Bedrock => write!(f, "bedrock"),
            ProviderType::Gemini => write!(f, "gemini"),
            ProviderType::VertexAI => write!(f, "vertex_ai"),
            ProviderType::Moonshot => write!(f, "moonshot"),
            ProviderType::Custom(name) => write!(f, "{}", name),
        }
    }
}

// ==================== Provider Dispatch Macros ====================
// These macros eliminate repetitive match patterns across all provider methods

/// Macro for dispatching synchronous methods to all providers
macro_rules! dispatch_provider {
    ($self:expr, $method:ident) => {
        match $self {
            Provider::OpenAI(p) => p.$method(),
            Provider::Anthropic(p) => p.$method(),
            Provider::Bedrock(p) => p.$method(),
            Provider::Gemini(p) => p.$method(),
            Provider::VertexAI(p) => p.$method(),
            Provider::Moonshot(p) => p.$method(),
            Provider::Custom(p) => p.$method(),
        }
    };

    ($self:expr, $method:ident, $($arg:expr),+) => {
        match $self {
            Provider::OpenAI(p) => p.$method($($arg),+),
            Provider::Anthropic(p) => p.$method($($arg),+),
            Provider::Bedrock(p) => p.$method($($arg),+),
            Provider::Gemini(p) => p.$method($($arg),+),
            Provider::VertexAI(p) => p.$method($($arg),+),
            Provider::Moonshot(p) => p.$method($($arg),+),
            Provider::Custom(p) => p.$method($($arg),+),
        }
    };
}

/// Macro for dispatching async methods with unified error conversion
macro_rules! dispatch_provider_async {
    ($self:expr, $method:ident, $($arg:expr),*) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
            Provider::Anthropic(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
            Provider::Bedrock(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
            Provider::Gemini(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
            Provider::VertexAI(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
            Provider::Moonshot(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
            Provider::Custom(p) => LLMProvider::$method(p, $($arg),*).await.map_err(ProviderError::from),
        }
    };
}

/// Macro for dispatching methods that return values directly (no Result)
macro_rules! dispatch_provider_value {
    ($self:expr, $method:ident) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p),
            Provider::Anthropic(p) => LLMProvider::$method(p),
            Provider::Bedrock(p) => LLMProvider::$method(p),
            Provider::Gemini(p) => LLMProvider::$method(p),
            Provider::VertexAI(p) => LLMProvider::$method(p),
            Provider::Moonshot(p) => LLMProvider::$method(p),
            Provider::Custom(p) => LLMProvider::$method(p),
        }
    };

    ($self:expr, $method:ident, $($arg:expr),+) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p, $($arg),+),
            Provider::Anthropic(p) => LLMProvider::$method(p, $($arg),+),
            Provider::Bedrock(p) => LLMProvider::$method(p, $($arg),+),
            Provider::Gemini(p) => LLMProvider::$method(p, $($arg),+),
            Provider::VertexAI(p) => LLMProvider::$method(p, $($arg),+),
            Provider::Moonshot(p) => LLMProvider::$method(p, $($arg),+),
            Provider::Custom(p) => LLMProvider::$method(p, $($arg),+),
        }
    };
}

/// Macro for selective provider dispatch with default fallback
/// Use this when only some providers support a method
#[allow(unused_macros)]
macro_rules! dispatch_provider_selective {
    // Dispatch to specific providers only, with a default for others
    ($self:expr, $method:ident, { $($provider:ident),+ }, $default:expr) => {
        match $self {
            $(Provider::$provider(p) => p.$method()),+,
            _ => $default,
        }
    };

    ($self:expr, $method:ident($($arg:expr),+), { $($provider:ident),+ }, $default:expr) => {
        match $self {
            $(Provider::$provider(p) => p.$method($($arg),+)),+,
            _ => $default,
        }
    };
}

/// Macro for dispatching async methods without error transformation
macro_rules! dispatch_provider_async_direct {
    ($self:expr, $method:ident) => {
        match $self {
            Provider::OpenAI(p) => LLMProvider::$method(p).await,
            Provider::Anthropic(p) => LLMProvider::$method(p).await,
            Provider::Bedrock(p) => LLMProvider::$method(p).await,
            Provider::Gemini(p) => LLMProvider::$method(p).await,
            Provider::VertexAI(p) => LLMProvider::$method(p).await,
            Provider::Moonshot(p) => LLMProvider::$method(p).await,
            Provider::Custom(p) => LLMProvider::$method(p).await,
        }
    };
}

/// Unified Provider Enum (Rust-idiomatic design)
///
/// This enum provides zero-cost abstractions and type safety for all providers.
/// Each variant contains a concrete provider implementation. `Custom` carries
/// an OpenAI-wire-compatible client configured with an arbitrary base URL and
/// is how every family outside the five named providers is served.
#[derive(Debug, Clone)]
pub enum Provider {
    OpenAI(openai::OpenAIProvider),
    Anthropic(anthropic::AnthropicProvider),
    Bedrock(bedrock::BedrockProvider),
    Gemini(gemini::GeminiProvider),
    VertexAI(vertex_ai::VertexAIProvider),
    Moonshot(moonshot::MoonshotProvider),
    Custom(openai::OpenAIProvider),
}

impl Provider {
    /// Get provider name
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI(_) => "openai",
            Provider::Anthropic(_) => "anthropic",
            Provider::Bedrock(_) => "bedrock",
            Provider::Gemini(_) => "gemini",
            Provider::VertexAI(_) => "vertex_ai",
            Provider::Moonshot(_) => "moonshot",
            Provider::Custom(_) => "custom",
        }
    }

    /// Get provider type
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Provider::OpenAI(_) => ProviderType::OpenAI,
            Provider::Anthropic(_) => ProviderType::Anthropic,
            Provider::Bedrock(_) => ProviderType::Bedrock,
            Provider::Gemini(_) => ProviderType::Gemini,
            Provider::VertexAI(_) => ProviderType::VertexAI,
            Provider::Moonshot(_) => ProviderType::Moonshot,
            Provider::Custom(_) => ProviderType::Custom("custom".to_string()),
        }
    }

    /// Check if provider supports a specific model
    pub fn supports_model(&self, model: &str) -> bool {
        use crate::core::traits::LLMProvider;
        dispatch_provider_value!(self, supports_model, model)
    }

    /// Get provider capabilities
    pub fn capabilities(&self) -> &'static [ProviderCapability] {
        dispatch_provider!(self, capabilities)
    }

    /// Execute chat completion
    pub async fn chat_completion(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatResponse, UnifiedProviderError> {
        use crate::core::traits::LLMProvider;
        dispatch_provider_async!(self, chat_completion, request, context)
    }

    /// Execute health check
    pub async fn health_check(&self) -> crate::core::types::common::HealthStatus {
        use crate::core::traits::LLMProvider;
        dispatch_provider_async_direct!(self, health_check)
    }

    /// List available models
    pub fn list_models(&self) -> &[crate::core::types::common::ModelInfo] {
        use crate::core::traits::LLMProvider;
        dispatch_provider_value!(self, models)
    }

    /// Calculate cost using unified pricing database
    pub async fn calculate_cost(
        &self,
        model: &str,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Result<f64, UnifiedProviderError> {
        // Use unified pricing database instead of each provider implementing its own
        let usage = crate::core::providers::base::pricing::Usage {
            prompt_tokens: input_tokens,
            completion_tokens: output_tokens,
            total_tokens: input_tokens + output_tokens,
            reasoning_tokens: None,
        };

        Ok(crate::core::providers::base::get_pricing_db().calculate(model, &usage))
    }

    /// Execute streaming chat completion
    pub async fn chat_completion_stream(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<
        std::pin::Pin<
            Box<
                dyn futures::Stream<Item = Result<ChatChunk, UnifiedProviderError>>
                    + Send
                    + 'static,
            >,
        >,
        UnifiedProviderError,
    > {
        use crate::core::traits::LLMProvider;
        use futures::StreamExt;

        match self {
            Provider::OpenAI(p) | Provider::Custom(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context)
                    .await
                    .map_err(ProviderError::from)?;
                let mapped = stream.map(|result| result.map_err(ProviderError::from));
                Ok(Box::pin(mapped))
            }
            Provider::Anthropic(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context)
                    .await
                    .map_err(ProviderError::from)?;
                let mapped = stream.map(|result| result.map_err(ProviderError::from));
                Ok(Box::pin(mapped))
            }
            Provider::Gemini(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context)
                    .await
                    .map_err(ProviderError::from)?;
                let mapped = stream.map(|result| result.map_err(ProviderError::from));
                Ok(Box::pin(mapped))
            }
            Provider::Bedrock(p) => {
                let stream = LLMProvider::chat_completion_stream(p, request, context)
                    .await
                    .map_err(ProviderError::from)?;
                let mapped = stream.map(|result| result.map_err(ProviderError::from));
                Ok(Box::pin(mapped))
            }
            _ => Err(UnifiedProviderError::not_implemented(
                "unknown",
                format!("Streaming not implemented for {}", self.name()),
            )),
        }
    }

    /// Create embeddings
    pub async fn create_embeddings(
        &self,
        request: EmbeddingRequest,
        context: RequestContext,
    ) -> Result<EmbeddingResponse, UnifiedProviderError> {
        use crate::core::traits::LLMProvider;

        match self {
            Provider::OpenAI(p) | Provider::Custom(p) => {
                LLMProvider::embeddings(p, request, context)
                    .await
                    .map_err(ProviderError::from)
            }
            _ => Err(UnifiedProviderError::not_implemented(
                "unknown",
                format!("Embeddings not supported by {}", self.name()),
            )),
        }
    }

    /// Create images
    pub async fn create_images(
        &self,
        request: ImageGenerationRequest,
        context: RequestContext,
    ) -> Result<ImageGenerationResponse, UnifiedProviderError> {
        use crate::core::traits::LLMProvider;

        match self {
            Provider::OpenAI(p) | Provider::Custom(p) => {
                LLMProvider::image_generation(p, request, context)
                    .await
                    .map_err(ProviderError::from)
            }
            _ => Err(UnifiedProviderError::not_implemented(
                "unknown",
                format!("Image generation not supported by {}", self.name()),
            )),
        }
    }

    /// Alias for chat_completion (for backward compatibility)
    pub async fn completion(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatResponse, UnifiedProviderError> {
        self.chat_completion(request, context).await
    }

    /// Alias for create_embeddings (for backward compatibility)
    pub async fn embedding(
        &self,
        request: EmbeddingRequest,
        context: RequestContext,
    ) -> Result<EmbeddingResponse, UnifiedProviderError> {
        self.create_embeddings(request, context).await
    }

    /// Alias for create_images (for backward compatibility)
    pub async fn image_generation(
        &self,
        request: ImageGenerationRequest,
        context: RequestContext,
    ) -> Result<ImageGenerationResponse, UnifiedProviderError> {
        self.create_images(request, context).await
    }

    /// Get model information by ID
    pub async fn get_model(
        &self,
        model_id: &str,
    ) -> Result<Option<crate::core::types::common::ModelInfo>, UnifiedProviderError> {
        let models = self.list_models();
        for model in models {
            if model.id == model_id || model.name == model_id {
                return Ok(Some(model.clone()));
            }
        }
        Ok(None)
    }
}

/// Create a provider from configuration
///
/// This is the main factory function for creating providers
pub async fn create_provider(
    config: crate::core::types::common::ProviderConfig,
) -> Result<Provider, ProviderError> {
    let provider_type = ProviderType::from(config.name.as_str());

    Err(ProviderError::not_implemented(
        "unknown",
        format!(
            "Provider factory for {:?} not yet fully implemented",
            provider_type
        ),
    ))
}

// Provider factory functions
impl Provider {
    /// Create provider from configuration
    ///
    /// This method will be implemented once all providers are migrated to LLMProvider trait
    pub fn from_config(
        provider_type: ProviderType,
        _config: serde_json::Value,
    ) -> Result<Self, ProviderError> {
        match provider_type {
            ProviderType::OpenAI => {
                Err(ProviderError::not_implemented("openai", "factory creation"))
            }
            ProviderType::Anthropic => Err(ProviderError::not_implemented(
                "anthropic",
                "factory creation",
            )),
            _ => Err(ProviderError::not_implemented(
                "unknown",
                format!("Factory for {:?} not implemented", provider_type),
            )),
        }
    }
}
