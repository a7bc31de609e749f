//! The `LLMProvider` trait: the single seam every wire-format transcoder
//! implements. `core::providers::Provider` dispatches to whichever concrete
//! provider struct backs a given variant through this trait.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::types::ChatCompletionStream;
use crate::core::traits::error_mapper::ErrorMapper;
use crate::core::traits::provider::ProviderConfig;
use crate::core::types::common::{HealthStatus, ModelInfo, ProviderCapability, RequestContext};
use crate::core::types::errors::ProviderErrorTrait;
use crate::core::types::requests::{ChatRequest, EmbeddingRequest, ImageGenerationRequest};
use crate::core::types::responses::{ChatResponse, EmbeddingResponse, ImageGenerationResponse};

/// Unified interface every AI provider implements.
///
/// Implementors own exactly one concern: translating between the client's
/// OpenAI-compatible wire format and their own provider's native request and
/// response shapes. Routing, retry, caching, and cost accounting all live
/// above this trait in `core::routing` and `core::gateway`.
#[async_trait]
pub trait LLMProvider: Send + Sync + std::fmt::Debug {
    /// This provider's configuration type.
    type Config: ProviderConfig;
    /// This provider's error type. Most providers alias this directly to the
    /// unified `ProviderError`; a provider with genuinely distinct failure
    /// modes (OpenAI) can use its own enum as long as it implements
    /// [`ProviderErrorTrait`].
    type Error: ProviderErrorTrait;
    /// Maps HTTP/JSON/network failures into `Self::Error`.
    type ErrorMapper: ErrorMapper<Self::Error>;

    /// Stable provider identifier, e.g. `"openai"`, `"anthropic"`.
    fn name(&self) -> &'static str;

    /// Capabilities this provider supports, independent of any specific model.
    fn capabilities(&self) -> &'static [ProviderCapability];

    /// Models this provider exposes, with per-model capability/pricing hints.
    fn models(&self) -> &[ModelInfo];

    /// Whether this provider serves `model` (by exact id or known alias).
    ///
    /// Default checks the model registry returned by [`Self::models`];
    /// override when model support is determined some other way (e.g. a
    /// dynamic registry keyed by more than exact id).
    fn supports_model(&self, model: &str) -> bool {
        self.models().iter().any(|m| m.id == model)
    }

    /// Whether this provider accepts `tools`/`tool_choice` parameters.
    fn supports_tools(&self) -> bool {
        self.capabilities().contains(&ProviderCapability::ToolCalling)
    }

    /// Whether [`Self::chat_completion_stream`] is meaningfully supported.
    fn supports_streaming(&self) -> bool {
        self.capabilities()
            .contains(&ProviderCapability::ChatCompletionStream)
    }

    /// Whether [`Self::image_generation`] is meaningfully supported.
    fn supports_image_generation(&self) -> bool {
        self.capabilities()
            .contains(&ProviderCapability::ImageGeneration)
    }

    /// Whether [`Self::embeddings`] is meaningfully supported.
    fn supports_embeddings(&self) -> bool {
        self.capabilities().contains(&ProviderCapability::Embeddings)
    }

    /// Whether this provider accepts multimodal image inputs in messages.
    /// No `ProviderCapability` variant currently tracks this; providers that
    /// support it override this to `true`.
    fn supports_vision(&self) -> bool {
        false
    }

    /// OpenAI-compatible request parameters this provider's `model` accepts,
    /// used by the request normalizer to drop unsupported fields up front.
    fn get_supported_openai_params(&self, model: &str) -> &'static [&'static str];

    /// Translate accepted OpenAI-compatible parameters into this provider's
    /// native parameter names/shapes, dropping anything it doesn't support.
    async fn map_openai_params(
        &self,
        params: HashMap<String, Value>,
        model: &str,
    ) -> Result<HashMap<String, Value>, Self::Error>;

    /// Build the provider-native request body for `request`.
    async fn transform_request(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<Value, Self::Error>;

    /// Parse a provider-native response body into the unified response shape.
    async fn transform_response(
        &self,
        raw_response: &[u8],
        model: &str,
        request_id: &str,
    ) -> Result<ChatResponse, Self::Error>;

    /// This provider's error mapper, used to classify raw HTTP/JSON/network
    /// failures before they are surfaced to the retry orchestrator.
    fn get_error_mapper(&self) -> Self::ErrorMapper;

    /// Perform a non-streaming chat completion.
    async fn chat_completion(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatResponse, Self::Error>;

    /// Perform a streaming chat completion, returning a stream of
    /// client-format chunks. The cross-chunk SSE reassembly and
    /// provider-native event transcoding both happen inside this call.
    async fn chat_completion_stream(
        &self,
        request: ChatRequest,
        context: RequestContext,
    ) -> Result<ChatCompletionStream<Self::Error>, Self::Error>;

    /// Create embeddings. Default rejects with `not_supported`; override for
    /// providers that expose an embeddings endpoint.
    async fn embeddings(
        &self,
        _request: EmbeddingRequest,
        _context: RequestContext,
    ) -> Result<EmbeddingResponse, Self::Error> {
        Err(Self::Error::not_supported("embeddings"))
    }

    /// Generate images. Default rejects with `not_supported`; override for
    /// providers that expose an image generation endpoint.
    async fn image_generation(
        &self,
        _request: ImageGenerationRequest,
        _context: RequestContext,
    ) -> Result<ImageGenerationResponse, Self::Error> {
        Err(Self::Error::not_supported("image_generation"))
    }

    /// Lightweight liveness probe, used by the monitoring health checker.
    async fn health_check(&self) -> HealthStatus;

    /// Estimate the cost, in the provider's billing currency, of a completed
    /// request given its token counts.
    async fn calculate_cost(
        &self,
        model: &str,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Result<f64, Self::Error>;
}
