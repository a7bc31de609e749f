//! Provider handle for routing system
//!
//! Provides a type-erased wrapper for LLMProvider instances used by the router

use crate::core::types::{
    common::{HealthStatus, RequestContext},
    requests::ChatRequest,
    responses::ChatResponse,
};

use super::llm_provider::LLMProvider;

/// Provider handle for routing system
///
/// This struct wraps a concrete provider implementation and provides
/// a uniform interface for the routing system. It uses type erasure
/// to allow heterogeneous provider collections.
///
/// # Design Principles
/// - Type erasure for flexible provider management
/// - Weight-based routing support
/// - Enable/disable functionality for health management
/// - Simplified interface for routing decisions
///
/// # Example
/// ```rust,ignore
/// use crate::core::traits::provider::ProviderHandle;
///
/// // Create a handle with weight 1.0
/// let handle = ProviderHandle::new(my_provider, 1.0);
///
/// // Check if enabled
/// if handle.is_enabled() {
///     // Route request to this provider
///     let response = handle.chat_completion(request, context).await?;
/// }
/// ```
pub struct ProviderHandle {
    name: String,
    provider: std::sync::Arc<dyn std::any::Any + Send + Sync>,
    weight: f64,
    enabled: bool,
}

impl ProviderHandle {
    /// Create a new provider handle
    ///
    /// # Parameters
    /// * `provider` - The provider instance to wrap
    /// * `weight` - Routing weight (higher values = more traffic)
    ///
    /// # Returns
    /// A new ProviderHandle with the provider enabled by default
    ///
    /// # Type Parameters
    /// * `P` - Any type implementing LLMProvider
    pub fn new<P>(provider: P, weight: f64) -> Self
    where
        P: LLMProvider + Send + Sync + 'static,
    {
        Self {
            name: provider.name().to_string(),
            provider: std::sync::Arc::new(provider)
                as std::sync::Arc<dyn std::any::Any + Send + Sync>,
            weight,
            enabled: true,
        }
    }

    /// Get provider name
    ///
    /// # Returns
    /// The provider's identifier string
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get routing weight
    ///
    /// # Returns
    /// The weight used for weighted routing strategies
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Check if provider is enabled
    ///
    /// # Returns
    /// `true` if the provider can receive traffic, `false` otherwise
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set enabled state
    ///
    /// # Parameters
    /// * `enabled` - Whether to enable or disable this provider
    ///
    /// # Use Cases
    /// - Disable unhealthy providers automatically
    /// - Manual traffic control
    /// - Gradual rollout/rollback
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Execute chat completion request
    ///
    /// # Parameters
    /// * `request` - Chat completion request
    /// * `context` - Request context with metadata
    ///
    /// # Returns
    /// Chat completion response
    ///
    /// # Note
    /// This is a simplified implementation. In a real system, you would need
    /// to properly downcast the provider and call its chat_completion method.
    pub async fn chat_completion(
        &self,
        _request: ChatRequest,
        _context: RequestContext,
    ) -> Result<ChatResponse, Box<dyn std::error::Error + Send + Sync>> {
        // This is a simplified implementation - in a real system,
        // you'd need to properly downcast and handle the provider
        Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Provider chat_completion not implemented",
        )))
    }

    /// Check if model is supported
    ///
    /// # Parameters
    /// * `model` - Model name to check
    ///
    /// # Returns
    /// `true` if the model is supported
    ///
    /// # Note
    /// Simplified implementation - returns true for all models
    pub fn supports_model(&self, _model: &str) -> bool {
        // Simplified implementation
        true
    }

    /// Check if tools are supported
    ///
    /// # Returns
    /// `true` if tool calling is supported
    ///
    /// # Note
    /// Simplified implementation - returns true
    pub fn supports_tools(&self) -> bool {
        // Simplified implementation
        true
    }

    /// Check provider health status
    ///
    /// # Returns
    /// Health status of the provider
    ///
    /// # Note
    /// Simplified implementation - always returns Healthy
    pub async fn health_check(&self) -> HealthStatus {
        // Simplified implementation
        HealthStatus::Healthy
    }

    /// Calculate request cost
    ///
    /// # Parameters
    /// * `model` - Model name used
    /// * `input` - Number of input tokens
    /// * `output` - Number of output tokens
    ///
    /// # Returns
    /// Estimated cost in USD
    ///
    /// # Note
    /// Simplified implementation - returns 0.0
    pub async fn calculate_cost(
        &self,
        _model: &str,
        _input: u32,
        _output: u32,
    ) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        // Simplified implementation
        Ok(0.0)
    }

    /// Get average response latency
    ///
    /// # Returns
    /// Average latency for this provider
    ///
    /// # Note
    /// Simplified implementation - returns 100ms
    pub async fn get_average_latency(
        &self,
    ) -> Result<std::time::Duration, Box<dyn std::error::Error + Send + Sync>> {
        // Simplified implementation
        Ok(std::time::Duration::from_millis(100))
    }

    /// Get success rate
    ///
    /// # Returns
    /// Success rate between 0.0 and 1.0
    ///
    /// # Note
    /// Simplified implementation - returns 1.0 (100%)
    pub async fn get_success_rate(&self) -> Result<f32, Box<dyn std::error::Error + Send + Sync>> {
        // Simplified implementation
        Ok(1.0)
    }
}
