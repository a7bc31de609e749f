//! Vertex AI Context Caching Module
//!
//! Support for caching contexts to reduce costs and improve performance

use super::error::VertexAIError;
use serde::{Deserialize, Serialize};

/// Context cache entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextCacheEntry {
    pub cache_id: String,
    pub model: String,
    pub content: serde_json::Value,
    pub ttl_seconds: u64,
    pub created_at: i64,
}

/// Context caching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextCachingConfig {
    pub enabled: bool,
    pub max_cache_size: usize,
    pub default_ttl: u64,
    pub max_context_length: usize,
}

impl Default for ContextCachingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_cache_size: 1000,
            default_ttl: 3600, // 1 hour
            max_context_length: 32768,
        }
    }
}

/// Context caching handler
pub struct ContextCachingHandler {
    config: ContextCachingConfig,
}

impl ContextCachingHandler {
    /// Create new context caching handler
    pub fn new(config: ContextCachingConfig) -> Self {
        Self { config }
    }

    /// Cache context for reuse
    pub async fn cache_context(
        &self,
        model: &str,
        content: serde_json::Value,
    ) -> Result<String, VertexAIError> {
        if !self.config.enabled {
            return Err(VertexAIError::FeatureDisabled(
                "context_caching".to_string(),
            ));
        }

        let cache_id = uuid::Uuid::new_v4().to_string();
        let _entry = ContextCacheEntry {
            cache_id: cache_id.clone(),
            model: model.to_string(),
            content,
            ttl_seconds: self.config.default_ttl,
            created_at: chrono::Utc::now().timestamp(),
        };

        // TODO: Implement actual caching storage
        Ok(cache_id)
    }

    /// Retrieve cached context
    pub async fn get_cached_context(
        &self,
        _cache_id: &str,
    ) -> Result<Option<ContextCacheEntry>, VertexAIError> {
        // TODO: Implement cache retrieval
        Ok(None)
    }

    /// Check if context can be cached
    pub fn can_cache_context(&self, content: &serde_json::Value) -> bool {
        if !self.config.enabled {
            return false;
        }

        // Estimate context length
        let content_str = content.to_string();
        content_str.len() <= self.config.max_context_length
    }

    /// Transform request to use cached context
    pub fn transform_with_cache(
        &self,
        request: serde_json::Value,
        cache_id: &str,
    ) -> Result<serde_json::Value, VertexAIError> {
        let mut transformed = request;

        // Add cache reference to request
        if let Some(obj) = transformed.as_object_mut() {
            obj.insert(
                "cachedContent".to_string(),
                serde_json::json!({
                    "name": cache_id
                }),
            );
        }

        Ok(transformed)
    }

    /// Clean expired cache entries
    pub async fn cleanup_expired_cache(&self) -> Result<usize, VertexAIError> {
        // TODO: Implement cache cleanup
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_cache_context() {
        let config = ContextCachingConfig::default();
        let handler = ContextCachingHandler::new(config);

        let small_content = serde_json::json!({"text": "Hello world"});
        assert!(handler.can_cache_context(&small_content));

        let large_content = serde_json::json!({"text": "x".repeat(50000)});
        assert!(!handler.can_cache_context(&large_content));
    }

    #[test]
    fn test_transform_with_cache() {
        let config = ContextCachingConfig::default();
        let handler = ContextCachingHandler::new(config);

        let request = serde_json::json!({
            "messages": [{"role": "user", "content": "Hello"}]
        });

        let result = handler.transform_with_cache(request, "cache-123").unwrap();
        assert!(result.get("cachedContent").is_some());
    }
}
