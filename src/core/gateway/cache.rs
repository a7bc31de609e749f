//! Cache Layer (C7): content-addressed lookup/store for unary responses and
//! streaming chunk sequences. Grounded in `core::cache_manager`'s
//! `CacheEntry<T>`/TTL shape and the teacher's two-tier (local `moka` +
//! remote `CacheStore`) design (SPEC_FULL §10), generalized to the exact key
//! schema spec §4.7 calls for: `(provider, model, messages, sampling,
//! response_format, reasoning)`.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::types::chat::ChatRequest;

/// Deterministic hash over the fields spec §4.7 names, plus a streaming
/// discriminator so unary and streaming entries never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
    pub fn build(provider: &str, model: &str, request: &ChatRequest, reasoning_effort: Option<&str>, streaming: bool) -> Self {
        let mut hasher = DefaultHasher::new();
        provider.hash(&mut hasher);
        model.hash(&mut hasher);
        streaming.hash(&mut hasher);
        for message in &request.messages {
            message.role.to_string().hash(&mut hasher);
            if let Some(content) = &message.content {
                content.to_string().hash(&mut hasher);
            }
        }
        hash_f32(&mut hasher, request.temperature);
        hash_f32(&mut hasher, request.top_p);
        hash_f32(&mut hasher, request.frequency_penalty);
        hash_f32(&mut hasher, request.presence_penalty);
        request.max_tokens.hash(&mut hasher);
        if let Some(fmt) = &request.response_format {
            fmt.format_type.hash(&mut hasher);
        }
        reasoning_effort.hash(&mut hasher);
        Self(hasher.finish())
    }
}

fn hash_f32<H: Hasher>(hasher: &mut H, value: Option<f32>) {
    value.map(f32::to_bits).hash(hasher);
}

/// Stored unary response: the full client-format response plus the usage it
/// was priced from, so a cache hit can recompute cost under current pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub response_json: serde_json::Value,
    pub model: String,
    pub provider: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub cached_tokens: Option<u32>,
    pub reasoning_tokens: Option<u32>,
}

/// One persisted streaming chunk, replayed honoring `relative_timestamp_ms`
/// capped at 1s per gap (spec §4.7).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingCacheChunk {
    pub data: String,
    pub event_id: u64,
    pub event: Option<String>,
    pub relative_timestamp_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingCacheMetadata {
    pub model: String,
    pub provider: String,
    pub finish_reason: Option<String>,
    pub duration_ms: u64,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingCacheEntry {
    pub chunks: Vec<StreamingCacheChunk>,
    pub metadata: StreamingCacheMetadata,
}

/// External cache backend (Redis/Moka-fronted per SPEC_FULL §10); kept as a
/// trait so this module carries no storage dependency of its own.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    async fn get_unary(&self, key: CacheKey) -> Option<CacheEntry>;
    async fn put_unary(&self, key: CacheKey, entry: CacheEntry, ttl: Duration);
    async fn get_streaming(&self, key: CacheKey) -> Option<StreamingCacheEntry>;
    async fn put_streaming(&self, key: CacheKey, entry: StreamingCacheEntry, ttl: Duration);
}

/// Replay delay for one chunk gap, capped at 1s (spec §4.7).
pub fn capped_gap(previous_ms: u64, current_ms: u64) -> Duration {
    let delta = current_ms.saturating_sub(previous_ms);
    Duration::from_millis(delta.min(1000))
}

/// A streaming entry is only persisted when it completed with a finish
/// reason and without error (spec §4.7).
pub fn should_persist_stream(metadata: &StreamingCacheMetadata, had_error: bool) -> bool {
    metadata.completed && metadata.finish_reason.is_some() && !had_error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::chat::{ChatMessage, ChatRequest};
    use crate::core::types::message::{MessageContent, MessageRole};

    fn request(model: &str) -> ChatRequest {
        let mut request = ChatRequest::new(model);
        request.messages.push(ChatMessage {
            role: MessageRole::User,
            content: Some(MessageContent::Text("hi".to_string())),
            name: None,
            tool_calls: None,
            tool_call_id: None,
            function_call: None,
        });
        request
    }

    #[test]
    fn identical_requests_hash_identically() {
        let a = CacheKey::build("openai", "gpt-4o", &request("gpt-4o"), None, false);
        let b = CacheKey::build("openai", "gpt-4o", &request("gpt-4o"), None, false);
        assert_eq!(a, b);
    }

    #[test]
    fn streaming_discriminator_changes_the_key() {
        let unary = CacheKey::build("openai", "gpt-4o", &request("gpt-4o"), None, false);
        let streaming = CacheKey::build("openai", "gpt-4o", &request("gpt-4o"), None, true);
        assert_ne!(unary, streaming);
    }

    #[test]
    fn gap_is_capped_at_one_second() {
        assert_eq!(capped_gap(0, 5000), Duration::from_millis(1000));
        assert_eq!(capped_gap(0, 300), Duration::from_millis(300));
    }

    #[test]
    fn incomplete_stream_is_not_persisted() {
        let metadata = StreamingCacheMetadata { model: "m".to_string(), provider: "p".to_string(), finish_reason: None, duration_ms: 10, completed: false };
        assert!(!should_persist_stream(&metadata, false));
    }
}
