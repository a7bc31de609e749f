//! Request Normalizer (C1): validates the inbound JSON body, extracts
//! request-scoped headers, and produces an immutable [`RequestEnvelope`].
//!
//! Grounded in `core::types::chat::ChatRequest` for the OpenAI-compatible
//! fields; gateway-specific extensions (`reasoning_effort`, `web_search`,
//! `image_config`, `plugins`, ...) are pulled out of `ChatRequest::extra_params`
//! since they are not part of the wire-compatible core request shape.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::chat::ChatRequest;
use crate::core::types::tools::{Tool, ToolType};

/// Parsed `reasoning_effort` / `reasoning.effort` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Minimal,
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "none" => None,
            "minimal" => Some(Self::Minimal),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// `reasoning: {effort?, max_tokens?}` request field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReasoningConfig {
    pub effort: Option<ReasoningEffort>,
    pub max_tokens: Option<u32>,
}

/// `image_config: {image_size?, aspect_ratio?, n?}` request field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageConfig {
    pub image_size: Option<String>,
    pub aspect_ratio: Option<String>,
    pub n: Option<u32>,
}

/// One entry of the `plugins[]` request field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRef {
    pub id: String,
}

/// Immutable, per-request value produced by C1. Carries the parsed model
/// identifier plus every gateway-specific extension alongside the
/// OpenAI-compatible `ChatRequest`.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    pub request_id: String,
    pub requested_provider: Option<String>,
    pub requested_model: String,
    pub chat_request: ChatRequest,
    pub reasoning: Option<ReasoningConfig>,
    pub effort: Option<String>,
    pub web_search: bool,
    pub free_models_only: bool,
    pub no_reasoning: bool,
    pub image_config: Option<ImageConfig>,
    pub plugins: Vec<PluginRef>,
    pub custom_headers: Vec<(String, String)>,
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub no_fallback: bool,
    pub debug_mode: bool,
}

impl RequestEnvelope {
    /// `at most one of top-level reasoning_effort or reasoning.effort is set`.
    pub fn reasoning_effort(&self) -> Option<ReasoningEffort> {
        self.reasoning.as_ref().and_then(|r| r.effort)
    }

    pub fn is_auto(&self) -> bool {
        self.requested_model == "auto"
    }

    pub fn is_custom(&self) -> bool {
        self.requested_provider.as_deref() == Some("custom")
    }
}

#[derive(Debug, Error)]
pub enum NormalizerError {
    #[error("invalid_json: {0}")]
    InvalidJson(String),
    #[error("invalid_parameters: {0}")]
    InvalidParameters(String),
}

/// Headers consumed by C1, already lowercased by the HTTP layer.
#[derive(Debug, Default, Clone)]
pub struct InboundHeaders {
    pub request_id: Option<String>,
    pub debug: bool,
    pub source: Option<String>,
    pub no_fallback: bool,
    pub user_agent: Option<String>,
    pub custom: Vec<(String, String)>,
}

/// Parses and validates the raw JSON body, producing a [`RequestEnvelope`].
pub fn normalize(body: &[u8], headers: InboundHeaders) -> Result<RequestEnvelope, NormalizerError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| NormalizerError::InvalidJson(e.to_string()))?;

    let mut chat_request: ChatRequest = serde_json::from_value(value.clone())
        .map_err(|e| NormalizerError::InvalidParameters(e.to_string()))?;

    if chat_request.model.trim().is_empty() {
        return Err(NormalizerError::InvalidParameters(
            "model is required".to_string(),
        ));
    }
    if chat_request.messages.is_empty() {
        return Err(NormalizerError::InvalidParameters(
            "messages must not be empty".to_string(),
        ));
    }

    let (requested_provider, requested_model) = split_model(&chat_request.model);

    let reasoning_effort_top_level = chat_request
        .extra_params
        .remove("reasoning_effort")
        .and_then(|v| v.as_str().map(ReasoningEffort::parse));
    let reasoning_field: Option<ReasoningConfig> = chat_request
        .extra_params
        .remove("reasoning")
        .and_then(|v| serde_json::from_value(v).ok());

    if reasoning_effort_top_level.flatten().is_some()
        && reasoning_field.as_ref().and_then(|r| r.effort).is_some()
    {
        return Err(NormalizerError::InvalidParameters(
            "only one of reasoning_effort or reasoning.effort may be set".to_string(),
        ));
    }

    let reasoning = match (reasoning_effort_top_level.flatten(), reasoning_field) {
        (Some(effort), None) => Some(ReasoningConfig {
            effort: Some(effort),
            max_tokens: None,
        }),
        (None, Some(cfg)) => Some(cfg),
        (None, None) => None,
        (Some(effort), Some(mut cfg)) => {
            cfg.effort = Some(effort);
            Some(cfg)
        }
    };

    let effort = chat_request
        .extra_params
        .remove("effort")
        .and_then(|v| v.as_str().map(str::to_string));
    let web_search = chat_request
        .extra_params
        .remove("web_search")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let free_models_only = chat_request
        .extra_params
        .remove("free_models_only")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let no_reasoning = chat_request
        .extra_params
        .remove("no_reasoning")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let image_config: Option<ImageConfig> = chat_request
        .extra_params
        .remove("image_config")
        .and_then(|v| serde_json::from_value(v).ok());
    let plugins: Vec<PluginRef> = chat_request
        .extra_params
        .remove("plugins")
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();
    let no_fallback_body = chat_request
        .extra_params
        .remove("no_fallback")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    if web_search && !has_web_search_tool(&chat_request.tools) {
        let tool = synthesize_web_search_tool();
        chat_request.tools.get_or_insert_with(Vec::new).push(tool);
    }

    let request_id = headers
        .request_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_request_id);

    Ok(RequestEnvelope {
        request_id,
        requested_provider,
        requested_model,
        chat_request,
        reasoning,
        effort,
        web_search,
        free_models_only,
        no_reasoning,
        image_config,
        plugins,
        custom_headers: headers.custom,
        source: headers.source,
        user_agent: headers.user_agent,
        no_fallback: headers.no_fallback || no_fallback_body,
        debug_mode: headers.debug,
    })
}

/// Splits `[provider/]model` into its optional provider prefix and model id.
/// `auto` and `custom` pass through as bare model identifiers; C5/C6 give
/// them special handling.
fn split_model(model: &str) -> (Option<String>, String) {
    match model.split_once('/') {
        Some((provider, rest)) if !provider.is_empty() && !rest.is_empty() => {
            (Some(provider.to_string()), rest.to_string())
        }
        _ => (None, model.to_string()),
    }
}

fn has_web_search_tool(tools: &Option<Vec<Tool>>) -> bool {
    tools
        .as_ref()
        .is_some_and(|ts| ts.iter().any(|t| t.tool_type == ToolType::WebSearch))
}

fn synthesize_web_search_tool() -> Tool {
    serde_json::from_value(serde_json::json!({
        "type": "web_search"
    }))
    .expect("static web_search tool literal is well-formed")
}

fn generate_request_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..40)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_provider_and_model() {
        assert_eq!(
            split_model("openai/gpt-4o"),
            (Some("openai".to_string()), "gpt-4o".to_string())
        );
        assert_eq!(split_model("auto"), (None, "auto".to_string()));
    }

    #[test]
    fn rejects_empty_messages() {
        let body = br#"{"model":"auto","messages":[]}"#;
        let err = normalize(body, InboundHeaders::default()).unwrap_err();
        assert!(matches!(err, NormalizerError::InvalidParameters(_)));
    }

    #[test]
    fn generates_request_id_when_header_absent() {
        let body = br#"{"model":"auto","messages":[{"role":"user","content":"hi"}]}"#;
        let envelope = normalize(body, InboundHeaders::default()).unwrap();
        assert_eq!(envelope.request_id.len(), 40);
    }

    #[test]
    fn rejects_conflicting_reasoning_fields() {
        let body = br#"{"model":"auto","messages":[{"role":"user","content":"hi"}],"reasoning_effort":"low","reasoning":{"effort":"high"}}"#;
        let err = normalize(body, InboundHeaders::default()).unwrap_err();
        assert!(matches!(err, NormalizerError::InvalidParameters(_)));
    }
}
