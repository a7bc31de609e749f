//! Capability Filter (C4): given a model id, produces the set of eligible
//! `(model, provider)` mappings for a request by applying the filters in
//! order. Grounded in `core::routing::engine::ModelMappingSource` for the
//! read-only catalog seam (pricing-catalog storage is an external
//! collaborator per scope) and `core::types::common::ProviderCapability` for
//! the capability flags already modeled on `ModelInfo`.

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::core::gateway::envelope::RequestEnvelope;
use crate::core::tokenizer::TokenizerFamily;
use crate::core::types::tools::ToolType;

/// Google finish reasons that indicate a safety block rather than a genuinely
/// empty response, consulted identically by the unary and streaming
/// empty-response reclassification paths.
pub const GOOGLE_SAFETY_FINISH_REASONS: &[&str] =
    &["SAFETY", "PROHIBITED_CONTENT", "RECITATION", "BLOCKLIST", "SPII", "OTHER"];

/// The auto-route allowlist consulted in branch (a) of C5 unless
/// `free_models_only` is set, in which case it is ignored (spec §9 Open
/// Question 3).
pub const AUTO_ALLOWLIST: &[&str] = &["gpt-oss-120b", "gpt-5-nano", "gpt-4.1-nano"];

/// A finish with no text, no tool calls, and zero completion tokens is
/// reclassified to an upstream error (spec §4.9/§4.10), unless
/// `finish_reason` names one of the Google safety-block reasons, in which
/// case the empty response is a legitimate content block rather than a
/// provider malfunction. Consulted identically by the unary response path
/// and the streaming finalization path.
pub fn is_upstream_empty_response(
    finish_reason: Option<&str>,
    has_content: bool,
    has_tool_calls: bool,
    completion_tokens: u32,
) -> bool {
    if has_content || has_tool_calls || completion_tokens > 0 {
        return false;
    }
    match finish_reason {
        Some(reason) => !GOOGLE_SAFETY_FINISH_REASONS.contains(&reason),
        None => true,
    }
}

/// One `(model, provider)` entry in the pricing/capability catalog.
#[derive(Debug, Clone)]
pub struct ProviderMapping {
    pub provider_id: String,
    pub model_name: String,
    pub input_price: f64,
    pub output_price: f64,
    pub cached_input_price: Option<f64>,
    pub request_price: Option<f64>,
    pub image_input_price: Option<f64>,
    pub image_output_price: Option<f64>,
    pub context_size: u32,
    pub max_output: u32,
    pub vision: bool,
    pub tools: bool,
    pub reasoning: bool,
    pub reasoning_max_tokens: bool,
    pub json_output: bool,
    pub json_output_schema: bool,
    pub streaming: bool,
    pub web_search: bool,
    pub image_generations: bool,
    pub supported_parameters: Vec<String>,
    pub stability: Option<String>,
    pub deprecated_at: Option<i64>,
    pub deactivated_at: Option<i64>,
    pub discount: Option<f64>,
}

impl ProviderMapping {
    fn is_live(&self, now: i64, allow_deprecated: bool) -> bool {
        if self.deactivated_at.is_some_and(|t| t <= now) {
            return false;
        }
        if !allow_deprecated && self.deprecated_at.is_some_and(|t| t <= now) {
            return false;
        }
        true
    }
}

/// `id, family, free, output modalities, providers[]` (spec §3 Model
/// Definition).
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    pub id: String,
    pub family: String,
    pub free: bool,
    pub providers: Vec<ProviderMapping>,
}

/// Read-only catalog source; the actual pricing table lives in storage,
/// which is an external collaborator per scope.
pub trait ModelCatalogSource: Send + Sync {
    fn model(&self, id: &str) -> Option<ModelDefinition>;
    fn all_models(&self) -> Vec<ModelDefinition>;
}

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("model `{0}` is not in the catalog")]
    UnknownModel(String),
    #[error("no provider for `{model}` supports {missing}")]
    NoEligibleMapping { model: String, missing: &'static str },
    #[error("custom provider is not configured for this organization")]
    CustomProviderNotConfigured,
}

/// Inputs to the filter beyond the envelope itself: derived at the call
/// site so this module stays free of tokenizer/IAM wiring concerns.
pub struct FilterContext<'a> {
    pub estimated_prompt_tokens: u32,
    pub tools_tokens: u32,
    pub iam_allowed_providers: Option<&'a [String]>,
    pub is_auto_selection: bool,
    pub now_unix: i64,
}

impl Default for FilterContext<'_> {
    fn default() -> Self {
        Self {
            estimated_prompt_tokens: 0,
            tools_tokens: 0,
            iam_allowed_providers: None,
            is_auto_selection: false,
            now_unix: now_unix_fallback(),
        }
    }
}

fn now_unix_fallback() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0)
}

/// Applies the eleven filters of spec §4.4 in order, returning the
/// surviving mappings or the first missing capability.
pub fn eligible_mappings(
    model: &ModelDefinition,
    envelope: &RequestEnvelope,
    ctx: &FilterContext<'_>,
) -> Result<Vec<ProviderMapping>, CapabilityError> {
    let has_tools = envelope.chat_request.tools.is_some() || envelope.chat_request.tool_choice.is_some();
    let wants_web_search = envelope
        .chat_request
        .tools
        .as_ref()
        .is_some_and(|ts| ts.iter().any(|t| t.tool_type == ToolType::WebSearch));
    let wants_json = envelope.chat_request.response_format.as_ref().map(|f| f.format_type.as_str());
    let max_tokens_needed = envelope.chat_request.max_tokens.unwrap_or(4096);
    let required_context =
        ctx.estimated_prompt_tokens + ctx.tools_tokens + max_tokens_needed;
    let has_images = envelope
        .chat_request
        .messages
        .iter()
        .any(|m| matches!(&m.content, Some(crate::core::types::message::MessageContent::Parts(parts))
            if parts.iter().any(|p| matches!(p, crate::core::types::content::ContentPart::ImageUrl { .. }))));

    let mut missing: Option<&'static str> = None;
    let mut out = Vec::new();

    for mapping in &model.providers {
        if !mapping.is_live(ctx.now_unix, false) {
            continue;
        }
        if mapping.context_size < required_context {
            missing.get_or_insert("context_size");
            continue;
        }
        if envelope.no_reasoning && mapping.reasoning {
            missing.get_or_insert("no_reasoning");
            continue;
        }
        if envelope.reasoning_effort().is_some() && !mapping.reasoning {
            missing.get_or_insert("reasoning");
            continue;
        }
        if envelope.reasoning.as_ref().is_some_and(|r| r.max_tokens.is_some()) && !mapping.reasoning_max_tokens {
            missing.get_or_insert("reasoning_max_tokens");
            continue;
        }
        if has_tools && !mapping.tools {
            missing.get_or_insert("tools");
            continue;
        }
        if wants_web_search && !mapping.web_search {
            missing.get_or_insert("web_search");
            continue;
        }
        match wants_json {
            Some("json_object") if !mapping.json_output => {
                missing.get_or_insert("json_output");
                continue;
            }
            Some("json_schema") => {
                if !mapping.json_output {
                    missing.get_or_insert("json_output");
                    continue;
                }
                if !mapping.json_output_schema {
                    missing.get_or_insert("json_output_schema");
                    continue;
                }
            }
            _ => {}
        }
        if has_images && !mapping.vision {
            missing.get_or_insert("vision");
            continue;
        }
        if let Some(allowed) = ctx.iam_allowed_providers {
            if !allowed.iter().any(|p| p == &mapping.provider_id) {
                missing.get_or_insert("iam_allowed_providers");
                continue;
            }
        }
        if ctx.is_auto_selection && !envelope.free_models_only && !AUTO_ALLOWLIST.contains(&model.id.as_str()) {
            missing.get_or_insert("auto_allowlist");
            continue;
        }
        if ctx.is_auto_selection && envelope.free_models_only && !model.free {
            missing.get_or_insert("free_models_only");
            continue;
        }

        out.push(mapping.clone());
    }

    if out.is_empty() {
        return Err(CapabilityError::NoEligibleMapping {
            model: model.id.clone(),
            missing: missing.unwrap_or("capability"),
        });
    }
    Ok(out)
}

/// Estimates `required_context_size` for auto-route candidate filtering:
/// a tokenizer pass over messages and tools, falling back to `chars/4`.
pub fn estimate_prompt_tokens(envelope: &RequestEnvelope, family: TokenizerFamily) -> u32 {
    let mut total = 0u32;
    for message in &envelope.chat_request.messages {
        if let Some(crate::core::types::message::MessageContent::Text(text)) = &message.content {
            total += family.count(text);
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gateway::envelope::{normalize, InboundHeaders};

    #[test]
    fn empty_response_without_safety_finish_is_an_error() {
        assert!(is_upstream_empty_response(Some("STOP"), false, false, 0));
        assert!(is_upstream_empty_response(None, false, false, 0));
    }

    #[test]
    fn empty_response_with_safety_finish_is_not_an_error() {
        assert!(!is_upstream_empty_response(Some("SAFETY"), false, false, 0));
        assert!(!is_upstream_empty_response(Some("PROHIBITED_CONTENT"), false, false, 0));
    }

    #[test]
    fn non_empty_response_is_never_reclassified() {
        assert!(!is_upstream_empty_response(Some("STOP"), true, false, 0));
        assert!(!is_upstream_empty_response(Some("STOP"), false, true, 0));
        assert!(!is_upstream_empty_response(Some("STOP"), false, false, 12));
    }

    fn mapping(provider: &str) -> ProviderMapping {
        ProviderMapping {
            provider_id: provider.to_string(),
            model_name: "m".to_string(),
            input_price: 1.0,
            output_price: 1.0,
            cached_input_price: None,
            request_price: None,
            image_input_price: None,
            image_output_price: None,
            context_size: 128_000,
            max_output: 4096,
            vision: false,
            tools: false,
            reasoning: false,
            reasoning_max_tokens: false,
            json_output: false,
            json_output_schema: false,
            streaming: true,
            web_search: false,
            image_generations: false,
            supported_parameters: vec![],
            stability: None,
            deprecated_at: None,
            deactivated_at: None,
            discount: None,
        }
    }

    fn envelope() -> RequestEnvelope {
        let body = br#"{"model":"gpt-4o","messages":[{"role":"user","content":"hi"}]}"#;
        normalize(body, InboundHeaders::default()).unwrap()
    }

    #[test]
    fn filters_out_deactivated_mapping() {
        let mut m = mapping("openai");
        m.deactivated_at = Some(0);
        let model = ModelDefinition { id: "gpt-4o".to_string(), family: "gpt".to_string(), free: false, providers: vec![m] };
        let err = eligible_mappings(&model, &envelope(), &FilterContext::default()).unwrap_err();
        assert!(matches!(err, CapabilityError::NoEligibleMapping { .. }));
    }

    #[test]
    fn keeps_live_mapping() {
        let model = ModelDefinition { id: "gpt-4o".to_string(), family: "gpt".to_string(), free: false, providers: vec![mapping("openai")] };
        let out = eligible_mappings(&model, &envelope(), &FilterContext::default()).unwrap();
        assert_eq!(out.len(), 1);
    }
}
