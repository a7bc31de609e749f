//! The `Pipeline`: wires C1-C13 into the control flow described in SPEC_FULL
//! §2 - `C1 -> C2 -> C3 -> C4 -> C5 -> C7(lookup) -> C6 -> C8 -> {C9 | unary}
//! -> C11 -> C7(store) -> C12`, with C10 re-entering at C6 on a retryable
//! failure. Grounded in the teacher's `core/router/fallback.rs` orchestration
//! loop for the attempt-context-per-retry shape (spec §9's re-architecture
//! note on pervasive mutable outer loop variables).
//!
//! Every collaborator this module calls is a trait defined alongside its
//! component (`PrincipalStore`, `GuardrailService`, `ModelCatalogSource`,
//! `StoredKeyStore`, `CacheStore`, `GatewayLogger`) plus the `RoutingEngine`
//! and `Provider` enum already modeled in `core::routing` and
//! `core::providers`. This module owns no storage, HTTP, or provider wire
//! format of its own.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_stream::stream;
use futures::Stream;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::error;
use uuid::Uuid;

use crate::core::gateway::cache::{
    CacheEntry, CacheKey, CacheStore, StreamingCacheChunk, StreamingCacheEntry,
    StreamingCacheMetadata, capped_gap, should_persist_stream,
};
use crate::core::gateway::capability::{
    CapabilityError, FilterContext, ModelCatalogSource, ModelDefinition, ProviderMapping,
    eligible_mappings, estimate_prompt_tokens, is_upstream_empty_response,
};
use crate::core::gateway::context::{
    AttemptContext, ContextError, EnvTokenPool, ProviderCredentials, StoredKeyStore,
    anthropic_beta_flags, resolve_credentials, validate_max_tokens,
};
use crate::core::gateway::cost::{AttemptUsage, CostAccountant, CostBreakdown};
use crate::core::gateway::envelope::{InboundHeaders, NormalizerError, RequestEnvelope, normalize};
use crate::core::gateway::guardrail::{self, GuardrailError, GuardrailService};
use crate::core::gateway::healer::heal_json;
use crate::core::gateway::logger::{AttemptLogRow, GatewayLogger};
use crate::core::gateway::principal::{Principal, PrincipalError, PrincipalStore, ProjectMode};
use crate::core::providers::{ProviderRegistry, UnifiedProviderError};
use crate::core::routing::engine::{ModelMapping, ModelMappingSource, RoutingEngine};
use crate::core::routing::metrics::ProviderMetricsSource;
use crate::core::routing::retry::{AttemptOutcome, RetryOrchestrator};
use crate::core::routing::types::{RoutingError, RoutingMetadata, RoutingRequest};
use crate::core::tokenizer::TokenizerFamily;
use crate::core::types::chat::ChatRequest;
use crate::core::types::common::RequestContext;
use crate::core::types::message::MessageContent;
use crate::core::types::responses::{ChatChunk, ChatResponse, FinishReason, ToolCallDelta};

/// The tagged error sum spec §9 asks for in place of exceptions-as-control-flow.
/// Conversion to an HTTP status happens once, at `PipelineError::status_code`.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid_json: {0}")]
    InvalidJson(String),
    #[error("invalid_parameters: {0}")]
    InvalidParameters(String),
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("usage limit exceeded")]
    UsageLimitExceeded,
    #[error("project has been archived")]
    ProjectGone,
    #[error("model `{0}` is not permitted on this plan")]
    ModelNotPermitted(String),
    #[error("insufficient retention credits")]
    PaymentRequired,
    #[error("guardrail_violation: {0}")]
    GuardrailBlocked(String),
    #[error("capability mismatch: {0}")]
    CapabilityMismatch(String),
    #[error("no provider available: {0}")]
    RoutingFailed(String),
    #[error("insufficient credits for organization `{0}`")]
    InsufficientCredits(String),
    #[error("all_providers_failed")]
    AllProvidersFailed,
    #[error("upstream_timeout")]
    UpstreamTimeout,
    #[error("request canceled by client")]
    Canceled,
    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// HTTP status per spec §6's error taxonomy table.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidJson(_) | Self::InvalidParameters(_) | Self::CapabilityMismatch(_) => 400,
            Self::Unauthenticated | Self::UsageLimitExceeded => 401,
            Self::PaymentRequired | Self::InsufficientCredits(_) => 402,
            Self::ModelNotPermitted(_) => 403,
            Self::ProjectGone => 410,
            Self::GuardrailBlocked(_) => 400,
            Self::RoutingFailed(_) | Self::AllProvidersFailed => 502,
            Self::UpstreamTimeout => 504,
            Self::Canceled => 400,
            Self::Internal(_) => 500,
        }
    }
}

impl From<NormalizerError> for PipelineError {
    fn from(e: NormalizerError) -> Self {
        match e {
            NormalizerError::InvalidJson(m) => Self::InvalidJson(m),
            NormalizerError::InvalidParameters(m) => Self::InvalidParameters(m),
        }
    }
}

impl From<PrincipalError> for PipelineError {
    fn from(e: PrincipalError) -> Self {
        match e {
            PrincipalError::Unauthenticated => Self::Unauthenticated,
            PrincipalError::UsageLimitExceeded => Self::UsageLimitExceeded,
            PrincipalError::ProjectGone => Self::ProjectGone,
            PrincipalError::ModelNotPermitted(m) => Self::ModelNotPermitted(m),
            PrincipalError::PaymentRequired => Self::PaymentRequired,
            PrincipalError::Internal(m) => Self::Internal(m),
        }
    }
}

impl From<GuardrailError> for PipelineError {
    fn from(e: GuardrailError) -> Self {
        match e {
            GuardrailError::Blocked(violations) => Self::GuardrailBlocked(
                violations.into_iter().map(|v| v.message).collect::<Vec<_>>().join("; "),
            ),
            GuardrailError::ClassifierUnavailable(m) => Self::Internal(m),
        }
    }
}

impl From<CapabilityError> for PipelineError {
    fn from(e: CapabilityError) -> Self {
        Self::CapabilityMismatch(e.to_string())
    }
}

impl From<RoutingError> for PipelineError {
    fn from(e: RoutingError) -> Self {
        Self::RoutingFailed(e.to_string())
    }
}

impl From<ContextError> for PipelineError {
    fn from(e: ContextError) -> Self {
        match e {
            ContextError::InsufficientCredits(org) => Self::InsufficientCredits(org),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Everything the pipeline needs from the rest of the system, gathered in one
/// place so `Pipeline::new` has a single dependency-injection seam.
pub struct GatewayDeps {
    pub principal_store: Arc<dyn PrincipalStore>,
    pub guardrail: Arc<dyn GuardrailService>,
    pub catalog: Arc<dyn ModelCatalogSource>,
    pub stored_keys: Arc<dyn StoredKeyStore>,
    pub cache: Arc<dyn CacheStore>,
    pub logger: Arc<dyn GatewayLogger>,
    pub metrics: Arc<dyn ProviderMetricsSource>,
    pub providers: Arc<ProviderRegistry>,
    pub cost: CostAccountant,
    pub env_pools: HashMap<String, EnvTokenPool>,
    pub cache_ttl: Duration,
}

pub struct Pipeline {
    deps: Arc<GatewayDeps>,
}

/// One attempt's resolved routing + credential + body state, rebuilt fresh on
/// every retry rather than reassigned in place (spec §9).
struct Attempt {
    mapping: ProviderMapping,
    model_id: String,
    provider_id: String,
    credentials: ProviderCredentials,
    context: AttemptContext,
}

impl Pipeline {
    pub fn new(deps: Arc<GatewayDeps>) -> Self {
        Self { deps }
    }

    /// Runs C1-C4 and C5's provider-visibility inputs, common to both unary
    /// and streaming requests.
    async fn prepare(
        &self,
        body: &[u8],
        headers: InboundHeaders,
        bearer_token: &str,
    ) -> Result<(RequestEnvelope, Principal, ModelDefinition), PipelineError> {
        let mut envelope = normalize(body, headers)?;

        let principal =
            guardrail_and_principal(&self.deps, &envelope, bearer_token).await?;

        let model_id = envelope.requested_model.clone();
        let model = if envelope.is_auto() || envelope.is_custom() {
            // Branches (a)/(custom) resolve their own candidate pool in C5;
            // capability filtering runs per-candidate inside routing instead.
            ModelDefinition { id: model_id.clone(), family: String::new(), free: false, providers: vec![] }
        } else {
            self.deps
                .catalog
                .model(&model_id)
                .ok_or_else(|| CapabilityError::UnknownModel(model_id.clone()))?
        };

        guardrail::apply(self.deps.guardrail.as_ref(), &principal, &mut envelope.chat_request.messages)
            .await?;

        Ok((envelope, principal, model))
    }

    /// C4+C5: produces the chosen provider mapping plus routing metadata for
    /// this request. For `auto` requests, capability filtering (C4) runs once
    /// per candidate model (the allowlist, or every free model when
    /// `free_models_only` is set) so the scoring pass in C5 has real
    /// candidates to rank rather than an empty pool.
    async fn route(
        &self,
        envelope: &RequestEnvelope,
        principal: &Principal,
        model: &ModelDefinition,
    ) -> Result<(ProviderMapping, RoutingMetadata, String), PipelineError> {
        let visible_provider_ids = visible_providers(&self.deps, principal);

        let tokenizer = TokenizerFamily::for_provider("openai", false);
        let required_context = estimate_prompt_tokens(envelope, tokenizer)
            + envelope.chat_request.max_tokens.unwrap_or(4096);

        let filter_ctx = FilterContext {
            estimated_prompt_tokens: estimate_prompt_tokens(envelope, tokenizer),
            tools_tokens: 0,
            iam_allowed_providers: principal.api_key.iam_allowed_providers.as_deref(),
            is_auto_selection: envelope.is_auto(),
            ..FilterContext::default()
        };

        let mut per_model: HashMap<String, Vec<ProviderMapping>> = HashMap::new();
        let mut free_model_ids: Vec<String> = Vec::new();

        if envelope.is_custom() {
            // select_custom never consults the catalog.
        } else if envelope.is_auto() {
            free_model_ids = self
                .deps
                .catalog
                .all_models()
                .into_iter()
                .filter(|m| m.free)
                .map(|m| m.id)
                .collect();

            let candidate_ids: Vec<String> = if envelope.free_models_only {
                free_model_ids.clone()
            } else {
                crate::core::gateway::capability::AUTO_ALLOWLIST
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            };

            for id in candidate_ids {
                if let Some(def) = self.deps.catalog.model(&id) {
                    if let Ok(mappings) = eligible_mappings(&def, envelope, &filter_ctx) {
                        per_model.insert(id, mappings);
                    }
                }
            }
        } else {
            per_model.insert(model.id.clone(), eligible_mappings(model, envelope, &filter_ctx)?);
        }

        let mapping_source = CatalogMappingSource {
            per_model: per_model.clone(),
            free_model_ids: free_model_ids.clone(),
        };
        let engine = RoutingEngine::new(self.deps.metrics.clone(), Arc::new(mapping_source));

        let routing_request = RoutingRequest {
            requested_model: envelope.requested_model.clone(),
            requested_provider: envelope.requested_provider.clone(),
            no_fallback: envelope.no_fallback,
            free_models_only: envelope.free_models_only,
            no_reasoning: envelope.no_reasoning,
            required_context_size: required_context,
            visible_provider_ids,
        };

        let decision = engine.select(&routing_request).await?;

        let chosen_mapping = if envelope.is_custom() {
            synthetic_mapping(&decision.provider_id, &decision.model)
        } else {
            per_model
                .get(&decision.model)
                .and_then(|mappings| mappings.iter().find(|m| m.provider_id == decision.provider_id))
                .cloned()
                .unwrap_or_else(|| synthetic_mapping(&decision.provider_id, &decision.model))
        };

        Ok((chosen_mapping, decision.metadata, decision.model))
    }

    /// C6: resolves credentials and per-attempt request parameters for one
    /// candidate mapping.
    fn resolve_context(
        &self,
        principal: &Principal,
        envelope: &RequestEnvelope,
        mapping: &ProviderMapping,
    ) -> Result<Attempt, PipelineError> {
        let empty_pool = EnvTokenPool::from_env(&mapping.provider_id);
        let env_pool = self.deps.env_pools.get(&mapping.provider_id).unwrap_or(&empty_pool);

        let credentials = resolve_credentials(
            principal.project.mode,
            &mapping.provider_id,
            &principal.organization.id,
            self.deps.stored_keys.as_ref(),
            env_pool,
        )?;

        if matches!(principal.project.mode, ProjectMode::Credits | ProjectMode::Hybrid) {
            let has_credits = principal.organization.credits > 0.0
                || principal.organization.dev_plan_remaining() > 0.0;
            if !has_credits {
                return Err(ContextError::InsufficientCredits(principal.organization.id.clone()).into());
            }
        }

        let effective_max_tokens =
            validate_max_tokens(envelope.chat_request.max_tokens, mapping.max_output)?;

        let is_anthropic = mapping.provider_id == "anthropic";
        let beta_flags = if is_anthropic {
            anthropic_beta_flags(
                envelope.effort.is_some(),
                envelope
                    .chat_request
                    .response_format
                    .as_ref()
                    .is_some_and(|f| f.format_type == "json_schema"),
            )
        } else {
            vec![]
        };

        Ok(Attempt {
            model_id: mapping.model_name.clone(),
            provider_id: mapping.provider_id.clone(),
            context: AttemptContext {
                provider_id: mapping.provider_id.clone(),
                native_model_name: mapping.model_name.clone(),
                credentials_key: credentials.api_key().to_string(),
                effective_max_tokens,
                beta_flags,
                image_generation: mapping.image_generations && envelope.image_config.is_some(),
            },
            credentials,
            mapping: mapping.clone(),
        })
    }

    /// Full C1-C12 path for `stream=false`.
    pub async fn handle_unary(
        &self,
        body: &[u8],
        headers: InboundHeaders,
        bearer_token: &str,
        cancel: CancellationToken,
    ) -> Result<serde_json::Value, PipelineError> {
        let (envelope, principal, model) = self.prepare(body, headers, bearer_token).await?;
        let (mapping, mut routing_metadata, _resolved_model) =
            self.route(&envelope, &principal, &model).await?;

        let tokenizer = TokenizerFamily::for_provider(&mapping.provider_id, mapping.provider_id == "anthropic");
        let cache_key = CacheKey::build(
            &mapping.provider_id,
            &mapping.model_name,
            &envelope.chat_request,
            envelope.reasoning_effort().map(|_| "set").filter(|_| true),
            false,
        );

        if let Some(hit) = self.deps.cache.get_unary(cache_key).await {
            let usage = AttemptUsage {
                prompt_tokens: Some(hit.prompt_tokens),
                completion_tokens: hit.completion_tokens,
                cached_tokens: hit.cached_tokens.unwrap_or(0),
                reasoning_tokens: hit.reasoning_tokens.unwrap_or(0),
                ..Default::default()
            };
            let cost = self.deps.cost.calculate(&cost_inputs(&mapping, &usage, "", tokenizer, false));
            self.deps
                .logger
                .write(cached_log_row(&envelope, &principal, &mapping, &cost, &routing_metadata))
                .await;
            return Ok(hit.response_json);
        }

        let final_log_id = Uuid::new_v4().to_string();
        let mut orchestrator =
            RetryOrchestrator::new(envelope.requested_provider.is_some() && !envelope.is_auto(), envelope.no_fallback, final_log_id.clone());
        let mut current_mapping = mapping;

        loop {
            let attempt = match self.resolve_context(&principal, &envelope, &current_mapping) {
                Ok(a) => a,
                Err(_) => {
                    orchestrator.mark_failed(current_mapping.provider_id.clone(), false);
                    return Err(PipelineError::AllProvidersFailed);
                }
            };
            orchestrator.mark_dispatched(attempt.provider_id.clone());
            routing_metadata.routing.push(attempt.provider_id.clone());

            let request_id = envelope.request_id.clone();
            let start = Instant::now();
            let dispatch = self.dispatch_unary(&envelope, &attempt, &request_id, &cancel).await;

            match dispatch {
                Ok(response) => {
                    self.deps
                        .metrics
                        .record_outcome(&attempt.model_id, &attempt.provider_id, true, start.elapsed().as_millis() as f64)
                        .await;

                    if unary_response_is_upstream_empty(&response) {
                        self.deps
                            .logger
                            .write(failed_log_row(
                                &envelope,
                                &principal,
                                &attempt,
                                "upstream_error: empty response with no safety-block finish reason",
                                &routing_metadata,
                                &final_log_id,
                            ))
                            .await;

                        let outcome = AttemptOutcome { status_code: None, is_client_error: false, is_content_filter: false };
                        orchestrator.mark_failed(attempt.provider_id.clone(), true);
                        if orchestrator.should_retry(&outcome, &routing_metadata.provider_scores) {
                            if let Some(next) = orchestrator.select_next_provider(&routing_metadata.provider_scores) {
                                current_mapping.provider_id = next.provider_id.clone();
                                continue;
                            }
                        }
                        return Err(PipelineError::AllProvidersFailed);
                    }

                    let usage = usage_from_response(&response);
                    let cost = self.deps.cost.calculate(&cost_inputs(
                        &current_mapping,
                        &usage,
                        prompt_text(&envelope.chat_request).as_str(),
                        tokenizer,
                        principal.organization.retention_level
                            == crate::core::gateway::principal::RetentionLevel::Retain,
                    ));

                    let body = client_response_json(&response, &envelope, &attempt, &routing_metadata, &cost);

                    if should_cache_unary(&response) {
                        self.deps
                            .cache
                            .put_unary(
                                cache_key,
                                CacheEntry {
                                    response_json: body.clone(),
                                    model: attempt.model_id.clone(),
                                    provider: attempt.provider_id.clone(),
                                    prompt_tokens: cost.prompt_tokens,
                                    completion_tokens: cost.completion_tokens,
                                    cached_tokens: Some(usage.cached_tokens),
                                    reasoning_tokens: Some(usage.reasoning_tokens),
                                },
                                self.deps.cache_ttl,
                            )
                            .await;
                    }

                    self.deps
                        .logger
                        .write(success_log_row(
                            &final_log_id,
                            &envelope,
                            &principal,
                            &attempt,
                            &response,
                            &cost,
                            &routing_metadata,
                            start.elapsed(),
                            false,
                        ))
                        .await;

                    return Ok(body);
                }
                Err(outcome_err) => {
                    self.deps
                        .metrics
                        .record_outcome(&attempt.model_id, &attempt.provider_id, false, start.elapsed().as_millis() as f64)
                        .await;

                    let outcome = classify(&outcome_err);
                    self.deps
                        .logger
                        .write(failed_log_row(&envelope, &principal, &attempt, outcome_err.to_string(), &routing_metadata, &final_log_id))
                        .await;

                    if matches!(outcome_err, ProviderError::Cancelled { .. }) {
                        return Err(PipelineError::Canceled);
                    }

                    orchestrator.mark_failed(attempt.provider_id.clone(), true);
                    if orchestrator.should_retry(&outcome, &routing_metadata.provider_scores) {
                        if let Some(next) = orchestrator.select_next_provider(&routing_metadata.provider_scores) {
                            current_mapping.provider_id = next.provider_id.clone();
                            continue;
                        }
                    }
                    return Err(PipelineError::AllProvidersFailed);
                }
            }
        }
    }

    async fn dispatch_unary(
        &self,
        envelope: &RequestEnvelope,
        attempt: &Attempt,
        request_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ChatResponse, UnifiedProviderError> {
        let provider = self
            .deps
            .providers
            .get(&attempt.provider_id)
            .ok_or_else(|| ProviderError::provider_unavailable(
                static_provider_name(&attempt.provider_id),
                "provider not registered",
            ))?;

        let mut request = envelope.chat_request.clone();
        request.model = attempt.context.native_model_name.clone();
        request.max_tokens = Some(attempt.context.effective_max_tokens);

        let context = RequestContext { request_id: request_id.to_string(), ..RequestContext::default() };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProviderError::cancelled(static_provider_name(&attempt.provider_id), "chat_completion", Some("client disconnected".to_string()))),
            result = provider.chat_completion(request, context) => result,
        }
    }

    /// Pre-stream dispatch for one candidate: resolves the registered
    /// provider and opens its chat-completion stream. A failure here (missing
    /// registration or a rejected request) happens before any SSE bytes reach
    /// the client, so C10 is free to retry on the next candidate.
    async fn dispatch_stream(
        &self,
        envelope: &RequestEnvelope,
        attempt: &Attempt,
    ) -> Result<
        std::pin::Pin<Box<dyn Stream<Item = Result<ChatChunk, UnifiedProviderError>> + Send>>,
        UnifiedProviderError,
    > {
        let provider = self
            .deps
            .providers
            .get(&attempt.provider_id)
            .cloned()
            .ok_or_else(|| ProviderError::provider_unavailable(
                static_provider_name(&attempt.provider_id),
                "provider not registered",
            ))?;

        let mut request = envelope.chat_request.clone();
        request.model = attempt.context.native_model_name.clone();
        request.max_tokens = Some(attempt.context.effective_max_tokens);
        let context = RequestContext { request_id: envelope.request_id.clone(), ..RequestContext::default() };

        provider.chat_completion_stream(request, context).await
    }

    /// Full C1-C12 path for `stream=true`. Returns a `Stream` of SSE frames
    /// ready for the (out-of-scope) HTTP framework to forward verbatim.
    pub async fn handle_streaming(
        self: Arc<Self>,
        body: &[u8],
        headers: InboundHeaders,
        bearer_token: &str,
        cancel: CancellationToken,
    ) -> Result<impl Stream<Item = String>, PipelineError> {
        let (envelope, principal, model) = self.prepare(body, headers, bearer_token).await?;
        let (mapping, mut routing_metadata, _resolved_model) =
            self.route(&envelope, &principal, &model).await?;

        let cache_key = CacheKey::build(
            &mapping.provider_id,
            &mapping.model_name,
            &envelope.chat_request,
            None,
            true,
        );

        if let Some(hit) = self.deps.cache.get_streaming(cache_key).await {
            return Ok(replay_stream(hit));
        }

        let final_log_id = Uuid::new_v4().to_string();
        let explicit_provider = envelope.requested_provider.is_some() && !envelope.is_auto();
        let mut orchestrator = RetryOrchestrator::new(explicit_provider, envelope.no_fallback, final_log_id.clone());
        let mut current_mapping = mapping;

        // C10 re-enters here on a pre-stream dispatch failure, same as the
        // unary path: a failing `chat_completion_stream` call never yields a
        // single byte to the client, so it is safe to retry on the next
        // candidate before any SSE framing has been sent.
        let (attempt, upstream) = loop {
            let attempt = match self.resolve_context(&principal, &envelope, &current_mapping) {
                Ok(a) => a,
                Err(_) => {
                    orchestrator.mark_failed(current_mapping.provider_id.clone(), false);
                    return Err(PipelineError::AllProvidersFailed);
                }
            };
            orchestrator.mark_dispatched(attempt.provider_id.clone());
            routing_metadata.routing.push(attempt.provider_id.clone());

            match self.dispatch_stream(&envelope, &attempt).await {
                Ok(upstream) => break (attempt, upstream),
                Err(outcome_err) => {
                    let outcome = classify(&outcome_err);
                    self.deps
                        .logger
                        .write(failed_log_row(&envelope, &principal, &attempt, outcome_err.to_string(), &routing_metadata, &final_log_id))
                        .await;

                    orchestrator.mark_failed(attempt.provider_id.clone(), true);
                    if orchestrator.should_retry(&outcome, &routing_metadata.provider_scores) {
                        if let Some(next) = orchestrator.select_next_provider(&routing_metadata.provider_scores) {
                            current_mapping.provider_id = next.provider_id.clone();
                            continue;
                        }
                    }
                    return Err(PipelineError::AllProvidersFailed);
                }
            }
        };

        let deps = self.deps.clone();
        let prompt = prompt_text(&envelope.chat_request);
        let tokenizer = TokenizerFamily::for_provider(&attempt.provider_id, attempt.provider_id == "anthropic");
        let heal_active = envelope
            .chat_request
            .response_format
            .as_ref()
            .is_some_and(|f| f.format_type == "json_object" || f.format_type == "json_schema");

        Ok(stream_events(
            deps,
            upstream,
            cancel,
            cache_key,
            final_log_id,
            envelope,
            principal,
            attempt,
            current_mapping,
            prompt,
            tokenizer,
            heal_active,
            routing_metadata,
        ))
    }
}

/// Runs the C9 gateway-level accumulation loop over an already-wire-decoded
/// `ChatChunk` stream (cross-chunk SSE reassembly happened inside the
/// provider's `chat_completion_stream`): keepalive, cancellation, token/tool
/// accumulation, response healing, cache capture, and the final log write.
fn stream_events(
    deps: Arc<GatewayDeps>,
    mut upstream: std::pin::Pin<Box<dyn Stream<Item = Result<ChatChunk, UnifiedProviderError>> + Send>>,
    cancel: CancellationToken,
    cache_key: CacheKey,
    final_log_id: String,
    envelope: RequestEnvelope,
    principal: Principal,
    attempt: Attempt,
    mapping: ProviderMapping,
    prompt: String,
    tokenizer: TokenizerFamily,
    heal_active: bool,
    routing_metadata: RoutingMetadata,
) -> impl Stream<Item = String> {
    stream! {
        use futures::StreamExt;

        let mut keepalive = tokio::time::interval(Duration::from_secs(15));
        keepalive.tick().await; // first tick fires immediately; discard it

        let start = Instant::now();
        let mut ttft: Option<Duration> = None;
        let mut accumulated_text = String::new();
        let mut finish_reason: Option<String> = None;
        let mut finish_reason_token: Option<&'static str> = None;
        let mut usage = AttemptUsage::default();
        let mut had_error = false;
        let mut cache_chunks = Vec::new();
        let mut event_id: u64 = 0;
        let mut healed_emitted = false;
        let mut tool_calls: std::collections::BTreeMap<u32, AccumulatingToolCall> = std::collections::BTreeMap::new();

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    had_error = true;
                    yield format!("event: canceled\ndata: {{}}\n\n");
                    deps.logger.write(canceled_log_row(&envelope, &principal, &attempt, &routing_metadata, &final_log_id)).await;
                    break;
                }
                _ = keepalive.tick() => {
                    yield ": ping\n\n".to_string();
                }
                next = upstream.next() => {
                    match next {
                        None => break,
                        Some(Err(e)) => {
                            had_error = true;
                            error!(error = %e, "upstream streaming error");
                            let payload = serde_json::json!({"error": {"message": e.to_string(), "type": "upstream_error", "code": e.http_status()}});
                            yield format!("event: error\ndata: {}\n\n", payload);
                            break;
                        }
                        Some(Ok(chunk)) => {
                            if ttft.is_none() {
                                ttft = Some(start.elapsed());
                            }
                            if let Some(choice) = chunk.choices.first() {
                                if let Some(content) = &choice.delta.content {
                                    accumulated_text.push_str(content);
                                    if !heal_active {
                                        event_id += 1;
                                        let payload = serde_json::to_string(&chunk).unwrap_or_default();
                                        cache_chunks.push(StreamingCacheChunk {
                                            data: payload.clone(),
                                            event_id,
                                            event: None,
                                            relative_timestamp_ms: start.elapsed().as_millis() as u64,
                                        });
                                        yield format!("data: {payload}\n\n");
                                    }
                                }
                                if let Some(deltas) = &choice.delta.tool_calls {
                                    accumulate_tool_calls(&mut tool_calls, deltas);
                                }
                                if choice.finish_reason.is_some() {
                                    finish_reason = choice.finish_reason.as_ref().map(|r| format!("{r:?}").to_lowercase());
                                    finish_reason_token = choice.finish_reason.as_ref().map(finish_reason_upstream_token);
                                }
                            }
                            if let Some(u) = &chunk.usage {
                                usage.prompt_tokens = Some(u.prompt_tokens);
                                usage.completion_tokens = u.completion_tokens;
                            }
                        }
                    }
                }
            }
        }

        if heal_active && !accumulated_text.is_empty() && !healed_emitted {
            let healed = heal_json(&accumulated_text);
            healed_emitted = true;
            let payload = serde_json::json!({
                "choices": [{"index": 0, "delta": {"content": healed.content}, "finish_reason": serde_json::Value::Null}]
            });
            yield format!("data: {payload}\n\n");
        }

        if usage.prompt_tokens.is_none() {
            usage.prompt_tokens = Some(tokenizer.count(&prompt));
        }

        let tool_results = finalize_tool_calls(tool_calls);
        let has_tool_calls = !tool_results.is_empty();

        if finish_reason.is_none() {
            finish_reason = Some(if has_tool_calls { "tool_calls" } else { "stop" }.to_string());
        }

        // A finish with no text, no tool calls, and zero completion tokens is
        // an upstream malfunction rather than a genuinely empty turn, unless
        // the finish reason names a safety block (spec §4.9/§4.10).
        let mut error_details = None;
        if !had_error
            && is_upstream_empty_response(finish_reason_token, !accumulated_text.is_empty(), has_tool_calls, usage.completion_tokens)
        {
            had_error = true;
            error_details = Some("upstream_error: empty response with no safety-block finish reason".to_string());
        }

        let cost = deps.cost.calculate(&cost_inputs(
            &mapping,
            &usage,
            &prompt,
            tokenizer,
            principal.organization.retention_level == crate::core::gateway::principal::RetentionLevel::Retain,
        ));

        let usage_payload = serde_json::json!({
            "usage": {
                "prompt_tokens": cost.prompt_tokens,
                "completion_tokens": cost.completion_tokens,
                "total_tokens": cost.prompt_tokens + cost.completion_tokens,
                "cost_usd_total": cost.total_cost,
            }
        });
        yield format!("data: {usage_payload}\n\n");
        yield "event: done\ndata: [DONE]\n\n".to_string();

        if !had_error {
            let metadata = StreamingCacheMetadata {
                model: attempt.model_id.clone(),
                provider: attempt.provider_id.clone(),
                finish_reason: finish_reason.clone(),
                duration_ms: start.elapsed().as_millis() as u64,
                completed: true,
            };
            if should_persist_stream(&metadata, had_error) {
                deps.cache
                    .put_streaming(cache_key, StreamingCacheEntry { chunks: cache_chunks, metadata }, deps.cache_ttl)
                    .await;
            }
        }

        let retain_payloads = principal.organization.retention_level == crate::core::gateway::principal::RetentionLevel::Retain;
        deps.logger
            .write(streaming_log_row(
                &envelope,
                &principal,
                &attempt,
                &cost,
                &routing_metadata,
                &final_log_id,
                finish_reason,
                start.elapsed(),
                ttft,
                had_error,
                error_details,
                retain_payloads.then(|| accumulated_text.clone()),
                tool_results,
            ))
            .await;
    }
}

/// One tool call reassembled from streaming `ToolCallDelta` fragments, keyed
/// by the index OpenAI-compatible providers use to identify a slot across
/// chunks.
#[derive(Default)]
struct AccumulatingToolCall {
    id: Option<String>,
    tool_type: Option<String>,
    name: Option<String>,
    arguments: String,
}

fn accumulate_tool_calls(acc: &mut std::collections::BTreeMap<u32, AccumulatingToolCall>, deltas: &[ToolCallDelta]) {
    for delta in deltas {
        let entry = acc.entry(delta.index).or_default();
        if let Some(id) = &delta.id {
            entry.id = Some(id.clone());
        }
        if let Some(tool_type) = &delta.tool_type {
            entry.tool_type = Some(tool_type.clone());
        }
        if let Some(function) = &delta.function {
            if let Some(name) = &function.name {
                entry.name = Some(name.clone());
            }
            if let Some(arguments) = &function.arguments {
                entry.arguments.push_str(arguments);
            }
        }
    }
}

fn finalize_tool_calls(acc: std::collections::BTreeMap<u32, AccumulatingToolCall>) -> Vec<serde_json::Value> {
    acc.into_values()
        .map(|call| {
            serde_json::json!({
                "id": call.id,
                "type": call.tool_type.unwrap_or_else(|| "function".to_string()),
                "function": {"name": call.name, "arguments": call.arguments},
            })
        })
        .collect()
}

/// Maps a normalized `FinishReason` to the string token the empty-response
/// check consults. `ContentFilter` maps to `"OTHER"`, a member of
/// `GOOGLE_SAFETY_FINISH_REASONS`, since the raw provider-native safety label
/// (e.g. `"SAFETY"`) is normalized away before reaching the gateway layer;
/// every other variant maps to its own distinct token so a truly empty
/// `"stop"`/`"length"`/etc. finish still gets reclassified as an error.
fn finish_reason_upstream_token(reason: &FinishReason) -> &'static str {
    match reason {
        FinishReason::Stop => "STOP",
        FinishReason::Length => "LENGTH",
        FinishReason::ToolCalls => "TOOL_CALLS",
        FinishReason::FunctionCall => "FUNCTION_CALL",
        FinishReason::ContentFilter => "OTHER",
    }
}

/// Replays a cached streaming entry honoring each chunk's recorded gap,
/// capped at 1s (spec §4.7).
fn replay_stream(entry: StreamingCacheEntry) -> impl Stream<Item = String> {
    stream! {
        let mut previous_ms = 0u64;
        for chunk in entry.chunks {
            tokio::time::sleep(capped_gap(previous_ms, chunk.relative_timestamp_ms)).await;
            previous_ms = chunk.relative_timestamp_ms;
            yield format!("data: {}\n\n", chunk.data);
        }
        yield "event: done\ndata: [DONE]\n\n".to_string();
    }
}

// ---------------------------------------------------------------------
// Small glue helpers kept free of collaborator state so they stay testable
// in isolation.
// ---------------------------------------------------------------------

use crate::core::providers::ProviderError;

/// Maps a provider id to a `'static` string without allocating, mirroring
/// `ProviderType`'s canonical id table (`core::providers::mod`). Ids outside
/// that table collapse to the literal `"custom"` instead of leaking a new
/// allocation per attempt.
fn static_provider_name(id: &str) -> &'static str {
    match id.to_lowercase().as_str() {
        "openai" => "openai",
        "anthropic" => "anthropic",
        "bedrock" | "aws-bedrock" => "bedrock",
        "gemini" | "google" | "google-ai-studio" => "gemini",
        "vertex_ai" | "vertexai" | "vertex-ai" => "vertex_ai",
        "moonshot" | "moonshot-ai" => "moonshot",
        _ => "custom",
    }
}

/// A `ModelMappingSource` over the already capability-filtered per-model
/// mapping pool, so the routing engine never needs to know about
/// pricing-catalog storage.
struct CatalogMappingSource {
    per_model: HashMap<String, Vec<ProviderMapping>>,
    free_model_ids: Vec<String>,
}

impl ModelMappingSource for CatalogMappingSource {
    fn mappings_for(&self, model: &str) -> Vec<ModelMapping> {
        self.per_model
            .get(model)
            .map(|mappings| {
                mappings
                    .iter()
                    .map(|m| ModelMapping {
                        model: model.to_string(),
                        provider_id: m.provider_id.clone(),
                        max_output: m.max_output,
                        base_price: m.input_price,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn auto_allowlist(&self) -> &[&'static str] {
        crate::core::gateway::capability::AUTO_ALLOWLIST
    }

    fn free_model_ids(&self) -> Vec<String> {
        self.free_model_ids.clone()
    }
}

fn synthetic_mapping(provider_id: &str, model_name: &str) -> ProviderMapping {
    ProviderMapping {
        provider_id: provider_id.to_string(),
        model_name: model_name.to_string(),
        input_price: 0.0,
        output_price: 0.0,
        cached_input_price: None,
        request_price: None,
        image_input_price: None,
        image_output_price: None,
        context_size: 128_000,
        max_output: 4096,
        vision: false,
        tools: true,
        reasoning: false,
        reasoning_max_tokens: false,
        json_output: true,
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

/// Runs C2/C3 together since the guardrail check needs the resolved principal.
async fn guardrail_and_principal(
    deps: &GatewayDeps,
    envelope: &RequestEnvelope,
    bearer_token: &str,
) -> Result<Principal, PipelineError> {
    let principal = crate::core::gateway::principal::resolve(
        deps.principal_store.as_ref(),
        bearer_token,
        &envelope.requested_model,
    )
    .await?;
    Ok(principal)
}

/// Provider ids visible under the caller's project mode (spec §4.5).
fn visible_providers(deps: &GatewayDeps, principal: &Principal) -> Vec<String> {
    match principal.project.mode {
        ProjectMode::ApiKeys => deps.env_pools.keys().cloned().collect(),
        ProjectMode::Credits => deps
            .env_pools
            .iter()
            .filter(|(_, pool)| !pool.is_empty())
            .map(|(id, _)| id.clone())
            .collect(),
        ProjectMode::Hybrid => deps.env_pools.keys().cloned().collect(),
    }
}

fn prompt_text(request: &ChatRequest) -> String {
    request
        .messages
        .iter()
        .filter_map(|m| match &m.content {
            Some(MessageContent::Text(text)) => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn cost_inputs<'a>(
    mapping: &'a ProviderMapping,
    usage: &'a AttemptUsage,
    prompt: &'a str,
    tokenizer: TokenizerFamily,
    retain_payloads: bool,
) -> crate::core::gateway::cost::CostInputs<'a> {
    crate::core::gateway::cost::CostInputs {
        mapping,
        usage,
        excludes_image_input_tokens: false,
        prompt_text_for_fallback: prompt,
        tokenizer,
        retain_payloads,
    }
}

/// Unary counterpart of the streaming empty-response check: a `finish_reason`
/// with no text, no tool calls, and zero completion tokens is reclassified to
/// an upstream error unless the finish names a safety block (spec §4.9/§4.10).
fn unary_response_is_upstream_empty(response: &ChatResponse) -> bool {
    let Some(choice) = response.choices.first() else { return true };
    let has_content = matches!(&choice.message.content, Some(MessageContent::Text(text)) if !text.is_empty())
        || matches!(&choice.message.content, Some(MessageContent::Parts(parts)) if !parts.is_empty());
    let has_tool_calls = choice.message.tool_calls.as_ref().is_some_and(|calls| !calls.is_empty());
    let completion_tokens = response.usage.as_ref().map(|u| u.completion_tokens).unwrap_or(0);
    let token = choice.finish_reason.as_ref().map(finish_reason_upstream_token);
    is_upstream_empty_response(token, has_content, has_tool_calls, completion_tokens)
}

fn usage_from_response(response: &ChatResponse) -> AttemptUsage {
    let u = response.usage.as_ref();
    AttemptUsage {
        prompt_tokens: u.map(|u| u.prompt_tokens),
        completion_tokens: u.map(|u| u.completion_tokens).unwrap_or(0),
        cached_tokens: u
            .and_then(|u| u.prompt_tokens_details.as_ref())
            .map(|d| d.cached_tokens)
            .unwrap_or(0),
        reasoning_tokens: u
            .and_then(|u| u.completion_tokens_details.as_ref())
            .map(|d| d.reasoning_tokens)
            .unwrap_or(0),
        input_image_count: 0,
        output_image_count: 0,
        web_search_count: 0,
    }
}

fn should_cache_unary(response: &ChatResponse) -> bool {
    response
        .choices
        .first()
        .is_some_and(|c| c.finish_reason.is_some())
}

/// Classifies a dispatch failure into the coarse outcome shape C10 reasons
/// about, per spec §4.8/§4.10.
fn classify(error: &UnifiedProviderError) -> AttemptOutcome {
    let status = error.http_status();
    AttemptOutcome {
        status_code: Some(status),
        is_client_error: (400..500).contains(&status) && status != 408 && status != 429,
        is_content_filter: matches!(error, ProviderError::ContentFiltered { .. }),
    }
}

fn client_response_json(
    response: &ChatResponse,
    envelope: &RequestEnvelope,
    attempt: &Attempt,
    routing: &RoutingMetadata,
    cost: &CostBreakdown,
) -> serde_json::Value {
    let mut value = serde_json::to_value(response).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(obj) = value.as_object_mut() {
        obj.insert(
            "metadata".to_string(),
            serde_json::json!({
                "requested_model": envelope.requested_model,
                "requested_provider": envelope.requested_provider,
                "used_model": attempt.model_id,
                "used_provider": attempt.provider_id,
                "underlying_used_model": attempt.context.native_model_name,
                "routing": routing,
            }),
        );
        if let Some(usage) = obj.get_mut("usage") {
            if let Some(usage_obj) = usage.as_object_mut() {
                usage_obj.insert("cost_usd_total".to_string(), serde_json::json!(cost.total_cost));
                usage_obj.insert("cost_usd_input".to_string(), serde_json::json!(cost.input_cost));
                usage_obj.insert("cost_usd_output".to_string(), serde_json::json!(cost.output_cost));
                usage_obj.insert("cost_usd_cached_input".to_string(), serde_json::json!(cost.cached_input_cost));
            }
        }
    }
    value
}

fn cached_log_row(
    envelope: &RequestEnvelope,
    principal: &Principal,
    mapping: &ProviderMapping,
    cost: &CostBreakdown,
    routing: &RoutingMetadata,
) -> AttemptLogRow {
    base_log_row(envelope, principal, mapping.provider_id.clone(), mapping.model_name.clone(), cost.clone(), routing.clone())
        .with_cached(true)
}

fn success_log_row(
    final_log_id: &str,
    envelope: &RequestEnvelope,
    principal: &Principal,
    attempt: &Attempt,
    response: &ChatResponse,
    cost: &CostBreakdown,
    routing: &RoutingMetadata,
    duration: Duration,
    cached: bool,
) -> AttemptLogRow {
    let mut row = base_log_row(envelope, principal, attempt.provider_id.clone(), attempt.model_id.clone(), cost.clone(), routing.clone());
    row.log_id = final_log_id.to_string();
    row.duration_ms = duration.as_millis() as u64;
    row.finish_reason = response.choices.first().and_then(|c| c.finish_reason.as_ref()).map(|r| format!("{r:?}"));
    row.total_tokens = cost.prompt_tokens + cost.completion_tokens;
    row.cached = cached;
    row
}

fn failed_log_row(
    envelope: &RequestEnvelope,
    principal: &Principal,
    attempt: &Attempt,
    error_message: impl Into<String>,
    routing: &RoutingMetadata,
    final_log_id: &str,
) -> AttemptLogRow {
    let cost = CostBreakdown {
        input_cost: 0.0,
        output_cost: 0.0,
        cached_input_cost: 0.0,
        request_cost: 0.0,
        web_search_cost: 0.0,
        image_input_cost: 0.0,
        image_output_cost: 0.0,
        data_storage_cost: 0.0,
        total_cost: 0.0,
        prompt_tokens: 0,
        completion_tokens: 0,
        discount: None,
        discount_savings: 0.0,
        pricing_tier: None,
    };
    let mut row = base_log_row(envelope, principal, attempt.provider_id.clone(), attempt.model_id.clone(), cost, routing.clone());
    row.log_id = Uuid::new_v4().to_string();
    row.retried = true;
    row.retried_by_log_id = Some(final_log_id.to_string());
    row.has_error = true;
    row.error_details = Some(error_message.into());
    row
}

fn canceled_log_row(
    envelope: &RequestEnvelope,
    principal: &Principal,
    attempt: &Attempt,
    routing: &RoutingMetadata,
    final_log_id: &str,
) -> AttemptLogRow {
    let mut row = base_log_row(
        envelope,
        principal,
        attempt.provider_id.clone(),
        attempt.model_id.clone(),
        CostBreakdown {
            input_cost: 0.0,
            output_cost: 0.0,
            cached_input_cost: 0.0,
            request_cost: 0.0,
            web_search_cost: 0.0,
            image_input_cost: 0.0,
            image_output_cost: 0.0,
            data_storage_cost: 0.0,
            total_cost: 0.0,
            prompt_tokens: 0,
            completion_tokens: 0,
            discount: None,
            discount_savings: 0.0,
            pricing_tier: None,
        },
        routing.clone(),
    );
    row.log_id = final_log_id.to_string();
    row.canceled = true;
    row.streamed = true;
    row
}

#[allow(clippy::too_many_arguments)]
fn streaming_log_row(
    envelope: &RequestEnvelope,
    principal: &Principal,
    attempt: &Attempt,
    cost: &CostBreakdown,
    routing: &RoutingMetadata,
    final_log_id: &str,
    finish_reason: Option<String>,
    duration: Duration,
    ttft: Option<Duration>,
    has_error: bool,
    error_details: Option<String>,
    content: Option<String>,
    tool_results: Vec<serde_json::Value>,
) -> AttemptLogRow {
    let mut row = base_log_row(envelope, principal, attempt.provider_id.clone(), attempt.model_id.clone(), cost.clone(), routing.clone());
    row.log_id = final_log_id.to_string();
    row.streamed = true;
    row.duration_ms = duration.as_millis() as u64;
    row.time_to_first_token_ms = ttft.map(|d| d.as_millis() as u64);
    row.finish_reason = finish_reason;
    row.has_error = has_error;
    row.error_details = error_details;
    row.content = content;
    row.tool_results = tool_results;
    row.total_tokens = cost.prompt_tokens + cost.completion_tokens;
    row
}

fn base_log_row(
    envelope: &RequestEnvelope,
    principal: &Principal,
    used_provider: String,
    used_model: String,
    cost: CostBreakdown,
    routing: RoutingMetadata,
) -> AttemptLogRow {
    AttemptLogRow {
        log_id: Uuid::new_v4().to_string(),
        retried: false,
        retried_by_log_id: None,
        api_key_id: principal.project.id.clone(),
        project_id: principal.project.id.clone(),
        organization_id: principal.organization.id.clone(),
        requested_model: envelope.requested_model.clone(),
        requested_provider: envelope.requested_provider.clone(),
        used_model: used_model.clone(),
        used_provider: used_provider.clone(),
        native_model_name: used_model,
        temperature: envelope.chat_request.temperature,
        top_p: envelope.chat_request.top_p,
        max_tokens: envelope.chat_request.max_tokens,
        frequency_penalty: envelope.chat_request.frequency_penalty,
        presence_penalty: envelope.chat_request.presence_penalty,
        prompt_tokens: cost.prompt_tokens,
        completion_tokens: cost.completion_tokens,
        total_tokens: cost.prompt_tokens + cost.completion_tokens,
        cached_tokens: 0,
        reasoning_tokens: 0,
        duration_ms: 0,
        time_to_first_token_ms: None,
        time_to_first_reasoning_token_ms: None,
        cost,
        routing_metadata: routing,
        finish_reason: None,
        has_error: false,
        error_details: None,
        streamed: false,
        canceled: false,
        cached: false,
        tool_results: vec![],
        plugins: envelope.plugins.iter().map(|p| p.id.clone()).collect(),
        plugin_results: vec![],
        content: None,
        reasoning_content: None,
        raw_request: None,
        raw_response: None,
    }
}

trait AttemptLogRowExt {
    fn with_cached(self, cached: bool) -> Self;
}

impl AttemptLogRowExt for AttemptLogRow {
    fn with_cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self.duration_ms = 0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_spec_taxonomy() {
        assert_eq!(PipelineError::InvalidJson("x".to_string()).status_code(), 400);
        assert_eq!(PipelineError::Unauthenticated.status_code(), 401);
        assert_eq!(PipelineError::PaymentRequired.status_code(), 402);
        assert_eq!(PipelineError::ModelNotPermitted("m".to_string()).status_code(), 403);
        assert_eq!(PipelineError::ProjectGone.status_code(), 410);
        assert_eq!(PipelineError::AllProvidersFailed.status_code(), 502);
        assert_eq!(PipelineError::UpstreamTimeout.status_code(), 504);
    }
}
