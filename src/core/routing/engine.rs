//! The three routing branches described for the routing engine: `auto`
//! selection, direct-provider-with-uptime-fallback, and model-only selection.

use super::metrics::ProviderMetricsSource;
use super::scoring::score_and_rank;
use super::types::{ProviderScore, RoutingError, RoutingMetadata, RoutingRequest, SelectionReason};
use std::sync::Arc;

/// A `(model, provider)` mapping the routing engine is allowed to pick from,
/// after capability filtering has already run (spec §4.4, upstream of C5).
#[derive(Debug, Clone)]
pub struct ModelMapping {
    pub model: String,
    pub provider_id: String,
    pub max_output: u32,
    pub base_price: f64,
}

/// Supplies the set of eligible `(model, provider)` mappings for a request.
/// Implemented by the gateway's model catalog; kept as a trait here so the
/// routing engine has no dependency on catalog storage.
pub trait ModelMappingSource: Send + Sync {
    /// All mappings for `model`, or every mapping when `model == "auto"` and
    /// the caller wants the full candidate pool.
    fn mappings_for(&self, model: &str) -> Vec<ModelMapping>;

    /// The auto-route allowlist, consulted when `model == "auto"`.
    fn auto_allowlist(&self) -> &[&'static str];

    /// Every model id with `free == true`, consulted instead of the auto
    /// allowlist when `free_models_only` is set (spec §4.5 / §9 OQ3).
    fn free_model_ids(&self) -> Vec<String>;
}

pub const DEFAULT_AUTO_FALLBACK_MODEL: &str = "openai/gpt-5-nano";

pub struct RoutingEngine {
    metrics: Arc<dyn ProviderMetricsSource>,
    mappings: Arc<dyn ModelMappingSource>,
}

/// Outcome of a routing decision: the chosen mapping plus the metadata to
/// attach to the request envelope and log row.
#[derive(Debug, Clone)]
pub struct RoutingDecision {
    pub model: String,
    pub provider_id: String,
    pub metadata: RoutingMetadata,
}

impl RoutingEngine {
    pub fn new(metrics: Arc<dyn ProviderMetricsSource>, mappings: Arc<dyn ModelMappingSource>) -> Self {
        Self { metrics, mappings }
    }

    pub async fn select(&self, request: &RoutingRequest) -> Result<RoutingDecision, RoutingError> {
        if request.requested_model == "custom" {
            return self.select_custom(request);
        }

        match &request.requested_provider {
            Some(provider) if provider != "llmgateway" && provider != "custom" && !request.no_fallback => {
                self.select_direct_with_fallback(request, provider).await
            }
            Some(provider) => self.select_direct_pinned(request, provider).await,
            None if request.requested_model == "auto" => self.select_auto(request).await,
            None => self.select_model_only(request).await,
        }
    }

    fn select_custom(&self, request: &RoutingRequest) -> Result<RoutingDecision, RoutingError> {
        if !request
            .visible_provider_ids
            .iter()
            .any(|id| id == "custom")
        {
            return Err(RoutingError::CustomProviderNotConfigured);
        }
        Ok(RoutingDecision {
            model: request.requested_model.clone(),
            provider_id: "custom".to_string(),
            metadata: RoutingMetadata {
                available_providers: vec!["custom".to_string()],
                selected_provider: Some("custom".to_string()),
                selection_reason: Some(SelectionReason::DirectProviderSpecified),
                ..Default::default()
            },
        })
    }

    /// Branch (a): `model == "auto"`.
    async fn select_auto(&self, request: &RoutingRequest) -> Result<RoutingDecision, RoutingError> {
        let candidate_models: Vec<String> = if request.free_models_only {
            // free_models_only wins over the auto allowlist when both are set:
            // the candidate pool becomes every free-tier model, not the allowlist.
            self.mappings.free_model_ids()
        } else {
            self.mappings
                .auto_allowlist()
                .iter()
                .map(|s| s.to_string())
                .collect()
        };

        let mut all_candidates = Vec::new();
        for model in &candidate_models {
            for mapping in self.mappings.mappings_for(model) {
                if !request.visible_provider_ids.contains(&mapping.provider_id) {
                    continue;
                }
                let metrics = self
                    .metrics
                    .recent_metrics(&mapping.model, &mapping.provider_id)
                    .await;
                let mut score = ProviderScore::new(mapping.provider_id.clone(), metrics);
                score.price = mapping.base_price;
                all_candidates.push((mapping.model.clone(), score));
            }
        }

        if all_candidates.is_empty() {
            if request.free_models_only || request.no_reasoning {
                return Err(RoutingError::NoCandidates);
            }
            return Ok(RoutingDecision {
                model: DEFAULT_AUTO_FALLBACK_MODEL.to_string(),
                provider_id: "openai".to_string(),
                metadata: RoutingMetadata {
                    selected_provider: Some("openai".to_string()),
                    selection_reason: Some(SelectionReason::FallbackFirstAvailable),
                    ..Default::default()
                },
            });
        }

        let available_providers = all_candidates
            .iter()
            .map(|(_, s)| s.provider_id.clone())
            .collect();
        let scores: Vec<ProviderScore> = all_candidates.iter().map(|(_, s)| s.clone()).collect();
        let ranked = score_and_rank(scores);
        let best = ranked.first().ok_or(RoutingError::NoCandidates)?;
        let model = all_candidates
            .iter()
            .find(|(_, s)| s.provider_id == best.provider_id)
            .map(|(m, _)| m.clone())
            .ok_or(RoutingError::NoCandidates)?;

        Ok(RoutingDecision {
            model,
            provider_id: best.provider_id.clone(),
            metadata: RoutingMetadata {
                available_providers,
                selected_provider: Some(best.provider_id.clone()),
                selection_reason: Some(SelectionReason::CheapestAvailable),
                provider_scores: ranked,
                ..Default::default()
            },
        })
    }

    /// Branch (b): explicit provider + model, with low-uptime fallback allowed.
    async fn select_direct_with_fallback(
        &self,
        request: &RoutingRequest,
        provider: &str,
    ) -> Result<RoutingDecision, RoutingError> {
        let mappings = self.mappings.mappings_for(&request.requested_model);
        let original = mappings
            .iter()
            .find(|m| m.provider_id == provider)
            .ok_or_else(|| RoutingError::NoProviderForModel(request.requested_model.clone()))?;

        let original_metrics = self
            .metrics
            .recent_metrics(&original.model, &original.provider_id)
            .await;

        if original_metrics.uptime >= 90.0 {
            return Ok(self.direct_decision(original, SelectionReason::DirectProviderSpecified));
        }

        let mut alternatives = Vec::new();
        for mapping in mappings.iter().filter(|m| m.provider_id != provider) {
            if !request.visible_provider_ids.contains(&mapping.provider_id) {
                continue;
            }
            let metrics = self
                .metrics
                .recent_metrics(&mapping.model, &mapping.provider_id)
                .await;
            if metrics.uptime > original_metrics.uptime {
                let mut score = ProviderScore::new(mapping.provider_id.clone(), metrics);
                score.price = mapping.base_price;
                alternatives.push((mapping.clone(), score));
            }
        }

        if alternatives.is_empty() {
            return Ok(self.direct_decision(original, SelectionReason::DirectProviderSpecified));
        }

        let mut scores: Vec<ProviderScore> = alternatives.iter().map(|(_, s)| s.clone()).collect();
        let mut original_score = ProviderScore::new(original.provider_id.clone(), original_metrics);
        original_score.score = -1.0;
        original_score.price = original.base_price;
        scores.push(original_score.clone());

        let ranked = score_and_rank(scores.clone());
        let best = ranked
            .iter()
            .find(|s| s.provider_id != original.provider_id)
            .cloned();

        match best {
            Some(best) => {
                let mapping = alternatives
                    .into_iter()
                    .find(|(m, _)| m.provider_id == best.provider_id)
                    .map(|(m, _)| m)
                    .ok_or_else(|| RoutingError::NoProviderForModel(request.requested_model.clone()))?;
                Ok(RoutingDecision {
                    model: mapping.model.clone(),
                    provider_id: mapping.provider_id.clone(),
                    metadata: RoutingMetadata {
                        available_providers: ranked.iter().map(|s| s.provider_id.clone()).collect(),
                        selected_provider: Some(mapping.provider_id.clone()),
                        selection_reason: Some(SelectionReason::LowUptimeFallback),
                        provider_scores: ranked,
                        ..Default::default()
                    },
                })
            }
            None => Ok(self.direct_decision(original, SelectionReason::DirectProviderSpecified)),
        }
    }

    /// Explicit provider requested with `no_fallback=true`, or provider is
    /// `llmgateway`/`custom`: always use exactly the requested mapping.
    async fn select_direct_pinned(
        &self,
        request: &RoutingRequest,
        provider: &str,
    ) -> Result<RoutingDecision, RoutingError> {
        let mapping = self
            .mappings
            .mappings_for(&request.requested_model)
            .into_iter()
            .find(|m| m.provider_id == provider)
            .ok_or_else(|| RoutingError::NoProviderForModel(request.requested_model.clone()))?;
        Ok(self.direct_decision(&mapping, SelectionReason::DirectProviderSpecified))
    }

    /// Branch (c): model only, no provider specified.
    async fn select_model_only(&self, request: &RoutingRequest) -> Result<RoutingDecision, RoutingError> {
        let mappings: Vec<ModelMapping> = self
            .mappings
            .mappings_for(&request.requested_model)
            .into_iter()
            .filter(|m| request.visible_provider_ids.contains(&m.provider_id))
            .collect();

        if mappings.is_empty() {
            return Err(RoutingError::NoProviderForModel(request.requested_model.clone()));
        }
        if mappings.len() == 1 {
            return Ok(self.direct_decision(&mappings[0], SelectionReason::SingleProviderAvailable));
        }

        let mut scores = Vec::new();
        for mapping in &mappings {
            let metrics = self
                .metrics
                .recent_metrics(&mapping.model, &mapping.provider_id)
                .await;
            let mut score = ProviderScore::new(mapping.provider_id.clone(), metrics);
            score.price = mapping.base_price;
            scores.push(score);
        }
        let ranked = score_and_rank(scores);
        let best = ranked.first().ok_or(RoutingError::NoCandidates)?;
        let mapping = mappings
            .iter()
            .find(|m| m.provider_id == best.provider_id)
            .ok_or(RoutingError::NoCandidates)?;

        Ok(RoutingDecision {
            model: mapping.model.clone(),
            provider_id: mapping.provider_id.clone(),
            metadata: RoutingMetadata {
                available_providers: ranked.iter().map(|s| s.provider_id.clone()).collect(),
                selected_provider: Some(mapping.provider_id.clone()),
                selection_reason: Some(SelectionReason::CheapestAvailable),
                provider_scores: ranked,
                ..Default::default()
            },
        })
    }

    fn direct_decision(&self, mapping: &ModelMapping, reason: SelectionReason) -> RoutingDecision {
        RoutingDecision {
            model: mapping.model.clone(),
            provider_id: mapping.provider_id.clone(),
            metadata: RoutingMetadata {
                available_providers: vec![mapping.provider_id.clone()],
                selected_provider: Some(mapping.provider_id.clone()),
                selection_reason: Some(reason),
                ..Default::default()
            },
        }
    }
}
