//! Retry orchestrator (C10)
//!
//! State machine per request: `Prepared -> Dispatched -> (Success | Failed)`,
//! with `Failed -> Prepared'` driven by `select_next_provider`. Grounded in
//! the teacher's `core/router/fallback.rs` execution-result/retry shape,
//! generalized to the gateway's own provider-score candidate list.

use super::types::ProviderScore;
use std::collections::HashSet;

const MAX_RETRIES: u32 = 3;

/// The request's position in the attempt lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptState {
    Prepared,
    Dispatched,
    Succeeded,
    Failed,
}

/// What happened on the most recent dispatch.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub status_code: Option<u16>,
    pub is_client_error: bool,
    pub is_content_filter: bool,
}

impl AttemptOutcome {
    /// Status codes the spec calls retryable: connect/timeout (modeled as
    /// `None`), 408, 429, and every 5xx.
    fn is_retryable_status(&self) -> bool {
        match self.status_code {
            None => true,
            Some(408) | Some(429) => true,
            Some(code) if (500..600).contains(&code) => true,
            _ => false,
        }
    }
}

/// Drives provider selection across retries for a single request.
pub struct RetryOrchestrator {
    explicit_provider_requested: bool,
    no_fallback: bool,
    retry_count: u32,
    failed_provider_ids: HashSet<String>,
    /// The provider currently selected/dispatched, excluded from the next pick.
    current_provider_id: Option<String>,
    final_log_id: String,
}

impl RetryOrchestrator {
    pub fn new(explicit_provider_requested: bool, no_fallback: bool, final_log_id: String) -> Self {
        Self {
            explicit_provider_requested,
            no_fallback,
            retry_count: 0,
            failed_provider_ids: HashSet::new(),
            current_provider_id: None,
            final_log_id,
        }
    }

    pub fn final_log_id(&self) -> &str {
        &self.final_log_id
    }

    /// Record that `provider_id` was just dispatched.
    pub fn mark_dispatched(&mut self, provider_id: impl Into<String>) {
        self.current_provider_id = Some(provider_id.into());
    }

    /// Record a failed attempt. The failed provider does not consume a retry
    /// slot when its context could not be resolved at all (e.g. missing key);
    /// pass `consumed_retry_slot = false` in that case.
    pub fn mark_failed(&mut self, provider_id: impl Into<String>, consumed_retry_slot: bool) {
        self.failed_provider_ids.insert(provider_id.into());
        if consumed_retry_slot {
            self.retry_count += 1;
        }
    }

    /// `should_retry`: true iff every one of the spec's conditions holds.
    pub fn should_retry(&self, outcome: &AttemptOutcome, remaining_candidates: &[ProviderScore]) -> bool {
        if self.no_fallback {
            return false;
        }
        if self.explicit_provider_requested {
            return false;
        }
        if outcome.is_client_error || outcome.is_content_filter {
            return false;
        }
        if !outcome.is_retryable_status() {
            return false;
        }
        if self.retry_count >= MAX_RETRIES {
            return false;
        }
        remaining_candidates
            .iter()
            .any(|c| !self.failed_provider_ids.contains(&c.provider_id))
    }

    /// Choose the highest-scoring candidate not yet failed and not the one
    /// currently selected.
    pub fn select_next_provider<'a>(&self, scores: &'a [ProviderScore]) -> Option<&'a ProviderScore> {
        scores.iter().find(|c| {
            !self.failed_provider_ids.contains(&c.provider_id)
                && self.current_provider_id.as_deref() != Some(c.provider_id.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(id: &str) -> ProviderScore {
        ProviderScore {
            provider_id: id.to_string(),
            score: 1.0,
            price: 1.0,
            uptime: 99.0,
            latency: 1.0,
            throughput: 1.0,
            priority: 0,
            failed: false,
            status_code: None,
            error_type: None,
        }
    }

    #[test]
    fn retries_on_5xx_until_max() {
        let mut orchestrator = RetryOrchestrator::new(false, false, "log-1".to_string());
        let outcome = AttemptOutcome {
            status_code: Some(503),
            is_client_error: false,
            is_content_filter: false,
        };
        let candidates = vec![score("a"), score("b")];
        assert!(orchestrator.should_retry(&outcome, &candidates));
        orchestrator.mark_failed("a", true);
        orchestrator.mark_failed("a", true);
        orchestrator.mark_failed("a", true);
        assert!(!orchestrator.should_retry(&outcome, &candidates));
    }

    #[test]
    fn never_retries_with_explicit_provider() {
        let orchestrator = RetryOrchestrator::new(true, false, "log-1".to_string());
        let outcome = AttemptOutcome {
            status_code: Some(503),
            is_client_error: false,
            is_content_filter: false,
        };
        assert!(!orchestrator.should_retry(&outcome, &[score("a")]));
    }

    #[test]
    fn client_errors_are_terminal() {
        let orchestrator = RetryOrchestrator::new(false, false, "log-1".to_string());
        let outcome = AttemptOutcome {
            status_code: Some(400),
            is_client_error: true,
            is_content_filter: false,
        };
        assert!(!orchestrator.should_retry(&outcome, &[score("a")]));
    }
}
