//! Provider Context Resolver (C6): for a chosen `(provider, model)` mapping,
//! resolves credentials and the effective per-attempt request parameters.
//! Endpoint URL and native body construction are delegated to the chosen
//! provider's `LLMProvider::transform_request` (already modeled in
//! `core::traits::provider::llm_provider`); this module owns the parts the
//! spec calls out as gateway-specific: credential-mode selection, the
//! env-token round-robin pool, and the `max_tokens <= mapping.max_output`
//! guard. Grounded in the teacher's `core/router/load_balancer.rs`
//! round-robin index pattern, repurposed per SPEC_FULL §10 to the env-pool.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::RwLock;

use thiserror::Error;

use crate::core::gateway::principal::ProjectMode;

#[derive(Debug, Clone)]
pub enum ProviderCredentials {
    /// Customer-supplied key stored against the organization.
    Stored { api_key: String },
    /// Server-side credential selected round-robin from an environment
    /// variable pool; `env_var_name`/`config_index` let C11 report key
    /// health against the exact slot that was used.
    EnvPool { api_key: String, env_var_name: String, config_index: usize },
}

impl ProviderCredentials {
    pub fn api_key(&self) -> &str {
        match self {
            Self::Stored { api_key } => api_key,
            Self::EnvPool { api_key, .. } => api_key,
        }
    }
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no stored key configured for provider `{0}`")]
    NoStoredKey(String),
    #[error("environment token pool for provider `{0}` is empty")]
    EmptyEnvPool(String),
    #[error("insufficient credits for organization `{0}`")]
    InsufficientCredits(String),
    #[error("max_tokens {requested} exceeds provider maximum {max}")]
    MaxTokensExceeded { requested: u32, max: u32 },
}

/// Looks up a customer-stored provider key. Implemented by storage.
pub trait StoredKeyStore: Send + Sync {
    fn stored_key(&self, organization_id: &str, provider_id: &str) -> Option<String>;
}

/// Round-robin selection over a provider's `<PROVIDER>_API_KEY[, _2, _3...]`
/// environment variables, with per-slot success/failure counters so a
/// persistently failing slot can be reported unhealthy (SPEC_FULL §10
/// key-health reporting service).
pub struct EnvTokenPool {
    keys: Vec<String>,
    cursor: AtomicUsize,
    failures: RwLock<HashMap<usize, AtomicU64>>,
}

impl EnvTokenPool {
    pub fn from_env(provider_id: &str) -> Self {
        let base = format!("{}_API_KEY", provider_id.to_uppercase());
        let mut keys = Vec::new();
        if let Ok(v) = std::env::var(&base) {
            if !v.is_empty() {
                keys.push(v);
            }
        }
        let mut i = 2;
        loop {
            let var = format!("{base}_{i}");
            match std::env::var(&var) {
                Ok(v) if !v.is_empty() => keys.push(v),
                _ => break,
            }
            i += 1;
        }
        Self { keys, cursor: AtomicUsize::new(0), failures: RwLock::new(HashMap::new()) }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Atomically advances the round-robin cursor and returns the selected
    /// slot's key plus its index.
    pub fn next(&self, provider_id: &str) -> Result<(String, usize), ContextError> {
        if self.keys.is_empty() {
            return Err(ContextError::EmptyEnvPool(provider_id.to_string()));
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len();
        Ok((self.keys[idx].clone(), idx))
    }

    pub fn report_failure(&self, config_index: usize) {
        let failures = self.failures.read().unwrap();
        if let Some(counter) = failures.get(&config_index) {
            counter.fetch_add(1, Ordering::Relaxed);
            return;
        }
        drop(failures);
        self.failures.write().unwrap().entry(config_index).or_insert_with(|| AtomicU64::new(1));
    }

    pub fn failure_count(&self, config_index: usize) -> u64 {
        self.failures
            .read()
            .unwrap()
            .get(&config_index)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

/// Resolves credentials for `(provider_id, mode)` per spec §4.6: stored key
/// in `api-keys` mode, env-pool round-robin in `credits` mode, stored
/// preferred with env-pool fallback in `hybrid`.
pub fn resolve_credentials(
    mode: ProjectMode,
    provider_id: &str,
    organization_id: &str,
    stored: &dyn StoredKeyStore,
    env_pool: &EnvTokenPool,
) -> Result<ProviderCredentials, ContextError> {
    match mode {
        ProjectMode::ApiKeys => stored
            .stored_key(organization_id, provider_id)
            .map(|api_key| ProviderCredentials::Stored { api_key })
            .ok_or_else(|| ContextError::NoStoredKey(provider_id.to_string())),
        ProjectMode::Credits => {
            let (api_key, config_index) = env_pool.next(provider_id)?;
            Ok(ProviderCredentials::EnvPool { api_key, env_var_name: format!("{}_API_KEY", provider_id.to_uppercase()), config_index })
        }
        ProjectMode::Hybrid => {
            if let Some(api_key) = stored.stored_key(organization_id, provider_id) {
                return Ok(ProviderCredentials::Stored { api_key });
            }
            let (api_key, config_index) = env_pool.next(provider_id)?;
            Ok(ProviderCredentials::EnvPool { api_key, env_var_name: format!("{}_API_KEY", provider_id.to_uppercase()), config_index })
        }
    }
}

/// Validates the effective `max_tokens` against the mapping's `max_output`
/// (spec §4.6: "Validates effective max_tokens <= mapping.max_output").
pub fn validate_max_tokens(requested: Option<u32>, max_output: u32) -> Result<u32, ContextError> {
    let effective = requested.unwrap_or(max_output);
    if effective > max_output {
        return Err(ContextError::MaxTokensExceeded { requested: effective, max: max_output });
    }
    Ok(effective)
}

/// Per-attempt parameters that flow into C8; built fresh on every attempt
/// (including retries), per spec §9's re-architecture note on mutable outer
/// loop variables.
#[derive(Debug, Clone)]
pub struct AttemptContext {
    pub provider_id: String,
    pub native_model_name: String,
    pub credentials_key: String,
    pub effective_max_tokens: u32,
    pub beta_flags: Vec<String>,
    pub image_generation: bool,
}

/// Beta flags per spec §4.8: `effort-2025-11-24` when Anthropic + `effort`,
/// `structured-outputs-2025-11-13` when Anthropic + `json_schema`.
pub fn anthropic_beta_flags(has_effort: bool, wants_json_schema: bool) -> Vec<String> {
    let mut flags = Vec::new();
    if has_effort {
        flags.push("effort-2025-11-24".to_string());
    }
    if wants_json_schema {
        flags.push("structured-outputs-2025-11-13".to_string());
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoKeys;
    impl StoredKeyStore for NoKeys {
        fn stored_key(&self, _organization_id: &str, _provider_id: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn max_tokens_at_limit_is_accepted() {
        assert_eq!(validate_max_tokens(Some(4096), 4096).unwrap(), 4096);
    }

    #[test]
    fn max_tokens_over_limit_is_rejected() {
        assert!(validate_max_tokens(Some(4097), 4096).is_err());
    }

    #[test]
    fn api_keys_mode_without_stored_key_fails() {
        let pool = EnvTokenPool { keys: vec![], cursor: AtomicUsize::new(0), failures: RwLock::new(HashMap::new()) };
        let err = resolve_credentials(ProjectMode::ApiKeys, "openai", "org-1", &NoKeys, &pool).unwrap_err();
        assert!(matches!(err, ContextError::NoStoredKey(_)));
    }

    #[test]
    fn anthropic_beta_flags_combine() {
        assert_eq!(anthropic_beta_flags(true, true).len(), 2);
        assert!(anthropic_beta_flags(false, false).is_empty());
    }
}
