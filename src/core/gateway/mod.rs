//! Request pipeline orchestration: the per-request chain from raw HTTP body
//! to structured usage log, described component-by-component as C1-C13.
//!
//! `core::routing` supplies C5 (provider selection) and C10 (retry); this
//! module supplies everything else and the `Pipeline` that wires them
//! together in the order C1 -> C2 -> C3 -> C4 -> C5 -> C7(lookup) -> C6 ->
//! C8 -> {C9 | unary} -> C11 -> C7(store) -> C12, with C10 re-entering at C6
//! on a retryable failure.

pub mod capability;
pub mod cache;
pub mod context;
pub mod cost;
pub mod envelope;
pub mod executor;
pub mod guardrail;
pub mod healer;
pub mod logger;
pub mod pipeline;
pub mod principal;

pub use capability::{
    GOOGLE_SAFETY_FINISH_REASONS, CapabilityError, ModelCatalogSource, ModelDefinition,
    ProviderMapping, eligible_mappings,
};
pub use cache::{CacheEntry, CacheKey, CacheStore, StreamingCacheChunk, StreamingCacheMetadata};
pub use context::{AttemptContext, ContextError, EnvTokenPool, ProviderCredentials};
pub use cost::{CostAccountant, CostBreakdown};
pub use envelope::{NormalizerError, RequestEnvelope, normalize};
pub use executor::{ExecutorError, UpstreamOutcome};
pub use guardrail::{GuardrailDecision, GuardrailError, GuardrailService};
pub use healer::{HealResult, heal_json};
pub use logger::{AttemptLogRow, GatewayLogger};
pub use pipeline::{Pipeline, PipelineError};
pub use principal::{Organization, Principal, PrincipalError, PrincipalStore, Project};
