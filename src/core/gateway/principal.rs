//! Principal Resolver (C2): looks up API key -> project -> organization,
//! checking status, usage limits, plan restrictions, and the retention
//! credit gate. Persistent storage of these entities is an external
//! collaborator (spec §1 lists database schema ownership as out of scope);
//! this module only defines the shape and the lookup seam, mirroring the
//! `ModelMappingSource` trait-as-collaborator idiom already used by
//! `core::routing::engine`.

use thiserror::Error;

/// `project.mode` gates which provider credentials are visible to a request
/// (stored keys, the environment pool, or both).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectMode {
    ApiKeys,
    Credits,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionLevel {
    None,
    Retain,
}

#[derive(Debug, Clone)]
pub struct Organization {
    pub id: String,
    pub credits: f64,
    pub dev_plan: Option<String>,
    pub dev_plan_credits_limit: f64,
    pub dev_plan_credits_used: f64,
    pub dev_plan_credits_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub dev_plan_allow_all_models: bool,
    pub plan: String,
    pub retention_level: RetentionLevel,
    pub is_personal: bool,
}

impl Organization {
    pub fn dev_plan_remaining(&self) -> f64 {
        self.dev_plan_credits_limit - self.dev_plan_credits_used
    }

    pub fn is_enterprise(&self) -> bool {
        self.plan == "enterprise"
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub organization_id: String,
    pub mode: ProjectMode,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Active,
    Deleted,
}

#[derive(Debug, Clone)]
pub struct ApiKeyRecord {
    pub status: ApiKeyStatus,
    pub usage: f64,
    pub usage_limit: Option<f64>,
    pub project_id: String,
    pub iam_allowed_providers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyStatus {
    Active,
    Inactive,
}

/// Resolved identity for one request: never mutated once built.
#[derive(Debug, Clone)]
pub struct Principal {
    pub api_key: ApiKeyRecord,
    pub project: Project,
    pub organization: Organization,
}

impl Principal {
    /// Coding-only model allowlist enforced on personal dev-plan orgs that
    /// have not opted into `dev_plan_allow_all_models`.
    pub fn coding_models_only(&self) -> bool {
        self.organization.is_personal
            && self.organization.dev_plan.is_some()
            && !self.organization.dev_plan_allow_all_models
    }
}

#[derive(Debug, Error)]
pub enum PrincipalError {
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
    #[error("internal lookup failure: {0}")]
    Internal(String),
}

/// Loads API key, project, and organization records. Implemented by the
/// storage layer; kept as a trait so this module owns no database schema.
#[async_trait::async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn lookup_api_key(&self, token: &str) -> Result<Option<ApiKeyRecord>, PrincipalError>;
    async fn load_project(&self, project_id: &str) -> Result<Option<Project>, PrincipalError>;
    async fn load_organization(&self, organization_id: &str) -> Result<Option<Organization>, PrincipalError>;
}

const CODING_MODELS: &[&str] = &["gpt-4.1", "gpt-5", "claude-3-5-sonnet", "claude-4-sonnet"];

/// Runs the full C2 checks against a bearer token, returning the resolved
/// `Principal` or the first failing rule (spec §4.2).
pub async fn resolve(
    store: &dyn PrincipalStore,
    token: &str,
    requested_model: &str,
) -> Result<Principal, PrincipalError> {
    let api_key = store
        .lookup_api_key(token)
        .await?
        .ok_or(PrincipalError::Unauthenticated)?;
    if api_key.status != ApiKeyStatus::Active {
        return Err(PrincipalError::Unauthenticated);
    }
    if let Some(limit) = api_key.usage_limit {
        if api_key.usage >= limit {
            return Err(PrincipalError::UsageLimitExceeded);
        }
    }

    let project = store
        .load_project(&api_key.project_id)
        .await
        .map_err(|e| PrincipalError::Internal(e.to_string()))?
        .ok_or_else(|| PrincipalError::Internal("project lookup returned nothing".to_string()))?;
    if project.status == ProjectStatus::Deleted {
        return Err(PrincipalError::ProjectGone);
    }

    let organization = store
        .load_organization(&project.organization_id)
        .await
        .map_err(|e| PrincipalError::Internal(e.to_string()))?
        .ok_or_else(|| PrincipalError::Internal("organization lookup returned nothing".to_string()))?;

    let principal = Principal { api_key, project, organization };

    if principal.coding_models_only() && !CODING_MODELS.contains(&requested_model) {
        return Err(PrincipalError::ModelNotPermitted(requested_model.to_string()));
    }

    if principal.organization.retention_level == RetentionLevel::Retain {
        let available = principal.organization.credits + principal.organization.dev_plan_remaining();
        if available <= 0.0 {
            return Err(PrincipalError::PaymentRequired);
        }
    }

    Ok(principal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FakeStore {
        key: Option<ApiKeyRecord>,
        project: Project,
        organization: Organization,
    }

    #[async_trait]
    impl PrincipalStore for FakeStore {
        async fn lookup_api_key(&self, _token: &str) -> Result<Option<ApiKeyRecord>, PrincipalError> {
            Ok(self.key.clone())
        }
        async fn load_project(&self, _id: &str) -> Result<Option<Project>, PrincipalError> {
            Ok(Some(self.project.clone()))
        }
        async fn load_organization(&self, _id: &str) -> Result<Option<Organization>, PrincipalError> {
            Ok(Some(self.organization.clone()))
        }
    }

    fn org() -> Organization {
        Organization {
            id: "org-1".to_string(),
            credits: 10.0,
            dev_plan: None,
            dev_plan_credits_limit: 0.0,
            dev_plan_credits_used: 0.0,
            dev_plan_credits_expires_at: None,
            dev_plan_allow_all_models: false,
            plan: "pro".to_string(),
            retention_level: RetentionLevel::None,
            is_personal: false,
        }
    }

    #[tokio::test]
    async fn missing_key_is_unauthenticated() {
        let store = FakeStore {
            key: None,
            project: Project { id: "p".to_string(), organization_id: "org-1".to_string(), mode: ProjectMode::Credits, status: ProjectStatus::Active },
            organization: org(),
        };
        let err = resolve(&store, "bad-token", "gpt-4o").await.unwrap_err();
        assert!(matches!(err, PrincipalError::Unauthenticated));
    }

    #[tokio::test]
    async fn usage_limit_exceeded() {
        let store = FakeStore {
            key: Some(ApiKeyRecord { status: ApiKeyStatus::Active, usage: 100.0, usage_limit: Some(100.0), project_id: "p".to_string(), iam_allowed_providers: None }),
            project: Project { id: "p".to_string(), organization_id: "org-1".to_string(), mode: ProjectMode::Credits, status: ProjectStatus::Active },
            organization: org(),
        };
        let err = resolve(&store, "tok", "gpt-4o").await.unwrap_err();
        assert!(matches!(err, PrincipalError::UsageLimitExceeded));
    }

    #[tokio::test]
    async fn retention_gate_blocks_when_no_credits_remain() {
        let mut organization = org();
        organization.credits = 0.0;
        organization.retention_level = RetentionLevel::Retain;
        let store = FakeStore {
            key: Some(ApiKeyRecord { status: ApiKeyStatus::Active, usage: 0.0, usage_limit: None, project_id: "p".to_string(), iam_allowed_providers: None }),
            project: Project { id: "p".to_string(), organization_id: "org-1".to_string(), mode: ProjectMode::Credits, status: ProjectStatus::Active },
            organization,
        };
        let err = resolve(&store, "tok", "gpt-4o").await.unwrap_err();
        assert!(matches!(err, PrincipalError::PaymentRequired));
    }
}
