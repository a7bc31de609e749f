//! Guardrail Gate (C3): for qualifying principals (enterprise plan only),
//! invokes an external guardrail classifier and applies redactions or blocks
//! before the request reaches routing. Only the classifier's
//! `check -> {allowed, redactions, violations}` contract is modeled here
//! (spec §1 lists guardrail classifier internals as out of scope), mirroring
//! the collaborator-trait idiom used throughout `core::gateway`.

use thiserror::Error;
use tracing::warn;

use crate::core::gateway::principal::Principal;
use crate::core::types::chat::ChatMessage;

#[derive(Debug, Clone)]
pub struct GuardrailViolation {
    pub rule: String,
    pub message: String,
}

/// One message-level redaction: replace the text at `message_index` with
/// `redacted_text`.
#[derive(Debug, Clone)]
pub struct Redaction {
    pub message_index: usize,
    pub redacted_text: String,
}

#[derive(Debug, Clone)]
pub struct GuardrailDecision {
    pub allowed: bool,
    pub redactions: Vec<Redaction>,
    pub violations: Vec<GuardrailViolation>,
}

#[derive(Debug, Error)]
pub enum GuardrailError {
    #[error("blocked by guardrail policy")]
    Blocked(Vec<GuardrailViolation>),
    #[error("guardrail classifier call failed: {0}")]
    ClassifierUnavailable(String),
}

/// External guardrail classifier contract.
#[async_trait::async_trait]
pub trait GuardrailService: Send + Sync {
    async fn check(&self, messages: &[ChatMessage]) -> Result<GuardrailDecision, GuardrailError>;
    /// Fire-and-forget violation logging; failures here are swallowed per spec.
    async fn log_violation(&self, violation: &GuardrailViolation);
}

/// Runs the guardrail check for `principal` if its organization is on the
/// enterprise plan; otherwise passes the messages through untouched.
pub async fn apply(
    service: &dyn GuardrailService,
    principal: &Principal,
    messages: &mut Vec<ChatMessage>,
) -> Result<(), GuardrailError> {
    if !principal.organization.is_enterprise() {
        return Ok(());
    }

    let decision = service.check(messages).await?;

    for violation in &decision.violations {
        service.log_violation(violation).await;
    }

    if !decision.allowed {
        return Err(GuardrailError::Blocked(decision.violations));
    }

    for redaction in decision.redactions {
        if let Some(message) = messages.get_mut(redaction.message_index) {
            message.content = Some(crate::core::types::message::MessageContent::Text(redaction.redacted_text));
        } else {
            warn!(index = redaction.message_index, "guardrail redaction targeted an out-of-range message");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gateway::principal::{ApiKeyRecord, ApiKeyStatus, Organization, Project, ProjectMode, ProjectStatus, RetentionLevel};
    use crate::core::types::message::{MessageContent, MessageRole};
    use async_trait::async_trait;

    struct AllowAll;
    #[async_trait]
    impl GuardrailService for AllowAll {
        async fn check(&self, _messages: &[ChatMessage]) -> Result<GuardrailDecision, GuardrailError> {
            Ok(GuardrailDecision { allowed: true, redactions: vec![], violations: vec![] })
        }
        async fn log_violation(&self, _violation: &GuardrailViolation) {}
    }

    struct BlockAll;
    #[async_trait]
    impl GuardrailService for BlockAll {
        async fn check(&self, _messages: &[ChatMessage]) -> Result<GuardrailDecision, GuardrailError> {
            Ok(GuardrailDecision {
                allowed: false,
                redactions: vec![],
                violations: vec![GuardrailViolation { rule: "pii".to_string(), message: "ssn detected".to_string() }],
            })
        }
        async fn log_violation(&self, _violation: &GuardrailViolation) {}
    }

    fn principal(enterprise: bool) -> Principal {
        Principal {
            api_key: ApiKeyRecord { status: ApiKeyStatus::Active, usage: 0.0, usage_limit: None, project_id: "p".to_string(), iam_allowed_providers: None },
            project: Project { id: "p".to_string(), organization_id: "o".to_string(), mode: ProjectMode::Credits, status: ProjectStatus::Active },
            organization: Organization {
                id: "o".to_string(),
                credits: 10.0,
                dev_plan: None,
                dev_plan_credits_limit: 0.0,
                dev_plan_credits_used: 0.0,
                dev_plan_credits_expires_at: None,
                dev_plan_allow_all_models: false,
                plan: if enterprise { "enterprise".to_string() } else { "pro".to_string() },
                retention_level: RetentionLevel::None,
                is_personal: false,
            },
        }
    }

    fn messages() -> Vec<ChatMessage> {
        vec![ChatMessage { role: MessageRole::User, content: Some(MessageContent::Text("hi".to_string())), name: None, tool_calls: None, tool_call_id: None, function_call: None }]
    }

    #[tokio::test]
    async fn skips_check_for_non_enterprise() {
        let mut msgs = messages();
        apply(&BlockAll, &principal(false), &mut msgs).await.unwrap();
    }

    #[tokio::test]
    async fn blocks_enterprise_violation() {
        let mut msgs = messages();
        let err = apply(&BlockAll, &principal(true), &mut msgs).await.unwrap_err();
        assert!(matches!(err, GuardrailError::Blocked(_)));
    }

    #[tokio::test]
    async fn allows_clean_enterprise_request() {
        let mut msgs = messages();
        apply(&AllowAll, &principal(true), &mut msgs).await.unwrap();
    }
}
