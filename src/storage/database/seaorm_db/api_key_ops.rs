use crate::utils::error::{GatewayError, Result};
use tracing::warn;

use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Create a new API key
    pub async fn create_api_key(
        &self,
        _api_key: &crate::core::models::ApiKey,
    ) -> Result<crate::core::models::ApiKey> {
        // TODO: Implement API key creation
        warn!("create_api_key not implemented yet");
        Err(GatewayError::NotImplemented(
            "create_api_key not implemented".to_string(),
        ))
    }

    /// Find API key by hash
    pub async fn find_api_key_by_hash(
        &self,
        _key_hash: &str,
    ) -> Result<Option<crate::core::models::ApiKey>> {
        // TODO: Implement API key lookup by hash
        warn!("find_api_key_by_hash not implemented yet");
        Ok(None)
    }

    /// Find API key by ID
    pub async fn find_api_key_by_id(
        &self,
        _key_id: uuid::Uuid,
    ) -> Result<Option<crate::auth::ApiKey>> {
        // TODO: Implement API key lookup by ID
        warn!("find_api_key_by_id not implemented yet");
        Ok(None)
    }

    /// Deactivate API key
    pub async fn deactivate_api_key(&self, _key_id: uuid::Uuid) -> Result<()> {
        // TODO: Implement API key deactivation
        warn!("deactivate_api_key not implemented yet");
        Ok(())
    }

    /// List API keys by user
    /// Note: Changed from i64 to Uuid to avoid lossy conversion from Uuid->i64
    pub async fn list_api_keys_by_user(
        &self,
        _user_id: uuid::Uuid,
    ) -> Result<Vec<crate::auth::ApiKey>> {
        // TODO: Implement API key listing by user
        warn!("list_api_keys_by_user not implemented yet");
        Ok(vec![])
    }

    /// List API keys by team
    pub async fn list_api_keys_by_team(
        &self,
        _team_id: uuid::Uuid,
    ) -> Result<Vec<crate::auth::ApiKey>> {
        // TODO: Implement API key listing by team
        warn!("list_api_keys_by_team not implemented yet");
        Ok(vec![])
    }

    /// Update API key permissions
    pub async fn update_api_key_permissions(
        &self,
        _key_id: uuid::Uuid,
        _permissions: &[String],
    ) -> Result<()> {
        // TODO: Implement API key permissions update
        warn!("update_api_key_permissions not implemented yet");
        Ok(())
    }

    /// Update API key rate limits
    pub async fn update_api_key_rate_limits(
        &self,
        _key_id: uuid::Uuid,
        _rate_limits: &crate::core::models::RateLimits,
    ) -> Result<()> {
        // TODO: Implement API key rate limits update
        warn!("update_api_key_rate_limits not implemented yet");
        Ok(())
    }

    /// Update API key expiration
    pub async fn update_api_key_expiration(
        &self,
        _key_id: uuid::Uuid,
        _expires_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<()> {
        // TODO: Implement API key expiration update
        warn!("update_api_key_expiration not implemented yet");
        Ok(())
    }

    /// Update API key usage statistics
    pub async fn update_api_key_usage(
        &self,
        _key_id: uuid::Uuid,
        _requests: u64,
        _tokens: u64,
        _cost: f64,
    ) -> Result<()> {
        // TODO: Implement API key usage update
        warn!("update_api_key_usage not implemented yet");
        Ok(())
    }

    /// Update API key last used timestamp
    pub async fn update_api_key_last_used(&self, _key_id: uuid::Uuid) -> Result<()> {
        // TODO: Implement API key last used update
        warn!("update_api_key_last_used not implemented yet");
        Ok(())
    }

    /// Delete expired API keys
    pub async fn delete_expired_api_keys(&self) -> Result<u64> {
        // TODO: Implement expired API key deletion
        warn!("delete_expired_api_keys not implemented yet");
        Ok(0)
    }
}
