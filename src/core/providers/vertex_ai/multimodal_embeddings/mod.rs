//! Multimodal Embeddings Module
//!
//! Handle text, image, and video embeddings

use super::error::VertexAIError;
use serde::{Deserialize, Serialize};

/// Multimodal embedding request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultimodalEmbeddingRequest {
    pub text: Option<String>,
    pub image: Option<ImageInput>,
    pub video: Option<VideoInput>,
}

/// Image input for embeddings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_base64_encoded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcs_uri: Option<String>,
}

/// Video input for embeddings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInput {
    pub gcs_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_offset_sec: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_offset_sec: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_sec: Option<f32>,
}

/// Multimodal embedding handler
pub struct MultimodalEmbeddingHandler;

impl MultimodalEmbeddingHandler {
    /// Create embedding for multimodal content
    pub async fn embed_multimodal(
        _request: MultimodalEmbeddingRequest,
    ) -> Result<Vec<f32>, VertexAIError> {
        // TODO: Implement multimodal embedding
        Ok(vec![0.0; 1408]) // Multimodal embedding dimension
    }
}
