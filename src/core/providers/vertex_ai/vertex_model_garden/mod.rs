//! Vertex AI Model Garden Module
//!
//! Support for third-party models in Vertex AI Model Garden

use super::error::VertexAIError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Model Garden model information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelGardenModel {
    pub model_id: String,
    pub display_name: String,
    pub publisher: String,
    pub version: String,
    pub endpoint_id: Option<String>,
    pub supported_tasks: Vec<String>,
    pub input_format: String,
    pub output_format: String,
}

/// Model Garden request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelGardenRequest {
    pub model: String,
    pub inputs: serde_json::Value,
    pub parameters: Option<HashMap<String, serde_json::Value>>,
}

/// Model Garden response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelGardenResponse {
    pub predictions: Vec<serde_json::Value>,
    pub metadata: Option<serde_json::Value>,
}

/// Model Garden handler
pub struct ModelGardenHandler {
    project_id: String,
    location: String,
}

impl ModelGardenHandler {
    /// Create new Model Garden handler
    pub fn new(project_id: String, location: String) -> Self {
        Self {
            project_id,
            location,
        }
    }

    /// List available models in Model Garden
    pub async fn list_models(&self) -> Result<Vec<ModelGardenModel>, VertexAIError> {
        // TODO: Implement actual model listing
        Ok(vec![ModelGardenModel {
            model_id: "codey-completion".to_string(),
            display_name: "Codey Completion".to_string(),
            publisher: "Google".to_string(),
            version: "001".to_string(),
            endpoint_id: None,
            supported_tasks: vec!["code-completion".to_string()],
            input_format: "text".to_string(),
            output_format: "text".to_string(),
        }])
    }

    /// Deploy a model from Model Garden
    pub async fn deploy_model(
        &self,
        _model_id: &str,
        _endpoint_display_name: &str,
    ) -> Result<String, VertexAIError> {
        // TODO: Implement model deployment
        Ok(format!(
            "projects/{}/locations/{}/endpoints/{}",
            self.project_id,
            self.location,
            uuid::Uuid::new_v4()
        ))
    }

    /// Make prediction using deployed model
    pub async fn predict(
        &self,
        _endpoint_id: &str,
        request: ModelGardenRequest,
    ) -> Result<ModelGardenResponse, VertexAIError> {
        // TODO: Implement prediction
        Ok(ModelGardenResponse {
            predictions: vec![request.inputs],
            metadata: None,
        })
    }

    /// Get supported models
    pub fn get_supported_models(&self) -> Vec<&str> {
        vec![
            "code-bison",
            "code-gecko",
            "text-bison",
            "chat-bison",
            "embedding-gecko",
            "imagegeneration",
        ]
    }

    /// Check if model is available in Model Garden
    pub fn is_model_available(&self, model: &str) -> bool {
        self.get_supported_models().contains(&model)
    }

    /// Transform standard request to Model Garden format
    pub fn transform_request(
        &self,
        model: &str,
        input: serde_json::Value,
    ) -> Result<ModelGardenRequest, VertexAIError> {
        match model {
            "code-bison" | "code-gecko" => Ok(ModelGardenRequest {
                model: model.to_string(),
                inputs: serde_json::json!({
                    "prefix": input.get("prompt").unwrap_or(&serde_json::Value::String("".to_string()))
                }),
                parameters: Some(HashMap::from([
                    (
                        "temperature".to_string(),
                        input
                            .get("temperature")
                            .unwrap_or(&serde_json::Value::Number(
                                serde_json::Number::from_f64(0.7).unwrap(),
                            ))
                            .clone(),
                    ),
                    (
                        "maxOutputTokens".to_string(),
                        input
                            .get("max_tokens")
                            .unwrap_or(&serde_json::Value::Number(256.into()))
                            .clone(),
                    ),
                ])),
            }),
            "text-bison" | "chat-bison" => Ok(ModelGardenRequest {
                model: model.to_string(),
                inputs: serde_json::json!({
                    "prompt": input.get("prompt").unwrap_or(&serde_json::Value::String("".to_string()))
                }),
                parameters: Some(HashMap::from([
                    (
                        "temperature".to_string(),
                        input
                            .get("temperature")
                            .unwrap_or(&serde_json::Value::Number(
                                serde_json::Number::from_f64(0.7).unwrap(),
                            ))
                            .clone(),
                    ),
                    (
                        "maxOutputTokens".to_string(),
                        input
                            .get("max_tokens")
                            .unwrap_or(&serde_json::Value::Number(256.into()))
                            .clone(),
                    ),
                ])),
            }),
            _ => Err(VertexAIError::UnsupportedModel(model.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_model_available() {
        let handler = ModelGardenHandler::new("test".to_string(), "us-central1".to_string());

        assert!(handler.is_model_available("code-bison"));
        assert!(handler.is_model_available("text-bison"));
        assert!(!handler.is_model_available("unknown-model"));
    }

    #[test]
    fn test_transform_request() {
        let handler = ModelGardenHandler::new("test".to_string(), "us-central1".to_string());

        let input = serde_json::json!({
            "prompt": "def hello_world():",
            "temperature": 0.5,
            "max_tokens": 100
        });

        let result = handler.transform_request("code-bison", input).unwrap();
        assert_eq!(result.model, "code-bison");
        assert!(result.inputs.get("prefix").is_some());
        assert!(result.parameters.is_some());
    }
}
