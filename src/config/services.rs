// file: src/config/services.rs
// description: connection settings for the external azure services
// reference: azure ai search, document intelligence and azure openai endpoints

use serde::{Deserialize, Serialize};

pub const DEFAULT_INDEX_NAME: &str = "rag-index";
pub const DEFAULT_DEPLOYMENT_NAME: &str = "gpt-4o";
/// Deployment used when `AZURE_OPENAI_MODEL` is unset.
pub const DEFAULT_OPENAI_MODEL: &str = "o4-mini";
pub const DEFAULT_API_VERSION: &str = "2024-02-01";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchServiceConfig {
    pub endpoint: String,
    pub api_key: String,
    pub index_name: String,
}

impl SearchServiceConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
        }
    }

    pub fn redacted(&self) -> Self {
        Self {
            api_key: mask_secret(&self.api_key),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocumentExtractionConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl DocumentExtractionConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn redacted(&self) -> Self {
        Self {
            api_key: mask_secret(&self.api_key),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageModelConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment_name: String,
    pub api_version: String,
}

impl LanguageModelConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            deployment_name: DEFAULT_DEPLOYMENT_NAME.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn with_deployment(mut self, deployment_name: impl Into<String>) -> Self {
        self.deployment_name = deployment_name.into();
        self
    }

    pub fn redacted(&self) -> Self {
        Self {
            api_key: mask_secret(&self.api_key),
            ..self.clone()
        }
    }
}

/// Keeps the first four characters of a secret and hides the rest.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }

    let visible: String = secret.chars().take(4).collect();
    if visible.chars().count() == secret.chars().count() {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
