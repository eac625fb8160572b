// file: src/config/mod.rs
// description: application configuration assembled from the environment
// reference: https://docs.rs/config

pub mod env;
pub mod services;
pub mod system;
pub mod vision;

pub use env::{ENV_VARS, EnvSnapshot, EnvVar};
pub use services::{DocumentExtractionConfig, LanguageModelConfig, SearchServiceConfig, mask_secret};
pub use system::SystemParameters;
pub use vision::{Device, ModelChoice, VisionModelConfig};

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, warn};

/// Every setting the RAG pipeline reads at startup.
///
/// Built once and shared read-only; later changes to the environment are
/// not picked up by an existing instance.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    pub search: SearchServiceConfig,
    pub document_extraction: DocumentExtractionConfig,
    pub language_model: LanguageModelConfig,
    pub vision: VisionModelConfig,
    pub system: SystemParameters,
}

/// Raw variable values as deserialized from the snapshot.
/// Field names are the lowercased variable names.
#[derive(Debug, Default, Deserialize)]
struct RawEnv {
    #[serde(default)]
    azure_search_endpoint: String,
    #[serde(default)]
    azure_search_api_key: String,
    #[serde(default)]
    azure_doc_intelligence_endpoint: String,
    #[serde(default)]
    azure_doc_intelligence_api_key: String,
    #[serde(default)]
    azure_openai_endpoint: String,
    #[serde(default)]
    azure_openai_api_key: String,
    #[serde(default = "default_openai_model")]
    azure_openai_model: String,
    model_choice: Option<String>,
    cuda_available: Option<String>,
}

fn default_openai_model() -> String {
    services::DEFAULT_OPENAI_MODEL.to_string()
}

impl AppConfig {
    /// Builds the configuration from the current process environment.
    pub fn from_env() -> Self {
        Self::from_snapshot(&EnvSnapshot::from_process())
    }

    /// Builds the configuration from the process environment layered over
    /// an env file. See [`EnvSnapshot::load`].
    pub fn load(env_file: Option<&Path>, discover: bool) -> Result<Self> {
        Ok(Self::from_snapshot(&EnvSnapshot::load(env_file, discover)?))
    }

    /// Never fails: a snapshot that cannot be deserialized is logged and
    /// treated as empty, which `validate` then reports.
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        Self::try_from_snapshot(snapshot).unwrap_or_else(|e| {
            error!("Failed to read configuration variables: {}", e);
            Self::from_raw(RawEnv {
                azure_openai_model: default_openai_model(),
                ..RawEnv::default()
            })
        })
    }

    pub fn try_from_snapshot(snapshot: &EnvSnapshot) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .try_parsing(false)
                    .source(Some(snapshot.vars().clone())),
            )
            .build()?;

        let raw: RawEnv = settings.try_deserialize()?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawEnv) -> Self {
        let model_choice = match raw.model_choice.as_deref() {
            Some(value) => {
                if !ModelChoice::is_recognized(value) {
                    warn!(
                        "Unrecognized {} '{}', falling back to {}",
                        env::MODEL_CHOICE,
                        value,
                        ModelChoice::Florence2
                    );
                }
                ModelChoice::parse_lenient(value)
            }
            None => ModelChoice::default(),
        };
        let device = Device::from_cuda_flag(raw.cuda_available.as_deref());

        Self {
            search: SearchServiceConfig::new(raw.azure_search_endpoint, raw.azure_search_api_key),
            document_extraction: DocumentExtractionConfig::new(
                raw.azure_doc_intelligence_endpoint,
                raw.azure_doc_intelligence_api_key,
            ),
            language_model: LanguageModelConfig::new(
                raw.azure_openai_endpoint,
                raw.azure_openai_api_key,
            )
            .with_deployment(raw.azure_openai_model),
            vision: VisionModelConfig::new(model_choice, device),
            system: SystemParameters::default(),
        }
    }

    /// Mandatory values paired with the variable that supplies them, in
    /// reporting order.
    pub fn required_fields(&self) -> [(&str, &'static str); 6] {
        [
            (self.search.endpoint.as_str(), env::AZURE_SEARCH_ENDPOINT),
            (self.search.api_key.as_str(), env::AZURE_SEARCH_API_KEY),
            (
                self.document_extraction.endpoint.as_str(),
                env::AZURE_DOC_INTELLIGENCE_ENDPOINT,
            ),
            (
                self.document_extraction.api_key.as_str(),
                env::AZURE_DOC_INTELLIGENCE_API_KEY,
            ),
            (self.language_model.endpoint.as_str(), env::AZURE_OPENAI_ENDPOINT),
            (self.language_model.api_key.as_str(), env::AZURE_OPENAI_API_KEY),
        ]
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.required_fields()
            .into_iter()
            .filter(|(value, _)| value.is_empty())
            .map(|(_, name)| name)
            .collect()
    }

    /// Returns true when every mandatory value is present. Missing names are
    /// reported in a single error event; the caller decides whether to stop.
    pub fn validate(&self) -> bool {
        match self.missing_error() {
            Some(err) => {
                error!("{}", err);
                false
            }
            None => true,
        }
    }

    pub fn ensure_valid(&self) -> Result<()> {
        match self.missing_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn missing_error(&self) -> Option<ConfigError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            None
        } else {
            Some(ConfigError::MissingFields(
                missing.into_iter().map(str::to_string).collect(),
            ))
        }
    }

    /// Copy with every API key masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            search: self.search.redacted(),
            document_extraction: self.document_extraction.redacted(),
            language_model: self.language_model.redacted(),
            ..self.clone()
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        rendered.map_err(|e| ConfigError::Serialization(e.to_string()))
    }
}
