// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns

//! Runtime configuration for the late-interaction RAG pipeline.
//!
//! Build an [`AppConfig`] once at startup, call [`AppConfig::validate`] to
//! decide whether to continue, then hand the instance to every component
//! that needs service endpoints or local limits.

pub mod config;
pub mod error;
pub mod utils;

pub use config::{
    AppConfig, Device, DocumentExtractionConfig, ENV_VARS, EnvSnapshot, EnvVar,
    LanguageModelConfig, ModelChoice, SearchServiceConfig, SystemParameters, VisionModelConfig,
};
pub use error::{ConfigError, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = AppConfig::from_snapshot(&EnvSnapshot::new());
        assert!(!config.validate());
        assert_eq!(ENV_VARS.len(), 9);
    }
}
