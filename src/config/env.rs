// file: src/config/env.rs
// description: captured environment snapshot and .env file handling
// reference: https://docs.rs/dotenvy

use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const AZURE_SEARCH_ENDPOINT: &str = "AZURE_SEARCH_ENDPOINT";
pub const AZURE_SEARCH_API_KEY: &str = "AZURE_SEARCH_API_KEY";
pub const AZURE_DOC_INTELLIGENCE_ENDPOINT: &str = "AZURE_DOC_INTELLIGENCE_ENDPOINT";
pub const AZURE_DOC_INTELLIGENCE_API_KEY: &str = "AZURE_DOC_INTELLIGENCE_API_KEY";
pub const AZURE_OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const AZURE_OPENAI_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const AZURE_OPENAI_MODEL: &str = "AZURE_OPENAI_MODEL";
pub const MODEL_CHOICE: &str = "MODEL_CHOICE";
pub const CUDA_AVAILABLE: &str = "CUDA_AVAILABLE";

/// A recognized environment variable and where it lands in [`AppConfig`](super::AppConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvVar {
    pub name: &'static str,
    pub target: &'static str,
    pub default: &'static str,
}

pub const ENV_VARS: [EnvVar; 9] = [
    EnvVar {
        name: AZURE_SEARCH_ENDPOINT,
        target: "search.endpoint",
        default: "",
    },
    EnvVar {
        name: AZURE_SEARCH_API_KEY,
        target: "search.api_key",
        default: "",
    },
    EnvVar {
        name: AZURE_DOC_INTELLIGENCE_ENDPOINT,
        target: "document_extraction.endpoint",
        default: "",
    },
    EnvVar {
        name: AZURE_DOC_INTELLIGENCE_API_KEY,
        target: "document_extraction.api_key",
        default: "",
    },
    EnvVar {
        name: AZURE_OPENAI_ENDPOINT,
        target: "language_model.endpoint",
        default: "",
    },
    EnvVar {
        name: AZURE_OPENAI_API_KEY,
        target: "language_model.api_key",
        default: "",
    },
    EnvVar {
        name: AZURE_OPENAI_MODEL,
        target: "language_model.deployment_name",
        default: super::services::DEFAULT_OPENAI_MODEL,
    },
    EnvVar {
        name: MODEL_CHOICE,
        target: "vision.model_choice",
        default: "florence2",
    },
    EnvVar {
        name: CUDA_AVAILABLE,
        target: "vision.device",
        default: "cpu",
    },
];

/// Values of the recognized variables, captured once.
///
/// Unrecognized names are dropped on insertion so a snapshot only ever holds
/// keys from [`ENV_VARS`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvSnapshot {
    vars: config::Map<String, String>,
}

impl EnvSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the recognized variables from the process environment.
    /// Variables that are unset or not valid Unicode are left out.
    pub fn from_process() -> Self {
        let mut snapshot = Self::new();
        for var in ENV_VARS.iter() {
            if let Ok(value) = std::env::var(var.name) {
                snapshot.insert(var.name, value);
            }
        }
        debug!("Captured {} configuration variables from process", snapshot.len());
        snapshot
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut snapshot = Self::new();
        for (key, value) in pairs {
            snapshot.insert(key.as_ref(), value);
        }
        snapshot
    }

    /// Parses a `.env` file without touching the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let iter = dotenvy::from_path_iter(path).map_err(|e| env_file_error(path, e))?;
        Self::collect_dotenv(path, iter)
    }

    /// Process variables layered over an env file: the explicit `env_file`
    /// when given, otherwise a discovered `.env` when `discover` is set.
    /// An explicit file that cannot be read is an error; a missing
    /// discovered one is not.
    pub fn load(env_file: Option<&Path>, discover: bool) -> Result<Self> {
        let process = Self::from_process();

        if let Some(path) = env_file {
            info!("Loading environment file: {}", path.display());
            return Ok(Self::from_env_file(path)?.overlay(process));
        }

        if !discover {
            return Ok(process);
        }

        match Self::discover_env_file()? {
            Some((path, file)) => {
                info!("Loaded environment file: {}", path.display());
                Ok(file.overlay(process))
            }
            None => {
                debug!("No .env file found, using process environment only");
                Ok(process)
            }
        }
    }

    /// Looks for `.env` in the current directory and its parents.
    /// Returns `None` when no file is found.
    pub fn discover_env_file() -> Result<Option<(PathBuf, Self)>> {
        let Some(path) = find_dotenv_path() else {
            return Ok(None);
        };

        let snapshot = Self::from_env_file(&path)?;
        Ok(Some((path, snapshot)))
    }

    /// Returns a snapshot where values from `other` win over values in `self`.
    pub fn overlay(mut self, other: EnvSnapshot) -> Self {
        for (key, value) in other.vars {
            self.vars.insert(key, value);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub(crate) fn vars(&self) -> &config::Map<String, String> {
        &self.vars
    }

    fn insert(&mut self, name: &str, value: impl Into<String>) {
        if is_recognized(name) {
            self.vars.insert(name.to_string(), value.into());
        }
    }

    fn collect_dotenv<R: std::io::Read>(path: &Path, iter: dotenvy::Iter<R>) -> Result<Self> {
        let mut snapshot = Self::new();
        for item in iter {
            let (key, value) = item.map_err(|e| env_file_error(path, e))?;
            snapshot.insert(&key, value);
        }
        debug!(
            "Read {} configuration variables from {}",
            snapshot.len(),
            path.display()
        );
        Ok(snapshot)
    }
}

pub fn is_recognized(name: &str) -> bool {
    ENV_VARS.iter().any(|var| var.name == name)
}

fn env_file_error(path: &Path, err: dotenvy::Error) -> ConfigError {
    ConfigError::EnvFile {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

// Same search as dotenvy::dotenv_iter, which does not hand back the path
// that `load` reports.
fn find_dotenv_path() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(".env"))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_pairs_drops_unknown_names() {
        let snapshot = EnvSnapshot::from_pairs([
            (AZURE_SEARCH_ENDPOINT, "https://search.example.net"),
            ("PATH", "/usr/bin"),
        ]);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.get(AZURE_SEARCH_ENDPOINT),
            Some("https://search.example.net")
        );
        assert!(!snapshot.contains("PATH"));
    }

    #[test]
    fn test_overlay_prefers_other() {
        let file = EnvSnapshot::from_pairs([
            (AZURE_OPENAI_MODEL, "gpt-4.1"),
            (MODEL_CHOICE, "phi3-vision"),
        ]);
        let process = EnvSnapshot::from_pairs([(AZURE_OPENAI_MODEL, "o3")]);

        let merged = file.overlay(process);
        assert_eq!(merged.get(AZURE_OPENAI_MODEL), Some("o3"));
        assert_eq!(merged.get(MODEL_CHOICE), Some("phi3-vision"));
    }

    #[test]
    fn test_from_env_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(
            &path,
            "# azure settings\nAZURE_SEARCH_ENDPOINT=https://search.example.net\nAZURE_SEARCH_API_KEY=\"secret-key\"\nUNRELATED=1\n",
        )
        .unwrap();

        let snapshot = EnvSnapshot::from_env_file(&path).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(AZURE_SEARCH_API_KEY), Some("secret-key"));
    }

    #[test]
    fn test_from_env_file_missing() {
        let temp = TempDir::new().unwrap();
        let result = EnvSnapshot::from_env_file(&temp.path().join("nope.env"));
        assert!(matches!(result, Err(ConfigError::EnvFile { .. })));
    }

    #[test]
    fn test_load_includes_env_file_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rag.env");
        fs::write(&path, "AZURE_DOC_INTELLIGENCE_ENDPOINT=https://di.example.net\n").unwrap();

        let snapshot = EnvSnapshot::load(Some(&path), false).unwrap();
        assert!(snapshot.contains(AZURE_DOC_INTELLIGENCE_ENDPOINT));
        if std::env::var(AZURE_DOC_INTELLIGENCE_ENDPOINT).is_err() {
            assert_eq!(
                snapshot.get(AZURE_DOC_INTELLIGENCE_ENDPOINT),
                Some("https://di.example.net")
            );
        }
    }

    #[test]
    fn test_load_without_file_matches_process() {
        let snapshot = EnvSnapshot::load(None, false).unwrap();
        assert_eq!(snapshot, EnvSnapshot::from_process());
    }

    #[test]
    fn test_env_var_table_is_unique() {
        for (i, var) in ENV_VARS.iter().enumerate() {
            assert!(
                ENV_VARS[i + 1..].iter().all(|other| other.name != var.name),
                "duplicate variable {}",
                var.name
            );
        }
    }

    #[test]
    fn test_from_process_only_holds_recognized_names() {
        let snapshot = EnvSnapshot::from_process();
        assert!(snapshot.vars().keys().all(|key| is_recognized(key)));
    }
}
