// file: src/config/system.rs
// description: local working directories and retrieval limits

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SystemParameters {
    /// Scratch space for rendered pages
    pub temp_dir: PathBuf,
    pub patch_matrix_dir: PathBuf,
    pub manifest_dir: PathBuf,
    pub max_pages_per_doc: usize,
    /// Number of results returned by retrieval when the caller does not ask for a count
    pub default_k: usize,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            temp_dir: PathBuf::from("./temp"),
            patch_matrix_dir: PathBuf::from("./patch_matrices"),
            manifest_dir: PathBuf::from("./manifests"),
            max_pages_per_doc: 100,
            default_k: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_system_defaults() {
        let system = SystemParameters::default();
        assert_eq!(system.temp_dir, Path::new("./temp"));
        assert_eq!(system.patch_matrix_dir, Path::new("./patch_matrices"));
        assert_eq!(system.manifest_dir, Path::new("./manifests"));
        assert_eq!(system.max_pages_per_doc, 100);
        assert_eq!(system.default_k, 10);
    }
}
