// file: src/config/vision.rs
// description: vision model selection and inference device
// reference: florence-2 and phi-3-vision patch embedding models

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_BATCH_SIZE: usize = 1;

/// Vision model used to embed document page patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum ModelChoice {
    #[default]
    #[serde(rename = "florence2")]
    Florence2,
    #[serde(rename = "phi3-vision")]
    Phi3Vision,
}

impl ModelChoice {
    /// Maps a raw setting to a model. Anything other than an exact known
    /// name resolves to [`ModelChoice::Florence2`].
    pub fn parse_lenient(raw: &str) -> Self {
        match raw {
            "phi3-vision" => ModelChoice::Phi3Vision,
            _ => ModelChoice::Florence2,
        }
    }

    pub fn is_recognized(raw: &str) -> bool {
        matches!(raw, "florence2" | "phi3-vision")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::Florence2 => "florence2",
            ModelChoice::Phi3Vision => "phi3-vision",
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    Cuda,
}

impl Device {
    pub fn resolve(accelerated: bool) -> Self {
        if accelerated { Device::Cuda } else { Device::Cpu }
    }

    /// Any non-empty `CUDA_AVAILABLE` value counts as accelerated hardware,
    /// including strings such as "0" or "false".
    pub fn from_cuda_flag(flag: Option<&str>) -> Self {
        Self::resolve(flag.is_some_and(|value| !value.is_empty()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Cpu => "cpu",
            Device::Cuda => "cuda",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VisionModelConfig {
    pub model_choice: ModelChoice,
    pub device: Device,
    pub batch_size: usize,
}

impl VisionModelConfig {
    pub fn new(model_choice: ModelChoice, device: Device) -> Self {
        Self {
            model_choice,
            device,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Default for VisionModelConfig {
    fn default() -> Self {
        Self::new(ModelChoice::default(), Device::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_choice_parsing() {
        assert_eq!(ModelChoice::parse_lenient("phi3-vision"), ModelChoice::Phi3Vision);
        assert_eq!(ModelChoice::parse_lenient("florence2"), ModelChoice::Florence2);
        assert_eq!(ModelChoice::parse_lenient("gpt4v"), ModelChoice::Florence2);
        assert_eq!(ModelChoice::parse_lenient(""), ModelChoice::Florence2);
        assert_eq!(ModelChoice::parse_lenient("PHI3-VISION"), ModelChoice::Florence2);
    }

    #[test]
    fn test_model_choice_recognized() {
        assert!(ModelChoice::is_recognized("florence2"));
        assert!(ModelChoice::is_recognized("phi3-vision"));
        assert!(!ModelChoice::is_recognized("gpt4v"));
    }

    #[test]
    fn test_model_choice_serde_names() {
        let json = serde_json::to_string(&ModelChoice::Phi3Vision).unwrap();
        assert_eq!(json, "\"phi3-vision\"");
        assert_eq!(ModelChoice::Florence2.to_string(), "florence2");
    }

    #[test]
    fn test_device_from_flag() {
        assert_eq!(Device::from_cuda_flag(None), Device::Cpu);
        assert_eq!(Device::from_cuda_flag(Some("")), Device::Cpu);
        assert_eq!(Device::from_cuda_flag(Some("1")), Device::Cuda);
        assert_eq!(Device::from_cuda_flag(Some("false")), Device::Cuda);
    }

    #[test]
    fn test_vision_defaults() {
        let vision = VisionModelConfig::default();
        assert_eq!(vision.model_choice, ModelChoice::Florence2);
        assert_eq!(vision.device, Device::Cpu);
        assert_eq!(vision.batch_size, 1);
    }
}
