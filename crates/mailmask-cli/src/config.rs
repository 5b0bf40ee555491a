use mailmask_core::{Error, Result};
use mailmask_observability::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognizerKind {
    /// Built-in rule-based date recognizer
    #[default]
    Rules,
    /// Skip date detection entirely
    None,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailmaskConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub masking: MaskingConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaskingConfig {
    #[serde(default)]
    pub date_recognizer: RecognizerKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Print Prometheus metrics to stderr after each run
    #[serde(default)]
    pub enabled: bool,
}

impl MailmaskConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("MAILMASK_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("MAILMASK_LOG_JSON") {
            if let Ok(json) = val.parse::<bool>() {
                self.logging.json = json;
            }
        }

        if let Ok(val) = std::env::var("MAILMASK_DATE_RECOGNIZER") {
            match val.to_lowercase().as_str() {
                "rules" => self.masking.date_recognizer = RecognizerKind::Rules,
                "none" => self.masking.date_recognizer = RecognizerKind::None,
                _ => eprintln!(
                    "Warning: Invalid MAILMASK_DATE_RECOGNIZER '{}', using default",
                    val
                ),
            }
        }

        if let Ok(val) = std::env::var("MAILMASK_METRICS") {
            if let Ok(enabled) = val.parse::<bool>() {
                self.metrics.enabled = enabled;
            }
        }
    }
}
