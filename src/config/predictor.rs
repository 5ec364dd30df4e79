// src/config/predictor.rs
use anyhow::Context;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_PATH: &str = "config/predictor.toml";
pub const ENV_CONFIG_PATH: &str = "PREDICTOR_CONFIG_PATH";
pub const ENV_MODEL_PATH: &str = "PREDICTOR_MODEL_PATH";
pub const ENV_CURRENCY: &str = "PREDICTOR_CURRENCY";
pub const ENV_DEBUG_ECHO: &str = "PREDICTOR_DEBUG_ECHO";

fn default_model_path() -> PathBuf {
    PathBuf::from("models/model.json")
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_currency() -> String {
    "€".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictorConfig {
    /// JSON model artifact loaded once at startup.
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Directory with the single-page form.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Symbol appended to formatted prices.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Include input columns and the encoded row in prediction responses.
    #[serde(default)]
    pub debug_echo: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            static_dir: default_static_dir(),
            currency: default_currency(),
            debug_echo: false,
        }
    }
}

impl PredictorConfig {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let mut cfg: PredictorConfig = toml::from_str(s)?;
        if cfg.currency.trim().is_empty() {
            cfg.currency = default_currency();
        }
        Ok(cfg)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading predictor config from {}", path.display()))?;
        Self::from_toml_str(&data)
            .with_context(|| format!("parsing predictor config {}", path.display()))
    }

    /// Resolve config the way the service boots:
    /// 1) $PREDICTOR_CONFIG_PATH (must exist)
    /// 2) config/predictor.toml, if present
    /// 3) built-in defaults
    ///
    /// Then apply env overrides for model path, currency and debug echo.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => Self::load_from_file(PathBuf::from(p))?,
            Err(_) => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load_from_file(&default)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(p) = std::env::var(ENV_MODEL_PATH) {
            if !p.trim().is_empty() {
                cfg.model_path = PathBuf::from(p.trim());
            }
        }
        if let Ok(c) = std::env::var(ENV_CURRENCY) {
            if !c.trim().is_empty() {
                cfg.currency = c.trim().to_string();
            }
        }
        if let Some(flag) = parse_flag_env(std::env::var(ENV_DEBUG_ECHO).ok()) {
            cfg.debug_echo = flag;
        }

        Ok(cfg)
    }
}

// "1"/"true"/"yes"/"on" → true, "0"/"false"/"no"/"off" → false, anything else ignored
fn parse_flag_env(raw: Option<String>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = PredictorConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, PredictorConfig::default());
    }

    #[test]
    fn blank_currency_falls_back() {
        let cfg = PredictorConfig::from_toml_str(r#"currency = "  ""#).unwrap();
        assert_eq!(cfg.currency, "€");
    }

    #[test]
    fn flag_parsing() {
        assert_eq!(parse_flag_env(Some("1".into())), Some(true));
        assert_eq!(parse_flag_env(Some(" Off ".into())), Some(false));
        assert_eq!(parse_flag_env(Some("maybe".into())), None);
        assert_eq!(parse_flag_env(None), None);
    }
}
