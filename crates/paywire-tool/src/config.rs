use std::fs;

use paywire_protocol::{Currency, PkiAlgorithm, WireCode};
use serde::Deserialize;

use crate::error::ToolError;

/// Signing defaults shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub key_number: u8,
    /// Wire code of the signing algorithm
    pub pki_algorithm: u8,
    pub private_key_path: Option<String>,
    pub public_key_path: Option<String>,
    pub default_currency: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            key_number: 1,
            pki_algorithm: PkiAlgorithm::Default.code(),
            private_key_path: None,
            public_key_path: None,
            default_currency: Currency::Btc.currency_code().to_string(),
        }
    }
}

impl ToolConfig {
    pub fn pki_algorithm(&self) -> Result<PkiAlgorithm, ToolError> {
        Ok(PkiAlgorithm::from_code(self.pki_algorithm)?)
    }

    pub fn default_currency(&self) -> Result<Currency, ToolError> {
        Ok(self.default_currency.parse::<Currency>()?)
    }

    pub fn private_key_path(&self) -> Result<&str, ToolError> {
        self.private_key_path
            .as_deref()
            .ok_or_else(|| ToolError::Config("no private key configured".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ToolConfigFile {
    key_number: Option<u8>,
    pki_algorithm: Option<u8>,
    private_key_path: Option<String>,
    public_key_path: Option<String>,
    default_currency: Option<String>,
}

/// Read a JSON config file; absent fields keep their defaults.
pub fn load_tool_config(path: &str) -> Result<ToolConfig, ToolError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ToolError::Config(format!("config read failed: {e}")))?;
    let cfg: ToolConfigFile = serde_json::from_str(&raw)
        .map_err(|e| ToolError::Config(format!("config parse failed: {e}")))?;

    let defaults = ToolConfig::default();
    let config = ToolConfig {
        key_number: cfg.key_number.unwrap_or(defaults.key_number),
        pki_algorithm: cfg.pki_algorithm.unwrap_or(defaults.pki_algorithm),
        private_key_path: cfg.private_key_path,
        public_key_path: cfg.public_key_path,
        default_currency: cfg.default_currency.unwrap_or(defaults.default_currency),
    };

    // fail at load time rather than at first use
    config.pki_algorithm()?;
    config.default_currency()?;
    log::debug!("loaded config from {}", path);
    Ok(config)
}
