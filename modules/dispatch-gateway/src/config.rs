//! Gateway configuration from TOML or the environment.

use std::path::Path;

use anyhow::{bail, Context, Result};
use dispatch_args::ArgumentOrder;
use serde::Deserialize;

/// Gateway configuration.
///
/// Loaded from a TOML table or from the environment. Every field has a
/// default, so an empty file is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// Treatment of positional arguments written after named ones.
    pub argument_order: ArgumentOrder,
}

impl GatewayConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse gateway config")
    }

    /// Load and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Read `DISPATCH_ARGUMENT_ORDER` (`strict` or `ordinal`), honouring `.env`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let argument_order = match std::env::var("DISPATCH_ARGUMENT_ORDER") {
            Ok(raw) => parse_order(&raw)?,
            Err(_) => ArgumentOrder::default(),
        };

        let config = Self { argument_order };
        tracing::debug!(argument_order = ?config.argument_order, "Gateway config loaded");
        Ok(config)
    }
}

fn parse_order(raw: &str) -> Result<ArgumentOrder> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(ArgumentOrder::Strict),
        "ordinal" => Ok(ArgumentOrder::Ordinal),
        other => bail!("DISPATCH_ARGUMENT_ORDER must be `strict` or `ordinal`, got `{other}`"),
    }
}
