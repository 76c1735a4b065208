//! Tax policy configuration
//!
//! The policy is resolved from built-in defaults, then an optional TOML file,
//! then command-line overrides. The default file lives under the platform
//! config directory (`$XDG_CONFIG_HOME/capital-gains/config.toml` on Linux).
//!
//! ```toml
//! rate = 0.15
//! minimum-taxable-operation-value = 35000
//! ```

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::CapitalGainsError;
use crate::tax::TaxPolicy;

const APP_DIR: &str = "capital-gains";
const CONFIG_FILE: &str = "config.toml";

/// Optional policy values read from a config file or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PolicyOverrides {
    pub rate: Option<Decimal>,
    pub minimum_taxable_operation_value: Option<Decimal>,
}

impl PolicyOverrides {
    /// Values set in `other` take precedence over values in `self`
    pub fn merge(self, other: PolicyOverrides) -> PolicyOverrides {
        PolicyOverrides {
            rate: other.rate.or(self.rate),
            minimum_taxable_operation_value: other
                .minimum_taxable_operation_value
                .or(self.minimum_taxable_operation_value),
        }
    }

    /// Fill unset values with the defaults and validate the result
    pub fn into_policy(self) -> Result<TaxPolicy, CapitalGainsError> {
        TaxPolicy::new(
            self.rate.unwrap_or(TaxPolicy::DEFAULT_RATE),
            self.minimum_taxable_operation_value
                .unwrap_or(TaxPolicy::DEFAULT_MINIMUM_TAXABLE_OPERATION_VALUE),
        )
    }
}

/// Default config file location, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dir_spec::config_home().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Parse policy overrides from TOML text
pub fn parse_config(contents: &str) -> Result<PolicyOverrides, CapitalGainsError> {
    toml::from_str(contents).map_err(|e| CapitalGainsError::ConfigError(e.to_string()))
}

/// Read policy overrides from a TOML file
pub fn load_config_file(path: &Path) -> Result<PolicyOverrides> {
    let contents = std::fs::read_to_string(path)
        .map_err(CapitalGainsError::from)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config file {}", path.display()))
}

/// Resolve the tax policy.
///
/// An explicit `config_path` must exist. Without one, the default location is
/// used when a file is present there.
pub fn resolve_policy(
    config_path: Option<&Path>,
    cli_overrides: PolicyOverrides,
) -> Result<TaxPolicy> {
    let file_overrides = match config_path {
        Some(path) => load_config_file(path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => {
                debug!("using default config file {}", path.display());
                load_config_file(&path)?
            }
            _ => PolicyOverrides::default(),
        },
    };

    let policy = file_overrides
        .merge(cli_overrides)
        .into_policy()
        .context("invalid tax policy")?;

    info!(
        rate = %policy.rate(),
        minimum_taxable_operation_value = %policy.minimum_taxable_operation_value(),
        "tax policy resolved"
    );

    Ok(policy)
}
