//! Layered configuration: optional TOML file, then `PHONEBOOK_*` environment
//! variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use phonebook_core::{
  PhoneRule,
  phone::{DEFAULT_COUNTRY_CODE, DEFAULT_REQUIRED_PREFIX},
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Prepended to every accepted raw number.
  pub country_code:    String,
  /// Raw numbers must start with this.
  pub required_prefix: String,
  /// Contacts file to load before the menu starts.
  pub import_on_start: Option<PathBuf>,
  /// Contacts file to write when the menu exits.
  pub export_on_exit:  Option<PathBuf>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      country_code:    DEFAULT_COUNTRY_CODE.to_owned(),
      required_prefix: DEFAULT_REQUIRED_PREFIX.to_owned(),
      import_on_start: None,
      export_on_exit:  None,
    }
  }
}

impl Settings {
  /// Read `path` if it exists and overlay the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("PHONEBOOK"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  pub fn phone_rule(&self) -> PhoneRule {
    PhoneRule {
      country_code:    self.country_code.clone(),
      required_prefix: self.required_prefix.clone(),
    }
  }
}
