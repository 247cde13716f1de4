pub mod preview;
pub mod up;

use anyhow::{bail, Result};
use skiff_core::StackConfig;

/// Build the stack configuration from an optional file plus KEY=VALUE overrides.
pub(crate) fn load_config(path: Option<&str>, overrides: &[String]) -> Result<StackConfig> {
    let mut config = match path {
        Some(path) => StackConfig::load(path)?,
        None => StackConfig::new(),
    };

    for pair in overrides {
        match pair.split_once('=') {
            Some((key, value)) => config.set(key, value),
            None => bail!("Invalid override '{}', expected KEY=VALUE", pair),
        }
    }

    Ok(config)
}
