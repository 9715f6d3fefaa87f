use ferrous_doh_domain::{CliOverrides, Config};

/// Loads, overrides and validates the configuration. Logging is not up yet,
/// so the outcome is only reported through the returned error.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}
