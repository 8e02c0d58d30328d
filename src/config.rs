use crate::*;
use confique::Config as _;
use std::{path::PathBuf, sync::OnceLock};

/// Settings read from the environment. Command line flags override them.
#[derive(Debug, confique::Config)]
pub struct Config {
    /// dbt project root to load the catalog from.
    #[config(env = "DBTREF_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,
    /// Directory below the project root holding model `.sql` files.
    #[config(env = "DBTREF_MODELS_DIR", default = "models")]
    pub models_dir: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Config::builder().env().load()?)
    }
}

pub fn config() -> Result<&'static Config> {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let loaded = Config::load()?;
    debug!(?loaded, "loaded configuration from environment");
    Ok(CONFIG.get_or_init(|| loaded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() -> Result {
        let config = Config::builder().load()?;
        assert_eq!(config.project_dir, None);
        assert_eq!(config.models_dir, DEFAULT_MODELS_DIR);
        Ok(())
    }

    #[test]
    fn global_config_is_stable() -> Result {
        let first = config()? as *const Config;
        let second = config()? as *const Config;
        assert_eq!(first, second);
        Ok(())
    }
}
