use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime settings, layered as defaults -> `config.toml` -> `CATALOG_*` env.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub loglevel: String,
    pub download_dir: PathBuf,
    /// Insert the sample records when the store starts out empty.
    pub seed_samples: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:divinemantra.db".to_string(),
            loglevel: "info".to_string(),
            download_dir: PathBuf::from("."),
            seed_samples: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("CATALOG_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CATALOG_DOWNLOAD_DIR", "/tmp/models");
            jail.set_env("CATALOG_SEED_SAMPLES", "true");

            let cfg = Config::load()?;
            assert_eq!(cfg.download_dir, PathBuf::from("/tmp/models"));
            assert!(cfg.seed_samples);
            assert_eq!(cfg.loglevel, "info");
            Ok(())
        });
    }

    #[test]
    fn toml_file_is_merged() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                database_url = "sqlite:other.db"
                loglevel = "debug"
                "#,
            )?;

            let cfg = Config::load()?;
            assert_eq!(cfg.database_url, "sqlite:other.db");
            assert_eq!(cfg.loglevel, "debug");
            assert!(!cfg.seed_samples);
            Ok(())
        });
    }
}
