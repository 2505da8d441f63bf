//! Server configuration.
//!
//! Resolved in layers: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

/// Errors that can occur while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path of the config file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Command-line flags for the server binary.
#[derive(Debug, Default, Parser)]
#[command(
    name = "housing_map_server",
    about = "Housing affordability map for England and Wales"
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Address to bind to
    #[arg(long)]
    pub bind_addr: Option<String>,
    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,
    /// District dataset CSV
    #[arg(long)]
    pub districts: Option<PathBuf>,
    /// District boundaries `GeoJSON` (WGS84)
    #[arg(long)]
    pub boundaries: Option<PathBuf>,
    /// Boundary feature property holding the district code
    #[arg(long)]
    pub boundary_key: Option<String>,
    /// Run in debug mode (verbose logging)
    #[arg(long)]
    pub debug: bool,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// District dataset CSV.
    pub districts_path: PathBuf,
    /// District boundaries `GeoJSON`.
    pub boundaries_path: PathBuf,
    /// Boundary feature property holding the district code.
    pub boundary_key: String,
    /// Debug mode toggle.
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_owned(),
            port: 8050,
            districts_path: PathBuf::from("data/districts.csv"),
            boundaries_path: PathBuf::from("data/boundaries.geojson"),
            boundary_key: housing_map_affordability::DEFAULT_KEY_PROPERTY.to_owned(),
            debug: false,
        }
    }
}

impl ServerConfig {
    /// Resolves the configuration from the CLI, the process environment and
    /// the config file the CLI points at.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        cli: &Cli,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env(env);
        config.apply_cli(cli);

        Ok(config)
    }

    /// Reads a TOML config file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(bind_addr) = env("BIND_ADDR") {
            self.bind_addr = bind_addr;
        }

        if let Some(port) = env("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => log::warn!("Ignoring invalid PORT value {port:?}"),
            }
        }

        if let Some(debug) = env("HOUSING_MAP_DEBUG") {
            self.debug = matches!(debug.trim(), "1" | "true" | "yes");
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(bind_addr) = &cli.bind_addr {
            self.bind_addr.clone_from(bind_addr);
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(path) = &cli.districts {
            self.districts_path.clone_from(path);
        }
        if let Some(path) = &cli.boundaries {
            self.boundaries_path.clone_from(path);
        }
        if let Some(key) = &cli.boundary_key {
            self.boundary_key.clone_from(key);
        }
        if cli.debug {
            self.debug = true;
        }
    }

    /// Default log filter for the configured mode.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_overrides() {
        let config = ServerConfig::resolve_with(&Cli::default(), no_env).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 8050);
        assert_eq!(config.boundary_key, "LAD23CD");
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn toml_fills_missing_keys_with_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            port = 9000
            districts_path = "/srv/data/merged.csv"
            debug = true
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.districts_path, PathBuf::from("/srv/data/merged.csv"));
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        assert!(toml::from_str::<ServerConfig>("prot = 9000").is_err());
    }

    #[test]
    fn env_then_cli_take_precedence() {
        let env: BTreeMap<&str, &str> = [("BIND_ADDR", "0.0.0.0"), ("PORT", "9100")]
            .into_iter()
            .collect();
        let lookup = |key: &str| env.get(key).map(|v| (*v).to_owned());

        let config = ServerConfig::resolve_with(&Cli::default(), lookup).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 9100);

        let cli = Cli {
            port: Some(9200),
            boundary_key: Some("LAD22CD".to_owned()),
            debug: true,
            ..Cli::default()
        };
        let config = ServerConfig::resolve_with(&cli, lookup).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 9200);
        assert_eq!(config.boundary_key, "LAD22CD");
        assert!(config.debug);
    }

    #[test]
    fn invalid_env_port_is_ignored() {
        let config =
            ServerConfig::resolve_with(&Cli::default(), |key| (key == "PORT").then(|| "http".to_owned()))
                .unwrap();
        assert_eq!(config.port, 8050);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli {
            config: Some(PathBuf::from("missing/housing_map.toml")),
            ..Cli::default()
        };
        assert!(matches!(
            ServerConfig::resolve_with(&cli, no_env),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from([
            "housing_map_server",
            "--port",
            "8080",
            "--districts",
            "merged.csv",
            "--debug",
        ]);
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.districts, Some(PathBuf::from("merged.csv")));
        assert!(cli.debug);
    }
}
