use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use crate::http::buffer::DEFAULT_CAPACITY;
use crate::http::parser::{DEFAULT_MAX_BODY_SIZE, DEFAULT_MAX_HEADERS, ParseLimits};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4221";

/// Command line flags. Each one overrides the matching config value.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "plinth", about = "Minimal keep-alive HTTP/1.1 server")]
pub struct Cli {
    /// YAML config file
    #[arg(long, env = "PLINTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory served under /files/
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:4221
    #[arg(long)]
    pub listen: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Capacity of each connection's read buffer; also the longest
    /// accepted request or header line.
    pub buffer_capacity: usize,
    pub max_body_size: usize,
    /// Header lines accepted per request.
    pub max_headers: usize,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            buffer_capacity: DEFAULT_CAPACITY,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            max_headers: DEFAULT_MAX_HEADERS,
            read_timeout_secs: 30,
            write_timeout_secs: 30,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults plus the `LISTEN` environment override.
    pub fn load() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    /// Resolves the full layering: defaults, then the YAML file named by
    /// `--config`, then `LISTEN`, then the remaining flags.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut cfg = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        cfg.apply_env();

        if let Some(listen) = &cli.listen {
            cfg.server.listen_addr = listen.clone();
        }
        if let Some(directory) = &cli.directory {
            cfg.files.directory = directory.clone();
        }

        cfg.server.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let cfg = serde_yaml::from_str(text)?;
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(listen) = std::env::var("LISTEN") {
            self.server.listen_addr = listen;
        }
    }
}

impl ServerConfig {
    /// Rejects settings under which no request could ever be served.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.buffer_capacity == 0 {
            anyhow::bail!("server.buffer_capacity must be greater than 0");
        }
        if self.max_headers == 0 {
            anyhow::bail!("server.max_headers must be greater than 0");
        }
        if self.read_timeout_secs == 0 {
            anyhow::bail!("server.read_timeout_secs must be greater than 0");
        }
        if self.write_timeout_secs == 0 {
            anyhow::bail!("server.write_timeout_secs must be greater than 0");
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    pub fn parse_limits(&self) -> ParseLimits {
        ParseLimits {
            max_body_size: self.max_body_size,
            max_headers: self.max_headers,
        }
    }
}
