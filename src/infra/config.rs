use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::GatewayError;

pub const DEFAULT_ENDPOINT: &str = "https://api.nature-vision.top/api/v1/mcp/vision";
pub const DEFAULT_PORT: u16 = 8080;

/// Bearer credential for the vision API. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Stdio,
    Server,
}

impl Mode {
    fn parse(s: &str) -> Result<Self, GatewayError> {
        match s.trim() {
            "stdio" => Ok(Mode::Stdio),
            "server" => Ok(Mode::Server),
            other => Err(GatewayError::Config(format!(
                "invalid MODE: {other}. Must be 'stdio' or 'server'"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Stdio => f.write_str("stdio"),
            Mode::Server => f.write_str("server"),
        }
    }
}

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub port: u16,
    pub endpoint: String,
    pub api_key: ApiKey,
}

/// Optional TOML overlay (`NATURE_VISION_CONFIG`). The key is env-only.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    endpoint: Option<String>,
    mode: Option<String>,
    port: Option<u16>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, GatewayError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|e| GatewayError::Config(format!("cannot parse {}: {e}", path.display())))
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, GatewayError> {
        let file = match non_blank_env("NATURE_VISION_CONFIG") {
            Some(path) => FileConfig::load(Path::new(&path))?,
            None => FileConfig::default(),
        };

        let api_key = non_blank_env("NATURE_VISION_API_KEY")
            .map(ApiKey::new)
            .ok_or(GatewayError::MissingApiKey)?;

        let mode = match non_blank_env("MODE").or(file.mode) {
            Some(m) => Mode::parse(&m)?,
            None => Mode::Stdio,
        };

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .or(file.port)
            .unwrap_or(DEFAULT_PORT);
        if mode == Mode::Server && port == 0 {
            return Err(GatewayError::Config("PORT cannot be 0".into()));
        }

        let endpoint = non_blank_env("NATURE_VISION_API_ENDPOINT")
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            mode,
            port,
            endpoint,
            api_key,
        })
    }
}
