//! Tool configuration loaded from TOML.
//!
//! ```toml
//! [hashing]
//! secret = "pepper"
//!
//! [ingest]
//! modalities = ["LAB", "IMAGING"]
//! ```
//!
//! The file is taken from `--config`, else from `DLT_CONFIG`; with neither,
//! defaults apply. `DLT_PATIENT_HASH_SECRET` overrides `hashing.secret`.

use std::fmt;
use std::path::{Path, PathBuf};

use dlt_standardize::Sha256PatientHasher;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "DLT_CONFIG";

/// Environment variable overriding the hashing secret.
pub const HASH_SECRET_ENV_VAR: &str = "DLT_PATIENT_HASH_SECRET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub hashing: HashingConfig,
    pub ingest: IngestConfig,
}

#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashingConfig {
    /// Key mixed into every patient id hash.
    pub secret: Option<String>,
}

impl fmt::Debug for HashingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashingConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    /// Accepted modalities; empty accepts any.
    pub modalities: Vec<String>,
}

impl ToolConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Resolves configuration from the command line and process environment.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve_with(
            explicit,
            std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
            std::env::var(HASH_SECRET_ENV_VAR).ok(),
        )
    }

    /// Same as [`resolve`](Self::resolve) with the environment passed in.
    pub fn resolve_with(
        explicit: Option<&Path>,
        env_path: Option<PathBuf>,
        env_secret: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        if let Some(secret) = env_secret.filter(|s| !s.is_empty()) {
            config.hashing.secret = Some(secret);
        }
        Ok(config)
    }

    pub fn hasher(&self) -> Sha256PatientHasher {
        match &self.hashing.secret {
            Some(secret) => Sha256PatientHasher::new().with_secret(secret.clone()),
            None => Sha256PatientHasher::new(),
        }
    }
}
