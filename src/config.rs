//! Repository configuration, loaded from YAML
//!
//! ```yaml
//! base_uri: http://localhost:8080/rest
//! namespaces:
//!   ex: http://example.org/vocab#
//! context:
//!   include_server_managed: false
//! ```

use crate::ldp::{ContextOptions, IdentifierConverter, IdentifierError};
use crate::rdf::NamespaceManager;
use indexmap::IndexMap;
use oxiri::Iri;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid base URI {uri:?}: {reason}")]
    InvalidBaseUri { uri: String, reason: String },

    #[error("Invalid namespace {prefix:?}: {reason}")]
    InvalidNamespace { prefix: String, reason: String },

    #[error(transparent)]
    Identifier(#[from] IdentifierError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// LDP rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LdpConfig {
    /// Base URI resources are published under
    pub base_uri: String,
    /// Extra prefixes for storage names (prefix → namespace IRI)
    pub namespaces: IndexMap<String, String>,
    /// Description options
    pub context: ContextOptions,
}

impl Default for LdpConfig {
    fn default() -> Self {
        Self {
            base_uri: "http://localhost:8080/rest".to_string(),
            namespaces: IndexMap::new(),
            context: ContextOptions::default(),
        }
    }
}

impl LdpConfig {
    /// Parse and validate YAML
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let config = Self::from_yaml_str(&std::fs::read_to_string(path)?)?;
        info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    /// Save as YAML
    pub fn save_yaml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        Iri::parse(self.base_uri.as_str()).map_err(|e| ConfigError::InvalidBaseUri {
            uri: self.base_uri.clone(),
            reason: e.to_string(),
        })?;

        for (prefix, iri) in &self.namespaces {
            if prefix.is_empty() || prefix.contains(':') {
                return Err(ConfigError::InvalidNamespace {
                    prefix: prefix.clone(),
                    reason: "prefix must be non-empty and contain no ':'".to_string(),
                });
            }
            Iri::parse(iri.as_str()).map_err(|e| ConfigError::InvalidNamespace {
                prefix: prefix.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    pub fn identifier_converter(&self) -> ConfigResult<IdentifierConverter> {
        Ok(IdentifierConverter::new(&self.base_uri)?)
    }

    /// Register the configured prefixes
    pub fn apply_namespaces(&self, namespaces: &mut NamespaceManager) {
        for (prefix, iri) in &self.namespaces {
            namespaces.add_prefix(prefix.as_str(), iri.as_str());
        }
    }
}
