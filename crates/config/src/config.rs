use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Name under which a single-endpoint config is exposed.
pub const DEFAULT_PROJECT: &str = "default";

/// Top-level configuration.
/// Either a single endpoint or multiple named projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SdlConfig {
    /// Multi-project configuration
    Multi {
        projects: BTreeMap<String, EndpointConfig>,
    },
    /// Single endpoint configuration (boxed to reduce enum size)
    Single(Box<EndpointConfig>),
}

impl SdlConfig {
    /// Get all projects as an iterator.
    /// For single project configs, yields a single item named "default".
    #[must_use]
    pub fn projects(&self) -> Box<dyn Iterator<Item = (&str, &EndpointConfig)> + '_> {
        match self {
            Self::Single(config) => Box::new(std::iter::once((DEFAULT_PROJECT, config.as_ref()))),
            Self::Multi { projects } => Box::new(
                projects
                    .iter()
                    .map(|(name, config)| (name.as_str(), config)),
            ),
        }
    }

    /// Get a specific project by name.
    /// For single project configs, returns the endpoint if name is "default".
    #[must_use]
    pub fn get_project(&self, name: &str) -> Option<&EndpointConfig> {
        match self {
            Self::Single(config) if name == DEFAULT_PROJECT => Some(config.as_ref()),
            Self::Single(_) => None,
            Self::Multi { projects } => projects.get(name),
        }
    }

    /// Like [`SdlConfig::get_project`], but reports the available names on failure.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::ProjectNotFound`] if no project has that name.
    pub fn project(&self, name: &str) -> crate::Result<&EndpointConfig> {
        self.get_project(name)
            .ok_or_else(|| crate::ConfigError::ProjectNotFound {
                name: name.to_string(),
                available: self.projects().map(|(name, _)| name.to_string()).collect(),
            })
    }

    /// Check if this is a multi-project configuration
    #[must_use]
    pub const fn is_multi_project(&self) -> bool {
        matches!(self, Self::Multi { .. })
    }

    /// Get the number of projects
    #[must_use]
    pub fn project_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi { projects } => projects.len(),
        }
    }
}

/// Settings for introspecting one GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    /// The GraphQL endpoint URL to introspect
    pub url: String,

    /// HTTP headers to include in the introspection request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,

    /// Request timeout in seconds (default: 30)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Number of retry attempts on failure (default: 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<u32>,

    /// Where to write the rendered schema, relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Number of `ofType` levels requested per type reference (default: 7)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_ref_depth: Option<usize>,

    /// Emit a `schema { ... }` block with the root operation types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_definition: Option<bool>,
}

impl EndpointConfig {
    /// Creates a config with only the endpoint URL set.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: None,
            timeout: None,
            retry: None,
            output: None,
            type_ref_depth: None,
            schema_definition: None,
        }
    }

    /// Resolves `output` against the directory containing the config file.
    #[must_use]
    pub fn output_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.output.as_ref().map(|output| {
            if output.is_absolute() {
                output.clone()
            } else {
                config_dir.join(output)
            }
        })
    }
}
