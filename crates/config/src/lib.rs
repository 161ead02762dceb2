//! Config file support for `gql-sdl`.
//!
//! A config file names one endpoint, or several under `projects:`, together
//! with the request and rendering settings used when downloading its schema.

mod config;
mod error;
mod loader;

pub use config::{EndpointConfig, SdlConfig, DEFAULT_PROJECT};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};
