//! Exit codes for the `gql-sdl` CLI.
//!
//! Distinct codes let scripts and CI systems tell a failed fetch apart from
//! a payload that could not be rendered.

use sdl_config::ConfigError;
use sdl_introspect::{ErrorKind, IntrospectionError};

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - schema written
    Success = 0,
    /// Any failure without a more specific code
    Failure = 1,
    /// Configuration error (missing or invalid config file, unknown project)
    ConfigError = 2,
    /// The introspection payload could not be fetched
    FetchError = 3,
    /// The payload has no usable `types` array
    StructureError = 4,
    /// I/O error (file read/write failure)
    IoError = 5,
}

impl ExitCode {
    /// Picks the exit code for an error by looking for known error types in
    /// its chain, outermost first.
    pub fn from_error(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if let Some(err) = cause.downcast_ref::<IntrospectionError>() {
                return match err.kind() {
                    ErrorKind::Fetch => Self::FetchError,
                    ErrorKind::Structure => Self::StructureError,
                };
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return Self::ConfigError;
            }
            if cause.downcast_ref::<std::io::Error>().is_some() {
                return Self::IoError;
            }
        }
        Self::Failure
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::FetchError => write!(f, "fetch error"),
            Self::StructureError => write!(f, "structure error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_fetch_error_code() {
        let err = anyhow::Error::new(IntrospectionError::Network("refused".into()))
            .context("Failed to fetch schema");
        assert_eq!(ExitCode::from_error(&err), ExitCode::FetchError);
    }

    #[test]
    fn test_structure_error_code() {
        let result: Result<(), IntrospectionError> =
            Err(IntrospectionError::Structure("types not found or not an array".into()));
        let err = result.context("Failed to render schema").unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::StructureError);
    }

    #[test]
    fn test_config_error_wins_over_nested_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = anyhow::Error::new(ConfigError::Io(io));
        assert_eq!(ExitCode::from_error(&err), ExitCode::ConfigError);
    }

    #[test]
    fn test_io_and_other_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(
            ExitCode::from_error(&anyhow::Error::new(io)),
            ExitCode::IoError
        );
        assert_eq!(
            ExitCode::from_error(&anyhow::anyhow!("bad header")),
            ExitCode::Failure
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::Success.to_string(), "success");
        assert_eq!(ExitCode::FetchError.to_string(), "fetch error");
    }
}
