use crate::{ConfigError, EndpointConfig, Result, SdlConfig};
use sdl_introspect::MAX_TYPE_REF_DEPTH;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".sdlrc.yml",
    ".sdlrc.yaml",
    ".sdlrc.json",
    ".sdlrc",
    "sdl.config.yml",
    "sdl.config.yaml",
    "sdl.config.json",
    "sdl.config.toml",
];

/// Find a config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<SdlConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        projects = config.project_count(),
        multi_project = config.is_multi_project(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<SdlConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "toml" => parse_toml(contents, path)?,
        "" if file_name == ".sdlrc" => {
            tracing::trace!("Trying YAML then JSON for .sdlrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;

    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<SdlConfig> {
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<SdlConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

fn parse_toml(contents: &str, path: &Path) -> Result<SdlConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

#[tracing::instrument(skip(config, path), fields(path = %path.display(), projects = config.project_count()))]
fn validate_config(config: &SdlConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if config.project_count() == 0 {
        return Err(invalid("No projects configured".to_string()));
    }

    for (project_name, endpoint) in config.projects() {
        tracing::trace!(project = project_name, "Validating project config");
        validate_endpoint(endpoint).map_err(|problem| {
            invalid(format!("Project '{project_name}' {problem}"))
        })?;
    }

    tracing::debug!("Config validation passed");
    Ok(())
}

fn validate_endpoint(endpoint: &EndpointConfig) -> std::result::Result<(), String> {
    let url = endpoint.url.trim();
    if url.is_empty() {
        return Err("has an empty url".to_string());
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!("url '{url}' must start with http:// or https://"));
    }
    if let Some(depth) = endpoint.type_ref_depth {
        if !(1..=MAX_TYPE_REF_DEPTH).contains(&depth) {
            return Err(format!(
                "typeRefDepth {depth} is outside 1..={MAX_TYPE_REF_DEPTH}"
            ));
        }
    }
    Ok(())
}
