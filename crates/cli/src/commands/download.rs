//! `gql-sdl download`: introspect an endpoint and write its schema.

use crate::output::write_output;
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use sdl_config::{find_config, load_config, ConfigError, EndpointConfig, DEFAULT_PROJECT};
use sdl_introspect::{
    render_sdl_with, IntrospectionClient, RenderOptions, SchemaDescriptor, DEFAULT_TYPE_REF_DEPTH,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout in seconds for introspection requests.
const DEFAULT_TIMEOUT: u64 = 30;

/// Schema output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemaFormat {
    /// SDL (Schema Definition Language) format
    #[default]
    Sdl,
    /// JSON introspection format
    Json,
}

/// Arguments for `gql-sdl download`.
#[derive(Debug, Default, clap::Args)]
pub struct DownloadArgs {
    /// GraphQL endpoint URL to introspect (optional if --project or --config is used)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project name to load endpoint settings from
    #[arg(short, long)]
    pub project: Option<String>,

    /// Output file path (writes to stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// HTTP headers to include in the request (can be specified multiple times)
    /// Format: "Header-Name: Header-Value"
    /// These are merged with headers from the config file (CLI takes precedence)
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "sdl")]
    pub format: SchemaFormat,

    /// Request timeout in seconds (overrides config file)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Number of retry attempts on failure (overrides config file)
    #[arg(long)]
    pub retry: Option<u32>,

    /// Levels of `ofType` requested per type reference (overrides config file)
    #[arg(long, value_parser = super::parse_depth)]
    pub depth: Option<usize>,

    /// Emit a `schema { ... }` block listing the root operation types
    #[arg(long)]
    pub schema_definition: bool,
}

/// Resolved download settings from config file and CLI arguments.
#[derive(Debug)]
struct DownloadSettings {
    url: String,
    headers: Vec<(String, String)>,
    timeout: u64,
    retry: u32,
    depth: usize,
    output: Option<PathBuf>,
    schema_definition: bool,
}

/// Loads the endpoint config and the directory of the file it came from.
fn load_from_config(
    config_path: Option<&Path>,
    project_name: Option<&str>,
) -> Result<(EndpointConfig, PathBuf)> {
    let config_path = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        let current_dir = std::env::current_dir()?;
        find_config(&current_dir)
            .context("Failed to search for config")?
            .ok_or(ConfigError::NotFound(current_dir))
            .context("Use --config to specify one or provide a URL")?
    };

    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    let endpoint = config
        .project(project_name.unwrap_or(DEFAULT_PROJECT))?
        .clone();

    let config_dir = config_path
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    Ok((endpoint, config_dir))
}

/// Parses a header string in "Name: Value" format.
fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        anyhow::bail!("Invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    };
    let name = name.trim().to_string();
    let value = value.trim().to_string();
    if name.is_empty() {
        anyhow::bail!("Header name cannot be empty");
    }
    Ok((name, value))
}

/// Resolve download settings from URL/config and CLI overrides.
fn resolve_settings(args: &DownloadArgs) -> Result<DownloadSettings> {
    let cli_headers = args
        .headers
        .iter()
        .map(|h| parse_header(h))
        .collect::<Result<Vec<_>>>()
        .context("Failed to parse headers")?;

    // A URL argument bypasses the config file entirely
    if let Some(url) = &args.url {
        return Ok(DownloadSettings {
            url: url.clone(),
            headers: cli_headers,
            timeout: args.timeout.unwrap_or(DEFAULT_TIMEOUT),
            retry: args.retry.unwrap_or(0),
            depth: args.depth.unwrap_or(DEFAULT_TYPE_REF_DEPTH),
            output: args.output.clone(),
            schema_definition: args.schema_definition,
        });
    }

    if args.project.is_none() && args.config.is_none() {
        anyhow::bail!(
            "Either a URL argument, --project or --config is required.\n\n\
            Usage:\n  \
            gql-sdl download <URL>\n  \
            gql-sdl download --project <NAME>"
        );
    }

    let (endpoint, config_dir) =
        load_from_config(args.config.as_deref(), args.project.as_deref())?;

    let mut headers: Vec<(String, String)> = endpoint
        .headers
        .clone()
        .unwrap_or_default()
        .into_iter()
        .collect();
    headers.sort();

    for (name, value) in cli_headers {
        headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }

    Ok(DownloadSettings {
        url: endpoint.url.clone(),
        headers,
        timeout: args
            .timeout
            .unwrap_or(endpoint.timeout.unwrap_or(DEFAULT_TIMEOUT)),
        retry: args.retry.unwrap_or(endpoint.retry.unwrap_or(0)),
        depth: args
            .depth
            .unwrap_or(endpoint.type_ref_depth.unwrap_or(DEFAULT_TYPE_REF_DEPTH)),
        output: args
            .output
            .clone()
            .or_else(|| endpoint.output_path(&config_dir)),
        schema_definition: args.schema_definition || endpoint.schema_definition.unwrap_or(false),
    })
}

/// Run `gql-sdl download`.
#[tracing::instrument(skip_all)]
pub async fn run(args: DownloadArgs, opts: OutputOptions) -> Result<()> {
    let start_time = std::time::Instant::now();
    let settings = resolve_settings(&args)?;
    tracing::debug!(url = %settings.url, depth = settings.depth, "Resolved download settings");

    let client = IntrospectionClient::new()
        .with_timeout(Duration::from_secs(settings.timeout))
        .with_retries(settings.retry)
        .with_type_ref_depth(settings.depth)
        .with_headers(settings.headers.clone());

    // No spinner when the document itself goes to stdout
    let spinner = (settings.output.is_some() && opts.show_progress).then(|| {
        crate::progress::spinner(&format!("Fetching schema from {}...", settings.url))
    });

    let fetched = fetch_document(&client, &settings, args.format).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let (content, type_count) = fetched?;

    write_output(settings.output.as_deref(), &content)?;

    if let (Some(path), true) = (&settings.output, opts.show_info) {
        let summary = match type_count {
            Some(count) => format!("SDL, {count} types"),
            None => "JSON".to_string(),
        };
        println!(
            "{} Schema downloaded to {} ({summary})",
            "✓".green(),
            path.display().to_string().cyan(),
        );
        println!("  {} {:.2}s", "⏱".dimmed(), start_time.elapsed().as_secs_f64());
    }

    Ok(())
}

/// Fetches and renders the document, returning it with the number of
/// rendered types (SDL only).
async fn fetch_document(
    client: &IntrospectionClient,
    settings: &DownloadSettings,
    format: SchemaFormat,
) -> Result<(String, Option<usize>)> {
    match format {
        SchemaFormat::Sdl => {
            let data = client
                .execute(&settings.url)
                .await
                .with_context(|| format!("Failed to fetch schema from {}", settings.url))?;
            let schema = SchemaDescriptor::from_payload(&data)
                .with_context(|| format!("Unusable introspection result from {}", settings.url))?;
            let options = RenderOptions {
                include_schema_definition: settings.schema_definition,
            };
            let count = schema.types.iter().filter(|t| t.is_renderable()).count();
            Ok((render_sdl_with(&schema, &options), Some(count)))
        }
        SchemaFormat::Json => {
            let response = client
                .execute_raw(&settings.url)
                .await
                .with_context(|| format!("Failed to fetch schema from {}", settings.url))?;
            let json = serde_json::to_string_pretty(&response)
                .context("Failed to serialize introspection response")?;
            Ok((json, None))
        }
    }
}
