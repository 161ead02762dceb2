//! `gql-sdl render`: render a saved introspection result.

use crate::output::write_output;
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use sdl_introspect::{parse_response_body, render_sdl_with, RenderOptions, SchemaDescriptor};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Arguments for `gql-sdl render`.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Introspection JSON file (`-` reads stdin)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file path (writes to stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit a `schema { ... }` block listing the root operation types
    #[arg(long)]
    pub schema_definition: bool,
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read stdin")?;
        return Ok(contents);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

/// Renders the payload in `contents`, honoring `errors` in saved responses.
fn render_contents(contents: &str, options: &RenderOptions) -> Result<(String, usize)> {
    let payload = parse_response_body(contents).context("Invalid introspection JSON")?;
    let schema = SchemaDescriptor::from_payload(&payload).context("Unusable introspection JSON")?;
    let count = schema.types.iter().filter(|t| t.is_renderable()).count();
    Ok((render_sdl_with(&schema, options), count))
}

/// Run `gql-sdl render`.
#[tracing::instrument(skip_all, fields(input = %args.input.display()))]
pub fn run(args: &RenderArgs, opts: OutputOptions) -> Result<()> {
    let contents = read_input(&args.input)?;
    let options = RenderOptions {
        include_schema_definition: args.schema_definition,
    };
    let (sdl, count) = render_contents(&contents, &options)?;

    write_output(args.output.as_deref(), &sdl)?;

    if let (Some(path), true) = (&args.output, opts.show_info) {
        println!(
            "{} Rendered {count} types to {}",
            "✓".green(),
            path.display().to_string().cyan()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_code::ExitCode;

    const QUIET: OutputOptions = OutputOptions {
        show_progress: false,
        show_info: false,
    };

    #[test]
    fn test_render_contents_top_level_types() {
        let (sdl, count) = render_contents(
            r#"{"types":[{"kind":"OBJECT","name":"Foo","fields":null},{"kind":"SCALAR","name":"Bar"}]}"#,
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(sdl, "type Foo {\n}\n\n");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_render_contents_structure_errors() {
        for contents in ["{}", r#"{"types":"not-an-array"}"#] {
            let err = render_contents(contents, &RenderOptions::default()).unwrap_err();
            assert_eq!(ExitCode::from_error(&err), ExitCode::StructureError);
        }
    }

    #[test]
    fn test_render_contents_saved_error_response() {
        let err = render_contents(r#"{"errors":[{"message":"boom"}]}"#, &RenderOptions::default())
            .unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::FetchError);
        assert!(format!("{err:#}").contains("boom"));
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("introspection.json");
        let output = dir.path().join("schema.graphql");
        std::fs::write(
            &input,
            r#"{"data":{"__schema":{"queryType":{"name":"Query"},"types":[{"kind":"ENUM","name":"Role","enumValues":[{"name":"ADMIN"}]}]}}}"#,
        )
        .unwrap();

        let args = RenderArgs {
            input,
            output: Some(output.clone()),
            schema_definition: true,
        };
        run(&args, QUIET).unwrap();

        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            "schema {\n  query: Query\n}\n\nenum Role {\n  ADMIN\n}\n\n"
        );
    }

    #[test]
    fn test_run_failure_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("introspection.json");
        let output = dir.path().join("schema.graphql");
        std::fs::write(&input, "{}").unwrap();

        let args = RenderArgs {
            input,
            output: Some(output.clone()),
            schema_definition: false,
        };
        assert!(run(&args, QUIET).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_run_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = RenderArgs {
            input: dir.path().join("missing.json"),
            output: None,
            schema_definition: false,
        };
        let err = run(&args, QUIET).unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::IoError);
    }
}
