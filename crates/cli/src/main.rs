mod commands;
mod exit_code;
mod output;
mod progress;

use clap::{Parser, Subcommand};
use colored::Colorize;
use exit_code::ExitCode;
use sdl_introspect::DEFAULT_TYPE_REF_DEPTH;

#[derive(Parser)]
#[command(name = "gql-sdl")]
#[command(about = "Download GraphQL schemas via introspection and render them as SDL", long_about = None)]
#[command(version)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Suppress progress indicators (spinners)
    #[arg(long, global = true)]
    no_progress: bool,

    /// Log informational events to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators (spinners)
    pub show_progress: bool,
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a schema from a GraphQL endpoint via introspection
    ///
    /// The endpoint can be given as a URL argument or loaded from a config
    /// file (.sdlrc.yml, .sdlrc.json, sdl.config.toml, ...) using --project.
    Download(commands::download::DownloadArgs),

    /// Render a saved introspection JSON file as SDL
    Render(commands::render::RenderArgs),

    /// Print the introspection query sent by `download`
    Query {
        /// Levels of `ofType` requested per type reference
        #[arg(long, default_value_t = DEFAULT_TYPE_REF_DEPTH, value_parser = commands::parse_depth)]
        depth: usize,
    },
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_progress: !cli.quiet && !cli.no_progress,
        show_info: !cli.quiet,
    };

    let result = match cli.command {
        Commands::Download(args) => commands::download::run(args, output_opts).await,
        Commands::Render(args) => commands::render::run(&args, output_opts),
        Commands::Query { depth } => commands::query::run(depth),
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            let code = ExitCode::from_error(&err);
            eprintln!("{} {err:#}", "error:".red().bold());
            tracing::debug!(exit_code = %code, "Exiting after failure");
            code
        }
    };
    code.into()
}

/// Initialize tracing to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}
