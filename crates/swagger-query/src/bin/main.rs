//! swagger-query CLI - list and inspect endpoints of a remote Swagger/OpenAPI spec
//!
//! Reports go to stdout, or to a file with `--output`. Logs go to stderr.
//! A failed fetch or parse is reported as a single `Error: ...` line in
//! place of the report.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error};

use swagger_query::runner::{self, Invocation, QueryKind, RunOutcome};
use swagger_query::{DetailView, OutputSink, Settings, SpecLoader, SpecResult, SpecSource};

/// Query a Swagger/OpenAPI document for endpoints and operation details
#[derive(Parser, Debug)]
#[command(name = "swagger-query")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Spec URL or local file (overrides the settings file)
    #[arg(long, global = true, env = "SWAGGER_QUERY_SOURCE")]
    source: Option<String>,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Network timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Exit with status 1 when the report is an error line
    #[arg(long, global = true)]
    fail_on_error: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List endpoints whose path contains any keyword
    List {
        /// Keyword to match (repeatable; defaults to the configured set)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show parameters and request body of one operation
    Request(DetailArgs),

    /// Show responses and component schemas of one operation
    Responses(DetailArgs),

    /// Show everything about one operation
    Describe(DetailArgs),
}

#[derive(Args, Debug)]
struct DetailArgs {
    /// Path template, e.g. "/{username}/messages"
    path: Option<String>,

    /// HTTP method
    #[arg(short, long)]
    method: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Write the report to a file instead of stdout (the command's default file when no value is given)
    #[arg(long, num_args = 0..=1, value_name = "FILE")]
    output: Option<Option<PathBuf>>,
}

impl OutputArgs {
    fn sink(&self, default_file: &Path) -> OutputSink {
        match &self.output {
            None => OutputSink::Console,
            Some(None) => OutputSink::File(default_file.to_path_buf()),
            Some(Some(path)) => OutputSink::File(path.clone()),
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Turn CLI arguments and settings into a query plus its destination.
/// The sink is always known, so a bad source can still be reported there.
fn plan(cli: Cli, settings: &Settings) -> (SpecResult<Invocation>, OutputSink) {
    let source = cli
        .source
        .as_deref()
        .unwrap_or(&settings.source)
        .parse::<SpecSource>();

    let (query, sink) = match cli.command {
        Command::List { keywords, output } => {
            let keywords = if keywords.is_empty() {
                settings.keywords.clone()
            } else {
                keywords
            };
            (
                QueryKind::List { keywords },
                output.sink(&settings.listing_output),
            )
        }
        Command::Request(args) => detail(args, DetailView::Request, settings),
        Command::Responses(args) => detail(args, DetailView::Response, settings),
        Command::Describe(args) => detail(args, DetailView::Full, settings),
    };

    let invocation = source.map(|source| Invocation {
        source,
        query,
        not_found_hint: settings.not_found_hint.clone(),
    });

    (invocation, sink)
}

/// Run a planned invocation; setup failures become the same one-line report
async fn outcome(invocation: SpecResult<Invocation>, timeout: Duration) -> RunOutcome {
    let prepared = invocation.and_then(|inv| Ok((SpecLoader::new(timeout)?, inv)));

    match prepared {
        Ok((loader, invocation)) => runner::run(&loader, &invocation).await,
        Err(e) => {
            error!("{}", e);
            RunOutcome::failed(&e)
        }
    }
}

fn detail(args: DetailArgs, view: DetailView, settings: &Settings) -> (QueryKind, OutputSink) {
    let sink = args.output.sink(&settings.detail_output);
    let query = QueryKind::Describe {
        path: args.path.unwrap_or_else(|| settings.detail_path.clone()),
        method: args.method.unwrap_or_else(|| settings.detail_method.clone()),
        view,
    };
    (query, sink)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())
        .map_err(|e| format!("Failed to load settings: {}", e))?;
    let timeout = Duration::from_secs(cli.timeout.unwrap_or(settings.timeout_secs));
    let fail_on_error = cli.fail_on_error;

    let (invocation, sink) = plan(cli, &settings);
    debug!("Running {:?} -> {:?}", invocation, sink);

    let report = outcome(invocation, timeout).await;

    sink.write(report.text()).await.map_err(|e| {
        error!("{}", e);
        e
    })?;

    if report.is_failure() && fail_on_error {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
