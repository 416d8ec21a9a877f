//! termstd: command-line driver for the term processing workflows.
//!
//! Each `run` mounts one workflow page, applies category and option flags,
//! submits the text to the processing service and prints the report.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use termstd_client::{ClientConfig, HttpTransport, WorkflowPage};
use termstd_core::{render_failure, render_report, Workflow};

#[derive(Parser)]
#[command(name = "termstd")]
#[command(author, version, about = "Term recognition and standardization client")]
#[command(propagate_version = true)]
struct Cli {
    /// Service base URL (overrides config file and TERMSTD_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Path to a client.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available workflows
    Workflows,

    /// List a workflow's categories
    Categories {
        /// Workflow slug (ner, stand, fin-std, corr, abbr, gen)
        workflow: Workflow,
    },

    /// Submit text to a workflow and print the result
    Run(RunArgs),

    /// Check that the processing service is up
    Health,
}

#[derive(Args)]
struct RunArgs {
    /// Workflow slug (ner, stand, fin-std, corr, abbr, gen)
    workflow: Workflow,

    /// Text to process
    #[arg(short, long)]
    text: String,

    /// Uncheck a category (can specify multiple)
    #[arg(long, value_name = "KEY")]
    exclude: Vec<String>,

    /// Check only these categories (can specify multiple)
    #[arg(long, value_name = "KEY")]
    only: Vec<String>,

    /// Embedding or LLM provider
    #[arg(long)]
    provider: Option<String>,

    /// Embedding or LLM model
    #[arg(long)]
    model: Option<String>,

    /// Vector database name
    #[arg(long)]
    db_name: Option<String>,

    /// Vector collection name
    #[arg(long)]
    collection_name: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _log_guard = init_logging();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter (default: "termstd=info,termstd_client=info")
///
/// Console output goes to stderr; stdout carries the report.
fn init_logging() -> Option<WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "termstd=info,termstd_client=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("termstd.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    debug!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );
    guard
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Workflows => {
            cmd_workflows(&config);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Categories { workflow } => {
            cmd_categories(workflow);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run(args) => cmd_run(config, args).await,
        Commands::Health => cmd_health(config).await,
    }
}

/// Config file (explicit or default location) or environment, then flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ClientConfig::load().context("Failed to load client config")?,
    };

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_seconds = timeout;
    }

    config.validate().context("Invalid client config")?;
    Ok(config)
}

fn cmd_workflows(config: &ClientConfig) {
    for workflow in Workflow::ALL {
        println!(
            "{:<8} {:<36} {}",
            workflow.slug(),
            workflow.title(),
            config.endpoint_for(workflow)
        );
    }
}

fn cmd_categories(workflow: Workflow) {
    let spec = workflow.spec();
    println!("* {:<28} {}", spec.all_key, spec.all_label);
    for category in spec.categories {
        println!("  {:<28} {}", category.key, category.label);
    }
}

async fn cmd_run(config: ClientConfig, args: RunArgs) -> anyhow::Result<ExitCode> {
    let endpoint = config.endpoint_for(args.workflow);
    let transport = Arc::new(HttpTransport::new(config)?);

    let mut page = WorkflowPage::mount(args.workflow, transport)?.with_endpoint(endpoint);
    apply_selection(&mut page, &args.only, &args.exclude)?;
    apply_options(&mut page, &args)?;
    page.set_input(args.text.as_str());

    info!(
        workflow = %args.workflow,
        selected = page.categories().selected_keys().len(),
        "Submitting"
    );

    let state = page.submit().await;

    if let Some(result) = state.result() {
        if args.json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            print!("{}", render_report(result));
        }
        return Ok(ExitCode::SUCCESS);
    }

    match state.error() {
        Some(error) => {
            if args.json {
                let output = serde_json::json!({
                    "error": error.to_string(),
                    "kind": error.kind(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!("{}", render_failure(error));
            }
            Ok(ExitCode::FAILURE)
        }
        None => bail!("Submission ended in {} state", state.phase()),
    }
}

async fn cmd_health(config: ClientConfig) -> anyhow::Result<ExitCode> {
    let transport = HttpTransport::new(config)?;
    let health = transport.health_check().await?;
    let healthy = health.is_healthy();

    let output = serde_json::json!({
        "url": transport.config().base_url,
        "status": health.status,
        "service": health.service,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(if healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// `--only` unchecks the aggregate and checks each listed key; `--exclude`
/// then unchecks its keys.
fn apply_selection(
    page: &mut WorkflowPage,
    only: &[String],
    exclude: &[String],
) -> termstd_core::Result<()> {
    if !only.is_empty() {
        let all_key = page.categories().all_key().to_string();
        page.toggle(&all_key, false)?;
        for key in only {
            page.toggle(key, true)?;
        }
    }
    for key in exclude {
        page.toggle(key, false)?;
    }
    Ok(())
}

/// Option flags go to the embedding options when the workflow has them,
/// otherwise to the LLM options.
fn apply_options(page: &mut WorkflowPage, args: &RunArgs) -> termstd_core::Result<()> {
    let fields = [
        ("provider", &args.provider),
        ("model", &args.model),
        ("dbName", &args.db_name),
        ("collectionName", &args.collection_name),
    ];

    for (name, value) in fields {
        let Some(value) = value else { continue };
        if page.embedding_options().is_some() {
            page.set_embedding_field(name, value)?;
        } else {
            page.set_llm_field(name, value)?;
        }
    }
    Ok(())
}
