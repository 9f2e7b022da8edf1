//! # Hayabusa Worker CLI
//!
//! Host process for the worker's operations. Lists the registered tasks or
//! runs a single request read from a file or stdin, printing the result
//! manifest to stdout. Logs go to stderr so stdout stays machine-readable.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use hayabusa_worker::config::ConfigManager;
use hayabusa_worker::events::EventPublisher;
use hayabusa_worker::logging::init_structured_logging;
use hayabusa_worker::models::TaskRequest;
use hayabusa_worker::registry::TaskRegistry;
use hayabusa_worker::worker::TaskRunner;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

#[derive(Parser)]
#[command(name = "hayabusa-worker")]
#[command(about = "Run Hayabusa event log analysis tasks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration directory (default: ./config)
    #[arg(short, long, global = true, env = "HAYABUSA_WORKER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Environment overlay to load (default: $APP_ENV or development)
    #[arg(short, long, global = true, env = "WORKER_ENV")]
    environment: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the registered task definitions as JSON
    Tasks,

    /// Run one task request and print its result manifest
    Run {
        /// Task identifier, full or short (e.g. csv_timeline)
        #[arg(short, long)]
        task: String,

        /// Path to the request JSON, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        request: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_structured_logging();

    let registry = TaskRegistry::with_builtin_tasks()?;

    match cli.command {
        Commands::Tasks => list_tasks(&registry),
        Commands::Run {
            ref task,
            ref request,
        } => {
            let manager = load_config(&cli)?;
            run_task(&manager, &registry, task, request).await
        }
    }
}

fn load_config(cli: &Cli) -> Result<Arc<ConfigManager>> {
    let manager = match &cli.environment {
        Some(environment) => {
            ConfigManager::load_from_directory_with_env(cli.config_dir.clone(), environment)
        }
        None => ConfigManager::load_from_directory(cli.config_dir.clone()),
    };
    manager.context("failed to load worker configuration")
}

fn list_tasks(registry: &TaskRegistry) -> Result<()> {
    let definitions: Vec<_> = registry
        .list()
        .iter()
        .map(|definition| definition.as_ref().clone())
        .collect();
    println!("{}", serde_json::to_string_pretty(&definitions)?);
    Ok(())
}

async fn run_task(
    manager: &ConfigManager,
    registry: &TaskRegistry,
    task_name: &str,
    request_source: &str,
) -> Result<()> {
    let task = registry
        .resolve(task_name)
        .ok_or_else(|| anyhow!("unknown task '{task_name}'"))?;
    let request = read_request(request_source)?;

    let publisher = EventPublisher::new(manager.config().events.channel_capacity);
    let heartbeat_logger = tokio::spawn(log_events(publisher.clone()));
    let runner = TaskRunner::new(manager.config(), publisher);

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling task");
            interrupt.cancel();
        }
    });

    info!(task_name = %task.name, environment = %manager.environment(), "Running task");
    let outcome = runner.run(&task, request, &cancel).await;

    drop(runner);
    heartbeat_logger.abort();

    match outcome {
        Ok(result) => {
            println!("{}", result.to_json()?);
            Ok(())
        }
        Err(e) => {
            error!(error_code = e.error_code(), error = %e, "Task failed");
            Err(e.into())
        }
    }
}

fn read_request(source: &str) -> Result<TaskRequest> {
    let raw = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read request from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read request file '{source}'"))?
    };

    serde_json::from_str(&raw).context("request is not a valid task request document")
}

async fn log_events(publisher: EventPublisher) {
    let mut receiver = publisher.subscribe();
    drop(publisher);

    loop {
        match receiver.recv().await {
            Ok(event) => debug!(
                event = %event.name,
                task_name = %event.task_name,
                workflow_id = ?event.workflow_id,
                "Task event"
            ),
            Err(RecvError::Lagged(skipped)) => debug!(skipped, "Event logger lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}
