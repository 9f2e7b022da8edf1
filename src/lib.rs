#![allow(clippy::doc_markdown)] // Allow technical terms like EVTX, MIME in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Hayabusa Worker
//!
//! Task worker that wraps the Hayabusa Windows event log analyzer for a
//! distributed forensic-processing pipeline.
//!
//! ## Overview
//!
//! The worker exposes two operations to an orchestrator:
//!
//! - **CSV timeline**: every selected event log becomes one row set in a
//!   timeline table, tagged for downstream timeline viewers
//! - **HTML report**: a single self-contained summary report
//!
//! Both run the same analyzer over a private staging directory holding hard
//! links to exactly the selected inputs, emit a heartbeat while the analyzer
//! runs, and answer with a JSON result manifest describing the one produced
//! artifact.
//!
//! ## Module Organization
//!
//! - [`models`] - Artifacts, requests, and result manifests
//! - [`selection`] - Input compatibility filtering
//! - [`staging`] - Per-invocation hard-link staging directories
//! - [`execution`] - Command templates, process launch, and supervision
//! - [`packaging`] - Output allocation and result assembly
//! - [`tasks`] - The operations this worker offers
//! - [`registry`] - Explicit task registration and lookup
//! - [`worker`] - The lifecycle controller tying it all together
//! - [`config`] - Layered configuration
//! - [`events`] - Heartbeat publishing
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hayabusa_worker::config::ConfigManager;
//! use hayabusa_worker::events::EventPublisher;
//! use hayabusa_worker::models::TaskRequest;
//! use hayabusa_worker::registry::TaskRegistry;
//! use hayabusa_worker::worker::TaskRunner;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(request: TaskRequest) -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let publisher = EventPublisher::new(manager.config().events.channel_capacity);
//! let runner = TaskRunner::new(manager.config(), publisher);
//!
//! let registry = TaskRegistry::with_builtin_tasks()?;
//! let task = registry.resolve("csv_timeline").ok_or("unknown task")?;
//!
//! let result = runner.run(&task, request, &CancellationToken::new()).await?;
//! println!("{}", result.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod execution;
pub mod logging;
pub mod models;
pub mod packaging;
pub mod registry;
pub mod selection;
pub mod staging;
pub mod tasks;
pub mod worker;

pub use config::{ConfigManager, WorkerConfig};
pub use error::{Result, WorkerError};
pub use events::{EventPublisher, PublishedEvent};
pub use models::{InputArtifact, OutputArtifact, TaskRequest, TaskResult};
pub use registry::TaskRegistry;
pub use selection::{CompatibilityFilter, NoInputPolicy};
pub use tasks::TaskDefinition;
pub use worker::TaskRunner;
