//! # Task Registry
//!
//! Explicit registration of the operations a worker process serves. The host
//! registers definitions once at startup and resolves them per request;
//! nothing registers itself as a side effect of being linked in.
//!
//! ```rust
//! use hayabusa_worker::registry::TaskRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TaskRegistry::with_builtin_tasks()?;
//! let task = registry.resolve("csv_timeline").expect("registered");
//! assert_eq!(task.name, "openrelik-worker-hayabusa.tasks.csv_timeline");
//! # Ok(())
//! # }
//! ```

pub mod task_registry;

pub use task_registry::{RegistryStats, TaskRegistry};
