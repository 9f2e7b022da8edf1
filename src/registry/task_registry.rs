use crate::error::{Result, WorkerError};
use crate::tasks::{builtin_definitions, TaskDefinition};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Registry statistics
#[derive(Debug, Clone, Serialize)]
pub struct RegistryStats {
    pub total_tasks: usize,
    pub task_names: Vec<String>,
}

/// Thread-safe map from task identifier to definition
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: RwLock<BTreeMap<String, Arc<TaskDefinition>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in operation
    pub fn with_builtin_tasks() -> Result<Self> {
        let registry = Self::new();
        for definition in builtin_definitions() {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Register a definition; identifiers must be unique and filters valid
    pub fn register(&self, definition: TaskDefinition) -> Result<Arc<TaskDefinition>> {
        if definition.name.trim().is_empty() {
            return Err(WorkerError::Registration {
                reason: "task name must not be empty".to_string(),
            });
        }

        definition
            .compatible_inputs
            .validate()
            .map_err(|reason| WorkerError::Registration {
                reason: format!("task '{}': {reason}", definition.name),
            })?;

        let mut tasks = self.tasks.write();
        if tasks.contains_key(&definition.name) {
            return Err(WorkerError::Registration {
                reason: format!("task '{}' is already registered", definition.name),
            });
        }

        info!(
            task_name = %definition.name,
            display_name = %definition.display_name,
            mode = %definition.mode,
            no_input_policy = ?definition.no_input_policy,
            "Registered task"
        );

        let definition = Arc::new(definition);
        tasks.insert(definition.name.clone(), Arc::clone(&definition));
        Ok(definition)
    }

    pub fn get(&self, name: &str) -> Option<Arc<TaskDefinition>> {
        self.tasks.read().get(name).cloned()
    }

    /// Look up by full identifier, then by unambiguous short name
    pub fn resolve(&self, name: &str) -> Option<Arc<TaskDefinition>> {
        if let Some(task) = self.get(name) {
            return Some(task);
        }

        let tasks = self.tasks.read();
        let matches: Vec<_> = tasks
            .values()
            .filter(|task| task.short_name() == name)
            .cloned()
            .collect();

        match matches.as_slice() {
            [task] => Some(Arc::clone(task)),
            _ => None,
        }
    }

    pub fn list(&self) -> Vec<Arc<TaskDefinition>> {
        self.tasks.read().values().cloned().collect()
    }

    pub fn stats(&self) -> RegistryStats {
        let tasks = self.tasks.read();
        RegistryStats {
            total_tasks: tasks.len(),
            task_names: tasks.keys().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::CompatibilityFilter;
    use crate::tasks::csv_timeline;

    #[test]
    fn test_builtin_tasks_registered() {
        let registry = TaskRegistry::with_builtin_tasks().unwrap();
        let stats = registry.stats();

        assert_eq!(stats.total_tasks, 2);
        assert!(registry.get("openrelik-worker-hayabusa.tasks.html_report").is_some());
        assert!(registry.resolve("html_report").is_some());
        assert!(registry.resolve("csv_timeline").is_some());
        assert!(registry.resolve("timeline").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let registry = TaskRegistry::new();
        registry.register(csv_timeline::definition()).unwrap();

        let err = registry.register(csv_timeline::definition()).unwrap_err();
        assert_eq!(err.error_code(), "REGISTRATION_ERROR");
        assert_eq!(registry.list().len(), 1);
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let registry = TaskRegistry::new();
        let mut definition = csv_timeline::definition();
        definition.compatible_inputs = CompatibilityFilter::default().with_filename_glob("[");

        assert!(registry.register(definition).is_err());
        assert_eq!(registry.stats().total_tasks, 0);
    }

    #[test]
    fn test_ambiguous_short_name_does_not_resolve() {
        let registry = TaskRegistry::new();
        registry.register(csv_timeline::definition()).unwrap();

        let mut other = csv_timeline::definition();
        other.name = "other-worker.tasks.csv_timeline".to_string();
        registry.register(other).unwrap();

        assert!(registry.resolve("csv_timeline").is_none());
        assert!(registry.resolve("other-worker.tasks.csv_timeline").is_some());
    }
}
