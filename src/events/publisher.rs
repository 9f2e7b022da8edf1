use crate::constants::events::TASK_PROGRESS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;

/// Out-of-band progress channel between running invocations and the host
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

/// Event that has been published
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedEvent {
    pub name: String,
    pub task_name: String,
    pub workflow_id: Option<String>,
    /// Always `None` for heartbeats
    pub data: Option<Value>,
    pub published_at: DateTime<Utc>,
}

impl PublishedEvent {
    pub fn is_heartbeat(&self) -> bool {
        self.name == TASK_PROGRESS && self.data.is_none()
    }
}

impl EventPublisher {
    /// Create a new event publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event; having no subscribers is not an error
    pub fn publish(
        &self,
        event_name: impl Into<String>,
        task_name: &str,
        workflow_id: Option<&str>,
        data: Option<Value>,
    ) {
        let event = PublishedEvent {
            name: event_name.into(),
            task_name: task_name.to_string(),
            workflow_id: workflow_id.map(str::to_string),
            data,
            published_at: Utc::now(),
        };

        if self.sender.send(event).is_err() {
            tracing::trace!(task_name = %task_name, "No progress subscribers");
        }
    }

    /// Payload-free "still alive" signal
    pub fn heartbeat(&self, task_name: &str, workflow_id: Option<&str>) {
        self.publish(TASK_PROGRESS, task_name, workflow_id, None);
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_EVENT_CHANNEL_CAPACITY)
    }
}
