//! Message bus capability with swappable backends.

use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

use crate::errors::PublishError;

/// Publish-only messaging capability.
pub trait MessageBus {
    fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), PublishError>;
}

impl<T: MessageBus + ?Sized> MessageBus for &T {
    fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), PublishError> {
        (**self).publish(topic, payload)
    }
}

/// Logs and drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBus;

impl MessageBus for NoopBus {
    fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), PublishError> {
        debug!(topic, %payload, "Message dropped by no-op bus");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// Keeps published messages in memory, up to an optional capacity.
#[derive(Debug, Default)]
pub struct InMemoryBus {
    messages: Mutex<Vec<PublishedMessage>>,
    capacity: Option<usize>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            capacity: Some(capacity),
        }
    }

    pub fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl MessageBus for InMemoryBus {
    fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<(), PublishError> {
        let mut messages = self.messages.lock().map_err(|_| PublishError::Failed {
            topic: topic.to_string(),
            message: "bus lock poisoned".to_string(),
        })?;
        if let Some(capacity) = self.capacity {
            if messages.len() >= capacity {
                return Err(PublishError::Full { capacity });
            }
        }
        messages.push(PublishedMessage {
            topic: topic.to_string(),
            payload,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn noop_bus_accepts_everything() {
        assert!(NoopBus.publish("anything", json!({"a": 1})).is_ok());
    }

    #[test]
    fn in_memory_bus_records_in_order() {
        let bus = InMemoryBus::new();
        bus.publish("a", json!(1)).unwrap();
        bus.publish("b", json!(2)).unwrap();
        let topics: Vec<_> = bus.messages().into_iter().map(|m| m.topic).collect();
        assert_eq!(topics, ["a", "b"]);
    }

    #[test]
    fn capacity_is_enforced() {
        let bus = InMemoryBus::with_capacity(1);
        bus.publish("a", json!(null)).unwrap();
        assert_eq!(
            bus.publish("a", json!(null)),
            Err(PublishError::Full { capacity: 1 })
        );
    }
}
