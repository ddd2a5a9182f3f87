//! Event Publisher Implementation
//!
//! 通过 broadcast 通道把协调器事件推给 UI

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::application::ports::{CoordinatorEvent, EventPublisherPort};

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<CoordinatorEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅事件
    pub fn subscribe(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.channel.subscribe()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisherPort for EventPublisher {
    fn publish(&self, event: CoordinatorEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}
