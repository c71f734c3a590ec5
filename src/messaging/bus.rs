use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
/// Event bus for pub/sub messaging between engine and presentation.
use std::sync::Arc;

use super::events::QuizEvent;

/// Subscriber ID for tracking subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

struct Registry {
    next_id: usize,
    subscribers: Vec<(SubscriberId, Sender<QuizEvent>)>,
}

/// Broadcasts engine events to any number of subscribers.
///
/// Cloning the bus shares the subscriber registry, so the engine and the
/// front-end can hold their own handles.
#[derive(Clone)]
pub struct EventBus {
    registry: Arc<RwLock<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry {
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Subscribe to events, returns a receiver and subscription ID
    pub fn subscribe(&self) -> (Receiver<QuizEvent>, SubscriberId) {
        let (tx, rx) = unbounded();

        let mut registry = self.registry.write();
        let id = SubscriberId(registry.next_id);
        registry.next_id += 1;
        registry.subscribers.push((id, tx));

        (rx, id)
    }

    /// Unsubscribe from events
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.registry
            .write()
            .subscribers
            .retain(|(sub_id, _)| *sub_id != id);
    }

    /// Publish an event to all subscribers (non-blocking)
    pub fn publish(&self, event: QuizEvent) {
        let registry = self.registry.read();
        for (_, sender) in registry.subscribers.iter() {
            // A failed send means the subscriber hung up; harmless
            let _ = sender.try_send(event.clone());
        }
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.registry.read().subscribers.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_publish() {
        let bus = EventBus::new();
        let (rx, _id) = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(QuizEvent::RoundStarted { total: 5 });

        match rx.try_recv().unwrap() {
            QuizEvent::RoundStarted { total } => assert_eq!(total, 5),
            other => panic!("wrong event received: {:?}", other),
        }
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let (_rx, id) = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.unsubscribe(id);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_multiple_subscribers_all_receive() {
        let bus = EventBus::new();
        let (rx1, _id1) = bus.subscribe();
        let (rx2, _id2) = bus.subscribe();

        bus.publish(QuizEvent::QuestionsLoaded { total: 8 });

        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());
    }

    #[test]
    fn test_clone_shares_registry() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();

        let (_rx, _id) = bus1.subscribe();
        assert_eq!(bus2.subscriber_count(), 1);
    }

    #[test]
    fn test_publish_with_dropped_subscriber() {
        let bus = EventBus::new();
        let (rx, _id) = bus.subscribe();
        drop(rx);

        // Must not panic
        bus.publish(QuizEvent::QuestionsLoaded { total: 1 });
    }
}
