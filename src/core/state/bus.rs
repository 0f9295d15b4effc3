use std::collections::HashMap;

use super::AppState;

/// Notification groups. A topic carries no payload: subscribers pull the
/// snapshot they care about from the store they are handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Ingestion,
    Memory,
    Scheduler,
    Scripting,
    Audio,
    Streaming,
    Observability,
    Config,
    System,
}

impl Topic {
    pub const ALL: [Topic; 9] = [
        Topic::Ingestion,
        Topic::Memory,
        Topic::Scheduler,
        Topic::Scripting,
        Topic::Audio,
        Topic::Streaming,
        Topic::Observability,
        Topic::Config,
        Topic::System,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Ingestion => "ingestion",
            Topic::Memory => "memory",
            Topic::Scheduler => "scheduler",
            Topic::Scripting => "scripting",
            Topic::Audio => "audio",
            Topic::Streaming => "streaming",
            Topic::Observability => "observability",
            Topic::Config => "config",
            Topic::System => "system",
        }
    }
}

pub type Subscriber = Box<dyn Fn(&AppState) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Per-topic registry of synchronous callbacks.
///
/// Dispatch happens on the caller's turn, right after the snapshot write,
/// in registration order within a topic. Nothing is promised about the
/// relative order of different topics.
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<Topic, Vec<(SubscriptionId, Subscriber)>>,
    next_id: u64,
}

impl EventBus {
    pub fn subscribe(&mut self, topic: Topic, callback: Subscriber) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers
            .entry(topic)
            .or_default()
            .push((id, callback));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for list in self.subscribers.values_mut() {
            if let Some(pos) = list.iter().position(|(sid, _)| *sid == id) {
                let (_, callback) = list.remove(pos);
                drop(callback);
                return true;
            }
        }
        false
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscribers.get(&topic).map_or(0, Vec::len)
    }

    pub(super) fn dispatch(&self, topic: Topic, state: &AppState) {
        if let Some(list) = self.subscribers.get(&topic) {
            for (_, callback) in list {
                callback(state);
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&str, usize> = self
            .subscribers
            .iter()
            .map(|(topic, list)| (topic.as_str(), list.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("subscribers", &counts)
            .finish()
    }
}
