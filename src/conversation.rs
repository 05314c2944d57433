// src/conversation.rs

use crate::models::Message;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handle used to share one conversation across the whole app. Components
/// receive this explicitly instead of reaching for a global.
pub type SharedConversation = Arc<Mutex<ConversationStore>>;

type Observer = Box<dyn FnMut(&[Message]) + Send>;

/// Single source of truth for the message list. Appends are the only
/// mutation; observers are invoked synchronously, in registration order,
/// with the complete list after every append.
#[derive(Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    observers: Vec<Observer>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedConversation {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Latest snapshot of the conversation.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Registers an observer. It is called immediately with the current
    /// snapshot, then again after every append.
    pub fn subscribe(&mut self, mut observer: impl FnMut(&[Message]) + Send + 'static) {
        observer(&self.messages);
        self.observers.push(Box::new(observer));
    }

    /// Appends a user message and notifies observers.
    pub fn append_user(&mut self, text: impl Into<String>) {
        self.append(Message::user(text));
    }

    /// Appends a bot message and notifies observers.
    pub fn append_bot(&mut self, text: impl Into<String>) {
        self.append(Message::bot(text));
    }

    fn append(&mut self, message: Message) {
        self.messages.push(message);
        for observer in self.observers.iter_mut() {
            observer(&self.messages);
        }
    }
}

impl std::fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("messages", &self.messages)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_append_preserves_order_and_senders() {
        let mut store = ConversationStore::new();
        store.append_user("first");
        store.append_bot("second");
        store.append_user("third");

        let messages = store.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "first");
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[1].content, "second");
        assert_eq!(messages[1].sender, Sender::Bot);
        assert_eq!(messages[2].content, "third");
        assert_eq!(messages[2].sender, Sender::User);
    }

    #[test]
    fn test_subscribe_receives_current_snapshot_immediately() {
        let mut store = ConversationStore::new();
        store.append_user("one");
        store.append_bot("two");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        store.subscribe(move |messages| {
            seen_clone.lock().unwrap().push(messages.len());
        });

        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_subscriber_notified_on_every_append() {
        let mut store = ConversationStore::new();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        store.subscribe(move |messages| {
            seen_clone.lock().unwrap().push(messages.len());
        });

        store.append_user("hello");
        store.append_bot("hi there");
        store.append_user("bye");

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_observers_notified_in_subscription_order() {
        let mut store = ConversationStore::new();

        let order = Arc::new(Mutex::new(Vec::new()));
        for id in 0..3 {
            let order_clone = order.clone();
            store.subscribe(move |_| {
                order_clone.lock().unwrap().push(id);
            });
        }

        order.lock().unwrap().clear();
        store.append_user("ping");

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_snapshot_is_complete_at_notification_time() {
        let mut store = ConversationStore::new();

        let last = Arc::new(Mutex::new(String::new()));
        let last_clone = last.clone();
        store.subscribe(move |messages| {
            if let Some(message) = messages.last() {
                *last_clone.lock().unwrap() = message.content.clone();
            }
        });

        store.append_user("question");
        assert_eq!(*last.lock().unwrap(), "question");

        store.append_bot("answer");
        assert_eq!(*last.lock().unwrap(), "answer");
    }
}
