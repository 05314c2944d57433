use crate::api::WebhookClient;
use crate::constants::ERROR_REPLY;
use crate::conversation::SharedConversation;
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};

/// Orchestrates one request/response cycle per user send.
///
/// The busy flag rejects overlapping sends instead of queueing them; there
/// is no retry, timeout, or cancellation, so a cycle runs to completion or
/// failure exactly once.
#[derive(Debug)]
pub struct ChatService {
    conversation: SharedConversation,
    client: WebhookClient,
    busy: AtomicBool,
}

impl ChatService {
    pub fn new(conversation: SharedConversation, client: WebhookClient) -> Self {
        ChatService {
            conversation,
            client,
            busy: AtomicBool::new(false),
        }
    }

    pub fn conversation(&self) -> &SharedConversation {
        &self.conversation
    }

    /// True while a send is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Runs one send cycle. Returns false without side effects when the
    /// text is blank or another send is already in flight.
    ///
    /// The user message is appended before the request is dispatched, so
    /// observers always see it ahead of any reply. Webhook failures surface
    /// as a static bot message rather than an error.
    pub async fn send(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("send rejected, a request is already in flight");
            return false;
        }

        self.conversation.lock().await.append_user(text);

        match self.client.post_message(text).await {
            Ok(Some(reply)) => {
                self.conversation.lock().await.append_bot(reply);
            }
            Ok(None) => {
                // Reply field absent on a successful response: nothing to show.
                warn!("webhook reply missing message.message field");
            }
            Err(e) => {
                warn!("webhook call failed: {}", e);
                self.conversation.lock().await.append_bot(ERROR_REPLY);
            }
        }

        self.busy.store(false, Ordering::SeqCst);
        true
    }
}
