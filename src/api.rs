use crate::{
    config::get_config,
    errors::{RelayError, RelayResult},
    logging::log_webhook_call,
    models::WebhookCallLog,
};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Instant;

/// Client for the automation workflow webhook. The endpoint is injected so
/// callers (and tests) decide where requests go.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: Client,
    endpoint: String,
}

impl WebhookClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        WebhookClient {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(get_config().webhook_url)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts one user message to the webhook and returns the reply text.
    ///
    /// The reply is read from the `message.message` field of the response
    /// body; a well-formed response without that field yields `Ok(None)`.
    pub async fn post_message(&self, text: &str) -> RelayResult<Option<String>> {
        let payload = json!({
            "message": text,
            "timestamp": Utc::now().to_rfc3339(),
        });

        let summary = summarize_request(text);
        let started = Instant::now();

        // Make the webhook request
        let response = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                self.log_call(&summary, 0, started.elapsed().as_millis());
                RelayError::webhook_error(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        self.log_call(&summary, status.as_u16(), started.elapsed().as_millis());

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RelayError::webhook_error(format!(
                "Webhook returned error: {} - {}",
                status, error_text
            )));
        }

        // Parse response
        let body: Value = response.json().await.map_err(|e| {
            RelayError::webhook_error(format!("Failed to parse webhook response: {}", e))
        })?;

        Ok(body["message"]["message"].as_str().map(|s| s.to_string()))
    }

    fn log_call(&self, summary: &str, status: u16, elapsed_ms: u128) {
        log_webhook_call(&WebhookCallLog {
            timestamp: Utc::now(),
            endpoint: self.endpoint.clone(),
            request_summary: summary.to_string(),
            response_status: status,
            response_time_ms: elapsed_ms,
        });
    }
}

fn summarize_request(text: &str) -> String {
    if text.chars().count() > 80 {
        let head: String = text.chars().take(80).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer) -> WebhookClient {
        WebhookClient::new(format!("{}/webhook/ai-chat", server.uri()))
    }

    #[tokio::test]
    async fn test_post_message_extracts_reply_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook/ai-chat"))
            .and(body_partial_json(json!({ "message": "hi there" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "message": { "message": "Hello!" } })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let reply = client_for(&mock_server).post_message("hi there").await;
        assert_eq!(reply.unwrap(), Some("Hello!".to_string()));
    }

    #[tokio::test]
    async fn test_post_message_missing_inner_field_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook/ai-chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": {} })))
            .mount(&mock_server)
            .await;

        let reply = client_for(&mock_server).post_message("hi").await;
        assert_eq!(reply.unwrap(), None);
    }

    #[tokio::test]
    async fn test_post_message_non_string_reply_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook/ai-chat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": { "message": 42 } })),
            )
            .mount(&mock_server)
            .await;

        let reply = client_for(&mock_server).post_message("hi").await;
        assert_eq!(reply.unwrap(), None);
    }

    #[tokio::test]
    async fn test_post_message_error_status_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook/ai-chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).post_message("hi").await;
        assert!(matches!(result, Err(RelayError::Webhook(_))));
    }

    #[tokio::test]
    async fn test_post_message_malformed_body_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook/ai-chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).post_message("hi").await;
        assert!(matches!(result, Err(RelayError::Webhook(_))));
    }

    #[tokio::test]
    async fn test_post_message_connection_refused_is_error() {
        // Nothing listens here; the request fails at the transport level.
        let client = WebhookClient::new("http://127.0.0.1:9/webhook/ai-chat");
        let result = client.post_message("hi").await;
        assert!(matches!(result, Err(RelayError::Webhook(_))));
    }

    #[tokio::test]
    async fn test_post_message_body_carries_timestamp() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook/ai-chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "message": { "message": "ok" } })),
            )
            .mount(&mock_server)
            .await;

        client_for(&mock_server).post_message("hi").await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["message"], "hi");
        assert!(body["timestamp"].is_string());
    }
}
