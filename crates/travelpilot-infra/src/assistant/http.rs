//! HttpAssistantClient -- concrete [`AssistantClient`] for the TravelPilot
//! assistant service.
//!
//! Sends each user message to `{api_url}/chat` as JSON and returns the
//! assistant's Markdown reply together with the server-issued session id.
//! One attempt per call; no retries.

use std::time::Duration;

use travelpilot_core::assistant::client::AssistantClient;
use travelpilot_types::chat::{AssistantReply, SessionId};
use travelpilot_types::config::ClientConfig;
use travelpilot_types::error::AssistantError;

use super::types::{ChatRequest, ChatResponse};

/// HTTP client for the assistant service.
#[derive(Debug, Clone)]
pub struct HttpAssistantClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssistantClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssistantError::Client(format!("failed to create HTTP client: {e}")))?;

        let base_url = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, AssistantError> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl AssistantClient for HttpAssistantClient {
    async fn send(
        &self,
        message: &str,
        session_id: Option<&SessionId>,
    ) -> Result<AssistantReply, AssistantError> {
        let body = ChatRequest {
            message,
            session_id: session_id.map(SessionId::as_str),
        };
        let url = self.url("/chat");
        tracing::debug!(%url, continuing = session_id.is_some(), "Sending chat request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout
                } else {
                    AssistantError::Transport(format!("HTTP request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AssistantError::Timeout
            } else {
                AssistantError::Decode(format!("failed to parse response: {e}"))
            }
        })?;

        Ok(AssistantReply {
            response: reply.response,
            session_id: SessionId::new(reply.session_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpAssistantClient {
        HttpAssistantClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn send_new_conversation_posts_null_session_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({"message": "Villas in Bali", "session_id": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"response": "Here are villas...", "session_id": "abc123"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server).send("Villas in Bali", None).await.unwrap();
        assert_eq!(reply.response, "Here are villas...");
        assert_eq!(reply.session_id, SessionId::new("abc123"));
    }

    #[tokio::test]
    async fn send_continuing_conversation_includes_session_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({"message": "under $200", "session_id": "abc123"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"response": "Cheaper villas...", "session_id": "abc123"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let id = SessionId::new("abc123");
        let reply = client_for(&server).send("under $200", Some(&id)).await.unwrap();
        assert_eq!(reply.response, "Cheaper villas...");
    }

    #[tokio::test]
    async fn send_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).send("hi", None).await.unwrap_err();
        assert_eq!(
            err,
            AssistantError::Status {
                status: 500,
                body: "boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn send_maps_malformed_body_to_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "wrong shape"})))
            .mount(&server)
            .await;

        let err = client_for(&server).send("hi", None).await.unwrap_err();
        assert!(matches!(err, AssistantError::Decode(_)));
    }

    #[tokio::test]
    async fn send_maps_slow_server_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "late", "session_id": "abc123"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = HttpAssistantClient::new(server.uri(), Duration::from_millis(50)).unwrap();
        let err = client.send("hi", None).await.unwrap_err();
        assert_eq!(err, AssistantError::Timeout);
    }

    #[tokio::test]
    async fn send_unreachable_server_is_transport_error() {
        let client =
            HttpAssistantClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.send("hi", None).await.unwrap_err();
        assert!(matches!(err, AssistantError::Transport(_) | AssistantError::Timeout));
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client =
            HttpAssistantClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/chat"), "http://localhost:8000/chat");
    }
}
