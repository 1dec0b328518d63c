use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::config::OpenAi;

/// Why a generation request produced no policy text.
///
/// The taxonomy lets callers react per-kind; the pipeline itself treats
/// every variant the same way (diagnostic plus no result).
#[derive(Debug, Error)]
pub enum GenerateError {
    /// `OPENAI_API_KEY` is unset or empty. Detected before any request.
    #[error("OPENAI_API_KEY is not set")]
    MissingCredential,
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The endpoint rejected the credential (HTTP 401/403).
    #[error("authentication failed (HTTP {0})")]
    Auth(u16),
    /// Any other non-success status.
    #[error("api request failed (HTTP {0})")]
    Api(u16),
    /// The body could not be decoded as a chat completion.
    #[error("malformed response: {0}")]
    Malformed(#[source] reqwest::Error),
    /// A well-formed response carrying no choices.
    #[error("response contained no choices")]
    Empty,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Blocking client for an OpenAI-compatible chat-completion endpoint.
#[derive(Debug)]
pub struct OpenAiClient {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Build a client from the `[openai]` config section, reading the
    /// credential from the `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    /// Returns [`GenerateError::MissingCredential`] if the variable is
    /// unset or empty.
    pub fn from_config(cfg: &OpenAi) -> Result<Self, GenerateError> {
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            return Err(GenerateError::MissingCredential);
        }
        Ok(Self::new(cfg.api_url.clone(), api_key, cfg.model.clone()))
    }

    /// Build a client against an explicit endpoint.
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// Send one single-message chat request and return the content of the
    /// first choice.
    ///
    /// The request body is `{model, messages: [{role: "user", content:
    /// <prompt>}]}` with a bearer credential; the call blocks until the
    /// endpoint answers or the transport gives up. No retries are made.
    ///
    /// # Errors
    /// See [`GenerateError`] for the failure taxonomy.
    pub fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(GenerateError::Network)?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GenerateError::Auth(status.as_u16()));
        }
        if !status.is_success() {
            return Err(GenerateError::Api(status.as_u16()));
        }

        let parsed: ChatResponse = resp.json().map_err(GenerateError::Malformed)?;
        let first = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(GenerateError::Empty)?;
        Ok(first.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use serial_test::serial;

    fn client_for(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new(
            server.url("/v1/chat/completions"),
            "test-key".into(),
            "gpt-3.5-turbo".into(),
        )
    }

    #[test]
    fn returns_first_choice_content() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body_partial(
                    r#"{"model":"gpt-3.5-turbo","messages":[{"role":"user","content":"write a policy"}]}"#,
                );
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "policy body"}},
                    {"message": {"role": "assistant", "content": "second choice"}}
                ]
            }));
        });

        let got = client_for(&server).complete("write a policy").unwrap();

        assert_eq!(got, "policy body");
        m.assert();
    }

    #[test]
    fn unauthorized_maps_to_auth() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401).body(r#"{"error": "bad key"}"#);
        });

        let err = client_for(&server).complete("p").unwrap_err();
        assert!(matches!(err, GenerateError::Auth(401)));
    }

    #[test]
    fn server_error_maps_to_api() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(429).body("slow down");
        });

        let err = client_for(&server).complete("p").unwrap_err();
        assert!(matches!(err, GenerateError::Api(429)));
    }

    #[test]
    fn non_json_body_maps_to_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).body("<html>not json</html>");
        });

        let err = client_for(&server).complete("p").unwrap_err();
        assert!(matches!(err, GenerateError::Malformed(_)));
    }

    #[test]
    fn zero_choices_maps_to_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        });

        let err = client_for(&server).complete("p").unwrap_err();
        assert!(matches!(err, GenerateError::Empty));
    }

    #[test]
    fn unreachable_endpoint_maps_to_network() {
        // Port 9 (discard) is reserved and nothing should listen on it.
        let client = OpenAiClient::new(
            "http://127.0.0.1:9/v1/chat/completions".into(),
            "k".into(),
            "gpt-3.5-turbo".into(),
        );

        let err = client.complete("p").unwrap_err();
        assert!(matches!(err, GenerateError::Network(_)));
    }

    #[test]
    #[serial]
    fn from_config_requires_the_env_credential() {
        unsafe { env::remove_var("OPENAI_API_KEY") };
        let err = OpenAiClient::from_config(&OpenAi::default()).unwrap_err();
        assert!(matches!(err, GenerateError::MissingCredential));

        unsafe { env::set_var("OPENAI_API_KEY", "sk-test") };
        assert!(OpenAiClient::from_config(&OpenAi::default()).is_ok());
        unsafe { env::remove_var("OPENAI_API_KEY") };
    }
}
