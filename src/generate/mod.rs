//! Policy generation layer.
//!
//! One synchronous chat-completion request per invocation, no retries and
//! no streaming. Failures are classified by [`GenerateError`]; the
//! [`generate_policy`] helper collapses them into the "no result" sentinel
//! so a failed generation never aborts the surrounding flow.

mod openai;

pub use openai::{GenerateError, OpenAiClient};

/// Run one generation request, collapsing any failure into `None`.
///
/// The failure itself is printed to stderr as a diagnostic. Callers that
/// need to distinguish failure kinds should call
/// [`OpenAiClient::complete`] directly.
pub fn generate_policy(client: &OpenAiClient, prompt: &str) -> Option<String> {
    match client.complete(prompt) {
        Ok(text) => Some(text),
        Err(e) => {
            eprintln!("error generating policy: {}", e);
            None
        }
    }
}
