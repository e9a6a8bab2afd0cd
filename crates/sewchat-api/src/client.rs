use std::time::Duration;

use reqwest::StatusCode;

use crate::error::ChatApiError;
use sewchat_logging::{log_request, log_request_to_file, log_response, log_response_to_file};
use sewchat_models::{ChatRequest, ChatResponse};

/// Bound on the whole request, connect included. Exceeding it aborts the
/// in-flight request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the chat endpoint.
pub struct ChatClient {
    endpoint: String,
    timeout: Duration,
    verbose: bool,
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, REQUEST_TIMEOUT)
    }

    /// The timeout is fixed in production; tests shrink it.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            verbose: false,
            client: reqwest::Client::new(),
        }
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one user message and return the assistant's reply text.
    ///
    /// No retry for any error kind; every failure surfaces once, already
    /// classified.
    pub async fn send(&self, message: &str) -> Result<String, ChatApiError> {
        let request = ChatRequest {
            message: message.to_string(),
        };

        log_request(&self.endpoint, &request, self.verbose);
        let request_timestamp = log_request_to_file(&self.endpoint, &request).unwrap_or(0);

        let response = tokio::time::timeout(self.timeout, async {
            self.client
                .post(&self.endpoint)
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
        })
        .await
        .map_err(|_| ChatApiError::Timeout)??;

        let status = response.status();
        let headers = response.headers().clone();
        // The bound covers reaching the server and getting its status line;
        // once headers are in, the body is read without a clock.
        let body = response.text().await.map_err(ChatApiError::from)?;

        log_response(&status, &headers, &body, self.verbose);
        let _ = log_response_to_file(&status, &headers, &body, request_timestamp);

        interpret_response(status, &body)
    }
}

/// Turn (status, body) into the reply text or a classified error.
///
/// Success needs a 2xx status, `success: true`, and a present `response`
/// field; anything else is an error.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<String, ChatApiError> {
    if !status.is_success() {
        return Err(ChatApiError::HttpStatus(status.as_u16()));
    }

    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ChatApiError::Unknown(format!("Failed to parse API response: {}", e)))?;

    if !parsed.success {
        return Err(ChatApiError::Application(
            parsed
                .error
                .unwrap_or_else(|| "Failed to get response".to_string()),
        ));
    }

    parsed
        .response
        .ok_or_else(|| ChatApiError::Application("Failed to get response".to_string()))
}
