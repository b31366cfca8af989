//! HTTP client for the bias-detection API.
//!
//! The API exposes two endpoints: `POST /bias/llm_answer` generates a
//! model response for a prompt, and `POST /bias/evaluation` classifies a
//! (prompt, response) pair as biased or unbiased. Any non-2xx status is
//! treated as failure regardless of body content. There is no retry; the
//! connect and request timeouts bound how long a call can stay in flight.

use crate::config::Config;
use crate::history::BiasLabel;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Client for the two bias-detection endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct EvaluateRequest<'a> {
    prompt: &'a str,
    response: &'a str,
}

#[derive(Debug, Deserialize)]
struct EvaluateResponse {
    bias_evaluation: String,
    saved_to: String,
}

/// Result of a bias evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Parsed classification.
    pub label: BiasLabel,
    /// Server-side location the interaction was saved to (opaque text).
    pub saved_to: String,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL the client was built with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a generated response for a prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let url = format!("{}/bias/llm_answer", self.base_url);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest { prompt })
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = response.json().await.map_err(ApiError::Decode)?;
        Ok(body.response)
    }

    /// Request a bias evaluation for a (prompt, response) pair.
    pub async fn evaluate(&self, prompt: &str, response: &str) -> Result<Evaluation, ApiError> {
        let url = format!("{}/bias/evaluation", self.base_url);
        debug!("POST {url}");

        let http_response = self
            .client
            .post(&url)
            .json(&EvaluateRequest { prompt, response })
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = http_response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let body: EvaluateResponse = http_response.json().await.map_err(ApiError::Decode)?;
        Ok(Evaluation {
            label: BiasLabel::parse(&body.bias_evaluation),
            saved_to: body.saved_to,
        })
    }
}

/// Errors that can occur when talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server replied with a non-2xx status code.
    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    /// The request could not be sent or timed out.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(uri: &str) -> ApiClient {
        let mut config = Config::default();
        config.api_base_url = uri.to_string();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn strips_trailing_slash() {
        let client = client_for("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn generate_returns_response_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bias/llm_answer"))
            .and(body_json(serde_json::json!({"prompt": "Is the Earth flat?"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response": "It is not."})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let response = client.generate("Is the Earth flat?").await.unwrap();
        assert_eq!(response, "It is not.");
    }

    #[tokio::test]
    async fn generate_non_success_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bias/llm_answer"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500 }));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn generate_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bias/llm_answer"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn evaluate_sends_pair_and_parses_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bias/evaluation"))
            .and(body_json(serde_json::json!({
                "prompt": "The Earth is flat.",
                "response": "It is flat and the government hides it."
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "bias_evaluation": "Biased",
                "saved_to": "gpt2_interactive_outputs_20250101_120000.csv"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let evaluation = client
            .evaluate(
                "The Earth is flat.",
                "It is flat and the government hides it.",
            )
            .await
            .unwrap();
        assert_eq!(evaluation.label, BiasLabel::Biased);
        assert_eq!(
            evaluation.saved_to,
            "gpt2_interactive_outputs_20250101_120000.csv"
        );
    }

    #[tokio::test]
    async fn evaluate_unrecognized_label_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bias/evaluation"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"bias_evaluation": "inconclusive", "saved_to": "out.csv"}),
            ))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let evaluation = client.evaluate("p", "r").await.unwrap();
        assert_eq!(evaluation.label, BiasLabel::Unknown);
    }

    #[tokio::test]
    async fn evaluate_non_success_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bias/evaluation"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.evaluate("p", "r").await.unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 503 }));
    }

    #[tokio::test]
    async fn transport_failure_is_transport_error() {
        // Nothing listens on this port
        let client = client_for("http://127.0.0.1:1");
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
