use async_trait::async_trait;
use thiserror::Error;

use super::types::GenerateRequest;

/// Why a generation attempt produced no reply
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// Request never completed (DNS, refused connection, transport timeout)
    #[error("{0}")]
    Transport(String),
    /// Any non-success status; the code is kept for logs only
    #[error("Failed to generate email. Server error.")]
    Server { status: u16 },
    #[error("Failed to read reply: {0}")]
    Body(String),
}

/// Anything that can turn an email and a tone into reply text
#[async_trait]
pub trait ReplyService: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ServiceError>;
}

/// Reply generation over HTTP: POST JSON, read the body back as plain text
pub struct HttpReplyService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReplyService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReplyService for HttpReplyService {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ServiceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Server {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ServiceError::Body(e.to_string()))
    }
}
