//! Todo REST API Client
//!
//! This module provides async functions for interacting with the todo
//! API. Failures are folded into `ClientError`, with API error bodies
//! decoded into their caller-facing message.

use reqwest::{Client, Response, StatusCode};
use thiserror::Error;
use uuid::Uuid;

use crate::client::config::ClientConfig;
use crate::shared::todo::{CreateTodoRequest, DeleteTodoResponse, Todo, UpdateTodoRequest};

/// Client-side request failures
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with an error status
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message decoded from the error body (or the status text)
        message: String,
    },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ClientError {
    /// The HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Todo API client
pub struct TodoApiClient {
    config: ClientConfig,
    client: Client,
}

impl TodoApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// The client configuration (used by the subscription runner)
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &Client {
        &self.client
    }

    /// Fetch the full list, newest first
    pub async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let url = self.config.api_url("/api/todos");
        let response = self.get(&url).await?;
        decode(response).await
    }

    /// Fetch one record by id
    pub async fn get_todo(&self, id: Uuid) -> Result<Todo, ClientError> {
        let url = self.config.api_url(&format!("/api/todos/{}", id));
        let response = self.get(&url).await?;
        decode(response).await
    }

    /// Create a record
    pub async fn create(&self, request: CreateTodoRequest) -> Result<Todo, ClientError> {
        let url = self.config.api_url("/api/todos");
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        decode(check_status(response).await?).await
    }

    /// Apply a partial update
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateTodoRequest,
    ) -> Result<Todo, ClientError> {
        let url = self.config.api_url(&format!("/api/todos/{}", id));
        let response = self
            .client
            .put(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        decode(check_status(response).await?).await
    }

    /// Delete a record
    pub async fn delete(&self, id: Uuid) -> Result<DeleteTodoResponse, ClientError> {
        let url = self.config.api_url(&format!("/api/todos/{}", id));
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        decode(check_status(response).await?).await
    }

    async fn get(&self, url: &str) -> Result<Response, ClientError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        check_status(response).await
    }
}

/// Turn an error status into a `ClientError::Api` with a decoded message
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = decode_error_message(status, response).await;
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode_error_message(status: StatusCode, response: Response) -> String {
    let body = response.text().await.unwrap_or_default();

    // The server renders {"error": ..., "status": ...}
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }

    if body.is_empty() {
        status.to_string()
    } else {
        format!("Request failed: {} - {}", status, body)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}
