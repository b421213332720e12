/**
 * Snapshot Subscription Consumer
 *
 * Consumes the server's SSE stream (`GET /api/todos/subscribe`) and
 * feeds each decoded snapshot into the sync client. The SSE framing is
 * parsed incrementally so chunk boundaries can fall anywhere.
 */

use futures_util::StreamExt;

use crate::client::rest::{ClientError, TodoApiClient};
use crate::client::sync::SyncClient;
use crate::shared::event::TodoListSnapshot;

/// Incremental SSE frame parser
///
/// Feed raw chunks in; complete `data:` payloads come out. Events are
/// delimited by a blank line; multi-line data fields are joined with
/// newlines, as the event-stream format requires.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: String,
}

impl SseParser {
    /// Consume a chunk, returning the payloads of any completed events
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.find("\n\n") {
            let event: String = self.buffer.drain(..pos + 2).collect();

            let data: Vec<&str> = event
                .lines()
                .filter_map(|line| line.strip_prefix("data:"))
                .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
                .collect();

            if !data.is_empty() {
                payloads.push(data.join("\n"));
            }
        }
        payloads
    }
}

/// Run the subscription loop until the stream ends
///
/// Connects to the subscription endpoint and applies every decoded
/// snapshot to the sync client. Malformed payloads are logged and
/// skipped; the next snapshot carries the full list anyway. Returns
/// when the server closes the stream, or with an error when the
/// connection fails.
pub async fn run_subscription(
    api: &TodoApiClient,
    sync: &mut SyncClient,
) -> Result<(), ClientError> {
    let url = api.config().api_url("/api/todos/subscribe");

    let response = api
        .http()
        .get(&url)
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ClientError::Api {
            status: response.status().as_u16(),
            message: format!("Subscription refused: {}", response.status()),
        });
    }

    let mut stream = response.bytes_stream();
    let mut parser = SseParser::default();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ClientError::Network(e.to_string()))?;
        let text = String::from_utf8_lossy(&chunk);

        for payload in parser.push(&text) {
            match serde_json::from_str::<TodoListSnapshot>(&payload) {
                Ok(snapshot) => sync.apply_remote(snapshot),
                Err(e) => tracing::warn!("Ignoring malformed snapshot payload: {}", e),
            }
        }
    }

    tracing::info!("Snapshot subscription closed by server");
    Ok(())
}
