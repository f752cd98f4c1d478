//! Realtime stream manager
//!
//! Owns at most one live WebSocket connection to the backend's price feeds.
//! The handshake protocol is a single frame: the client sends the raw
//! subscription key as the very first outbound message, after which the
//! server begins pushing price frames on its own cadence.
//!
//! There is no automatic reconnection: a dead connection stays dead until
//! the caller connects again.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info};
use url::Url;

use findash_core::{FindashError, FindashResult, PriceTick};

/// Connection lifecycle of the managed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Connecting,
    Open,
    Closed,
    Errored,
}

/// Latest published reading from the live feed.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamReading {
    /// A parsed price frame
    Tick(PriceTick),
    /// Sentinel published on connection failure, distinct from any
    /// legitimate tick so subscribers can tell "no data yet" from "dead".
    Failed(String),
}

/// Manager for a single live price feed.
///
/// Successive `connect` calls never leave two connections delivering
/// messages: the prior reader is torn down before the new one starts, so the
/// most recent connect wins. The old socket's OS-level teardown may still
/// overlap the new open; that window is a known constraint of this layer.
pub struct StreamManager {
    base_url: String,
    state: Arc<RwLock<StreamState>>,
    reading_tx: watch::Sender<Option<StreamReading>>,
    task: Option<JoinHandle<()>>,
}

impl StreamManager {
    pub fn new(base_url: impl Into<String>) -> Self {
        let (reading_tx, _) = watch::channel(None);
        Self {
            base_url: base_url.into(),
            state: Arc::new(RwLock::new(StreamState::Idle)),
            reading_tx,
            task: None,
        }
    }

    /// Current connection state
    pub fn state(&self) -> StreamState {
        *self.state.read()
    }

    /// Watch the latest reading. `None` until the first frame arrives (or
    /// after a disconnect); replaced wholesale on every update, so a fresh
    /// tick clears any prior error.
    pub fn readings(&self) -> watch::Receiver<Option<StreamReading>> {
        self.reading_tx.subscribe()
    }

    /// Open a stream to `base + endpoint_path`, pinned to `subscription_key`.
    ///
    /// Any prior connection is closed first. Errors are returned only for an
    /// unusable base address; network failures surface through the state and
    /// the sentinel reading instead.
    pub fn connect(&mut self, endpoint_path: &str, subscription_key: &str) -> FindashResult<()> {
        self.close_current();

        let url = ws_url(&self.base_url, endpoint_path)?;
        info!("Connecting stream to {} (key: {})", url, subscription_key);

        *self.state.write() = StreamState::Connecting;
        self.reading_tx.send_replace(None);

        let state = Arc::clone(&self.state);
        let reading_tx = self.reading_tx.clone();
        let key = subscription_key.to_string();

        self.task = Some(tokio::spawn(async move {
            Self::run_connection(url, key, state, reading_tx).await;
        }));

        Ok(())
    }

    /// Close any live connection. Resets the published reading and settles in
    /// `Closed`; calling with nothing live is a no-op.
    pub fn disconnect(&mut self) {
        self.close_current();
        self.reading_tx.send_replace(None);
        *self.state.write() = StreamState::Closed;
    }

    fn close_current(&mut self) {
        if let Some(task) = self.task.take() {
            // Aborting the reader stops message delivery from the old
            // connection before the new one can publish anything.
            task.abort();
        }
    }

    async fn run_connection(
        url: Url,
        key: String,
        state: Arc<RwLock<StreamState>>,
        reading_tx: watch::Sender<Option<StreamReading>>,
    ) {
        let ws_stream = match connect_async(url.as_str()).await {
            Ok((ws_stream, _)) => ws_stream,
            Err(e) => {
                error!("Stream connect failed: {}", e);
                *state.write() = StreamState::Errored;
                reading_tx.send_replace(Some(StreamReading::Failed(e.to_string())));
                return;
            }
        };

        let (mut write, mut read) = ws_stream.split();

        // The subscription key is the entire handshake; the server starts
        // pushing frames once it receives this first message.
        if let Err(e) = write.send(Message::Text(key.into())).await {
            error!("Stream handshake failed: {}", e);
            *state.write() = StreamState::Errored;
            reading_tx.send_replace(Some(StreamReading::Failed(e.to_string())));
            return;
        }

        *state.write() = StreamState::Open;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => match serde_json::from_str::<PriceTick>(&text) {
                    Ok(tick) => {
                        reading_tx.send_replace(Some(StreamReading::Tick(tick)));
                    }
                    Err(e) => {
                        debug!("Skipping unparseable frame: {} ({})", text, e);
                    }
                },
                Ok(Message::Ping(data)) => {
                    if let Err(e) = write.send(Message::Pong(data)).await {
                        error!("Stream pong failed: {}", e);
                        *state.write() = StreamState::Errored;
                        reading_tx.send_replace(Some(StreamReading::Failed(e.to_string())));
                        return;
                    }
                }
                Ok(Message::Close(_)) => {
                    info!("Stream closed by server");
                    *state.write() = StreamState::Closed;
                    return;
                }
                Ok(_) => {}
                Err(e) => {
                    error!("Stream error: {}", e);
                    *state.write() = StreamState::Errored;
                    reading_tx.send_replace(Some(StreamReading::Failed(e.to_string())));
                    return;
                }
            }
        }

        *state.write() = StreamState::Closed;
    }
}

impl Drop for StreamManager {
    // No leaked sockets survive the owner's lifetime
    fn drop(&mut self) {
        self.close_current();
    }
}

impl std::fmt::Debug for StreamManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamManager")
            .field("base_url", &self.base_url)
            .field("state", &self.state())
            .finish()
    }
}

/// Derive the WebSocket URL for an endpoint from the HTTP base address
fn ws_url(base_url: &str, endpoint_path: &str) -> FindashResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| FindashError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;

    let scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        "ws" | "wss" => url.scheme(),
        other => {
            return Err(FindashError::config(format!(
                "Unsupported base URL scheme '{}'",
                other
            )))
        }
    }
    .to_string();

    url.set_scheme(&scheme)
        .map_err(|_| FindashError::config(format!("Cannot use scheme '{}'", scheme)))?;

    url.join(endpoint_path)
        .map_err(|e| FindashError::config(format!("Invalid endpoint path: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_url_upgrades_http_schemes() {
        let url = ws_url("http://localhost:8000", "/api/fin/ws/investments").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:8000/api/fin/ws/investments");

        let url = ws_url("https://fin.example.com", "/api/fin/ws/index").unwrap();
        assert_eq!(url.as_str(), "wss://fin.example.com/api/fin/ws/index");
    }

    #[test]
    fn ws_url_keeps_ws_schemes() {
        let url = ws_url("ws://localhost:9000", "/feed").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:9000/feed");
    }

    #[test]
    fn ws_url_rejects_other_schemes() {
        assert!(ws_url("ftp://example.com", "/feed").is_err());
        assert!(ws_url("not a url", "/feed").is_err());
    }

    #[test]
    fn manager_starts_idle() {
        let manager = StreamManager::new("http://localhost:8000");
        assert_eq!(manager.state(), StreamState::Idle);
        assert!(manager.readings().borrow().is_none());
    }

    #[tokio::test]
    async fn disconnect_without_connection_is_a_noop() {
        let mut manager = StreamManager::new("http://localhost:8000");
        manager.disconnect();
        assert_eq!(manager.state(), StreamState::Closed);
        manager.disconnect();
        assert_eq!(manager.state(), StreamState::Closed);
    }
}
