//! Minimal WebSocket client for the telemetry feed.

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};
use url::Url;

use crate::error::TransportError;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const DATA_PATH: &str = "/ws_data";

/// One payload frame handed to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

/// Turn user input into a feed URL.
/// `HOST[:PORT]` becomes `ws://HOST[:PORT]/ws_data`; a ws URL without a path gets `/ws_data`.
pub fn normalize_endpoint(input: &str) -> Result<Url, TransportError> {
    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("ws://{input}")
    };
    let mut url =
        Url::parse(&candidate).map_err(|_| TransportError::InvalidEndpoint(input.to_string()))?;
    if !matches!(url.scheme(), "ws" | "wss") || url.host_str().is_none() {
        return Err(TransportError::InvalidEndpoint(input.to_string()));
    }
    if url.path().is_empty() || url.path() == "/" {
        url.set_path(DATA_PATH);
    }
    Ok(url)
}

// Connect to the feed and return the WS stream
pub async fn connect(url: &Url) -> Result<WsStream, TransportError> {
    let (ws, _) = connect_async(url.as_str()).await?;
    info!(%url, "connected");
    Ok(ws)
}

/// Wait for the next payload frame.
///
/// `None` means the peer closed the stream cleanly. Control frames are skipped.
pub async fn next_frame(ws: &mut WsStream) -> Option<Result<Frame, TransportError>> {
    loop {
        match ws.next().await? {
            Ok(Message::Text(text)) => return Some(Ok(Frame::Text(text))),
            Ok(Message::Binary(bytes)) => return Some(Ok(Frame::Binary(bytes))),
            Ok(Message::Close(reason)) => {
                debug!(?reason, "peer closed");
                return None;
            }
            Ok(_) => continue,
            Err(e) => return Some(Err(e.into())),
        }
    }
}

/// User-initiated shutdown. Errors while closing are not reported.
pub async fn close(ws: &mut WsStream) {
    if let Err(e) = ws.close(None).await {
        debug!("close handshake failed: {e}");
    }
    // drain until the peer acknowledges or the socket goes away
    while let Some(Ok(msg)) = ws.next().await {
        if msg.is_close() {
            break;
        }
    }
}
