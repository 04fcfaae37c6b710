//! Remote sync client: one websocket to the relay, reconnecting forever.
//!
//! DESIGN
//! ======
//! The client owns the socket and nothing else. Inbound text is decoded with
//! the `frames` codec and handed to the session as [`SyncEvent`]s; messages
//! that fail to decode are logged and dropped. Outbound messages arrive on a
//! channel from the session. A `ping` goes out on a fixed interval.
//!
//! On any socket failure the client waits a fixed delay and reconnects. It
//! stops only when the session hangs up either channel.

use std::time::Duration;

use frames::{SyncMessage, SyncPayload, decode_message, encode_message};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, interval_at};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::error::AppError;

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(25);
pub const SYNC_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub url: String,
    pub reconnect_delay: Duration,
    pub ping_interval: Duration,
}

impl SyncOptions {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), reconnect_delay: DEFAULT_RECONNECT_DELAY, ping_interval: DEFAULT_PING_INTERVAL }
    }
}

/// What the sync client reports to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Connected,
    Disconnected,
    Message(SyncMessage),
}

/// Decode one inbound text frame, logging and dropping anything malformed.
#[must_use]
pub fn decode_inbound(text: &str) -> Option<SyncMessage> {
    match decode_message(text) {
        Ok(msg) => Some(msg),
        Err(e) => {
            warn!(error = %e, "sync: dropping malformed message");
            None
        }
    }
}

/// Connect, pump messages, and reconnect after a fixed delay, until the
/// session drops its end of either channel.
pub async fn run_sync(options: SyncOptions, events: mpsc::Sender<SyncEvent>, mut outbound: mpsc::Receiver<SyncMessage>) {
    let mut attempt: u64 = 0;
    loop {
        attempt += 1;
        info!(url = %options.url, attempt, "sync: connecting");
        match connect_async(options.url.as_str()).await {
            Ok((stream, _)) => {
                attempt = 0;
                info!(url = %options.url, "sync: connected");
                if events.send(SyncEvent::Connected).await.is_err() {
                    return;
                }
                match pump(stream, &options, &events, &mut outbound).await {
                    Ok(()) => return,
                    Err(e) => warn!(error = %e, "sync: connection lost"),
                }
                if events.send(SyncEvent::Disconnected).await.is_err() {
                    return;
                }
            }
            Err(e) => warn!(url = %options.url, attempt, error = %e, "sync: connect failed"),
        }
        tokio::time::sleep(options.reconnect_delay).await;
    }
}

/// Drive one connection. `Ok` means the session hung up; `Err` means the
/// socket failed and the caller should reconnect.
async fn pump<S>(
    stream: S,
    options: &SyncOptions,
    events: &mpsc::Sender<SyncEvent>,
    outbound: &mut mpsc::Receiver<SyncMessage>,
) -> Result<(), AppError>
where
    S: futures_util::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>>
        + futures_util::Sink<Message, Error = tokio_tungstenite::tungstenite::Error>
        + Unpin,
{
    let (mut sink, mut source) = stream.split();
    let mut ping = interval_at(Instant::now() + options.ping_interval, options.ping_interval);

    loop {
        tokio::select! {
            msg = source.next() => {
                let Some(msg) = msg else { return Err(AppError::WsClosed) };
                match msg? {
                    Message::Text(text) => {
                        let Some(msg) = decode_inbound(text.as_str()) else { continue };
                        debug!(kind = msg.payload.kind(), "sync: recv");
                        if events.send(SyncEvent::Message(msg)).await.is_err() {
                            return Ok(());
                        }
                    }
                    Message::Close(_) => return Err(AppError::WsClosed),
                    _ => {}
                }
            }
            out = outbound.recv() => {
                let Some(msg) = out else { return Ok(()) };
                debug!(kind = msg.payload.kind(), "sync: send");
                sink.send(Message::text(encode_message(&msg))).await?;
            }
            _ = ping.tick() => {
                sink.send(Message::text(encode_message(&SyncMessage::new(SyncPayload::Ping)))).await?;
            }
        }
    }
}
