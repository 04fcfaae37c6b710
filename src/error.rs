//! Session error type.

use tokio_tungstenite::tungstenite;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The landmark source cannot be opened. Fatal at startup.
    #[error("input unavailable: {path}: {source}")]
    InputUnavailable { path: String, source: std::io::Error },
    #[error("websocket error: {0}")]
    Ws(Box<tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl From<tungstenite::Error> for AppError {
    fn from(error: tungstenite::Error) -> Self {
        Self::Ws(Box::new(error))
    }
}
