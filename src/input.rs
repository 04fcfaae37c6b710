//! Local input source: landmark frames and UI commands as JSON lines.
//!
//! Each line is one JSON object tagged by `type`. Frames and commands travel
//! on separate channels into the session:
//! - frames go through a capacity-1 channel filled with `try_send`, so a
//!   frame arriving while the previous one is still queued is dropped
//! - commands are never dropped; the reader waits for room
//!
//! A line that fails to parse is logged and skipped.

use canvas::Template;
use gestures::HandFrame;
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

use crate::config::ConfigUpdate;
use crate::error::AppError;

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

pub const FRAME_CHANNEL_CAPACITY: usize = 1;
pub const COMMAND_CHANNEL_CAPACITY: usize = 64;

fn default_opacity() -> f64 {
    1.0
}

/// One line of local input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocalInput {
    /// A tracking frame: `{"type":"frame","hands":[...],"timestamp_ms":...}`.
    Frame(HandFrame),
    Config { update: ConfigUpdate },
    Resize { width: f64, height: f64 },
    Undo,
    Redo,
    Clear,
    Template { template: Template },
    HideTemplates,
    AddImage {
        source: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(default = "default_opacity")]
        opacity: f64,
    },
    ResetCamera,
}

/// What to do with a frame when the session has not consumed the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePolicy {
    /// Live tracking: keep at most one frame in flight.
    DropWhileBusy,
    /// Replays: wait for the session instead of dropping.
    Lossless,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    pub lines: usize,
    pub frames: usize,
    pub dropped_frames: usize,
    pub commands: usize,
    pub skipped: usize,
}

pub type Source = Box<dyn AsyncBufRead + Unpin + Send>;

/// Open the input: a file path, or `-` for stdin.
///
/// # Errors
///
/// Returns [`AppError::InputUnavailable`] if the file cannot be opened.
pub async fn open(path: &str) -> Result<Source, AppError> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|source| AppError::InputUnavailable { path: path.to_owned(), source })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Parse one line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns the serde error for anything that is not a known input object.
pub fn parse_line(line: &str) -> Result<Option<LocalInput>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Read `reader` to the end, routing frames and commands to the session.
///
/// Stops early when the session hangs up. A read error ends the source.
pub async fn read_lines<R>(
    reader: R,
    frames: mpsc::Sender<HandFrame>,
    commands: mpsc::Sender<LocalInput>,
    policy: FramePolicy,
) -> ReaderStats
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = ReaderStats::default();
    let mut lines = reader.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "input: read failed; closing source");
                break;
            }
        };
        stats.lines += 1;

        let input = match parse_line(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(e) => {
                stats.skipped += 1;
                warn!(line = stats.lines, error = %e, "input: skipping malformed line");
                continue;
            }
        };

        match input {
            LocalInput::Frame(frame) => {
                stats.frames += 1;
                match policy {
                    FramePolicy::DropWhileBusy => match frames.try_send(frame) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            stats.dropped_frames += 1;
                            debug!(line = stats.lines, "input: session busy; frame dropped");
                        }
                        Err(TrySendError::Closed(_)) => break,
                    },
                    FramePolicy::Lossless => {
                        if frames.send(frame).await.is_err() {
                            break;
                        }
                    }
                }
            }
            command => {
                stats.commands += 1;
                if commands.send(command).await.is_err() {
                    break;
                }
            }
        }
    }

    info!(
        lines = stats.lines,
        frames = stats.frames,
        dropped = stats.dropped_frames,
        commands = stats.commands,
        skipped = stats.skipped,
        "input: source closed"
    );
    stats
}
