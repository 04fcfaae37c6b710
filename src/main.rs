mod config;
mod error;
mod input;
mod session;
mod sync;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use config::{AppConfig, ConfigUpdate};
use error::AppError;
use input::{COMMAND_CHANNEL_CAPACITY, FRAME_CHANNEL_CAPACITY, FramePolicy};
use session::Session;
use sync::{SYNC_CHANNEL_CAPACITY, SyncOptions};

#[derive(Parser, Debug)]
#[command(name = "airboard", about = "Gesture-driven whiteboard session")]
struct Cli {
    #[arg(long, env = "AIRBOARD_INPUT", default_value = "-", help = "Landmark/command JSONL file, or - for stdin")]
    input: String,

    #[arg(long, env = "AIRBOARD_RELAY_URL", help = "Relay websocket URL, e.g. ws://127.0.0.1:3000/ws")]
    relay_url: Option<String>,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 720.0)]
    height: f64,

    #[arg(long, default_value_t = 2000)]
    reconnect_delay_ms: u64,

    #[arg(long, default_value_t = 25)]
    ping_interval_secs: u64,

    #[arg(long, default_value_t = false, help = "Swap draw and erase hands")]
    left_handed: bool,

    #[arg(long, default_value_t = false, help = "Do not mirror tracking x")]
    no_mirror: bool,

    #[arg(long, default_value_t = false, help = "Never drop frames; for replaying recordings")]
    lossless: bool,

    #[arg(long, default_value_t = false, help = "Print the final board snapshot as JSON")]
    dump_snapshot: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "airboard: session failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let source = input::open(&cli.input).await?;

    let mut config = AppConfig::default();
    config.apply(ConfigUpdate::Mirror(!cli.no_mirror));
    config.apply(ConfigUpdate::LeftHanded(cli.left_handed));

    let policy = if cli.lossless { FramePolicy::Lossless } else { FramePolicy::DropWhileBusy };
    let (frame_tx, frame_rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let reader = tokio::spawn(input::read_lines(source, frame_tx, cmd_tx, policy));

    let (event_tx, event_rx) = mpsc::channel(SYNC_CHANNEL_CAPACITY);
    let (sync_task, outbound) = match cli.relay_url {
        Some(url) => {
            let options = SyncOptions {
                reconnect_delay: Duration::from_millis(cli.reconnect_delay_ms),
                ping_interval: Duration::from_secs(cli.ping_interval_secs.max(1)),
                ..SyncOptions::new(url)
            };
            let (out_tx, out_rx) = mpsc::channel(SYNC_CHANNEL_CAPACITY);
            (Some(tokio::spawn(sync::run_sync(options, event_tx, out_rx))), Some(out_tx))
        }
        None => {
            drop(event_tx);
            (None, None)
        }
    };

    tracing::info!(input = %cli.input, relay = sync_task.is_some(), "airboard: session started");
    let session = Session::new(config, cli.width, cli.height, outbound)
        .run(frame_rx, cmd_rx, event_rx)
        .await;

    let stats = reader.await?;
    if stats.dropped_frames > 0 {
        tracing::info!(dropped = stats.dropped_frames, frames = stats.frames, "airboard: frames dropped while busy");
    }
    if let Some(task) = sync_task {
        task.abort();
    }
    let totals = session.stats();
    tracing::info!(
        frames = totals.frames,
        remote = totals.remote_applied,
        peers = ?session.peers(),
        client_id = ?session.client_id(),
        "airboard: session ended"
    );

    if cli.dump_snapshot {
        println!("{}", session.board().snapshot().to_json()?);
    }
    Ok(())
}
