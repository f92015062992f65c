/// Vibe Console - terminal music player front-end
use clap::Parser;
use std::io::BufReader;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibe_console::{repl, ConsoleConfig, ConsoleOutput, StatusView};
use vibe_playback::{format_clock, session, PlaybackController, PlayerSession};

#[derive(Parser)]
#[command(name = "vibe-console")]
#[command(about = "Vibe Player terminal front-end", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./vibe.toml if present)
    #[arg(short, long, env = "VIBE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vibe_console=info,vibe_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = ConsoleConfig::load(cli.config.as_deref())?;
    config.validate()?;
    let playlist = config.build_playlist()?;

    tracing::info!("Starting Vibe Console");
    tracing::info!("Playlist: {} tracks", playlist.len());
    tracing::info!("Tick interval: {:?}", config.playback.tick_interval());

    // Build the session
    let (handle, receiver) = session::channel();
    let output = ConsoleOutput::new(handle.clone());
    let controller = PlaybackController::new(playlist.clone(), &config.playback, Box::new(output));
    let view = StatusView::new(playlist, controller.session());

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let session = PlayerSession::new(
        controller,
        handle.tick_scheduler(),
        config.playback.tick_interval(),
    )?
    .with_event_sink(event_tx);

    let session_task = tokio::spawn(session.run(receiver));

    // Front-end
    let lines = repl::spawn_line_reader(BufReader::new(std::io::stdin()));
    let mut stdout = std::io::stdout();
    tokio::select! {
        result = repl::run(lines, &mut stdout, handle.clone(), view, event_rx) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
            handle.shutdown()?;
        }
    }

    let final_state = session_task.await?;
    tracing::info!(
        "Stopped on track {} at {} ({:?})",
        final_state.current_track_index + 1,
        format_clock(final_state.elapsed),
        final_state.state
    );

    Ok(())
}
