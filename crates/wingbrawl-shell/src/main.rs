//! # wingbrawl
//!
//! Headless host for the Wingbrawl core. Loads settings, builds the game and
//! drives it frame by frame (move, then draw) with logging sinks in place of
//! a window and a sound card, feeding it a scripted input sequence.

mod demo;
mod sinks;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wingbrawl_core::{AudioSink, Clock, Game, GameConfig, ManualClock, SoundId, SystemClock};

use crate::demo::Script;
use crate::sinks::{LogAudioSink, LogRenderSink};

/// Default log filter when neither `--log-level` nor `RUST_LOG` is given.
const DEFAULT_FILTER: &str = "wingbrawl=info,wingbrawl_core=info";

/// Wingbrawl headless driver
#[derive(Parser, Debug)]
#[command(version, about = "Runs the Wingbrawl core headless with a scripted demo")]
struct Cli {
    /// JSON settings file; built-in defaults if omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Frames to run.
    #[arg(long, default_value_t = 300)]
    frames: u32,

    /// Milliseconds per frame.
    #[arg(long, default_value_t = 20)]
    frame_ms: u64,

    /// Use the wall clock and sleep between frames instead of stepping a
    /// manual clock.
    #[arg(long)]
    realtime: bool,

    /// Log filter, e.g. `debug` or `wingbrawl_core=trace`.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => GameConfig::default(),
    };

    let manual = Arc::new(ManualClock::new());
    let clock: Arc<dyn Clock> = if cli.realtime {
        Arc::new(SystemClock::new())
    } else {
        manual.clone()
    };

    let mut game = Game::new(config, clock).context("failed to build game")?;
    let script = Script::demo(&game.config().fighters);
    let mut renderer = LogRenderSink::default();
    let mut audio = LogAudioSink::default();

    info!(
        frames = cli.frames,
        frame_ms = cli.frame_ms,
        realtime = cli.realtime,
        scripted = script.len(),
        "starting"
    );
    audio.play(SoundId::THEME);

    let frame_time = Duration::from_millis(cli.frame_ms);
    let mut collisions = 0;
    let mut culled = 0;
    let mut frames_run = 0;

    'frames: for frame in 0..cli.frames {
        for command in script.commands_at(frame) {
            if !game.handle(command, &mut audio) {
                break 'frames;
            }
        }

        if cli.realtime {
            std::thread::sleep(frame_time);
        } else {
            manual.advance(cli.frame_ms);
        }

        let report = game.move_frame();
        collisions += report.collisions;
        culled += report.culled;
        game.draw_frame(&mut renderer);
        frames_run += 1;

        if report.live == 0 {
            warn!(frame, "population is empty");
        }
    }

    let stats = game.manager().stats();
    info!(
        frames = frames_run,
        live = game.manager().len(),
        created = stats.created,
        reclaimed = stats.reclaimed,
        collisions,
        culled,
        draws = renderer.draws(),
        camera_changes = renderer.camera_changes(),
        sounds = audio.played(),
        "finished"
    );
    Ok(())
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(directives) => {
            EnvFilter::try_new(directives).with_context(|| format!("bad log filter `{directives}`"))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
