use std::time::Duration;

use dropris_engine::{GameSession, PieceSeed};
use rand::Rng as _;
use ratatui_runtime::Runtime;

use crate::{command::config::GameConfigArg, logging::LogArg};

use self::app::PlayApp;

mod app;
mod input;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    game: GameConfigArg,
    /// Seed for the shape sequence as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Frames per second
    #[clap(long, default_value_t = PlayArg::DEFAULT_FPS)]
    fps: f64,
    /// How long the drop key counts as held after each press or key repeat, in milliseconds
    #[clap(long, default_value_t = PlayArg::DEFAULT_HOLD_GRACE_MS)]
    hold_grace_ms: u64,
    #[clap(flatten)]
    log: LogArg,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            game: GameConfigArg::default(),
            seed: None,
            fps: Self::DEFAULT_FPS,
            hold_grace_ms: Self::DEFAULT_HOLD_GRACE_MS,
            log: LogArg::default(),
        }
    }
}

impl PlayArg {
    const DEFAULT_FPS: f64 = 60.0;
    const DEFAULT_HOLD_GRACE_MS: u64 = 150;
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game,
        seed,
        fps,
        hold_grace_ms,
        log,
    } = arg;

    log.init()?;
    let config = game.load()?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(%seed, ?config, "starting session");

    let session = GameSession::new(&config, seed)?;
    let mut app = PlayApp::new(session, *fps, Duration::from_millis(*hold_grace_ms));
    Runtime::new().run(&mut app)?;

    let stats = app.session().stats();
    let outcome = if app.session().is_game_over() {
        "Game over"
    } else {
        "Quit"
    };
    println!(
        "{outcome}: {} pieces locked, {} rows cleared (seed {seed})",
        stats.locked_pieces(),
        stats.cleared_rows()
    );
    Ok(())
}
