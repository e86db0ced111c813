use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::Context as _;
use tracing::Level;

/// Log destination options shared by subcommands.
///
/// The terminal belongs to the game screen, so logs only go to a file.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LogArg {
    /// Write logs to this file (logging is disabled without it)
    #[clap(long)]
    log_file: Option<PathBuf>,
    /// Maximum level written to the log file
    #[clap(long, default_value_t = Level::INFO)]
    log_level: Level,
}

impl Default for LogArg {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: Level::INFO,
        }
    }
}

impl LogArg {
    /// Installs the global subscriber if a log file was requested.
    pub(crate) fn init(&self) -> anyhow::Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;

        tracing_subscriber::fmt()
            .with_max_level(self.log_level)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

        tracing::info!(path = %path.display(), level = %self.log_level, "logging started");
        Ok(())
    }
}
