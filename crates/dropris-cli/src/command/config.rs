use std::path::PathBuf;

use anyhow::Context as _;
use dropris_engine::{GameConfig, RotationSnapshot};

use crate::util;

/// Game configuration options shared by subcommands.
///
/// Values from `--config` are loaded first; the other flags override them.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameConfigArg {
    /// Path to a game configuration file (JSON format)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Grid height in cells
    #[clap(long)]
    rows: Option<usize>,
    /// Grid width in cells
    #[clap(long)]
    columns: Option<usize>,
    /// Gravity interval in milliseconds
    #[clap(long)]
    tick_delay_ms: Option<u64>,
    /// Gravity interval in milliseconds while the drop key is held
    #[clap(long)]
    fast_tick_delay_ms: Option<u64>,
    /// Snapshot the piece before each rotation, so a blocked rotation never moves it
    #[clap(long)]
    fresh_rotation_snapshot: bool,
}

impl GameConfigArg {
    /// Builds and validates the effective configuration.
    pub(crate) fn load(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => GameConfig::default(),
        };
        self.apply_overrides(&mut config);
        config
            .validate()
            .context("Invalid game configuration")?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.grid.columns = columns;
        }
        if let Some(ms) = self.tick_delay_ms {
            config.tick_delay_ms = ms;
        }
        if let Some(ms) = self.fast_tick_delay_ms {
            config.fast_tick_delay_ms = ms;
        }
        if self.fresh_rotation_snapshot {
            config.rotation_snapshot = RotationSnapshot::Fresh;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use dropris_engine::GridSize;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[clap(flatten)]
        config: GameConfigArg,
    }

    fn parse(args: &[&str]) -> GameConfigArg {
        TestArgs::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .config
    }

    #[test]
    fn test_defaults_without_flags() {
        assert_eq!(parse(&[]).load().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--rows",
            "24",
            "--columns",
            "12",
            "--tick-delay-ms",
            "500",
            "--fast-tick-delay-ms",
            "25",
            "--fresh-rotation-snapshot",
        ])
        .load()
        .unwrap();
        assert_eq!(config.grid, GridSize { rows: 24, columns: 12 });
        assert_eq!(config.tick_delay_ms, 500);
        assert_eq!(config.fast_tick_delay_ms, 25);
        assert_eq!(config.rotation_snapshot, RotationSnapshot::Fresh);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        fs::write(&path, r#"{ "grid": { "rows": 30, "columns": 15 }, "tick_delay_ms": 200 }"#)
            .unwrap();
        let path = path.to_str().unwrap();

        let config = parse(&["--config", path, "--columns", "8"]).load().unwrap();
        assert_eq!(config.grid, GridSize { rows: 30, columns: 8 });
        assert_eq!(config.tick_delay_ms, 200);
    }

    #[test]
    fn test_invalid_result_is_rejected() {
        let err = parse(&["--columns", "2"]).load().unwrap_err();
        assert!(format!("{err:#}").contains("at least 4 rows by 4 columns"));

        let err = parse(&["--rows", "9223372036854775807"]).load().unwrap_err();
        assert!(format!("{err:#}").contains("at most 1048576 cells"));

        let err = parse(&["--tick-delay-ms", "0"]).load().unwrap_err();
        assert!(format!("{err:#}").contains("tick_delay_ms must be greater than zero"));
    }
}
