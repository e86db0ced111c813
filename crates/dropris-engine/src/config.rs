use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::RotationSnapshot;

/// Errors reported when validating a [`GameConfig`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("grid must be at least 4 rows by 4 columns, got {rows}x{columns}")]
    GridTooSmall { rows: usize, columns: usize },
    #[display("grid must have at most 1048576 cells, got {rows}x{columns}")]
    GridTooLarge { rows: usize, columns: usize },
    #[display("{name} must be greater than zero")]
    ZeroTickDelay { name: &'static str },
}

/// Dimensions of the playing field.
///
/// Every shape template spans two columns and four rows, so both dimensions
/// must be at least [`GridSize::MIN`] for a piece to spawn inside the field.
/// The whole grid holds at most [`GridSize::MAX_CELLS`] cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSize {
    /// Grid height.
    pub rows: usize,
    /// Grid width.
    pub columns: usize,
}

impl Default for GridSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl GridSize {
    /// Smallest accepted value for both dimensions.
    pub const MIN: usize = 4;

    /// Largest accepted number of cells.
    ///
    /// Keeps every coordinate within `i32` and the grid storage small.
    pub const MAX_CELLS: usize = 1 << 20;

    /// The classic 20 rows by 10 columns field.
    pub const STANDARD: Self = Self {
        rows: 20,
        columns: 10,
    };

    /// Creates a validated grid size.
    pub fn new(rows: usize, columns: usize) -> Result<Self, ConfigError> {
        let size = Self { rows, columns };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(self) -> Result<(), ConfigError> {
        if self.rows < Self::MIN || self.columns < Self::MIN {
            return Err(ConfigError::GridTooSmall {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.cell_count().is_none_or(|count| count > Self::MAX_CELLS) {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }

    /// Returns `rows * columns`, or `None` on overflow.
    #[must_use]
    pub fn cell_count(self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }
}

/// Game configuration.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use dropris_engine::{GameConfig, GridSize};
///
/// let config: GameConfig = serde_json::from_str(r#"{ "grid": { "rows": 24 } }"#).unwrap();
/// assert_eq!(config.grid, GridSize { rows: 24, columns: 10 });
/// assert_eq!(config.tick_delay_ms, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid: GridSize,
    /// Gravity interval while the drop key is not held.
    pub tick_delay_ms: u64,
    /// Gravity interval while the drop key is held.
    pub fast_tick_delay_ms: u64,
    /// Where a failed rotation restores the piece from.
    pub rotation_snapshot: RotationSnapshot,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::STANDARD,
            tick_delay_ms: Self::DEFAULT_TICK_DELAY_MS,
            fast_tick_delay_ms: Self::DEFAULT_FAST_TICK_DELAY_MS,
            rotation_snapshot: RotationSnapshot::default(),
        }
    }
}

impl GameConfig {
    pub const DEFAULT_TICK_DELAY_MS: u64 = 300;
    pub const DEFAULT_FAST_TICK_DELAY_MS: u64 = 50;

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if self.tick_delay_ms == 0 {
            return Err(ConfigError::ZeroTickDelay {
                name: "tick_delay_ms",
            });
        }
        if self.fast_tick_delay_ms == 0 {
            return Err(ConfigError::ZeroTickDelay {
                name: "fast_tick_delay_ms",
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }

    #[must_use]
    pub fn fast_tick_delay(&self) -> Duration {
        Duration::from_millis(self.fast_tick_delay_ms)
    }
}
