use std::path::PathBuf;
use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;

/// Grid side used when no usable size is configured.
pub const DEFAULT_GRID_SIZE: u16 = 15;

/// Smallest accepted grid side.
pub const MIN_GRID_SIZE: u16 = 4;

/// Largest accepted grid side.
pub const MAX_GRID_SIZE: u16 = 40;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Upper bound on how long the host waits for input before redrawing.
pub const FRAME_INTERVAL_MS: u64 = 50;

/// Number of segments the snake spawns with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Random placement attempts before food generation falls back to a scan.
pub const MAX_RANDOM_FOOD_ATTEMPTS: usize = 64;

/// Logical grid dimensions. The board is always square.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    side: u16,
}

impl GridSize {
    /// Creates a grid with `side` cells per axis, falling back to the
    /// default when `side` is outside the accepted range.
    #[must_use]
    pub fn new(side: u16) -> Self {
        if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&side) {
            Self { side }
        } else {
            Self::default()
        }
    }

    /// Normalizes a raw configuration value.
    ///
    /// Absent, non-numeric, non-positive and out-of-range values all become
    /// the default grid instead of an error.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<i64>().ok())
            .and_then(|side| u16::try_from(side).ok())
            .map_or_else(Self::default, Self::new)
    }

    /// Cells per axis.
    #[must_use]
    pub fn side(self) -> u16 {
        self.side
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.side) * usize::from(self.side)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            side: DEFAULT_GRID_SIZE,
        }
    }
}

/// Runtime settings resolved from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub grid: GridSize,
    pub tick_interval: Duration,
    pub seed: Option<u64>,
    pub scores_path: Option<PathBuf>,
    pub pointer_input: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            tick_interval: tick_interval_from_ms(DEFAULT_TICK_INTERVAL_MS),
            seed: None,
            scores_path: None,
            pointer_input: true,
            log_file: None,
        }
    }
}

/// Converts a configured tick period, clamping it to the supported minimum.
#[must_use]
pub fn tick_interval_from_ms(ms: u64) -> Duration {
    Duration::from_millis(ms.max(MIN_TICK_INTERVAL_MS))
}

/// Colors applied to every visual element.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub message: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
    pub pad_button: Color,
}

/// The only theme shipped with the game.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    message: Color::Yellow,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
    pad_button: Color::Cyan,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Terminal columns used for one grid cell, keeping cells roughly square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_SNAKE_TAIL: &str = "▒▒";
pub const GLYPH_FOOD: &str = "()";

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DEFAULT_GRID_SIZE, GridSize, MIN_TICK_INTERVAL_MS, tick_interval_from_ms};

    #[test]
    fn valid_grid_size_is_kept() {
        assert_eq!(GridSize::from_raw(Some("20")).side(), 20);
        assert_eq!(GridSize::from_raw(Some(" 8 ")).side(), 8);
    }

    #[test]
    fn invalid_grid_size_falls_back_to_default() {
        for raw in [None, Some(""), Some("abc"), Some("0"), Some("-3"), Some("2"), Some("9000")] {
            assert_eq!(
                GridSize::from_raw(raw).side(),
                DEFAULT_GRID_SIZE,
                "raw value {raw:?} should normalize to the default"
            );
        }
    }

    #[test]
    fn total_cells_is_side_squared() {
        assert_eq!(GridSize::new(15).total_cells(), 225);
    }

    #[test]
    fn tick_interval_is_clamped() {
        assert_eq!(
            tick_interval_from_ms(1),
            Duration::from_millis(MIN_TICK_INTERVAL_MS)
        );
        assert_eq!(tick_interval_from_ms(150), Duration::from_millis(150));
    }
}
