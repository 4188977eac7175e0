//! Board scale and grid derived from the size of the rendering surface.

use crate::error::ConfigError;
use crate::interpreter::InterpreterConfig;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Grid cells visible in each direction from the board center, measured along the
/// shorter side of the surface.
pub const STEPS_IN_EACH_DIRECTION: u32 = 15;

/// Every n-th grid line is emphasized.
pub const MAJOR_LINE_EVERY: i32 = 5;

/// How prominently a grid line is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridLineKind {
    Minor,
    Major,
    /// The axis through the board center.
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub from: Vec2,
    pub to: Vec2,
    pub kind: GridLineKind,
}

/// Dimensions of the board in surface pixels and the resulting grid step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub width: f32,
    pub height: f32,
    /// Pixels per grid step.
    pub step_size: f32,
}

impl BoardGeometry {
    /// Scales the grid so that [`STEPS_IN_EACH_DIRECTION`] cells, plus half a cell of
    /// margin, fit on each side of the center.
    pub fn fit(width: f32, height: f32) -> Result<Self, ConfigError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !(valid(width) && valid(height)) {
            return Err(ConfigError::BoardSize { width, height });
        }
        let cells = (STEPS_IN_EACH_DIRECTION * 2 + 1) as f32;
        Ok(Self {
            width,
            height,
            step_size: width.min(height) / cells,
        })
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) / 2.0
    }

    /// Converts a board point (origin at the center) to surface coordinates.
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        self.center() + point
    }

    /// Copies the grid step into a playback configuration.
    pub fn apply(&self, config: &mut InterpreterConfig) {
        config.step_size = self.step_size;
    }

    /// Vertical lines first, left to right, then horizontal lines, top to bottom.
    pub fn grid_lines(&self) -> Vec<GridLine> {
        let center = self.center();
        let nx = (center.x / self.step_size) as i32 + 1;
        let ny = (center.y / self.step_size) as i32 + 1;

        let vertical = (-nx..=nx).map(|i| {
            let x = center.x + i as f32 * self.step_size;
            GridLine {
                from: Vec2::new(x, 0.0),
                to: Vec2::new(x, self.height),
                kind: line_kind(i),
            }
        });
        let horizontal = (-ny..=ny).map(|i| {
            let y = center.y + i as f32 * self.step_size;
            GridLine {
                from: Vec2::new(0.0, y),
                to: Vec2::new(self.width, y),
                kind: line_kind(i),
            }
        });
        vertical.chain(horizontal).collect()
    }
}

fn line_kind(index: i32) -> GridLineKind {
    if index == 0 {
        GridLineKind::Center
    } else if index % MAJOR_LINE_EVERY == 0 {
        GridLineKind::Major
    } else {
        GridLineKind::Minor
    }
}
