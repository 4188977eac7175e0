//! Turtle pose, pen state and the geometry used during playback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stroke width used until the program sets one.
pub const DEFAULT_PEN_WIDTH: f32 = 2.0;

/// Position and heading of the turtle.
///
/// Coordinates are pixels relative to the board center with `y` growing downward,
/// matching the rendering surface. The heading is in degrees, measured clockwise
/// with 0 pointing up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    pub heading: f32,
}

impl Pose {
    /// Board center, facing up.
    pub const ORIGIN: Self = Self {
        position: Vec2::ZERO,
        heading: 0.0,
    };

    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            heading,
        }
    }

    /// Unit vector the turtle is facing, in surface coordinates.
    pub fn direction(&self) -> Vec2 {
        let rad = (self.heading - 90.0).to_radians();
        Vec2::new(rad.cos(), rad.sin())
    }

    /// The pose reached by walking `distance` pixels along the current heading.
    pub fn advanced(&self, distance: f32) -> Self {
        Self {
            position: self.position + self.direction() * distance,
            heading: self.heading,
        }
    }

    /// The pose after rotating clockwise by `degrees` (negative turns left).
    pub fn turned(&self, degrees: f32) -> Self {
        Self {
            position: self.position,
            heading: self.heading + degrees,
        }
    }

    /// Component-wise linear interpolation towards `target`.
    ///
    /// The heading is interpolated as a plain number, so a 270 degree turn sweeps the
    /// long way round exactly as requested. Weighted rather than `a + (b - a) * t`,
    /// so two finite poses never blend into an infinite one.
    pub fn lerp(&self, target: &Self, t: f32) -> Self {
        let keep = 1.0 - t;
        Self {
            position: self.position * keep + target.position * t,
            heading: self.heading * keep + target.heading * t,
        }
    }

    /// Distance between positions, capped at `f32::MAX`.
    pub fn distance(&self, other: &Self) -> f32 {
        self.position.distance(other.position).min(f32::MAX)
    }

    /// Clamps position and heading into the finite `f32` range.
    pub fn saturated(self) -> Self {
        Self {
            position: self
                .position
                .clamp(Vec2::splat(f32::MIN), Vec2::splat(f32::MAX)),
            heading: self.heading.clamp(f32::MIN, f32::MAX),
        }
    }
}

/// Current stroke style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    /// Any color the renderer understands. Empty means the pen is up.
    pub color: String,
    pub width: f32,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: String::new(),
            width: DEFAULT_PEN_WIDTH,
        }
    }
}

impl Pen {
    /// Whether movement leaves a trail.
    pub fn is_down(&self) -> bool {
        !self.color.is_empty()
    }
}

/// Picks the sprite frame of the walking animation.
///
/// Frames are played back and forth (0, 1, 2, 3, 4, 3, 2, 1, 0, ...) instead of
/// cycling, and the sequence is shifted so that the middle frame, the neutral
/// stance, is shown when no distance has been covered (turns, pauses).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkCycle {
    /// Distance in pixels walked between two consecutive frames.
    pub frame_distance: f32,
    /// Number of distinct frames in the sprite sheet.
    pub frames: usize,
}

impl Default for WalkCycle {
    fn default() -> Self {
        Self {
            frame_distance: 2.0,
            frames: 5,
        }
    }
}

impl WalkCycle {
    /// The neutral frame shown while standing or turning.
    pub fn rest_frame(&self) -> usize {
        self.frames.saturating_sub(1) / 2
    }

    /// Frame index for `distance` pixels walked within the current step.
    pub fn frame(&self, distance: f32) -> usize {
        let virtual_frames = self.frames.saturating_mul(2).saturating_sub(1).max(1);
        let walked = (distance / self.frame_distance) as usize % virtual_frames;
        let rest = self.rest_frame() % virtual_frames;
        // (walked + rest) mod virtual_frames, without overflowing
        let frame = if walked >= virtual_frames - rest {
            walked - (virtual_frames - rest)
        } else {
            walked + rest
        };
        if frame + 1 > self.frames {
            virtual_frames - frame
        } else {
            frame
        }
    }
}
