//! Events emitted during playback and the surfaces that consume them.

use crate::schedule::Generation;
use crate::turtle::Pose;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Identifies one speech bubble.
///
/// Ids are unique across runs: the generation of the run that showed the bubble is
/// part of the id, so a removal can never target a bubble of another run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnnotationId {
    pub generation: Generation,
    pub seq: u32,
}

/// A transient text marker shown on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    /// Center of the bubble, relative to the board center.
    pub position: Vec2,
    pub text: String,
    /// How long the bubble stays before an [`BoardEvent::AnnotationHidden`] follows.
    pub ttl: Duration,
}

/// A straight piece of the trail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub color: String,
    pub width: f32,
}

/// Everything a rendering surface needs to know about playback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// The turtle moved or turned. `frame` is the walking sprite index.
    PoseUpdated { pose: Pose, frame: usize },
    /// A trail segment to stroke on top of what is already drawn.
    SegmentDrawn(Segment),
    AnnotationShown(Annotation),
    AnnotationHidden(AnnotationId),
    /// The run played its last action. Delivered exactly once per run; hosts may
    /// still treat it as idempotent.
    Finished,
}

/// A consumer of [`BoardEvent`]s, usually a canvas owned by the host.
pub trait Surface {
    fn emit(&mut self, event: BoardEvent);
}

impl Surface for Vec<BoardEvent> {
    fn emit(&mut self, event: BoardEvent) {
        self.push(event);
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn emit(&mut self, event: BoardEvent) {
        (**self).emit(event);
    }
}

/// A surface that keeps the accumulated picture instead of rendering it.
///
/// Useful for headless hosts and for inspecting the outcome of a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Drawing {
    /// Every trail segment, in drawing order.
    pub trail: Vec<Segment>,

    /// Bubbles currently on the board.
    pub annotations: BTreeMap<AnnotationId, Annotation>,

    /// Most recent pose and sprite frame.
    pub pose: Pose,
    pub frame: usize,

    pub finished: bool,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total trail length in pixels.
    pub fn trail_length(&self) -> f32 {
        self.trail.iter().map(|s| s.from.distance(s.to)).sum()
    }
}

impl Surface for Drawing {
    fn emit(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::PoseUpdated { pose, frame } => {
                self.pose = pose;
                self.frame = frame;
            }
            BoardEvent::SegmentDrawn(segment) => self.trail.push(segment),
            BoardEvent::AnnotationShown(annotation) => {
                self.annotations.insert(annotation.id, annotation);
            }
            BoardEvent::AnnotationHidden(id) => {
                self.annotations.remove(&id);
            }
            BoardEvent::Finished => self.finished = true,
        }
    }
}
