//! Frame-driven playback of an [`ActionList`].
//!
//! The entry point is [`Interpreter`]. Create one per run with the parsed actions,
//! then call [`Interpreter::tick`] once per rendered frame with the host's current
//! time. Every tick reports its effects as [`BoardEvent`]s on the given [`Surface`];
//! a single tick may finish one action and start (or, for pen changes and
//! annotations, fully play) several more.

use crate::action::{ActionList, TurtleOp};
use crate::error::ConfigError;
use crate::schedule::Generation;
use crate::surface::{Annotation, AnnotationId, BoardEvent, Segment, Surface};
use crate::turtle::{DEFAULT_PEN_WIDTH, Pen, Pose, WalkCycle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A point on the host clock, measured from an arbitrary fixed epoch.
pub type Timestamp = Duration;

/// Configuration for playback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Pixels per grid step. Usually derived from the board size, see
    /// [`BoardGeometry`](crate::board::BoardGeometry).
    pub step_size: f32,
    /// Time to walk one grid step or to perform one turn of any angle.
    pub step_duration: Duration,
    /// Pause between the start of a run and its first action.
    pub start_delay: Duration,
    /// How long a speech bubble stays on the board.
    pub annotation_ttl: Duration,
    /// Pen width before the program sets one.
    pub pen_width: f32,
    pub walk: WalkCycle,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            step_size: 20.0,
            step_duration: Duration::from_millis(500),
            start_delay: Duration::from_millis(500),
            annotation_ttl: Duration::from_secs(5),
            pen_width: DEFAULT_PEN_WIDTH,
            walk: WalkCycle::default(),
        }
    }
}

impl InterpreterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ConfigError::StepSize(self.step_size));
        }
        if self.step_duration.is_zero() {
            return Err(ConfigError::StepDuration);
        }
        if !(self.walk.frame_distance.is_finite() && self.walk.frame_distance > 0.0) {
            return Err(ConfigError::WalkFrameDistance(self.walk.frame_distance));
        }
        if self.walk.frames == 0 {
            return Err(ConfigError::WalkFrames);
        }
        if !(self.pen_width.is_finite() && self.pen_width >= 0.0) {
            return Err(ConfigError::PenWidth(self.pen_width));
        }
        Ok(())
    }

    /// Walking time for `steps` grid steps. Saturates instead of overflowing.
    fn walk_duration(&self, steps: f32) -> Duration {
        let secs = self.step_duration.as_secs_f64() * f64::from(steps);
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// A pose pinned to a moment in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: Timestamp,
    pub pose: Pose,
}

/// Mutable playback state of one run.
#[derive(Clone, Debug)]
pub struct InterpreterState {
    pub actions: ActionList,
    /// Index of the action being played. `None` until the first one starts.
    pub step: Option<usize>,
    pub pose: Pose,
    pub pen: Pen,
    pub sub_step_start: Keyframe,
    pub sub_step_target: Keyframe,
    /// Distance between the start and target of the current sub-step, in pixels.
    pub target_distance: f32,
    /// Held fast-forward: every tick completes the current sub-step.
    pub accelerate_continuous: bool,
    /// One-shot fast-forward, cleared as soon as the next step is scheduled.
    pub accelerate_momentary: bool,
}

impl InterpreterState {
    fn new(actions: ActionList, pen_width: f32) -> Self {
        Self {
            actions,
            step: None,
            pose: Pose::ORIGIN,
            pen: Pen {
                color: String::new(),
                width: pen_width,
            },
            sub_step_start: Keyframe::default(),
            sub_step_target: Keyframe::default(),
            target_distance: 0.0,
            accelerate_continuous: false,
            accelerate_momentary: false,
        }
    }

    /// Step index with `-1` meaning "not started" and `len` meaning "finished".
    pub fn step_index(&self) -> isize {
        self.step.map_or(-1, |i| i as isize)
    }

    pub fn is_accelerating(&self) -> bool {
        self.accelerate_continuous || self.accelerate_momentary
    }

    /// Progress through the current sub-step, clamped to `[0, 1]`.
    pub fn fraction(&self, now: Timestamp) -> f32 {
        let total = self
            .sub_step_target
            .time
            .saturating_sub(self.sub_step_start.time);
        if total.is_zero() {
            return 1.0;
        }
        let passed = now.saturating_sub(self.sub_step_start.time);
        (passed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0) as f32
    }
}

/// Plays one [`ActionList`] frame by frame.
///
/// Speech bubbles are announced with [`BoardEvent::AnnotationShown`]; removing them
/// after their TTL is up to the owner of the run, which outlives it. See
/// [`Player`](crate::player::Player).
pub struct Interpreter {
    state: InterpreterState,
    config: InterpreterConfig,
    generation: Generation,
    next_annotation: u32,
    /// Sprite frame chosen by the last move.
    frame: usize,
    started: bool,
    finished: bool,
}

impl Interpreter {
    /// Creates an interpreter over `actions` with the default configuration.
    pub fn new(actions: ActionList) -> Self {
        Self::configured(actions, InterpreterConfig::default())
    }

    /// Creates an interpreter with a custom configuration, rejecting invalid ones.
    pub fn with_config(actions: ActionList, config: InterpreterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::configured(actions, config))
    }

    /// Callers guarantee `config` has been validated.
    pub(crate) fn configured(actions: ActionList, config: InterpreterConfig) -> Self {
        let frame = config.walk.rest_frame();
        Self {
            state: InterpreterState::new(actions, config.pen_width),
            config,
            generation: Generation::default(),
            next_annotation: 0,
            frame,
            started: false,
            finished: false,
        }
    }

    /// Tags the run with a generation (builder pattern). Annotation ids carry it.
    pub fn with_generation(mut self, generation: Generation) -> Self {
        self.generation = generation;
        self
    }

    pub fn state(&self) -> &InterpreterState {
        &self.state
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn step_index(&self) -> isize {
        self.state.step_index()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Engages or releases the held fast-forward.
    pub fn set_continuous_acceleration(&mut self, on: bool) {
        self.state.accelerate_continuous = on;
    }

    /// Fast-forwards up to and including the scheduling of the next step.
    ///
    /// Turns, pen changes and bubbles on the way are skipped as well; the step that
    /// is scheduled while this is active plays at normal speed.
    pub fn accelerate_momentarily(&mut self) {
        self.state.accelerate_momentary = true;
    }

    /// Advances playback to `now`, reporting the effects to `surface`.
    ///
    /// Timestamps must not go backwards. Once the run has finished this is a no-op.
    /// Otherwise the tick reports exactly one [`BoardEvent::PoseUpdated`], after any
    /// segments and bubbles it produced (an empty list only reports `Finished`).
    pub fn tick<S: Surface + ?Sized>(&mut self, now: Timestamp, surface: &mut S) {
        if self.finished {
            return;
        }
        if !self.started {
            self.start(now);
            if self.state.actions.is_empty() {
                self.finish(surface);
                return;
            }
        }

        loop {
            if now < self.state.sub_step_target.time && !self.state.is_accelerating() {
                let fraction = self.state.fraction(now);
                self.move_to(fraction, surface);
                break;
            }

            self.move_to(1.0, surface);

            let next = self.state.step.map_or(0, |i| i + 1);
            self.state.step = Some(next);

            let Some(op) = self.state.actions.get(next).map(|a| a.op.clone()) else {
                self.report_pose(surface);
                self.finish(surface);
                return;
            };

            if self.begin(&op, now, surface) {
                self.move_to(0.0, surface);
                break;
            }
        }
        self.report_pose(surface);
    }

    fn start(&mut self, now: Timestamp) {
        tracing::debug!(
            generation = self.generation.0,
            actions = self.state.actions.len(),
            "animation started"
        );
        self.started = true;
        self.state.pose = Pose::ORIGIN;
        self.state.pen = Pen {
            color: String::new(),
            width: self.config.pen_width,
        };
        self.state.sub_step_start = Keyframe {
            time: now,
            pose: Pose::ORIGIN,
        };
        self.state.sub_step_target = Keyframe {
            time: now.saturating_add(self.config.start_delay),
            pose: Pose::ORIGIN,
        };
        self.state.target_distance = 0.0;
    }

    fn finish<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        tracing::debug!(generation = self.generation.0, "animation finished");
        self.state.step = Some(self.state.actions.len());
        self.finished = true;
        surface.emit(BoardEvent::Finished);
    }

    /// Sets up the sub-step for `op`. Returns whether it takes time to play.
    fn begin<S: Surface + ?Sized>(&mut self, op: &TurtleOp, now: Timestamp, surface: &mut S) -> bool {
        let from = self.state.pose;
        let (duration, to) = match op {
            TurtleOp::Step(n) => {
                // Momentary fast-forward ends with the first step it reaches.
                self.state.accelerate_momentary = false;
                let distance = (self.config.step_size * n).min(f32::MAX);
                (
                    self.config.walk_duration(*n),
                    from.advanced(distance).saturated(),
                )
            }
            // Surface rotation is clockwise, so left is negative.
            TurtleOp::TurnLeft(n) => (self.config.step_duration, from.turned(-n).saturated()),
            TurtleOp::TurnRight(n) => (self.config.step_duration, from.turned(*n).saturated()),
            TurtleOp::SetColor(color) => {
                self.state.pen.color.clone_from(color);
                (Duration::ZERO, from)
            }
            TurtleOp::SetWidth(width) => {
                self.state.pen.width = *width;
                (Duration::ZERO, from)
            }
            TurtleOp::Say(text) => {
                self.say(text, surface);
                (Duration::ZERO, from)
            }
        };

        self.state.sub_step_start = Keyframe {
            time: now,
            pose: from,
        };
        self.state.sub_step_target = Keyframe {
            time: now.saturating_add(duration),
            pose: to,
        };
        self.state.target_distance = from.distance(&to);

        tracing::trace!(step = ?self.state.step, ?op, ?duration, "scheduled action");
        op.is_timed()
    }

    fn say<S: Surface + ?Sized>(&mut self, text: &str, surface: &mut S) {
        let id = AnnotationId {
            generation: self.generation,
            seq: self.next_annotation,
        };
        self.next_annotation += 1;
        surface.emit(BoardEvent::AnnotationShown(Annotation {
            id,
            position: self.state.pose.position,
            text: text.to_owned(),
            ttl: self.config.annotation_ttl,
        }));
    }

    /// Moves the turtle to `fraction` of the current sub-step, drawing the trail
    /// behind it while the pen is down. The new pose is reported by `report_pose`.
    fn move_to<S: Surface + ?Sized>(&mut self, fraction: f32, surface: &mut S) {
        let start = self.state.sub_step_start.pose;
        let target = self.state.sub_step_target.pose;
        let pose = if fraction >= 1.0 {
            target
        } else {
            start.lerp(&target, fraction)
        };

        let previous = std::mem::replace(&mut self.state.pose, pose);
        if self.state.pen.is_down() && previous.position != pose.position {
            surface.emit(BoardEvent::SegmentDrawn(Segment {
                from: previous.position,
                to: pose.position,
                color: self.state.pen.color.clone(),
                width: self.state.pen.width,
            }));
        }

        self.frame = self.config.walk.frame(self.state.target_distance * fraction);
    }

    fn report_pose<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.emit(BoardEvent::PoseUpdated {
            pose: self.state.pose,
            frame: self.frame,
        });
    }
}
