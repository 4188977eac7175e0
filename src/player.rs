//! Host-side owner of the active animation run.
//!
//! A [`Player`] holds at most one [`Interpreter`] at a time. Starting a new run
//! replaces the previous one wholesale: the generation is bumped, the old run's
//! pending callbacks are cancelled and its bubbles are taken off the board.

use crate::action::ActionList;
use crate::error::ConfigError;
use crate::interpreter::{Interpreter, InterpreterConfig, Timestamp};
use crate::schedule::{Generation, Scheduler, Token};
use crate::surface::{AnnotationId, BoardEvent, Surface};

/// The two fast-forward controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Fast-forwards for as long as it is held (shift).
    Continuous,
    /// Skips to the next step each time it is pressed (tab).
    Momentary,
}

/// Work deferred to a later frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Callback {
    HideAnnotation(AnnotationId),
}

/// Drives animation runs from the host's frame loop.
pub struct Player {
    config: InterpreterConfig,
    generation: Generation,
    run: Option<Interpreter>,
    scheduler: Scheduler<Callback>,
    continuous_held: bool,
    momentary_held: bool,
}

impl Player {
    pub fn new(config: InterpreterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            generation: Generation::default(),
            run: None,
            scheduler: Scheduler::new(),
            continuous_held: false,
            momentary_held: false,
        })
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Replaces the configuration used by subsequent runs.
    pub fn set_config(&mut self, config: InterpreterConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn run(&self) -> Option<&Interpreter> {
        self.run.as_ref()
    }

    /// Whether a run exists and has not played its last action yet.
    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|r| !r.is_finished())
    }

    pub fn is_finished(&self) -> bool {
        self.run.as_ref().is_some_and(Interpreter::is_finished)
    }

    /// Number of delayed callbacks still waiting to fire.
    pub fn pending_callbacks(&self) -> usize {
        self.scheduler.len()
    }

    /// Starts playing `actions`, replacing any previous run.
    ///
    /// Playback begins on the next [`frame`](Self::frame). Returns the generation of
    /// the new run.
    pub fn start<S: Surface + ?Sized>(&mut self, actions: ActionList, surface: &mut S) -> Generation {
        self.retire(surface);

        let mut run = Interpreter::configured(actions, self.config.clone())
            .with_generation(self.generation);
        run.set_continuous_acceleration(self.continuous_held);
        self.run = Some(run);

        tracing::debug!(generation = self.generation.0, "run replaced");
        self.generation
    }

    /// Ends the current run, if any, and clears its bubbles. Used when the host view
    /// is torn down.
    pub fn stop<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.retire(surface);
    }

    /// Advances the active run and fires due callbacks. Call once per frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, now: Timestamp, surface: &mut S) {
        if let Some(run) = self.run.as_mut() {
            let mut relay = Relay {
                surface: &mut *surface,
                scheduler: &mut self.scheduler,
                token: Token::new(self.generation),
                now,
            };
            run.tick(now, &mut relay);
        }

        while let Some((token, callback)) = self.scheduler.pop_due(now) {
            if !token.is_current(self.generation) {
                tracing::trace!(?callback, "dropping stale callback");
                continue;
            }
            match callback {
                Callback::HideAnnotation(id) => surface.emit(BoardEvent::AnnotationHidden(id)),
            }
        }
    }

    pub fn engage(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Continuous => {
                self.continuous_held = true;
                if let Some(run) = self.run.as_mut() {
                    run.set_continuous_acceleration(true);
                }
            }
            Modifier::Momentary => {
                // Auto-repeat while held does not skip further.
                if self.momentary_held {
                    return;
                }
                self.momentary_held = true;
                if let Some(run) = self.run.as_mut() {
                    run.accelerate_momentarily();
                }
            }
        }
    }

    pub fn release(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Continuous => {
                self.continuous_held = false;
                if let Some(run) = self.run.as_mut() {
                    run.set_continuous_acceleration(false);
                }
            }
            Modifier::Momentary => self.momentary_held = false,
        }
    }

    /// Drops the current run and invalidates everything it scheduled.
    fn retire<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for callback in self.scheduler.cancel(|_| true) {
            match callback {
                Callback::HideAnnotation(id) => surface.emit(BoardEvent::AnnotationHidden(id)),
            }
        }
        self.run = None;
        self.generation = self.generation.next();
    }
}

/// Forwards events to the host surface and schedules the removal of every bubble
/// the run shows.
struct Relay<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    scheduler: &'a mut Scheduler<Callback>,
    token: Token,
    now: Timestamp,
}

impl<S: Surface + ?Sized> Surface for Relay<'_, S> {
    fn emit(&mut self, event: BoardEvent) {
        if let BoardEvent::AnnotationShown(annotation) = &event {
            self.scheduler.schedule(
                self.now.saturating_add(annotation.ttl),
                self.token,
                Callback::HideAnnotation(annotation.id),
            );
        }
        self.surface.emit(event);
    }
}
