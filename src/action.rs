//! Parsed turtle instructions.

use serde::{Deserialize, Serialize};

/// Operations that can be performed by the turtle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    // --- Movement ---
    /// Walk forward by the given number of grid steps (`forward N`).
    Step(f32),
    /// Rotate counter-clockwise by the given degrees (`left N`).
    TurnLeft(f32),
    /// Rotate clockwise by the given degrees (`right N`).
    TurnRight(f32),

    // --- Pen ---
    /// Set the stroke color. An empty string lifts the pen (`color off`).
    SetColor(String),
    /// Set the stroke width in pixels (`width N`).
    SetWidth(f32),

    // --- Annotations ---
    /// Show a transient speech bubble at the current position (`say ...`).
    Say(String),
}

/// Discriminant of a [`TurtleOp`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Step,
    TurnLeft,
    TurnRight,
    SetColor,
    SetWidth,
    Say,
}

impl TurtleOp {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Step(_) => ActionKind::Step,
            Self::TurnLeft(_) => ActionKind::TurnLeft,
            Self::TurnRight(_) => ActionKind::TurnRight,
            Self::SetColor(_) => ActionKind::SetColor,
            Self::SetWidth(_) => ActionKind::SetWidth,
            Self::Say(_) => ActionKind::Say,
        }
    }

    /// Whether the operation consumes a time slice when played back.
    ///
    /// Pen changes and annotations complete within the tick that reaches them.
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Step(_) | Self::TurnLeft(_) | Self::TurnRight(_))
    }
}

/// A single instruction recovered from one line of console output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub op: TurtleOp,

    /// The trimmed line the instruction was parsed from. Kept for diagnostics only.
    pub source_line: String,
}

impl Action {
    pub fn new(op: TurtleOp, source_line: impl Into<String>) -> Self {
        Self {
            op,
            source_line: source_line.into(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.op.kind()
    }

    /// Distance in grid steps, angle in degrees or width in pixels, depending on the kind.
    /// Zero for text-carrying operations.
    pub fn numeric_value(&self) -> f32 {
        match self.op {
            TurtleOp::Step(n)
            | TurtleOp::TurnLeft(n)
            | TurtleOp::TurnRight(n)
            | TurtleOp::SetWidth(n) => n,
            TurtleOp::SetColor(_) | TurtleOp::Say(_) => 0.0,
        }
    }

    /// Color spec or message. Empty for numeric operations.
    pub fn text_value(&self) -> &str {
        match &self.op {
            TurtleOp::SetColor(s) | TurtleOp::Say(s) => s,
            _ => "",
        }
    }
}

/// An ordered, immutable sequence of [`Action`]s produced by one parse.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionList {
    actions: Vec<Action>,
}

impl ActionList {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Returns the operations in order, dropping the source lines.
    pub fn ops(&self) -> Vec<TurtleOp> {
        self.actions.iter().map(|a| a.op.clone()).collect()
    }
}

impl FromIterator<Action> for ActionList {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ActionList {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

impl IntoIterator for ActionList {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

/// Whether the output contained any turtle commands at all.
///
/// Hosts use this to decide whether to switch into the animation view.
pub fn has_drawable_actions(actions: &ActionList) -> bool {
    !actions.is_empty()
}
