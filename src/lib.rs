//! # turtle-board
//!
//! Turtle graphics recovered from program console output.
//!
//! A program prints `draw mode` followed by commands such as `forward 2`, `right`,
//! `color red` or `say hi`. [`parse`] turns that output into an [`ActionList`], and an
//! [`Interpreter`] plays the list back frame by frame, emitting [`BoardEvent`]s to a
//! [`Surface`] owned by the host. A [`Player`] owns the active run, replaces it when a
//! new program finishes, and takes care of the delayed annotation removals.

pub mod action;
pub mod board;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod player;
pub mod schedule;
pub mod surface;
pub mod turtle;

pub use action::*;
pub use board::*;
pub use error::*;
pub use interpreter::*;
pub use parser::*;
pub use player::*;
pub use schedule::*;
pub use surface::*;
pub use turtle::*;
