//! Command pipeline
//!
//! Prompt text -> classify -> Intent -> Interpreter -> CommandOutcome

pub mod intent;
pub mod interpreter;

pub use intent::{classify, Intent};
pub use interpreter::{CommandOutcome, Interpreter, OutcomeKind};
