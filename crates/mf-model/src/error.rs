//! Error types for host model construction.

use mf_core::MfError;
use thiserror::Error;

/// Errors raised while building a model or a state for it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Duplicate muscle name: '{name}'")]
    DuplicateMuscle { name: String },

    #[error("State does not match model: expected {expected} muscle states, got {actual}")]
    StateShape { expected: usize, actual: usize },

    #[error("Too many muscles in model: {count}")]
    Capacity { count: usize },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid value: {0}")]
    Value(#[from] MfError),
}

pub type ModelResult<T> = Result<T, ModelError>;
