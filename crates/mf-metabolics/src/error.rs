//! Error types for metabolic probe configuration, attachment and evaluation.

use mf_core::MfError;
use thiserror::Error;

/// Result type for metabolic probe operations.
pub type MetabolicsResult<T> = Result<T, MetabolicsError>;

/// Errors surfaced by the metabolic engine.
///
/// Everything except `NotReady` is raised before the first evaluation: while
/// building the configuration or while attaching to a model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetabolicsError {
    /// A configuration value is out of range or malformed.
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    /// A parameter entry names a muscle the model does not have.
    #[error("Unknown muscle: '{name}' is not a muscle in the model")]
    UnknownMuscle { name: String },

    /// Two parameter entries refer to the same muscle.
    #[error("Duplicate muscle: '{name}' is referenced by more than one parameter entry")]
    DuplicateMuscle { name: String },

    /// Evaluation was requested before the probe was attached to a model.
    #[error("Probe '{probe}' has not been attached to a model")]
    NotReady { probe: String },

    /// The probe was already attached; attachment happens once.
    #[error("Probe '{probe}' is already attached to a model")]
    AlreadyAttached { probe: String },
}

impl MetabolicsError {
    pub(crate) fn configuration(what: impl Into<String>) -> Self {
        Self::Configuration { what: what.into() }
    }
}

impl From<MfError> for MetabolicsError {
    fn from(e: MfError) -> Self {
        Self::Configuration {
            what: e.to_string(),
        }
    }
}
