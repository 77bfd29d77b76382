//! Operations applied to probe channel values over time.
//!
//! The probe itself is stateless; anything that needs history (integrals,
//! running extrema) lives in a [`ProbeReducer`] owned by the caller and fed
//! one `(time, values)` sample per evaluation.

use crate::error::{MetabolicsError, MetabolicsResult};
use mf_core::numeric::Real;
use serde::{Deserialize, Serialize};

/// Operation applied to the probe inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOperation {
    /// Report the current value.
    #[default]
    Value,
    /// Time integral, trapezoid rule. For metabolic rates this is energy (J).
    Integrate,
    Minimum,
    Maximum,
    /// Value of smallest magnitude, sign kept.
    MinAbs,
    /// Value of largest magnitude, sign kept.
    MaxAbs,
}

impl ProbeOperation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Integrate => "integrate",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::MinAbs => "minabs",
            Self::MaxAbs => "maxabs",
        }
    }

    /// Suffix added to channel labels. Empty for `Value`.
    pub fn label_suffix(self) -> &'static str {
        match self {
            Self::Value => "",
            Self::Integrate => "_INTEGRAL",
            Self::Minimum => "_MINIMUM",
            Self::Maximum => "_MAXIMUM",
            Self::MinAbs => "_MINABS",
            Self::MaxAbs => "_MAXABS",
        }
    }
}

/// Folds successive probe samples according to a [`ProbeOperation`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReducer {
    operation: ProbeOperation,
    initial: Vec<Real>,
    last: Option<(Real, Vec<Real>)>,
    acc: Vec<Real>,
}

impl ProbeReducer {
    /// Reducer for `channels` channels. Integrals start at zero.
    pub fn new(operation: ProbeOperation, channels: usize) -> Self {
        Self {
            operation,
            initial: vec![0.0; channels],
            last: None,
            acc: Vec::new(),
        }
    }

    /// Set the starting values of the integrals.
    ///
    /// # Errors
    /// The length must match the channel count and values must be finite.
    pub fn with_initial_conditions(mut self, initial: Vec<Real>) -> MetabolicsResult<Self> {
        if initial.len() != self.initial.len() {
            return Err(MetabolicsError::configuration(format!(
                "expected {} initial conditions, got {}",
                self.initial.len(),
                initial.len()
            )));
        }
        if initial.iter().any(|v| !v.is_finite()) {
            return Err(MetabolicsError::configuration(
                "initial conditions must be finite",
            ));
        }
        self.initial = initial;
        Ok(self)
    }

    pub fn operation(&self) -> ProbeOperation {
        self.operation
    }

    /// Fold in the sample taken at time `t`.
    ///
    /// # Errors
    /// Samples must have one value per channel and arrive in non-decreasing
    /// time order.
    pub fn push(&mut self, t: Real, values: &[Real]) -> MetabolicsResult<()> {
        if values.len() != self.initial.len() {
            return Err(MetabolicsError::configuration(format!(
                "expected {} probe values, got {}",
                self.initial.len(),
                values.len()
            )));
        }

        match &self.last {
            None => {
                self.acc = match self.operation {
                    ProbeOperation::Integrate => self.initial.clone(),
                    _ => values.to_vec(),
                };
            }
            Some((t_prev, prev)) => {
                if t < *t_prev {
                    return Err(MetabolicsError::configuration(format!(
                        "probe samples out of order: t={t} after t={t_prev}"
                    )));
                }
                let dt = t - t_prev;
                for (i, acc) in self.acc.iter_mut().enumerate() {
                    let v = values[i];
                    *acc = match self.operation {
                        ProbeOperation::Value => v,
                        ProbeOperation::Integrate => *acc + 0.5 * (prev[i] + v) * dt,
                        ProbeOperation::Minimum => acc.min(v),
                        ProbeOperation::Maximum => acc.max(v),
                        ProbeOperation::MinAbs => {
                            if v.abs() < acc.abs() {
                                v
                            } else {
                                *acc
                            }
                        }
                        ProbeOperation::MaxAbs => {
                            if v.abs() > acc.abs() {
                                v
                            } else {
                                *acc
                            }
                        }
                    };
                }
            }
        }

        self.last = Some((t, values.to_vec()));
        Ok(())
    }

    /// Current result per channel. Before the first sample this is the
    /// initial conditions for `Integrate` and empty otherwise.
    pub fn result(&self) -> Vec<Real> {
        if self.last.is_none() {
            return match self.operation {
                ProbeOperation::Integrate => self.initial.clone(),
                _ => Vec::new(),
            };
        }
        self.acc.clone()
    }
}
