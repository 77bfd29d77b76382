//! Engine configuration: rate gates, coefficient modes and basal constants.

use crate::curve::PiecewiseLinear;
use crate::error::MetabolicsResult;
use mf_core::numeric::{Real, ensure_finite};
use serde::{Deserialize, Serialize};

/// Independent on/off switches for each term of the metabolic rate.
///
/// A disabled term contributes exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateGates {
    pub activation: bool,
    pub maintenance: bool,
    pub shortening: bool,
    pub basal: bool,
    pub mechanical_work: bool,
}

impl RateGates {
    pub fn all_on() -> Self {
        Self {
            activation: true,
            maintenance: true,
            shortening: true,
            basal: true,
            mechanical_work: true,
        }
    }

    pub fn all_off() -> Self {
        Self {
            activation: false,
            maintenance: false,
            shortening: false,
            basal: false,
            mechanical_work: false,
        }
    }
}

impl Default for RateGates {
    fn default() -> Self {
        Self::all_on()
    }
}

/// How the shortening heat proportionality constant `alpha` is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShorteningConstant {
    /// `alpha = 0.25` for `v >= 0`, `0` for `v < 0`.
    #[default]
    Constant,
    /// `alpha = 0.16 F_iso + 0.18 F` for `v >= 0`, `0.157 F` for `v < 0`.
    ForceDependent,
}

impl ShorteningConstant {
    pub fn from_force_dependent_flag(force_dependent: bool) -> Self {
        if force_dependent {
            Self::ForceDependent
        } else {
            Self::Constant
        }
    }

    pub fn is_force_dependent(self) -> bool {
        matches!(self, Self::ForceDependent)
    }
}

/// Channels a probe reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportMode {
    /// One channel: whole-body rate including the basal term.
    #[default]
    Total,
    /// One channel per muscle, in parameter table order.
    PerMuscle,
}

/// Configuration of a metabolic probe. Immutable once the probe exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub gates: RateGates,
    pub shortening_constant: ShorteningConstant,
    pub normalize_mechanical_work_by_mass: bool,
    pub basal_coefficient: Real,
    pub basal_exponent: Real,
    /// Scale on the maintenance rate as a function of normalized fiber length.
    pub maintenance_curve: PiecewiseLinear,
    pub report_mode: ReportMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gates: RateGates::default(),
            shortening_constant: ShorteningConstant::default(),
            normalize_mechanical_work_by_mass: false,
            basal_coefficient: 1.51,
            basal_exponent: 1.0,
            maintenance_curve: PiecewiseLinear::default(),
            report_mode: ReportMode::default(),
        }
    }
}

impl EngineConfig {
    /// Default configuration with the five gates set explicitly.
    pub fn with_gates(
        activation: bool,
        maintenance: bool,
        shortening: bool,
        basal: bool,
        mechanical_work: bool,
    ) -> Self {
        Self {
            gates: RateGates {
                activation,
                maintenance,
                shortening,
                basal,
                mechanical_work,
            },
            ..Self::default()
        }
    }

    pub fn shortening_constant(mut self, mode: ShorteningConstant) -> Self {
        self.shortening_constant = mode;
        self
    }

    pub fn normalize_mechanical_work_by_mass(mut self, normalize: bool) -> Self {
        self.normalize_mechanical_work_by_mass = normalize;
        self
    }

    pub fn basal(mut self, coefficient: Real, exponent: Real) -> Self {
        self.basal_coefficient = coefficient;
        self.basal_exponent = exponent;
        self
    }

    pub fn maintenance_curve(mut self, curve: PiecewiseLinear) -> Self {
        self.maintenance_curve = curve;
        self
    }

    pub fn report_mode(mut self, mode: ReportMode) -> Self {
        self.report_mode = mode;
        self
    }

    /// Check the scalar settings. The curve validates itself on construction.
    pub fn validate(&self) -> MetabolicsResult<()> {
        ensure_finite(self.basal_coefficient, "basal_coefficient")?;
        ensure_finite(self.basal_exponent, "basal_exponent")?;
        Ok(())
    }
}
