//! Muscle records exchanged with the host model.

use crate::error::ModelResult;
use mf_core::numeric::{Real, ensure_finite, ensure_positive};
use mf_core::units::{Force, Length, m, n};

/// Fixed architecture of a Hill-type muscle.
///
/// Only the quantities needed to estimate muscle mass are kept here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuscleArchitecture {
    /// Maximum isometric force (N).
    pub max_isometric_force_n: Real,
    /// Optimal fiber length (m).
    pub optimal_fiber_length_m: Real,
}

impl MuscleArchitecture {
    /// Create a muscle architecture.
    ///
    /// # Errors
    /// Both values must be finite and positive.
    pub fn new(max_isometric_force_n: Real, optimal_fiber_length_m: Real) -> ModelResult<Self> {
        ensure_positive(max_isometric_force_n, "max_isometric_force_n")?;
        ensure_positive(optimal_fiber_length_m, "optimal_fiber_length_m")?;
        Ok(Self {
            max_isometric_force_n,
            optimal_fiber_length_m,
        })
    }

    pub fn max_isometric_force(&self) -> Force {
        n(self.max_isometric_force_n)
    }

    pub fn optimal_fiber_length(&self) -> Length {
        m(self.optimal_fiber_length_m)
    }
}

/// Snapshot of one muscle at one instant.
///
/// Sign convention: positive fiber velocity is lengthening (eccentric),
/// negative is shortening (concentric).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuscleState {
    /// Neural excitation, nominally in [0, 1].
    pub excitation: Real,
    /// Fiber velocity (m/s).
    pub fiber_velocity_mps: Real,
    /// Force developed by the contractile element (N).
    pub active_fiber_force_n: Real,
    /// Contractile element force under isometric conditions at the current
    /// activation and fiber length (N).
    pub isometric_fiber_force_n: Real,
    /// Fiber length divided by optimal fiber length.
    pub normalized_fiber_length: Real,
}

impl Default for MuscleState {
    fn default() -> Self {
        Self {
            excitation: 0.0,
            fiber_velocity_mps: 0.0,
            active_fiber_force_n: 0.0,
            isometric_fiber_force_n: 0.0,
            normalized_fiber_length: 1.0,
        }
    }
}

impl MuscleState {
    /// Reject non-finite entries. Range is not checked.
    pub fn check_finite(&self) -> ModelResult<()> {
        ensure_finite(self.excitation, "excitation")?;
        ensure_finite(self.fiber_velocity_mps, "fiber_velocity_mps")?;
        ensure_finite(self.active_fiber_force_n, "active_fiber_force_n")?;
        ensure_finite(self.isometric_fiber_force_n, "isometric_fiber_force_n")?;
        ensure_finite(self.normalized_fiber_length, "normalized_fiber_length")?;
        Ok(())
    }
}
