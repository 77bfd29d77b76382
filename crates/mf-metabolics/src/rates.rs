//! Per-muscle heat and work rates (Bhargava et al., 2004).
//!
//! ```text
//! Adot = m * [Adot_slow * r * sin(pi/2 u) + Adot_fast * (1 - r) * (1 - cos(pi/2 u))]
//! Mdot = m * f(l) * [Mdot_slow * r * sin(pi/2 u) + Mdot_fast * (1 - r) * (1 - cos(pi/2 u))]
//! Sdot = -alpha * v
//! Wdot = -F * v            (v >= 0)
//!      = 0                 (v <  0)
//! ```
//!
//! Positive fiber velocity is lengthening. The `v >= 0` branch is used for
//! both shortening and work terms, `v == 0` included. No term is clamped.

use crate::config::{EngineConfig, ShorteningConstant};
use crate::validate::ResolvedMuscle;
use mf_core::numeric::Real;
use mf_core::units::{Power, w};
use mf_model::MusculoskeletalModel;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use uom::si::force::newton;
use uom::si::velocity::meter_per_second;

/// Scalar muscle quantities read from the host for one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuscleSnapshot {
    pub excitation: Real,
    /// m/s, positive when lengthening.
    pub fiber_velocity: Real,
    /// Contractile element force (N).
    pub active_fiber_force: Real,
    /// Isometric contractile element force at current activation and length (N).
    pub isometric_fiber_force: Real,
    pub normalized_fiber_length: Real,
}

impl MuscleSnapshot {
    /// Read the current quantities of `muscle` from the host.
    pub fn capture<M: MusculoskeletalModel>(
        model: &M,
        muscle: &ResolvedMuscle,
        state: &M::State,
    ) -> Self {
        let id = muscle.muscle;
        Self {
            excitation: model.excitation(id, state),
            fiber_velocity: model.fiber_velocity(id, state).get::<meter_per_second>(),
            active_fiber_force: model.active_fiber_force(id, state).get::<newton>(),
            isometric_fiber_force: model.isometric_fiber_force(id, state).get::<newton>(),
            normalized_fiber_length: model.normalized_fiber_length(id, state),
        }
    }
}

/// The four muscle terms of the metabolic rate (W). Gated-off terms are 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerMuscleRates {
    pub activation: Real,
    pub maintenance: Real,
    pub shortening: Real,
    pub mechanical_work: Real,
}

impl PerMuscleRates {
    pub fn total(&self) -> Real {
        self.activation + self.maintenance + self.shortening + self.mechanical_work
    }

    pub fn total_power(&self) -> Power {
        w(self.total())
    }
}

/// Blend of slow- and fast-twitch constants at excitation `u`:
/// `slow * r * sin(pi/2 u) + fast * (1 - r) * (1 - cos(pi/2 u))`.
pub fn fiber_type_blend(slow: Real, fast: Real, slow_twitch_ratio: Real, excitation: Real) -> Real {
    let phase = FRAC_PI_2 * excitation;
    slow * slow_twitch_ratio * phase.sin() + fast * (1.0 - slow_twitch_ratio) * (1.0 - phase.cos())
}

/// Shortening heat proportionality constant `alpha`.
pub fn shortening_alpha(
    mode: ShorteningConstant,
    fiber_velocity: Real,
    active_fiber_force: Real,
    isometric_fiber_force: Real,
) -> Real {
    let concentric_or_isometric = fiber_velocity >= 0.0;
    match (mode, concentric_or_isometric) {
        (ShorteningConstant::ForceDependent, true) => {
            0.16 * isometric_fiber_force + 0.18 * active_fiber_force
        }
        (ShorteningConstant::ForceDependent, false) => 0.157 * active_fiber_force,
        (ShorteningConstant::Constant, true) => 0.25,
        (ShorteningConstant::Constant, false) => 0.0,
    }
}

/// Mechanical work rate before mass normalization.
pub fn mechanical_work_rate(fiber_velocity: Real, active_fiber_force: Real) -> Real {
    if fiber_velocity >= 0.0 {
        -active_fiber_force * fiber_velocity
    } else {
        0.0
    }
}

/// Compute the gated muscle terms from already captured quantities.
pub fn evaluate_snapshot(
    muscle: &ResolvedMuscle,
    snapshot: &MuscleSnapshot,
    config: &EngineConfig,
) -> PerMuscleRates {
    let p = &muscle.parameter;
    let mass = muscle.mass_kg;
    let gates = config.gates;
    let u = snapshot.excitation;
    let v = snapshot.fiber_velocity;

    let activation = if gates.activation {
        mass * fiber_type_blend(
            p.activation_constant_slow,
            p.activation_constant_fast,
            p.slow_twitch_ratio,
            u,
        )
    } else {
        0.0
    };

    let maintenance = if gates.maintenance {
        let length_scale = config
            .maintenance_curve
            .eval(snapshot.normalized_fiber_length);
        mass * length_scale
            * fiber_type_blend(
                p.maintenance_constant_slow,
                p.maintenance_constant_fast,
                p.slow_twitch_ratio,
                u,
            )
    } else {
        0.0
    };

    let shortening = if gates.shortening {
        let alpha = shortening_alpha(
            config.shortening_constant,
            v,
            snapshot.active_fiber_force,
            snapshot.isometric_fiber_force,
        );
        -alpha * v
    } else {
        0.0
    };

    let mechanical_work = if gates.mechanical_work {
        let rate = mechanical_work_rate(v, snapshot.active_fiber_force);
        if config.normalize_mechanical_work_by_mass {
            rate / mass
        } else {
            rate
        }
    } else {
        0.0
    };

    PerMuscleRates {
        activation,
        maintenance,
        shortening,
        mechanical_work,
    }
}

/// Compute the gated muscle terms of `muscle` in `state`.
pub fn evaluate<M: MusculoskeletalModel>(
    model: &M,
    muscle: &ResolvedMuscle,
    state: &M::State,
    config: &EngineConfig,
) -> PerMuscleRates {
    let snapshot = MuscleSnapshot::capture(model, muscle, state);
    evaluate_snapshot(muscle, &snapshot, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateGates;
    use crate::curve::PiecewiseLinear;
    use crate::parameter::MetabolicMuscleParameter;
    use mf_core::Id;

    fn muscle() -> ResolvedMuscle {
        ResolvedMuscle {
            parameter: MetabolicMuscleParameter::new("soleus", 0.5, 0.5, 40.0, 40.0, 74.0, 74.0)
                .unwrap(),
            muscle: Id::from_index(0).unwrap(),
            mass_kg: 0.5,
        }
    }

    fn snapshot(v: Real) -> MuscleSnapshot {
        MuscleSnapshot {
            excitation: 1.0,
            fiber_velocity: v,
            active_fiber_force: 500.0,
            isometric_fiber_force: 600.0,
            normalized_fiber_length: 1.0,
        }
    }

    fn flat_config() -> EngineConfig {
        EngineConfig::default().maintenance_curve(PiecewiseLinear::constant(1.0).unwrap())
    }

    #[test]
    fn full_excitation_blend() {
        // sin(pi/2) = 1, 1 - cos(pi/2) = 1
        let blend = fiber_type_blend(40.0, 133.0, 0.5, 1.0);
        assert!((blend - (20.0 + 66.5)).abs() < 1e-9);
    }

    #[test]
    fn shortening_muscle_constant_mode() {
        let rates = evaluate_snapshot(&muscle(), &snapshot(-0.1), &flat_config());
        assert!((rates.activation - 20.0).abs() < 1e-9);
        assert!((rates.maintenance - 37.0).abs() < 1e-9);
        assert_eq!(rates.shortening, 0.0);
        assert_eq!(rates.mechanical_work, 0.0);
        assert!((rates.total() - 57.0).abs() < 1e-9);
    }

    #[test]
    fn positive_velocity_constant_mode() {
        let rates = evaluate_snapshot(&muscle(), &snapshot(0.2), &flat_config());
        assert!((rates.shortening - (-0.25 * 0.2)).abs() < 1e-12);
        assert!((rates.mechanical_work - (-500.0 * 0.2)).abs() < 1e-9);
    }

    #[test]
    fn force_dependent_alpha() {
        let mode = ShorteningConstant::ForceDependent;
        assert!((shortening_alpha(mode, 0.1, 500.0, 600.0) - (96.0 + 90.0)).abs() < 1e-9);
        assert!((shortening_alpha(mode, -0.1, 500.0, 600.0) - 78.5).abs() < 1e-9);
        assert_eq!(
            shortening_alpha(mode, 0.0, 500.0, 600.0),
            shortening_alpha(mode, 0.1, 500.0, 600.0)
        );
    }

    #[test]
    fn zero_velocity_takes_concentric_branch() {
        assert_eq!(
            shortening_alpha(ShorteningConstant::Constant, 0.0, 500.0, 600.0),
            0.25
        );
        assert_eq!(mechanical_work_rate(0.0, 500.0), 0.0);
        let rates = evaluate_snapshot(&muscle(), &snapshot(0.0), &flat_config());
        assert_eq!(rates.shortening, 0.0);
    }

    #[test]
    fn normalized_mechanical_work() {
        let cfg = flat_config().normalize_mechanical_work_by_mass(true);
        let rates = evaluate_snapshot(&muscle(), &snapshot(0.2), &cfg);
        assert!((rates.mechanical_work - (-100.0 / 0.5)).abs() < 1e-9);
    }

    #[test]
    fn maintenance_uses_length_curve() {
        let cfg = EngineConfig::default();
        let mut snap = snapshot(-0.1);
        snap.normalized_fiber_length = 0.4;
        let rates = evaluate_snapshot(&muscle(), &snap, &cfg);
        assert!((rates.maintenance - 37.0 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn all_gates_off_is_zero() {
        let mut cfg = flat_config();
        cfg.gates = RateGates::all_off();
        let rates = evaluate_snapshot(&muscle(), &snapshot(0.3), &cfg);
        assert_eq!(rates, PerMuscleRates::default());
    }

    #[test]
    fn nan_input_propagates() {
        let mut snap = snapshot(0.1);
        snap.active_fiber_force = Real::NAN;
        let rates = evaluate_snapshot(&muscle(), &snap, &flat_config());
        assert!(rates.mechanical_work.is_nan());
        assert!(rates.total().is_nan());
    }
}
