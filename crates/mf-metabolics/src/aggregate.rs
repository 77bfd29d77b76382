//! Whole-body reduction of per-muscle rates.
//!
//! `Edot = Bdot + sum over muscles (Adot + Mdot + Sdot + Wdot)`, summed in
//! parameter table order so that results are reproducible bit for bit.

use crate::config::{EngineConfig, ReportMode};
use crate::rates::{self, PerMuscleRates};
use crate::validate::ResolvedTable;
use mf_core::numeric::Real;
use mf_model::MusculoskeletalModel;
use serde::{Deserialize, Serialize};
use uom::si::mass::kilogram;

/// Basal heat rate `basal_coefficient * body_mass^basal_exponent`, or 0 when
/// the basal gate is off.
pub fn basal_rate(config: &EngineConfig, body_mass_kg: Real) -> Real {
    if config.gates.basal {
        config.basal_coefficient * body_mass_kg.powf(config.basal_exponent)
    } else {
        0.0
    }
}

/// Rates of one muscle, labeled with its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleRateEntry {
    pub muscle_name: String,
    pub rates: PerMuscleRates,
}

/// Every term of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicBreakdown {
    pub basal: Real,
    /// In parameter table order.
    pub muscles: Vec<MuscleRateEntry>,
}

impl MetabolicBreakdown {
    /// Sum of the muscle terms, without the basal term.
    pub fn muscle_total(&self) -> Real {
        self.muscles.iter().map(|m| m.rates.total()).sum()
    }

    /// Whole-body rate (W).
    pub fn total(&self) -> Real {
        self.basal + self.muscle_total()
    }

    /// Package as a report for the given mode.
    pub fn into_report(self, mode: ReportMode) -> ProbeReport {
        match mode {
            ReportMode::Total => ProbeReport::Total(self.total()),
            ReportMode::PerMuscle => ProbeReport::PerMuscle(self),
        }
    }
}

/// What a probe reports for one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProbeReport {
    /// Whole-body rate, one channel.
    Total(Real),
    /// One channel per muscle. The basal term is kept alongside and is part
    /// of [`ProbeReport::total`] but of no channel.
    PerMuscle(MetabolicBreakdown),
}

impl ProbeReport {
    /// Channel values in label order.
    pub fn values(&self) -> Vec<Real> {
        match self {
            Self::Total(total) => vec![*total],
            Self::PerMuscle(breakdown) => {
                breakdown.muscles.iter().map(|m| m.rates.total()).collect()
            }
        }
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        match self {
            Self::Total(_) => 1,
            Self::PerMuscle(breakdown) => breakdown.muscles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whole-body rate, basal term included.
    pub fn total(&self) -> Real {
        match self {
            Self::Total(total) => *total,
            Self::PerMuscle(breakdown) => breakdown.total(),
        }
    }
}

/// Evaluate every resolved muscle and the basal term for `state`.
///
/// Total body mass is read once per call.
pub fn aggregate<M: MusculoskeletalModel>(
    model: &M,
    table: &ResolvedTable,
    state: &M::State,
    config: &EngineConfig,
) -> MetabolicBreakdown {
    let basal = if config.gates.basal {
        basal_rate(config, model.total_mass(state).get::<kilogram>())
    } else {
        0.0
    };

    let muscles = table
        .muscles()
        .iter()
        .map(|muscle| MuscleRateEntry {
            muscle_name: muscle.name().to_string(),
            rates: rates::evaluate(model, muscle, state, config),
        })
        .collect();

    MetabolicBreakdown { basal, muscles }
}

/// Channel labels for a probe named `probe_name`.
pub fn channel_labels(probe_name: &str, mode: ReportMode, table: &ResolvedTable) -> Vec<String> {
    match mode {
        ReportMode::Total => vec![probe_name.to_string()],
        ReportMode::PerMuscle => table
            .muscles()
            .iter()
            .map(|m| format!("{probe_name}_{}", m.name()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown() -> MetabolicBreakdown {
        MetabolicBreakdown {
            basal: 100.0,
            muscles: vec![
                MuscleRateEntry {
                    muscle_name: "a".to_string(),
                    rates: PerMuscleRates {
                        activation: 1.0,
                        maintenance: 2.0,
                        shortening: 3.0,
                        mechanical_work: 4.0,
                    },
                },
                MuscleRateEntry {
                    muscle_name: "b".to_string(),
                    rates: PerMuscleRates {
                        activation: 5.0,
                        ..PerMuscleRates::default()
                    },
                },
            ],
        }
    }

    #[test]
    fn basal_rate_formula() {
        let cfg = EngineConfig::default();
        assert!((basal_rate(&cfg, 70.0) - 105.7).abs() < 1e-9);

        let cfg = EngineConfig::default().basal(1.2, 0.5);
        assert!((basal_rate(&cfg, 64.0) - 9.6).abs() < 1e-9);
    }

    #[test]
    fn basal_off_or_zero_coefficient() {
        let mut cfg = EngineConfig::default();
        cfg.gates.basal = false;
        assert_eq!(basal_rate(&cfg, 70.0), 0.0);

        let cfg = EngineConfig::default().basal(0.0, 1.0);
        assert_eq!(basal_rate(&cfg, 70.0), 0.0);
    }

    #[test]
    fn totals() {
        let b = breakdown();
        assert_eq!(b.muscle_total(), 15.0);
        assert_eq!(b.total(), 115.0);
    }

    #[test]
    fn total_report_has_one_channel() {
        let report = breakdown().into_report(ReportMode::Total);
        assert_eq!(report.values(), vec![115.0]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.total(), 115.0);
    }

    #[test]
    fn per_muscle_report_channels_in_order() {
        let report = breakdown().into_report(ReportMode::PerMuscle);
        assert_eq!(report.values(), vec![10.0, 5.0]);
        assert_eq!(report.len(), 2);
        assert_eq!(report.total(), 115.0);
    }
}
