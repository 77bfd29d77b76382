//! Construction of runtime objects from validated documents.

use crate::ProjectResult;
use crate::schema::{
    MuscleParameterDef, OperationDef, ProbeConfigDef, ReportModeDef, SampleDef, StateTraceDef,
};
use mf_metabolics::{
    EngineConfig, MetabolicMuscleParameter, MetabolicProbe, ParameterTable, PiecewiseLinear,
    ProbeOperation, RateGates, ReportMode, ShorteningConstant,
};
use mf_model::{ModelState, MuscleArchitecture, MuscleState, StaticModel};

/// A host model together with its recorded states.
#[derive(Debug, Clone)]
pub struct StateTrace {
    pub model: StaticModel,
    /// `(time_s, state)` in non-decreasing time order.
    pub samples: Vec<(f64, ModelState)>,
}

impl StateTrace {
    pub fn duration_s(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some((t0, _)), Some((t1, _))) => t1 - t0,
            _ => 0.0,
        }
    }
}

pub fn engine_config(def: &ProbeConfigDef) -> ProjectResult<EngineConfig> {
    let gates = RateGates {
        activation: def.gates.activation,
        maintenance: def.gates.maintenance,
        shortening: def.gates.shortening,
        basal: def.gates.basal,
        mechanical_work: def.gates.mechanical_work,
    };
    let curve = match &def.maintenance_curve {
        Some(curve) => PiecewiseLinear::new(
            curve.x.iter().copied().zip(curve.y.iter().copied()).collect(),
        )?,
        None => PiecewiseLinear::default(),
    };
    let report = match def.report {
        ReportModeDef::Total => ReportMode::Total,
        ReportModeDef::PerMuscle => ReportMode::PerMuscle,
    };

    Ok(EngineConfig {
        gates,
        shortening_constant: ShorteningConstant::from_force_dependent_flag(
            def.use_force_dependent_shortening_prop_constant,
        ),
        normalize_mechanical_work_by_mass: def.normalize_mechanical_work_by_mass,
        basal_coefficient: def.basal_coefficient,
        basal_exponent: def.basal_exponent,
        maintenance_curve: curve,
        report_mode: report,
    })
}

fn operation(def: OperationDef) -> ProbeOperation {
    match def {
        OperationDef::Value => ProbeOperation::Value,
        OperationDef::Integrate => ProbeOperation::Integrate,
        OperationDef::Minimum => ProbeOperation::Minimum,
        OperationDef::Maximum => ProbeOperation::Maximum,
        OperationDef::MinAbs => ProbeOperation::MinAbs,
        OperationDef::MaxAbs => ProbeOperation::MaxAbs,
    }
}

fn parameter(def: &MuscleParameterDef) -> ProjectResult<MetabolicMuscleParameter> {
    let param = MetabolicMuscleParameter {
        muscle_name: def.muscle.clone(),
        mass_kg: def.mass_kg,
        slow_twitch_ratio: def.ratio_slow_twitch_fibers,
        activation_constant_slow: def.activation_constant_slow_twitch,
        activation_constant_fast: def.activation_constant_fast_twitch,
        maintenance_constant_slow: def.maintenance_constant_slow_twitch,
        maintenance_constant_fast: def.maintenance_constant_fast_twitch,
        specific_tension_pa: def.specific_tension_pa,
        density_kg_per_m3: def.density_kg_per_m3,
    };
    param.validate()?;
    Ok(param)
}

/// Build an unattached probe.
pub fn build_probe(def: &ProbeConfigDef) -> ProjectResult<MetabolicProbe> {
    let table = ParameterTable::new(
        def.parameters
            .iter()
            .map(parameter)
            .collect::<ProjectResult<Vec<_>>>()?,
    )?;
    let probe = MetabolicProbe::new(&def.name, engine_config(def)?, table)?
        .with_gain(def.gain)?
        .with_operation(operation(def.operation));
    Ok(probe)
}

pub fn build_model(def: &StateTraceDef) -> ProjectResult<StaticModel> {
    let mut model = StaticModel::new(def.body_mass_kg)?;
    for muscle in &def.muscles {
        let architecture =
            MuscleArchitecture::new(muscle.max_isometric_force_n, muscle.optimal_fiber_length_m)?;
        model.add_muscle(muscle.name.clone(), architecture)?;
    }
    Ok(model)
}

fn sample_state(model: &StaticModel, sample: &SampleDef) -> ProjectResult<ModelState> {
    let mut muscles = Vec::with_capacity(sample.muscles.len());
    for m in &sample.muscles {
        let state = MuscleState {
            excitation: m.excitation,
            fiber_velocity_mps: m.fiber_velocity_mps,
            active_fiber_force_n: m.active_fiber_force_n,
            isometric_fiber_force_n: m.isometric_fiber_force_n,
            normalized_fiber_length: m.normalized_fiber_length,
        };
        state.check_finite()?;
        muscles.push(state);
    }
    Ok(model.state(muscles)?)
}

pub fn build_trace(def: &StateTraceDef) -> ProjectResult<StateTrace> {
    let model = build_model(def)?;
    let samples = def
        .samples
        .iter()
        .map(|sample| Ok((sample.time_s, sample_state(&model, sample)?)))
        .collect::<ProjectResult<Vec<_>>>()?;
    Ok(StateTrace { model, samples })
}
