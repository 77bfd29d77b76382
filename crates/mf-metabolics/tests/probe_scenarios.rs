use mf_metabolics::{
    EngineConfig, MetabolicMuscleParameter, MetabolicProbe, MetabolicsError, ParameterTable,
    PiecewiseLinear, ProbeOperation, ProbeReducer, ProbeReport, ReportMode, ShorteningConstant,
};
use mf_model::{ModelState, MuscleArchitecture, MuscleState, StaticModel};

const TOL: f64 = 1e-9;

fn single_muscle_model(body_mass_kg: f64) -> StaticModel {
    let mut model = StaticModel::new(body_mass_kg).unwrap();
    model
        .add_muscle("soleus", MuscleArchitecture::new(2500.0, 0.05).unwrap())
        .unwrap();
    model
}

fn scenario_table() -> ParameterTable {
    ParameterTable::new(vec![
        MetabolicMuscleParameter::new("soleus", 0.5, 0.5, 40.0, 40.0, 74.0, 74.0).unwrap(),
    ])
    .unwrap()
}

fn scenario_config() -> EngineConfig {
    EngineConfig::default().maintenance_curve(PiecewiseLinear::constant(1.0).unwrap())
}

fn lengthening_state(model: &StaticModel) -> ModelState {
    model
        .state(vec![MuscleState {
            excitation: 1.0,
            fiber_velocity_mps: -0.1,
            active_fiber_force_n: 500.0,
            isometric_fiber_force_n: 600.0,
            normalized_fiber_length: 1.0,
        }])
        .unwrap()
}

fn attached(config: EngineConfig, model: &StaticModel) -> MetabolicProbe {
    let mut probe = MetabolicProbe::new("metabolic_power", config, scenario_table()).unwrap();
    probe.attach(model).unwrap();
    probe
}

#[test]
fn reference_scenario_totals_162_7_watts() {
    let model = single_muscle_model(70.0);
    let state = lengthening_state(&model);
    let probe = attached(
        scenario_config().report_mode(ReportMode::PerMuscle),
        &model,
    );

    let report = probe.compute(&model, &state).unwrap();
    let ProbeReport::PerMuscle(breakdown) = &report else {
        panic!("expected a per-muscle report, got {report:?}");
    };
    let rates = breakdown.muscles[0].rates;
    assert!((rates.activation - 20.0).abs() < TOL);
    assert!((rates.maintenance - 37.0).abs() < TOL);
    assert_eq!(rates.shortening, 0.0);
    assert_eq!(rates.mechanical_work, 0.0);
    assert!((breakdown.basal - 105.7).abs() < TOL);
    assert!((report.total() - 162.7).abs() < TOL);
}

#[test]
fn total_report_is_a_single_channel() {
    let model = single_muscle_model(70.0);
    let state = lengthening_state(&model);
    let probe = attached(scenario_config(), &model);

    let values = probe.compute_probe_inputs(&model, &state).unwrap();
    assert_eq!(values.len(), 1);
    assert!((values[0] - 162.7).abs() < TOL);
    assert_eq!(probe.output_labels().unwrap(), vec!["metabolic_power"]);
}

#[test]
fn each_gate_removes_only_its_term() {
    let model = single_muscle_model(70.0);
    let state = lengthening_state(&model);
    let cases = [
        (EngineConfig::with_gates(false, true, true, true, true), 162.7 - 20.0),
        (EngineConfig::with_gates(true, false, true, true, true), 162.7 - 37.0),
        (EngineConfig::with_gates(true, true, true, false, true), 162.7 - 105.7),
        (EngineConfig::with_gates(false, false, false, false, false), 0.0),
    ];
    for (config, expected) in cases {
        let config = config.maintenance_curve(PiecewiseLinear::constant(1.0).unwrap());
        let probe = attached(config, &model);
        let total = probe.compute(&model, &state).unwrap().total();
        assert!((total - expected).abs() < TOL, "{total} != {expected}");
    }
}

#[test]
fn force_dependent_shortening_on_lengthening_fiber() {
    let model = single_muscle_model(70.0);
    let state = lengthening_state(&model);
    let config = scenario_config()
        .shortening_constant(ShorteningConstant::ForceDependent)
        .report_mode(ReportMode::PerMuscle);
    let probe = attached(config, &model);

    let ProbeReport::PerMuscle(breakdown) = probe.compute(&model, &state).unwrap() else {
        panic!("expected a per-muscle report");
    };
    // alpha = 0.157 * 500, Sdot = -alpha * v
    assert!((breakdown.muscles[0].rates.shortening - 7.85).abs() < TOL);
}

#[test]
fn basal_term_depends_only_on_body_mass() {
    let model = single_muscle_model(70.0);
    let probe = attached(EngineConfig::with_gates(false, false, false, true, false), &model);

    let states = [
        MuscleState::default(),
        MuscleState {
            excitation: 0.8,
            fiber_velocity_mps: 0.3,
            active_fiber_force_n: 900.0,
            isometric_fiber_force_n: 1200.0,
            normalized_fiber_length: 1.2,
        },
    ];
    for muscle in states {
        let state = model.state(vec![muscle]).unwrap();
        let total = probe.compute(&model, &state).unwrap().total();
        assert!((total - 105.7).abs() < TOL);
    }

    let heavier = single_muscle_model(80.0);
    let probe = attached(EngineConfig::with_gates(false, false, false, true, false), &heavier);
    let state = heavier.state(vec![MuscleState::default()]).unwrap();
    assert!((probe.compute(&heavier, &state).unwrap().total() - 120.8).abs() < TOL);
}

#[test]
fn attach_rejects_unknown_and_duplicate_muscles() {
    let model = single_muscle_model(70.0);

    let unknown = ParameterTable::new(vec![MetabolicMuscleParameter::with_defaults("vasti")])
        .unwrap();
    let mut probe = MetabolicProbe::new("met", EngineConfig::default(), unknown).unwrap();
    assert_eq!(
        probe.attach(&model),
        Err(MetabolicsError::UnknownMuscle {
            name: "vasti".to_string()
        })
    );

    let duplicate = ParameterTable::new(vec![
        MetabolicMuscleParameter::with_defaults("soleus"),
        MetabolicMuscleParameter::with_defaults("soleus"),
    ])
    .unwrap();
    let mut probe = MetabolicProbe::new("met", EngineConfig::default(), duplicate).unwrap();
    assert!(matches!(
        probe.attach(&model),
        Err(MetabolicsError::DuplicateMuscle { .. })
    ));
}

#[test]
fn integrating_a_constant_rate_gives_energy() {
    let model = single_muscle_model(70.0);
    let state = lengthening_state(&model);
    let probe = attached(scenario_config(), &model).with_operation(ProbeOperation::Integrate);

    let mut reducer = ProbeReducer::new(probe.operation(), probe.num_outputs().unwrap());
    for k in 0..=20 {
        let t = 0.05 * k as f64;
        let values = probe.compute_probe_inputs(&model, &state).unwrap();
        reducer.push(t, &values).unwrap();
    }
    assert!((reducer.result()[0] - 162.7).abs() < 1e-6);
    assert_eq!(
        probe.output_labels().unwrap(),
        vec!["metabolic_power_INTEGRAL"]
    );
}
