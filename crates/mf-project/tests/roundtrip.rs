use mf_project::schema::*;
use mf_project::{
    LATEST_VERSION, ProjectError, ValidationError, load_json, load_trace_yaml, load_yaml,
    save_json, save_trace_yaml, save_yaml, validate_probe_config,
};

fn probe_config() -> ProbeConfigDef {
    let mut soleus = MuscleParameterDef::named("soleus");
    soleus.mass_kg = Some(0.53);
    soleus.ratio_slow_twitch_fibers = 0.8;

    ProbeConfigDef {
        version: LATEST_VERSION,
        name: "metabolic_power".to_string(),
        gates: GatesDef {
            mechanical_work: false,
            ..GatesDef::default()
        },
        use_force_dependent_shortening_prop_constant: true,
        normalize_mechanical_work_by_mass: true,
        basal_coefficient: 1.2,
        basal_exponent: 0.9,
        maintenance_curve: Some(CurveDef {
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.5, 1.0, 0.5],
        }),
        report: ReportModeDef::PerMuscle,
        gain: 2.0,
        operation: OperationDef::MinAbs,
        parameters: vec![soleus, MuscleParameterDef::named("gastroc")],
    }
}

#[test]
fn roundtrip_yaml_probe_config() {
    let config = probe_config();
    validate_probe_config(&config).unwrap();

    let path = std::env::temp_dir().join("mf_project_roundtrip_probe.yaml");
    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_json_probe_config() {
    let config = probe_config();

    let path = std::env::temp_dir().join("mf_project_roundtrip_probe.json");
    save_json(&path, &config).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_yaml_trace() {
    let trace = StateTraceDef {
        version: LATEST_VERSION,
        name: "hop".to_string(),
        body_mass_kg: 65.0,
        muscles: vec![MuscleDef {
            name: "soleus".to_string(),
            max_isometric_force_n: 3549.0,
            optimal_fiber_length_m: 0.044,
        }],
        samples: vec![
            SampleDef {
                time_s: 0.0,
                muscles: vec![MuscleSampleDef {
                    excitation: 0.1,
                    fiber_velocity_mps: 0.02,
                    active_fiber_force_n: 300.0,
                    isometric_fiber_force_n: 320.0,
                    normalized_fiber_length: 1.01,
                }],
            },
            SampleDef {
                time_s: 0.02,
                muscles: vec![MuscleSampleDef {
                    excitation: 0.3,
                    fiber_velocity_mps: -0.04,
                    active_fiber_force_n: 900.0,
                    isometric_fiber_force_n: 950.0,
                    normalized_fiber_length: 0.97,
                }],
            },
        ],
    };

    let path = std::env::temp_dir().join("mf_project_roundtrip_trace.yaml");
    save_trace_yaml(&path, &trace).unwrap();
    let loaded = load_trace_yaml(&path).unwrap();

    assert_eq!(trace, loaded);
}

#[test]
fn save_refuses_invalid_config() {
    let mut config = probe_config();
    config.version = LATEST_VERSION + 1;

    let path = std::env::temp_dir().join("mf_project_invalid_probe.yaml");
    let err = save_yaml(&path, &config).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::UnsupportedVersion { .. })
    ));
}

#[test]
fn load_rejects_malformed_yaml() {
    let path = std::env::temp_dir().join("mf_project_malformed_probe.yaml");
    std::fs::write(&path, "version: one\nname: [").unwrap();
    assert!(matches!(load_yaml(&path), Err(ProjectError::Yaml(_))));
}
