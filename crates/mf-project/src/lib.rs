//! mf-project: probe configuration and state trace file formats.

pub mod build;
pub mod schema;
pub mod validate;

pub use build::{StateTrace, build_model, build_probe, build_trace, engine_config};
pub use schema::*;
pub use validate::{
    LATEST_VERSION, ValidationError, check_references, validate_probe_config, validate_trace,
};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Model error: {0}")]
    Model(#[from] mf_model::ModelError),

    #[error("Metabolics error: {0}")]
    Metabolics(#[from] mf_metabolics::MetabolicsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<ProbeConfigDef> {
    let content = std::fs::read_to_string(path)?;
    let config: ProbeConfigDef = serde_yaml::from_str(&content)?;
    validate_probe_config(&config)?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &ProbeConfigDef) -> ProjectResult<()> {
    validate_probe_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<ProbeConfigDef> {
    let content = std::fs::read_to_string(path)?;
    let config: ProbeConfigDef = serde_json::from_str(&content)?;
    validate_probe_config(&config)?;
    Ok(config)
}

pub fn save_json(path: &Path, config: &ProbeConfigDef) -> ProjectResult<()> {
    validate_probe_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a probe configuration, choosing the format from the extension
/// (`.json` is JSON, anything else YAML).
pub fn load_probe_config(path: &Path) -> ProjectResult<ProbeConfigDef> {
    if is_json(path) {
        load_json(path)
    } else {
        load_yaml(path)
    }
}

pub fn load_trace_yaml(path: &Path) -> ProjectResult<StateTraceDef> {
    let content = std::fs::read_to_string(path)?;
    let trace: StateTraceDef = serde_yaml::from_str(&content)?;
    validate_trace(&trace)?;
    Ok(trace)
}

pub fn save_trace_yaml(path: &Path, trace: &StateTraceDef) -> ProjectResult<()> {
    validate_trace(trace)?;
    let content = serde_yaml::to_string(trace)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_trace_json(path: &Path) -> ProjectResult<StateTraceDef> {
    let content = std::fs::read_to_string(path)?;
    let trace: StateTraceDef = serde_json::from_str(&content)?;
    validate_trace(&trace)?;
    Ok(trace)
}

pub fn save_trace_json(path: &Path, trace: &StateTraceDef) -> ProjectResult<()> {
    validate_trace(trace)?;
    let content = serde_json::to_string_pretty(trace)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a state trace, choosing the format from the extension.
pub fn load_trace(path: &Path) -> ProjectResult<StateTraceDef> {
    if is_json(path) {
        load_trace_json(path)
    } else {
        load_trace_yaml(path)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
