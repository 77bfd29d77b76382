//! Structural validation of probe configurations and state traces.
//!
//! Checks here need nothing but the document itself. Whether parameter
//! entries name muscles of a model is decided when the probe is attached.

use crate::schema::{CurveDef, MuscleParameterDef, ProbeConfigDef, StateTraceDef};
use std::collections::HashSet;

/// Newest document version this crate reads and writes.
pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn check_version(version: u32) -> Result<(), ValidationError> {
    if version == 0 || version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion { version });
    }
    Ok(())
}

fn check_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(invalid(field, value, "must be finite"));
    }
    Ok(())
}

fn check_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be finite and > 0"));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, value, "must be finite and >= 0"));
    }
    Ok(())
}

pub fn validate_probe_config(config: &ProbeConfigDef) -> Result<(), ValidationError> {
    check_version(config.version)?;

    if config.name.trim().is_empty() {
        return Err(invalid("name", "", "probe name must not be empty"));
    }
    check_finite("basal_coefficient", config.basal_coefficient)?;
    check_finite("basal_exponent", config.basal_exponent)?;
    check_finite("gain", config.gain)?;

    if let Some(curve) = &config.maintenance_curve {
        validate_curve(curve)?;
    }

    let mut names = HashSet::new();
    for param in &config.parameters {
        if !names.insert(param.muscle.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: param.muscle.clone(),
                context: "parameters".to_string(),
            });
        }
        validate_parameter(param)?;
    }

    Ok(())
}

fn validate_curve(curve: &CurveDef) -> Result<(), ValidationError> {
    if curve.x.is_empty() {
        return Err(invalid("maintenance_curve.x", "[]", "needs at least one point"));
    }
    if curve.x.len() != curve.y.len() {
        return Err(invalid(
            "maintenance_curve.y",
            curve.y.len(),
            "must have as many values as x",
        ));
    }
    for (i, (&x, &y)) in curve.x.iter().zip(&curve.y).enumerate() {
        check_finite(&format!("maintenance_curve.x[{i}]"), x)?;
        check_finite(&format!("maintenance_curve.y[{i}]"), y)?;
    }
    for (i, pair) in curve.x.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(invalid(
                format!("maintenance_curve.x[{}]", i + 1),
                pair[1],
                "x must be strictly increasing",
            ));
        }
    }
    Ok(())
}

fn validate_parameter(param: &MuscleParameterDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("parameters[{}].{name}", param.muscle);

    if param.muscle.trim().is_empty() {
        return Err(invalid("parameters.muscle", "", "muscle name must not be empty"));
    }
    if let Some(mass) = param.mass_kg {
        check_positive(&field("mass_kg"), mass)?;
    }
    let ratio = param.ratio_slow_twitch_fibers;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(invalid(field("ratio_slow_twitch_fibers"), ratio, "must be in [0, 1]"));
    }
    check_non_negative(
        &field("activation_constant_slow_twitch"),
        param.activation_constant_slow_twitch,
    )?;
    check_non_negative(
        &field("activation_constant_fast_twitch"),
        param.activation_constant_fast_twitch,
    )?;
    check_non_negative(
        &field("maintenance_constant_slow_twitch"),
        param.maintenance_constant_slow_twitch,
    )?;
    check_non_negative(
        &field("maintenance_constant_fast_twitch"),
        param.maintenance_constant_fast_twitch,
    )?;
    check_positive(&field("specific_tension_pa"), param.specific_tension_pa)?;
    check_positive(&field("density_kg_per_m3"), param.density_kg_per_m3)?;
    Ok(())
}

pub fn validate_trace(trace: &StateTraceDef) -> Result<(), ValidationError> {
    check_version(trace.version)?;
    check_positive("body_mass_kg", trace.body_mass_kg)?;

    let mut names = HashSet::new();
    for muscle in &trace.muscles {
        if !names.insert(muscle.name.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: muscle.name.clone(),
                context: "muscles".to_string(),
            });
        }
        check_positive(
            &format!("muscles[{}].max_isometric_force_n", muscle.name),
            muscle.max_isometric_force_n,
        )?;
        check_positive(
            &format!("muscles[{}].optimal_fiber_length_m", muscle.name),
            muscle.optimal_fiber_length_m,
        )?;
    }

    let mut last_time = f64::NEG_INFINITY;
    for (i, sample) in trace.samples.iter().enumerate() {
        check_finite(&format!("samples[{i}].time_s"), sample.time_s)?;
        if sample.time_s < last_time {
            return Err(invalid(
                format!("samples[{i}].time_s"),
                sample.time_s,
                "sample times must be non-decreasing",
            ));
        }
        last_time = sample.time_s;

        if sample.muscles.len() != trace.muscles.len() {
            return Err(invalid(
                format!("samples[{i}].muscles"),
                sample.muscles.len(),
                "must have one entry per muscle",
            ));
        }
    }

    Ok(())
}

/// Check that every parameter entry names a muscle of the trace.
///
/// Catches reference errors before a probe is built, with the document
/// context in the message.
pub fn check_references(
    config: &ProbeConfigDef,
    trace: &StateTraceDef,
) -> Result<(), ValidationError> {
    let muscles: HashSet<&str> = trace.muscles.iter().map(|m| m.name.as_str()).collect();
    for param in &config.parameters {
        if !muscles.contains(param.muscle.as_str()) {
            return Err(ValidationError::MissingReference {
                id: param.muscle.clone(),
                context: format!("trace '{}' muscles", trace.name),
            });
        }
    }
    Ok(())
}
