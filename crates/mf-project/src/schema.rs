//! Document schema definitions.
//!
//! Two documents are persisted: a probe configuration and a recorded state
//! trace. Omitted fields take the engine defaults.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_basal_coefficient() -> f64 {
    1.51
}

fn default_basal_exponent() -> f64 {
    1.0
}

fn default_gain() -> f64 {
    1.0
}

fn default_slow_twitch_ratio() -> f64 {
    0.5
}

fn default_activation_slow() -> f64 {
    40.0
}

fn default_activation_fast() -> f64 {
    133.0
}

fn default_maintenance_slow() -> f64 {
    74.0
}

fn default_maintenance_fast() -> f64 {
    111.0
}

fn default_specific_tension() -> f64 {
    mf_core::units::constants::SPECIFIC_TENSION_PA
}

fn default_density() -> f64 {
    mf_core::units::constants::MUSCLE_DENSITY_KG_PER_M3
}

fn default_normalized_length() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeConfigDef {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub gates: GatesDef,
    #[serde(default)]
    pub use_force_dependent_shortening_prop_constant: bool,
    #[serde(default)]
    pub normalize_mechanical_work_by_mass: bool,
    #[serde(default = "default_basal_coefficient")]
    pub basal_coefficient: f64,
    #[serde(default = "default_basal_exponent")]
    pub basal_exponent: f64,
    /// Breakpoints of the maintenance length scale; default curve if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_curve: Option<CurveDef>,
    #[serde(default)]
    pub report: ReportModeDef,
    #[serde(default = "default_gain")]
    pub gain: f64,
    #[serde(default)]
    pub operation: OperationDef,
    #[serde(default)]
    pub parameters: Vec<MuscleParameterDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatesDef {
    #[serde(default = "default_true")]
    pub activation: bool,
    #[serde(default = "default_true")]
    pub maintenance: bool,
    #[serde(default = "default_true")]
    pub shortening: bool,
    #[serde(default = "default_true")]
    pub basal: bool,
    #[serde(default = "default_true")]
    pub mechanical_work: bool,
}

impl Default for GatesDef {
    fn default() -> Self {
        Self {
            activation: true,
            maintenance: true,
            shortening: true,
            basal: true,
            mechanical_work: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurveDef {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportModeDef {
    #[default]
    Total,
    PerMuscle,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OperationDef {
    #[default]
    Value,
    Integrate,
    Minimum,
    Maximum,
    #[serde(rename = "minabs")]
    MinAbs,
    #[serde(rename = "maxabs")]
    MaxAbs,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MuscleParameterDef {
    pub muscle: String,
    /// Derived from the muscle architecture when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_kg: Option<f64>,
    #[serde(default = "default_slow_twitch_ratio")]
    pub ratio_slow_twitch_fibers: f64,
    #[serde(default = "default_activation_slow")]
    pub activation_constant_slow_twitch: f64,
    #[serde(default = "default_activation_fast")]
    pub activation_constant_fast_twitch: f64,
    #[serde(default = "default_maintenance_slow")]
    pub maintenance_constant_slow_twitch: f64,
    #[serde(default = "default_maintenance_fast")]
    pub maintenance_constant_fast_twitch: f64,
    #[serde(default = "default_specific_tension")]
    pub specific_tension_pa: f64,
    #[serde(default = "default_density")]
    pub density_kg_per_m3: f64,
}

impl MuscleParameterDef {
    /// Entry for `muscle` with every constant at its default.
    pub fn named(muscle: impl Into<String>) -> Self {
        Self {
            muscle: muscle.into(),
            mass_kg: None,
            ratio_slow_twitch_fibers: default_slow_twitch_ratio(),
            activation_constant_slow_twitch: default_activation_slow(),
            activation_constant_fast_twitch: default_activation_fast(),
            maintenance_constant_slow_twitch: default_maintenance_slow(),
            maintenance_constant_fast_twitch: default_maintenance_fast(),
            specific_tension_pa: default_specific_tension(),
            density_kg_per_m3: default_density(),
        }
    }
}

/// Muscle states recorded over time for a fixed set of muscles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateTraceDef {
    pub version: u32,
    pub name: String,
    pub body_mass_kg: f64,
    #[serde(default)]
    pub muscles: Vec<MuscleDef>,
    #[serde(default)]
    pub samples: Vec<SampleDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MuscleDef {
    pub name: String,
    pub max_isometric_force_n: f64,
    pub optimal_fiber_length_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleDef {
    pub time_s: f64,
    /// One entry per muscle, in the order of `StateTraceDef::muscles`.
    pub muscles: Vec<MuscleSampleDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MuscleSampleDef {
    #[serde(default)]
    pub excitation: f64,
    #[serde(default)]
    pub fiber_velocity_mps: f64,
    #[serde(default)]
    pub active_fiber_force_n: f64,
    #[serde(default)]
    pub isometric_fiber_force_n: f64,
    #[serde(default = "default_normalized_length")]
    pub normalized_fiber_length: f64,
}
