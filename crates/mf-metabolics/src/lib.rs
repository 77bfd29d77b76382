//! mf-metabolics: whole-body metabolic rate probe after Bhargava et al. (2004).
//!
//! The engine is split into four parts:
//! - [`parameter`]: per-muscle physiological constants (`ParameterTable`)
//! - [`validate`]: one-time resolution of the table against a host model
//! - [`rates`]: pure per-muscle activation, maintenance, shortening and work terms
//! - [`aggregate`]: basal term and whole-body sum, total or per muscle
//!
//! [`MetabolicProbe`] ties them together behind an
//! unconfigured → ready state machine. [`ProbeReducer`] folds probe values
//! over time for integration and extrema.
//!
//! # Example
//!
//! ```
//! use mf_metabolics::{EngineConfig, MetabolicMuscleParameter, MetabolicProbe, ParameterTable};
//! use mf_model::{MuscleArchitecture, MuscleState, StaticModel};
//!
//! let mut model = StaticModel::new(70.0).unwrap();
//! model
//!     .add_muscle("soleus", MuscleArchitecture::new(3549.0, 0.044).unwrap())
//!     .unwrap();
//!
//! let table = ParameterTable::new(vec![MetabolicMuscleParameter::with_defaults("soleus")]).unwrap();
//! let mut probe = MetabolicProbe::new("metabolic_power", EngineConfig::default(), table).unwrap();
//! probe.attach(&model).unwrap();
//!
//! let state = model.state(vec![MuscleState::default()]).unwrap();
//! let report = probe.compute(&model, &state).unwrap();
//! assert!((report.total() - 1.51 * 70.0).abs() < 1e-9);
//! ```

pub mod aggregate;
pub mod config;
pub mod curve;
pub mod error;
pub mod operation;
pub mod parameter;
pub mod probe;
pub mod rates;
pub mod validate;

// Re-exports
pub use aggregate::{MetabolicBreakdown, MuscleRateEntry, ProbeReport, basal_rate};
pub use config::{EngineConfig, RateGates, ReportMode, ShorteningConstant};
pub use curve::PiecewiseLinear;
pub use error::{MetabolicsError, MetabolicsResult};
pub use operation::{ProbeOperation, ProbeReducer};
pub use parameter::{MetabolicMuscleParameter, ParameterTable};
pub use probe::MetabolicProbe;
pub use rates::{MuscleSnapshot, PerMuscleRates};
pub use validate::{ResolvedMuscle, ResolvedTable, resolve};
