//! The metabolic probe: configuration, one-time attachment and evaluation.
//!
//! A probe starts unconfigured. [`MetabolicProbe::attach`] validates the
//! parameter table against a model and moves it to ready; from then on the
//! table is frozen and [`MetabolicProbe::compute`] may be called once per
//! state evaluation.

use crate::aggregate::{self, ProbeReport};
use crate::config::EngineConfig;
use crate::error::{MetabolicsError, MetabolicsResult};
use crate::operation::ProbeOperation;
use crate::parameter::ParameterTable;
use crate::validate::{self, ResolvedTable};
use mf_core::numeric::{Real, ensure_finite};
use mf_model::MusculoskeletalModel;
use tracing::{info, trace};

#[derive(Debug, Clone, PartialEq)]
enum Stage {
    Unconfigured,
    Ready(ResolvedTable),
}

/// Probe computing the whole-body metabolic rate of a set of muscles.
#[derive(Debug, Clone, PartialEq)]
pub struct MetabolicProbe {
    name: String,
    config: EngineConfig,
    table: ParameterTable,
    stage: Stage,
    gain: Real,
    operation: ProbeOperation,
}

impl MetabolicProbe {
    /// Create an unattached probe.
    ///
    /// # Errors
    /// `Configuration` if the name is empty or a config value is invalid.
    pub fn new(
        name: impl Into<String>,
        config: EngineConfig,
        table: ParameterTable,
    ) -> MetabolicsResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MetabolicsError::configuration("probe name must not be empty"));
        }
        config.validate()?;
        Ok(Self {
            name,
            config,
            table,
            stage: Stage::Unconfigured,
            gain: 1.0,
            operation: ProbeOperation::Value,
        })
    }

    /// Scale every reported value by `gain`.
    pub fn with_gain(mut self, gain: Real) -> MetabolicsResult<Self> {
        ensure_finite(gain, "gain")?;
        self.gain = gain;
        Ok(self)
    }

    pub fn with_operation(mut self, operation: ProbeOperation) -> Self {
        self.operation = operation;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn parameters(&self) -> &ParameterTable {
        &self.table
    }

    pub fn gain(&self) -> Real {
        self.gain
    }

    pub fn operation(&self) -> ProbeOperation {
        self.operation
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.stage, Stage::Ready(_))
    }

    /// The resolved table, once attached.
    pub fn resolved(&self) -> Option<&ResolvedTable> {
        match &self.stage {
            Stage::Ready(table) => Some(table),
            Stage::Unconfigured => None,
        }
    }

    /// Resolve the parameter table against `model`.
    ///
    /// On failure the probe stays unconfigured and may be attached again.
    ///
    /// # Errors
    /// - `AlreadyAttached` if the probe is ready
    /// - `UnknownMuscle`, `DuplicateMuscle` or `Configuration` from resolution
    pub fn attach<M: MusculoskeletalModel>(&mut self, model: &M) -> MetabolicsResult<()> {
        if self.is_ready() {
            return Err(MetabolicsError::AlreadyAttached {
                probe: self.name.clone(),
            });
        }
        let resolved = validate::resolve(model, &self.table)?;
        info!(
            probe = %self.name,
            muscles = resolved.len(),
            report = ?self.config.report_mode,
            "metabolic probe attached"
        );
        self.stage = Stage::Ready(resolved);
        Ok(())
    }

    fn ready_table(&self) -> MetabolicsResult<&ResolvedTable> {
        self.resolved().ok_or_else(|| MetabolicsError::NotReady {
            probe: self.name.clone(),
        })
    }

    /// Number of output channels: 1 for a total report, one per muscle
    /// otherwise.
    pub fn num_outputs(&self) -> MetabolicsResult<usize> {
        Ok(self.output_labels()?.len())
    }

    /// Stable channel labels, suffixed by the operation when it is not
    /// `Value`.
    pub fn output_labels(&self) -> MetabolicsResult<Vec<String>> {
        let table = self.ready_table()?;
        let suffix = self.operation.label_suffix();
        Ok(
            aggregate::channel_labels(&self.name, self.config.report_mode, table)
                .into_iter()
                .map(|label| format!("{label}{suffix}"))
                .collect(),
        )
    }

    /// Evaluate the metabolic rate for `state`. Gain is not applied.
    ///
    /// # Errors
    /// `NotReady` before [`attach`](Self::attach).
    pub fn compute<M: MusculoskeletalModel>(
        &self,
        model: &M,
        state: &M::State,
    ) -> MetabolicsResult<ProbeReport> {
        let table = self.ready_table()?;
        let breakdown = aggregate::aggregate(model, table, state, &self.config);
        trace!(
            probe = %self.name,
            basal = breakdown.basal,
            total = breakdown.total(),
            "metabolic rate"
        );
        Ok(breakdown.into_report(self.config.report_mode))
    }

    /// Channel values for `state`, scaled by the gain.
    ///
    /// Operations other than `Value` need history and are folded by a
    /// [`ProbeReducer`](crate::operation::ProbeReducer) owned by the caller.
    pub fn compute_probe_inputs<M: MusculoskeletalModel>(
        &self,
        model: &M,
        state: &M::State,
    ) -> MetabolicsResult<Vec<Real>> {
        let report = self.compute(model, state)?;
        Ok(report.values().into_iter().map(|v| v * self.gain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportMode;
    use crate::parameter::MetabolicMuscleParameter;
    use mf_model::{MuscleArchitecture, MuscleState, StaticModel};

    fn model() -> StaticModel {
        let mut model = StaticModel::new(70.0).unwrap();
        model
            .add_muscle("soleus", MuscleArchitecture::new(2500.0, 0.05).unwrap())
            .unwrap();
        model
            .add_muscle("gastroc", MuscleArchitecture::new(1500.0, 0.06).unwrap())
            .unwrap();
        model
    }

    fn table() -> ParameterTable {
        ParameterTable::new(vec![
            MetabolicMuscleParameter::with_defaults("gastroc").with_mass(0.4),
            MetabolicMuscleParameter::with_defaults("soleus").with_mass(0.5),
        ])
        .unwrap()
    }

    fn resting_state(model: &StaticModel) -> mf_model::ModelState {
        model
            .state(vec![MuscleState::default(), MuscleState::default()])
            .unwrap()
    }

    #[test]
    fn compute_before_attach_is_not_ready() {
        let model = model();
        let probe = MetabolicProbe::new("metabolics", EngineConfig::default(), table()).unwrap();
        assert!(!probe.is_ready());
        let err = probe.compute(&model, &resting_state(&model)).unwrap_err();
        assert_eq!(
            err,
            MetabolicsError::NotReady {
                probe: "metabolics".to_string()
            }
        );
        assert!(probe.output_labels().is_err());
    }

    #[test]
    fn second_attach_rejected() {
        let model = model();
        let mut probe =
            MetabolicProbe::new("metabolics", EngineConfig::default(), table()).unwrap();
        probe.attach(&model).unwrap();
        assert!(probe.is_ready());
        assert!(matches!(
            probe.attach(&model),
            Err(MetabolicsError::AlreadyAttached { .. })
        ));
        assert!(probe.is_ready());
    }

    #[test]
    fn failed_attach_leaves_probe_unconfigured() {
        let model = model();
        let table = ParameterTable::new(vec![MetabolicMuscleParameter::with_defaults("vasti")])
            .unwrap();
        let mut probe = MetabolicProbe::new("metabolics", EngineConfig::default(), table).unwrap();
        assert!(matches!(
            probe.attach(&model),
            Err(MetabolicsError::UnknownMuscle { .. })
        ));
        assert!(!probe.is_ready());
        assert!(probe.resolved().is_none());
    }

    #[test]
    fn labels_follow_report_mode_and_operation() {
        let model = model();
        let mut total = MetabolicProbe::new("met", EngineConfig::default(), table()).unwrap();
        total.attach(&model).unwrap();
        assert_eq!(total.output_labels().unwrap(), vec!["met"]);
        assert_eq!(total.num_outputs().unwrap(), 1);

        let config = EngineConfig::default().report_mode(ReportMode::PerMuscle);
        let mut per_muscle = MetabolicProbe::new("met", config, table())
            .unwrap()
            .with_operation(ProbeOperation::Integrate);
        per_muscle.attach(&model).unwrap();
        assert_eq!(
            per_muscle.output_labels().unwrap(),
            vec!["met_gastroc_INTEGRAL", "met_soleus_INTEGRAL"]
        );
        assert_eq!(per_muscle.num_outputs().unwrap(), 2);
    }

    #[test]
    fn resting_state_reports_basal_only() {
        let model = model();
        let mut probe = MetabolicProbe::new("met", EngineConfig::default(), table()).unwrap();
        probe.attach(&model).unwrap();
        let report = probe.compute(&model, &resting_state(&model)).unwrap();
        assert!((report.total() - 105.7).abs() < 1e-9);
    }

    #[test]
    fn gain_scales_inputs() {
        let model = model();
        let mut probe = MetabolicProbe::new("met", EngineConfig::default(), table())
            .unwrap()
            .with_gain(2.0)
            .unwrap();
        probe.attach(&model).unwrap();
        let values = probe
            .compute_probe_inputs(&model, &resting_state(&model))
            .unwrap();
        assert_eq!(values.len(), 1);
        assert!((values[0] - 211.4).abs() < 1e-9);
    }

    #[test]
    fn invalid_construction_rejected() {
        assert!(MetabolicProbe::new("", EngineConfig::default(), table()).is_err());
        let cfg = EngineConfig::default().basal(Real::INFINITY, 1.0);
        assert!(MetabolicProbe::new("met", cfg, table()).is_err());
        let probe = MetabolicProbe::new("met", EngineConfig::default(), table()).unwrap();
        assert!(probe.with_gain(Real::NAN).is_err());
    }
}
