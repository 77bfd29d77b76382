//! Per-muscle metabolic constants and the ordered table that holds them.

use crate::error::{MetabolicsError, MetabolicsResult};
use mf_core::numeric::{Real, ensure_fraction, ensure_non_negative, ensure_positive};
use mf_core::units::constants::{MUSCLE_DENSITY_KG_PER_M3, SPECIFIC_TENSION_PA};
use mf_core::units::{Area, Mass, kgpm3, pa};
use mf_model::MuscleArchitecture;
use serde::{Deserialize, Serialize};
use uom::si::mass::kilogram;

/// Physiological constants of one muscle taking part in a metabolic probe.
///
/// Heat constants are in W/kg. When `mass_kg` is `None` the muscle mass is
/// estimated from the muscle architecture when the probe is attached, see
/// [`MetabolicMuscleParameter::derived_mass`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicMuscleParameter {
    /// Name of the muscle in the host model.
    pub muscle_name: String,
    /// Muscle mass (kg). `None` derives it from the architecture.
    pub mass_kg: Option<Real>,
    /// Fraction of slow-twitch fibers, in [0, 1].
    pub slow_twitch_ratio: Real,
    pub activation_constant_slow: Real,
    pub activation_constant_fast: Real,
    pub maintenance_constant_slow: Real,
    pub maintenance_constant_fast: Real,
    /// Specific tension used for the derived mass (Pa).
    pub specific_tension_pa: Real,
    /// Muscle density used for the derived mass (kg/m^3).
    pub density_kg_per_m3: Real,
}

impl MetabolicMuscleParameter {
    /// Create a parameter record with an explicit mass.
    ///
    /// # Errors
    /// Fails with a configuration error when any value is out of range.
    pub fn new(
        muscle_name: impl Into<String>,
        mass_kg: Real,
        slow_twitch_ratio: Real,
        activation_constant_slow: Real,
        activation_constant_fast: Real,
        maintenance_constant_slow: Real,
        maintenance_constant_fast: Real,
    ) -> MetabolicsResult<Self> {
        let param = Self {
            muscle_name: muscle_name.into(),
            mass_kg: Some(mass_kg),
            slow_twitch_ratio,
            activation_constant_slow,
            activation_constant_fast,
            maintenance_constant_slow,
            maintenance_constant_fast,
            specific_tension_pa: SPECIFIC_TENSION_PA,
            density_kg_per_m3: MUSCLE_DENSITY_KG_PER_M3,
        };
        param.validate()?;
        Ok(param)
    }

    /// Bhargava (2004) default constants with the mass left to be derived.
    pub fn with_defaults(muscle_name: impl Into<String>) -> Self {
        Self {
            muscle_name: muscle_name.into(),
            mass_kg: None,
            slow_twitch_ratio: 0.5,
            activation_constant_slow: 40.0,
            activation_constant_fast: 133.0,
            maintenance_constant_slow: 74.0,
            maintenance_constant_fast: 111.0,
            specific_tension_pa: SPECIFIC_TENSION_PA,
            density_kg_per_m3: MUSCLE_DENSITY_KG_PER_M3,
        }
    }

    /// Set an explicit muscle mass.
    pub fn with_mass(mut self, mass_kg: Real) -> Self {
        self.mass_kg = Some(mass_kg);
        self
    }

    /// Check every invariant of the record.
    pub fn validate(&self) -> MetabolicsResult<()> {
        if self.muscle_name.trim().is_empty() {
            return Err(MetabolicsError::configuration(
                "muscle_name must not be empty",
            ));
        }
        let in_muscle = |e: mf_core::MfError| {
            MetabolicsError::configuration(format!("muscle '{}': {e}", self.muscle_name))
        };

        if let Some(mass) = self.mass_kg {
            ensure_positive(mass, "mass_kg").map_err(in_muscle)?;
        }
        ensure_fraction(self.slow_twitch_ratio, "slow_twitch_ratio").map_err(in_muscle)?;
        ensure_non_negative(self.activation_constant_slow, "activation_constant_slow")
            .map_err(in_muscle)?;
        ensure_non_negative(self.activation_constant_fast, "activation_constant_fast")
            .map_err(in_muscle)?;
        ensure_non_negative(self.maintenance_constant_slow, "maintenance_constant_slow")
            .map_err(in_muscle)?;
        ensure_non_negative(self.maintenance_constant_fast, "maintenance_constant_fast")
            .map_err(in_muscle)?;
        ensure_positive(self.specific_tension_pa, "specific_tension_pa").map_err(in_muscle)?;
        ensure_positive(self.density_kg_per_m3, "density_kg_per_m3").map_err(in_muscle)?;
        Ok(())
    }

    /// Muscle mass estimated from architecture:
    /// `(F_max / specific_tension) * density * L_opt`.
    pub fn derived_mass(&self, architecture: &MuscleArchitecture) -> Real {
        let pcsa: Area = architecture.max_isometric_force() / pa(self.specific_tension_pa);
        let mass: Mass =
            pcsa * kgpm3(self.density_kg_per_m3) * architecture.optimal_fiber_length();
        mass.get::<kilogram>()
    }
}

/// Ordered collection of muscle parameters.
///
/// Records are range-checked at construction. Name uniqueness is checked
/// when the table is resolved against a model, together with the other
/// reference checks. Order fixes the summation order and the order of
/// per-muscle report channels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MetabolicMuscleParameter>", into = "Vec<MetabolicMuscleParameter>")]
pub struct ParameterTable {
    entries: Vec<MetabolicMuscleParameter>,
}

impl ParameterTable {
    /// Build a table, validating each record.
    pub fn new(entries: Vec<MetabolicMuscleParameter>) -> MetabolicsResult<Self> {
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[MetabolicMuscleParameter] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, muscle_name: &str) -> Option<&MetabolicMuscleParameter> {
        self.entries.iter().find(|p| p.muscle_name == muscle_name)
    }
}

impl TryFrom<Vec<MetabolicMuscleParameter>> for ParameterTable {
    type Error = MetabolicsError;

    fn try_from(entries: Vec<MetabolicMuscleParameter>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<ParameterTable> for Vec<MetabolicMuscleParameter> {
    fn from(table: ParameterTable) -> Self {
        table.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soleus() -> MetabolicMuscleParameter {
        MetabolicMuscleParameter::new("soleus", 0.5, 0.5, 40.0, 40.0, 74.0, 74.0).unwrap()
    }

    #[test]
    fn explicit_parameter_is_valid() {
        let p = soleus();
        assert_eq!(p.mass_kg, Some(0.5));
        assert_eq!(p.specific_tension_pa, 0.25e6);
    }

    #[test]
    fn ratio_out_of_range_is_configuration_error() {
        let err =
            MetabolicMuscleParameter::new("soleus", 0.5, 1.2, 40.0, 40.0, 74.0, 74.0).unwrap_err();
        match err {
            MetabolicsError::Configuration { what } => {
                assert!(what.contains("soleus"));
                assert!(what.contains("slow_twitch_ratio"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_mass_and_constants_rejected() {
        assert!(MetabolicMuscleParameter::new("a", -0.5, 0.5, 40.0, 40.0, 74.0, 74.0).is_err());
        assert!(MetabolicMuscleParameter::new("a", 0.0, 0.5, 40.0, 40.0, 74.0, 74.0).is_err());
        assert!(MetabolicMuscleParameter::new("a", 0.5, 0.5, -1.0, 40.0, 74.0, 74.0).is_err());
        assert!(MetabolicMuscleParameter::new("a", 0.5, 0.5, 40.0, 40.0, 74.0, -74.0).is_err());
        assert!(MetabolicMuscleParameter::new("", 0.5, 0.5, 40.0, 40.0, 74.0, 74.0).is_err());
    }

    #[test]
    fn zero_constants_are_allowed() {
        assert!(MetabolicMuscleParameter::new("a", 0.5, 0.0, 0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn defaults_leave_mass_to_derive() {
        let p = MetabolicMuscleParameter::with_defaults("vasti");
        assert_eq!(p.mass_kg, None);
        assert_eq!(p.activation_constant_fast, 133.0);
        assert_eq!(p.maintenance_constant_fast, 111.0);
        assert!(p.validate().is_ok());
        assert_eq!(p.with_mass(1.2).mass_kg, Some(1.2));
    }

    #[test]
    fn derived_mass_from_architecture() {
        let p = MetabolicMuscleParameter::with_defaults("soleus");
        let arch = MuscleArchitecture::new(2500.0, 0.05).unwrap();
        // (2500 / 0.25e6) * 1059.7 * 0.05 = 0.52985
        assert!((p.derived_mass(&arch) - 0.52985).abs() < 1e-12);
    }

    #[test]
    fn table_keeps_order() {
        let table = ParameterTable::new(vec![
            soleus(),
            MetabolicMuscleParameter::with_defaults("gastroc"),
        ])
        .unwrap();
        let names: Vec<_> = table.entries().iter().map(|p| p.muscle_name.as_str()).collect();
        assert_eq!(names, vec!["soleus", "gastroc"]);
        assert!(table.get("gastroc").is_some());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn table_validates_records() {
        let mut bad = soleus();
        bad.slow_twitch_ratio = -0.1;
        assert!(ParameterTable::new(vec![bad]).is_err());
    }
}
