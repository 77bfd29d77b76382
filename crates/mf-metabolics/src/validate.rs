//! Resolution of a parameter table against a host model.
//!
//! This is the only place reference errors are reported. A [`ResolvedTable`]
//! holds a muscle id and an effective mass for every entry, so evaluation
//! never has to look anything up by name again.

use std::collections::HashSet;

use crate::error::{MetabolicsError, MetabolicsResult};
use crate::parameter::{MetabolicMuscleParameter, ParameterTable};
use mf_core::MuscleId;
use mf_core::numeric::Real;
use mf_model::MusculoskeletalModel;
use tracing::debug;

/// A parameter entry bound to a muscle of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMuscle {
    pub parameter: MetabolicMuscleParameter,
    /// Non-owning handle into the host model.
    pub muscle: MuscleId,
    /// Explicit mass, or the mass derived from the muscle architecture.
    pub mass_kg: Real,
}

impl ResolvedMuscle {
    pub fn name(&self) -> &str {
        &self.parameter.muscle_name
    }
}

/// Parameter table whose entries all refer to muscles of one model.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTable {
    muscles: Vec<ResolvedMuscle>,
}

impl ResolvedTable {
    /// Entries in parameter table order.
    pub fn muscles(&self) -> &[ResolvedMuscle] {
        &self.muscles
    }

    pub fn len(&self) -> usize {
        self.muscles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.muscles.is_empty()
    }
}

/// Bind every entry of `table` to a muscle of `model`.
///
/// # Errors
/// - `UnknownMuscle` if a name does not exist in the model
/// - `DuplicateMuscle` if two entries reach the same muscle
/// - `Configuration` if a derived mass is not finite and positive
///
/// Nothing is returned on failure: either every entry resolves or none does.
pub fn resolve<M: MusculoskeletalModel>(
    model: &M,
    table: &ParameterTable,
) -> MetabolicsResult<ResolvedTable> {
    let mut seen = HashSet::with_capacity(table.len());
    let mut muscles = Vec::with_capacity(table.len());

    for parameter in table.entries() {
        let muscle = model.find_muscle(&parameter.muscle_name).ok_or_else(|| {
            MetabolicsError::UnknownMuscle {
                name: parameter.muscle_name.clone(),
            }
        })?;

        if !seen.insert(muscle) {
            return Err(MetabolicsError::DuplicateMuscle {
                name: parameter.muscle_name.clone(),
            });
        }

        let mass_kg = match parameter.mass_kg {
            Some(mass) => mass,
            None => {
                let architecture = model.muscle_architecture(muscle);
                let mass = parameter.derived_mass(&architecture);
                if !mass.is_finite() || mass <= 0.0 {
                    return Err(MetabolicsError::configuration(format!(
                        "muscle '{}': derived mass {mass} kg is not positive",
                        parameter.muscle_name
                    )));
                }
                debug!(
                    muscle = %parameter.muscle_name,
                    mass_kg = mass,
                    "derived muscle mass from architecture"
                );
                mass
            }
        };

        muscles.push(ResolvedMuscle {
            parameter: parameter.clone(),
            muscle,
            mass_kg,
        });
    }

    Ok(ResolvedTable { muscles })
}
