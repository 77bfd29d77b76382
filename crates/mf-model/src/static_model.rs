//! In-memory host model backed by recorded muscle states.
//!
//! `StaticModel` is what the CLI and the tests attach probes to: a named
//! list of muscles, a whole-body mass, and states that are plain vectors of
//! [`MuscleState`] in muscle order.

use std::collections::HashMap;

use crate::error::{ModelError, ModelResult};
use crate::muscle::{MuscleArchitecture, MuscleState};
use crate::traits::MusculoskeletalModel;
use mf_core::numeric::{Real, ensure_positive};
use mf_core::units::{Force, Mass, Velocity, kg, mps, n};
use mf_core::{Id, MuscleId};

#[derive(Debug, Clone)]
struct StaticMuscle {
    name: String,
    architecture: MuscleArchitecture,
}

/// Musculoskeletal model whose per-state quantities are supplied up front.
#[derive(Debug, Clone)]
pub struct StaticModel {
    body_mass_kg: Real,
    muscles: Vec<StaticMuscle>,
    by_name: HashMap<String, MuscleId>,
}

/// One state of a [`StaticModel`]: a muscle state per muscle, in id order.
///
/// Only [`StaticModel::state`] builds these, so the length always matches
/// the model that built it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelState {
    muscles: Vec<MuscleState>,
}

impl ModelState {
    pub fn muscles(&self) -> &[MuscleState] {
        &self.muscles
    }
}

impl StaticModel {
    /// Create an empty model with the given whole-body mass (kg).
    pub fn new(body_mass_kg: Real) -> ModelResult<Self> {
        ensure_positive(body_mass_kg, "body_mass_kg")?;
        Ok(Self {
            body_mass_kg,
            muscles: Vec::new(),
            by_name: HashMap::new(),
        })
    }

    /// Add a muscle and return its id.
    ///
    /// # Errors
    /// Names must be non-empty and unique within the model.
    pub fn add_muscle(
        &mut self,
        name: impl Into<String>,
        architecture: MuscleArchitecture,
    ) -> ModelResult<MuscleId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::InvalidArg {
                what: "muscle name must not be empty",
            });
        }
        if self.by_name.contains_key(&name) {
            return Err(ModelError::DuplicateMuscle { name });
        }

        let count = self.muscles.len();
        let id = u32::try_from(count)
            .ok()
            .and_then(Id::from_index)
            .ok_or(ModelError::Capacity { count })?;

        self.by_name.insert(name.clone(), id);
        self.muscles.push(StaticMuscle { name, architecture });
        Ok(id)
    }

    pub fn body_mass_kg(&self) -> Real {
        self.body_mass_kg
    }

    /// Muscle names in id order.
    pub fn muscle_names(&self) -> impl Iterator<Item = &str> {
        self.muscles.iter().map(|m| m.name.as_str())
    }

    /// Build a state from one `MuscleState` per muscle, in id order.
    pub fn state(&self, muscles: Vec<MuscleState>) -> ModelResult<ModelState> {
        if muscles.len() != self.muscles.len() {
            return Err(ModelError::StateShape {
                expected: self.muscles.len(),
                actual: muscles.len(),
            });
        }
        Ok(ModelState { muscles })
    }

    /// # Panics
    ///
    /// Panics if `muscle` was not handed out by this model.
    fn sample<'s>(&self, muscle: MuscleId, state: &'s ModelState) -> &'s MuscleState {
        &state.muscles[muscle.slot()]
    }
}

impl MusculoskeletalModel for StaticModel {
    type State = ModelState;

    fn muscle_count(&self) -> usize {
        self.muscles.len()
    }

    fn find_muscle(&self, name: &str) -> Option<MuscleId> {
        self.by_name.get(name).copied()
    }

    fn muscle_name(&self, muscle: MuscleId) -> &str {
        &self.muscles[muscle.slot()].name
    }

    fn muscle_architecture(&self, muscle: MuscleId) -> MuscleArchitecture {
        self.muscles[muscle.slot()].architecture
    }

    fn excitation(&self, muscle: MuscleId, state: &ModelState) -> Real {
        self.sample(muscle, state).excitation
    }

    fn fiber_velocity(&self, muscle: MuscleId, state: &ModelState) -> Velocity {
        mps(self.sample(muscle, state).fiber_velocity_mps)
    }

    fn active_fiber_force(&self, muscle: MuscleId, state: &ModelState) -> Force {
        n(self.sample(muscle, state).active_fiber_force_n)
    }

    fn isometric_fiber_force(&self, muscle: MuscleId, state: &ModelState) -> Force {
        n(self.sample(muscle, state).isometric_fiber_force_n)
    }

    fn normalized_fiber_length(&self, muscle: MuscleId, state: &ModelState) -> Real {
        self.sample(muscle, state).normalized_fiber_length
    }

    fn total_mass(&self, _state: &ModelState) -> Mass {
        kg(self.body_mass_kg)
    }
}
