//! Query trait implemented by host musculoskeletal models.

use crate::muscle::MuscleArchitecture;
use mf_core::MuscleId;
use mf_core::numeric::Real;
use mf_core::units::{Force, Mass, Velocity};

/// Read-only view of a musculoskeletal model.
///
/// Muscles are addressed by a [`MuscleId`] obtained from [`find_muscle`].
/// Per-state queries are infallible: a caller only ever passes ids that the
/// same model handed out, so the host may index directly.
///
/// Implementations must not mutate the model while answering, which lets
/// several probes read the same state concurrently.
///
/// [`find_muscle`]: MusculoskeletalModel::find_muscle
pub trait MusculoskeletalModel {
    /// Host state type. Only borrowed, never stored.
    type State;

    /// Number of muscles in the model.
    fn muscle_count(&self) -> usize;

    /// Look a muscle up by its name in the model's component hierarchy.
    fn find_muscle(&self, name: &str) -> Option<MuscleId>;

    /// Name of a muscle previously returned by `find_muscle`.
    fn muscle_name(&self, muscle: MuscleId) -> &str;

    /// Fixed architecture of a muscle.
    fn muscle_architecture(&self, muscle: MuscleId) -> MuscleArchitecture;

    /// Neural excitation in [0, 1].
    fn excitation(&self, muscle: MuscleId, state: &Self::State) -> Real;

    /// Fiber velocity. Positive is lengthening.
    fn fiber_velocity(&self, muscle: MuscleId, state: &Self::State) -> Velocity;

    /// Force developed by the contractile element.
    fn active_fiber_force(&self, muscle: MuscleId, state: &Self::State) -> Force;

    /// Contractile element force under isometric conditions at the current
    /// activation and fiber length.
    fn isometric_fiber_force(&self, muscle: MuscleId, state: &Self::State) -> Force;

    /// Fiber length normalized by optimal fiber length.
    fn normalized_fiber_length(&self, muscle: MuscleId, state: &Self::State) -> Real;

    /// Total mass of every body in the model.
    fn total_mass(&self, state: &Self::State) -> Mass;
}
