//! mf-model: the seam between myoflow and a host musculoskeletal model.
//!
//! Metabolic probes never own muscles. They look a muscle up by name once,
//! keep the returned [`MuscleId`](mf_core::MuscleId), and afterwards only ask
//! the host read-only questions about that muscle in a given state.
//!
//! Provides:
//! - `MusculoskeletalModel`, the query trait a host implements
//! - `MuscleArchitecture` and `MuscleState` value records
//! - `StaticModel`, an in-memory host backed by recorded muscle states
//!
//! # Example
//!
//! ```
//! use mf_model::{MuscleArchitecture, MuscleState, MusculoskeletalModel, StaticModel};
//!
//! let mut model = StaticModel::new(72.0).unwrap();
//! let soleus = model
//!     .add_muscle("soleus", MuscleArchitecture::new(3549.0, 0.044).unwrap())
//!     .unwrap();
//!
//! let state = model
//!     .state(vec![MuscleState {
//!         excitation: 0.3,
//!         ..MuscleState::default()
//!     }])
//!     .unwrap();
//!
//! assert_eq!(model.find_muscle("soleus"), Some(soleus));
//! assert_eq!(model.excitation(soleus, &state), 0.3);
//! ```

pub mod error;
pub mod muscle;
pub mod static_model;
pub mod traits;

// Re-exports
pub use error::{ModelError, ModelResult};
pub use muscle::{MuscleArchitecture, MuscleState};
pub use static_model::{ModelState, StaticModel};
pub use traits::MusculoskeletalModel;
