#![forbid(unsafe_code)]
//! tree_planter: species-mixed tree layouts inside polygon boundaries.
//!
//! Modules:
//! - boundary: polygon boundaries in (longitude, latitude) degrees, validation and containment
//! - sampling: regular lattice sampling with separate sizing and planting passes
//! - species: species catalog, percentage targets, and label allocation
//! - layout: greedy declustering on a square grid and randomized mix options
//! - planting: the propose/commit engine, results, and events
//!
//! For examples, see the README and the `tree_planter_examples` crate.
pub mod boundary;
pub mod error;
pub mod layout;
pub mod planting;
pub mod sampling;
pub mod species;

/// Convenient re-exports for common types. Import with `use tree_planter::prelude::*;`.
pub mod prelude {
    pub use crate::boundary::Boundary;
    pub use crate::error::{Error, Result};
    pub use crate::layout::{
        best_option, decluster, decluster_grid, generate_mix_options, MixOption, PlacementGrid,
    };
    pub use crate::planting::events::{
        EventSink, FnSink, MultiSink, PlantingEvent, PlantingEventKind, VecSink,
    };
    pub use crate::planting::runner::{
        PlantingConfig, PlantingEngine, PlantingProposal, PlantingResult,
    };
    pub use crate::planting::{BoundaryIssue, SpeciesTally, TreeAssignment};
    pub use crate::sampling::{LatticeSampling, SamplingMode};
    pub use crate::species::allocation::{allocate, SpeciesAllocator, ValidationPolicy};
    pub use crate::species::{Species, SpeciesCatalog, SpeciesId, SpeciesTargets};
}
