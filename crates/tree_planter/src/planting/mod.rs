//! Planting pipeline: size the boundaries, allocate species, lay them out, and assign
//! them to lattice points.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::species::{SpeciesCatalog, SpeciesId};

pub mod events;
pub mod runner;

/// One tree: a species at a lattice point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeAssignment {
    /// Species planted here.
    pub species_id: SpeciesId,
    /// Position as (longitude, latitude) in degrees.
    pub position: DVec2,
    /// Index of the boundary in the run input.
    pub boundary_index: usize,
}

impl TreeAssignment {
    pub fn longitude(&self) -> f64 {
        self.position.x
    }

    pub fn latitude(&self) -> f64 {
        self.position.y
    }
}

/// A boundary that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundaryIssue {
    pub index: usize,
    pub message: String,
}

/// Per-species tree counts in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeciesTally {
    entries: Vec<(SpeciesId, usize)>,
}

impl SpeciesTally {
    /// Zero count for every catalog species, in catalog order.
    pub fn for_catalog(catalog: &SpeciesCatalog) -> Self {
        Self {
            entries: catalog.ids().map(|id| (id.clone(), 0)).collect(),
        }
    }

    pub fn increment(&mut self, id: &str) {
        match self.entries.iter_mut().find(|(existing, _)| existing == id) {
            Some(entry) => entry.1 += 1,
            None => self.entries.push((id.to_owned(), 1)),
        }
    }

    pub fn get(&self, id: &str) -> usize {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map_or(0, |(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SpeciesId, usize)> {
        self.entries.iter().map(|(id, n)| (id, *n))
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}
