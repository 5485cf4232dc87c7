//! Turning percentage targets into a concrete list of species labels.
//!
//! Counts are truncated (`floor`), so the allocation may hold fewer labels than the
//! requested number of points. The shortfall is left unplanted.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::species::{SpeciesCatalog, SpeciesId, SpeciesTargets};

/// Accepted deviation of the raw percentage total from 100 under [`ValidationPolicy::Strict`].
pub const PERCENT_TOLERANCE: f64 = 1e-9;

/// How raw percentages are checked before allocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValidationPolicy {
    /// Raw percentages must already sum to 100.
    #[default]
    Strict,
    /// Any positive total is rescaled to 100.
    Normalize,
}

/// Allocates species labels against a fixed catalog.
#[derive(Debug, Clone, Copy)]
pub struct SpeciesAllocator<'a> {
    catalog: &'a SpeciesCatalog,
    policy: ValidationPolicy,
}

impl<'a> SpeciesAllocator<'a> {
    pub fn new(catalog: &'a SpeciesCatalog) -> Self {
        Self {
            catalog,
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Checks the raw targets against the catalog and the validation policy.
    pub fn validate(&self, targets: &SpeciesTargets) -> Result<()> {
        if let Some((id, _)) = targets.iter().find(|(id, _)| !self.catalog.contains(id)) {
            return Err(Error::UnknownSpecies { id: id.clone() });
        }
        if self.policy == ValidationPolicy::Strict {
            let total = targets.total();
            if (total - 100.0).abs() > PERCENT_TOLERANCE {
                return Err(Error::InvalidPercentages { total });
            }
        }
        Ok(())
    }

    /// Validate, normalize, and expand `targets` into at most `total_points` labels.
    pub fn allocate(&self, targets: &SpeciesTargets, total_points: usize) -> Result<Vec<SpeciesId>> {
        self.validate(targets)?;
        let labels = allocate(targets, total_points)?;
        debug!(
            "Allocated {} of {} points across {} species.",
            labels.len(),
            total_points,
            targets.len()
        );
        Ok(labels)
    }
}

/// Normalize `targets` and expand them into `floor(share * total_points)` labels per
/// species, grouped in target order.
pub fn allocate(targets: &SpeciesTargets, total_points: usize) -> Result<Vec<SpeciesId>> {
    let normalized = targets.normalized()?;
    let mut labels = Vec::with_capacity(total_points);
    for (id, percent) in normalized.iter() {
        let count = (percent / 100.0 * total_points as f64).floor() as usize;
        labels.extend(std::iter::repeat_n(id.clone(), count));
    }
    Ok(labels)
}

/// Number of labels per species id, in first-seen order.
pub fn label_counts(labels: &[SpeciesId]) -> Vec<(SpeciesId, usize)> {
    let mut counts: Vec<(SpeciesId, usize)> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|(id, _)| id == label) {
            Some(entry) => entry.1 += 1,
            None => counts.push((label.clone(), 1)),
        }
    }
    counts
}
