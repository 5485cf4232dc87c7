//! High-level engine that turns boundaries and species targets into tree assignments.
//!
//! A run has two phases. [`PlantingEngine::propose`] sizes every boundary, allocates the
//! species list, and lays out one or more randomized mix options.
//! [`PlantingEngine::commit`] walks the placement lattice of each boundary in input order
//! and hands out labels from the chosen option's sequence. The sequence is shared across
//! boundaries. [`PlantingEngine::place`] does both, committing the option with the fewest
//! same-species neighbors.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::boundary::Boundary;
use crate::error::{Error, Result};
use crate::layout::{best_option, generate_mix_options, square_side, MixOption};
use crate::planting::events::{EventSink, PlantingEvent, PlantingEventKind};
use crate::planting::{BoundaryIssue, SpeciesTally, TreeAssignment};
use crate::sampling::LatticeSampling;
use crate::species::allocation::{label_counts, SpeciesAllocator, ValidationPolicy};
use crate::species::{SpeciesCatalog, SpeciesId, SpeciesTargets};

/// Number of mix options offered when not configured.
pub const DEFAULT_NUM_MIX_OPTIONS: usize = 3;

/// Tree spacing used when not configured, in meters.
pub const DEFAULT_SPACING_METERS: f64 = 6.0;

/// Spacing range, in meters, the lattice approximation is intended for.
pub const EXPECTED_SPACING_METERS: std::ops::RangeInclusive<f64> = 3.0..=15.0;

/// Configuration for a planting run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlantingConfig {
    /// Distance between neighboring trees in meters.
    pub spacing_meters: f64,
    /// Randomized layouts generated per proposal.
    pub num_mix_options: usize,
    /// How raw species percentages are checked.
    pub validation: ValidationPolicy,
}

impl Default for PlantingConfig {
    fn default() -> Self {
        Self {
            spacing_meters: DEFAULT_SPACING_METERS,
            num_mix_options: DEFAULT_NUM_MIX_OPTIONS,
            validation: ValidationPolicy::Strict,
        }
    }
}

impl PlantingConfig {
    /// Creates a new [`PlantingConfig`] with the specified tree spacing.
    pub fn new(spacing_meters: f64) -> Self {
        Self {
            spacing_meters,
            ..Default::default()
        }
    }

    /// Sets the number of mix options.
    pub fn with_num_mix_options(mut self, num_mix_options: usize) -> Self {
        self.num_mix_options = num_mix_options;
        self
    }

    /// Sets the percentage validation policy.
    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.spacing_meters.is_finite() || self.spacing_meters <= 0.0 {
            return Err(Error::InvalidConfig("spacing_meters must be > 0".into()));
        }
        if self.num_mix_options == 0 {
            return Err(Error::InvalidConfig("num_mix_options must be >= 1".into()));
        }
        Ok(())
    }
}

/// Layouts ready to be committed, plus the sizing they were built from.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlantingProposal {
    /// Sizing-pass capacity per boundary; `None` for rejected boundaries.
    pub boundary_capacities: Vec<Option<usize>>,
    /// Sum of all boundary capacities.
    pub capacity: usize,
    /// Side of the square layout grid.
    pub grid_side: usize,
    /// Allocated labels, grouped by species in target order.
    pub allocation: Vec<SpeciesId>,
    /// Candidate layouts.
    pub options: Vec<MixOption<SpeciesId>>,
    /// Boundaries skipped during sizing.
    pub boundary_issues: Vec<BoundaryIssue>,
}

impl PlantingProposal {
    /// Index of the option with the fewest same-species neighbor pairs.
    pub fn best_option(&self) -> Option<usize> {
        best_option(&self.options)
    }

    pub fn option(&self, index: usize) -> Option<&MixOption<SpeciesId>> {
        self.options.get(index)
    }

    /// Allocated labels per species, in target order.
    pub fn allocation_counts(&self) -> Vec<(SpeciesId, usize)> {
        label_counts(&self.allocation)
    }
}

/// Result of committing a proposal.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlantingResult {
    /// Trees in boundary order, then lattice order.
    pub assignments: Vec<TreeAssignment>,
    /// Trees per species, in catalog order.
    pub tally: SpeciesTally,
    /// Sum of all boundary capacities.
    pub capacity: usize,
    /// Placement lattice points visited.
    pub points_sampled: usize,
    /// Placement lattice points left without a tree.
    pub points_unplanted: usize,
    /// Labels of the committed sequence never handed out.
    pub labels_unused: usize,
    /// Option index that was committed.
    pub option_index: usize,
    /// Boundaries skipped during sizing.
    pub boundary_issues: Vec<BoundaryIssue>,
}

impl PlantingResult {
    /// Creates a new empty [`PlantingResult`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn planted(&self) -> usize {
        self.assignments.len()
    }
}

/// Places trees for a fixed configuration and species catalog.
pub struct PlantingEngine<'a> {
    /// Run configuration applied to this engine.
    pub config: PlantingConfig,
    /// Species known to this engine.
    pub catalog: &'a SpeciesCatalog,
    lattice: LatticeSampling,
}

impl<'a> PlantingEngine<'a> {
    pub fn try_new(config: PlantingConfig, catalog: &'a SpeciesCatalog) -> Result<Self> {
        config.validate()?;
        let lattice = LatticeSampling::from_spacing_meters(config.spacing_meters)?;
        if !EXPECTED_SPACING_METERS.contains(&config.spacing_meters) {
            warn!(
                "Spacing of {} m is outside the expected {}-{} m range.",
                config.spacing_meters,
                EXPECTED_SPACING_METERS.start(),
                EXPECTED_SPACING_METERS.end()
            );
        }
        Ok(Self {
            config,
            catalog,
            lattice,
        })
    }

    /// The lattice derived from the configured spacing.
    pub fn lattice(&self) -> LatticeSampling {
        self.lattice
    }

    fn allocator(&self) -> SpeciesAllocator<'a> {
        SpeciesAllocator::new(self.catalog).with_policy(self.config.validation)
    }

    /// Size the boundaries, allocate species, and build mix options.
    pub fn propose(
        &self,
        boundaries: &[Boundary],
        targets: &SpeciesTargets,
        rng: &mut impl RngCore,
    ) -> Result<PlantingProposal> {
        self.propose_internal(boundaries, targets, rng, &mut ())
    }

    pub fn propose_with_events(
        &self,
        boundaries: &[Boundary],
        targets: &SpeciesTargets,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<PlantingProposal> {
        self.propose_internal(boundaries, targets, rng, sink)
    }

    /// Assign the labels of option `option_index` to the placement lattice.
    pub fn commit(
        &self,
        boundaries: &[Boundary],
        proposal: &PlantingProposal,
        option_index: usize,
    ) -> Result<PlantingResult> {
        self.commit_internal(boundaries, proposal, option_index, &mut ())
    }

    pub fn commit_with_events(
        &self,
        boundaries: &[Boundary],
        proposal: &PlantingProposal,
        option_index: usize,
        sink: &mut dyn EventSink,
    ) -> Result<PlantingResult> {
        self.commit_internal(boundaries, proposal, option_index, sink)
    }

    /// Propose and commit the best option in one step.
    pub fn place(
        &self,
        boundaries: &[Boundary],
        targets: &SpeciesTargets,
        rng: &mut impl RngCore,
    ) -> Result<PlantingResult> {
        self.place_with_events(boundaries, targets, rng, &mut ())
    }

    pub fn place_with_events(
        &self,
        boundaries: &[Boundary],
        targets: &SpeciesTargets,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<PlantingResult> {
        let proposal = self.propose_internal(boundaries, targets, rng, sink)?;
        let option_index = proposal.best_option().unwrap_or(0);
        self.commit_internal(boundaries, &proposal, option_index, sink)
    }

    fn propose_internal(
        &self,
        boundaries: &[Boundary],
        targets: &SpeciesTargets,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<PlantingProposal> {
        if sink.wants(PlantingEventKind::RunStarted) {
            sink.send(PlantingEvent::RunStarted {
                config: self.config.clone(),
                boundary_count: boundaries.len(),
            });
        }

        let allocator = self.allocator();
        allocator.validate(targets)?;

        if boundaries.is_empty() {
            warn!("Planting run has no boundaries.");
            if sink.wants(PlantingEventKind::Warning) {
                sink.send(PlantingEvent::Warning {
                    context: "run".into(),
                    message: "Planting run has no boundaries".into(),
                });
            }
        }

        let mut boundary_capacities = Vec::with_capacity(boundaries.len());
        let mut boundary_issues = Vec::new();
        for (index, boundary) in boundaries.iter().enumerate() {
            if let Err(e) = boundary.validate() {
                warn!("Skipping boundary {}: {}.", index, e);
                let message = e.to_string();
                if sink.wants(PlantingEventKind::BoundaryRejected) {
                    sink.send(PlantingEvent::BoundaryRejected {
                        index,
                        message: message.clone(),
                    });
                }
                if sink.wants(PlantingEventKind::Warning) {
                    sink.send(PlantingEvent::Warning {
                        context: format!("boundary {index}"),
                        message: message.clone(),
                    });
                }
                boundary_issues.push(BoundaryIssue { index, message });
                boundary_capacities.push(None);
                continue;
            }

            let capacity = self.lattice.capacity(boundary);
            debug!("Boundary {} holds {} interior lattice points.", index, capacity);
            if sink.wants(PlantingEventKind::CapacityMeasured) {
                sink.send(PlantingEvent::CapacityMeasured { index, capacity });
            }
            boundary_capacities.push(Some(capacity));
        }
        let capacity: usize = boundary_capacities.iter().flatten().sum();

        let allocation = allocator.allocate(targets, capacity)?;
        if sink.wants(PlantingEventKind::SpeciesAllocated) {
            sink.send(PlantingEvent::SpeciesAllocated {
                capacity,
                counts: label_counts(&allocation),
            });
        }

        if allocation.len() < capacity {
            warn!(
                "Rounding left {} of {} lattice points without a species.",
                capacity - allocation.len(),
                capacity
            );
        }

        let grid_side = square_side(capacity);
        let options = generate_mix_options(
            &allocation,
            self.config.num_mix_options,
            grid_side,
            grid_side,
            rng,
        );
        for (option_index, option) in options.iter().enumerate() {
            debug!(
                "Mix option {}: {} labels on a {}x{} grid, {} same-species pairs.",
                option_index,
                option.sequence.len(),
                grid_side,
                grid_side,
                option.same_label_pairs
            );
            if sink.wants(PlantingEventKind::MixGenerated) {
                sink.send(PlantingEvent::MixGenerated {
                    option_index,
                    placed: option.sequence.len(),
                    same_label_pairs: option.same_label_pairs,
                });
            }
        }

        info!(
            "Proposed {} mix option(s): capacity {}, {} labels allocated, {}x{} layout grid.",
            options.len(),
            capacity,
            allocation.len(),
            grid_side,
            grid_side
        );

        Ok(PlantingProposal {
            boundary_capacities,
            capacity,
            grid_side,
            allocation,
            options,
            boundary_issues,
        })
    }

    fn commit_internal(
        &self,
        boundaries: &[Boundary],
        proposal: &PlantingProposal,
        option_index: usize,
        sink: &mut dyn EventSink,
    ) -> Result<PlantingResult> {
        if boundaries.len() != proposal.boundary_capacities.len() {
            return Err(Error::InvalidConfig(format!(
                "proposal was built for {} boundaries, got {}",
                proposal.boundary_capacities.len(),
                boundaries.len()
            )));
        }
        let option = proposal.option(option_index).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "mix option {} does not exist; {} available",
                option_index,
                proposal.options.len()
            ))
        })?;
        if sink.wants(PlantingEventKind::MixCommitted) {
            sink.send(PlantingEvent::MixCommitted { option_index });
        }

        let mut labels = option.sequence.iter();
        let mut tally = SpeciesTally::for_catalog(self.catalog);
        let mut assignments = Vec::with_capacity(option.sequence.len());
        let mut points_sampled = 0usize;

        for (index, boundary) in boundaries.iter().enumerate() {
            if proposal.boundary_capacities[index].is_none() {
                continue;
            }

            let mut points = 0usize;
            let mut planted = 0usize;
            for position in self.lattice.placement_points(boundary) {
                points += 1;
                let Some(species_id) = labels.next() else {
                    continue;
                };
                let assignment = TreeAssignment {
                    species_id: species_id.clone(),
                    position,
                    boundary_index: index,
                };
                tally.increment(species_id);
                if sink.wants(PlantingEventKind::TreePlanted) {
                    sink.send(PlantingEvent::TreePlanted {
                        assignment: assignment.clone(),
                    });
                }
                assignments.push(assignment);
                planted += 1;
            }

            debug!(
                "Boundary {}: planted {} of {} lattice points.",
                index, planted, points
            );
            if sink.wants(PlantingEventKind::BoundaryPlanted) {
                sink.send(PlantingEvent::BoundaryPlanted {
                    index,
                    points,
                    planted,
                });
            }
            points_sampled += points;
        }

        let labels_unused = labels.len();
        let result = PlantingResult {
            points_unplanted: points_sampled - assignments.len(),
            assignments,
            tally,
            capacity: proposal.capacity,
            points_sampled,
            labels_unused,
            option_index,
            boundary_issues: proposal.boundary_issues.clone(),
        };

        info!(
            "Planted {} trees across {} boundaries ({} points unplanted, {} labels unused).",
            result.planted(),
            boundaries.len() - result.boundary_issues.len(),
            result.points_unplanted,
            result.labels_unused
        );

        if sink.wants(PlantingEventKind::RunFinished) {
            sink.send(PlantingEvent::RunFinished {
                result: result.clone(),
            });
        }

        Ok(result)
    }
}
