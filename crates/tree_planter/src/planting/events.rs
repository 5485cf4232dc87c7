//! Event types and sinks for observing planting runs.
//!
//! This module defines [`PlantingEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while executing
//! [`crate::planting::runner::PlantingEngine`] proposals and commits.
use crate::planting::runner::{PlantingConfig, PlantingResult};
use crate::planting::TreeAssignment;
use crate::species::SpeciesId;

/// Describes events emitted by planting operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum PlantingEvent {
    /// Emitted when a proposal starts.
    RunStarted {
        /// The configuration used.
        config: PlantingConfig,
        /// Number of boundaries supplied.
        boundary_count: usize,
    },

    /// Emitted when a boundary fails validation and is skipped.
    BoundaryRejected {
        /// Index of the boundary in the input.
        index: usize,
        /// Validation failure.
        message: String,
    },

    /// Emitted after the sizing pass of one boundary.
    CapacityMeasured {
        /// Index of the boundary in the input.
        index: usize,
        /// Strictly interior lattice points at nominal spacing.
        capacity: usize,
    },

    /// Emitted once the species list has been allocated.
    SpeciesAllocated {
        /// Sum of all boundary capacities.
        capacity: usize,
        /// Labels per species, in target order.
        counts: Vec<(SpeciesId, usize)>,
    },

    /// Emitted for each generated mix option.
    MixGenerated {
        /// Position of the option in the proposal.
        option_index: usize,
        /// Labels that fit the layout grid.
        placed: usize,
        /// Moore-adjacent pairs sharing a species.
        same_label_pairs: usize,
    },

    /// Emitted when a mix option is committed to planting.
    MixCommitted {
        /// Position of the chosen option in the proposal.
        option_index: usize,
    },

    /// Emitted when a tree is assigned to a lattice point.
    TreePlanted {
        /// The assignment.
        assignment: TreeAssignment,
    },

    /// Emitted after all lattice points of a boundary were visited.
    BoundaryPlanted {
        /// Index of the boundary in the input.
        index: usize,
        /// Placement lattice points inside the boundary.
        points: usize,
        /// Trees assigned in this boundary.
        planted: usize,
    },

    /// Emitted when the commit finishes.
    RunFinished {
        /// Final result.
        result: PlantingResult,
    },

    /// Non-fatal warning generated during planting.
    Warning {
        /// Context string (e.g. boundary index).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`PlantingEvent`], used to filter before building an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlantingEventKind {
    RunStarted,
    BoundaryRejected,
    CapacityMeasured,
    SpeciesAllocated,
    MixGenerated,
    MixCommitted,
    TreePlanted,
    BoundaryPlanted,
    RunFinished,
    Warning,
}

impl PlantingEvent {
    pub fn kind(&self) -> PlantingEventKind {
        match self {
            PlantingEvent::RunStarted { .. } => PlantingEventKind::RunStarted,
            PlantingEvent::BoundaryRejected { .. } => PlantingEventKind::BoundaryRejected,
            PlantingEvent::CapacityMeasured { .. } => PlantingEventKind::CapacityMeasured,
            PlantingEvent::SpeciesAllocated { .. } => PlantingEventKind::SpeciesAllocated,
            PlantingEvent::MixGenerated { .. } => PlantingEventKind::MixGenerated,
            PlantingEvent::MixCommitted { .. } => PlantingEventKind::MixCommitted,
            PlantingEvent::TreePlanted { .. } => PlantingEventKind::TreePlanted,
            PlantingEvent::BoundaryPlanted { .. } => PlantingEventKind::BoundaryPlanted,
            PlantingEvent::RunFinished { .. } => PlantingEventKind::RunFinished,
            PlantingEvent::Warning { .. } => PlantingEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`PlantingEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: PlantingEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: PlantingEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = PlantingEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: PlantingEvent) {}

    #[inline]
    fn wants(&self, _kind: PlantingEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(PlantingEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(PlantingEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(PlantingEvent),
{
    #[inline]
    fn send(&mut self, event: PlantingEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally only some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<PlantingEvent>,
    only: Option<Vec<PlantingEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            only: None,
        }
    }

    /// Collect only the listed kinds.
    pub fn filtered(kinds: &[PlantingEventKind]) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.to_vec()),
        }
    }

    pub fn into_inner(self) -> Vec<PlantingEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[PlantingEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: PlantingEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: PlantingEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: PlantingEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: PlantingEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
