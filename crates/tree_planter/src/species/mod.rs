//! Species catalog and percentage targets.
//!
//! A [`SpeciesCatalog`] is an immutable list of [`Species`] passed explicitly to the
//! allocator and the planting engine. Placement logic only compares [`SpeciesId`]s; names,
//! colors, and icons are carried through for presentation.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod allocation;

pub type SpeciesId = String;

/// A plantable species and its display metadata.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Species {
    pub id: SpeciesId,
    /// Human readable name.
    pub name: String,
    /// Marker color name, e.g. `"red"`.
    pub color: String,
    /// Optional marker icon URL.
    pub icon: Option<String>,
}

impl Species {
    pub fn new(id: impl Into<SpeciesId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Ordered, immutable set of species known to a planting run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeciesCatalog {
    species: Vec<Species>,
}

impl SpeciesCatalog {
    /// Build a catalog. Duplicate ids are rejected.
    pub fn new(species: Vec<Species>) -> Result<Self> {
        for (i, s) in species.iter().enumerate() {
            if species[..i].iter().any(|other| other.id == s.id) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate species id '{}' in catalog",
                    s.id
                )));
            }
        }
        Ok(Self { species })
    }

    /// Eight tropical fruit species with Google Earth paddle markers.
    pub fn orchard() -> Self {
        const PADDLE: &str = "http://maps.google.com/mapfiles/kml/paddle";
        let entries = [
            ("Z", "Zapote Mamey", "red", "red-circle"),
            ("L", "Litchi", "green", "grn-circle"),
            ("M", "Mango Tommy", "yellow", "ylw-circle"),
            ("R", "Rambután", "blue", "blu-circle"),
            ("G", "Guayaba Rosa", "purple", "purple-circle"),
            ("N", "Naranjas de Mesa", "orange", "orange-circle"),
            ("S", "Limón", "white", "wht-circle"),
            ("J", "Jaboticabo", "pink", "pink-circle"),
        ];
        Self {
            species: entries
                .into_iter()
                .map(|(id, name, color, icon)| {
                    Species::new(id, name, color).with_icon(format!("{PADDLE}/{icon}.png"))
                })
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &SpeciesId> {
        self.species.iter().map(|s| &s.id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Species> {
        self.species.iter()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

/// Target share per species in percent, in insertion order.
///
/// Values do not have to sum to 100; see [`SpeciesTargets::normalized`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeciesTargets {
    entries: Vec<(SpeciesId, f64)>,
}

impl SpeciesTargets {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set the percentage for a species, replacing an earlier value in place.
    pub fn with_target(mut self, id: impl Into<SpeciesId>, percent: f64) -> Self {
        self.set(id, percent);
        self
    }

    pub fn set(&mut self, id: impl Into<SpeciesId>, percent: f64) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = percent,
            None => self.entries.push((id, percent)),
        }
    }

    /// Equal integer share for every catalog species, `floor(100 / n)` each.
    pub fn even(catalog: &SpeciesCatalog) -> Self {
        if catalog.is_empty() {
            return Self::new();
        }
        let share = (100 / catalog.len()) as f64;
        Self {
            entries: catalog.ids().map(|id| (id.clone(), share)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SpeciesId, f64)> {
        self.entries.iter().map(|(id, p)| (id, *p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all percentages as entered.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// Rescale so the percentages sum to 100 while keeping their ratios.
    ///
    /// Fails when any value is negative or non-finite, or when the total is not positive.
    pub fn normalized(&self) -> Result<Self> {
        if let Some((id, p)) = self
            .entries
            .iter()
            .find(|(_, p)| !p.is_finite() || *p < 0.0)
        {
            return Err(Error::InvalidConfig(format!(
                "percentage for species '{id}' must be a finite value >= 0, got {p}"
            )));
        }
        let total = self.total();
        if total <= 0.0 {
            return Err(Error::InvalidPercentages { total });
        }
        let scale = 100.0 / total;
        Ok(Self {
            entries: self
                .entries
                .iter()
                .map(|(id, p)| (id.clone(), p * scale))
                .collect(),
        })
    }
}

impl<S: Into<SpeciesId>> FromIterator<(S, f64)> for SpeciesTargets {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut targets = SpeciesTargets::new();
        for (id, p) in iter {
            targets.set(id, p);
        }
        targets
    }
}
