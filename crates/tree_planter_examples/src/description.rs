//! RON description of a planting job, loaded by the example binaries.
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tree_planter::prelude::*;

fn default_spacing_meters() -> f64 {
    6.0
}

fn default_num_mix_options() -> usize {
    3
}

/// A planting job: fields, species, targets, and run settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlantingDescription {
    /// Species catalog; the built-in orchard catalog when empty.
    #[serde(default)]
    pub species: Vec<SpeciesDef>,
    pub boundaries: Vec<BoundaryDef>,
    #[serde(default = "default_spacing_meters")]
    pub spacing_meters: f64,
    /// Percent per species id; an even split over the catalog when empty.
    #[serde(default)]
    pub targets: Vec<(String, f64)>,
    #[serde(default = "default_num_mix_options")]
    pub num_mix_options: usize,
    #[serde(default)]
    pub validation: ValidationPolicy,
    #[serde(default)]
    pub seed: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpeciesDef {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// One field as (longitude, latitude) vertices.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoundaryDef {
    #[serde(default)]
    pub name: Option<String>,
    pub vertices: Vec<(f64, f64)>,
}

impl From<&SpeciesDef> for Species {
    fn from(def: &SpeciesDef) -> Self {
        let species = Species::new(def.id.clone(), def.name.clone(), def.color.clone());
        match &def.icon {
            Some(icon) => species.with_icon(icon.clone()),
            None => species,
        }
    }
}

impl From<&BoundaryDef> for Boundary {
    fn from(def: &BoundaryDef) -> Self {
        Boundary::new(def.vertices.iter().copied())
    }
}

impl PlantingDescription {
    pub fn from_ron_str(text: &str) -> anyhow::Result<Self> {
        ron::from_str(text).context("failed to parse planting description")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_ron_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn catalog(&self) -> tree_planter::error::Result<SpeciesCatalog> {
        if self.species.is_empty() {
            return Ok(SpeciesCatalog::orchard());
        }
        SpeciesCatalog::new(self.species.iter().map(Species::from).collect())
    }

    pub fn targets(&self, catalog: &SpeciesCatalog) -> SpeciesTargets {
        if self.targets.is_empty() {
            return SpeciesTargets::even(catalog);
        }
        self.targets.iter().cloned().collect()
    }

    pub fn boundaries(&self) -> Vec<Boundary> {
        self.boundaries.iter().map(Boundary::from).collect()
    }

    /// Run settings. The even split does not sum to 100, so it always runs normalized.
    pub fn config(&self) -> PlantingConfig {
        let validation = if self.targets.is_empty() {
            ValidationPolicy::Normalize
        } else {
            self.validation
        };
        PlantingConfig::new(self.spacing_meters)
            .with_num_mix_options(self.num_mix_options)
            .with_validation(validation)
    }
}

/// Trees planted in one field.
#[derive(Clone, Debug, Serialize)]
pub struct FieldReport {
    pub index: usize,
    pub name: Option<String>,
    pub planted: usize,
}

/// Legend entry for one species, with the marker used to display it.
#[derive(Clone, Debug, Serialize)]
pub struct SpeciesReport {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub planted: usize,
}

/// A planting result together with field names and the species legend.
#[derive(Clone, Debug, Serialize)]
pub struct PlantingReport<'a> {
    pub fields: Vec<FieldReport>,
    pub species: Vec<SpeciesReport>,
    pub result: &'a PlantingResult,
}

impl PlantingDescription {
    pub fn report<'a>(
        &self,
        catalog: &SpeciesCatalog,
        result: &'a PlantingResult,
    ) -> PlantingReport<'a> {
        let fields = self
            .boundaries
            .iter()
            .enumerate()
            .map(|(index, def)| FieldReport {
                index,
                name: def.name.clone(),
                planted: result
                    .assignments
                    .iter()
                    .filter(|t| t.boundary_index == index)
                    .count(),
            })
            .collect();
        let species = catalog
            .iter()
            .map(|s| SpeciesReport {
                id: s.id.clone(),
                name: s.name.clone(),
                color: s.color.clone(),
                icon: s.icon.clone(),
                planted: result.tally.get(&s.id),
            })
            .collect();
        PlantingReport {
            fields,
            species,
            result,
        }
    }
}

/// Write a planting report as pretty RON.
pub fn write_report_ron(report: &PlantingReport<'_>, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let text = ron::ser::to_string_pretty(report, ron::ser::PrettyConfig::default())
        .context("failed to serialize planting report")?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
