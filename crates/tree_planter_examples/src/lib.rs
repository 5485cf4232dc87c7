#![forbid(unsafe_code)]

mod description;
mod rendering;

pub use description::{
    write_report_ron, BoundaryDef, FieldReport, PlantingDescription, PlantingReport, SpeciesDef,
    SpeciesReport,
};
pub use rendering::{init_tracing, named_color, render_planting_to_png, RenderConfig};
