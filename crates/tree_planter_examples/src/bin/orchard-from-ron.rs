use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tree_planter::prelude::*;
use tree_planter_examples::{
    init_tracing, render_planting_to_png, write_report_ron, PlantingDescription, RenderConfig,
};

const DEFAULT_DESCRIPTION: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/orchard.ron");

fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
    let description = PlantingDescription::load(&path)?;

    let catalog = description.catalog()?;
    let targets = description.targets(&catalog);
    let boundaries = description.boundaries();
    let engine = PlantingEngine::try_new(description.config(), &catalog)?;
    let mut rng = StdRng::seed_from_u64(description.seed);

    let proposal = engine.propose(&boundaries, &targets, &mut rng)?;
    for (i, option) in proposal.options.iter().enumerate() {
        info!(
            "option {}: {} trees, {} same-species neighbor pairs",
            i,
            option.sequence.len(),
            option.same_label_pairs
        );
    }

    let best = proposal.best_option().unwrap_or(0);
    info!("committing option {}", best);
    let result = engine.commit(&boundaries, &proposal, best)?;

    for issue in &result.boundary_issues {
        info!("skipped field {}: {}", issue.index, issue.message);
    }
    for (id, count) in result.tally.iter() {
        let name = catalog.get(id).map_or(id.as_str(), |s| s.name.as_str());
        info!("{:<20} {}", name, count);
    }

    let report = description.report(&catalog, &result);
    for field in &report.fields {
        let name = field.name.as_deref().unwrap_or("unnamed");
        info!("field {} ({}): {} trees", field.index, name, field.planted);
    }
    write_report_ron(&report, "orchard-from-ron.ron")?;
    let config = RenderConfig::for_catalog((1000, 1000), &catalog);
    render_planting_to_png(&boundaries, &result, &config, "orchard-from-ron.png")?;
    Ok(())
}
