use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tree_planter::prelude::*;
use tree_planter_examples::{init_tracing, render_planting_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Roughly 110 m x 110 m near the equator, planted every 6 m.
    let field = Boundary::new([(0.0, 0.0), (0.0, 0.001), (0.001, 0.001), (0.001, 0.0)]);
    let catalog = SpeciesCatalog::new(vec![
        Species::new("A", "Avocado", "green"),
        Species::new("B", "Banana", "yellow"),
    ])?;
    let targets = SpeciesTargets::new()
        .with_target("A", 50.0)
        .with_target("B", 50.0);

    let engine = PlantingEngine::try_new(PlantingConfig::new(6.0), &catalog)?;
    let mut rng = StdRng::seed_from_u64(42);
    let boundaries = [field];
    let result = engine.place(&boundaries, &targets, &mut rng)?;

    for (id, count) in result.tally.iter() {
        info!("{}: {} trees", id, count);
    }
    info!(
        "capacity {}, planted {}, unplanted points {}, unused labels {}",
        result.capacity,
        result.planted(),
        result.points_unplanted,
        result.labels_unused
    );

    let config = RenderConfig::for_catalog((800, 800), &catalog).with_tree_radius(6);
    render_planting_to_png(&boundaries, &result, &config, "square-two-species.png")?;
    Ok(())
}
