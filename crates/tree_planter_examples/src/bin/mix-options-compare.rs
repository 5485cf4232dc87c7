use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tree_planter::prelude::*;
use tree_planter_examples::{init_tracing, render_planting_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // An L-shaped field so the lattice rows differ in length.
    let field = Boundary::new([
        (-99.2000, 19.3000),
        (-99.2000, 19.3020),
        (-99.1990, 19.3020),
        (-99.1990, 19.3010),
        (-99.1980, 19.3010),
        (-99.1980, 19.3000),
    ]);
    let boundaries = [field];

    let catalog = SpeciesCatalog::orchard();
    let targets = SpeciesTargets::new()
        .with_target("M", 40.0)
        .with_target("L", 30.0)
        .with_target("N", 20.0)
        .with_target("S", 10.0);

    let config = PlantingConfig::new(6.0).with_num_mix_options(4);
    let engine = PlantingEngine::try_new(config, &catalog)?;
    let mut rng = StdRng::seed_from_u64(7);
    let proposal = engine.propose(&boundaries, &targets, &mut rng)?;

    let render = RenderConfig::for_catalog((800, 800), &catalog).with_tree_radius(4);
    for (i, option) in proposal.options.iter().enumerate() {
        let result = engine.commit(&boundaries, &proposal, i)?;
        info!(
            "option {}: {} same-species pairs on the layout grid, {} trees planted",
            i,
            option.same_label_pairs,
            result.planted()
        );
        render_planting_to_png(
            &boundaries,
            &result,
            &render,
            format!("mix-options-compare-{i}.png"),
        )?;
    }

    if let Some(best) = proposal.best_option() {
        info!("best option: {}", best);
    }
    Ok(())
}
