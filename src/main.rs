//! Favtree binary: runs the favorite-prediction analysis with the default
//! configuration. All parameters (paths, split ratio, seeds) are the
//! pipeline defaults; there are no command-line flags.

use anyhow::Context;
use favtree::{Pipeline, PipelineConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = PipelineConfig::default();
    let pipeline = Pipeline::new(config).context("invalid pipeline configuration")?;
    let report = pipeline.run().context("pipeline run failed")?;

    log::info!(
        "Run complete: accuracy {:.2}% over {} holdout rows, tree with {} nodes at depth {}",
        report.accuracy * 100.0,
        report.num_test,
        report.num_nodes,
        report.depth
    );
    Ok(())
}
