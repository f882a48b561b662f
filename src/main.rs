use anyhow::{Context, Result};
use log::{error, info};

use antibiotic_story::app;
use antibiotic_story::chart::build_chart;
use antibiotic_story::config::PageConfig;
use antibiotic_story::data::loader::load_builtin;
use antibiotic_story::data::model::Annotation;
use antibiotic_story::data::reshape::reshape;

fn run() -> Result<()> {
    let config = PageConfig::default();

    let records = load_builtin().context("loading the built-in MIC dataset")?;
    let rows = reshape(&records);
    let chart = build_chart(&rows, &[Annotation::penicillin_cluster()], &config.chart)
        .context("building the MIC chart")?;
    info!("{} species → {} observations", records.len(), rows.len());

    app::render(config, rows, chart).map_err(|e| anyhow::anyhow!("window error: {e}"))
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
