use std::path::PathBuf;

use anyhow::{Context, Result};
use log::error;

use antibiotic_story::chart::build_chart;
use antibiotic_story::config::PageConfig;
use antibiotic_story::data::loader::load_builtin;
use antibiotic_story::data::model::Annotation;
use antibiotic_story::data::reshape::reshape;
use antibiotic_story::export::{write_csv, write_html, write_vegalite};

/// Writes the chart, the page and the tidy table into the current directory.
fn run() -> Result<()> {
    let config = PageConfig::default();
    let records = load_builtin().context("loading the built-in MIC dataset")?;
    let rows = reshape(&records);
    let chart = build_chart(&rows, &[Annotation::penicillin_cluster()], &config.chart)
        .context("building the MIC chart")?;

    let vl_path = PathBuf::from("antibiotic_story.vl.json");
    let html_path = PathBuf::from("antibiotic_story.html");
    let csv_path = PathBuf::from("antibiotic_mic.csv");

    write_vegalite(&vl_path, &chart)?;
    write_html(&html_path, &config, &rows, &chart)?;
    write_csv(&csv_path, &rows)?;

    println!(
        "Wrote {} observations to {}, {} and {}",
        rows.len(),
        vl_path.display(),
        html_path.display(),
        csv_path.display()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
