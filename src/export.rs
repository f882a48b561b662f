use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::chart::html;
use crate::chart::spec::ChartSpec;
use crate::chart::vegalite::to_vegalite_string;
use crate::config::PageConfig;
use crate::data::model::TidyRow;

// ---------------------------------------------------------------------------
// File exports
// ---------------------------------------------------------------------------

/// Write the chart as a Vega-Lite JSON document.
pub fn write_vegalite(path: &Path, chart: &ChartSpec) -> Result<()> {
    let json = to_vegalite_string(chart).context("serializing Vega-Lite spec")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing Vega-Lite spec to {}", path.display()))?;
    info!("wrote Vega-Lite spec to {}", path.display());
    Ok(())
}

/// Write the standalone HTML page.
pub fn write_html(path: &Path, config: &PageConfig, rows: &[TidyRow], chart: &ChartSpec) -> Result<()> {
    let page = html::render(config, rows, chart).context("rendering HTML page")?;
    std::fs::write(path, page)
        .with_context(|| format!("writing HTML page to {}", path.display()))?;
    info!("wrote HTML page to {}", path.display());
    Ok(())
}

/// Write the tidy table as CSV with the dataset's column names.
pub fn write_csv(path: &Path, rows: &[TidyRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating CSV file {}", path.display()))?;
    for (i, row) in rows.iter().enumerate() {
        writer
            .serialize(row)
            .with_context(|| format!("writing CSV row {i}"))?;
    }
    writer.flush().context("flushing CSV file")?;
    info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_chart;
    use crate::data::loader::load_builtin;
    use crate::data::model::Annotation;
    use crate::data::reshape::reshape;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("antibiotic-story-{}-{name}", std::process::id()))
    }

    fn fixture() -> (PageConfig, Vec<TidyRow>, ChartSpec) {
        let config = PageConfig::default();
        let rows = reshape(&load_builtin().unwrap());
        let chart = build_chart(&rows, &[Annotation::penicillin_cluster()], &config.chart).unwrap();
        (config, rows, chart)
    }

    #[test]
    fn test_write_csv() {
        let (_, rows, _) = fixture();
        let path = temp_path("tidy.csv");
        write_csv(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Bacteria,Gram_Staining,Antibiotic,MIC"));
        assert_eq!(lines.next(), Some("Aerobacter aerogenes,negative,Penicillin,870.0"));
        assert_eq!(text.lines().count(), 49);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_write_vegalite_and_html() {
        let (config, rows, chart) = fixture();

        let json_path = temp_path("chart.vl.json");
        write_vegalite(&json_path, &chart).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed["layer"].as_array().unwrap().len(), 2);
        std::fs::remove_file(&json_path).ok();

        let html_path = temp_path("page.html");
        write_html(&html_path, &config, &rows, &chart).unwrap();
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("<title>Antibiotic Effectiveness Story</title>"));
        std::fs::remove_file(&html_path).ok();
    }

    #[test]
    fn test_write_into_missing_directory_fails_with_context() {
        let (_, _, chart) = fixture();
        let path = temp_path("no-such-dir").join("chart.vl.json");
        let err = write_vegalite(&path, &chart).unwrap_err();
        assert!(err.to_string().contains("writing Vega-Lite spec"));
    }
}
