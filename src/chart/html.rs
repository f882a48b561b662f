//! Standalone HTML page renderer
//!
//! Produces a single self-contained document: page title and emoji favicon,
//! heading, the chart rendered by vega-embed from the Vega-Lite translation,
//! the caption, and a collapsible table of the plotted observations.

use super::spec::ChartSpec;
use super::vegalite::to_vegalite;
use crate::config::PageConfig;
use crate::data::model::{columns, TidyRow};

const VEGA_SCRIPTS: [&str; 3] = [
    "https://cdn.jsdelivr.net/npm/vega@5",
    "https://cdn.jsdelivr.net/npm/vega-lite@5",
    "https://cdn.jsdelivr.net/npm/vega-embed@6",
];

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Keep the embedded JSON from closing the surrounding `<script>` element.
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// SVG data URI that draws the page icon as the favicon.
fn favicon_href(icon: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>{}</text></svg>",
        escape_html(icon)
    );
    format!("data:image/svg+xml,{}", svg.replace('#', "%23"))
}

fn data_table(rows: &[TidyRow]) -> String {
    let mut html = String::from("<table class=\"observations\">\n<thead><tr>");
    for col in [
        columns::BACTERIA,
        columns::GRAM_STAINING,
        columns::ANTIBIOTIC,
        columns::MIC,
    ] {
        html.push_str(&format!("<th>{}</th>", escape_html(col)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.name),
            row.gram_stain,
            row.antibiotic,
            row.mic
        ));
    }
    html.push_str("</tbody>\n</table>");
    html
}

/// Render the complete page for `chart`, with `rows` listed under the caption.
pub fn render(
    config: &PageConfig,
    rows: &[TidyRow],
    chart: &ChartSpec,
) -> serde_json::Result<String> {
    let spec_json = script_safe_json(&to_vegalite(chart)?.to_string());
    let scripts: String = VEGA_SCRIPTS
        .iter()
        .map(|src| format!("  <script src=\"{src}\"></script>\n"))
        .collect();
    let max_width = if chart.container_width {
        "100%".to_string()
    } else {
        format!("{}px", chart.width)
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="icon" href="{favicon}">
{scripts}  <style>
    body {{ font-family: sans-serif; margin: 2rem auto; max-width: 760px; padding: 0 1rem; }}
    #chart {{ width: {max_width}; }}
    .caption {{ color: #666; font-size: 0.875rem; }}
    table.observations {{ border-collapse: collapse; font-size: 0.8rem; }}
    table.observations td, table.observations th {{ border: 1px solid #ddd; padding: 2px 6px; }}
  </style>
</head>
<body>
  <h1>{heading}</h1>
  <div id="chart"></div>
  <p class="caption">{caption}</p>
  <details>
    <summary>Data ({count} observations)</summary>
{table}
  </details>
  <script type="text/javascript">
    const spec = {spec_json};
    vegaEmbed('#chart', spec, {{ "actions": true }}).catch(console.error);
  </script>
</body>
</html>
"#,
        title = escape_html(&config.page_title),
        favicon = escape_html(&favicon_href(&config.page_icon)),
        scripts = scripts,
        max_width = max_width,
        heading = escape_html(&config.heading),
        caption = escape_html(&config.caption),
        count = rows.len(),
        table = data_table(rows),
        spec_json = spec_json,
    ))
}
