//! Page configuration
//!
//! Everything the renderers need to know about the page around the chart.
//! Built once in `main` and passed down; nothing here is global.

use serde::Serialize;

/// Chart sizing in logical pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    /// Nominal chart width (used as-is when `use_container_width` is false).
    pub width: f32,

    pub height: f32,

    /// Stretch the chart to the width of its container.
    pub use_container_width: bool,

    /// Point mark area in square pixels.
    pub point_size: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 650.0,
            height: 420.0,
            use_container_width: true,
            point_size: 120.0,
        }
    }
}

/// Page metadata and the fixed explanatory text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageConfig {
    pub page_title: String,

    /// Single emoji shown next to the title.
    pub page_icon: String,

    pub heading: String,

    /// Text rendered under the chart.
    pub caption: String,

    pub chart: ChartConfig,
}

impl PageConfig {
    /// Title with the icon prefixed, as used for the window caption.
    pub fn window_title(&self) -> String {
        if self.page_icon.is_empty() {
            self.page_title.clone()
        } else {
            format!("{} {}", self.page_icon, self.page_title)
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_title: "Antibiotic Effectiveness Story".to_string(),
            page_icon: "\u{1F9EB}".to_string(),
            heading: "Penicillin\u{2019}s Edge Against Gram\u{2011}Positive Pathogens".to_string(),
            caption: concat!(
                "MIC is log\u{2011}scaled\u{2014}lower values indicate stronger potency. ",
                "The annotation shows how Gram\u{2011}positive bacteria cluster at sub\u{2011}\u{b5}g/mL Penicillin, ",
                "whereas Gram\u{2011}negative species require much higher doses."
            )
            .to_string(),
            chart: ChartConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PageConfig::default();
        assert_eq!(config.page_title, "Antibiotic Effectiveness Story");
        assert_eq!(config.chart.width, 650.0);
        assert_eq!(config.chart.height, 420.0);
        assert!(config.chart.use_container_width);
        assert!(config.caption.starts_with("MIC is log"));
    }

    #[test]
    fn test_window_title() {
        let mut config = PageConfig::default();
        assert_eq!(
            config.window_title(),
            "\u{1F9EB} Antibiotic Effectiveness Story"
        );
        config.page_icon.clear();
        assert_eq!(config.window_title(), "Antibiotic Effectiveness Story");
    }
}
