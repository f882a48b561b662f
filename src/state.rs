use eframe::egui::Rect;
use log::debug;

use crate::chart::spec::{ChartSpec, OpacityChannel};
use crate::color::ColorMap;
use crate::config::PageConfig;
use crate::data::filter::{highlighted_indices, LegendSelection};
use crate::data::model::{GramStain, TidyRow};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: PageConfig,

    /// Tidy observations, in plotting order.
    pub rows: Vec<TidyRow>,

    pub chart: ChartSpec,

    /// Colours from the chart's colour channel.
    pub color_map: Option<ColorMap>,

    /// Gram-stain categories isolated via the legend.
    pub selection: LegendSelection,

    /// Row under the pointer, if any.
    pub hovered: Option<usize>,

    /// Screen rect of the plot on the last drawn frame.
    pub plot_frame: Option<Rect>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: PageConfig, rows: Vec<TidyRow>, chart: ChartSpec) -> Self {
        let color_map = chart
            .observation_layer()
            .and_then(|layer| layer.encoding.color.as_ref())
            .map(ColorMap::from_channel);

        Self {
            config,
            rows,
            chart,
            color_map,
            selection: LegendSelection::new(),
            hovered: None,
            plot_frame: None,
            status_message: None,
        }
    }

    /// Toggle a category in the legend selection.
    pub fn toggle_legend(&mut self, stain: GramStain) {
        self.selection.toggle(stain);
        debug!(
            "legend selection now {:?}",
            self.selection.iter().collect::<Vec<_>>()
        );
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        debug!("legend selection cleared");
    }

    /// Opacity for points of a category under the current selection, using
    /// the levels declared on the chart's opacity channel.
    pub fn opacity_for(&self, stain: GramStain) -> f64 {
        let channel = self
            .chart
            .observation_layer()
            .and_then(|layer| layer.encoding.opacity.as_ref());
        match channel {
            Some(OpacityChannel::Conditional {
                selected,
                otherwise,
                ..
            }) => self.selection.opacity(stain, *selected, *otherwise),
            Some(OpacityChannel::Value(v)) => *v,
            None => 1.0,
        }
    }

    /// Number of rows currently drawn at full opacity.
    pub fn highlighted_count(&self) -> usize {
        highlighted_indices(&self.rows, &self.selection).len()
    }
}
