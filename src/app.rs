use eframe::egui;

use crate::chart::ChartSpec;
use crate::config::PageConfig;
use crate::data::model::TidyRow;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AntibioticStoryApp {
    pub state: AppState,
}

impl AntibioticStoryApp {
    pub fn new(config: PageConfig, rows: Vec<TidyRow>, chart: ChartSpec) -> Self {
        Self {
            state: AppState::new(config, rows, chart),
        }
    }
}

impl eframe::App for AntibioticStoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + heading ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
            panels::heading(ui, &self.state);
        });

        // ---- Bottom panel: caption ----
        egui::TopBottomPanel::bottom("caption").show(ctx, |ui| {
            panels::caption(ui, &self.state);
        });

        // ---- Right side panel: legend ----
        egui::SidePanel::right("legend_panel")
            .default_width(200.0)
            .resizable(false)
            .show(ctx, |ui| {
                panels::legend_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::mic_plot(ui, &mut self.state);
        });
    }
}

/// Open the native window for the given page, observations and chart.
pub fn render(config: PageConfig, rows: Vec<TidyRow>, chart: ChartSpec) -> eframe::Result {
    let legend_width = 220.0;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title())
            .with_inner_size([
                config.chart.width + legend_width + 40.0,
                config.chart.height + 200.0,
            ])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let app_name = config.page_title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(|_cc| Ok(Box::new(AntibioticStoryApp::new(config, rows, chart)))),
    )
}
