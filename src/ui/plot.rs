use eframe::egui::{Align2, Pos2, Rect, RichText, Ui, Vec2};
use egui_plot::{GridInput, GridMark, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::chart::spec::{FieldRef, Mark, PositionChannel, ScaleType, TextAlign};
use crate::data::model::{columns, Antibiotic, TidyRow};
use crate::state::AppState;

/// Hover radius around a point centre, in screen pixels.
const HOVER_RADIUS: f32 = 10.0;

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Map a value onto the plot's y axis according to the channel's scale.
pub fn scale_value(scale: ScaleType, value: f64) -> f64 {
    match scale {
        ScaleType::Linear => value,
        ScaleType::Log { base } => value.log(base),
    }
}

/// Tick label for a log10 axis position. Only whole decades are labelled.
pub fn log_tick_label(log_value: f64) -> String {
    let exp = log_value.round();
    if (log_value - exp).abs() > 1e-6 {
        return String::new();
    }
    let exp = exp as i32;
    if exp >= 0 {
        format!("{}", 10_f64.powi(exp))
    } else {
        format!("{:.*}", (-exp) as usize, 10_f64.powi(exp))
    }
}

/// Category label for an x position (0 = first antibiotic).
pub fn category_label(x: f64) -> String {
    let slot = x.round();
    if (x - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    Antibiotic::from_position(slot as usize)
        .map(|a| a.to_string())
        .unwrap_or_default()
}

/// One grid line per category slot.
fn category_grid(input: GridInput) -> Vec<GridMark> {
    Antibiotic::ALL
        .iter()
        .map(|a| a.position() as f64)
        .filter(|&x| x >= input.bounds.0 && x <= input.bounds.1)
        .map(|value| GridMark {
            value,
            step_size: 1.0,
        })
        .collect()
}

/// Radius in pixels of a circle with the given area in square pixels.
pub fn radius_from_area(area: f64) -> f32 {
    (area / std::f64::consts::PI).sqrt() as f32
}

// ---------------------------------------------------------------------------
// Tooltip and hit testing
// ---------------------------------------------------------------------------

fn field_value(row: &TidyRow, field: &str) -> String {
    match field {
        columns::BACTERIA => row.name.clone(),
        columns::GRAM_STAINING => row.gram_stain.to_string(),
        columns::ANTIBIOTIC => row.antibiotic.to_string(),
        columns::MIC => row.mic.to_string(),
        _ => String::new(),
    }
}

/// `field: value` lines for the tooltip, in the chart's tooltip order.
pub fn tooltip_lines(row: &TidyRow, fields: &[FieldRef]) -> Vec<String> {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, field_value(row, &f.field)))
        .collect()
}

/// Index of the point closest to `pointer` within `radius` pixels.
pub fn nearest_point(
    points: impl IntoIterator<Item = (usize, Pos2)>,
    pointer: Pos2,
    radius: f32,
) -> Option<usize> {
    points
        .into_iter()
        .map(|(i, pos)| (i, pos.distance(pointer)))
        .filter(|&(_, d)| d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// True when the plot frame moved or resized since the last frame.
pub fn frame_changed(previous: Option<Rect>, current: Rect) -> bool {
    previous != Some(current)
}

fn axis_title(channel: Option<&PositionChannel>) -> String {
    channel
        .and_then(|c| c.title.resolve(&c.field).map(str::to_string))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// MIC scatter (central panel)
// ---------------------------------------------------------------------------

/// Render the chart's observation and annotation layers.
pub fn mic_plot(ui: &mut Ui, state: &mut AppState) {
    let Some(layer) = state.chart.observation_layer() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Nothing to plot");
        });
        return;
    };

    let encoding = &layer.encoding;
    let y_scale = encoding
        .y
        .as_ref()
        .map(|c| c.scale)
        .unwrap_or(ScaleType::Linear);
    let radius = match layer.mark {
        Mark::Point { size } => radius_from_area(size),
        Mark::Text(_) => radius_from_area(state.config.chart.point_size),
    };
    let x_title = axis_title(encoding.x.as_ref());
    let y_title = axis_title(encoding.y.as_ref());

    let mut plot = Plot::new("mic_plot")
        .height(state.chart.height)
        .x_axis_label(x_title)
        .y_axis_label(y_title)
        .x_axis_formatter(|mark, _range| category_label(mark.value))
        .x_grid_spacer(category_grid)
        .include_x(-0.5)
        .include_x(Antibiotic::ALL.len() as f64 - 0.5)
        .show_x(false)
        .show_y(false)
        .label_formatter(|_, _| String::new())
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false);

    if state.chart.container_width {
        plot = plot.width(ui.available_width());
    } else {
        plot = plot.width(state.chart.width);
    }

    if y_scale.is_log() {
        plot = plot
            .y_axis_formatter(|mark, _range| log_tick_label(mark.value))
            .y_grid_spacer(egui_plot::log_grid_spacer(10));
    }

    // Pad the value range by half a decade on each side.
    let values = state.rows.iter().map(|r| scale_value(y_scale, r.mic));
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo.is_finite() && hi.is_finite() {
        plot = plot.include_y(lo - 0.5).include_y(hi + 0.5);
    }

    let response = plot.show(ui, |plot_ui| {
        for row in &state.rows {
            let opacity = state.opacity_for(row.gram_stain);
            let color = state
                .color_map
                .as_ref()
                .map(|cm| cm.faded(row.gram_stain, opacity))
                .unwrap_or_default();

            let point = [
                row.antibiotic.position() as f64,
                scale_value(y_scale, row.mic),
            ];
            let series: PlotPoints = std::iter::once(point).collect();
            plot_ui.points(
                Points::new(series)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(radius)
                    .color(color)
                    .name(&row.name),
            );
        }

        // Pixel offsets go through the previous frame's transform; a changed
        // frame triggers a repaint below.
        for (annotation, mark) in state.chart.annotations() {
            let anchor = plot_ui.screen_from_plot(PlotPoint::new(
                annotation.antibiotic.position() as f64,
                scale_value(y_scale, annotation.mic),
            ));
            let shifted = anchor + Vec2::new(mark.dx as f32, mark.dy as f32);
            let mut text = RichText::new(&annotation.label).size(mark.font_size as f32);
            if mark.bold {
                text = text.strong();
            }
            let align = match mark.align {
                TextAlign::Left => Align2::LEFT_CENTER,
                TextAlign::Center => Align2::CENTER_CENTER,
                TextAlign::Right => Align2::RIGHT_CENTER,
            };
            let position = plot_ui.plot_from_screen(shifted);
            plot_ui.text(Text::new(position, text).anchor(align));
        }
    });

    let frame = *response.transform.frame();
    if frame_changed(state.plot_frame, frame) {
        state.plot_frame = Some(frame);
        ui.ctx().request_repaint();
    }

    // Hit-test against this frame's transform.
    state.hovered = response.response.hover_pos().and_then(|pointer| {
        let screen_points = state.rows.iter().enumerate().map(|(idx, row)| {
            let point = PlotPoint::new(
                row.antibiotic.position() as f64,
                scale_value(y_scale, row.mic),
            );
            (idx, response.transform.position_from_point(&point))
        });
        nearest_point(screen_points, pointer, radius.max(HOVER_RADIUS))
    });

    if let Some(row) = state.hovered.and_then(|i| state.rows.get(i)) {
        let lines = tooltip_lines(row, &encoding.tooltip);
        response.response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            for line in lines {
                ui.label(line);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::{FieldType, Title};
    use crate::data::model::GramStain;

    #[test]
    fn test_log_tick_labels() {
        assert_eq!(log_tick_label(-3.0), "0.001");
        assert_eq!(log_tick_label(-1.0), "0.1");
        assert_eq!(log_tick_label(0.0), "1");
        assert_eq!(log_tick_label(2.0), "100");
        assert_eq!(log_tick_label(0.5), "");
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(category_label(0.0), "Penicillin");
        assert_eq!(category_label(1.0), "Streptomycin");
        assert_eq!(category_label(2.0), "Neomycin");
        assert_eq!(category_label(3.0), "");
        assert_eq!(category_label(-1.0), "");
        assert_eq!(category_label(0.5), "");
    }

    #[test]
    fn test_scale_value() {
        assert!((scale_value(ScaleType::Log { base: 10.0 }, 0.001) + 3.0).abs() < 1e-9);
        assert_eq!(scale_value(ScaleType::Linear, 870.0), 870.0);
    }

    #[test]
    fn test_radius_from_area() {
        let r = radius_from_area(120.0);
        assert!((r - 6.18).abs() < 0.01, "{r}");
    }

    #[test]
    fn test_tooltip_follows_field_order() {
        let row = TidyRow {
            name: "Bacillus anthracis".to_string(),
            gram_stain: GramStain::Positive,
            antibiotic: Antibiotic::Penicillin,
            mic: 0.001,
        };
        let fields = [
            FieldRef::new("Bacteria", FieldType::Nominal),
            FieldRef::new("Antibiotic", FieldType::Nominal),
            FieldRef::new("MIC", FieldType::Quantitative),
            FieldRef::new("Gram_Staining", FieldType::Nominal),
        ];
        assert_eq!(
            tooltip_lines(&row, &fields),
            vec![
                "Bacteria: Bacillus anthracis",
                "Antibiotic: Penicillin",
                "MIC: 0.001",
                "Gram_Staining: positive",
            ]
        );
    }

    #[test]
    fn test_nearest_point() {
        let points = vec![
            (0, Pos2::new(10.0, 10.0)),
            (1, Pos2::new(14.0, 10.0)),
            (2, Pos2::new(100.0, 100.0)),
        ];
        assert_eq!(nearest_point(points.clone(), Pos2::new(13.0, 10.0), 8.0), Some(1));
        assert_eq!(nearest_point(points.clone(), Pos2::new(9.0, 11.0), 8.0), Some(0));
        assert_eq!(nearest_point(points, Pos2::new(50.0, 50.0), 8.0), None);
    }

    #[test]
    fn test_frame_changed() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(650.0, 420.0));
        assert!(frame_changed(None, rect));
        assert!(!frame_changed(Some(rect), rect));
        let resized = Rect::from_min_size(Pos2::ZERO, Vec2::new(500.0, 420.0));
        assert!(frame_changed(Some(rect), resized));
    }

    #[test]
    fn test_axis_title_resolution() {
        let hidden = PositionChannel {
            field: "Antibiotic".to_string(),
            field_type: FieldType::Nominal,
            scale: ScaleType::Linear,
            title: Title::Hidden,
        };
        assert_eq!(axis_title(Some(&hidden)), "");
        let auto = PositionChannel {
            title: Title::Auto,
            ..hidden
        };
        assert_eq!(axis_title(Some(&auto)), "Antibiotic");
        assert_eq!(axis_title(None), "");
    }
}
