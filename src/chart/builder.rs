//! Builds the MIC scatter chart from the tidy table.

use log::debug;

use super::spec::{
    ChartSpec, ColorChannel, Encoding, FieldRef, FieldType, Layer, LayerData, Mark,
    OpacityChannel, PositionChannel, ScaleType, SelectionParam, TextAlign, TextMark, Title,
};
use crate::config::ChartConfig;
use crate::data::filter::{DIMMED_OPACITY, SELECTED_OPACITY};
use crate::data::model::{columns, Annotation, GramStain, TidyRow};
use crate::error::ChartError;

/// Name of the legend-bound selection parameter.
pub const LEGEND_SELECTION: &str = "legend_select";

pub const MIC_AXIS_TITLE: &str = "MIC (\u{b5}g/mL)";
pub const LEGEND_TITLE: &str = "Gram stain (click to isolate)";

/// Colour per gram stain, in [`GramStain::ALL`] order.
pub const GRAM_PALETTE: [&str; 2] = ["#4C78A8", "#F58518"];

fn antibiotic_x() -> PositionChannel {
    PositionChannel {
        field: columns::ANTIBIOTIC.to_string(),
        field_type: FieldType::Nominal,
        scale: ScaleType::Linear,
        title: Title::Hidden,
    }
}

fn mic_y() -> PositionChannel {
    PositionChannel {
        field: columns::MIC.to_string(),
        field_type: FieldType::Quantitative,
        scale: ScaleType::Log { base: 10.0 },
        title: Title::Text(MIC_AXIS_TITLE.to_string()),
    }
}

fn gram_color() -> ColorChannel {
    ColorChannel {
        field: columns::GRAM_STAINING.to_string(),
        field_type: FieldType::Nominal,
        domain: GramStain::ALL.iter().map(|g| g.to_string()).collect(),
        range: GRAM_PALETTE.iter().map(|c| c.to_string()).collect(),
        legend_title: Title::Text(LEGEND_TITLE.to_string()),
    }
}

/// Point layer: antibiotic × log MIC, coloured by gram stain, dimmed outside
/// the legend selection.
fn points_layer(rows: &[TidyRow], config: &ChartConfig) -> Layer {
    Layer {
        data: LayerData::Observations(rows.to_vec()),
        mark: Mark::Point {
            size: config.point_size,
        },
        encoding: Encoding {
            x: Some(antibiotic_x()),
            y: Some(mic_y()),
            color: Some(gram_color()),
            opacity: Some(OpacityChannel::Conditional {
                param: LEGEND_SELECTION.to_string(),
                selected: SELECTED_OPACITY,
                otherwise: DIMMED_OPACITY,
            }),
            tooltip: vec![
                FieldRef::new(columns::BACTERIA, FieldType::Nominal),
                FieldRef::new(columns::ANTIBIOTIC, FieldType::Nominal),
                FieldRef::new(columns::MIC, FieldType::Quantitative),
                FieldRef::new(columns::GRAM_STAINING, FieldType::Nominal),
            ],
            text: None,
        },
    }
}

/// Text layer; ignores the selection so the label is always visible.
fn annotation_layer(annotations: &[Annotation]) -> Layer {
    Layer {
        data: LayerData::Annotations(annotations.to_vec()),
        mark: Mark::Text(TextMark {
            align: TextAlign::Left,
            dx: 10.0,
            dy: -5.0,
            font_size: 12.0,
            bold: true,
        }),
        encoding: Encoding {
            x: Some(antibiotic_x()),
            y: Some(mic_y()),
            text: Some(FieldRef::new(columns::LABEL, FieldType::Nominal)),
            ..Default::default()
        },
    }
}

fn on_log_scale(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Assemble the layered chart. Fails on an empty table or on a MIC the log
/// scale cannot place.
pub fn build_chart(
    rows: &[TidyRow],
    annotations: &[Annotation],
    config: &ChartConfig,
) -> Result<ChartSpec, ChartError> {
    if rows.is_empty() {
        return Err(ChartError::NoData);
    }
    if let Some(bad) = rows.iter().find(|r| !on_log_scale(r.mic)) {
        return Err(ChartError::NonPositiveValue {
            species: bad.name.clone(),
            antibiotic: bad.antibiotic.to_string(),
            value: bad.mic,
        });
    }
    if let Some(bad) = annotations.iter().find(|a| !on_log_scale(a.mic)) {
        return Err(ChartError::InvalidAnnotation {
            label: bad.label.clone(),
            antibiotic: bad.antibiotic.to_string(),
            value: bad.mic,
        });
    }

    let mut layers = vec![points_layer(rows, config)];
    if !annotations.is_empty() {
        layers.push(annotation_layer(annotations));
    }
    debug!(
        "built chart: {} observations, {} annotation(s)",
        rows.len(),
        annotations.len()
    );

    Ok(ChartSpec {
        width: config.width,
        height: config.height,
        container_width: config.use_container_width,
        params: vec![SelectionParam {
            name: LEGEND_SELECTION.to_string(),
            fields: vec![columns::GRAM_STAINING.to_string()],
            bind_legend: true,
        }],
        layers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_builtin;
    use crate::data::model::Antibiotic;
    use crate::data::reshape::reshape;

    fn builtin_chart() -> ChartSpec {
        let rows = reshape(&load_builtin().unwrap());
        build_chart(
            &rows,
            &[Annotation::penicillin_cluster()],
            &ChartConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_chart_has_point_and_text_layers() {
        let chart = builtin_chart();
        assert_eq!(chart.layers.len(), 2);
        assert!(matches!(chart.layers[0].mark, Mark::Point { size } if size == 120.0));
        assert!(matches!(chart.layers[1].mark, Mark::Text(ref t) if t.bold && t.dx == 10.0));
        assert_eq!(chart.layers[0].data.len(), 48);
        assert_eq!(chart.width, 650.0);
        assert_eq!(chart.height, 420.0);
    }

    #[test]
    fn test_point_encoding() {
        let chart = builtin_chart();
        let enc = &chart.observation_layer().unwrap().encoding;

        let x = enc.x.as_ref().unwrap();
        assert_eq!(x.field, "Antibiotic");
        assert_eq!(x.field_type, FieldType::Nominal);
        assert_eq!(x.title, Title::Hidden);

        let y = enc.y.as_ref().unwrap();
        assert_eq!(y.field, "MIC");
        assert_eq!(y.scale, ScaleType::Log { base: 10.0 });
        assert_eq!(y.title.resolve(&y.field), Some("MIC (\u{b5}g/mL)"));

        let color = enc.color.as_ref().unwrap();
        assert_eq!(color.color_of("positive"), Some("#4C78A8"));
        assert_eq!(color.color_of("negative"), Some("#F58518"));
        assert_eq!(color.color_of("variable"), None);

        let tooltip: Vec<_> = enc.tooltip.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(tooltip, ["Bacteria", "Antibiotic", "MIC", "Gram_Staining"]);

        assert_eq!(
            enc.opacity,
            Some(OpacityChannel::Conditional {
                param: "legend_select".to_string(),
                selected: 1.0,
                otherwise: 0.15,
            })
        );
    }

    #[test]
    fn test_selection_param_bound_to_legend() {
        let chart = builtin_chart();
        let param = chart.param(LEGEND_SELECTION).unwrap();
        assert!(param.bind_legend);
        assert_eq!(param.fields, vec!["Gram_Staining".to_string()]);
    }

    #[test]
    fn test_annotation_independent_of_selection() {
        let chart = builtin_chart();
        let anns: Vec<_> = chart.annotations().collect();
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].0.antibiotic, Antibiotic::Penicillin);
        assert_eq!(anns[0].0.mic, 0.015);
        assert_eq!(chart.layers[1].encoding.selection_param(), None);
        assert_eq!(chart.layers[1].encoding.opacity, None);
    }

    #[test]
    fn test_rejects_non_positive_mic() {
        let mut rows = reshape(&load_builtin().unwrap());
        rows[4].mic = 0.0;
        let err = build_chart(&rows, &[], &ChartConfig::default()).unwrap_err();
        assert!(matches!(err, ChartError::NonPositiveValue { value, .. } if value == 0.0));

        rows[4].mic = f64::NAN;
        assert!(build_chart(&rows, &[], &ChartConfig::default()).is_err());
    }

    #[test]
    fn test_rejects_annotation_off_log_scale() {
        let rows = reshape(&load_builtin().unwrap());
        let annotation = Annotation {
            mic: -1.0,
            ..Annotation::penicillin_cluster()
        };
        let err = build_chart(&rows, &[annotation], &ChartConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidAnnotation { ref antibiotic, value, .. }
                if antibiotic == "Penicillin" && value == -1.0
        ));
        assert!(err.to_string().starts_with("cannot place annotation"));
    }

    #[test]
    fn test_rejects_empty_table() {
        assert_eq!(
            build_chart(&[], &[], &ChartConfig::default()),
            Err(ChartError::NoData)
        );
    }

    #[test]
    fn test_no_annotations_means_single_layer() {
        let rows = reshape(&load_builtin().unwrap());
        let chart = build_chart(&rows, &[], &ChartConfig::default()).unwrap();
        assert_eq!(chart.layers.len(), 1);
        assert_eq!(chart.annotations().count(), 0);
    }
}
