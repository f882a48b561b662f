//! Vega-Lite JSON writer
//!
//! Translates a [`ChartSpec`] into a Vega-Lite v5 document that any
//! vega-embed host can render in a browser.
//!
//! # Mapping Strategy
//!
//! - `Mark::Point` → `circle` mark with `size`
//! - `Mark::Text` → `text` mark (align, dx/dy, font settings)
//! - layers → top-level `layer` array, each with inline `data.values`
//! - selection params → attached to the first layer whose opacity references them

use serde_json::{json, Map, Value};

use super::spec::{
    ChartSpec, ColorChannel, Encoding, FieldRef, Layer, LayerData, Mark, OpacityChannel,
    PositionChannel, ScaleType, SelectionParam, Title,
};

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

fn title_value(title: &Title) -> Option<Value> {
    match title {
        Title::Auto => None,
        Title::Hidden => Some(Value::Null),
        Title::Text(text) => Some(json!(text)),
    }
}

fn position_channel(channel: &PositionChannel) -> Value {
    let mut obj = Map::new();
    obj.insert("field".to_string(), json!(channel.field));
    obj.insert("type".to_string(), json!(channel.field_type.as_str()));

    if let ScaleType::Log { base } = channel.scale {
        let mut scale = Map::new();
        scale.insert("type".to_string(), json!("log"));
        if base != 10.0 {
            scale.insert("base".to_string(), json!(base));
        }
        obj.insert("scale".to_string(), Value::Object(scale));
    }
    if let Some(title) = title_value(&channel.title) {
        obj.insert("title".to_string(), title);
    }
    Value::Object(obj)
}

fn color_channel(channel: &ColorChannel) -> Value {
    let mut obj = json!({
        "field": channel.field,
        "type": channel.field_type.as_str(),
        "scale": {
            "domain": channel.domain,
            "range": channel.range,
        },
    });
    if let Some(title) = title_value(&channel.legend_title) {
        obj["legend"] = json!({ "title": title });
    }
    obj
}

fn opacity_channel(channel: &OpacityChannel) -> Value {
    match channel {
        OpacityChannel::Value(v) => json!({ "value": v }),
        OpacityChannel::Conditional {
            param,
            selected,
            otherwise,
        } => json!({
            "condition": { "param": param, "value": selected },
            "value": otherwise,
        }),
    }
}

fn field_ref(field: &FieldRef) -> Value {
    json!({ "field": field.field, "type": field.field_type.as_str() })
}

fn encoding(enc: &Encoding) -> Value {
    let mut obj = Map::new();
    if let Some(x) = &enc.x {
        obj.insert("x".to_string(), position_channel(x));
    }
    if let Some(y) = &enc.y {
        obj.insert("y".to_string(), position_channel(y));
    }
    if let Some(color) = &enc.color {
        obj.insert("color".to_string(), color_channel(color));
    }
    if let Some(opacity) = &enc.opacity {
        obj.insert("opacity".to_string(), opacity_channel(opacity));
    }
    if !enc.tooltip.is_empty() {
        obj.insert(
            "tooltip".to_string(),
            Value::Array(enc.tooltip.iter().map(field_ref).collect()),
        );
    }
    if let Some(text) = &enc.text {
        obj.insert("text".to_string(), field_ref(text));
    }
    Value::Object(obj)
}

fn mark(mark: &Mark) -> Value {
    match mark {
        Mark::Point { size } => json!({ "type": "circle", "size": size }),
        Mark::Text(text) => json!({
            "type": "text",
            "align": text.align.as_str(),
            "dx": text.dx,
            "dy": text.dy,
            "fontSize": text.font_size,
            "fontWeight": if text.bold { "bold" } else { "normal" },
            "lineBreak": "\n",
        }),
    }
}

fn data_values(data: &LayerData) -> serde_json::Result<Value> {
    match data {
        LayerData::Observations(rows) => serde_json::to_value(rows),
        LayerData::Annotations(anns) => serde_json::to_value(anns),
    }
}

fn selection_param(param: &SelectionParam) -> Value {
    let mut obj = json!({
        "name": param.name,
        "select": { "type": "point", "fields": param.fields },
    });
    if param.bind_legend {
        // Plain legend clicks add or remove a category instead of replacing the set.
        obj["select"]["toggle"] = json!("true");
        obj["bind"] = json!("legend");
    }
    obj
}

fn layer(layer: &Layer, params: &[&SelectionParam]) -> serde_json::Result<Value> {
    let mut obj = json!({
        "data": { "values": data_values(&layer.data)? },
        "mark": mark(&layer.mark),
        "encoding": encoding(&layer.encoding),
    });
    if !params.is_empty() {
        obj["params"] = Value::Array(params.iter().map(|p| selection_param(p)).collect());
    }
    Ok(obj)
}

/// Build the Vega-Lite document for a chart. Fails only if a layer's inline
/// data cannot be serialized.
pub fn to_vegalite(chart: &ChartSpec) -> serde_json::Result<Value> {
    // Each selection param is declared once, on the first layer that reads it.
    let mut placed: Vec<&str> = Vec::new();
    let layers = chart
        .layers
        .iter()
        .map(|l| {
            let params: Vec<&SelectionParam> = l
                .encoding
                .selection_param()
                .and_then(|name| chart.param(name))
                .filter(|p| !placed.contains(&p.name.as_str()))
                .into_iter()
                .collect();
            placed.extend(params.iter().map(|p| p.name.as_str()));
            layer(l, &params)
        })
        .collect::<serde_json::Result<Vec<Value>>>()?;

    let width = if chart.container_width {
        json!("container")
    } else {
        json!(chart.width)
    };

    Ok(json!({
        "$schema": VEGA_LITE_SCHEMA,
        "width": width,
        "height": chart.height,
        "layer": layers,
    }))
}

/// Pretty-printed Vega-Lite JSON.
pub fn to_vegalite_string(chart: &ChartSpec) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_vegalite(chart)?)
}
