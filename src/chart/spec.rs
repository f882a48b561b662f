//! Declarative chart specification
//!
//! A chart is a tree of plain values: a [`ChartSpec`] holds selection
//! parameters and an ordered list of [`Layer`]s, each layer pairs inline data
//! with a [`Mark`] and an [`Encoding`]. Renderers interpret this tree; nothing
//! here knows how to draw.

use crate::data::model::{Annotation, TidyRow};

/// How a field's values are interpreted on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Nominal,
    Quantitative,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Nominal => "nominal",
            FieldType::Quantitative => "quantitative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleType {
    Linear,
    Log { base: f64 },
}

impl ScaleType {
    pub fn is_log(&self) -> bool {
        matches!(self, ScaleType::Log { .. })
    }
}

/// Axis or legend title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Title {
    /// Let the renderer derive a title from the field name.
    Auto,
    Hidden,
    Text(String),
}

impl Title {
    /// Resolve against a field name.
    pub fn resolve<'a>(&'a self, field: &'a str) -> Option<&'a str> {
        match self {
            Title::Auto => Some(field),
            Title::Hidden => None,
            Title::Text(text) => Some(text.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// Encoding channels
// ---------------------------------------------------------------------------

/// A bare field reference (tooltip entries, text channel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub field: String,
    pub field_type: FieldType,
}

impl FieldRef {
    pub fn new(field: &str, field_type: FieldType) -> Self {
        Self {
            field: field.to_string(),
            field_type,
        }
    }
}

/// x or y channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionChannel {
    pub field: String,
    pub field_type: FieldType,
    pub scale: ScaleType,
    pub title: Title,
}

/// Categorical colour channel with an explicit domain → range mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorChannel {
    pub field: String,
    pub field_type: FieldType,
    pub domain: Vec<String>,
    /// Hex colours, same length as `domain`.
    pub range: Vec<String>,
    pub legend_title: Title,
}

impl ColorChannel {
    /// Hex colour for a domain value.
    pub fn color_of(&self, value: &str) -> Option<&str> {
        self.domain
            .iter()
            .position(|d| d == value)
            .and_then(|i| self.range.get(i))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OpacityChannel {
    Value(f64),
    /// `selected` when the datum is in the named selection (or the selection is empty).
    Conditional {
        param: String,
        selected: f64,
        otherwise: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Encoding {
    pub x: Option<PositionChannel>,
    pub y: Option<PositionChannel>,
    pub color: Option<ColorChannel>,
    pub opacity: Option<OpacityChannel>,
    pub tooltip: Vec<FieldRef>,
    pub text: Option<FieldRef>,
}

impl Encoding {
    /// Name of the selection parameter this encoding reacts to, if any.
    pub fn selection_param(&self) -> Option<&str> {
        match &self.opacity {
            Some(OpacityChannel::Conditional { param, .. }) => Some(param.as_str()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Marks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    pub align: TextAlign,
    /// Pixel offset from the anchor.
    pub dx: f64,
    pub dy: f64,
    pub font_size: f64,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Filled circle; `size` is the area in square pixels.
    Point { size: f64 },
    Text(TextMark),
}

// ---------------------------------------------------------------------------
// Layers and the chart
// ---------------------------------------------------------------------------

/// Inline data attached to a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerData {
    Observations(Vec<TidyRow>),
    Annotations(Vec<Annotation>),
}

impl LayerData {
    pub fn len(&self) -> usize {
        match self {
            LayerData::Observations(rows) => rows.len(),
            LayerData::Annotations(anns) => anns.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub data: LayerData,
    pub mark: Mark,
    pub encoding: Encoding,
}

/// Multi-value point selection over `fields`, optionally driven by legend clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionParam {
    pub name: String,
    pub fields: Vec<String>,
    pub bind_legend: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub width: f32,
    pub height: f32,
    /// Fill the container horizontally instead of using `width`.
    pub container_width: bool,
    pub params: Vec<SelectionParam>,
    pub layers: Vec<Layer>,
}

impl ChartSpec {
    pub fn param(&self, name: &str) -> Option<&SelectionParam> {
        self.params.iter().find(|p| p.name == name)
    }

    /// The layer carrying the observations.
    pub fn observation_layer(&self) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|l| matches!(l.data, LayerData::Observations(_)))
    }

    /// All annotation labels paired with their text mark settings.
    pub fn annotations(&self) -> impl Iterator<Item = (&Annotation, &TextMark)> {
        self.layers
            .iter()
            .flat_map(|layer| match (&layer.data, &layer.mark) {
                (LayerData::Annotations(anns), Mark::Text(mark)) => {
                    anns.iter().map(|a| (a, mark)).collect::<Vec<_>>()
                }
                _ => Vec::new(),
            })
    }
}
