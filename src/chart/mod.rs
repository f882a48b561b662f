/// Chart layer: declarative spec, the builder for the MIC scatter, and the
/// Vega-Lite / HTML writers.
///
/// ```text
///   Vec<TidyRow> + Annotation
///        │
///        ▼
///   ┌──────────┐
///   │ builder   │  → ChartSpec (layers, marks, encodings, params)
///   └──────────┘
///        │
///        ├──────────────► ui::plot   (native window)
///        ▼
///   ┌──────────┐
///   │ vegalite  │  → Vega-Lite JSON → html::render
///   └──────────┘
/// ```

pub mod builder;
pub mod html;
pub mod spec;
pub mod vegalite;

pub use builder::build_chart;
pub use spec::ChartSpec;
