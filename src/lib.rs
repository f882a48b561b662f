//! Interactive antibiotic effectiveness story over Burtin's MIC dataset.
//!
//! The pipeline is linear: the embedded wide table is parsed and validated
//! ([`data::loader`]), melted into one row per species × antibiotic
//! ([`data::reshape`]), turned into a declarative layered chart
//! ([`chart::build_chart`]) and handed to a renderer: the native egui window
//! ([`app::render`]) or a standalone HTML page ([`chart::html::render`]).

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod state;
pub mod ui;
