//! Error types for the data and chart layers.

use thiserror::Error;

/// Problems found while parsing, validating or reshaping the MIC records.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("{species}: unknown gram stain label '{label}' (expected 'positive' or 'negative')")]
    UnknownGramStain { species: String, label: String },

    #[error("{species}: {field} MIC must be strictly positive, got {value}")]
    NonPositiveMic {
        species: String,
        field: String,
        value: f64,
    },

    #[error("{species}: {field} MIC is not a finite number")]
    NonFiniteMic { species: String, field: String },

    #[error("record {index} has an empty species name")]
    EmptyName { index: usize },

    #[error("duplicate species name: {0}")]
    DuplicateName(String),

    #[error("{species}: no antibiotic column named '{field}'")]
    MissingField { species: String, field: String },
}

/// Problems found while assembling a chart specification.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("cannot place {species} / {antibiotic} on a log scale: MIC is {value}")]
    NonPositiveValue {
        species: String,
        antibiotic: String,
        value: f64,
    },

    #[error("cannot place annotation '{label}' at {antibiotic} on a log scale: MIC is {value}")]
    InvalidAnnotation {
        label: String,
        antibiotic: String,
        value: f64,
    },

    #[error("chart has no observations to plot")]
    NoData,
}
