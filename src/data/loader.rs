use log::{debug, info};

use super::model::{RawRecord, Record};
use super::validate::validate;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Built-in dataset
// ---------------------------------------------------------------------------

/// Burtin's antibiotic MIC table (µg/mL): 16 species × Penicillin, Streptomycin, Neomycin.
pub const BURTIN: [RawRecord; 16] = [
    ("Aerobacter aerogenes", 870.0, 1.0, 1.6, "negative"),
    ("Bacillus anthracis", 0.001, 0.01, 0.007, "positive"),
    ("Brucella abortus", 1.0, 2.0, 0.02, "negative"),
    ("Diplococcus pneumoniae", 0.005, 11.0, 10.0, "positive"),
    ("Escherichia coli", 100.0, 0.4, 0.1, "negative"),
    ("Klebsiella pneumoniae", 850.0, 1.2, 1.0, "negative"),
    ("Mycobacterium tuberculosis", 800.0, 5.0, 2.0, "negative"),
    ("Proteus vulgaris", 3.0, 0.1, 0.1, "negative"),
    ("Pseudomonas aeruginosa", 850.0, 2.0, 0.4, "negative"),
    ("Salmonella (Eberthella) typhosa", 1.0, 0.4, 0.008, "negative"),
    ("Salmonella schottmuelleri", 10.0, 0.8, 0.09, "negative"),
    ("Staphylococcus albus", 0.007, 0.1, 0.001, "positive"),
    ("Staphylococcus aureus", 0.03, 0.03, 0.001, "positive"),
    ("Streptococcus fecalis", 1.0, 1.0, 0.1, "positive"),
    ("Streptococcus hemolyticus", 0.001, 14.0, 10.0, "positive"),
    ("Streptococcus viridans", 0.005, 10.0, 40.0, "positive"),
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse and validate raw rows. Stops at the first offending species.
pub fn load_records(raw: &[RawRecord]) -> Result<Vec<Record>, DataError> {
    let records = raw
        .iter()
        .map(Record::from_raw)
        .collect::<Result<Vec<_>, _>>()?;
    debug!("parsed {} raw records", records.len());

    validate(&records)?;
    info!("loaded {} validated species records", records.len());
    Ok(records)
}

/// Load the embedded Burtin dataset.
pub fn load_builtin() -> Result<Vec<Record>, DataError> {
    load_records(&BURTIN)
}
