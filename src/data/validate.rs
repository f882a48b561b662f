use std::collections::HashSet;

use super::model::{Antibiotic, Record};
use crate::error::DataError;

/// Check the invariants the chart relies on: non-empty unique names and
/// finite, strictly positive MICs (the y axis is logarithmic).
pub fn validate(records: &[Record]) -> Result<(), DataError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());

    for (index, rec) in records.iter().enumerate() {
        if rec.name.trim().is_empty() {
            return Err(DataError::EmptyName { index });
        }
        if !seen.insert(rec.name.as_str()) {
            return Err(DataError::DuplicateName(rec.name.clone()));
        }

        for antibiotic in Antibiotic::ALL {
            let value = rec.mic(antibiotic);
            if !value.is_finite() {
                return Err(DataError::NonFiniteMic {
                    species: rec.name.clone(),
                    field: antibiotic.to_string(),
                });
            }
            if value <= 0.0 {
                return Err(DataError::NonPositiveMic {
                    species: rec.name.clone(),
                    field: antibiotic.to_string(),
                    value,
                });
            }
        }
    }
    Ok(())
}
