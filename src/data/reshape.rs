use super::model::{Antibiotic, Record, TidyRow};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Wide → long reshape
// ---------------------------------------------------------------------------

fn melt_row(rec: &Record, antibiotic: Antibiotic) -> TidyRow {
    TidyRow {
        name: rec.name.clone(),
        gram_stain: rec.gram_stain,
        antibiotic,
        mic: rec.mic(antibiotic),
    }
}

/// Unpivot the antibiotic columns named in `value_vars` into one row per
/// (species, antibiotic), keeping name and gram stain as id columns.
///
/// Output order is record order, then `value_vars` order.
pub fn melt(records: &[Record], value_vars: &[&str]) -> Result<Vec<TidyRow>, DataError> {
    let mut rows = Vec::with_capacity(records.len() * value_vars.len());

    for rec in records {
        for &var in value_vars {
            let antibiotic: Antibiotic = var.parse().map_err(|_| DataError::MissingField {
                species: rec.name.clone(),
                field: var.to_string(),
            })?;
            rows.push(melt_row(rec, antibiotic));
        }
    }
    Ok(rows)
}

/// Melt over every antibiotic column in table order. Infallible because the
/// value vars are the typed antibiotics themselves.
pub fn reshape(records: &[Record]) -> Vec<TidyRow> {
    records
        .iter()
        .flat_map(|rec| Antibiotic::ALL.into_iter().map(move |a| melt_row(rec, a)))
        .collect()
}
