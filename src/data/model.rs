use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Column names used by the tidy table and the chart encodings
// ---------------------------------------------------------------------------

pub mod columns {
    pub const BACTERIA: &str = "Bacteria";
    pub const GRAM_STAINING: &str = "Gram_Staining";
    pub const ANTIBIOTIC: &str = "Antibiotic";
    pub const MIC: &str = "MIC";
    pub const LABEL: &str = "label";
}

// ---------------------------------------------------------------------------
// GramStain – the categorical grouping attribute
// ---------------------------------------------------------------------------

/// Cell-wall classification of a species. Declaration order is legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GramStain {
    Positive,
    Negative,
}

impl GramStain {
    pub const ALL: [GramStain; 2] = [GramStain::Positive, GramStain::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            GramStain::Positive => "positive",
            GramStain::Negative => "negative",
        }
    }
}

impl fmt::Display for GramStain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GramStain {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(GramStain::Positive),
            "negative" => Ok(GramStain::Negative),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Antibiotic – one measured column of the wide table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Antibiotic {
    Penicillin,
    Streptomycin,
    Neomycin,
}

impl Antibiotic {
    /// Column order of the wide table.
    pub const ALL: [Antibiotic; 3] = [
        Antibiotic::Penicillin,
        Antibiotic::Streptomycin,
        Antibiotic::Neomycin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Antibiotic::Penicillin => "Penicillin",
            Antibiotic::Streptomycin => "Streptomycin",
            Antibiotic::Neomycin => "Neomycin",
        }
    }

    /// Slot on the category axis.
    pub fn position(&self) -> usize {
        match self {
            Antibiotic::Penicillin => 0,
            Antibiotic::Streptomycin => 1,
            Antibiotic::Neomycin => 2,
        }
    }

    pub fn from_position(pos: usize) -> Option<Self> {
        Self::ALL.get(pos).copied()
    }
}

impl fmt::Display for Antibiotic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Antibiotic {
    type Err = ();

    /// Matches the wide-table column names exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or(())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the wide table
// ---------------------------------------------------------------------------

/// Raw dataset row as written in source: name, three MICs, gram label.
pub type RawRecord = (&'static str, f64, f64, f64, &'static str);

/// One bacterial species with its three MIC measurements (µg/mL).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub penicillin_mic: f64,
    pub streptomycin_mic: f64,
    pub neomycin_mic: f64,
    pub gram_stain: GramStain,
}

impl Record {
    /// Parse a raw row, rejecting gram-stain labels outside the allowed set.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, DataError> {
        let (name, penicillin, streptomycin, neomycin, label) = *raw;
        let gram_stain = label.parse().map_err(|_| DataError::UnknownGramStain {
            species: name.to_string(),
            label: label.to_string(),
        })?;
        Ok(Record {
            name: name.to_string(),
            penicillin_mic: penicillin,
            streptomycin_mic: streptomycin,
            neomycin_mic: neomycin,
            gram_stain,
        })
    }

    pub fn mic(&self, antibiotic: Antibiotic) -> f64 {
        match antibiotic {
            Antibiotic::Penicillin => self.penicillin_mic,
            Antibiotic::Streptomycin => self.streptomycin_mic,
            Antibiotic::Neomycin => self.neomycin_mic,
        }
    }

    /// Look up an antibiotic column by its wide-table name.
    pub fn field(&self, column: &str) -> Option<f64> {
        column.parse::<Antibiotic>().ok().map(|a| self.mic(a))
    }
}

// ---------------------------------------------------------------------------
// TidyRow – one (species, antibiotic) observation of the long table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidyRow {
    #[serde(rename = "Bacteria")]
    pub name: String,
    #[serde(rename = "Gram_Staining")]
    pub gram_stain: GramStain,
    #[serde(rename = "Antibiotic")]
    pub antibiotic: Antibiotic,
    #[serde(rename = "MIC")]
    pub mic: f64,
}

// ---------------------------------------------------------------------------
// Annotation – a fixed label placed at a data coordinate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    #[serde(rename = "Antibiotic")]
    pub antibiotic: Antibiotic,
    #[serde(rename = "MIC")]
    pub mic: f64,
    pub label: String,
}

impl Annotation {
    /// Callout for the gram-positive cluster at the bottom of the Penicillin column.
    pub fn penicillin_cluster() -> Self {
        Annotation {
            antibiotic: Antibiotic::Penicillin,
            mic: 0.015,
            label: "Gram\u{2011}positive\nMIC \u{2264} 0.03 \u{b5}g/mL".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gram_stain_parsing() {
        assert_eq!("positive".parse::<GramStain>(), Ok(GramStain::Positive));
        assert_eq!(" Negative ".parse::<GramStain>(), Ok(GramStain::Negative));
        assert!("variable".parse::<GramStain>().is_err());
    }

    #[test]
    fn test_antibiotic_names_roundtrip_positions() {
        for (i, a) in Antibiotic::ALL.iter().enumerate() {
            assert_eq!(a.position(), i);
            assert_eq!(Antibiotic::from_position(i), Some(*a));
            assert_eq!(a.as_str().parse::<Antibiotic>(), Ok(*a));
        }
        assert_eq!(Antibiotic::from_position(3), None);
        assert!("penicillin".parse::<Antibiotic>().is_err());
    }

    #[test]
    fn test_record_from_raw_rejects_unknown_label() {
        let raw: RawRecord = ("Mystery coccus", 1.0, 1.0, 1.0, "purple");
        let err = Record::from_raw(&raw).unwrap_err();
        assert_eq!(
            err,
            DataError::UnknownGramStain {
                species: "Mystery coccus".to_string(),
                label: "purple".to_string(),
            }
        );
        assert!(err.to_string().contains("Mystery coccus"));
    }

    #[test]
    fn test_record_field_lookup() {
        let raw: RawRecord = ("Bacillus anthracis", 0.001, 0.01, 0.007, "positive");
        let rec = Record::from_raw(&raw).unwrap();
        assert_eq!(rec.field("Penicillin"), Some(0.001));
        assert_eq!(rec.field("Streptomycin"), Some(0.01));
        assert_eq!(rec.field("Neomycin"), Some(0.007));
        assert_eq!(rec.field("Vancomycin"), None);
    }

    #[test]
    fn test_tidy_row_serializes_with_dataset_column_names() {
        let row = TidyRow {
            name: "Escherichia coli".to_string(),
            gram_stain: GramStain::Negative,
            antibiotic: Antibiotic::Neomycin,
            mic: 0.1,
        };
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(v[columns::BACTERIA], "Escherichia coli");
        assert_eq!(v[columns::GRAM_STAINING], "negative");
        assert_eq!(v[columns::ANTIBIOTIC], "Neomycin");
        assert_eq!(v[columns::MIC], 0.1);
    }
}
