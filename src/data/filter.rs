use std::collections::BTreeSet;

use super::model::{GramStain, TidyRow};

// ---------------------------------------------------------------------------
// Legend selection: which gram-stain categories are isolated
// ---------------------------------------------------------------------------

/// Opacity of points matching the legend selection (or when nothing is selected).
pub const SELECTED_OPACITY: f64 = 1.0;

/// Opacity of points outside the legend selection.
pub const DIMMED_OPACITY: f64 = 0.15;

/// The set of gram-stain categories clicked in the legend.
/// Empty means "no filter": every point is drawn at full opacity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegendSelection {
    selected: BTreeSet<GramStain>,
}

impl LegendSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = GramStain>) -> Self {
        Self {
            selected: values.into_iter().collect(),
        }
    }

    /// Add the category if absent, remove it otherwise.
    pub fn toggle(&mut self, stain: GramStain) {
        if !self.selected.remove(&stain) {
            self.selected.insert(stain);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, stain: GramStain) -> bool {
        self.selected.contains(&stain)
    }

    /// Whether points of this category are drawn at full opacity.
    pub fn includes(&self, stain: GramStain) -> bool {
        self.selected.is_empty() || self.selected.contains(&stain)
    }

    pub fn iter(&self) -> impl Iterator<Item = GramStain> + '_ {
        self.selected.iter().copied()
    }

    pub fn opacity(&self, stain: GramStain, selected: f64, dimmed: f64) -> f64 {
        if self.includes(stain) {
            selected
        } else {
            dimmed
        }
    }
}

/// Opacity of a single row under the default selected/dimmed levels.
pub fn row_opacity(row: &TidyRow, selection: &LegendSelection) -> f64 {
    selection.opacity(row.gram_stain, SELECTED_OPACITY, DIMMED_OPACITY)
}

/// Indices of rows drawn at full opacity.
pub fn highlighted_indices(rows: &[TidyRow], selection: &LegendSelection) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| selection.includes(row.gram_stain))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_builtin;
    use crate::data::model::Antibiotic;
    use crate::data::reshape::reshape;

    #[test]
    fn test_empty_selection_shows_everything() {
        let rows = reshape(&load_builtin().unwrap());
        let selection = LegendSelection::new();
        assert!(rows.iter().all(|r| row_opacity(r, &selection) == SELECTED_OPACITY));
        assert_eq!(highlighted_indices(&rows, &selection).len(), rows.len());
    }

    #[test]
    fn test_positive_only_dims_negatives_for_every_antibiotic() {
        let rows = reshape(&load_builtin().unwrap());
        let selection = LegendSelection::from_values([GramStain::Positive]);

        for antibiotic in Antibiotic::ALL {
            for row in rows.iter().filter(|r| r.antibiotic == antibiotic) {
                let expected = match row.gram_stain {
                    GramStain::Positive => 1.0,
                    GramStain::Negative => 0.15,
                };
                assert_eq!(row_opacity(row, &selection), expected, "{}", row.name);
            }
        }
        assert_eq!(highlighted_indices(&rows, &selection).len(), 21);
    }

    #[test]
    fn test_both_selected_shows_everything() {
        let rows = reshape(&load_builtin().unwrap());
        let selection = LegendSelection::from_values(GramStain::ALL);
        assert!(rows.iter().all(|r| row_opacity(r, &selection) == 1.0));
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = LegendSelection::new();
        selection.toggle(GramStain::Negative);
        assert!(selection.contains(GramStain::Negative));
        assert!(!selection.includes(GramStain::Positive));

        selection.toggle(GramStain::Positive);
        assert_eq!(selection.iter().collect::<Vec<_>>(), GramStain::ALL.to_vec());

        selection.toggle(GramStain::Negative);
        selection.toggle(GramStain::Positive);
        assert!(selection.is_empty());

        selection.toggle(GramStain::Positive);
        selection.clear();
        assert!(selection.is_empty());
    }
}
