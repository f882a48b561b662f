/// egui widgets for the native window: the MIC scatter and the panels around it.
pub mod panels;
pub mod plot;
