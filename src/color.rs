use std::collections::BTreeMap;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

use crate::chart::spec::ColorChannel;
use crate::data::model::GramStain;

// ---------------------------------------------------------------------------
// Hex parsing
// ---------------------------------------------------------------------------

/// Parse `#RRGGBB` / `RRGGBB` (or the 3-digit short form) into a colour.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(hex.trim()).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// Color mapping: gram stain → Color32
// ---------------------------------------------------------------------------

/// Maps gram-stain categories to the colours declared by the chart's colour channel.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<GramStain, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build from a colour channel's domain/range. Unknown domain values and
    /// unparsable colours are skipped and fall back to grey.
    pub fn from_channel(channel: &ColorChannel) -> Self {
        let mapping = channel
            .domain
            .iter()
            .zip(channel.range.iter())
            .filter_map(|(value, hex)| {
                let stain = value.parse::<GramStain>().ok()?;
                let color = parse_hex(hex)?;
                Some((stain, color))
            })
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, stain: GramStain) -> Color32 {
        self.mapping
            .get(&stain)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Colour with its alpha scaled by `opacity` (0..=1).
    pub fn faded(&self, stain: GramStain, opacity: f64) -> Color32 {
        self.color_for(stain)
            .gamma_multiply(opacity.clamp(0.0, 1.0) as f32)
    }

    /// Legend entries in declaration order.
    pub fn legend_entries(&self) -> Vec<(GramStain, Color32)> {
        GramStain::ALL
            .iter()
            .map(|&g| (g, self.color_for(g)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::{FieldType, Title};

    fn channel(range: [&str; 2]) -> ColorChannel {
        ColorChannel {
            field: "Gram_Staining".to_string(),
            field_type: FieldType::Nominal,
            domain: vec!["positive".to_string(), "negative".to_string()],
            range: range.iter().map(|s| s.to_string()).collect(),
            legend_title: Title::Auto,
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#4C78A8"), Some(Color32::from_rgb(0x4C, 0x78, 0xA8)));
        assert_eq!(parse_hex("F58518"), Some(Color32::from_rgb(0xF5, 0x85, 0x18)));
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_map_from_channel() {
        let map = ColorMap::from_channel(&channel(["#4C78A8", "#F58518"]));
        assert_eq!(map.color_for(GramStain::Positive), Color32::from_rgb(0x4C, 0x78, 0xA8));
        assert_eq!(map.color_for(GramStain::Negative), Color32::from_rgb(0xF5, 0x85, 0x18));

        let legend = map.legend_entries();
        assert_eq!(legend[0].0, GramStain::Positive);
        assert_eq!(legend[1].0, GramStain::Negative);
    }

    #[test]
    fn test_bad_colour_falls_back_to_grey() {
        let map = ColorMap::from_channel(&channel(["#4C78A8", "orange-ish"]));
        assert_eq!(map.color_for(GramStain::Negative), Color32::GRAY);
    }

    #[test]
    fn test_faded_reduces_alpha() {
        let map = ColorMap::from_channel(&channel(["#4C78A8", "#F58518"]));
        assert_eq!(map.faded(GramStain::Positive, 1.0), map.color_for(GramStain::Positive));
        assert!(map.faded(GramStain::Positive, 0.15).a() < 255 / 4);
    }
}
