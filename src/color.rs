use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::Continent;

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

/// Blue → grey → red scale used by both choropleth pages.
pub const MAP_STOPS: [[u8; 3]; 9] = [
    [0x19, 0x84, 0xc5],
    [0x22, 0xa7, 0xf0],
    [0x63, 0xbf, 0xf0],
    [0xa7, 0xd5, 0xed],
    [0xe2, 0xe2, 0xe2],
    [0xe1, 0xa6, 0x92],
    [0xde, 0x6e, 0x56],
    [0xe1, 0x4b, 0x31],
    [0xc2, 0x37, 0x28],
];

/// Diverging scale for correlation coefficients in `[-1, 1]`.
pub const COOLWARM_STOPS: [[u8; 3]; 3] =
    [[0x3b, 0x4c, 0xc0], [0xdd, 0xdd, 0xdd], [0xb4, 0x04, 0x26]];

/// Single-hue scale for the improvement bar chart.
pub const BLUES_STOPS: [[u8; 3]; 3] =
    [[0xc6, 0xdb, 0xef], [0x6b, 0xae, 0xd6], [0x08, 0x30, 0x6b]];

/// Piecewise-linear colour scale, interpolated in linear RGB.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<Color32>,
    linear: Vec<LinSrgb>,
    missing_color: Color32,
}

impl ColorScale {
    pub fn new(stops: &[[u8; 3]]) -> Self {
        let linear = stops
            .iter()
            .map(|&[r, g, b]| Srgb::new(r, g, b).into_format::<f32>().into_linear())
            .collect();
        ColorScale {
            stops: stops
                .iter()
                .map(|&[r, g, b]| Color32::from_rgb(r, g, b))
                .collect(),
            linear,
            missing_color: Color32::GRAY,
        }
    }

    pub fn map() -> Self {
        Self::new(&MAP_STOPS)
    }

    pub fn coolwarm() -> Self {
        Self::new(&COOLWARM_STOPS)
    }

    pub fn blues() -> Self {
        Self::new(&BLUES_STOPS)
    }

    /// Colour at position `t` in `[0, 1]`; values outside are clamped and
    /// NaN gets the missing-data colour.
    pub fn at(&self, t: f64) -> Color32 {
        if t.is_nan() || self.stops.is_empty() {
            return self.missing_color;
        }
        let last = self.stops.len() - 1;
        let pos = t.clamp(0.0, 1.0) * last as f64;
        let k = (pos.floor() as usize).min(last);
        let frac = pos - k as f64;
        if k == last || frac == 0.0 {
            return self.stops[k];
        }

        let mixed = self.linear[k].mix(self.linear[k + 1], frac as f32);
        let rgb: Srgb = Srgb::from_linear(mixed);
        let rgb: Srgb<u8> = rgb.into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// Colour for `value` within `range`; a degenerate range maps to the
    /// middle of the scale.
    pub fn for_value(&self, value: f64, range: (f64, f64)) -> Color32 {
        let (lo, hi) = range;
        let span = hi - lo;
        if span.abs() < f64::EPSILON {
            return self.at(if value.is_nan() { f64::NAN } else { 0.5 });
        }
        self.at((value - lo) / span)
    }

    pub fn missing_color(&self) -> Color32 {
        self.missing_color
    }
}

// ---------------------------------------------------------------------------
// Categorical colours
// ---------------------------------------------------------------------------

pub fn continent_color(continent: Continent) -> Color32 {
    match continent {
        Continent::Europe => Color32::from_rgb(0xfd, 0x7f, 0x6f),
        Continent::Asia => Color32::from_rgb(0x7e, 0xb0, 0xd5),
        Continent::Africa => Color32::from_rgb(0xb2, 0xe0, 0x61),
        Continent::NorthAmerica => Color32::from_rgb(0xbd, 0x7e, 0xbe),
        Continent::SouthAmerica => Color32::from_rgb(0xff, 0xb5, 0x5a),
        Continent::Oceania => Color32::from_rgb(0xff, 0xee, 0x65),
    }
}

/// Black or white, whichever reads better on top of `background`.
pub fn contrasting_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_endpoints_and_stops() {
        let scale = ColorScale::map();
        assert_eq!(scale.at(0.0), Color32::from_rgb(0x19, 0x84, 0xc5));
        assert_eq!(scale.at(1.0), Color32::from_rgb(0xc2, 0x37, 0x28));
        assert_eq!(scale.at(0.5), Color32::from_rgb(0xe2, 0xe2, 0xe2));
        assert_eq!(scale.at(-3.0), scale.at(0.0));
        assert_eq!(scale.at(7.0), scale.at(1.0));
    }

    #[test]
    fn test_nan_and_degenerate_range() {
        let scale = ColorScale::coolwarm();
        assert_eq!(scale.at(f64::NAN), scale.missing_color());
        assert_eq!(scale.for_value(0.4, (0.4, 0.4)), scale.at(0.5));
        assert_eq!(scale.for_value(f64::NAN, (0.4, 0.4)), scale.missing_color());
    }

    #[test]
    fn test_interpolation_stays_between_stops() {
        let scale = ColorScale::blues();
        let c = scale.at(0.25);
        let (a, b) = (scale.at(0.0), scale.at(0.5));
        assert!(c.b() <= a.b().max(b.b()) && c.b() >= a.b().min(b.b()));
        assert_ne!(c, a);
    }

    #[test]
    fn test_contrasting_text() {
        assert_eq!(contrasting_text(Color32::WHITE), Color32::BLACK);
        assert_eq!(contrasting_text(Color32::from_rgb(0x08, 0x30, 0x6b)), Color32::WHITE);
    }
}
