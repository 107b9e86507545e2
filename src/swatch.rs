//! A single representative color produced by the quantizer.

use std::cell::OnceCell;
use std::hash::{Hash, Hasher};

use crate::color::{self, Argb};

/// A representative color extracted from an image, together with its
/// population and its derived HSL and text-overlay colors.
///
/// Immutable once produced. `hsl` and the text colors are computed lazily
/// on first access and memoized; recomputing them would be wasted work
/// since the underlying `rgb` never changes.
///
/// Two swatches are equal iff their `rgb` and `population` match; the
/// lazily-computed caches play no part in equality or hashing.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    rgb: Argb,
    population: u32,
    #[cfg_attr(feature = "serde", serde(skip))]
    hsl: OnceCell<(f32, f32, f32)>,
    #[cfg_attr(feature = "serde", serde(skip))]
    text_colors: OnceCell<TextColors>,
}

#[derive(Debug, Clone, Copy)]
struct TextColors {
    title: Argb,
    body: Argb,
}

impl Swatch {
    /// `rgb`'s alpha channel is forced to opaque: every swatch is assumed
    /// opaque by `compute_text_colors`, which treats `rgb` as a valid
    /// contrast background.
    pub fn new(rgb: Argb, population: u32) -> Self {
        Self {
            rgb: rgb.with_alpha(255),
            population,
            hsl: OnceCell::new(),
            text_colors: OnceCell::new(),
        }
    }

    /// The packed, opaque color this swatch represents.
    pub fn rgb(&self) -> Argb {
        self.rgb
    }

    /// The `#RRGGBB` hex form of [`Self::rgb`].
    pub fn hex(&self) -> String {
        self.rgb.hex()
    }

    /// The number of source pixels this swatch represents. Always `>= 1`.
    pub fn population(&self) -> u32 {
        self.population
    }

    /// `(h, s, l)` with `h` in `[0, 360)` and `s`, `l` in `[0, 1]`.
    pub fn hsl(&self) -> (f32, f32, f32) {
        *self
            .hsl
            .get_or_init(|| color::rgb_to_hsl(self.rgb.r(), self.rgb.g(), self.rgb.b()))
    }

    /// A packed ARGB color (white or black, alpha tuned by binary search)
    /// guaranteed to meet a 3.0 WCAG contrast ratio against [`Self::rgb`],
    /// suitable for large title-sized overlay text.
    pub fn title_text_color(&self) -> Argb {
        self.text_colors().title
    }

    /// A packed ARGB color guaranteed to meet a 4.5 WCAG contrast ratio
    /// against [`Self::rgb`], suitable for body-sized overlay text.
    pub fn body_text_color(&self) -> Argb {
        self.text_colors().body
    }

    fn text_colors(&self) -> TextColors {
        *self.text_colors.get_or_init(|| compute_text_colors(self.rgb))
    }
}

impl PartialEq for Swatch {
    fn eq(&self, other: &Self) -> bool {
        self.rgb == other.rgb && self.population == other.population
    }
}

impl Eq for Swatch {}

impl Hash for Swatch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rgb.hash(state);
        self.population.hash(state);
    }
}

fn compute_text_colors(rgb: Argb) -> TextColors {
    const WHITE: Argb = Argb::rgb(255, 255, 255);
    const BLACK: Argb = Argb::rgb(0, 0, 0);

    // `rgb` is always opaque: it comes either straight from the quantizer's
    // averaged swatches or from a caller-built opaque color, never from an
    // `Argb` with a translucent alpha channel.
    let min_alpha = |fg: Argb, ratio: f32| {
        color::minimum_alpha_for_contrast(fg, rgb, ratio).expect("swatch rgb is always opaque")
    };

    let light_body = min_alpha(WHITE, 4.5);
    let light_title = min_alpha(WHITE, 3.0);

    if light_body != -1 && light_title != -1 {
        return TextColors {
            title: WHITE.with_alpha(light_title as u8),
            body: WHITE.with_alpha(light_body as u8),
        };
    }

    let dark_body = min_alpha(BLACK, 4.5);
    let dark_title = min_alpha(BLACK, 3.0);

    if dark_body != -1 && dark_title != -1 {
        return TextColors {
            title: BLACK.with_alpha(dark_title as u8),
            body: BLACK.with_alpha(dark_body as u8),
        };
    }

    // Mismatched: white and black can't both fail the same metric (one of
    // them always has enough headroom), so each field independently picks
    // whichever side actually reached its ratio.
    let body = if light_body != -1 {
        WHITE.with_alpha(light_body as u8)
    } else {
        BLACK.with_alpha(dark_body as u8)
    };
    let title = if light_title != -1 {
        WHITE.with_alpha(light_title as u8)
    } else {
        BLACK.with_alpha(dark_title as u8)
    };

    TextColors { title, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_cached_hsl() {
        let a = Swatch::new(Argb::rgb(10, 20, 30), 5);
        let b = Swatch::new(Argb::rgb(10, 20, 30), 5);
        let _ = a.hsl();
        assert_eq!(a, b);
    }

    #[test]
    fn new_forces_opaque_rgb() {
        let translucent = Argb::from_channels(128, 10, 20, 30);
        let s = Swatch::new(translucent, 1);
        assert_eq!(s.rgb().a(), 255);
        // Would panic via the `expect()` in `compute_text_colors` if `rgb` were
        // still translucent, since `minimum_alpha_for_contrast` requires an
        // opaque background.
        let _ = s.title_text_color();
    }

    #[test]
    fn inequality_on_population() {
        let a = Swatch::new(Argb::rgb(10, 20, 30), 5);
        let b = Swatch::new(Argb::rgb(10, 20, 30), 6);
        assert_ne!(a, b);
    }

    #[test]
    fn hsl_is_memoized_and_consistent() {
        let s = Swatch::new(Argb::rgb(255, 0, 0), 1);
        assert_eq!(s.hsl(), (0.0, 1.0, 0.5));
        assert_eq!(s.hsl(), s.hsl());
    }

    #[test]
    fn dark_swatch_gets_white_text() {
        let s = Swatch::new(Argb::rgb(10, 10, 10), 1);
        assert_eq!(s.title_text_color().r(), 255);
        assert_eq!(s.body_text_color().r(), 255);
    }

    #[test]
    fn light_swatch_gets_black_text() {
        let s = Swatch::new(Argb::rgb(245, 245, 245), 1);
        assert_eq!(s.title_text_color().r(), 0);
        assert_eq!(s.body_text_color().r(), 0);
    }

    #[test]
    fn text_colors_meet_their_contrast_ratios() {
        let s = Swatch::new(Argb::rgb(120, 80, 200), 1);
        let title_ratio = color::contrast(s.title_text_color(), s.rgb()).unwrap();
        let body_ratio = color::contrast(s.body_text_color(), s.rgb()).unwrap();
        assert!(title_ratio >= 3.0 - 0.05);
        assert!(body_ratio >= 4.5 - 0.05);
    }
}
