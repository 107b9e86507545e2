//! Color filters used during quantization.

use crate::color::Argb;

const BLACK_MAX_LIGHTNESS: f32 = 0.05;
const WHITE_MIN_LIGHTNESS: f32 = 0.95;
const RED_I_LINE_HUE_MIN: f32 = 10.0;
const RED_I_LINE_HUE_MAX: f32 = 37.0;
const RED_I_LINE_SATURATION_MAX: f32 = 0.82;

/// A trait used to implement filters for the image quantization process.
///
/// During quantization, filters are used to remove colors from the
/// histogram before median-cut runs, and again to remove final averaged
/// swatches that may have drifted into a filtered region. This trait allows
/// the library consumer to implement custom filters.
///
/// See [`crate::PaletteBuilder::add_filter`] on how to add filters to the
/// quantization process.
pub trait Filter {
    /// Return whether a given color should be allowed or not. The same
    /// color is given in both sRGB and HSL for convenience.
    fn is_allowed(&self, rgb: Argb, hsl: (f32, f32, f32)) -> bool;
}

/// The default filter included in every [`crate::PaletteBuilder`] by
/// default.
///
/// This filter disallows colors very close to black, colors very close to
/// white, and colors near the red "I line" (a skin-tone heuristic).
#[derive(Debug, Clone, Copy)]
pub struct DefaultFilter;

impl Filter for DefaultFilter {
    fn is_allowed(&self, _rgb: Argb, (h, s, l): (f32, f32, f32)) -> bool {
        !is_black(l) && !is_white(l) && !is_near_red_i_line(h, s)
    }
}

fn is_black(l: f32) -> bool {
    l <= BLACK_MAX_LIGHTNESS
}

fn is_white(l: f32) -> bool {
    l >= WHITE_MIN_LIGHTNESS
}

fn is_near_red_i_line(h: f32, s: f32) -> bool {
    (RED_I_LINE_HUE_MIN..=RED_I_LINE_HUE_MAX).contains(&h) && s <= RED_I_LINE_SATURATION_MAX
}

/// Runs a color through a chain of filters; it passes iff every filter
/// allows it. An empty chain always allows.
pub fn passes_all(filters: &[Box<dyn Filter>], rgb: Argb, hsl: (f32, f32, f32)) -> bool {
    filters.iter().all(|f| f.is_allowed(rgb, hsl))
}
