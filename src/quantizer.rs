//! Median-cut color quantization: histogram → priority-queue box splitting
//! → population-weighted averaged swatches.

use std::collections::BinaryHeap;

use crate::color::{rgb_to_hsl, Argb};
use crate::filter::{passes_all, Filter};
use crate::swatch::Swatch;

const QUANTIZE_WORD_WIDTH: u32 = 5;
const QUANTIZE_WORD_MASK: u16 = (1 << QUANTIZE_WORD_WIDTH) - 1;
const HISTOGRAM_SIZE: usize = 1 << (QUANTIZE_WORD_WIDTH * 3);

/// Reduces a flat pixel buffer to at most `max_colors` representative
/// [`Swatch`]es via histogram quantization and median-cut box splitting.
pub struct ColorCutQuantizer<'a> {
    pixels: Vec<Argb>,
    max_colors: usize,
    filters: &'a [Box<dyn Filter>],
}

impl<'a> ColorCutQuantizer<'a> {
    pub fn new(pixels: Vec<Argb>, max_colors: usize, filters: &'a [Box<dyn Filter>]) -> Self {
        Self {
            pixels,
            max_colors,
            filters,
        }
    }

    /// Runs the full quantization pipeline and returns the resulting
    /// swatches. An empty pixel buffer yields an empty list.
    pub fn get_quantized_colors(self) -> Vec<Swatch> {
        let histogram = self.build_filtered_histogram();

        let mut distinct: Vec<(u16, u32)> = histogram
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(key, &count)| (key as u16, count))
            .collect();

        if distinct.len() <= self.max_colors {
            log::debug!(
                "{} distinct colors fit within max_colors={}, skipping median-cut",
                distinct.len(),
                self.max_colors
            );

            return distinct
                .into_iter()
                .map(|(key, count)| Swatch::new(reconstruct_rgb(key), count))
                .collect();
        }

        log::debug!(
            "{} distinct colors exceed max_colors={}, running median-cut",
            distinct.len(),
            self.max_colors
        );

        quantize_median_cut(&mut distinct, self.max_colors, self.filters)
    }

    fn build_filtered_histogram(&self) -> Vec<u32> {
        let mut histogram = vec![0u32; HISTOGRAM_SIZE];

        for pixel in &self.pixels {
            let key = quantize_key(pixel.r(), pixel.g(), pixel.b());
            histogram[key as usize] += 1;
        }

        for (key, count) in histogram.iter_mut().enumerate() {
            if *count == 0 {
                continue;
            }

            let rgb = reconstruct_rgb(key as u16);
            let hsl = rgb_to_hsl(rgb.r(), rgb.g(), rgb.b());

            if !passes_all(self.filters, rgb, hsl) {
                *count = 0;
            }
        }

        histogram
    }
}

fn quantize_median_cut(colors: &mut [(u16, u32)], max_colors: usize, filters: &[Box<dyn Filter>]) -> Vec<Swatch> {
    let mut queue = BinaryHeap::with_capacity(max_colors);
    let mut next_seq = 1u64;
    queue.push(Vbox::new(colors, 0));

    while queue.len() < max_colors {
        let Some(vbox) = queue.pop() else { break };

        if !vbox.can_split() {
            // Volume-1 (single distinct color) boxes always sort last in
            // this max-heap, so reaching one here with the queue still
            // under max_colors only happens if every remaining box is a
            // singleton — which would already have pushed the queue past
            // max_colors. Kept as a defensive stop rather than an
            // unreachable!(), matching the spec's "handled locally by
            // early termination" contract.
            queue.push(vbox);
            break;
        }

        let (left, right) = vbox.split(&mut next_seq);
        queue.push(left);
        queue.push(right);
    }

    queue
        .into_iter()
        .filter_map(|vbox| vbox.into_average_swatch(filters))
        .collect()
}

#[derive(Eq, PartialEq, Clone, Copy)]
enum Component {
    Red,
    Green,
    Blue,
}

struct Vbox<'a> {
    colors: &'a mut [(u16, u32)],
    population: u32,
    min_r: u8,
    max_r: u8,
    min_g: u8,
    max_g: u8,
    min_b: u8,
    max_b: u8,
    seq: u64,
}

impl<'a> Vbox<'a> {
    fn new(colors: &'a mut [(u16, u32)], seq: u64) -> Self {
        let mut population = 0u32;
        let (mut min_r, mut max_r) = (QUANTIZE_WORD_MASK as u8, 0u8);
        let (mut min_g, mut max_g) = (QUANTIZE_WORD_MASK as u8, 0u8);
        let (mut min_b, mut max_b) = (QUANTIZE_WORD_MASK as u8, 0u8);

        for &(key, count) in colors.iter() {
            population += count;

            let (r, g, b) = decode_key(key);
            min_r = min_r.min(r);
            max_r = max_r.max(r);
            min_g = min_g.min(g);
            max_g = max_g.max(g);
            min_b = min_b.min(b);
            max_b = max_b.max(b);
        }

        Self {
            colors,
            population,
            min_r,
            max_r,
            min_g,
            max_g,
            min_b,
            max_b,
            seq,
        }
    }

    fn can_split(&self) -> bool {
        self.colors.len() > 1
    }

    fn volume(&self) -> u32 {
        (self.max_r - self.min_r + 1) as u32 * (self.max_g - self.min_g + 1) as u32 * (self.max_b - self.min_b + 1) as u32
    }

    fn longest_dimension(&self) -> Component {
        let red = self.max_r - self.min_r;
        let green = self.max_g - self.min_g;
        let blue = self.max_b - self.min_b;

        // Ties broken Red > Green > Blue.
        if red >= green && red >= blue {
            Component::Red
        } else if green >= blue {
            Component::Green
        } else {
            Component::Blue
        }
    }

    /// Splits this box in place, consuming it, and returns the two halves.
    /// Both halves are guaranteed non-empty.
    fn split(self, next_seq: &mut u64) -> (Vbox<'a>, Vbox<'a>) {
        debug_assert!(self.can_split());

        let dimension = self.longest_dimension();
        let population = self.population;
        let colors = self.colors;

        // Sort by the chosen channel occupying the high bits, with the
        // remaining two channels (in fixed R, G, B order) breaking ties —
        // equivalent to remapping each key so the chosen dimension occupies
        // bits 10..15 and sorting the remapped 15-bit integer, without
        // mutating and restoring the stored keys.
        colors.sort_by_key(|&(key, _)| remap_for_sort(key, dimension));

        let len = colors.len();
        let midpoint = population / 2;
        let mut running = 0u32;
        let mut split_index = 0usize;

        for (i, &(_, count)) in colors.iter().enumerate() {
            running += count;
            if running >= midpoint {
                split_index = i;
                break;
            }
        }

        let split_index = split_index.min(len - 2);

        let (left, right) = colors.split_at_mut(split_index + 1);

        let left_seq = *next_seq;
        let right_seq = *next_seq + 1;
        *next_seq += 2;

        (Vbox::new(left, left_seq), Vbox::new(right, right_seq))
    }

    /// Computes this box's population-weighted average color and turns it
    /// into a swatch, re-running the filter chain on the averaged color.
    /// Returns `None` if the averaged color fails the filters.
    fn into_average_swatch(self, filters: &[Box<dyn Filter>]) -> Option<Swatch> {
        let mut red_sum = 0u64;
        let mut green_sum = 0u64;
        let mut blue_sum = 0u64;

        for &(key, count) in self.colors.iter() {
            let (r, g, b) = decode_key(key);
            red_sum += r as u64 * count as u64;
            green_sum += g as u64 * count as u64;
            blue_sum += b as u64 * count as u64;
        }

        if self.population == 0 {
            return None;
        }

        let pop = self.population as f64;
        let red_mean = (red_sum as f64 / pop) as u8;
        let green_mean = (green_sum as f64 / pop) as u8;
        let blue_mean = (blue_sum as f64 / pop) as u8;

        let rgb = Argb::rgb(upshift(red_mean), upshift(green_mean), upshift(blue_mean));
        let hsl = rgb_to_hsl(rgb.r(), rgb.g(), rgb.b());

        if !passes_all(filters, rgb, hsl) {
            return None;
        }

        Some(Swatch::new(rgb, self.population))
    }
}

impl PartialEq for Vbox<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.volume() == other.volume() && self.seq == other.seq
    }
}
impl Eq for Vbox<'_> {}

impl Ord for Vbox<'_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Max-heap by volume; ties broken by insertion order (lower `seq`
        // wins) so splitting is fully deterministic for identical input.
        self.volume().cmp(&other.volume()).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Vbox<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn remap_for_sort(key: u16, dimension: Component) -> u16 {
    let (r, g, b) = decode_key(key);

    match dimension {
        Component::Red => ((r as u16) << 10) | ((g as u16) << 5) | b as u16,
        Component::Green => ((g as u16) << 10) | ((r as u16) << 5) | b as u16,
        Component::Blue => ((b as u16) << 10) | ((r as u16) << 5) | g as u16,
    }
}

fn decode_key(key: u16) -> (u8, u8, u8) {
    let r = ((key >> 10) & QUANTIZE_WORD_MASK) as u8;
    let g = ((key >> 5) & QUANTIZE_WORD_MASK) as u8;
    let b = (key & QUANTIZE_WORD_MASK) as u8;
    (r, g, b)
}

/// Truncates an 8-bit channel to its top 5 bits and packs `(r, g, b)` into a
/// 15-bit histogram key.
fn quantize_key(r: u8, g: u8, b: u8) -> u16 {
    let r5 = (r >> 3) as u16;
    let g5 = (g >> 3) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 10) | (g5 << 5) | b5
}

/// Approximates an 8-bit RGB color from a 15-bit histogram key by shifting
/// each 5-bit channel back up by 3 (not bit-replicating), biasing every
/// output slightly dark. Preserved for parity with the reference behavior;
/// flagged in spec.md §9 as a candidate improvement.
fn reconstruct_rgb(key: u16) -> Argb {
    let (r, g, b) = decode_key(key);
    Argb::rgb(upshift(r), upshift(g), upshift(b))
}

fn upshift(channel5: u8) -> u8 {
    channel5 << (8 - QUANTIZE_WORD_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DefaultFilter;

    fn quantize(pixels: Vec<Argb>, max_colors: usize, filters: Vec<Box<dyn Filter>>) -> Vec<Swatch> {
        ColorCutQuantizer::new(pixels, max_colors, &filters).get_quantized_colors()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let swatches = quantize(vec![], 16, vec![Box::new(DefaultFilter)]);
        assert!(swatches.is_empty());
    }

    #[test]
    fn uniform_red_buffer_yields_one_swatch() {
        let pixels = vec![Argb::rgb(255, 0, 0); 16];
        let swatches = quantize(pixels, 16, vec![Box::new(DefaultFilter)]);

        assert_eq!(swatches.len(), 1);
        assert_eq!(swatches[0].rgb(), Argb::rgb(248, 0, 0));
        assert_eq!(swatches[0].population(), 16);
    }

    #[test]
    fn black_and_white_are_filtered_to_empty() {
        let mut pixels = vec![Argb::rgb(0, 0, 0); 100];
        pixels.extend(vec![Argb::rgb(255, 255, 255); 100]);

        let swatches = quantize(pixels, 16, vec![Box::new(DefaultFilter)]);
        assert!(swatches.is_empty());
    }

    #[test]
    fn single_pixel_yields_one_swatch_population_one() {
        let swatches = quantize(vec![Argb::rgb(10, 200, 90)], 16, vec![]);
        assert_eq!(swatches.len(), 1);
        assert_eq!(swatches[0].population(), 1);
    }

    #[test]
    fn two_distinct_colors_under_cap_skip_median_cut() {
        let mut pixels = vec![Argb::rgb(10, 10, 10); 3];
        pixels.extend(vec![Argb::rgb(200, 200, 200); 1]);

        let swatches = quantize(pixels, 2, vec![]);
        assert_eq!(swatches.len(), 2);

        let populations: Vec<u32> = swatches.iter().map(Swatch::population).collect();
        assert!(populations.contains(&3));
        assert!(populations.contains(&1));
    }

    #[test]
    fn output_size_never_exceeds_max_colors() {
        let mut pixels = Vec::new();
        for r in (0..=255).step_by(5) {
            for g in (0..=255).step_by(40) {
                pixels.push(Argb::rgb(r, g, 128));
            }
        }

        let swatches = quantize(pixels, 8, vec![]);
        assert!(swatches.len() <= 8);
    }

    #[test]
    fn population_sum_never_exceeds_pixel_count_and_matches_with_no_filters() {
        let mut pixels = Vec::new();
        for r in (0..=255).step_by(7) {
            for g in (0..=255).step_by(11) {
                for b in (0..=255).step_by(13) {
                    pixels.push(Argb::rgb(r, g, b));
                }
            }
        }
        let total = pixels.len() as u32;

        let unfiltered: u32 = quantize(pixels.clone(), 16, vec![]).iter().map(Swatch::population).sum();
        assert_eq!(unfiltered, total);

        let filtered: u32 = quantize(pixels, 16, vec![Box::new(DefaultFilter)])
            .iter()
            .map(Swatch::population)
            .sum();
        assert!(filtered <= total);
    }

    #[test]
    fn quantizing_is_deterministic() {
        let mut pixels = Vec::new();
        for r in (0..=255).step_by(3) {
            for g in (0..=255).step_by(19) {
                pixels.push(Argb::rgb(r, g, 200));
            }
        }

        let first = quantize(pixels.clone(), 12, vec![]);
        let second = quantize(pixels, 12, vec![]);

        let first_pairs: Vec<(Argb, u32)> = first.iter().map(|s| (s.rgb(), s.population())).collect();
        let second_pairs: Vec<(Argb, u32)> = second.iter().map(|s| (s.rgb(), s.population())).collect();
        assert_eq!(first_pairs, second_pairs);
    }

    #[test]
    fn hsl_values_of_every_swatch_are_in_range() {
        let mut pixels = Vec::new();
        for r in (0..=255).step_by(9) {
            for g in (0..=255).step_by(17) {
                for b in (0..=255).step_by(23) {
                    pixels.push(Argb::rgb(r, g, b));
                }
            }
        }

        for swatch in quantize(pixels, 16, vec![]) {
            let (h, s, l) = swatch.hsl();
            assert!((0.0..360.0).contains(&h));
            assert!((0.0..=1.0).contains(&s));
            assert!((0.0..=1.0).contains(&l));
        }
    }
}
