//! Builders that orchestrate resize → pixel extraction → quantize →
//! palette construction.

use image::{math::Rect, GenericImageView, ImageBuffer, Rgba, RgbaImage};

use crate::color::Argb;
use crate::error::{PaletteError, Result};
use crate::filter::{DefaultFilter, Filter};
use crate::palette::Palette;
use crate::quantizer::ColorCutQuantizer;
use crate::swatch::Swatch;
use crate::target::Target;

/// The default amount of colors to calculate at maximum while quantizing an
/// image.
pub const DEFAULT_CALCULATE_NUMBER_COLORS: usize = 16;
/// The default area, in pixels, to resize a given image to before
/// quantizing.
pub const DEFAULT_RESIZE_IMAGE_AREA: u32 = 112 * 112;

/// A builder for a new [`Palette`] generated from an [`image`] buffer.
pub struct PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>,
    targets: Vec<Target>,
    maximum_color_count: usize,
    resize_area: Option<u32>,
    resize_max_dimension: Option<u32>,
    region: Option<Rect>,
    filters: Vec<Box<dyn Filter>>,
}

/// A builder for a new [`Palette`] generated directly from a raw ARGB8888
/// pixel buffer, bypassing the `image` crate entirely.
pub struct RawPixelsBuilder {
    image: RgbaImage,
    targets: Vec<Target>,
    maximum_color_count: usize,
    resize_area: Option<u32>,
    resize_max_dimension: Option<u32>,
    filters: Vec<Box<dyn Filter>>,
}

impl Palette {
    /// Starts a new [`PaletteBuilder`] from a given image buffer.
    pub fn from_image<P>(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> PaletteBuilder<P>
    where
        P: image::Pixel<Subpixel = u8> + 'static,
    {
        PaletteBuilder::new(image)
    }

    /// Starts a new [`RawPixelsBuilder`] from a flat buffer of packed ARGB
    /// bytes (`[a, r, g, b]` repeated for each pixel, row-major).
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidBuffer`] if `pixels.len() != width *
    /// height * 4`.
    pub fn from_raw_pixels(pixels: &[u8], width: u32, height: u32) -> Result<RawPixelsBuilder> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(PaletteError::InvalidBuffer {
                expected,
                actual: pixels.len(),
            });
        }

        let mut image = RgbaImage::new(width, height);
        for (chunk, pixel) in pixels.chunks_exact(4).zip(image.pixels_mut()) {
            let [a, r, g, b] = [chunk[0], chunk[1], chunk[2], chunk[3]];
            *pixel = Rgba([r, g, b, a]);
        }

        Ok(RawPixelsBuilder::new(image))
    }

    /// Generates a [`Palette`] directly from a pre-built swatch list,
    /// selecting against the default six targets.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyInput`] if `swatches` is empty.
    pub fn from_swatches(swatches: Vec<Swatch>) -> Result<Palette> {
        if swatches.is_empty() {
            return Err(PaletteError::EmptyInput);
        }

        Ok(Palette::generate_from(swatches, Target::default_targets().to_vec()))
    }
}

impl<P> PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    fn new(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> Self {
        Self {
            image,
            targets: Target::default_targets().to_vec(),
            maximum_color_count: DEFAULT_CALCULATE_NUMBER_COLORS,
            resize_area: Some(DEFAULT_RESIZE_IMAGE_AREA),
            resize_max_dimension: None,
            region: None,
            filters: vec![Box::new(DefaultFilter)],
        }
    }

    /// Sets the maximum number of colors the quantizer should produce.
    pub fn maximum_color_count(mut self, count: usize) -> Self {
        self.maximum_color_count = count;
        self
    }

    /// Sets the desired area to shrink the image to before quantizing.
    /// `area <= 0` disables area-based resizing.
    pub fn resize_image_area(mut self, area: i64) -> Self {
        self.resize_area = if area > 0 { Some(area as u32) } else { None };
        self
    }

    /// Sets the desired longest-side dimension to shrink the image to
    /// before quantizing. When positive, this overrides
    /// [`Self::resize_image_area`].
    pub fn resize_max_dimension(mut self, max_dimension: i64) -> Self {
        self.resize_max_dimension = if max_dimension > 0 { Some(max_dimension as u32) } else { None };
        self
    }

    /// Restricts palette generation to a sub-region of the image. The
    /// region is expressed in the original image's coordinate space and is
    /// rescaled if the image is shrunk before quantizing.
    pub fn region(mut self, x: u32, y: u32, width: u32, height: u32) -> Self {
        self.region = Some(Rect { x, y, width, height });
        self
    }

    /// Clears the region set by [`Self::region`].
    pub fn clear_region(mut self) -> Self {
        self.region = None;
        self
    }

    /// Adds a target to the selection profile. Default targets remain.
    pub fn add_target(mut self, target: Target) -> Self {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
        self
    }

    /// Removes every target, including the six built-in presets.
    pub fn clear_targets(mut self) -> Self {
        self.targets.clear();
        self
    }

    /// Adds a custom filter to the quantization filter chain.
    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    /// Removes every filter, including the default filter.
    pub fn clear_filters(mut self) -> Self {
        self.filters.clear();
        self
    }

    /// Consumes the builder and generates a [`Palette`].
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyInput`] if the image has zero area.
    pub fn generate(mut self) -> Result<Palette> {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return Err(PaletteError::EmptyInput);
        }

        let scale = scale_ratio(width, height, self.resize_area, self.resize_max_dimension);

        if scale < 1.0 {
            log::debug!("resizing {width}x{height} image by a factor of {scale:.4} before quantizing");

            self.image = image::imageops::resize(
                &self.image,
                (width as f32 * scale).ceil() as u32,
                (height as f32 * scale).ceil() as u32,
                image::imageops::FilterType::Nearest,
            );

            if let Some(region) = self.region.as_mut() {
                region.x = (region.x as f32 * scale).floor() as u32;
                region.y = (region.y as f32 * scale).floor() as u32;
                region.width = ((region.width as f32 * scale) as u32).max(1);
                region.height = ((region.height as f32 * scale) as u32).max(1);
            }
        }

        let pixels: Vec<Argb> = if let Some(region) = self.region {
            self.image
                .view(region.x, region.y, region.width, region.height)
                .pixels()
                .map(|(_, _, p)| pixel_to_argb(&p))
                .collect()
        } else {
            self.image.pixels().map(pixel_to_argb).collect()
        };

        Ok(generate_palette(pixels, self.maximum_color_count, self.filters, self.targets))
    }
}

impl RawPixelsBuilder {
    fn new(image: RgbaImage) -> Self {
        Self {
            image,
            targets: Target::default_targets().to_vec(),
            maximum_color_count: DEFAULT_CALCULATE_NUMBER_COLORS,
            resize_area: Some(DEFAULT_RESIZE_IMAGE_AREA),
            resize_max_dimension: None,
            filters: vec![Box::new(DefaultFilter)],
        }
    }

    pub fn maximum_color_count(mut self, count: usize) -> Self {
        self.maximum_color_count = count;
        self
    }

    pub fn resize_image_area(mut self, area: i64) -> Self {
        self.resize_area = if area > 0 { Some(area as u32) } else { None };
        self
    }

    pub fn resize_max_dimension(mut self, max_dimension: i64) -> Self {
        self.resize_max_dimension = if max_dimension > 0 { Some(max_dimension as u32) } else { None };
        self
    }

    pub fn add_target(mut self, target: Target) -> Self {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
        self
    }

    pub fn clear_targets(mut self) -> Self {
        self.targets.clear();
        self
    }

    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn clear_filters(mut self) -> Self {
        self.filters.clear();
        self
    }

    /// Consumes the builder and generates a [`Palette`].
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyInput`] if the buffer has zero area.
    pub fn generate(mut self) -> Result<Palette> {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return Err(PaletteError::EmptyInput);
        }

        let scale = scale_ratio(width, height, self.resize_area, self.resize_max_dimension);

        if scale < 1.0 {
            log::debug!("resizing {width}x{height} raw buffer by a factor of {scale:.4} before quantizing");

            self.image = image::imageops::resize(
                &self.image,
                (width as f32 * scale).ceil() as u32,
                (height as f32 * scale).ceil() as u32,
                image::imageops::FilterType::Nearest,
            );
        }

        let pixels: Vec<Argb> = self.image.pixels().map(pixel_to_argb).collect();

        Ok(generate_palette(pixels, self.maximum_color_count, self.filters, self.targets))
    }
}

fn pixel_to_argb<P>(pixel: &P) -> Argb
where
    P: image::Pixel<Subpixel = u8>,
{
    let rgba = pixel.to_rgba();
    Argb::from_channels(rgba.0[3], rgba.0[0], rgba.0[1], rgba.0[2])
}

fn scale_ratio(width: u32, height: u32, resize_area: Option<u32>, resize_max_dimension: Option<u32>) -> f32 {
    if let Some(max_dimension) = resize_max_dimension {
        let longest = width.max(height);
        return if longest > max_dimension {
            max_dimension as f32 / longest as f32
        } else {
            1.0
        };
    }

    if let Some(area) = resize_area {
        let current = width as u64 * height as u64;
        if current > area as u64 {
            return (area as f32 / current as f32).sqrt();
        }
    }

    1.0
}

fn generate_palette(
    pixels: Vec<Argb>,
    maximum_color_count: usize,
    filters: Vec<Box<dyn Filter>>,
    targets: Vec<Target>,
) -> Palette {
    let swatches = ColorCutQuantizer::new(pixels, maximum_color_count, &filters).get_quantized_colors();
    Palette::generate_from(swatches, targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_pixels_rejects_mismatched_buffer_length() {
        let err = Palette::from_raw_pixels(&[0u8; 3], 1, 1).unwrap_err();
        assert_eq!(
            err,
            PaletteError::InvalidBuffer {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn raw_pixels_roundtrips_channel_order() {
        // a=0xFF, r=0x10, g=0x20, b=0x30
        let bytes = [0xFFu8, 0x10, 0x20, 0x30];
        let palette = Palette::from_raw_pixels(&bytes, 1, 1)
            .unwrap()
            .resize_image_area(0)
            .generate()
            .unwrap();

        assert_eq!(palette.swatches().len(), 1);
        assert_eq!(palette.swatches()[0].rgb(), Argb::rgb(0x10, 0x20, 0x30));
    }

    #[test]
    fn scale_ratio_prefers_max_dimension_when_set() {
        let ratio = scale_ratio(1000, 500, Some(1), Some(100));
        assert!((ratio - 0.1).abs() < 1e-6);
    }

    #[test]
    fn scale_ratio_is_one_when_already_small() {
        assert_eq!(scale_ratio(10, 10, Some(DEFAULT_RESIZE_IMAGE_AREA), None), 1.0);
    }
}
