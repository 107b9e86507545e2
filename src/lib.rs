// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Extracts a ranked, perceptually-classified set of color swatches from an
//! image.
//!
//! Given a decoded image or a flat pixel buffer, [`Palette::from_image`],
//! [`Palette::from_raw_pixels`], or [`Palette::from_swatches`] produce a
//! [`Palette`]: every distinct swatch the quantizer found, plus the
//! best-matching swatch for each of six named aesthetic targets
//! (vibrant/muted × dark/normal/light), each with contrast-guaranteed
//! overlay text colors.

mod builder;
mod color;
mod error;
mod filter;
mod palette;
mod quantizer;
mod swatch;
mod target;

pub use crate::builder::{PaletteBuilder, RawPixelsBuilder, DEFAULT_CALCULATE_NUMBER_COLORS, DEFAULT_RESIZE_IMAGE_AREA};
pub use crate::color::{composite_colors, contrast, luminance, minimum_alpha_for_contrast, rgb_to_hsl, rgb_to_xyz, set_alpha, Argb};
pub use crate::error::{PaletteError, Result};
pub use crate::filter::{DefaultFilter, Filter};
pub use crate::palette::Palette;
pub use crate::swatch::Swatch;
pub use crate::target::{Target, TargetBuilder};
pub use image;
