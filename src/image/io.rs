//! Image decoding via the `image` crate (external collaborator).
//!
//! Available when the `image-io` feature is enabled. This module is the only
//! place encoded bytes (PNG/JPEG/BMP/GIF/TIFF/WebP) enter the engine; decode
//! failures surface as [`ScreenlocError::DecodeFailed`]. Conversion to
//! grayscale still goes through [`GrayImage::from_channels`] so the BT.601
//! luminance formula in spec stays the single source of truth, rather than
//! relying on the `image` crate's own (numerically similar but unspecified)
//! luma conversion.

use crate::image::gray::{ChannelLayout, GrayImage};
use crate::util::{ScreenlocError, ScreenlocResult};
use std::path::Path;

/// Converts a decoded [`image::DynamicImage`] to a [`GrayImage`].
pub fn gray_from_dynamic_image(img: &image::DynamicImage) -> ScreenlocResult<GrayImage> {
    let rgba = img.to_rgba8();
    let width = rgba.width() as usize;
    let height = rgba.height() as usize;
    GrayImage::from_channels(rgba.as_raw(), width, height, ChannelLayout::Rgba)
}

/// Decodes an image from disk and converts it to grayscale.
///
/// Supports any format the `image` crate recognizes from the file contents
/// (PNG, JPEG, BMP, GIF, TIFF, WebP, ...).
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> ScreenlocResult<GrayImage> {
    let img = image::open(path).map_err(|err| ScreenlocError::DecodeFailed {
        reason: err.to_string(),
    })?;
    gray_from_dynamic_image(&img)
}

/// Decodes an image from an in-memory encoded byte buffer and converts it to grayscale.
pub fn decode_gray_image(bytes: &[u8]) -> ScreenlocResult<GrayImage> {
    let img = image::load_from_memory(bytes).map_err(|err| ScreenlocError::DecodeFailed {
        reason: err.to_string(),
    })?;
    gray_from_dynamic_image(&img)
}
