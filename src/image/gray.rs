//! Owned 8-bit grayscale rasters (component A).
//!
//! `GrayImage` is the engine's only owned pixel format: a contiguous,
//! row-major `u8` buffer with `width * height` bytes. Color input is
//! converted once via BT.601 luminance; already-gray input is taken or
//! copied as-is.

use crate::image::ImageView;
use crate::util::{ScreenlocError, ScreenlocResult};

/// Number of interleaved channels in a color source buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Single-channel grayscale; copied without conversion.
    Gray,
    /// Three interleaved channels, red/green/blue.
    Rgb,
    /// Four interleaved channels, red/green/blue/alpha (alpha ignored).
    Rgba,
}

impl ChannelLayout {
    fn channels(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }
}

/// Owned, contiguous 8-bit grayscale image.
#[derive(Clone)]
pub struct GrayImage {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl GrayImage {
    /// Builds a grayscale image directly from an already-gray contiguous buffer.
    ///
    /// Ownership of `pixels` transfers to the returned image. Fails with
    /// [`ScreenlocError::InvalidDimensions`] when `pixels.len() != width * height`.
    pub fn from_raw(pixels: Vec<u8>, width: usize, height: usize) -> ScreenlocResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScreenlocError::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(ScreenlocError::InvalidDimensions { width, height })?;
        if pixels.len() != expected {
            return Err(ScreenlocError::InvalidDimensions { width, height });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Converts an interleaved color (or gray) buffer to a grayscale image.
    ///
    /// Uses BT.601 luminance `Y = 0.299R + 0.587G + 0.114B`, rounded to the
    /// nearest integer and clamped to `[0, 255]`; alpha, if present, is
    /// ignored. Fails with [`ScreenlocError::InvalidDimensions`] when the
    /// buffer length disagrees with `width * height * channels`.
    pub fn from_channels(
        data: &[u8],
        width: usize,
        height: usize,
        layout: ChannelLayout,
    ) -> ScreenlocResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScreenlocError::InvalidDimensions { width, height });
        }
        let channels = layout.channels();
        let pixel_count = width
            .checked_mul(height)
            .ok_or(ScreenlocError::InvalidDimensions { width, height })?;
        let expected = pixel_count
            .checked_mul(channels)
            .ok_or(ScreenlocError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(ScreenlocError::InvalidDimensions { width, height });
        }

        if layout == ChannelLayout::Gray {
            return Self::from_raw(data.to_vec(), width, height);
        }

        let mut pixels = Vec::with_capacity(pixel_count);
        for px in data.chunks_exact(channels) {
            let r = px[0] as f32;
            let g = px[1] as f32;
            let b = px[2] as f32;
            let y = 0.299 * r + 0.587 * g + 0.114 * b;
            pixels.push(y.round().clamp(0.0, 255.0) as u8);
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub(crate) fn from_view(view: ImageView<'_, u8>) -> ScreenlocResult<Self> {
        let width = view.width();
        let height = view.height();
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = view.row(y).ok_or(ScreenlocError::BufferTooSmall {
                needed: (y + 1) * view.stride(),
                got: view.as_slice().len(),
            })?;
            pixels.extend_from_slice(row);
        }
        Self::from_raw(pixels, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the raw row-major pixel buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns a borrowed, contiguous-stride view over the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView::from_slice(&self.pixels, self.width, self.height)
            .expect("GrayImage invariants guarantee a valid view")
    }
}
