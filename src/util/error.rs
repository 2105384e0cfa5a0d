//! Error types for screenloc.

use thiserror::Error;

/// Result alias for screenloc operations.
pub type ScreenlocResult<T> = std::result::Result<T, ScreenlocError>;

/// Errors that can occur when running screenloc operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScreenlocError {
    /// The provided dimensions are invalid (must be non-zero), or a raster
    /// buffer length disagrees with `width * height * channels`.
    #[error("invalid dimensions: width={width} height={height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The provided stride is smaller than the image width.
    #[error("invalid stride: width={width} stride={stride}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer is too small for the requested view.
    #[error("buffer too small: needed={needed} got={got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The requested ROI lies outside the image bounds.
    #[error(
        "roi out of bounds: x={x} y={y} width={width} height={height} img_width={img_width} img_height={img_height}"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The template exceeds the source along at least one axis.
    #[error(
        "template larger than source: template={tpl_width}x{tpl_height} source={src_width}x{src_height}"
    )]
    TemplateLargerThanSource {
        tpl_width: usize,
        tpl_height: usize,
        src_width: usize,
        src_height: usize,
    },
    /// The template is degenerate and cannot be normalized (flat, zero variance).
    #[error("degenerate template: {reason}")]
    DegenerateTemplate { reason: &'static str },
    /// The image decoder collaborator failed to decode the input bytes.
    #[error("image decode failed: {reason}")]
    DecodeFailed { reason: String },
    /// The requested threshold lies outside `[0, 1]`.
    #[error("invalid threshold: {value} (must be in [0, 1])")]
    InvalidThreshold { value: f64 },
    /// `max_count` was less than 1.
    #[error("invalid max_count: {value} (must be >= 1)")]
    InvalidMaxCount { value: usize },
    /// A negative thread count was requested.
    #[error("invalid thread count: {value} (must be >= 0)")]
    InvalidThreadCount { value: i64 },
    /// The requested index is out of bounds for a collection.
    #[error("index out of bounds: {context} index={index} len={len}")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        context: &'static str,
    },
}
