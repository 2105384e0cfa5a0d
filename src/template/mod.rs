//! Template storage and statistics (component C).

mod plan;

pub use plan::{TemplateStats, EPSILON};

use crate::image::gray::GrayImage;
use crate::image::ImageView;
use crate::util::ScreenlocResult;

/// Owned template image in contiguous grayscale format.
pub struct Template {
    img: GrayImage,
}

impl Template {
    /// Creates a template from a contiguous grayscale buffer.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> ScreenlocResult<Self> {
        let img = GrayImage::from_raw(data, width, height)?;
        Ok(Self { img })
    }

    /// Returns the template width.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the template height.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns a borrowed view of the template data.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }
}
