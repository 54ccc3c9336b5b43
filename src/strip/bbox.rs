use image::{RgbaImage, imageops};
use serde::Serialize;

use super::error::StripError;

/// Bounding box in pixel coordinates.
///
/// `left`/`top` are inclusive, `right`/`bottom` exclusive, so a single pixel at
/// `(x, y)` is `{ left: x, top: y, right: x + 1, bottom: y + 1 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Whether the box spans the whole `width` x `height` canvas.
    pub fn covers(&self, width: u32, height: u32) -> bool {
        self.left == 0 && self.top == 0 && self.right == width && self.bottom == height
    }
}

/// Calculate the tightest bounding box that contains all non-transparent pixels.
/// Returns `None` if the image is fully transparent (or empty).
pub fn calculate_tight_bbox(img: &RgbaImage) -> Option<BBox> {
    let (width, height) = img.dimensions();
    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[3] > 0 {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if !found {
        return None;
    }

    Some(BBox {
        left: min_x,
        top: min_y,
        right: max_x + 1,
        bottom: max_y + 1,
    })
}

/// Crop `img` to `bbox`.
///
/// The image passes through untouched when there is no box or the box already
/// covers the full canvas.
pub fn crop_to_bbox(img: RgbaImage, bbox: Option<BBox>) -> Result<RgbaImage, StripError> {
    let Some(bbox) = bbox else {
        return Ok(img);
    };

    let (width, height) = img.dimensions();
    if bbox.covers(width, height) {
        return Ok(img);
    }

    if bbox.left >= bbox.right
        || bbox.top >= bbox.bottom
        || bbox.right > width
        || bbox.bottom > height
    {
        return Err(StripError::Unexpected(format!(
            "bounding box {bbox:?} does not fit a {width}x{height} image"
        )));
    }

    Ok(imageops::crop_imm(&img, bbox.left, bbox.top, bbox.width(), bbox.height()).to_image())
}
