use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat, RgbaImage};
use log::{debug, info};

use super::bbox::{BBox, calculate_tight_bbox, crop_to_bbox};
use super::error::StripError;
use super::models::strip_report::StripReport;
use super::recolor::clear_near_white;

/// Result of running the in-memory part of the pipeline.
pub struct Processed {
    pub image: RgbaImage,
    pub bbox: Option<BBox>,
    pub cleared_pixels: u64,
}

/// Strip the near-white background from `input` and write the trimmed PNG to `output`.
///
/// The output's parent directory must already exist; it is never created.
/// The PNG is staged next to `output` and renamed over it, so a failed write
/// leaves any previous output intact.
pub fn strip(input: &Path, output: &Path) -> Result<StripReport, StripError> {
    let img = image::open(input).map_err(|source| StripError::Decode {
        path: input.to_path_buf(),
        source,
    })?;
    let (source_width, source_height) = (img.width(), img.height());
    debug!(
        "decoded {} ({source_width}x{source_height}, {:?})",
        input.display(),
        img.color()
    );

    let processed = process_image(img)?;

    write_png(&processed.image, output)?;

    let (width, height) = processed.image.dimensions();
    info!("wrote {} ({width}x{height})", output.display());

    Ok(StripReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        source_width,
        source_height,
        cleared_pixels: processed.cleared_pixels,
        bbox: processed.bbox,
        width,
        height,
    })
}

/// Force RGBA, clear near-white pixels, and crop to the visible bounding box.
///
/// A fully transparent result keeps its original dimensions.
pub fn process_image(img: DynamicImage) -> Result<Processed, StripError> {
    let mut rgba = img.into_rgba8();

    let cleared_pixels = clear_near_white(&mut rgba);
    debug!("cleared {cleared_pixels} near-white pixel(s)");

    let bbox = calculate_tight_bbox(&rgba);
    match bbox {
        Some(b) => debug!("bounding box {b:?}"),
        None => debug!("no visible pixels left, skipping crop"),
    }

    let image = crop_to_bbox(rgba, bbox)?;

    Ok(Processed {
        image,
        bbox,
        cleared_pixels,
    })
}

fn write_png(image: &RgbaImage, output: &Path) -> Result<(), StripError> {
    let encode_error = |source: ImageError| StripError::Encode {
        path: output.to_path_buf(),
        source,
    };

    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .map_err(encode_error)?;

    let staging = staging_path(output);
    if let Err(e) = fs::write(&staging, png.get_ref()).and_then(|()| fs::rename(&staging, output))
    {
        let _ = fs::remove_file(&staging);
        return Err(encode_error(ImageError::IoError(e)));
    }
    Ok(())
}

/// Hidden sibling of `output`, e.g. `public/.logo.png.tmp`.
fn staging_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(output.file_name().unwrap_or(OsStr::new("output")));
    name.push(".tmp");
    output.with_file_name(name)
}
