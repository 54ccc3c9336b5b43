use image::{Rgba, RgbaImage};

/// Channels strictly above this value count as "white".
pub const WHITE_THRESHOLD: u8 = 240;

/// Replacement for every near-white pixel: white, fully transparent.
pub const CLEARED: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// True when red, green and blue are all above [`WHITE_THRESHOLD`].
/// Alpha is ignored.
#[inline]
pub fn is_near_white(pixel: &Rgba<u8>) -> bool {
    let [r, g, b, _] = pixel.0;
    r > WHITE_THRESHOLD && g > WHITE_THRESHOLD && b > WHITE_THRESHOLD
}

/// Turn every near-white pixel into [`CLEARED`] in place and return how many matched.
///
/// Other pixels keep all four channels, including an alpha that was already zero.
pub fn clear_near_white(img: &mut RgbaImage) -> u64 {
    let mut cleared = 0;
    for pixel in img.pixels_mut() {
        if is_near_white(pixel) {
            *pixel = CLEARED;
            cleared += 1;
        }
    }
    cleared
}
