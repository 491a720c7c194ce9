use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;

/// Writes a smooth multi-color gradient. Compresses reasonably well.
pub fn write_gradient_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            ((x + y) % 256) as u8,
            255,
        ])
    });
    DynamicImage::ImageRgba8(img).save(path).unwrap();
}

/// Writes pseudo-random noise. Nearly incompressible, so the optimized file
/// stays close to the raw pixel size and reliably blows any small budget.
pub fn write_noisy_png(path: &Path, width: u32, height: u32) {
    let mut state: u32 = 0x9e37_79b9;
    let mut next = move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 24) as u8
    };
    let mut img = RgbaImage::new(width, height);
    for pixel in img.pixels_mut() {
        *pixel = Rgba([next(), next(), next(), 255]);
    }
    DynamicImage::ImageRgba8(img).save(path).unwrap();
}

/// Writes a solid-color image. Optimizes down to well under a kilobyte.
pub fn write_flat_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_pixel(width, height, Rgba([30, 120, 200, 255]));
    DynamicImage::ImageRgba8(img).save(path).unwrap();
}

/// Counts distinct RGBA values in a decoded image file.
pub fn count_distinct_colors(path: &Path) -> usize {
    let img = image::open(path).unwrap().to_rgba8();
    let mut colors = std::collections::HashSet::new();
    for pixel in img.pixels() {
        colors.insert(pixel.0);
    }
    colors.len()
}
