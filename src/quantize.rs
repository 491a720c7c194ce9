use crate::constants::{DITHERING_LEVEL, QUANTIZER_SPEED};
use crate::error::Result;
use image::DynamicImage;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// A palette-reduced image: at most 256 palette entries plus one
/// palette index per pixel.
pub struct QuantizedImage {
    pub palette: Vec<imagequant::RGBA>,
    pub indexes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Reduces the image to a palette of at most `max_colors` entries.
///
/// Uses libimagequant with dithering enabled. The exact algorithm is an
/// implementation detail; callers only rely on the palette bound.
pub fn quantize_image(img: &DynamicImage, max_colors: u16) -> Result<QuantizedImage> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let pixels: Vec<imagequant::RGBA> = rgba
        .as_raw()
        .chunks_exact(4)
        .map(|p| imagequant::RGBA::new(p[0], p[1], p[2], p[3]))
        .collect();

    let mut liq = imagequant::new();
    liq.set_speed(QUANTIZER_SPEED)?;
    liq.set_max_colors(u32::from(max_colors))?;

    let mut liq_img = liq.new_image(pixels, width as usize, height as usize, 0.0)?;
    let mut quantization = liq.quantize(&mut liq_img)?;
    quantization.set_dithering_level(DITHERING_LEVEL)?;

    let (palette, indexes) = quantization.remapped(&mut liq_img)?;

    Ok(QuantizedImage {
        palette,
        indexes,
        width,
        height,
    })
}

/// Writes the quantized image as an 8-bit indexed PNG with a tRNS chunk
/// carrying the palette's alpha values.
pub fn write_indexed_png(quantized: &QuantizedImage, output: &Path) -> Result<u64> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, quantized.width, quantized.height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);

    let mut plte = Vec::with_capacity(quantized.palette.len() * 3);
    let mut trns = Vec::with_capacity(quantized.palette.len());
    for entry in &quantized.palette {
        plte.extend_from_slice(&[entry.r, entry.g, entry.b]);
        trns.push(entry.a);
    }
    encoder.set_palette(plte);
    encoder.set_trns(trns);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&quantized.indexes)?;
    png_writer.finish()?;

    let size = std::fs::metadata(output)?.len();
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_quantize_respects_color_limit() {
        let img = gradient_image(64, 64);
        let quantized = quantize_image(&img, 16).unwrap();

        assert!(quantized.palette.len() <= 16);
        assert_eq!(quantized.indexes.len(), 64 * 64);
        assert_eq!(quantized.width, 64);
        assert_eq!(quantized.height, 64);
    }

    #[test]
    fn test_quantize_indexes_within_palette() {
        let img = gradient_image(32, 32);
        let quantized = quantize_image(&img, 8).unwrap();

        let palette_len = quantized.palette.len() as u8;
        assert!(quantized.indexes.iter().all(|&i| i < palette_len));
    }

    #[test]
    fn test_quantize_preserves_alpha() {
        let img = RgbaImage::from_fn(16, 16, |x, _| {
            if x < 8 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let quantized = quantize_image(&DynamicImage::ImageRgba8(img), 128).unwrap();

        assert!(quantized.palette.iter().any(|c| c.a == 0));
        assert!(quantized.palette.iter().any(|c| c.a == 255));
    }

    #[test]
    fn test_write_indexed_png_is_decodable() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("indexed.png");

        let img = gradient_image(48, 48);
        let quantized = quantize_image(&img, 32).unwrap();
        let size = write_indexed_png(&quantized, &output).unwrap();

        assert!(size > 0);
        let decoded = image::open(&output).unwrap();
        assert_eq!(decoded.width(), 48);
        assert_eq!(decoded.height(), 48);
    }
}
