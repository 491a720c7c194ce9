use crate::constants::{
    BYTES_PER_KB, LIBDEFLATER_LEVEL, MAX_COLORS, MAX_WIDTH, MIN_COLORS, OXIPNG_PRESET,
    PROGRESS_SPINNER_TEMPLATE, RESIZED_EDGE,
};
use crate::error::{CompressionError, Result};
use crate::quantize::{quantize_image, write_indexed_png};
use crate::{info, verbose};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use indicatif::{ProgressBar, ProgressStyle};
use oxipng::{Deflaters, InFile, Options, OutFile};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CompressionOptions {
    pub target_kb: f64,
    pub max_colors: u16,
}

impl CompressionOptions {
    pub fn new(target_kb: f64, max_colors: u16) -> Result<Self> {
        if !target_kb.is_finite() || target_kb <= 0.0 {
            return Err(CompressionError::InvalidTarget(target_kb));
        }
        if !(MIN_COLORS..=MAX_COLORS).contains(&max_colors) {
            return Err(CompressionError::InvalidColorCount(max_colors));
        }

        Ok(Self {
            target_kb,
            max_colors,
        })
    }
}

/// Outcome of a compression run.
#[derive(Debug, Clone)]
pub struct CompressionReport {
    pub original_size: u64,
    pub optimized_size: u64,
    pub final_size: u64,
    pub width: u32,
    pub height: u32,
    pub quantized: bool,
}

impl CompressionReport {
    pub fn final_size_kb(&self) -> f64 {
        size_kb(self.final_size)
    }

    pub fn met_target(&self, target_kb: f64) -> bool {
        self.final_size_kb() <= target_kb
    }
}

pub fn size_kb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_KB
}

pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Loads an image file and returns it along with its file size in bytes.
pub fn load_image_with_metadata(input_path: &Path) -> Result<(DynamicImage, u64)> {
    validate_file_exists(input_path)?;

    let file_size = fs::metadata(input_path)?.len();
    let img = ImageReader::open(input_path)?.decode()?;

    Ok((img, file_size))
}

/// Resizes the image to a RESIZED_EDGE square when its width exceeds MAX_WIDTH.
///
/// The square resize drops the original aspect ratio. That matches the
/// reference behavior this tool reproduces and is intentional; height alone
/// never triggers a resize. Returns whether a resize happened.
pub fn resize_if_oversized(img: &mut DynamicImage) -> bool {
    if img.width() <= MAX_WIDTH {
        return false;
    }

    *img = img.resize_exact(
        RESIZED_EDGE,
        RESIZED_EDGE,
        image::imageops::FilterType::Lanczos3,
    );
    true
}

// Removes the intermediate file on every exit path, including errors.
struct TempFileGuard(PathBuf);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn oxipng_options() -> Options {
    let mut options = Options::from_preset(OXIPNG_PRESET);
    options.force = true;
    options.deflate = Deflaters::Libdeflater {
        compression: LIBDEFLATER_LEVEL,
    };
    options
}

fn optimize_into(temp_path: &Path, output: &Path) -> Result<u64> {
    let input = InFile::Path(temp_path.to_path_buf());
    let out = OutFile::Path {
        path: Some(output.to_path_buf()),
        preserve_attrs: false,
    };
    oxipng::optimize(&input, &out, &oxipng_options())
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))?;

    let size = fs::metadata(output)?.len();
    Ok(size)
}

fn ensure_parent_dir(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))?;
    }
    Ok(())
}

/// Encodes the image to `output` as a losslessly optimized PNG and returns
/// the resulting file size in bytes.
pub fn save_optimized_png(img: &DynamicImage, output: &Path) -> Result<u64> {
    ensure_parent_dir(output)?;

    let temp_path = output.with_extension("temp.png");
    img.save_with_format(&temp_path, ImageFormat::Png)?;
    let _guard = TempFileGuard(temp_path.clone());

    optimize_into(&temp_path, output)
}

/// Quantizes the image to at most `max_colors` palette entries, writes it as
/// an indexed PNG, and runs the same lossless optimization pass over it.
pub fn save_quantized_png(img: &DynamicImage, output: &Path, max_colors: u16) -> Result<u64> {
    ensure_parent_dir(output)?;

    let quantized = quantize_image(img, max_colors)?;
    verbose!("Palette reduced to {} colors", quantized.palette.len());

    let temp_path = output.with_extension("temp.png");
    write_indexed_png(&quantized, &temp_path)?;
    let _guard = TempFileGuard(temp_path.clone());

    optimize_into(&temp_path, output)
}

/// Compresses a single image to PNG under a best-effort size budget.
///
/// Attempt 1 encodes the (possibly resized) image with lossless PNG
/// optimization. When the result still exceeds `options.target_kb`, a single
/// quantization attempt re-encodes it with a reduced palette. The second
/// result is kept even if it turns out larger than the first.
pub fn compress_image(
    input: &Path,
    output: &Path,
    options: &CompressionOptions,
) -> Result<CompressionReport> {
    let pb = if crate::logger::is_quiet() {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(PROGRESS_SPINNER_TEMPLATE)
                .expect("Invalid progress template"),
        );
        pb
    };
    pb.set_message("Loading image...");

    let (mut img, original_size) = load_image_with_metadata(input)?;
    pb.finish_and_clear();

    verbose!(
        "Loaded {:?}: {}x{}, {:.2} KB",
        input,
        img.width(),
        img.height(),
        size_kb(original_size)
    );

    if resize_if_oversized(&mut img) {
        verbose!("Resized to {}x{}", img.width(), img.height());
    }

    let optimized_size = save_optimized_png(&img, output)?;
    info!("Initial compression: {:.2} KB", size_kb(optimized_size));

    let mut final_size = optimized_size;
    let mut quantized = false;

    if size_kb(optimized_size) > options.target_kb {
        info!("Quantizing to reduce size...");
        final_size = save_quantized_png(&img, output, options.max_colors)?;
        quantized = true;
        info!("Quantized compression: {:.2} KB", size_kb(final_size));
    }

    Ok(CompressionReport {
        original_size,
        optimized_size,
        final_size,
        width: img.width(),
        height: img.height(),
        quantized,
    })
}
