pub mod cli;
pub mod compress;
pub mod constants;
pub mod error;
pub mod logger;
pub mod quantize;

pub use compress::{
    compress_image, load_image_with_metadata, resize_if_oversized, save_optimized_png,
    save_quantized_png, size_kb, validate_file_exists, CompressionOptions, CompressionReport,
};
pub use error::{CompressionError, Result};
pub use quantize::{quantize_image, write_indexed_png, QuantizedImage};
