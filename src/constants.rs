pub const DEFAULT_TARGET_KB: f64 = 45.0;
pub const DEFAULT_MAX_COLORS: u16 = 128;
pub const MIN_COLORS: u16 = 2;
pub const MAX_COLORS: u16 = 256;

/// Images wider than this are forced to a RESIZED_EDGE square.
pub const MAX_WIDTH: u32 = 512;
pub const RESIZED_EDGE: u32 = 512;

pub const OXIPNG_PRESET: u8 = 4;
pub const LIBDEFLATER_LEVEL: u8 = 12;

pub const QUANTIZER_SPEED: i32 = 4;
pub const DITHERING_LEVEL: f32 = 1.0;

pub const BYTES_PER_KB: f64 = 1024.0;

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
