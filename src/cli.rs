use clap::Parser;
use std::path::PathBuf;

use crate::constants::{DEFAULT_MAX_COLORS, DEFAULT_TARGET_KB};

#[derive(Parser)]
#[command(
    name = "png-press",
    about = "Squeeze an image into a PNG under a target size budget",
    long_about = "png-press compresses a single image to PNG below a target file size in kilobytes. \
                  It applies lossless PNG optimization first and falls back to palette quantization \
                  when the optimized file is still over budget. Images wider than 512 pixels are \
                  resized to 512x512 before encoding.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    png-press -i logo.png -o logo-optimized.png\n  \
    png-press -i banner.png -o banner-small.png --target-kb 30\n  \
    png-press -i icon.png -o icon.png --colors 64 --quiet"
)]
pub struct Args {
    #[arg(short = 'i', long, help = "Input image file path")]
    pub input: PathBuf,

    #[arg(short = 'o', long, help = "Output PNG file path")]
    pub output: PathBuf,

    #[arg(
        short = 't',
        long = "target-kb",
        default_value_t = DEFAULT_TARGET_KB,
        allow_negative_numbers = true,
        help = "Target output size budget in kilobytes (default: 45)",
        long_help = "Desired maximum output file size in kilobytes, met on a best-effort basis. \
                     If the losslessly optimized PNG exceeds the budget, one quantization pass \
                     is attempted. No further attempts are made."
    )]
    pub target_kb: f64,

    #[arg(
        short = 'c',
        long,
        default_value_t = DEFAULT_MAX_COLORS,
        help = "Maximum palette size for the quantization fallback (2-256, default: 128)",
        long_help = "Number of palette entries the quantization fallback may use. \
                     Only applied when the first attempt exceeds the target budget."
    )]
    pub colors: u16,

    #[arg(short = 'q', long, help = "Suppress progress output")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print extra diagnostic output")]
    pub verbose: bool,
}
