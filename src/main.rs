use clap::Parser;
use png_press::cli::Args;
use png_press::compress::{compress_image, CompressionOptions};
use png_press::{error, info, logger, size_kb, warn};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    let options = match CompressionOptions::new(args.target_kb, args.colors) {
        Ok(options) => options,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    match compress_image(&args.input, &args.output, &options) {
        Ok(report) => {
            let ratio = if report.original_size > 0 {
                (report.original_size as f64 - report.final_size as f64)
                    / report.original_size as f64
                    * 100.0
            } else {
                0.0
            };
            info!(
                "Final size: {:.2} KB ({}x{}, {:.1}% smaller than input)",
                report.final_size_kb(),
                report.width,
                report.height,
                ratio
            );
            if !report.met_target(options.target_kb) {
                warn!(
                    "Output is {:.2} KB, still over the {:.2} KB budget",
                    size_kb(report.final_size),
                    options.target_kb
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
