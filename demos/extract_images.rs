//! Command-line front end for the image extraction plugin.
//!
//! Reads a Word `Data` stream that has already been dumped from the OLE2
//! container and prints one digest line per embedded picture.
//!
//! # Usage
//!
//! Hash every picture:
//! ```sh
//! cargo run --example extract_images -- Data.bin
//! ```
//!
//! Save the pictures, named by digest, and stop after the first one:
//! ```sh
//! cargo run --example extract_images -- Data.bin --save out/ --first
//! ```
//!
//! Trace the element walk:
//! ```sh
//! RUST_LOG=blipkit=trace cargo run --example extract_images -- Data.bin
//! ```

use blipkit::plugin::{DATA_STREAM, PLUGIN_NAME};
use blipkit::{ExtractImagePlugin, PluginOptions, ScanPolicy};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Extract and SHA-256 hash the pictures of a Word Data stream
#[derive(Parser, Debug)]
#[command(name = "extract_images", version)]
struct Args {
    /// Raw contents of the `Data` stream
    #[arg(value_name = "STREAM_FILE")]
    input: PathBuf,

    /// Existing directory receiving one file per picture
    #[arg(short, long, value_name = "DIR")]
    save: Option<PathBuf>,

    /// Stop after the first extracted picture
    #[arg(long)]
    first: bool,

    /// Print a summary and per-picture details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if !args.input.is_file() {
        eprintln!("Error: Input path is not a file: {}", args.input.display());
        std::process::exit(1);
    }

    let mut options = PluginOptions::new().with_policy(if args.first {
        ScanPolicy::FirstImage
    } else {
        ScanPolicy::EveryElement
    });
    if let Some(dir) = args.save {
        options = options.with_save_dir(dir);
    }

    let data = fs::read(&args.input)?;
    let output = ExtractImagePlugin::new(options).analyze(&[DATA_STREAM], &data)?;

    println!("{PLUGIN_NAME}");
    for line in &output.lines {
        println!("{line}");
    }

    if args.verbose {
        for report in &output.reports {
            println!(
                "  element at {:#x}: {} ({} bytes){}",
                report.element_offset,
                report.blip_type,
                report.payload_len,
                report
                    .saved_to
                    .as_ref()
                    .map(|p| format!(" -> {}", p.display()))
                    .unwrap_or_default()
            );
        }
        println!(
            "{} element(s), {} image(s), {} skipped",
            output.summary.elements, output.summary.images, output.summary.skipped
        );
    }

    if !output.ran {
        eprintln!("No images found in {}", args.input.display());
    }

    Ok(())
}
