//! Command-line interface for leafscan
//!
//! Analyzes a single leaf/crop photograph and prints the result record

use leafscan::{analyze_image, AnalysisResult};
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut image_path_arg = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let image_path_str = match image_path_arg {
        Some(path) => path,
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };

    let image_path = Path::new(&image_path_str);

    if !image_path.exists() {
        eprintln!("Error: File '{}' does not exist", image_path.display());
        process::exit(1);
    }

    match analyze_image(image_path) {
        Ok(result) => {
            print_result(&result);
        }
        Err(error) => {
            eprintln!("Analysis failed: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} <image_path>", program_name);
    eprintln!();
    eprintln!("Compute vegetation-health indicators (GCC, color-class counts and");
    eprintln!("disease ratios) from a leaf or crop photograph.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} leaf.jpg", program_name);
    eprintln!("  {} plot_photos/row4.png", program_name);
}

fn print_result(result: &AnalysisResult) {
    // JSON to stdout for programmatic use
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        }
    }

    // Summary to stderr for human reading
    eprintln!();
    eprintln!("Leaf Analysis Summary:");
    eprintln!("  GCC: {:.4}", result.gcc);
    eprintln!(
        "  Mean RGB: R={:.1}, G={:.1}, B={:.1}",
        result.mean_r, result.mean_g, result.mean_b
    );
    eprintln!("  Green pixels: {}", result.counts.green);
    eprintln!(
        "  Disease pixels: {} (white {}, brown {}, yellow {})",
        result.counts.disease_pixels(),
        result.counts.white,
        result.counts.brown,
        result.counts.yellow
    );
    eprintln!(
        "  Ratios: white/green={:.4}, brown/green={:.4}, yellow/green={:.4}",
        result.ratios.white_green, result.ratios.brown_green, result.ratios.yellow_green
    );

    if result.counts.green == 0 {
        eprintln!("  Warning: No green pixels detected; ratios default to 0.");
    }
}
