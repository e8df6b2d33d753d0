//! Batch CLI for leafscan with JSON configuration
//!
//! Processes all images in a directory using a JSON configuration file and
//! writes the summary table as CSV

use leafscan::{image_loader, BatchAggregator, BatchConfig, RowOutcome};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help(&args[0]);
        process::exit(1);
    }

    if args[1] == "--init-config" {
        let output = args.get(2).map(PathBuf::from).unwrap_or_else(|| {
            eprintln!("Usage: {} --init-config <output_config.json>", args[0]);
            process::exit(1);
        });
        init_config(&output);
        return;
    }

    let config_path = Path::new(&args[1]);

    if !config_path.exists() {
        eprintln!("Error: Config file '{}' does not exist", config_path.display());
        process::exit(1);
    }

    let config = match BatchConfig::from_json_file(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config file: {}", e);
            process::exit(1);
        }
    };

    eprintln!("Loaded configuration from {}", config_path.display());
    eprintln!("Input path: {}", config.input_path.display());
    eprintln!("Output path: {}", config.output_path.display());
    eprintln!();

    if let Err(e) = fs::create_dir_all(&config.output_path) {
        eprintln!("Error creating output directory: {}", e);
        process::exit(1);
    }

    let image_files = match find_image_files(&config.input_path) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error finding image files: {}", e);
            process::exit(1);
        }
    };

    if image_files.is_empty() {
        eprintln!("No image files found in {}", config.input_path.display());
        process::exit(1);
    }

    eprintln!("Found {} image files to process", image_files.len());
    eprintln!();

    let mut aggregator = BatchAggregator::with_config(&config);

    if config.parallel {
        eprintln!("Processing {} images in parallel...", image_files.len());
        if let Err(e) = aggregator.run_paths_parallel(&image_files) {
            eprintln!("Batch aborted: {}", e);
            process::exit(1);
        }
    } else {
        for (i, image_path) in image_files.iter().enumerate() {
            let filename = image_path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown");

            eprint!("[{}/{}] Processing {}... ", i + 1, image_files.len(), filename);

            if let Err(e) = aggregator.process_path(image_path) {
                eprintln!("✗ {}", e);
                eprintln!("Batch aborted (failure policy: abort)");
                process::exit(1);
            }

            match &aggregator.summary().rows().last().unwrap().outcome {
                RowOutcome::Analyzed(metrics) => {
                    eprintln!("✓");
                    if env::var("VERBOSE").is_ok() {
                        eprintln!(
                            "  → GCC: {:.4}, green: {}, disease: {}",
                            metrics.gcc, metrics.green_count, metrics.disease_pixels
                        );
                    }
                }
                RowOutcome::Failed { reason } => {
                    eprintln!("✗ {}", reason);
                }
            }
        }
    }

    let summary = aggregator.finish();
    let error_count = summary.failed_count();
    let success_count = summary.len() - error_count;

    let csv_path = config.output_path.join("summary.csv");
    if let Err(e) = fs::write(&csv_path, summary.to_csv()) {
        eprintln!("Error writing summary CSV: {}", e);
        process::exit(1);
    }

    eprintln!();
    eprintln!("Batch processing complete:");
    eprintln!("  Success: {}", success_count);
    eprintln!("  Errors: {}", error_count);
    eprintln!("  Summary written to: {}", csv_path.display());

    if error_count > 0 {
        process::exit(1);
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} <config.json>", program_name);
    eprintln!("       {} --init-config <output_config.json>", program_name);
    eprintln!();
    eprintln!("Batch process leaf/crop photographs using JSON configuration and");
    eprintln!("write an ordered summary table (CSV) to the output directory.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json    JSON file containing batch configuration");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VERBOSE=1      Print per-image metrics during processing");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} field_trial.json", program_name);
    eprintln!("  VERBOSE=1 {} field_trial.json", program_name);
}

fn init_config(output_path: &Path) {
    if let Some(parent) = output_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = BatchConfig::default();
    match config.to_json_file(output_path) {
        Ok(_) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!("  Input:  {}", config.input_path.display());
            eprintln!("  Output: {}", config.output_path.display());
            eprintln!("  Failure policy: {:?}", config.failure_policy);
            eprintln!("  Parallel: {}", config.parallel);
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}

fn find_image_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if dir.is_file() {
        // Single file provided
        files.push(dir.to_path_buf());
        return Ok(files);
    }

    // Directory provided - scan for image files
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension() {
                let ext_str = ext.to_str().unwrap_or("");
                if image_loader::is_supported_extension(ext_str) {
                    files.push(path);
                }
            }
        }
    }

    files.sort();
    Ok(files)
}
