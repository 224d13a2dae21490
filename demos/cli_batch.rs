//! Batch CLI for lens_colors with JSON configuration
//!
//! Extracts the dominant color of every image in a directory and matches
//! each one against a reference catalog.

use lens_colors::{
    image_loader::is_supported_extension, BatchProcessor, ColorExtractor, ImageSource,
    PipelineConfig, ReferenceSet,
};
use std::path::{Path, PathBuf};
use std::{env, fs, process};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 4 {
        print_help(&args[0]);
        process::exit(1);
    }

    let config_path = Path::new(&args[1]);
    let catalog_path = Path::new(&args[2]);
    let input_path = Path::new(&args[3]);

    // Load configuration
    let config = match PipelineConfig::from_json_file(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config file: {}", e);
            process::exit(1);
        }
    };

    let catalog = match ReferenceSet::from_json_file(catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error loading catalog: {}", e);
            process::exit(1);
        }
    };

    eprintln!("Loaded configuration from {}", config_path.display());
    eprintln!("Catalog: {} reference colors", catalog.len());
    eprintln!(
        "Concurrency: {}, cooldown: {} ms, tolerance: {}",
        config.batch.concurrency, config.batch.cooldown_ms, config.matching.tolerance
    );
    eprintln!();

    // Find all image files in input directory
    let image_files = match find_image_files(input_path) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error finding image files: {}", e);
            process::exit(1);
        }
    };

    if image_files.is_empty() {
        eprintln!("No image files found in {}", input_path.display());
        process::exit(1);
    }

    eprintln!("Found {} image files to process", image_files.len());

    let extractor = match ColorExtractor::with_config(config.extraction.clone()) {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("Invalid extraction settings: {}", e);
            process::exit(1);
        }
    };

    let sources: Vec<ImageSource> = image_files.into_iter().map(ImageSource::Path).collect();
    let processor = BatchProcessor::new(config.batch.clone(), extractor);

    let report = match processor.process(&sources, &catalog, config.matching.tolerance) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Batch failed: {}", e);
            process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&report.items) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results: {}", e),
    }

    eprintln!();
    eprintln!("Batch processing complete: {}", report.summary());
    for failure in &report.failures {
        eprintln!("  ✗ {}: {}", failure.label, failure.error);
    }

    if !report.is_complete() {
        process::exit(1);
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} <config.json> <catalog.json> <input>", program_name);
    eprintln!();
    eprintln!("Batch extract dominant colors and match them against a catalog.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json    JSON file containing pipeline configuration");
    eprintln!("  catalog.json   JSON array of reference color records");
    eprintln!("  input          Image file or directory of images");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG=debug Print per-image extraction details");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} config.json lots.json photos/", program_name);
}

fn find_image_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    if dir.is_file() {
        return Ok(vec![dir.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(is_supported_extension);
        if path.is_file() && supported {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
