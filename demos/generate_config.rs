//! Generate a default pipeline configuration file
//!
//! Creates a JSON config with all default parameters

use lens_colors::PipelineConfig;
use std::path::Path;
use std::{env, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} configs/default.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = PipelineConfig::default();

    match config.to_json_file(output_path) {
        Ok(()) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Extraction: max {}px, alpha ≥ {}, steps {}/{}, min share {:.0}%",
                config.extraction.max_dimension,
                config.extraction.alpha_threshold,
                config.extraction.fine_step,
                config.extraction.coarse_step,
                config.extraction.min_dominant_share * 100.0
            );
            eprintln!(
                "  Palette: {} (quality {}, {} colors)",
                if config.extraction.use_palette { "enabled" } else { "disabled" },
                config.extraction.palette.quality,
                config.extraction.palette.color_count
            );
            eprintln!("  Matching: ΔE ≤ {:.0}", config.matching.tolerance);
            eprintln!(
                "  Batch: {} at a time, {} ms cooldown",
                config.batch.concurrency, config.batch.cooldown_ms
            );
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
