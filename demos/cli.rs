//! Command-line interface for lens_colors
//!
//! Extracts the dominant color of one image and optionally matches it
//! against a reference catalog.

use lens_colors::{extract_colors, ExtractedColors, MatchResult, PaletteOptions, ReferenceSet};
use std::path::{Path, PathBuf};
use std::{env, process};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut image_path_arg = None;
    let mut catalog_path = None;
    let mut tolerance = lens_colors::constants::matching::DEFAULT_TOLERANCE;
    let mut options = PaletteOptions::default();

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" => {
                catalog_path = Some(PathBuf::from(next_value(&args, &mut i)));
            }
            "--tolerance" => {
                tolerance = parse_number(&args, &mut i);
            }
            "--colors" => {
                options.color_count = parse_number(&args, &mut i);
            }
            "--quality" => {
                options.quality = parse_number(&args, &mut i);
            }
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

    let colors = match extract_colors(image_path, &options) {
        Ok(colors) => colors,
        Err(error) => {
            eprintln!("Extraction failed: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    };

    let matches = match catalog_path {
        Some(path) => match ReferenceSet::from_json_file(&path) {
            Ok(catalog) => catalog.search(colors.dominant_color.lab, tolerance),
            Err(error) => {
                eprintln!("Error loading catalog: {}", error);
                process::exit(1);
            }
        },
        None => Vec::new(),
    };

    print_result(&colors, &matches);
}

fn next_value<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {}", args[*i - 1]);
            process::exit(1);
        }
    }
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: &mut usize) -> T {
    let value = next_value(args, i);
    match value.parse() {
        Ok(number) => number,
        Err(_) => {
            eprintln!("Invalid number for {}: {}", args[*i - 1], value);
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>", program_name);
    eprintln!();
    eprintln!("Extract the dominant color of an image and match it against a catalog.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --catalog FILE     JSON array of reference color records");
    eprintln!("  --tolerance N      Maximum Lab distance for a match (default: 20)");
    eprintln!("  --colors N         Palette size, 2-256 (default: 10)");
    eprintln!("  --quality N        Palette sampling stride (default: 10)");
    eprintln!("  --help, -h         Show this help message");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG=debug     Show extraction diagnostics");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} photo.jpg", program_name);
    eprintln!("  {} --catalog lots.json --tolerance 10 photo.png", program_name);
}

fn print_result(colors: &ExtractedColors, matches: &[MatchResult]) {
    let output = serde_json::json!({
        "extraction": colors,
        "matches": matches,
    });

    // Print JSON to stdout for programmatic use
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing result: {}", e),
    }

    let dominant = &colors.dominant_color;
    let (h, s, l) = dominant.hsl.to_degrees_percent();

    // Print summary to stderr for human reading
    eprintln!();
    eprintln!("Dominant Color Summary:");
    eprintln!("  Hex Color: {}", dominant.hex);
    eprintln!("  RGB: {}, {}, {}", dominant.rgb.r, dominant.rgb.g, dominant.rgb.b);
    eprintln!("  HSL: {}°, {}%, {}%", h, s, l);
    eprintln!(
        "  CMYK: {}%, {}%, {}%, {}%",
        dominant.cmyk.c, dominant.cmyk.m, dominant.cmyk.y, dominant.cmyk.k
    );
    eprintln!(
        "  Lab Values: L*={:.1}, a*={:.1}, b*={:.1}",
        dominant.lab.l, dominant.lab.a, dominant.lab.b
    );
    eprintln!("  Coverage: {:.1}% ({})", dominant.percentage, colors.strategy);
    if let Some(step) = colors.quantization_step {
        eprintln!("  Histogram step: {}", step);
    }

    if !matches.is_empty() {
        eprintln!();
        eprintln!("Matches:");
        for hit in matches {
            eprintln!(
                "  {:<16} ΔE {:>6.2}  {:>5.1}%",
                hit.record.lot_no, hit.similarity, hit.match_percent
            );
        }
    }
}
