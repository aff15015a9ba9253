use pagecast::{GenerateError, Manifest};
use std::env;

/// A simple CLI to generate a PDF from a JSON page manifest.
fn main() -> Result<(), GenerateError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Render a JSON page manifest into a PDF document.");
        eprintln!();
        eprintln!(
            "Usage: {} <path/to/manifest.json> <path/to/output.pdf>",
            program_name(&args)
        );
        eprintln!();
        eprintln!("Set RUST_LOG=debug to trace page rendering.");
        std::process::exit(1);
    }

    let manifest_path = &args[1];
    let output_path = &args[2];

    log::info!("Loading manifest from {}", manifest_path);
    let manifest = Manifest::from_path(manifest_path)?;
    let (generator, pages) = manifest.into_document()?;

    log::info!("Generating {} page(s) to {}", pages.len(), output_path);
    generator.generate(pages, output_path)?;

    println!("Successfully generated {}", output_path);
    Ok(())
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("pagecast", String::as_str)
}
