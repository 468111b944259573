//! CLI tool for windowgrid - lays out a grid document and outputs JSON
//!
//! Usage:
//!   windowgrid_cli <grid.json>                   # Output JSON to stdout
//!   windowgrid_cli <grid.json> -o out.json       # Output JSON to file
//!   windowgrid_cli <grid.json> --scroll 120,40   # Render with the body scrolled
//!
//! Logging is controlled by `RUST_LOG` (e.g. `RUST_LOG=windowgrid=debug`).

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};

use tracing_subscriber::EnvFilter;
use windowgrid::{document_font, layout_document, GridDocument, ScrollOffset};

const USAGE: &str = "Usage: windowgrid_cli <grid.json> [-o output.json] [--scroll X,Y]";

fn parse_scroll(value: &str) -> Option<ScrollOffset> {
    let (left, top) = value.split_once(',')?;
    Some(ScrollOffset::new(
        left.trim().parse().ok()?,
        top.trim().parse().ok()?,
    ))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path = None;
    let mut scroll = ScrollOffset::ORIGIN;
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match (arg.as_str(), rest.next()) {
            ("-o", Some(path)) => output_path = Some(path.clone()),
            ("--scroll", Some(value)) => match parse_scroll(value) {
                Some(offset) => scroll = offset,
                None => {
                    eprintln!("Invalid --scroll value {value:?}, expected X,Y");
                    std::process::exit(1);
                }
            },
            _ => {
                eprintln!("{USAGE}");
                std::process::exit(1);
            }
        }
    }

    // Read and validate the document
    let file = match File::open(input_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };
    let doc = match GridDocument::from_reader(BufReader::new(file)) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error loading grid: {}", e);
            std::process::exit(1);
        }
    };

    let output = match document_font(&doc).and_then(|font| layout_document(doc, font, scroll)) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error computing layout: {}", e);
            std::process::exit(1);
        }
    };

    let json = match serde_json::to_string_pretty(&output) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            if let Err(e) = writeln!(io::stdout(), "{}", json) {
                eprintln!("Error writing stdout: {}", e);
                std::process::exit(1);
            }
        }
    }
}
