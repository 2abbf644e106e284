// src/main.rs

//! The entry point for the `treedoc` binary: loads a JSON document into the
//! tree-backed model and prints it back as indented JSON.

use anyhow::{Context, Result};
use std::env;
use std::fs;
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;
use treedoc::config::Config;
use treedoc::core::codec::{self, PrettyPrinter};
use treedoc::{DocError, Value};

fn main() -> Result<()> {
    run_app()
}

fn run_app() -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let args: Vec<String> = env::args().collect();

    if args.contains(&"--version".to_string()) {
        println!("treedoc version {VERSION}");
        return Ok(());
    }

    // Load the configuration if a --config flag was given; defaults otherwise.
    let config_path = flag_value(&args, "--config");
    let mut config = match config_path {
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load configuration from \"{path}\": {e:#}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    // Override the indentation width if provided on the command line.
    if let Some(indent_str) = flag_value(&args, "--indent") {
        match indent_str.parse::<usize>() {
            Ok(indent) => config.indent_width = indent,
            Err(_) => {
                eprintln!("Invalid indentation width: {indent_str}");
                std::process::exit(1);
            }
        }
        config.validate()?;
    }

    let Some(input_path) = positional(&args) else {
        eprintln!("Usage: treedoc [--config path] [--indent n] <file.json>");
        std::process::exit(1);
    };

    // Logs go to stderr so they never interleave with the document on stdout.
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .compact()
        .with_ansi(true)
        .init();

    let text = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read JSON document at '{input_path}'"))?;
    let mut document = codec::parse_value(&text)
        .with_context(|| format!("Failed to parse JSON document from '{input_path}'"))?;
    info!(path = input_path, kind = %document.kind(), "document loaded");

    if config.sort_arrays {
        let skipped = sort_arrays(&mut document);
        debug!(skipped, "sorted homogeneous arrays");
    }

    let printer = PrettyPrinter::new(config.indent_width);
    println!("{}", printer.value_to_string(&document)?);
    Ok(())
}

/// Sorts every array in the document, innermost first. Returns how many
/// arrays were left alone because they mix variants.
fn sort_arrays(value: &mut Value) -> usize {
    match value {
        Value::Array(array) => {
            let mut skipped: usize = array.iter_mut().map(sort_arrays).sum();
            if let Err(DocError::Unsupported) = array.sort() {
                debug!(len = array.len(), "array mixes variants; left unsorted");
                skipped += 1;
            }
            skipped
        }
        Value::Object(object) => object.values_mut().map(sort_arrays).sum(),
        _ => 0,
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

/// The first argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "--indent" => {
                iter.next();
            }
            other if other.starts_with("--") => {}
            other => return Some(other),
        }
    }
    None
}
