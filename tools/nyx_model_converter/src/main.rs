//! Nyx Model Converter
//!
//! Converts Wavefront OBJ files (and their MTL libraries) into Nyx model
//! documents.
//!
//! Usage:
//!   nyx_model_converter [-v] [-c converter.toml] [-o out.nmp] model.obj
//!   nyx_model_converter -r -o converted/ assets/models/

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use nyx_model::foundation::logging::{self, LevelFilter};
use nyx_model::{Config, ConverterConfig};

mod batch;
use batch::{discover_jobs, run_all, single_job};

fn cli() -> Command {
    Command::new("nyx_model_converter")
        .about("Converts OBJ models into Nyx model documents")
        .arg(
            Arg::new("path")
                .value_name("PATH")
                .help("Model file, or directory when converting recursively")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Output file, or output directory when converting recursively"),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .action(ArgAction::SetTrue)
                .help("Convert every model found under PATH"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Print each converted model and enable debug logging"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Converter settings (.toml or .ron)"),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let verbose = matches.get_flag("verbose");
    logging::init(if verbose { LevelFilter::Debug } else { LevelFilter::Info });

    let config = match matches.get_one::<String>("config") {
        Some(path) => ConverterConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {path}"))?,
        None => ConverterConfig::default(),
    };

    let path = PathBuf::from(matches.get_one::<String>("path").context("PATH is required")?);
    let output = matches.get_one::<String>("output").map(PathBuf::from);

    let jobs = if matches.get_flag("recursive") {
        let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
        discover_jobs(&path, &output_dir, &config)
    } else {
        vec![single_job(&path, output.as_deref(), &config)]
    };

    if jobs.is_empty() {
        log::warn!("No .{} files found under {}", config.source_extension, path.display());
        return Ok(());
    }

    let failures = run_all(&jobs, &config, verbose);
    for (input, error) in &failures {
        log::error!("{}: {:#}", input.display(), error);
    }

    if !failures.is_empty() {
        bail!("{} of {} model(s) failed to convert", failures.len(), jobs.len());
    }
    Ok(())
}
