//! Conversion jobs: output naming, source discovery, and batch execution

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use nyx_model::assets::materials::texture_stem;
use nyx_model::{encode, write_document, ConverterConfig, ModelAssembler};

/// One source file and where its document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// OBJ source
    pub input: PathBuf,
    /// Document destination
    pub output: PathBuf,
}

/// Replace every extension of `input`'s file name with `extension`
///
/// `models/ship.hull.obj` with `nmp` becomes `ship.nmp`. Only the file name
/// is returned; callers choose the directory.
pub fn output_file_name(input: &Path, extension: &str) -> PathBuf {
    let file_name = input.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    PathBuf::from(format!("{}.{extension}", texture_stem(&file_name)))
}

/// Whether `path` has the configured source extension
pub fn is_source(path: &Path, config: &ConverterConfig) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(&config.source_extension))
}

/// Job for a single file; without `output` the document lands in the
/// current directory
pub fn single_job(input: &Path, output: Option<&Path>, config: &ConverterConfig) -> Job {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output_file_name(input, &config.output_extension));
    Job { input: input.to_path_buf(), output }
}

/// Jobs for every source file under `root`, written flat into `output_dir`
pub fn discover_jobs(root: &Path, output_dir: &Path, config: &ConverterConfig) -> Vec<Job> {
    let mut jobs: Vec<Job> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_source(entry.path(), config))
        .map(|entry| Job {
            input: entry.path().to_path_buf(),
            output: output_dir.join(output_file_name(entry.path(), &config.output_extension)),
        })
        .collect();

    jobs.sort_by(|a, b| a.input.cmp(&b.input));
    jobs
}

/// Run one job: assemble, optionally dump, encode, write
pub fn run_job(job: &Job, config: &ConverterConfig, verbose: bool) -> Result<()> {
    let model = ModelAssembler::new(config)
        .assemble(&job.input)
        .with_context(|| format!("Failed to convert {}", job.input.display()))?;

    if verbose {
        println!("{}\n{model}\nOutputting: {}", job.input.display(), job.output.display());
    }

    let document = encode(&model);
    write_document(&document, &job.output, config.pretty)
        .with_context(|| format!("Failed to write {}", job.output.display()))?;
    Ok(())
}

/// Run independent jobs in parallel; returns the failures
///
/// Every job owns its own assembler and material table, so one bad file
/// never affects another.
pub fn run_all(jobs: &[Job], config: &ConverterConfig, verbose: bool) -> Vec<(PathBuf, anyhow::Error)> {
    jobs.par_iter()
        .filter_map(|job| match run_job(job, config, verbose) {
            Ok(()) => {
                log::info!("Converted model at {}", job.input.display());
                None
            }
            Err(e) => Some((job.input.clone(), e)),
        })
        .collect()
}
