//! `nvtable run` / `nvtable validate` — config-driven table merge.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use nvtable_recon::config::MergeConfig;
use nvtable_recon::engine::RunOptions;
use nvtable_recon::model::{MergeInput, MergeSummary, SourceInput};
use nvtable_recon::render::write_table;
use nvtable_recon::{Dialect, ReconError};

use crate::exit_codes::{recon_exit_code, EXIT_ERROR, EXIT_MERGE_IO};
use crate::CliError;

fn merge_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn engine_err(err: ReconError) -> CliError {
    let hint = match &err {
        ReconError::StructuralParse { .. } => {
            Some("every line between the block marker and {0,0,0} must be {id,name,desc}".to_string())
        }
        _ => None,
    };
    CliError { code: recon_exit_code(&err), message: err.to_string(), hint }
}

/// Read and validate the config. Returns it with the directory that
/// relative source paths resolve against.
fn load_config(config_path: &Path) -> Result<(MergeConfig, PathBuf), CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        merge_err(EXIT_MERGE_IO, format!("cannot read config {}: {e}", config_path.display()))
    })?;
    let config = MergeConfig::from_toml(&config_str).map_err(engine_err)?;
    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    Ok((config, base_dir))
}

fn read_source(base_dir: &Path, file: &str, dialect: Dialect) -> Result<SourceInput, CliError> {
    let path = base_dir.join(file);
    let bytes = std::fs::read(&path)
        .map_err(|e| merge_err(EXIT_MERGE_IO, format!("cannot read {}: {e}", path.display())))?;
    log::debug!("read {} ({} bytes, {dialect})", path.display(), bytes.len());
    Ok(SourceInput {
        label: file.to_string(),
        dialect,
        bytes,
    })
}

fn load_input(config: &MergeConfig, base_dir: &Path) -> Result<MergeInput, CliError> {
    let canonical = read_source(base_dir, &config.canonical.file, Dialect::Canonical)?;
    let vendors = config
        .sources()
        .iter()
        .map(|source| read_source(base_dir, source.file, source.dialect))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MergeInput { canonical, vendors })
}

pub fn cmd_run(
    config_path: PathBuf,
    output: Option<PathBuf>,
    json_output: bool,
    dump_stages: bool,
) -> Result<(), CliError> {
    let (config, base_dir) = load_config(&config_path)?;
    let input = load_input(&config, &base_dir)?;

    let options = RunOptions {
        marker: config.canonical.marker.clone(),
        capture_stages: dump_stages,
    };
    let result = nvtable_recon::run(&input, &options).map_err(engine_err)?;

    if dump_stages {
        for snapshot in &result.stages {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| merge_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
            eprintln!("{line}");
        }
    }

    // --output beats [output].file; the latter is relative to the config
    let out_path = output.or_else(|| config.output.file.as_ref().map(|f| base_dir.join(f)));

    match out_path {
        Some(ref path) => {
            let file = File::create(path).map_err(|e| {
                merge_err(EXIT_MERGE_IO, format!("cannot write {}: {e}", path.display()))
            })?;
            let mut writer = BufWriter::new(file);
            write_table(&result.table, &mut writer)
                .and_then(|_| writer.flush())
                .map_err(|e| merge_err(EXIT_MERGE_IO, format!("cannot write {}: {e}", path.display())))?;
            eprintln!("wrote {}", path.display());
        }
        None if !json_output => {
            let mut stdout = io::stdout().lock();
            write_table(&result.table, &mut stdout)
                .and_then(|_| stdout.flush())
                .map_err(|e| merge_err(EXIT_MERGE_IO, format!("cannot write to stdout: {e}")))?;
        }
        None => {}
    }

    if json_output {
        let json_str = serde_json::to_string_pretty(&result.summary)
            .map_err(|e| merge_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    eprintln!("{}", summary_line(&config.name, &result.summary));
    Ok(())
}

/// One-line human summary for stderr.
fn summary_line(name: &str, summary: &MergeSummary) -> String {
    let adopted: usize = summary.vendors.iter().map(|v| v.adopted).sum();
    let lossy = summary
        .vendors
        .iter()
        .chain(std::iter::once(&summary.canonical))
        .filter(|s| s.lossy_decode)
        .count();

    let mut line = format!(
        "{name}: {} identifiers ({} canonical, {adopted} adopted from {} vendor source(s))",
        summary.total_groups,
        summary.canonical.groups,
        summary.vendors.len(),
    );
    if lossy > 0 {
        line.push_str(&format!(", {lossy} source(s) had invalid UTF-8"));
    }
    line
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let (config, base_dir) = load_config(&config_path)?;

    let mut missing = Vec::new();
    let canonical = base_dir.join(&config.canonical.file);
    if !canonical.is_file() {
        missing.push(canonical.display().to_string());
    }

    let sources = config.sources();
    for source in &sources {
        let path = base_dir.join(source.file);
        if !path.is_file() {
            missing.push(path.display().to_string());
        }
    }

    if !missing.is_empty() {
        return Err(CliError {
            code: EXIT_MERGE_IO,
            message: format!("{} source file(s) not found: {}", missing.len(), missing.join(", ")),
            hint: Some("source paths are resolved relative to the config file".into()),
        });
    }

    eprintln!(
        "config ok: {} (canonical + {} vendor source(s) in {} tier(s))",
        config.name,
        sources.len(),
        config.tiers.len()
    );
    eprintln!("  canonical  {}", canonical.display());
    for source in &sources {
        eprintln!(
            "  tier {}     {:<9} {}",
            source.tier + 1,
            source.dialect.to_string(),
            base_dir.join(source.file).display()
        );
    }
    Ok(())
}
