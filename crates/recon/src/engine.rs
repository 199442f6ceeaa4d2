use crate::dedup::dedup_aliases;
use crate::error::ReconError;
use crate::extract::{extract, Dialect, DEFAULT_MARKER};
use crate::group::group_records;
use crate::merge::merge_into;
use crate::model::{
    MergeInput, MergeResult, MergeSummary, SourceInput, SourceReport, Stage, StageSnapshot, Table,
};
use crate::source::decode_source;

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Line that opens the canonical declaration block.
    pub marker: String,
    /// Keep a copy of every intermediate table in the result.
    pub capture_stages: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            capture_stages: false,
        }
    }
}

/// Run the merge: seed from the canonical source, then fold in each vendor
/// source in order. The first structural error aborts the whole run.
pub fn run(input: &MergeInput, options: &RunOptions) -> Result<MergeResult, ReconError> {
    check_dialects(input)?;

    let mut stages = Vec::new();

    let (mut table, mut canonical) = build_source_table(&input.canonical, options, &mut stages)?;
    canonical.adopted = table.len();
    log::info!("{}: seeded {} identifiers", canonical.label, table.len());

    let mut vendors = Vec::with_capacity(input.vendors.len());
    for source in &input.vendors {
        let (incoming, mut report) = build_source_table(source, options, &mut stages)?;

        let outcome = merge_into(&mut table, incoming);
        report.adopted = outcome.adopted;
        report.discarded = outcome.discarded;
        log::info!(
            "{}: adopted {} identifiers, discarded {} already defined",
            report.label,
            outcome.adopted,
            outcome.discarded
        );

        if options.capture_stages {
            stages.push(StageSnapshot {
                label: source.label.clone(),
                stage: Stage::Merged,
                table: table.clone(),
            });
        }
        vendors.push(report);
    }

    let summary = MergeSummary {
        canonical,
        vendors,
        total_groups: table.len(),
    };

    Ok(MergeResult {
        table,
        summary,
        stages,
    })
}

fn check_dialects(input: &MergeInput) -> Result<(), ReconError> {
    if input.canonical.dialect != Dialect::Canonical {
        return Err(ReconError::ConfigValidation(format!(
            "source '{}' is the canonical source but is tagged {}",
            input.canonical.label, input.canonical.dialect
        )));
    }
    if let Some(source) = input.vendors.iter().find(|s| !s.dialect.is_vendor()) {
        return Err(ReconError::ConfigValidation(format!(
            "vendor source '{}' cannot use the canonical dialect",
            source.label
        )));
    }
    Ok(())
}

/// Extract → group → dedup for one source.
fn build_source_table(
    source: &SourceInput,
    options: &RunOptions,
    stages: &mut Vec<StageSnapshot>,
) -> Result<(Table, SourceReport), ReconError> {
    let decoded = decode_source(&source.bytes);
    if decoded.had_errors {
        log::warn!("{}: invalid UTF-8 replaced with U+FFFD", source.label);
    }

    let records = extract(source.dialect, &source.label, &decoded.text, &options.marker);
    let mut table = group_records(records)?;
    log::debug!(
        "{}: {} records in {} groups ({})",
        source.label,
        table.slot_count(),
        table.len(),
        source.dialect
    );

    if options.capture_stages {
        stages.push(StageSnapshot {
            label: source.label.clone(),
            stage: Stage::Grouped,
            table: table.clone(),
        });
    }

    let records = table.slot_count();
    let suppressed = dedup_aliases(&mut table);

    if options.capture_stages {
        stages.push(StageSnapshot {
            label: source.label.clone(),
            stage: Stage::Deduplicated,
            table: table.clone(),
        });
    }

    let report = SourceReport {
        label: source.label.clone(),
        dialect: source.dialect,
        records,
        groups: table.len(),
        suppressed,
        adopted: 0,
        discarded: 0,
        lossy_decode: decoded.had_errors,
    };
    Ok((table, report))
}
