//! The `binarize` and `meta` subcommands.
//!
//! Both fan out one worker per field with no shared mutable state and
//! collect results in manifest order, never completion order; the meta
//! assembler's column and provenance ordering depends on it.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tracing::{info, info_span, warn};

use pheno_binarize::{
    EncodingSet, FieldKind, NumericalOptions, QuantileBounds, binarize_field, binarized_columns,
    restrict_to_cohort,
};
use pheno_ingest::{
    CohortIndex, ManifestOptions, binarized_table_path, encoding_path, field_table_path,
    meta_columns_path, meta_table_path, modified_encoding_path, read_cohort_index,
    read_encoding_file, read_manifest, read_table, write_table,
};
use pheno_meta::{PreparedField, RenameStrategy, assemble_meta, prepare_field_table};
use pheno_model::{Diagnostic, FieldId, FieldRecord, FieldType};

use crate::cli::{BinarizeArgs, MetaArgs};

/// Per-field outcome reported in the run summary.
#[derive(Debug, Clone)]
pub struct FieldSummary {
    pub field_id: FieldId,
    pub field_type: FieldType,
    pub group: String,
    pub rows: usize,
    pub indicators: usize,
    pub advisories: usize,
    pub included: bool,
}

/// Result of one `binarize` or `meta` run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub fields: Vec<FieldSummary>,
    /// Path of the written meta table, for `meta` runs.
    pub output: Option<PathBuf>,
}

fn build_pool(threads: Option<usize>) -> Result<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = threads {
        builder = builder.num_threads(threads);
    }
    builder.build().context("build worker pool")
}

fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        warn!(
            field_id = diagnostic.field_id,
            kind = %diagnostic.kind,
            "{}",
            diagnostic.detail
        );
    }
}

fn advisory_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_advisory()).count()
}

// ============================================================================
// binarize
// ============================================================================

pub fn run_binarize(args: &BinarizeArgs) -> Result<RunSummary> {
    let bounds = QuantileBounds::new(args.quantile_low, args.quantile_high)?;
    let numerical = args
        .strategy
        .map(|strategy| NumericalOptions::new(strategy).with_bounds(bounds));
    if args.pheno_type.is_numerical() && numerical.is_none() {
        bail!("--strategy is required for {} fields", args.pheno_type);
    }

    let records = read_manifest(
        &args.manifest,
        ManifestOptions {
            min_samples: args.min_samples,
        },
    )
    .context("read phenotypes-of-interest manifest")?;
    let records: Vec<FieldRecord> = records
        .into_iter()
        .filter(|record| record.field_type == args.pheno_type)
        .collect();
    let cohort = read_cohort_index(&args.cohort_file).context("read cohort file")?;
    info!(
        fields = records.len(),
        cohort = cohort.len(),
        pheno_type = %args.pheno_type,
        "binarize run starting"
    );

    let pool = build_pool(args.threads)?;
    let results: Vec<Result<FieldSummary>> = pool.install(|| {
        records
            .par_iter()
            .map(|record| binarize_one(record, args, &cohort, numerical))
            .collect()
    });

    let mut fields = Vec::with_capacity(results.len());
    for result in results {
        fields.push(result?);
    }
    info!(fields = fields.len(), "binarize run complete");
    Ok(RunSummary {
        fields,
        output: None,
    })
}

fn binarize_one(
    record: &FieldRecord,
    args: &BinarizeArgs,
    cohort: &CohortIndex,
    numerical: Option<NumericalOptions>,
) -> Result<FieldSummary> {
    let span = info_span!(
        "binarize_field",
        field_id = record.field_id,
        group = %record.group
    );
    let _guard = span.enter();

    let table_path = field_table_path(
        &args.info_root,
        record.field_type,
        &record.group,
        record.field_id,
    );
    let raw = read_table(&table_path)
        .with_context(|| format!("read {}", table_path.display()))?;

    let kind = FieldKind::classify(record.field_type, record.ordinality);
    let encodings = load_binarize_encodings(kind, record, args)?;
    let outcome = binarize_field(&raw, record.field_id, kind, &encodings, numerical)?;
    log_diagnostics(&outcome.diagnostics);
    let included = outcome.is_meta_eligible();
    let advisories = advisory_count(&outcome.diagnostics);

    // The table is stored even when binarization was skipped; the meta
    // stage excludes under-binarized tables on its own.
    let mut restricted = restrict_to_cohort(&outcome.data, cohort.id_set())?;
    let strategy_suffix = if record.field_type.is_numerical() {
        numerical.map(|options| options.strategy.as_str())
    } else {
        None
    };
    let out_path = binarized_table_path(
        &args.storage_root,
        record.field_type,
        &record.group,
        record.field_id,
        strategy_suffix,
    );
    write_table(&mut restricted, &out_path)
        .with_context(|| format!("write {}", out_path.display()))?;

    Ok(FieldSummary {
        field_id: record.field_id,
        field_type: record.field_type,
        group: record.group.clone(),
        rows: restricted.height(),
        indicators: binarized_columns(&restricted).len(),
        advisories,
        included,
    })
}

fn load_binarize_encodings(
    kind: FieldKind,
    record: &FieldRecord,
    args: &BinarizeArgs,
) -> Result<EncodingSet> {
    match kind {
        FieldKind::Numerical => Ok(EncodingSet::none()),
        FieldKind::SingleMixed => {
            let ohe_path = modified_encoding_path(&args.storage_root, "ohe");
            let ordinal_path = modified_encoding_path(&args.storage_root, "ordinal");
            let ohe = read_encoding_file(&ohe_path)
                .with_context(|| format!("read {}", ohe_path.display()))?;
            let ordinal = read_encoding_file(&ordinal_path)
                .with_context(|| format!("read {}", ordinal_path.display()))?;
            Ok(EncodingSet::mixed(
                ohe.encoding_for(record.field_id),
                ordinal.encoding_for(record.field_id),
            ))
        }
        _ => {
            let path = encoding_path(&args.info_root, record.field_type, &record.group);
            let file =
                read_encoding_file(&path).with_context(|| format!("read {}", path.display()))?;
            Ok(match file.encoding_for(record.field_id) {
                Some(encoding) => EncodingSet::primary(encoding),
                None => EncodingSet::none(),
            })
        }
    }
}

// ============================================================================
// meta
// ============================================================================

pub fn run_meta(args: &MetaArgs) -> Result<RunSummary> {
    let records = read_manifest(
        &args.manifest,
        ManifestOptions {
            min_samples: args.min_samples,
        },
    )
    .context("read phenotypes-of-interest manifest")?;
    let cohort = read_cohort_index(&args.cohort_file).context("read cohort file")?;
    info!(
        fields = records.len(),
        cohort = cohort.len(),
        "meta run starting"
    );

    let pool = build_pool(args.threads)?;
    let results: Vec<Result<(FieldSummary, Option<PreparedField>)>> = pool.install(|| {
        records
            .par_iter()
            .map(|record| prepare_one(record, args, &cohort))
            .collect()
    });

    let mut fields = Vec::with_capacity(results.len());
    let mut prepared = Vec::new();
    for result in results {
        let (summary, field) = result?;
        if let Some(field) = field {
            prepared.push(field);
        }
        fields.push(summary);
    }

    let assembly = assemble_meta(&prepared, cohort.ids())?;
    let table_path = meta_table_path(&args.storage_root);
    let columns_path = meta_columns_path(&args.storage_root);
    let mut table = assembly.table;
    write_table(&mut table, &table_path)
        .with_context(|| format!("write {}", table_path.display()))?;
    let mut provenance = assembly.provenance.to_frame()?;
    write_table(&mut provenance, &columns_path)
        .with_context(|| format!("write {}", columns_path.display()))?;
    info!(
        rows = table.height(),
        columns = table.width(),
        fields = prepared.len(),
        "meta table written"
    );

    Ok(RunSummary {
        fields,
        output: Some(table_path),
    })
}

fn prepare_one(
    record: &FieldRecord,
    args: &MetaArgs,
    cohort: &CohortIndex,
) -> Result<(FieldSummary, Option<PreparedField>)> {
    let span = info_span!(
        "prepare_field",
        field_id = record.field_id,
        group = %record.group
    );
    let _guard = span.enter();

    let strategy_suffix = if record.field_type.is_numerical() {
        Some(args.strategy.as_str())
    } else {
        None
    };
    let path = binarized_table_path(
        &args.storage_root,
        record.field_type,
        &record.group,
        record.field_id,
        strategy_suffix,
    );
    let df = read_table(&path).with_context(|| format!("read {}", path.display()))?;
    let encodings = load_meta_encodings(record, args)?;

    let outcome = prepare_field_table(&df, record, &encodings, cohort.ids())?;
    log_diagnostics(&outcome.diagnostics);
    let advisories = advisory_count(&outcome.diagnostics);
    let included = outcome.prepared.is_some();
    let indicators = outcome
        .prepared
        .as_ref()
        .map(|field| field.pairs.len())
        .unwrap_or(0);

    Ok((
        FieldSummary {
            field_id: record.field_id,
            field_type: record.field_type,
            group: record.group.clone(),
            rows: df.height(),
            indicators,
            advisories,
            included,
        },
        outcome.prepared,
    ))
}

fn load_meta_encodings(record: &FieldRecord, args: &MetaArgs) -> Result<EncodingSet> {
    match RenameStrategy::for_field(record.field_type, record.ordinality) {
        RenameStrategy::PlainSuffix => Ok(EncodingSet::none()),
        RenameStrategy::EncodingLookup => {
            let path = encoding_path(&args.info_root, record.field_type, &record.group);
            let file =
                read_encoding_file(&path).with_context(|| format!("read {}", path.display()))?;
            Ok(match file.encoding_for(record.field_id) {
                Some(encoding) => EncodingSet::primary(encoding),
                None => EncodingSet::none(),
            })
        }
        RenameStrategy::MixedSplit => {
            let path = modified_encoding_path(&args.storage_root, "ohe");
            let file =
                read_encoding_file(&path).with_context(|| format!("read {}", path.display()))?;
            Ok(EncodingSet::mixed(file.encoding_for(record.field_id), None))
        }
    }
}
