//! CLI argument definitions for the phenome binarizer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use pheno_binarize::Strategy;
use pheno_model::FieldType;

#[derive(Parser)]
#[command(
    name = "pheno-binarizer",
    version,
    about = "Binarize biobank phenotype fields and assemble the meta table",
    long_about = "Convert repeated-measurement phenotype values into binary indicator \
                  columns, one table per field, then assemble every field's table into \
                  one sample-aligned meta table with column provenance."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Binarize every shortlisted field of one phenotype type.
    Binarize(BinarizeArgs),

    /// Assemble stored binarized tables into the meta table.
    Meta(MetaArgs),
}

#[derive(Args)]
pub struct BinarizeArgs {
    /// Phenotypes-of-interest manifest CSV (Type, Phenotype_group,
    /// Phenotype_ID, not_ordinal, shortlist columns).
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// CSV mapping sample ids to their sequencing artifacts; defines the
    /// cohort of interest.
    #[arg(value_name = "COHORT_FILE")]
    pub cohort_file: PathBuf,

    /// Folder where raw field tables and encodings are stored.
    #[arg(value_name = "INFO_ROOT")]
    pub info_root: PathBuf,

    /// Folder where binarized tables will be stored.
    #[arg(value_name = "STORAGE_ROOT")]
    pub storage_root: PathBuf,

    /// Phenotype type to binarize
    /// (integer/continuous/categorical_single/categorical_multiple).
    #[arg(long = "pheno-type", value_name = "TYPE")]
    pub pheno_type: FieldType,

    /// Binarizing strategy for integer and continuous fields.
    #[arg(long, short, value_name = "STRATEGY")]
    pub strategy: Option<Strategy>,

    /// Lower quantile for the quantile strategy.
    #[arg(long = "quantile-low", default_value_t = 0.05)]
    pub quantile_low: f64,

    /// Upper quantile for the quantile strategy.
    #[arg(long = "quantile-high", default_value_t = 0.95)]
    pub quantile_high: f64,

    /// Worker threads (default: all cores).
    #[arg(long, short = 'n', value_name = "N")]
    pub threads: Option<usize>,

    /// Minimum cohort samples a field must have to participate.
    #[arg(long = "min-samples", default_value_t = 2000)]
    pub min_samples: u64,
}

#[derive(Args)]
pub struct MetaArgs {
    /// Phenotypes-of-interest manifest CSV.
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// CSV mapping sample ids to their sequencing artifacts.
    #[arg(value_name = "COHORT_FILE")]
    pub cohort_file: PathBuf,

    /// Folder where raw field tables and encodings are stored.
    #[arg(value_name = "INFO_ROOT")]
    pub info_root: PathBuf,

    /// Folder where binarized tables are stored and the meta table will
    /// be written.
    #[arg(value_name = "STORAGE_ROOT")]
    pub storage_root: PathBuf,

    /// Strategy whose numerical tables feed the meta table.
    #[arg(long, short, default_value = "quantile", value_name = "STRATEGY")]
    pub strategy: Strategy,

    /// Worker threads (default: all cores).
    #[arg(long, short = 'n', value_name = "N")]
    pub threads: Option<usize>,

    /// Minimum cohort samples a field must have to participate.
    #[arg(long = "min-samples", default_value_t = 2000)]
    pub min_samples: u64,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
