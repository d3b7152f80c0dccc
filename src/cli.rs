use crate::utils::Result;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="promscan",
          version=&**FULL_VERSION,
          about="Locate and rank promoter motifs in a DNA sequence",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Scan a sequence for promoter motifs and report the best matches")]
    Scan(ScanArgs),
    #[clap(about = "Check a sequence and motif catalog without scanning")]
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("scan")))]
#[command(arg_required_else_help(true))]
pub struct ScanArgs {
    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "sequence")]
    #[clap(help = "Text or FASTA file with the DNA sequence (optionally gzipped)")]
    #[clap(value_name = "SEQUENCE")]
    #[arg(value_parser = check_file_exists)]
    pub sequence_path: PathBuf,

    #[clap(short = 'm')]
    #[clap(long = "motifs")]
    #[clap(help = "CSV motif catalog with Name and PromoterSeq columns [default: built-in catalog]")]
    #[clap(value_name = "MOTIFS")]
    #[arg(value_parser = check_file_exists)]
    pub motifs_path: Option<PathBuf>,

    #[clap(short = 'n')]
    #[clap(long = "top-n")]
    #[clap(help = "Number of top-scoring matches to report")]
    #[clap(value_name = "TOP_N")]
    #[clap(default_value = "3")]
    #[arg(value_parser = top_n_in_range)]
    pub top_n: usize,

    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for the CSV report [default: promscan_<timestamp>]")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: Option<String>,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(help_heading("Scoring"))]
    #[clap(long = "tss")]
    #[clap(value_name = "POS")]
    #[clap(help = "0-based transcription start site; matches near it score higher")]
    pub tss: Option<usize>,

    #[clap(help_heading("Scoring"))]
    #[clap(long = "tss-scale")]
    #[clap(value_name = "BP")]
    #[clap(help = "Distance from the TSS at which the proximity bonus halves")]
    #[clap(default_value = "50")]
    #[arg(value_parser = ensure_positive_float)]
    pub tss_scale: f64,

    #[clap(help_heading("Scoring"))]
    #[clap(long = "tss-weight")]
    #[clap(value_name = "WEIGHT")]
    #[clap(help = "Maximum relative score bonus for a match covering the TSS")]
    #[clap(default_value = "0.5")]
    #[arg(value_parser = ensure_non_negative_float)]
    pub tss_weight: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "strict")]
    #[clap(help = "Reject unknown bases (N) in the sequence")]
    pub strict: bool,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("validate")))]
#[command(arg_required_else_help(true))]
pub struct ValidateArgs {
    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "sequence")]
    #[clap(help = "Text or FASTA file with the DNA sequence (optionally gzipped)")]
    #[clap(value_name = "SEQUENCE")]
    #[arg(value_parser = check_file_exists)]
    pub sequence_path: PathBuf,

    #[clap(short = 'm')]
    #[clap(long = "motifs")]
    #[clap(help = "CSV motif catalog with Name and PromoterSeq columns [default: built-in catalog]")]
    #[clap(value_name = "MOTIFS")]
    #[arg(value_parser = check_file_exists)]
    pub motifs_path: Option<PathBuf>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "strict")]
    #[clap(help = "Reject unknown bases (N) in the sequence")]
    pub strict: bool,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn top_n_in_range(s: &str) -> Result<usize> {
    let top_n: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid result count", s))?;
    if top_n >= 1 {
        Ok(top_n)
    } else {
        Err("Number of reported matches must be at least 1".into())
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn parse_float(s: &str) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("Could not parse float: {}", e))?;
    if !value.is_finite() {
        return Err(format!("The value must be finite, got: {}", value));
    }
    Ok(value)
}

fn ensure_positive_float(s: &str) -> Result<f64> {
    let value = parse_float(s)?;
    if value <= 0.0 {
        Err(format!("The value must be greater than 0.0, got: {}", value))
    } else {
        Ok(value)
    }
}

fn ensure_non_negative_float(s: &str) -> Result<f64> {
    let value = parse_float(s)?;
    if value < 0.0 {
        Err(format!("Negative values are not allowed, got: {}", value))
    } else {
        Ok(value)
    }
}
