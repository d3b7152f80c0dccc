use super::inputs::{load_catalog, load_sequence, warn_on_uninformative_motifs};
use crate::cli::ScanArgs;
use crate::promoter::{
    locate, locate_par, rank,
    report::{format_table, CsvWriter},
    MotifCatalog, RankedResult, Scorer, Sequence, TssProximity,
};
use crate::utils::{create_writer, open_file_writer, Result};
use rayon::ThreadPoolBuilder;
use std::{io::Write, num::NonZeroUsize, time};

#[derive(Debug, Clone)]
pub struct ScanParams {
    pub top_n: NonZeroUsize,
    pub tss: Option<TssProximity>,
    pub tss_weight: f64,
    pub num_threads: usize,
}

impl ScanParams {
    pub fn from_args(args: &ScanArgs) -> Result<Self> {
        let top_n = NonZeroUsize::new(args.top_n)
            .ok_or_else(|| "Number of reported matches must be at least 1".to_string())?;
        Ok(ScanParams {
            top_n,
            tss: args.tss.map(|tss| TssProximity::new(tss, args.tss_scale)),
            tss_weight: args.tss_weight,
            num_threads: args.num_threads,
        })
    }

    pub fn scorer(&self) -> Result<Scorer> {
        match self.tss {
            Some(term) => Scorer::new().with_positional(term, self.tss_weight),
            None => Ok(Scorer::new()),
        }
    }
}

pub fn scan(args: ScanArgs) -> Result<()> {
    let start_timer = time::Instant::now();

    let sequence = load_sequence(&args.sequence_path, args.strict)?;
    let catalog = load_catalog(args.motifs_path.as_deref())?;
    warn_on_uninformative_motifs(&sequence, &catalog);

    let params = ScanParams::from_args(&args)?;
    if let Some(term) = &params.tss {
        if term.tss >= sequence.len() {
            log::warn!(
                "TSS position {} lies beyond the sequence end ({} bp)",
                term.tss,
                sequence.len()
            );
        }
    }

    let ranked = run_scan(&sequence, &catalog, &params)?;

    let mut stdout = std::io::stdout().lock();
    if ranked.is_empty() {
        writeln!(stdout, "No motif matches found").map_err(|e| e.to_string())?;
    } else {
        writeln!(stdout, "{}", format_table(&ranked)).map_err(|e| e.to_string())?;
    }

    let output_prefix = args.output_prefix.clone().unwrap_or_else(default_output_prefix);
    create_writer(&output_prefix, "csv", |path| {
        let mut writer = CsvWriter::new(open_file_writer(path)?, &catalog)?;
        writer.write(&ranked)?;
        log::info!("Wrote {} matches to {}", ranked.len(), path);
        Ok(())
    })?;

    log::info!("Total execution time: {:.2?}", start_timer.elapsed());
    Ok(())
}

/// Locate, score and rank, scanning motifs in parallel when more than one thread is requested.
pub fn run_scan(
    sequence: &Sequence,
    catalog: &MotifCatalog,
    params: &ScanParams,
) -> Result<RankedResult> {
    let matches = if params.num_threads > 1 {
        let pool = initialize_thread_pool(params.num_threads)?;
        pool.install(|| locate_par(sequence, catalog))
    } else {
        locate(sequence, catalog)
    };
    log::info!("Located {} motif matches", matches.len());

    let matches = params.scorer()?.score_matches(catalog, matches)?;
    let ranked = rank(matches, params.top_n);
    log::debug!(
        "Reporting {} of at most {} requested matches",
        ranked.len(),
        params.top_n
    );
    Ok(ranked)
}

fn default_output_prefix() -> String {
    format!(
        "{}_{}",
        env!("CARGO_PKG_NAME"),
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    )
}

fn initialize_thread_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("promscan-{}", i))
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))
}
