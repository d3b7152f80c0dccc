use super::inputs::{load_catalog, load_sequence, warn_on_uninformative_motifs};
use crate::cli::ValidateArgs;
use crate::utils::Result;
use itertools::Itertools;

pub fn validate(args: ValidateArgs) -> Result<()> {
    let sequence = load_sequence(&args.sequence_path, args.strict)?;
    let catalog = load_catalog(args.motifs_path.as_deref())?;

    log::info!(
        "Sequence - Length: {} bp, GC: {:.2}%, Unknown bases: {}",
        sequence.len(),
        sequence.gc_fraction() * 100.0,
        sequence.unknown_count()
    );

    let motif_lengths = catalog.iter().map(|m| m.len()).collect_vec();
    let length_stats = calculate_stats(&motif_lengths);
    log::info!(
        "Motif Lengths - Range: [{},{}], Median: {:.2}, Mean: {:.2}, StdDev: {:.2}",
        length_stats.min,
        length_stats.max,
        length_stats.median,
        length_stats.mean,
        length_stats.std_dev
    );
    for motif in catalog.iter() {
        log::debug!(
            "Motif {} - Length: {}, Wildcards: {}, Specificity: {:.3}",
            motif,
            motif.len(),
            motif.wildcard_count(),
            motif.specificity()
        );
    }

    match warn_on_uninformative_motifs(&sequence, &catalog) {
        0 => log::info!("Validation successful. Motifs pass={}", catalog.len()),
        flagged => log::info!(
            "Validation passed with {} warning(s). Motifs={}",
            flagged,
            catalog.len()
        ),
    }

    Ok(())
}

fn calculate_stats(data: &[usize]) -> Stats {
    let sorted = data.iter().copied().sorted_unstable().collect_vec();
    let len = sorted.len();
    if len == 0 {
        return Stats::default();
    }
    let median = if len % 2 == 0 {
        (sorted[len / 2 - 1] + sorted[len / 2]) as f64 / 2.0
    } else {
        sorted[len / 2] as f64
    };
    let sum: usize = sorted.iter().sum();
    let mean = sum as f64 / len as f64;
    let std_dev = (sorted
        .iter()
        .map(|&x| (x as f64 - mean).powi(2))
        .sum::<f64>()
        / len as f64)
        .sqrt();
    Stats {
        min: *sorted.first().unwrap_or(&0),
        max: *sorted.last().unwrap_or(&0),
        mean,
        median,
        std_dev,
    }
}

#[derive(Debug, Default, PartialEq)]
struct Stats {
    min: usize,
    max: usize,
    mean: f64,
    median: f64,
    std_dev: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_odd_length_data() {
        let stats = calculate_stats(&[6, 9, 6]);
        assert_eq!(stats.min, 6);
        assert_eq!(stats.max, 9);
        assert_eq!(stats.median, 6.0);
        assert_eq!(stats.mean, 7.0);
        assert!((stats.std_dev - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn stats_of_even_length_data() {
        let stats = calculate_stats(&[8, 6, 9, 7]);
        assert_eq!(stats.median, 7.5);
        assert_eq!(stats.mean, 7.5);
    }

    #[test]
    fn stats_of_empty_data() {
        assert_eq!(calculate_stats(&[]), Stats::default());
    }
}
