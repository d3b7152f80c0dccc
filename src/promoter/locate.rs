use super::{catalog::MotifCatalog, motif::MotifPattern, sequence::Sequence};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// One occurrence of a motif in the sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub pattern_name: String,
    pub start: usize,
    pub matched: String,
    pub score: f64,
}

impl Match {
    fn unscored(pattern_name: &str, start: usize, window: &[u8]) -> Self {
        Match {
            pattern_name: pattern_name.to_string(),
            start,
            matched: String::from_utf8_lossy(window).into_owned(),
            score: 0.0,
        }
    }

    /// End coordinate (exclusive).
    pub fn end(&self) -> usize {
        self.start + self.matched.len()
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn with_score(self, score: f64) -> Self {
        Match { score, ..self }
    }
}

/// Slides the pattern across every start position, overlaps included.
pub fn locate_pattern(sequence: &Sequence, pattern: &MotifPattern) -> Vec<Match> {
    let bases = sequence.as_bytes();
    if pattern.is_empty() || pattern.len() > bases.len() {
        return Vec::new();
    }
    bases
        .windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| pattern.matches(window))
        .map(|(start, window)| Match::unscored(pattern.name(), start, window))
        .collect()
}

/// Finds all occurrences of every catalog motif, ordered by start then motif name.
pub fn locate(sequence: &Sequence, catalog: &MotifCatalog) -> Vec<Match> {
    let mut matches: Vec<Match> = catalog
        .iter()
        .flat_map(|pattern| locate_pattern(sequence, pattern))
        .collect();
    sort_by_position(&mut matches);
    matches
}

/// Same as [`locate`], scanning motifs on the current rayon pool.
pub fn locate_par(sequence: &Sequence, catalog: &MotifCatalog) -> Vec<Match> {
    let patterns: Vec<&MotifPattern> = catalog.iter().collect();
    let mut matches: Vec<Match> = patterns
        .into_par_iter()
        .flat_map_iter(|pattern| locate_pattern(sequence, pattern))
        .collect();
    sort_by_position(&mut matches);
    matches
}

fn sort_by_position(matches: &mut [Match]) {
    matches.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.pattern_name.cmp(&b.pattern_name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promoter::sequence::validate;
    use itertools::Itertools;

    fn summarize(matches: &[Match]) -> Vec<(&str, usize, &str)> {
        matches
            .iter()
            .map(|m| (m.pattern_name.as_str(), m.start, m.matched.as_str()))
            .collect_vec()
    }

    #[test]
    fn locate_single_exact_motif() {
        let seq = validate("TTGACATATAAT").unwrap();
        let catalog = MotifCatalog::from_pairs([("TATA_box", "TATAAT")]).unwrap();
        let matches = locate(&seq, &catalog);
        assert_eq!(summarize(&matches), vec![("TATA_box", 6, "TATAAT")]);
        assert_eq!(matches[0].end(), 12);
    }

    #[test]
    fn locate_all_wildcard_pattern_of_sequence_length() {
        let seq = validate("AAAA").unwrap();
        let catalog = MotifCatalog::from_pairs([("allWild", "NNNN")]).unwrap();
        assert_eq!(
            summarize(&locate(&seq, &catalog)),
            vec![("allWild", 0, "AAAA")]
        );
    }

    #[test]
    fn locate_pattern_longer_than_sequence_is_empty() {
        let seq = validate("GGGG").unwrap();
        let catalog = MotifCatalog::from_pairs([("TATA_box", "TATAAT")]).unwrap();
        assert!(locate(&seq, &catalog).is_empty());
    }

    #[test]
    fn locate_reports_overlapping_matches() {
        let seq = validate("ATATAT").unwrap();
        let catalog = MotifCatalog::from_pairs([("AT", "AT")]).unwrap();
        let starts = locate(&seq, &catalog).iter().map(|m| m.start).collect_vec();
        assert_eq!(starts, vec![0, 2, 4]);

        let seq = validate("AAAAA").unwrap();
        let catalog = MotifCatalog::from_pairs([("AAA", "AAA")]).unwrap();
        let starts = locate(&seq, &catalog).iter().map(|m| m.start).collect_vec();
        assert_eq!(starts, vec![0, 1, 2]);
    }

    #[test]
    fn locate_orders_by_start_then_name() {
        let seq = validate("TATAAT").unwrap();
        let catalog =
            MotifCatalog::from_pairs([("zeta", "TA"), ("alpha", "TAT"), ("mid", "AT")]).unwrap();
        assert_eq!(
            summarize(&locate(&seq, &catalog)),
            vec![
                ("alpha", 0, "TAT"),
                ("zeta", 0, "TA"),
                ("mid", 1, "AT"),
                ("zeta", 2, "TA"),
                ("mid", 4, "AT"),
            ]
        );
    }

    #[test]
    fn locate_degenerate_positions() {
        let seq = validate("TATAAATATATATAGA").unwrap();
        let catalog = MotifCatalog::from_pairs([("TATA_box", "TATAWAWR")]).unwrap();
        assert_eq!(
            summarize(&locate(&seq, &catalog)),
            vec![
                ("TATA_box", 0, "TATAAATA"),
                ("TATA_box", 6, "TATATATA"),
            ]
        );
    }

    #[test]
    fn unknown_bases_only_match_wildcards() {
        let seq = validate("TANAAT").unwrap();
        let catalog = MotifCatalog::from_pairs([("exact", "TATAAT"), ("wild", "TANAAT")]).unwrap();
        assert_eq!(
            summarize(&locate(&seq, &catalog)),
            vec![("wild", 0, "TANAAT")]
        );
    }

    #[test]
    fn matches_satisfy_their_patterns() {
        let seq = validate("GGTTGACATTTTTTTTTTTTTTTTTTATAATGCGCCAATCTAGGGCGG").unwrap();
        let catalog = MotifCatalog::builtin().unwrap();
        let matches = locate(&seq, &catalog);
        assert!(!matches.is_empty());
        for m in &matches {
            let pattern = catalog.get(&m.pattern_name).unwrap();
            assert!(m.start + pattern.len() <= seq.len());
            assert_eq!(&seq.as_str()[m.start..m.end()], m.matched);
            assert!(pattern.matches(m.matched.as_bytes()));
        }
    }

    #[test]
    fn parallel_scan_matches_sequential_scan() {
        let seq = validate("TTGACAATATAATTATAAATAGGGCGGTATAAT").unwrap();
        let catalog = MotifCatalog::builtin().unwrap();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(3)
            .build()
            .unwrap();
        let parallel = pool.install(|| locate_par(&seq, &catalog));
        assert_eq!(parallel, locate(&seq, &catalog));
    }
}
