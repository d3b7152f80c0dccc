use super::{catalog::MotifCatalog, locate::Match, motif::MotifPattern};
use std::num::NonZeroUsize;

/// Score of a fully specific, fully satisfied motif before positional adjustment.
pub const MAX_BASE_SCORE: f64 = 100.0;

/// A position-dependent scoring term in [0, 1].
pub trait PositionalTerm: Send + Sync {
    fn weight(&self, start: usize, len: usize) -> f64;
}

/// Favors matches close to a transcription start site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TssProximity {
    pub tss: usize,
    pub scale: f64,
}

impl TssProximity {
    pub fn new(tss: usize, scale: f64) -> Self {
        TssProximity { tss, scale }
    }

    /// Distance from the TSS to the nearest base of `[start, start + len)`.
    fn distance(&self, start: usize, len: usize) -> usize {
        let last = start + len.saturating_sub(1);
        if self.tss < start {
            start - self.tss
        } else if self.tss > last {
            self.tss - last
        } else {
            0
        }
    }
}

impl PositionalTerm for TssProximity {
    fn weight(&self, start: usize, len: usize) -> f64 {
        let distance = self.distance(start, len) as f64;
        if self.scale <= 0.0 || !self.scale.is_finite() {
            return if distance == 0.0 { 1.0 } else { 0.0 };
        }
        self.scale / (self.scale + distance)
    }
}

#[derive(Default)]
pub struct Scorer {
    positional: Option<(Box<dyn PositionalTerm>, f64)>,
}

impl Scorer {
    pub fn new() -> Self {
        Scorer::default()
    }

    /// Adds a positional term; the final score is scaled by `1 + weight * term`.
    ///
    /// The weight must be finite and non-negative.
    pub fn with_positional<T: PositionalTerm + 'static>(
        mut self,
        term: T,
        weight: f64,
    ) -> Result<Self, String> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(format!(
                "Positional weight must be a finite non-negative number, got {}",
                weight
            ));
        }
        self.positional = Some((Box::new(term), weight));
        Ok(self)
    }

    /// Scores a match of `pattern`.
    ///
    /// The base score is `100 * specificity * satisfied`, where `satisfied` is the
    /// fraction of non-wildcard positions whose base the pattern accepts.
    pub fn score(&self, pattern: &MotifPattern, m: &Match) -> f64 {
        let base = MAX_BASE_SCORE * pattern.specificity() * satisfied_fraction(pattern, m);
        let adjustment = match &self.positional {
            Some((term, weight)) => {
                1.0 + weight * term.weight(m.start, pattern.len()).clamp(0.0, 1.0)
            }
            None => 1.0,
        };
        let score = base * adjustment;
        if score.is_finite() && score > 0.0 {
            score
        } else {
            0.0
        }
    }

    /// Returns the matches with their scores filled in.
    pub fn score_matches(
        &self,
        catalog: &MotifCatalog,
        matches: Vec<Match>,
    ) -> Result<Vec<Match>, String> {
        matches
            .into_iter()
            .map(|m| {
                let pattern = catalog
                    .get(&m.pattern_name)
                    .ok_or_else(|| format!("Match refers to unknown motif: {}", m.pattern_name))?;
                let score = self.score(pattern, &m);
                Ok(m.with_score(score))
            })
            .collect()
    }
}

fn satisfied_fraction(pattern: &MotifPattern, m: &Match) -> f64 {
    let constrained = pattern.len() - pattern.wildcard_count();
    if constrained == 0 {
        return 1.0;
    }
    let satisfied = pattern
        .symbols()
        .iter()
        .zip(m.matched.bytes())
        .filter(|(symbol, base)| !symbol.is_wildcard() && symbol.matches(*base))
        .count();
    satisfied as f64 / constrained as f64
}

/// Matches sorted by descending score, truncated to the requested count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResult {
    matches: Vec<Match>,
}

impl RankedResult {
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Match> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn into_inner(self) -> Vec<Match> {
        self.matches
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

/// Orders by score (high first), then start, then motif name.
pub fn rank(mut matches: Vec<Match>, top_n: NonZeroUsize) -> RankedResult {
    matches.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| a.pattern_name.cmp(&b.pattern_name))
    });
    matches.truncate(top_n.get());
    RankedResult { matches }
}
