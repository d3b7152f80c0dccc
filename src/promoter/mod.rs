mod catalog;
mod locate;
mod motif;
pub mod report;
mod score;
mod sequence;

pub use catalog::MotifCatalog;
pub use locate::{locate, locate_par, locate_pattern, Match};
pub use motif::{ConfigurationError, MotifPattern, PatternSymbol};
pub use score::{rank, PositionalTerm, RankedResult, Scorer, TssProximity, MAX_BASE_SCORE};
pub use sequence::{validate, validate_with, Sequence, ValidationError, UNKNOWN_BASE};

use crate::utils::Result;
use std::num::NonZeroUsize;

/// Locates, scores and ranks every catalog motif in `sequence`.
pub fn scan(
    sequence: &Sequence,
    catalog: &MotifCatalog,
    scorer: &Scorer,
    top_n: NonZeroUsize,
) -> Result<RankedResult> {
    let matches = locate(sequence, catalog);
    let matches = scorer.score_matches(catalog, matches)?;
    Ok(rank(matches, top_n))
}
