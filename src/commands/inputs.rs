use crate::promoter::{validate_with, MotifCatalog, Sequence};
use crate::utils::{open_catalog_reader, read_sequence, Result};
use std::path::Path;

pub fn load_sequence(path: &Path, strict: bool) -> Result<Sequence> {
    let raw = read_sequence(path)?;
    let sequence =
        validate_with(&raw, !strict).map_err(|e| format!("{}: {}", path.display(), e))?;
    log::info!(
        "Loaded sequence of {} bp from {}",
        sequence.len(),
        path.display()
    );
    Ok(sequence)
}

pub fn load_catalog(path: Option<&Path>) -> Result<MotifCatalog> {
    let catalog = match path {
        Some(path) => {
            let reader = open_catalog_reader(path)?;
            MotifCatalog::from_reader(reader).map_err(|e| format!("{}: {}", path.display(), e))?
        }
        None => {
            log::info!("No motif catalog given, using built-in promoter motifs");
            MotifCatalog::builtin()?
        }
    };
    if catalog.is_empty() {
        return Err("Motif catalog contains no motifs".to_string());
    }
    log::info!("Loaded {} motifs", catalog.len());
    Ok(catalog)
}

/// Logs motifs that cannot match or cannot discriminate; returns how many were flagged.
pub fn warn_on_uninformative_motifs(sequence: &Sequence, catalog: &MotifCatalog) -> usize {
    let mut flagged = 0;
    for motif in catalog.iter() {
        if motif.is_all_wildcard() {
            log::warn!(
                "Motif {} is all wildcards and will match every position with score 0",
                motif
            );
            flagged += 1;
        }
        if motif.len() > sequence.len() {
            log::warn!(
                "Motif {} ({} bp) is longer than the sequence ({} bp)",
                motif.name(),
                motif.len(),
                sequence.len()
            );
            flagged += 1;
        }
    }
    flagged
}
