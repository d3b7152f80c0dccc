use std::fmt;

/// Symbol used for an unknown base in the sequence.
pub const UNKNOWN_BASE: u8 = b'N';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty,
    InvalidBase { base: char, index: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "Sequence is empty"),
            ValidationError::InvalidBase { base, index } if base.is_whitespace() => write!(
                f,
                "Invalid sequence: unexpected whitespace {:?} at position {}",
                base, index
            ),
            ValidationError::InvalidBase { base, index } => write!(
                f,
                "Invalid sequence: character '{}' at position {} is not a nucleotide",
                base, index
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for String {
    fn from(err: ValidationError) -> Self {
        err.to_string()
    }
}

/// A validated, uppercase DNA sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    bases: Vec<u8>,
}

impl Sequence {
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII bases survive validation
        std::str::from_utf8(&self.bases).unwrap_or_default()
    }

    pub fn unknown_count(&self) -> usize {
        self.bases.iter().filter(|&&b| b == UNKNOWN_BASE).count()
    }

    /// Fraction of G and C among the known bases.
    pub fn gc_fraction(&self) -> f64 {
        let known = self.len() - self.unknown_count();
        if known == 0 {
            return 0.0;
        }
        let gc = self
            .bases
            .iter()
            .filter(|&&b| b == b'G' || b == b'C')
            .count();
        gc as f64 / known as f64
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates a sanitized sequence over {A, C, G, T, N}.
pub fn validate(raw: &str) -> Result<Sequence, ValidationError> {
    validate_with(raw, true)
}

/// Validates a sanitized sequence, optionally rejecting the unknown base `N`.
///
/// Lowercase input is normalized to uppercase. The first offending character
/// is reported together with its character index; nothing is dropped or replaced.
pub fn validate_with(raw: &str, allow_unknown: bool) -> Result<Sequence, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Empty);
    }

    let mut bases = Vec::with_capacity(raw.len());
    for (index, ch) in raw.chars().enumerate() {
        let base = ch.to_ascii_uppercase();
        match base {
            'A' | 'C' | 'G' | 'T' => bases.push(base as u8),
            'N' if allow_unknown => bases.push(UNKNOWN_BASE),
            _ => return Err(ValidationError::InvalidBase { base: ch, index }),
        }
    }

    Ok(Sequence { bases })
}
