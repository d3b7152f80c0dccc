use std::fmt;

mod base_mask {
    pub const A: u8 = 0b0001;
    pub const C: u8 = 0b0010;
    pub const G: u8 = 0b0100;
    pub const T: u8 = 0b1000;
    pub const ANY: u8 = A | C | G | T;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    EmptyName,
    EmptyPattern { name: String },
    InvalidSymbol { name: String, symbol: char, index: usize },
    DuplicateName { name: String },
    MalformedRecord { line: usize, reason: String },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::EmptyName => write!(f, "Motif name cannot be empty"),
            ConfigurationError::EmptyPattern { name } => {
                write!(f, "Motif '{}' has an empty pattern", name)
            }
            ConfigurationError::InvalidSymbol {
                name,
                symbol,
                index,
            } => write!(
                f,
                "Motif '{}' has unrecognized symbol '{}' at position {}",
                name, symbol, index
            ),
            ConfigurationError::DuplicateName { name } => {
                write!(f, "Duplicate motif name: {}", name)
            }
            ConfigurationError::MalformedRecord { line, reason } => {
                write!(f, "Malformed motif record at line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl From<ConfigurationError> for String {
    fn from(err: ConfigurationError) -> Self {
        err.to_string()
    }
}

/// One position of a motif pattern, stored as the set of bases it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternSymbol {
    code: u8,
    mask: u8,
}

impl PatternSymbol {
    /// Parses an IUPAC nucleotide code (case-insensitive).
    pub fn parse(symbol: char) -> Option<Self> {
        use self::base_mask::*;
        let code = symbol.to_ascii_uppercase();
        let mask = match code {
            'A' => A,
            'C' => C,
            'G' => G,
            'T' => T,
            'R' => A | G,
            'Y' => C | T,
            'S' => C | G,
            'W' => A | T,
            'K' => G | T,
            'M' => A | C,
            'B' => C | G | T,
            'D' => A | G | T,
            'H' => A | C | T,
            'V' => A | C | G,
            'N' => ANY,
            _ => return None,
        };
        Some(PatternSymbol {
            code: code as u8,
            mask,
        })
    }

    pub fn code(&self) -> char {
        self.code as char
    }

    pub fn is_wildcard(&self) -> bool {
        self.mask == base_mask::ANY
    }

    pub fn is_concrete(&self) -> bool {
        self.allowed_count() == 1
    }

    pub fn allowed_count(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Informativeness of the position: 1 for a concrete base down to 0 for `N`.
    pub fn weight(&self) -> f64 {
        (4 - self.allowed_count()) as f64 / 3.0
    }

    /// Tests an uppercase sequence base against this position.
    ///
    /// The wildcard accepts every sequence symbol, unknown bases included.
    /// Concrete and degenerate codes only accept the bases they list.
    pub fn matches(&self, base: u8) -> bool {
        if self.is_wildcard() {
            return true;
        }
        let base_bit = match base {
            b'A' => base_mask::A,
            b'C' => base_mask::C,
            b'G' => base_mask::G,
            b'T' => base_mask::T,
            _ => return false,
        };
        self.mask & base_bit != 0
    }
}

impl fmt::Display for PatternSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A named promoter motif such as `TATA_box = TATAWAWR`.
#[derive(Debug, Clone, PartialEq)]
pub struct MotifPattern {
    name: String,
    symbols: Vec<PatternSymbol>,
}

impl MotifPattern {
    pub fn new(name: &str, pattern: &str) -> Result<Self, ConfigurationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(ConfigurationError::EmptyPattern {
                name: name.to_string(),
            });
        }

        let symbols = pattern
            .chars()
            .enumerate()
            .map(|(index, symbol)| {
                PatternSymbol::parse(symbol).ok_or_else(|| ConfigurationError::InvalidSymbol {
                    name: name.to_string(),
                    symbol,
                    index,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MotifPattern {
            name: name.to_string(),
            symbols,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbols(&self) -> &[PatternSymbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn is_all_wildcard(&self) -> bool {
        self.symbols.iter().all(|s| s.is_wildcard())
    }

    pub fn wildcard_count(&self) -> usize {
        self.symbols.iter().filter(|s| s.is_wildcard()).count()
    }

    /// Mean per-position informativeness, in [0, 1].
    pub fn specificity(&self) -> f64 {
        if self.symbols.is_empty() {
            return 0.0;
        }
        self.symbols.iter().map(|s| s.weight()).sum::<f64>() / self.symbols.len() as f64
    }

    /// Tests a window of the same length as the pattern.
    pub fn matches(&self, window: &[u8]) -> bool {
        window.len() == self.symbols.len()
            && self
                .symbols
                .iter()
                .zip(window)
                .all(|(symbol, &base)| symbol.matches(base))
    }

    pub fn pattern_string(&self) -> String {
        self.symbols.iter().map(|s| s.code()).collect()
    }
}

impl fmt::Display for MotifPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.pattern_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_concrete_and_degenerate_symbols() {
        let r = PatternSymbol::parse('r').unwrap();
        assert_eq!(r.code(), 'R');
        assert!(r.matches(b'A'));
        assert!(r.matches(b'G'));
        assert!(!r.matches(b'C'));
        assert!(!r.matches(b'N'));
        assert_eq!(r.allowed_count(), 2);

        let t = PatternSymbol::parse('T').unwrap();
        assert!(t.is_concrete());
        assert!(t.matches(b'T'));
        assert!(!t.matches(b'A'));
    }

    #[test]
    fn wildcard_matches_any_sequence_symbol() {
        let n = PatternSymbol::parse('N').unwrap();
        assert!(n.is_wildcard());
        for base in [b'A', b'C', b'G', b'T', b'N'] {
            assert!(n.matches(base));
        }
    }

    #[test]
    fn symbol_weights_decrease_with_degeneracy() {
        let weight = |c| PatternSymbol::parse(c).unwrap().weight();
        assert_eq!(weight('A'), 1.0);
        assert!((weight('W') - 2.0 / 3.0).abs() < 1e-12);
        assert!((weight('B') - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(weight('N'), 0.0);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        assert_eq!(PatternSymbol::parse('X'), None);
        assert_eq!(PatternSymbol::parse('_'), None);
    }

    #[test]
    fn new_pattern_normalizes_case() {
        let motif = MotifPattern::new("TATA_box", "tataWaWr").unwrap();
        assert_eq!(motif.name(), "TATA_box");
        assert_eq!(motif.pattern_string(), "TATAWAWR");
        assert_eq!(motif.len(), 8);
        assert_eq!(motif.to_string(), "TATA_box=TATAWAWR");
    }

    #[test]
    fn new_pattern_errors() {
        assert_eq!(
            MotifPattern::new("  ", "TATA"),
            Err(ConfigurationError::EmptyName)
        );
        assert_eq!(
            MotifPattern::new("box", ""),
            Err(ConfigurationError::EmptyPattern {
                name: "box".to_string()
            })
        );
        let err = MotifPattern::new("box", "TAXA").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidSymbol {
                name: "box".to_string(),
                symbol: 'X',
                index: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "Motif 'box' has unrecognized symbol 'X' at position 2"
        );
    }

    #[test]
    fn specificity_follows_wildcard_count() {
        let exact = MotifPattern::new("a", "TATAAT").unwrap();
        let one_wild = MotifPattern::new("b", "TANAAT").unwrap();
        let all_wild = MotifPattern::new("c", "NNNNNN").unwrap();
        assert_eq!(exact.specificity(), 1.0);
        assert!(exact.specificity() > one_wild.specificity());
        assert!(one_wild.specificity() > all_wild.specificity());
        assert_eq!(all_wild.specificity(), 0.0);
        assert!(all_wild.is_all_wildcard());
        assert_eq!(one_wild.wildcard_count(), 1);
    }

    #[test]
    fn pattern_matches_window() {
        let motif = MotifPattern::new("m", "TGNTATAAT").unwrap();
        assert!(motif.matches(b"TGCTATAAT"));
        assert!(motif.matches(b"TGNTATAAT"));
        assert!(!motif.matches(b"TGCTATAAA"));
        assert!(!motif.matches(b"TGCTATAA"));
    }
}
