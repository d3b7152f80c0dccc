use super::motif::{ConfigurationError, MotifPattern};
use csv::StringRecord;
use std::collections::BTreeMap;
use std::io::Read;

const NAME_COLUMNS: [&str; 3] = ["name", "motif", "id"];
const PATTERN_COLUMNS: [&str; 3] = ["promoterseq", "pattern", "sequence"];

/// Immutable mapping from motif name to pattern, iterated in name order.
///
/// Catalogs read from CSV also keep every other column of the input
/// (organism, source, ...) so that it can be reported next to the matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotifCatalog {
    motifs: BTreeMap<String, MotifPattern>,
    annotation_columns: Vec<String>,
    annotations: BTreeMap<String, Vec<String>>,
}

/// Header positions of the name, pattern and pass-through columns.
struct CatalogColumns {
    name: usize,
    pattern: usize,
    annotations: Vec<usize>,
}

impl CatalogColumns {
    fn from_headers(headers: &StringRecord, line: usize) -> Result<Self, ConfigurationError> {
        let find = |candidates: &[&str]| {
            headers.iter().position(|f| {
                let f = f.trim_start_matches('\u{feff}');
                candidates.iter().any(|c| f.eq_ignore_ascii_case(c))
            })
        };
        match (find(&NAME_COLUMNS[..]), find(&PATTERN_COLUMNS[..])) {
            (Some(name), Some(pattern)) => Ok(CatalogColumns {
                name,
                pattern,
                annotations: (0..headers.len())
                    .filter(|&i| i != name && i != pattern)
                    .collect(),
            }),
            (None, _) => Err(ConfigurationError::MalformedRecord {
                line,
                reason: format!("header has no name column ({})", NAME_COLUMNS.join("/")),
            }),
            (_, None) => Err(ConfigurationError::MalformedRecord {
                line,
                reason: format!(
                    "header has no pattern column ({})",
                    PATTERN_COLUMNS.join("/")
                ),
            }),
        }
    }

    fn annotation_values(&self, record: &StringRecord) -> Vec<String> {
        self.annotations
            .iter()
            .map(|&i| record.get(i).unwrap_or_default().to_string())
            .collect()
    }
}

fn malformed(err: csv::Error) -> ConfigurationError {
    ConfigurationError::MalformedRecord {
        line: err.position().map_or(0, |pos| pos.line() as usize),
        reason: err.to_string(),
    }
}

impl MotifCatalog {
    pub fn from_pairs<I, N, P>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (N, P)>,
        N: AsRef<str>,
        P: AsRef<str>,
    {
        let mut catalog = MotifCatalog::default();
        for (name, pattern) in pairs {
            catalog.insert(MotifPattern::new(name.as_ref(), pattern.as_ref())?)?;
        }
        Ok(catalog)
    }

    /// Parses a CSV catalog with a header row naming the motif and pattern columns.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(malformed)?.clone();
        let header_line = headers.position().map_or(1, |pos| pos.line() as usize);
        let columns = CatalogColumns::from_headers(&headers, header_line)?;

        let mut catalog = MotifCatalog {
            annotation_columns: columns
                .annotations
                .iter()
                .map(|&i| headers[i].to_string())
                .collect(),
            ..MotifCatalog::default()
        };

        for result in reader.records() {
            let record = result.map_err(malformed)?;
            let line = record.position().map_or(0, |pos| pos.line() as usize);
            let (name, pattern) = match (record.get(columns.name), record.get(columns.pattern)) {
                (Some(name), Some(pattern)) => (name, pattern),
                _ => {
                    return Err(ConfigurationError::MalformedRecord {
                        line,
                        reason: format!(
                            "expected at least {} fields, found {}",
                            columns.name.max(columns.pattern) + 1,
                            record.len()
                        ),
                    })
                }
            };
            let motif = MotifPattern::new(name, pattern)?;
            let motif_name = motif.name().to_string();
            catalog.insert(motif)?;
            catalog
                .annotations
                .insert(motif_name, columns.annotation_values(&record));
        }
        Ok(catalog)
    }

    /// Common bacterial and eukaryotic core promoter elements.
    pub fn builtin() -> Result<Self, ConfigurationError> {
        MotifCatalog::from_pairs([
            ("Pribnow_box", "TATAAT"),
            ("-35_box", "TTGACA"),
            ("Extended_-10", "TGNTATAAT"),
            ("TATA_box", "TATAWAWR"),
            ("CAAT_box", "GGCCAATCT"),
            ("GC_box", "GGGCGG"),
            ("Inr", "YYANWYY"),
            ("BRE", "SSRCGCC"),
        ])
    }

    pub fn insert(&mut self, motif: MotifPattern) -> Result<(), ConfigurationError> {
        if self.motifs.contains_key(motif.name()) {
            return Err(ConfigurationError::DuplicateName {
                name: motif.name().to_string(),
            });
        }
        self.motifs.insert(motif.name().to_string(), motif);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MotifPattern> {
        self.motifs.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MotifPattern> {
        self.motifs.values()
    }

    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    /// Names of the input columns carried alongside each motif.
    pub fn annotation_columns(&self) -> &[String] {
        &self.annotation_columns
    }

    pub fn annotations(&self, name: &str) -> Option<&[String]> {
        self.annotations.get(name).map(Vec::as_slice)
    }
}
