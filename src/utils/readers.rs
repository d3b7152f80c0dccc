use super::Result;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read as ioRead};
use std::path::Path;

fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip")
}

fn open_maybe_gzipped(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.to_string_lossy()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

pub fn open_catalog_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    open_maybe_gzipped(path)
}

pub fn open_sequence_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    open_maybe_gzipped(path)
}

/// Strips FASTA header lines and all whitespace from raw sequence text.
///
/// Characters are otherwise passed through untouched: rejecting non-nucleotide
/// symbols is the validator's job.
pub fn sanitize<R: BufRead>(reader: R) -> Result<String> {
    let mut cleaned = String::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
        if line.trim_start().starts_with('>') {
            continue;
        }
        cleaned.extend(line.chars().filter(|c| !c.is_whitespace()));
    }
    Ok(cleaned)
}

pub fn read_sequence(path: &Path) -> Result<String> {
    let reader = open_sequence_reader(path)?;
    let cleaned = sanitize(reader).map_err(|e| format!("{}: {}", path.display(), e))?;
    log::debug!(
        "Read {} sequence characters from {}",
        cleaned.len(),
        path.display()
    );
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn sanitize_removes_whitespace_and_newlines() {
        let data = "ACG T\nTT GA\r\n\tCA\n";
        assert_eq!(sanitize(Cursor::new(data)).unwrap(), "ACGTTTGACA");
    }

    #[test]
    fn sanitize_skips_fasta_headers() {
        let data = ">chr1 promoter region\nTTGACA\nTATAAT\n>second\nGG\n";
        assert_eq!(sanitize(Cursor::new(data)).unwrap(), "TTGACATATAATGG");
    }

    #[test]
    fn sanitize_keeps_invalid_characters_for_validation() {
        let data = "ACXG\n";
        assert_eq!(sanitize(Cursor::new(data)).unwrap(), "ACXG");
    }

    #[test]
    fn sanitize_empty_input_is_empty() {
        assert_eq!(sanitize(Cursor::new(" \n\n ")).unwrap(), "");
    }

    #[test]
    fn read_plain_sequence_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ttgaca tataat").unwrap();
        writeln!(file, "GGGG").unwrap();
        assert_eq!(read_sequence(file.path()).unwrap(), "ttgacatataatGGGG");
    }

    #[test]
    fn read_gzipped_sequence_file() {
        let file = tempfile::Builder::new().suffix(".fa.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(file.as_file(), Compression::default());
        encoder.write_all(b">seq\nTTGACA\nTATAAT\n").unwrap();
        encoder.finish().unwrap();
        assert_eq!(read_sequence(file.path()).unwrap(), "TTGACATATAAT");
    }

    #[test]
    fn read_missing_file_err() {
        let result = read_sequence(Path::new("/nonexistent/promscan/seq.txt"));
        assert!(result.is_err());
    }
}
