//! Defines the writers that render a `RankedResult` as CSV or as a console table.
//!
use super::{Match, MotifCatalog, RankedResult};
use crate::utils::Result;
use std::io::Write;

pub const CSV_COLUMNS: [&str; 6] = ["Rank", "Name", "Start", "End", "Match", "Score"];

/// Structure for writing ranked matches as comma-separated records.
///
/// Extra catalog columns are appended after `Score`, in input order.
pub struct CsvWriter<'a, W: Write> {
    writer: csv::Writer<W>,
    catalog: &'a MotifCatalog,
}

impl<'a, W: Write> CsvWriter<'a, W> {
    /// Constructs a new `CsvWriter` and writes the header row.
    ///
    /// # Arguments
    /// * `writer` - Destination of the records.
    /// * `catalog` - Catalog the matches were scanned with; supplies the extra columns.
    ///
    /// # Returns
    /// Returns a `Result` with either a new `CsvWriter` instance or an error message.
    pub fn new(writer: W, catalog: &'a MotifCatalog) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        let header = CSV_COLUMNS
            .iter()
            .copied()
            .chain(catalog.annotation_columns().iter().map(String::as_str));
        writer.write_record(header).map_err(|e| e.to_string())?;
        Ok(CsvWriter { writer, catalog })
    }

    /// Writes one record per ranked match, ranks starting at 1.
    pub fn write(&mut self, ranked: &RankedResult) -> Result<()> {
        let width = CSV_COLUMNS.len() + self.catalog.annotation_columns().len();
        for (index, m) in ranked.iter().enumerate() {
            let mut record = vec![
                (index + 1).to_string(),
                m.pattern_name.clone(),
                m.start.to_string(),
                m.end().to_string(),
                m.matched.clone(),
                format!("{:.4}", m.score),
            ];
            if let Some(values) = self.catalog.annotations(&m.pattern_name) {
                record.extend(values.iter().cloned());
            }
            record.resize(width, String::new());
            self.writer
                .write_record(&record)
                .map_err(|e| e.to_string())?;
        }
        self.writer.flush().map_err(|e| e.to_string())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| e.to_string())
    }
}

/// Renders the ranked matches as an aligned plain-text table.
pub fn format_table(ranked: &RankedResult) -> String {
    const HEADERS: [&str; 6] = ["Rank", "Name", "Start", "End", "Match", "Score"];
    let rows: Vec<[String; 6]> = ranked
        .iter()
        .enumerate()
        .map(|(index, m)| table_row(index + 1, m))
        .collect();

    let mut widths = HEADERS.map(|h| h.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let render = |cells: &[String]| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(&HEADERS.map(|h| h.to_string())[..])];
    lines.extend(rows.iter().map(|row| render(&row[..])));
    lines.join("\n")
}

fn table_row(rank: usize, m: &Match) -> [String; 6] {
    [
        rank.to_string(),
        m.pattern_name.clone(),
        m.start.to_string(),
        m.end().to_string(),
        m.matched.clone(),
        format!("{:.2}", m.score),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promoter::{scan, validate, Scorer};
    use std::io::Cursor;
    use std::num::NonZeroUsize;

    fn example_result(catalog: &MotifCatalog) -> RankedResult {
        let sequence = validate("TTGACATATAAT").unwrap();
        scan(
            &sequence,
            catalog,
            &Scorer::new(),
            NonZeroUsize::new(3).unwrap(),
        )
        .unwrap()
    }

    fn example_catalog() -> MotifCatalog {
        MotifCatalog::from_pairs([("Pribnow_box", "TATAAT"), ("-35_box", "TTGACA")]).unwrap()
    }

    fn render_csv(catalog: &MotifCatalog, ranked: &RankedResult) -> String {
        let mut writer = CsvWriter::new(Vec::new(), catalog).unwrap();
        writer.write(ranked).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn csv_writer_writes_header_and_records() {
        let catalog = example_catalog();
        let output = render_csv(&catalog, &example_result(&catalog));
        let expected = "\
Rank,Name,Start,End,Match,Score\n\
1,-35_box,0,6,TTGACA,100.0000\n\
2,Pribnow_box,6,12,TATAAT,100.0000\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn csv_writer_empty_result_is_header_only() {
        let output = render_csv(&example_catalog(), &RankedResult::default());
        assert_eq!(output, format!("{}\n", CSV_COLUMNS.join(",")));
    }

    #[test]
    fn csv_writer_carries_catalog_columns() {
        let data = "\
Name,Organism,PromoterSeq,Source\n\
Pribnow_box,\"E. coli, K-12\",TATAAT,RegulonDB\n\
-35_box,E. coli,TTGACA\n";
        let catalog = MotifCatalog::from_reader(Cursor::new(data)).unwrap();
        let output = render_csv(&catalog, &example_result(&catalog));
        let expected = "\
Rank,Name,Start,End,Match,Score,Organism,Source\n\
1,-35_box,0,6,TTGACA,100.0000,E. coli,\n\
2,Pribnow_box,6,12,TATAAT,100.0000,\"E. coli, K-12\",RegulonDB\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn csv_fields_with_commas_are_quoted() {
        let catalog = MotifCatalog::from_pairs([("box,1", "TATAAT")]).unwrap();
        let output = render_csv(&catalog, &example_result(&catalog));
        assert_eq!(output.lines().nth(1), Some("1,\"box,1\",6,12,TATAAT,100.0000"));
    }

    #[test]
    fn table_is_column_aligned() {
        let table = format_table(&example_result(&example_catalog()));
        let expected = "\
Rank  Name         Start  End  Match   Score\n\
1     -35_box      0      6    TTGACA  100.00\n\
2     Pribnow_box  6      12   TATAAT  100.00";
        assert_eq!(table, expected);
    }
}
