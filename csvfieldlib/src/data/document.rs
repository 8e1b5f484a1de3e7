//! Parsed CSV documents.
//!
//! A [`CsvDocument`] is the header row plus every data row, decoded to
//! strings. Rows keep whatever length they had in the file; padding and
//! truncation happen at projection time.

use csv::{ByteRecord, ReaderBuilder};
use serde::Serialize;

use crate::error::CsvFieldError;
use crate::Result;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A CSV file split into a header and data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsvDocument {
    /// First record of the file (empty for an empty file)
    pub header: Vec<String>,
    /// All following records, in file order
    pub rows: Vec<Vec<String>>,
}

impl CsvDocument {
    /// Parse comma-separated bytes with RFC 4180 quoting.
    ///
    /// Quoted fields may contain commas, newlines and doubled quotes.
    /// A blank line after the header is an empty row; blank lines before the
    /// header or after the last record are dropped. A leading UTF-8 BOM is
    /// dropped, and bytes that are not valid UTF-8 decode to U+FFFD.
    pub fn parse(raw: impl AsRef<[u8]>) -> Result<Self> {
        let raw = raw.as_ref();
        let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(raw);

        let mut records = Vec::new();
        let mut record = ByteRecord::new();
        let mut record_end: Option<usize> = None;
        loop {
            match reader.read_byte_record(&mut record) {
                Ok(true) => {
                    // the reader skips blank lines; each one between records is a row
                    if let Some(end) = record_end {
                        records.extend((0..blank_lines_after(raw, end)).map(|_| Vec::new()));
                    }
                    records.push(decode(&record));
                    record_end = Some(reader.position().byte() as usize);
                }
                Ok(false) => break,
                Err(e) => return Err(parse_error(records.len(), e)),
            }
        }

        let mut records = records.into_iter();
        let header = records.next().unwrap_or_default();
        Ok(Self {
            header,
            rows: records.collect(),
        })
    }

    /// True when the file had no records at all.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    /// Position of the first header cell equal to `name`.
    ///
    /// Matching is exact and case-sensitive; later duplicates are ignored.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|cell| cell == name)
    }

    /// The cell at `index` of every data row, `""` where a row is too short.
    pub fn project(&self, index: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect()
    }
}

/// Advance past one line terminator (`\r\n`, `\n` or `\r`) at `i`, if any.
fn skip_terminator(raw: &[u8], i: usize) -> usize {
    match raw.get(i) {
        Some(b'\r') if raw.get(i + 1) == Some(&b'\n') => i + 2,
        Some(b'\r') | Some(b'\n') => i + 1,
        _ => i,
    }
}

/// Number of empty lines following the record that ended at byte `end`.
fn blank_lines_after(raw: &[u8], end: usize) -> usize {
    let mut i = end.min(raw.len());
    // the reader may stop before, or halfway through, the terminator that closed the record
    match i.checked_sub(1).map(|prev| raw[prev]) {
        Some(b'\r') if raw.get(i) == Some(&b'\n') => i += 1,
        Some(b'\r') | Some(b'\n') => {}
        _ => i = skip_terminator(raw, i),
    }

    let mut count = 0;
    while matches!(raw.get(i), Some(b'\r') | Some(b'\n')) {
        i = skip_terminator(raw, i);
        count += 1;
    }
    count
}

fn decode(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|cell| String::from_utf8_lossy(cell).into_owned())
        .collect()
}

fn parse_error(records_read: usize, err: csv::Error) -> CsvFieldError {
    let position = err
        .position()
        .map(|p| p.record() + 1)
        .unwrap_or(records_read as u64 + 1);
    CsvFieldError::Parse {
        position,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_rows() {
        let doc = CsvDocument::parse("first_name,last_name\nAda,Lovelace\nAlan,Turing\n").unwrap();
        assert_eq!(doc.header, vec!["first_name", "last_name"]);
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.rows[1], vec!["Alan", "Turing"]);
    }

    #[test]
    fn test_parse_empty() {
        let doc = CsvDocument::parse("").unwrap();
        assert!(doc.is_empty());
        assert!(doc.header.is_empty());
        assert_eq!(doc.column_index("anything"), None);
    }

    #[test]
    fn test_header_only() {
        let doc = CsvDocument::parse("a,b,c\n").unwrap();
        assert!(!doc.is_empty());
        assert!(doc.rows.is_empty());
        assert!(doc.project(0).is_empty());
    }

    #[test]
    fn test_quoted_fields() {
        let raw = "name,title\n\"Smith, Jr.\",\"Says \"\"hi\"\"\"\n\"Multi\nLine\",x\n";
        let doc = CsvDocument::parse(raw).unwrap();
        assert_eq!(doc.rows[0], vec!["Smith, Jr.", "Says \"hi\""]);
        assert_eq!(doc.rows[1], vec!["Multi\nLine", "x"]);
    }

    #[test]
    fn test_blank_line_between_records_is_empty_row() {
        let doc = CsvDocument::parse("v\na\n\nb\n").unwrap();
        assert_eq!(doc.project(0), vec!["a", "", "b"]);

        let doc = CsvDocument::parse("v\n\na\n").unwrap();
        assert_eq!(doc.project(0), vec!["", "a"]);
    }

    #[test]
    fn test_blank_lines_with_crlf() {
        let doc = CsvDocument::parse("v\r\na\r\n\r\n\r\nb\r\n").unwrap();
        assert_eq!(doc.project(0), vec!["a", "", "", "b"]);
    }

    #[test]
    fn test_leading_and_trailing_blank_lines_dropped() {
        let doc = CsvDocument::parse("\nv\na\n\n\n").unwrap();
        assert_eq!(doc.header, vec!["v"]);
        assert_eq!(doc.project(0), vec!["a"]);
    }

    #[test]
    fn test_blank_lines_inside_quotes_stay_in_cell() {
        let doc = CsvDocument::parse("v\n\"x\n\ny\"\nz\n").unwrap();
        assert_eq!(doc.project(0), vec!["x\n\ny", "z"]);
    }

    #[test]
    fn test_malformed_quoting_is_recovered() {
        assert!(CsvDocument::parse("a\n\"unterminated").is_ok());
        let doc = CsvDocument::parse("a,b\n\"x\"y,z\n").unwrap();
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.rows[0].len(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = CsvDocument::parse("a,b\r\n1,2\r\n3,4\r\n").unwrap();
        assert_eq!(doc.header, vec!["a", "b"]);
        assert_eq!(doc.project(1), vec!["2", "4"]);
    }

    #[test]
    fn test_bom_is_stripped() {
        let doc = CsvDocument::parse(b"\xEF\xBB\xBFfirst_name\nAda\n").unwrap();
        assert_eq!(doc.column_index("first_name"), Some(0));
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let doc = CsvDocument::parse(b"name\nCaf\xE9\n").unwrap();
        assert_eq!(doc.rows[0], vec!["Caf\u{FFFD}"]);
    }

    #[test]
    fn test_column_index_first_match_case_sensitive() {
        let doc = CsvDocument::parse("id,Name,name,name\n1,a,b,c\n").unwrap();
        assert_eq!(doc.column_index("name"), Some(2));
        assert_eq!(doc.column_index("Name"), Some(1));
        assert_eq!(doc.column_index("NAME"), None);
    }

    #[test]
    fn test_project_ragged_rows() {
        let doc = CsvDocument::parse("a,b,c\nx,y\n1,2,3,4,5\n").unwrap();
        assert_eq!(doc.project(2), vec!["", "3"]);
        assert_eq!(doc.project(0), vec!["x", "1"]);
    }
}
