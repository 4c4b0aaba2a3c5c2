use crate::domain::model::{Record, RecordSet};
use crate::utils::error::{RemoverError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Loads the user list: first row is the header, every other row a record.
pub struct CsvLoader {
    key_column: String,
}

impl CsvLoader {
    pub fn new(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
        }
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<RecordSet> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            tracing::error!("Error opening CSV file: {}", e);
            RemoverError::IoError(e)
        })?;

        let records = self.load_from_reader(file)?;
        tracing::debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }

    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<RecordSet> {
        let mut reader = BufReader::new(reader);
        skip_bom(&mut reader).map_err(|e| {
            tracing::error!("Error reading CSV data: {}", e);
            RemoverError::IoError(e)
        })?;

        self.parse(reader).inspect_err(|e| {
            tracing::error!("Error reading CSV data: {}", e);
        })
    }

    fn parse<R: Read>(&self, reader: R) -> Result<RecordSet> {
        // Quoting stays on but csv treats stray quotes literally instead of failing.
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .quoting(true)
            .double_quote(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.byte_headers()?.iter().map(decode_field).collect();
        if headers.is_empty() {
            return Ok(RecordSet::default());
        }
        if !headers.iter().any(|h| h == &self.key_column) {
            return Err(RemoverError::LoadError {
                message: format!(
                    "Key column '{}' not found in header: {}",
                    self.key_column,
                    headers.join(",")
                ),
            });
        }

        let shared: Arc<[String]> = headers.iter().cloned().collect();
        let mut records = Vec::new();
        for row in csv_reader.byte_records() {
            let row = row?;
            records.push(Record::new(
                Arc::clone(&shared),
                row.iter().map(decode_field).collect(),
            ));
        }

        Ok(RecordSet::new(headers, records))
    }
}

/// Bytes that are not valid UTF-8 become U+FFFD.
fn decode_field(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

/// Consumes a leading UTF-8 byte-order mark; any other bytes stay in the stream.
fn skip_bom<R: BufRead>(reader: &mut R) -> std::io::Result<()> {
    let buf = reader.fill_buf()?;
    if buf.starts_with(&UTF8_BOM) {
        reader.consume(UTF8_BOM.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_maps_every_header_column() {
        let file = write_csv(b"userid,name\nalice,Alice\nbob,Bob\n");
        let records = CsvLoader::new("userid").load(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records.headers(), &["userid".to_string(), "name".to_string()]);
        let first = records.iter().next().unwrap();
        assert_eq!(first.get("userid"), Some("alice"));
        assert_eq!(first.get("name"), Some("Alice"));
        for record in &records {
            assert!(record.contains_key("userid"));
            assert!(record.contains_key("name"));
        }
    }

    #[test]
    fn test_bom_is_ignored() {
        let plain = CsvLoader::new("userid")
            .load_from_reader(&b"userid,name\nalice,Alice\n"[..])
            .unwrap();
        let with_bom = CsvLoader::new("userid")
            .load_from_reader(&b"\xEF\xBB\xBFuserid,name\nalice,Alice\n"[..])
            .unwrap();
        assert_eq!(plain, with_bom);
        assert_eq!(with_bom.headers()[0], "userid");
    }

    #[test]
    fn test_short_file_without_bom_keeps_all_bytes() {
        let records = CsvLoader::new("u").load_from_reader(&b"u\nx\n"[..]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records.iter().next().unwrap().get("u"), Some("x"));
    }

    #[test]
    fn test_short_row_fails_whole_load() {
        let result = CsvLoader::new("userid")
            .load_from_reader(&b"userid,name\nalice,Alice\nbob\ncarol,Carol\n"[..]);
        assert!(matches!(result, Err(RemoverError::CsvError(_))));
    }

    #[test]
    fn test_missing_key_column_fails_load() {
        let result = CsvLoader::new("userid").load_from_reader(&b"email,name\na@b.c,A\n"[..]);
        assert!(matches!(result, Err(RemoverError::LoadError { .. })));
    }

    #[test]
    fn test_lenient_quotes() {
        let records = CsvLoader::new("userid")
            .load_from_reader(&b"userid,name\nalice,Al\"ice\n\"bob\",\"Bob, Jr\"\n"[..])
            .unwrap();
        let rows: Vec<_> = records.iter().collect();
        assert_eq!(rows[0].get("name"), Some("Al\"ice"));
        assert_eq!(rows[1].get("userid"), Some("bob"));
        assert_eq!(rows[1].get("name"), Some("Bob, Jr"));
    }

    #[test]
    fn test_non_utf8_cell_does_not_abort_load() {
        let records = CsvLoader::new("userid")
            .load_from_reader(&b"userid,name\nalice,Ren\xe9e\nbob,Bob\n"[..])
            .unwrap();
        let rows: Vec<_> = records.iter().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("userid"), Some("alice"));
        assert_eq!(rows[0].get("name"), Some("Ren\u{FFFD}e"));
        assert_eq!(rows[1].get("name"), Some("Bob"));
    }

    #[test]
    fn test_empty_file_yields_no_records() {
        let records = CsvLoader::new("userid").load_from_reader(&b""[..]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CsvLoader::new("userid").load("/no/such/file.csv");
        assert!(matches!(result, Err(RemoverError::IoError(_))));
    }
}
