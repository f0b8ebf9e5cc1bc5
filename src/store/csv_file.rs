use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{debug, info, warn};

use super::RecordStore;
use crate::error::StoreError;
use crate::models::{StudentRecord, StudentRow};

/// Headerless CSV file holding one student per line in the order
/// `id,name,math,english,science`. The file is opened and closed inside every
/// call.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> StoreError {
        StoreError::Csv {
            path: self.path.clone(),
            source,
        }
    }

    /// Serialize a row with standard CSV quoting into memory so the file sees a
    /// single write.
    fn encode_row(&self, row: &StudentRow) -> Result<Vec<u8>, StoreError> {
        let mut buffer = Vec::new();
        {
            let mut writer = WriterBuilder::new()
                .terminator(Terminator::Any(b'\n'))
                .from_writer(&mut buffer);
            writer
                .write_record(row.fields())
                .map_err(|source| self.csv_error(source))?;
            writer.flush().map_err(|source| self.io_error(source))?;
        }
        Ok(buffer)
    }

    fn decode_row(&self, record: &StringRecord) -> Result<StudentRow, StoreError> {
        if record.len() != StudentRow::FIELD_COUNT {
            return Err(StoreError::MalformedRow {
                path: self.path.clone(),
                line: record.position().map_or(0, |pos| pos.line()),
                fields: record.len(),
            });
        }
        Ok(StudentRow {
            id: record[0].to_string(),
            name: record[1].to_string(),
            math: record[2].to_string(),
            english: record[3].to_string(),
            science: record[4].to_string(),
        })
    }

    /// Open the backing file for appending, creating it and its parent
    /// directory as needed. Returns the file and its current length.
    fn open_for_append(&self) -> Result<(File, u64), StoreError> {
        if let Some(parent) = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        let len = file
            .metadata()
            .map_err(|source| self.io_error(source))?
            .len();
        Ok((file, len))
    }

    /// Bytes to append after `previous_len` bytes of existing content.
    fn append_payload(
        &self,
        file: &mut File,
        previous_len: u64,
        encoded: &[u8],
    ) -> Result<Vec<u8>, StoreError> {
        let mut payload = Vec::with_capacity(encoded.len() + 1);
        // A hand-edited file may lack its final line break.
        if previous_len > 0
            && !ends_with_newline(file, previous_len).map_err(|source| self.io_error(source))?
        {
            payload.push(b'\n');
        }
        payload.extend_from_slice(encoded);
        Ok(payload)
    }

    /// Write `payload` through `writer` and sync `file`. Any failure cuts the
    /// file back to `previous_len` bytes before the error is returned.
    fn write_or_rollback(
        &self,
        file: &File,
        mut writer: impl Write,
        payload: &[u8],
        previous_len: u64,
    ) -> Result<(), StoreError> {
        let written = writer
            .write_all(payload)
            .and_then(|()| writer.flush())
            .and_then(|()| file.sync_data());

        if let Err(err) = written {
            warn!(path = %self.path.display(), error = %err, "append failed, rolling back");
            if let Err(truncate_err) = file.set_len(previous_len) {
                warn!(
                    path = %self.path.display(),
                    error = %truncate_err,
                    "failed to truncate partial row"
                );
            }
            return Err(self.io_error(err));
        }
        Ok(())
    }
}

impl RecordStore for CsvFileStore {
    fn append(&self, record: &StudentRecord) -> Result<(), StoreError> {
        let encoded = self.encode_row(&record.to_row())?;
        let (mut file, previous_len) = self.open_for_append()?;
        let payload = self.append_payload(&mut file, previous_len, &encoded)?;
        self.write_or_rollback(&file, &file, &payload, previous_len)?;

        info!(path = %self.path.display(), bytes = payload.len(), "appended student record");
        debug!(id = %record.id, "appended row");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<StudentRow>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no student file yet");
                return Ok(Vec::new());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|source| self.csv_error(source))?;
            rows.push(self.decode_row(&record)?);
        }

        info!(path = %self.path.display(), rows = rows.len(), "loaded student records");
        Ok(rows)
    }
}

fn ends_with_newline(file: &mut File, len: u64) -> io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(id: &str, name: &str, math: i64, english: i64, science: i64) -> StudentRecord {
        StudentRecord {
            id: id.to_string(),
            name: name.to_string(),
            math: math.into(),
            english: english.into(),
            science: science.into(),
        }
    }

    /// Passes the first `budget` bytes through, then fails every write.
    struct FailAfter<W> {
        inner: W,
        budget: usize,
    }

    impl<W: Write> Write for FailAfter<W> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            let take = buf.len().min(self.budget);
            let written = self.inner.write(&buf[..take])?;
            self.budget -= written;
            Ok(written)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }
    }

    /// Run an append whose writes fail after `budget` bytes and return the
    /// error it produced.
    fn append_failing_after(
        store: &CsvFileStore,
        record: &StudentRecord,
        budget: usize,
    ) -> StoreError {
        let encoded = store.encode_row(&record.to_row()).unwrap();
        let (mut file, previous_len) = store.open_for_append().unwrap();
        let payload = store
            .append_payload(&mut file, previous_len, &encoded)
            .unwrap();
        assert!(budget < payload.len());

        let writer = FailAfter {
            inner: &file,
            budget,
        };
        store
            .write_or_rollback(&file, writer, &payload, previous_len)
            .unwrap_err()
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let store = CsvFileStore::new(dir.path().join("students.csv"));
        assert!(store.load_all().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn append_creates_file_and_parent_directory() {
        let dir = tempdir().unwrap();
        let store = CsvFileStore::new(dir.path().join("nested").join("students.csv"));
        store.append(&record("101", "Alice", 80, 90, 70)).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "101,Alice,80,90,70\n");
    }

    #[test]
    fn rows_come_back_in_append_order() {
        let dir = tempdir().unwrap();
        let store = CsvFileStore::new(dir.path().join("students.csv"));
        store.append(&record("2", "Bob", 1, 2, 3)).unwrap();
        store.append(&record("1", "Alice", 4, 5, 6)).unwrap();
        store.append(&record("2", "Bob again", 7, 8, 9)).unwrap();

        let ids: Vec<_> = store
            .load_all()
            .unwrap()
            .into_iter()
            .map(|row| row.name)
            .collect();
        assert_eq!(ids, ["Bob", "Alice", "Bob again"]);
    }

    #[test]
    fn embedded_delimiters_are_quoted() {
        let dir = tempdir().unwrap();
        let store = CsvFileStore::new(dir.path().join("students.csv"));
        let tricky = record("7,a", "O\"Brien, Pat\nJr", 1, 2, 3);
        store.append(&tricky).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(contents.starts_with("\"7,a\",\"O\"\"Brien, Pat\nJr\""));
        assert_eq!(store.load_all().unwrap(), vec![tricky.to_row()]);
    }

    #[test]
    fn append_repairs_missing_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("students.csv");
        fs::write(&path, "101,Alice,80,90,70").unwrap();

        let store = CsvFileStore::new(&path);
        store.append(&record("102", "Bob", 60, 85, 95)).unwrap();

        let rows = store.load_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "Bob");
    }

    #[test]
    fn reads_crlf_files_and_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("students.csv");
        fs::write(&path, "101,Alice,80,90,70\r\n\r\n102,Bob,60,85,95\r\n").unwrap();

        let rows = CsvFileStore::new(&path).load_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].science, "95");
    }

    #[test]
    fn wrong_field_count_is_reported_with_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("students.csv");
        fs::write(&path, "101,Alice,80,90,70\n102,Bob,60\n").unwrap();

        let err = CsvFileStore::new(&path).load_all().unwrap_err();
        match err {
            StoreError::MalformedRow { line, fields, .. } => {
                assert_eq!(line, 2);
                assert_eq!(fields, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened as the backing file.
        let store = CsvFileStore::new(dir.path());
        assert!(matches!(
            store.append(&record("1", "A", 1, 2, 3)),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn failed_write_leaves_file_byte_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("students.csv");
        let before = "101,Alice,80,90,70\n";
        fs::write(&path, before).unwrap();
        let store = CsvFileStore::new(&path);
        let bob = record("102", "Bob", 60, 85, 95);

        for budget in [0, 1, 8, 16] {
            let err = append_failing_after(&store, &bob, budget);
            assert!(matches!(err, StoreError::Io { .. }));
            assert_eq!(fs::read_to_string(&path).unwrap(), before, "budget {budget}");
        }

        store.append(&bob).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn rollback_removes_the_repaired_line_break_too() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("students.csv");
        let before = "101,Alice,80,90,70";
        fs::write(&path, before).unwrap();
        let store = CsvFileStore::new(&path);

        // One byte is the prefixed line break, five reach into the row.
        for budget in [1, 5] {
            append_failing_after(&store, &record("102", "Bob", 60, 85, 95), budget);
            assert_eq!(fs::read(&path).unwrap(), before.as_bytes());
        }
    }

    #[test]
    fn failed_first_append_leaves_an_empty_file() {
        let dir = tempdir().unwrap();
        let store = CsvFileStore::new(dir.path().join("students.csv"));

        append_failing_after(&store, &record("1", "A", 1, 2, 3), 4);
        assert_eq!(fs::read(store.path()).unwrap(), b"");
        assert!(store.load_all().unwrap().is_empty());
    }
}
