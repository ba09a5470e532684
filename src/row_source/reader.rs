// CSV reader that yields raw rows one record at a time
use crate::error::ConvertError;
use crate::row_source::quoting::{QuoteChecked, QuotingViolation};
use crate::types::{Dialect, Row};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A tabular input resource together with the dialect used to tokenize it.
///
/// Every call to [`RowSource::rows`] reopens the file, so the same source can
/// be rendered several times.
#[derive(Debug, Clone)]
pub struct RowSource {
    path: PathBuf,
    dialect: Dialect,
}

impl RowSource {
    /// Create a source with the default comma-separated dialect
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_dialect(path, Dialect::default())
    }

    /// Create a source with a custom dialect
    pub fn with_dialect(path: impl Into<PathBuf>, dialect: Dialect) -> Self {
        Self {
            path: path.into(),
            dialect,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Open the resource and return a lazy iterator over its records
    pub fn rows(&self) -> Result<Rows, ConvertError> {
        let builder = self.reader_builder()?;
        let file =
            File::open(&self.path).map_err(|e| ConvertError::resource(&self.path, e))?;
        let metadata = file
            .metadata()
            .map_err(|e| ConvertError::resource(&self.path, e))?;
        if metadata.is_dir() {
            return Err(ConvertError::resource(
                &self.path,
                io::Error::new(io::ErrorKind::InvalidInput, "path is a directory"),
            ));
        }

        debug!(path = %self.path.display(), delimiter = %self.dialect.delimiter, "Opened CSV source");

        Ok(Rows {
            path: self.path.clone(),
            records: builder.from_reader(self.quote_checked(file)?).into_records(),
            read: 0,
            finished: false,
        })
    }

    fn quote_checked(&self, file: File) -> Result<QuoteChecked<File>, ConvertError> {
        let dialect = &self.dialect;
        Ok(QuoteChecked::new(
            file,
            ascii_byte("delimiter", dialect.delimiter)?,
            ascii_byte("quote", dialect.quote)?,
            dialect.escape.map(|c| ascii_byte("escape", c)).transpose()?,
            dialect.double_quote,
            dialect.comment.map(|c| ascii_byte("comment", c)).transpose()?,
        ))
    }

    fn reader_builder(&self) -> Result<csv::ReaderBuilder, ConvertError> {
        let dialect = &self.dialect;
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(ascii_byte("delimiter", dialect.delimiter)?)
            .quote(ascii_byte("quote", dialect.quote)?)
            .escape(dialect.escape.map(|c| ascii_byte("escape", c)).transpose()?)
            .double_quote(dialect.double_quote)
            .comment(dialect.comment.map(|c| ascii_byte("comment", c)).transpose()?)
            .has_headers(dialect.has_headers)
            .flexible(true);
        Ok(builder)
    }
}

fn ascii_byte(name: &str, c: char) -> Result<u8, ConvertError> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(ConvertError::configuration(format!(
            "dialect {} must be a single ASCII character, got {:?}",
            name, c
        )))
    }
}

/// Lazy sequence of rows read from a [`RowSource`].
///
/// Iteration stops after the first error.
pub struct Rows {
    path: PathBuf,
    records: csv::StringRecordsIntoIter<QuoteChecked<File>>,
    read: u64,
    finished: bool,
}

impl Rows {
    fn violation(&self) -> Option<QuotingViolation> {
        self.records.reader().get_ref().violation().cloned()
    }

    fn quoting_error(&mut self, violation: QuotingViolation) -> ConvertError {
        self.finished = true;
        ConvertError::parse(&self.path, violation.record, violation.message)
    }
}

impl Iterator for Rows {
    type Item = Result<Row, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let Some(record) = self.records.next() else {
            self.finished = true;
            // An unterminated quote is only known once the input is exhausted
            return self.violation().map(|v| Err(self.quoting_error(v)));
        };
        self.read += 1;

        match record {
            Ok(record) => {
                let number = record
                    .position()
                    .map(|pos| pos.record() + 1)
                    .unwrap_or(self.read);
                if let Some(violation) = self.violation().filter(|v| v.record <= number) {
                    return Some(Err(self.quoting_error(violation)));
                }
                Some(Ok(record.iter().map(String::from).collect()))
            }
            Err(e) => {
                self.finished = true;
                let record = e
                    .position()
                    .map(|pos| pos.record() + 1)
                    .unwrap_or(self.read);
                Some(Err(ConvertError::parse(&self.path, record, e.to_string())))
            }
        }
    }
}
