use super::bytes::ByteReader;
use super::FastaError;
use crate::record::FastaRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const HEADER_MARKER: u8 = b'>';

/// Reads FASTA records one at a time from a buffered stream.
///
/// Each call to [`FastaReader::read_record`] consumes a header line and every sequence line
/// up to the next header (or EOF). Blank lines are skipped but still counted, so line
/// numbers in errors always match the file as seen in an editor.
pub struct FastaReader<R> {
    bytes: ByteReader<R>,
    lines: usize,
    last_record_lines: usize,
    finished: bool,
}

impl FastaReader<BufReader<File>> {
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: ByteReader::new(reader),
            lines: 0,
            last_record_lines: 0,
            finished: false,
        }
    }

    /// Total number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.lines
    }

    /// Number of lines consumed by the most recent successful `read_record` call, or 0 once
    /// the end of the stream has been reached.
    pub fn last_record_lines(&self) -> usize {
        self.last_record_lines
    }

    /// Reads the next record.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` - a complete record was parsed
    /// * `Ok(None)` - the stream is exhausted and no further records remain
    ///
    /// # Errors
    ///
    /// Returns [`FastaError::Malformed`] if sequence data appears before any header, and
    /// [`FastaError::Io`] if the underlying reader fails. After an error, every subsequent
    /// call returns `Ok(None)`.
    pub fn read_record(&mut self) -> Result<Option<FastaRecord>, FastaError> {
        if self.finished {
            return Ok(None);
        }

        let result = self.parse_record();
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
            self.last_record_lines = 0;
        }
        result
    }

    fn parse_record(&mut self) -> Result<Option<FastaRecord>, FastaError> {
        let start = self.lines;
        let mut header = Vec::new();

        // find the header, skipping any blank lines in front of it
        loop {
            header.clear();
            if self.bytes.read_line_trim_newline(&mut header)? == 0 {
                return Ok(None);
            }
            self.lines += 1;

            match header.first() {
                None => continue,
                Some(&HEADER_MARKER) => break,
                Some(_) => {
                    return Err(FastaError::Malformed {
                        line: self.lines,
                        reason: "sequence data found before any header",
                    })
                }
            }
        }

        let description = String::from_utf8_lossy(&header[1..]).into_owned();

        // concatenate sequence lines until the next header or EOF
        let mut sequence = Vec::new();
        while let Some(byte) = self.bytes.peek_byte()? {
            if byte == HEADER_MARKER {
                break;
            }
            self.bytes.read_line_trim_newline(&mut sequence)?;
            self.lines += 1;
        }

        self.last_record_lines = self.lines - start;

        Ok(Some(FastaRecord {
            description,
            sequence,
        }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<FastaRecord, FastaError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
