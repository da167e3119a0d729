use crate::reader::{FastaError, FastaReader};
use crate::record::FastaRecord;
use std::io::BufRead;

/// Holds every record loaded during a single pass over a file, in the order in which they
/// were read.
#[derive(Debug, Default)]
pub struct RecordCollection {
    records: Vec<FastaRecord>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record to the end of the collection.
    pub fn add_record(&mut self, record: FastaRecord) {
        self.records.push(record);
    }

    /// Drops every stored record and gives the backing allocation back.
    pub fn release_all(&mut self) {
        self.records = Vec::new();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FastaRecord> {
        self.records.iter()
    }

    /// Sum of the sequence lengths of all stored records
    pub fn total_bases(&self) -> usize {
        self.iter().map(FastaRecord::len).sum()
    }

    /// Drains `reader` into the collection until the end of the stream.
    ///
    /// `on_progress` is called with the number of records stored so far before each read,
    /// which lets the caller draw progress markers.
    ///
    /// # Returns
    ///
    /// The number of records in the collection once the stream is exhausted.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error produced by the reader or by `on_progress`.
    /// Records read before the failure remain in the collection.
    pub fn load_from_reader<R, F>(
        &mut self,
        reader: &mut FastaReader<R>,
        mut on_progress: F,
    ) -> Result<usize, FastaError>
    where
        R: BufRead,
        F: FnMut(usize) -> std::io::Result<()>,
    {
        loop {
            on_progress(self.len())?;

            match reader.read_record()? {
                Some(record) => {
                    trace!(
                        "record {} spans {} lines",
                        self.len() + 1,
                        reader.last_record_lines()
                    );
                    self.add_record(record)
                }
                None => break,
            }
        }

        Ok(self.len())
    }
}
