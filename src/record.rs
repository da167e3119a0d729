/// A single FASTA entry: the header text (without the leading `>`) and the sequence data
/// with every line break removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FastaRecord {
    pub description: String,
    pub sequence: Vec<u8>,
}

impl FastaRecord {
    /// Number of bases in the sequence
    pub fn len(&self) -> usize {
        self.sequence.len()
    }
}
