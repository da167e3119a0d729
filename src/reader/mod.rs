pub mod bytes;
pub mod fasta;

pub use self::fasta::FastaReader;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FastaError {
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed FASTA at line {line}: {reason}")]
    Malformed { line: usize, reason: &'static str },
}

impl FastaError {
    /// The 1-based line on which parsing failed, if the input itself was at fault
    pub fn line(&self) -> Option<usize> {
        match self {
            FastaError::Malformed { line, .. } => Some(*line),
            FastaError::Io(_) => None,
        }
    }
}
