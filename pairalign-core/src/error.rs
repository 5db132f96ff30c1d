use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignError {
    #[error("invalid operation code '{code}'")]
    InvalidOperationCode { code: String },

    #[error("invalid anchors: {reason}")]
    InvalidAnchors { reason: String },

    #[error("band [{lower}, {upper}] excludes endpoint ({row}, {col})")]
    BandExcludesEndpoints {
        lower: i64,
        upper: i64,
        row: usize,
        col: usize,
    },

    #[error("length mismatch: {a_len} vs {b_len}")]
    LengthMismatch { a_len: usize, b_len: usize },

    #[error("cigar parse error at byte {pos}: {msg}")]
    CigarParseError { pos: usize, msg: &'static str },
}

pub type AlignResult<T> = Result<T, AlignError>;
