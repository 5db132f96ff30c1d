//! The closed set of alignment operations and their ASCII CIGAR letters.

use crate::error::AlignError;

/// A single alignment operation.
///
/// `Start` marks the first anchor of an [`crate::anchor::Alignment`] and has
/// no CIGAR letter; every other variant has one (see [`Operation::letter`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Match,
    SeqMatch,
    SeqMismatch,
    Insert,
    Delete,
    Skip,
    SoftClip,
    HardClip,
    Pad,
    Start,
    Invalid,
}

impl Operation {
    /// The CIGAR letter for this operation, or `None` for `Start`/`Invalid`.
    pub fn letter(self) -> Option<char> {
        use Operation::*;
        match self {
            Match => Some('M'),
            SeqMatch => Some('='),
            SeqMismatch => Some('X'),
            Insert => Some('I'),
            Delete => Some('D'),
            Skip => Some('N'),
            SoftClip => Some('S'),
            HardClip => Some('H'),
            Pad => Some('P'),
            Start | Invalid => None,
        }
    }

    /// Parse a CIGAR letter back into an operation.
    pub fn from_letter(letter: char) -> Result<Self, AlignError> {
        use Operation::*;
        match letter {
            'M' => Ok(Match),
            '=' => Ok(SeqMatch),
            'X' => Ok(SeqMismatch),
            'I' => Ok(Insert),
            'D' => Ok(Delete),
            'N' => Ok(Skip),
            'S' => Ok(SoftClip),
            'H' => Ok(HardClip),
            'P' => Ok(Pad),
            other => Err(AlignError::InvalidOperationCode {
                code: other.to_string(),
            }),
        }
    }

    /// Consumes both query and reference (an aligned column, match or mismatch).
    pub fn is_match_op(self) -> bool {
        matches!(self, Operation::Match | Operation::SeqMatch | Operation::SeqMismatch)
    }

    /// Consumes query only (gap in the reference).
    pub fn is_insert_op(self) -> bool {
        matches!(self, Operation::Insert)
    }

    /// Consumes reference only (gap in the query).
    pub fn is_delete_op(self) -> bool {
        matches!(self, Operation::Delete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_roundtrip_for_every_lettered_op() {
        let ops = [
            Operation::Match,
            Operation::SeqMatch,
            Operation::SeqMismatch,
            Operation::Insert,
            Operation::Delete,
            Operation::Skip,
            Operation::SoftClip,
            Operation::HardClip,
            Operation::Pad,
        ];
        for op in ops {
            let letter = op.letter().expect("lettered op");
            assert_eq!(Operation::from_letter(letter).unwrap(), op);
        }
    }

    #[test]
    fn start_and_invalid_have_no_letter() {
        assert_eq!(Operation::Start.letter(), None);
        assert_eq!(Operation::Invalid.letter(), None);
    }

    #[test]
    fn unknown_letter_errors() {
        assert!(Operation::from_letter('Q').is_err());
    }

    #[test]
    fn predicates_partition_consumption() {
        assert!(Operation::Match.is_match_op());
        assert!(Operation::SeqMatch.is_match_op());
        assert!(Operation::SeqMismatch.is_match_op());
        assert!(Operation::Insert.is_insert_op());
        assert!(!Operation::Insert.is_delete_op());
        assert!(Operation::Delete.is_delete_op());
        assert!(!Operation::Delete.is_insert_op());
    }
}
