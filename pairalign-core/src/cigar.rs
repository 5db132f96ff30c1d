//! CIGAR textual round trip (§4.10): `<length><letter>` runs concatenated,
//! e.g. `4M3D5M2I7M`. The Start anchor has no letter and is never emitted
//! (spec.md open question: the original source's tests never covered it).

use crate::anchor::{Alignment, AlignmentAnchor};
use crate::error::AlignError;
use crate::op::Operation;

/// Encodes every run after the Start anchor as `<length><letter>`.
pub fn emit(alignment: &Alignment) -> String {
    let anchors = alignment.anchors();
    let mut out = String::new();
    for w in anchors.windows(2) {
        let prev = w[0];
        let cur = w[1];
        let len = run_length(prev, cur, cur.op);
        let letter = cur
            .op
            .letter()
            .expect("non-Start anchors always carry a lettered operation");
        out.push_str(&len.to_string());
        out.push(letter);
    }
    out
}

fn run_length(prev: AlignmentAnchor, cur: AlignmentAnchor, op: Operation) -> usize {
    if op.is_delete_op() {
        cur.ref_pos - prev.ref_pos
    } else {
        cur.seq_pos - prev.seq_pos
    }
}

/// Parses a CIGAR string back into an [`Alignment`], anchored at the given
/// 0-based starting offsets. Strict: any unrecognized letter or malformed
/// run fails with [`AlignError::CigarParseError`].
pub fn parse(cigar: &str, seq_start: usize, ref_start: usize) -> Result<Alignment, AlignError> {
    let mut anchors = vec![AlignmentAnchor::new(seq_start, ref_start, Operation::Start)];
    let mut seq_pos = seq_start;
    let mut ref_pos = ref_start;

    let mut digits_start = 0usize;
    let bytes = cigar.as_bytes();
    let mut i = 0usize;
    if bytes.is_empty() {
        return Err(AlignError::CigarParseError {
            pos: 0,
            msg: "empty cigar string",
        });
    }
    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_digit() {
            i += 1;
            continue;
        }
        if i == digits_start {
            return Err(AlignError::CigarParseError {
                pos: i,
                msg: "operation letter with no preceding length",
            });
        }
        let len: usize = cigar[digits_start..i].parse().map_err(|_| AlignError::CigarParseError {
            pos: digits_start,
            msg: "run length is not a valid integer",
        })?;
        let letter = b as char;
        let op = Operation::from_letter(letter).map_err(|_| AlignError::CigarParseError {
            pos: i,
            msg: "unrecognized cigar operation letter",
        })?;
        if len == 0 {
            return Err(AlignError::CigarParseError {
                pos: digits_start,
                msg: "run length must be positive",
            });
        }
        if op.is_match_op() {
            seq_pos += len;
            ref_pos += len;
        } else if op.is_insert_op() {
            seq_pos += len;
        } else if op.is_delete_op() {
            ref_pos += len;
        }
        anchors.push(AlignmentAnchor::new(seq_pos, ref_pos, op));
        i += 1;
        digits_start = i;
    }
    if digits_start != bytes.len() {
        return Err(AlignError::CigarParseError {
            pos: digits_start,
            msg: "trailing digits with no operation letter",
        });
    }

    Alignment::new(anchors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_basic_run() {
        let alignment = parse("4M3D5M2I7M", 0, 0).unwrap();
        assert_eq!(emit(&alignment), "4M3D5M2I7M");
    }

    #[test]
    fn parse_rejects_unknown_letter() {
        assert!(parse("4Q", 0, 0).is_err());
    }

    #[test]
    fn parse_rejects_missing_length() {
        assert!(parse("M", 0, 0).is_err());
    }

    #[test]
    fn parse_rejects_trailing_digits() {
        assert!(parse("4M3", 0, 0).is_err());
    }

    #[test]
    fn parse_rejects_empty_string() {
        assert!(parse("", 0, 0).is_err());
    }

    #[test]
    fn roundtrip_preserves_start_offsets() {
        let alignment = parse("3M", 2, 5).unwrap();
        assert_eq!(alignment.start_seq(), 2);
        assert_eq!(alignment.start_ref(), 5);
        assert_eq!(emit(&alignment), "3M");
    }

    proptest::proptest! {
        #[test]
        fn roundtrip_is_identity_for_random_monotone_walks(
            steps in proptest::collection::vec(0u8..3, 1..40),
        ) {
            // Build a random but valid anchor walk: 0=Match, 1=Insert, 2=Delete,
            // each advancing by a random run length 1..=4, compressing equal
            // consecutive ops the way a real traceback would.
            use crate::op::Operation;
            let mut builder = crate::anchor::AnchorBuilder::new(0, 0);
            for (idx, s) in steps.iter().enumerate() {
                let op = match s {
                    0 => Operation::Match,
                    1 => Operation::Insert,
                    _ => Operation::Delete,
                };
                // avoid accidentally producing two adjacent *distinct* runs that
                // the builder would merge incorrectly: push once per step, the
                // builder itself performs run-length compression.
                let _ = idx;
                builder.push(op);
            }
            let alignment = builder.finish();
            let text = emit(&alignment);
            let reparsed = parse(&text, alignment.start_seq(), alignment.start_ref()).unwrap();
            prop_assert_eq!(reparsed, alignment);
        }
    }
}
