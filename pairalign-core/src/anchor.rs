//! The anchor-based alignment representation (§3) and the builder DP
//! tracebacks use to produce it (§4.9).

use crate::error::AlignError;
use crate::op::Operation;
use crate::sequence::Sequence;

/// A boundary between two runs of identical operations.
///
/// `seq_pos`/`ref_pos` are the cumulative consumed lengths of the query and
/// reference *up to and including* this anchor; `op` is the operation of the
/// run ending here. The first anchor always carries [`Operation::Start`] and
/// records the alignment's starting offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlignmentAnchor {
    pub seq_pos: usize,
    pub ref_pos: usize,
    pub op: Operation,
}

impl AlignmentAnchor {
    pub fn new(seq_pos: usize, ref_pos: usize, op: Operation) -> Self {
        Self { seq_pos, ref_pos, op }
    }
}

/// An ordered, invariant-checked list of anchors (§3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment {
    anchors: Vec<AlignmentAnchor>,
}

impl Alignment {
    /// Validates every invariant in §3 and constructs the alignment, or
    /// fails with [`AlignError::InvalidAnchors`].
    pub fn new(anchors: Vec<AlignmentAnchor>) -> Result<Self, AlignError> {
        invalid_anchors_if(anchors.is_empty(), "alignment must have at least one anchor")?;
        invalid_anchors_if(
            anchors[0].op != Operation::Start,
            "first anchor must be Start",
        )?;
        invalid_anchors_if(
            anchors[1..].iter().any(|a| a.op == Operation::Start),
            "only the first anchor may be Start",
        )?;

        for k in 1..anchors.len() {
            let prev = anchors[k - 1];
            let cur = anchors[k];
            invalid_anchors_if(
                cur.seq_pos < prev.seq_pos || cur.ref_pos < prev.ref_pos,
                "anchor positions must be non-decreasing",
            )?;
            invalid_anchors_if(
                cur.op == prev.op,
                "consecutive anchors must not repeat a non-Start op",
            )?;

            let ds = cur.seq_pos - prev.seq_pos;
            let dr = cur.ref_pos - prev.ref_pos;
            let consistent = if cur.op.is_match_op() {
                ds == dr && ds > 0
            } else if cur.op.is_insert_op() {
                ds > 0 && dr == 0
            } else if cur.op.is_delete_op() {
                ds == 0 && dr > 0
            } else {
                false
            };
            invalid_anchors_if(
                !consistent,
                "anchor deltas inconsistent with its operation",
            )?;
        }

        Ok(Self { anchors })
    }

    pub fn anchors(&self) -> &[AlignmentAnchor] {
        &self.anchors
    }

    /// The alignment's starting 0-based query offset (recorded on the Start anchor).
    pub fn start_seq(&self) -> usize {
        self.anchors[0].seq_pos
    }

    /// The alignment's starting 0-based reference offset (recorded on the Start anchor).
    pub fn start_ref(&self) -> usize {
        self.anchors[0].ref_pos
    }
}

fn invalid_anchors_if(cond: bool, reason: &str) -> Result<(), AlignError> {
    if cond {
        Err(AlignError::InvalidAnchors {
            reason: reason.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Accumulates raw per-step operations during a reverse traceback walk and
/// compresses them into an [`Alignment`] on [`AnchorBuilder::finish`].
///
/// Mirrors the teacher's `push_rev`/`finalize_cigar` helpers in
/// `scalar_ref.rs`, generalized from the two call sites there (global, local)
/// to every DP regime in this crate.
pub struct AnchorBuilder {
    start_seq: usize,
    start_ref: usize,
    rev_ops: Vec<(Operation, usize)>,
}

impl AnchorBuilder {
    pub fn new(start_seq: usize, start_ref: usize) -> Self {
        Self {
            start_seq,
            start_ref,
            rev_ops: Vec::new(),
        }
    }

    /// Push one unit of `op`, merging with the previous run if it matches.
    pub fn push(&mut self, op: Operation) {
        if let Some((last_op, last_len)) = self.rev_ops.last_mut() {
            if *last_op == op {
                *last_len += 1;
                return;
            }
        }
        self.rev_ops.push((op, 1));
    }

    /// Reverses the accumulated runs and compresses them into anchors.
    pub fn finish(mut self) -> Alignment {
        self.rev_ops.reverse();
        let mut anchors = Vec::with_capacity(self.rev_ops.len() + 1);
        anchors.push(AlignmentAnchor::new(
            self.start_seq,
            self.start_ref,
            Operation::Start,
        ));
        let mut seq_pos = self.start_seq;
        let mut ref_pos = self.start_ref;
        for (op, len) in self.rev_ops {
            if op.is_match_op() {
                seq_pos += len;
                ref_pos += len;
            } else if op.is_insert_op() {
                seq_pos += len;
            } else if op.is_delete_op() {
                ref_pos += len;
            }
            anchors.push(AlignmentAnchor::new(seq_pos, ref_pos, op));
        }
        Alignment { anchors }
    }
}

/// A query sequence paired with its [`Alignment`] against some reference.
pub struct AlignedSequence<'a, S> {
    pub query: &'a S,
    pub alignment: Alignment,
}

impl<'a, S: Sequence> AlignedSequence<'a, S> {
    pub fn new(query: &'a S, alignment: Alignment) -> Self {
        Self { query, alignment }
    }

    /// The 1-based reference position of the first reference-consuming operation.
    pub fn first(&self) -> Option<usize> {
        self.alignment
            .anchors()
            .windows(2)
            .find(|w| !w[1].op.is_insert_op())
            .map(|w| w[0].ref_pos + 1)
    }

    /// The 1-based reference position of the last reference-consuming operation.
    pub fn last(&self) -> Option<usize> {
        self.alignment
            .anchors()
            .windows(2)
            .rev()
            .find(|w| !w[1].op.is_insert_op())
            .map(|w| w[1].ref_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(seq_pos: usize, ref_pos: usize, op: Operation) -> AlignmentAnchor {
        AlignmentAnchor::new(seq_pos, ref_pos, op)
    }

    #[test]
    fn builder_compresses_matching_runs() {
        let mut b = AnchorBuilder::new(0, 0);
        // traceback walks backwards: push the reverse of MMMID
        b.push(Operation::Delete);
        b.push(Operation::Insert);
        b.push(Operation::Match);
        b.push(Operation::Match);
        b.push(Operation::Match);
        let alignment = b.finish();
        let anchors = alignment.anchors();
        assert_eq!(anchors[0], anchor(0, 0, Operation::Start));
        assert_eq!(anchors[1], anchor(3, 3, Operation::Match));
        assert_eq!(anchors[2], anchor(4, 3, Operation::Insert));
        assert_eq!(anchors[3], anchor(4, 4, Operation::Delete));
    }

    #[test]
    fn rejects_missing_start() {
        let anchors = vec![anchor(1, 1, Operation::Match)];
        assert!(Alignment::new(anchors).is_err());
    }

    #[test]
    fn rejects_second_start() {
        let anchors = vec![
            anchor(0, 0, Operation::Start),
            anchor(0, 0, Operation::Start),
        ];
        assert!(Alignment::new(anchors).is_err());
    }

    #[test]
    fn rejects_decreasing_positions() {
        let anchors = vec![
            anchor(0, 0, Operation::Start),
            anchor(2, 2, Operation::Match),
            anchor(1, 1, Operation::Match),
        ];
        assert!(Alignment::new(anchors).is_err());
    }

    #[test]
    fn rejects_inconsistent_delta_for_insert() {
        let anchors = vec![
            anchor(0, 0, Operation::Start),
            anchor(2, 1, Operation::Insert),
        ];
        assert!(Alignment::new(anchors).is_err());
    }

    #[test]
    fn rejects_uncompressed_consecutive_ops() {
        let anchors = vec![
            anchor(0, 0, Operation::Start),
            anchor(1, 1, Operation::Match),
            anchor(2, 2, Operation::Match),
        ];
        assert!(Alignment::new(anchors).is_err());
    }

    #[test]
    fn accepts_well_formed_alignment() {
        let anchors = vec![
            anchor(0, 0, Operation::Start),
            anchor(2, 2, Operation::Match),
            anchor(4, 2, Operation::Insert),
            anchor(4, 4, Operation::Delete),
        ];
        assert!(Alignment::new(anchors).is_ok());
    }

    proptest::proptest! {
        #[test]
        fn swapping_two_nonadjacent_distinct_op_anchors_breaks_validity(
            steps in proptest::collection::vec(0u8..3, 4..40),
        ) {
            // Build a valid, compressed alignment whose runs cycle
            // Match/Insert/Delete so that consecutive anchors never share
            // an op (the builder would merge them if they did), then hunt
            // for two non-adjacent anchors with distinct ops and swap them.
            let ops_cycle = [Operation::Match, Operation::Insert, Operation::Delete];
            let mut builder = AnchorBuilder::new(0, 0);
            let mut last_idx = usize::MAX;
            for raw in &steps {
                let mut idx = (*raw as usize) % 3;
                if idx == last_idx {
                    idx = (idx + 1) % 3;
                }
                builder.push(ops_cycle[idx]);
                last_idx = idx;
            }
            let alignment = builder.finish();
            let anchors = alignment.anchors().to_vec();

            let mut swap_pair = None;
            'search: for i in 1..anchors.len() {
                for j in (i + 2)..anchors.len() {
                    if anchors[i].op != anchors[j].op {
                        swap_pair = Some((i, j));
                        break 'search;
                    }
                }
            }

            if let Some((i, j)) = swap_pair {
                let mut swapped = anchors;
                swapped.swap(i, j);
                prop_assert!(Alignment::new(swapped).is_err());
            }
        }
    }

    #[test]
    fn aligned_sequence_first_last_skip_leading_trailing_inserts() {
        let anchors = vec![
            anchor(0, 0, Operation::Start),
            anchor(2, 0, Operation::Insert),
            anchor(5, 3, Operation::Match),
            anchor(7, 3, Operation::Insert),
        ];
        let alignment = Alignment::new(anchors).unwrap();
        let query: &[u8] = b"ACGTACG";
        let aligned = AlignedSequence::new(&query, alignment);
        assert_eq!(aligned.first(), Some(1));
        assert_eq!(aligned.last(), Some(3));
    }
}
