//! Printable aligned-string views (§6 "Result surface"): the query on top
//! with `-` for positions it doesn't consume, the reference on the bottom
//! with `-` for positions it doesn't consume.

use crate::anchor::Alignment;
use crate::sequence::Sequence;

/// Renders the aligned query/reference pair for byte sequences, walking the
/// anchor runs after `Start` and emitting one column per consumed position
/// (a `-` on the side an insert/delete doesn't consume).
pub fn aligned_strings<S>(query: &S, reference: &S, alignment: &Alignment) -> (String, String)
where
    S: Sequence<Symbol = u8>,
{
    let anchors = alignment.anchors();
    let mut top = Vec::new();
    let mut bottom = Vec::new();

    for w in anchors.windows(2) {
        let prev = w[0];
        let cur = w[1];
        if cur.op.is_match_op() {
            for pos in (prev.seq_pos + 1)..=cur.seq_pos {
                top.push(query.get(pos));
            }
            for pos in (prev.ref_pos + 1)..=cur.ref_pos {
                bottom.push(reference.get(pos));
            }
        } else if cur.op.is_insert_op() {
            for pos in (prev.seq_pos + 1)..=cur.seq_pos {
                top.push(query.get(pos));
                bottom.push(b'-');
            }
        } else if cur.op.is_delete_op() {
            for pos in (prev.ref_pos + 1)..=cur.ref_pos {
                top.push(b'-');
                bottom.push(reference.get(pos));
            }
        }
    }

    (
        String::from_utf8(top).expect("aligned query view is ASCII"),
        String::from_utf8(bottom).expect("aligned reference view is ASCII"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AffineGapScoreModel, DichotomousSubstitutionMatrix};

    #[test]
    fn complete_match_renders_identical_strings() {
        let q: &[u8] = b"ACGT";
        let r: &[u8] = b"ACGT";
        let model = AffineGapScoreModel::new(DichotomousSubstitutionMatrix::new(0, -6), 5, 3);
        let (_, alignment) = crate::dp::global::align(&q, &r, &model, true);
        let (top, bottom) = aligned_strings(&q, &r, &alignment.unwrap());
        assert_eq!(top, "ACGT");
        assert_eq!(bottom, "ACGT");
    }

    #[test]
    fn double_insertion_places_gaps_in_reference() {
        let q: &[u8] = b"ACGTTT";
        let r: &[u8] = b"ACGT";
        let model = AffineGapScoreModel::new(DichotomousSubstitutionMatrix::new(0, -6), 5, 3);
        let (_, alignment) = crate::dp::global::align(&q, &r, &model, true);
        let (top, bottom) = aligned_strings(&q, &r, &alignment.unwrap());
        assert_eq!(top, "ACGTTT");
        assert_eq!(bottom, "ACG--T");
    }

    #[test]
    fn local_view_covers_only_the_matched_substring() {
        let q: &[u8] = b"ACGT";
        let r: &[u8] = b"AACGTTT";
        let model = AffineGapScoreModel::new(DichotomousSubstitutionMatrix::new(5, -6), 5, 3);
        let (_, alignment) = crate::dp::local::align(&q, &r, &model, true);
        let (top, bottom) = aligned_strings(&q, &r, &alignment.unwrap());
        assert_eq!(top, "ACGT");
        assert_eq!(bottom, "ACGT");
    }
}
