//! Semi-global affine-gap DP (§4.4): the query must be fully consumed but
//! leading and trailing gaps in the reference are free.
//!
//! Structurally [`crate::dp::global`] with two changes: the reference-axis
//! boundary column is pinned to 0 instead of paying a leading-gap penalty,
//! and the optimal score is the best value anywhere in the last
//! query-consumed column rather than only its final cell.

use crate::anchor::{Alignment, AnchorBuilder};
use crate::dp::traceback::{TracebackMatrix, DIR_DEL, DIR_DIAG, DIR_INS};
use crate::model::AffineGapScoreModel;
use crate::op::Operation;
use crate::sequence::{Sequence, SubstitutionMatrix};

const NEG_INF: i64 = i64::MIN / 4;

/// Runs the semi-global DP. Returns the optimal score and, when
/// `traceback` is set, the reconstructed [`Alignment`].
pub fn align<S, Sym, M>(
    query: &S,
    reference: &S,
    model: &AffineGapScoreModel<M>,
    traceback: bool,
) -> (i64, Option<Alignment>)
where
    S: Sequence<Symbol = Sym>,
    Sym: Copy,
    M: SubstitutionMatrix<Sym>,
{
    let m = query.len();
    let n = reference.len();
    let go = model.gap_open;
    let ge = model.gap_extend;

    if m == 0 {
        return (0, traceback.then(|| AnchorBuilder::new(0, 0).finish()));
    }

    let mut h_row = vec![0i64; m + 1];
    let mut e_row = vec![NEG_INF; m + 1];
    let mut trace = traceback.then(|| TracebackMatrix::new(n + 1, m + 1, DIR_DIAG));

    h_row[0] = 0;
    for j in 1..=m {
        h_row[j] = -(go + ge * j as i64);
        if let Some(t) = trace.as_mut() {
            t.set_h(0, j, DIR_INS);
        }
    }

    let mut best_score = h_row[m];
    let mut best_i = 0usize;

    for i in 1..=n {
        let r = reference.get(i);
        let mut h_diag = h_row[0];
        h_row[0] = 0;
        let mut f = NEG_INF;
        for j in 1..=m {
            let q = query.get(j);
            let h_up = h_row[j];
            let e_open = h_up - (go + ge);
            let e_ext = e_row[j] - ge;
            let e_from_ext = e_ext > e_open;
            e_row[j] = if e_from_ext { e_ext } else { e_open };

            let f_open = h_row[j - 1] - (go + ge);
            let f_ext = f - ge;
            let f_from_ext = f_ext > f_open;
            f = if f_from_ext { f_ext } else { f_open };

            let diag = h_diag + model.score(q, r);
            let mut h = diag;
            let mut dir = DIR_DIAG;
            if e_row[j] > h {
                h = e_row[j];
                dir = DIR_DEL;
            }
            if f > h {
                h = f;
                dir = DIR_INS;
            }
            if let Some(t) = trace.as_mut() {
                t.set_e(i, j, e_from_ext);
                t.set_f(i, j, f_from_ext);
                t.set_h(i, j, dir);
            }
            h_row[j] = h;
            h_diag = h_up;
        }
        if h_row[m] > best_score {
            best_score = h_row[m];
            best_i = i;
        }
    }

    let Some(trace) = trace else {
        return (best_score, None);
    };

    (best_score, Some(traceback_walk(&trace, best_i, m)))
}

#[derive(Clone, Copy)]
enum State {
    H,
    E,
    F,
}

/// Walks back from `(best_i, m)` to column `0` (the query's start), leaving
/// any unconsumed leading/trailing reference outside the alignment's span.
fn traceback_walk(trace: &TracebackMatrix, start_i: usize, m: usize) -> Alignment {
    let mut i = start_i;
    let mut j = m;
    let mut state = State::H;
    let mut rev_ops = Vec::new();

    while j > 0 {
        match state {
            State::H => match trace.get_h(i, j) {
                DIR_DIAG => {
                    rev_ops.push(Operation::Match);
                    i -= 1;
                    j -= 1;
                }
                DIR_DEL => state = State::E,
                DIR_INS => state = State::F,
                _ => unreachable!("semi-global traceback never clamps to zero"),
            },
            State::E => {
                let extending = trace.e_from_ext(i, j);
                rev_ops.push(Operation::Delete);
                i -= 1;
                if !extending {
                    state = State::H;
                }
            }
            State::F => {
                let extending = trace.f_from_ext(i, j);
                rev_ops.push(Operation::Insert);
                j -= 1;
                if !extending {
                    state = State::H;
                }
            }
        }
    }

    let mut builder = AnchorBuilder::new(0, i);
    for op in rev_ops.into_iter().rev() {
        builder.push(op);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DichotomousSubstitutionMatrix;

    fn model(m: i64, mm: i64, go: i64, ge: i64) -> AffineGapScoreModel<DichotomousSubstitutionMatrix> {
        AffineGapScoreModel::new(DichotomousSubstitutionMatrix::new(m, mm), go, ge)
    }

    #[test]
    fn query_fully_consumed_reference_leading_trailing_free() {
        let q: &[u8] = b"ACGT";
        let r: &[u8] = b"TTACGTTT";
        let model = model(5, -6, 5, 3);
        let (score, alignment) = align(&q, &r, &model, true);
        assert_eq!(score, 20);
        let alignment = alignment.unwrap();
        assert_eq!(crate::cigar::emit(&alignment), "4M");
        assert_eq!(alignment.start_ref(), 2);
    }

    #[test]
    fn reference_shorter_than_query_still_fully_consumes_query() {
        let q: &[u8] = b"ACGTAC";
        let r: &[u8] = b"ACGT";
        let model = model(0, -6, 5, 3);
        let (score, alignment) = align(&q, &r, &model, true);
        assert_eq!(score, -(5 + 2 * 3));
        let alignment = alignment.unwrap();
        assert_eq!(crate::cigar::emit(&alignment), "4M2I");
    }

    #[test]
    fn score_only_agrees_with_traceback() {
        let q: &[u8] = b"ACGTACGT";
        let r: &[u8] = b"GGACGTACGTCC";
        let model = model(3, -1, 5, 2);
        let (score_only, _) = align(&q, &r, &model, false);
        let (with_traceback, _) = align(&q, &r, &model, true);
        assert_eq!(score_only, with_traceback);
    }
}
