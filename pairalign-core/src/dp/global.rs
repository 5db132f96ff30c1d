//! Needleman-Wunsch/Gotoh affine-gap global alignment (§4.2).
//!
//! Directly adapted from the teacher's `scalar_ref.rs::align_global_scalar`:
//! same row-major rolling-buffer layout (`h_row`/`e_row`/scalar `f`), same
//! packed traceback bytes, same `DIAG > DEL > INS` tie-break via strict `>`
//! comparisons. The teacher indexes `i` over the reference ("target") and
//! `j` over the query; that orientation is kept here (E is the
//! reference-consuming/vertical matrix, F the query-consuming/horizontal
//! one) since it is exactly isomorphic to spec.md's `a`/`b` recurrence with
//! the axis labels swapped.

use crate::anchor::{Alignment, AnchorBuilder};
use crate::dp::traceback::{TracebackMatrix, DIR_DEL, DIR_DIAG, DIR_INS};
use crate::model::AffineGapScoreModel;
use crate::op::Operation;
use crate::sequence::{Sequence, SubstitutionMatrix};

const NEG_INF: i64 = i64::MIN / 4;

/// Runs the full (unbanded) global DP. Returns the optimal score and, when
/// `traceback` is set, the reconstructed [`Alignment`] anchored at `(0, 0)`.
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

    if m == 0 && n == 0 {
        return (0, traceback.then(|| AnchorBuilder::new(0, 0).finish()));
    }
    if m == 0 || n == 0 {
        let len = m.max(n);
        let score = -(go + ge * len as i64);
        let alignment = traceback.then(|| {
            let op = if m == 0 {
                Operation::Delete
            } else {
                Operation::Insert
            };
            let mut builder = AnchorBuilder::new(0, 0);
            for _ in 0..len {
                builder.push(op);
            }
            builder.finish()
        });
        return (score, alignment);
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

    for i in 1..=n {
        let r = reference.get(i);
        let mut h_diag = h_row[0];
        h_row[0] = -(go + ge * i as i64);
        if let Some(t) = trace.as_mut() {
            t.set_h(i, 0, DIR_DEL);
        }
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
    }

    let score = h_row[m];
    let Some(trace) = trace else {
        return (score, None);
    };

    (score, Some(traceback_walk(&trace, n, m)))
}

#[derive(Clone, Copy)]
enum State {
    H,
    E,
    F,
}

/// Walks the traceback matrix from `(n, m)` back to `(0, 0)`, building an
/// alignment anchored at `(0, 0)` (§4.2's traceback description).
fn traceback_walk(trace: &TracebackMatrix, n: usize, m: usize) -> Alignment {
    let mut i = n;
    let mut j = m;
    let mut state = State::H;
    let mut builder = AnchorBuilder::new(0, 0);

    while i > 0 || j > 0 {
        if i == 0 {
            for _ in 0..j {
                builder.push(Operation::Insert);
            }
            break;
        }
        if j == 0 {
            for _ in 0..i {
                builder.push(Operation::Delete);
            }
            break;
        }
        match state {
            State::H => match trace.get_h(i, j) {
                DIR_DIAG => {
                    builder.push(Operation::Match);
                    i -= 1;
                    j -= 1;
                }
                DIR_DEL => state = State::E,
                DIR_INS => state = State::F,
                _ => unreachable!("global traceback never clamps to zero"),
            },
            State::E => {
                let extending = trace.e_from_ext(i, j);
                builder.push(Operation::Delete);
                i -= 1;
                if !extending {
                    state = State::H;
                }
            }
            State::F => {
                let extending = trace.f_from_ext(i, j);
                builder.push(Operation::Insert);
                j -= 1;
                if !extending {
                    state = State::H;
                }
            }
        }
    }

    builder.finish()
}
