//! Smith-Waterman affine-gap local alignment (§4.5).
//!
//! Same recurrence as [`crate::dp::global`], with `H` additionally clamped
//! to `0` and the optimal cell tracked as the DP proceeds. Directly adapted
//! from the teacher's `scalar_ref.rs::align_local_scalar`.

use crate::anchor::{Alignment, AnchorBuilder};
use crate::dp::traceback::{TracebackMatrix, DIR_DEL, DIR_DIAG, DIR_INS, DIR_ZERO};
use crate::model::AffineGapScoreModel;
use crate::op::Operation;
use crate::sequence::{Sequence, SubstitutionMatrix};

const NEG_INF: i64 = i64::MIN / 4;

/// Runs the local DP. Returns the optimal score (never negative, §8) and,
/// when `traceback` is set, the reconstructed [`Alignment`] anchored at the
/// traceback start. A score of 0 yields the empty alignment.
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

    if m == 0 || n == 0 {
        return (0, traceback.then(|| AnchorBuilder::new(0, 0).finish()));
    }

    let mut h_row = vec![0i64; m + 1];
    let mut e_row = vec![NEG_INF; m + 1];
    let mut trace = traceback.then(|| TracebackMatrix::new(n + 1, m + 1, DIR_ZERO));

    let mut best_score = 0i64;
    // Ties broken by (smaller i, then smaller j): only strictly-greater scores replace it.
    let mut best_i = 0usize;
    let mut best_j = 0usize;

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
            if h < 0 {
                h = 0;
                dir = DIR_ZERO;
            }
            if let Some(t) = trace.as_mut() {
                t.set_e(i, j, e_from_ext);
                t.set_f(i, j, f_from_ext);
                t.set_h(i, j, dir);
            }
            h_row[j] = h;
            if h > best_score {
                best_score = h;
                best_i = i;
                best_j = j;
            }
            h_diag = h_up;
        }
    }

    if !traceback {
        return (best_score, None);
    }
    let trace = trace.unwrap();
    if best_score == 0 {
        return (0, Some(AnchorBuilder::new(0, 0).finish()));
    }

    (best_score, Some(traceback_walk(&trace, best_i, best_j)))
}

#[derive(Clone, Copy)]
enum State {
    H,
    E,
    F,
}

fn traceback_walk(trace: &TracebackMatrix, start_i: usize, start_j: usize) -> Alignment {
    let mut i = start_i;
    let mut j = start_j;
    let mut state = State::H;
    let mut rev_ops = Vec::new();

    loop {
        match state {
            State::H => match trace.get_h(i, j) {
                DIR_ZERO => break,
                DIR_DIAG => {
                    rev_ops.push(Operation::Match);
                    i -= 1;
                    j -= 1;
                }
                DIR_DEL => state = State::E,
                DIR_INS => state = State::F,
                _ => unreachable!(),
            },
            State::E => {
                if i == 0 {
                    break;
                }
                let extending = trace.e_from_ext(i, j);
                rev_ops.push(Operation::Delete);
                i -= 1;
                if !extending {
                    state = State::H;
                }
            }
            State::F => {
                if j == 0 {
                    break;
                }
                let extending = trace.f_from_ext(i, j);
                rev_ops.push(Operation::Insert);
                j -= 1;
                if !extending {
                    state = State::H;
                }
            }
        }
        if i == 0 && j == 0 {
            break;
        }
    }

    let mut builder = AnchorBuilder::new(j, i);
    for op in rev_ops.into_iter().rev() {
        builder.push(op);
    }
    builder.finish()
}
