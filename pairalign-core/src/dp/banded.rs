//! Banded affine-gap global DP (§4.3): restricts [`crate::dp::global`] to a
//! diagonal band `i - j ∈ [-lower, +upper]` (`lower, upper >= 0`), storing
//! only the band itself (`(n+1) x (lower+upper+1)`) rather than the full
//! `(n+1) x (m+1)` grid.

use crate::anchor::{Alignment, AnchorBuilder};
use crate::dp::traceback::{TracebackMatrix, DIR_DEL, DIR_DIAG, DIR_INS};
use crate::error::AlignError;
use crate::model::AffineGapScoreModel;
use crate::op::Operation;
use crate::sequence::{Sequence, SubstitutionMatrix};

const NEG_INF: i64 = i64::MIN / 4;

/// Local column within a row's band: `b = j - i + upper`, so `b` ranges
/// over `0..w` exactly when `j` is in `[i - upper, i + lower]`.
fn band_col(i: usize, j: usize, upper: i64) -> Option<usize> {
    let b = j as i64 - i as i64 + upper;
    if b < 0 {
        None
    } else {
        Some(b as usize)
    }
}

/// Runs the banded global DP. Fails with [`AlignError::BandExcludesEndpoints`]
/// if `(0, 0)` or `(n, m)` lies outside `[-lower, +upper]`.
pub fn align<S, Sym, M>(
    query: &S,
    reference: &S,
    model: &AffineGapScoreModel<M>,
    lower: i64,
    upper: i64,
    traceback: bool,
) -> Result<(i64, Option<Alignment>), AlignError>
where
    S: Sequence<Symbol = Sym>,
    Sym: Copy,
    M: SubstitutionMatrix<Sym>,
{
    assert!(lower >= 0, "lower must be >= 0");
    assert!(upper >= 0, "upper must be >= 0");

    let m = query.len();
    let n = reference.len();
    let w = (lower + upper + 1) as usize;

    let in_band = |i: usize, j: usize| -> bool {
        match band_col(i, j, upper) {
            Some(b) => b < w,
            None => false,
        }
    };
    if !in_band(0, 0) || !in_band(n, m) {
        return Err(AlignError::BandExcludesEndpoints {
            lower,
            upper,
            row: n,
            col: m,
        });
    }

    if m == 0 && n == 0 {
        return Ok((0, traceback.then(|| AnchorBuilder::new(0, 0).finish())));
    }

    let go = model.gap_open;
    let ge = model.gap_extend;

    let mut h = vec![NEG_INF; (n + 1) * w];
    let mut e = vec![NEG_INF; (n + 1) * w];
    let mut trace = traceback.then(|| TracebackMatrix::new(n + 1, w, DIR_DIAG));

    let h_get = |h: &[i64], i: usize, j: usize| -> i64 {
        match band_col(i, j, upper) {
            Some(b) if b < w => h[i * w + b],
            _ => NEG_INF,
        }
    };
    let e_get = |e: &[i64], i: usize, j: usize| -> i64 {
        match band_col(i, j, upper) {
            Some(b) if b < w => e[i * w + b],
            _ => NEG_INF,
        }
    };

    // Row 0 boundary: H[0,0] = 0, H[0,j] = -(go + ge*j) for j in band.
    let jmax0 = (lower as usize).min(m);
    for j in 0..=jmax0 {
        let Some(b) = band_col(0, j, upper) else { continue };
        if b >= w {
            continue;
        }
        let value = if j == 0 { 0 } else { -(go + ge * j as i64) };
        h[b] = value;
        if let Some(t) = trace.as_mut() {
            t.set_h(0, b, if j == 0 { DIR_DIAG } else { DIR_INS });
        }
    }

    for i in 1..=n {
        let r = reference.get(i);
        let jmin = i.saturating_sub(upper as usize);
        let jmax = (i + lower as usize).min(m);

        if jmin == 0 {
            let b = band_col(i, 0, upper).unwrap();
            h[i * w + b] = -(go + ge * i as i64);
            if let Some(t) = trace.as_mut() {
                t.set_h(i, b, DIR_DEL);
            }
        }

        let mut f = NEG_INF;
        let col_start = jmin.max(1);
        for j in col_start..=jmax {
            let q = query.get(j);
            let b = band_col(i, j, upper).unwrap();

            let h_up = h_get(&h, i - 1, j);
            let e_up = e_get(&e, i - 1, j);
            let e_open = h_up - (go + ge);
            let e_ext = e_up - ge;
            let e_from_ext = e_ext > e_open;
            let e_val = if e_from_ext { e_ext } else { e_open };
            e[i * w + b] = e_val;

            let h_left = h_get(&h, i, j - 1);
            let f_open = h_left - (go + ge);
            let f_ext = f - ge;
            let f_from_ext = f_ext > f_open;
            f = if f_from_ext { f_ext } else { f_open };

            let h_diag = h_get(&h, i - 1, j - 1);
            let diag = h_diag + model.score(q, r);
            let mut val = diag;
            let mut dir = DIR_DIAG;
            if e_val > val {
                val = e_val;
                dir = DIR_DEL;
            }
            if f > val {
                val = f;
                dir = DIR_INS;
            }
            if let Some(t) = trace.as_mut() {
                t.set_e(i, b, e_from_ext);
                t.set_f(i, b, f_from_ext);
                t.set_h(i, b, dir);
            }
            h[i * w + b] = val;
        }
    }

    let score = h_get(&h, n, m);
    let Some(trace) = trace else {
        return Ok((score, None));
    };

    Ok((score, Some(traceback_walk(&trace, n, m, upper))))
}

#[derive(Clone, Copy)]
enum State {
    H,
    E,
    F,
}

fn traceback_walk(trace: &TracebackMatrix, n: usize, m: usize, upper: i64) -> Alignment {
    let mut i = n;
    let mut j = m;
    let mut state = State::H;
    let mut rev_ops = Vec::new();

    while i > 0 || j > 0 {
        let b = band_col(i, j, upper).expect("traceback never steps outside the band");
        match state {
            State::H => match trace.get_h(i, b) {
                DIR_DIAG => {
                    rev_ops.push(Operation::Match);
                    i -= 1;
                    j -= 1;
                }
                DIR_DEL => state = State::E,
                DIR_INS => state = State::F,
                _ => unreachable!("banded traceback never clamps to zero"),
            },
            State::E => {
                let extending = trace.e_from_ext(i, b);
                rev_ops.push(Operation::Delete);
                i -= 1;
                if !extending {
                    state = State::H;
                }
            }
            State::F => {
                let extending = trace.f_from_ext(i, b);
                rev_ops.push(Operation::Insert);
                j -= 1;
                if !extending {
                    state = State::H;
                }
            }
        }
    }

    let mut builder = AnchorBuilder::new(0, 0);
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
    fn banded_matches_full_global_when_band_covers_everything() {
        let q: &[u8] = b"ACGTTT";
        let r: &[u8] = b"ACGT";
        let model = model(0, -6, 5, 3);
        let (full_score, _) = crate::dp::global::align(&q, &r, &model, false);
        let (band_score, _) = align(&q, &r, &model, 10, 10, false).unwrap();
        assert_eq!(full_score, band_score);
    }

    #[test]
    fn narrow_band_matches_full_global_scenario() {
        let q: &[u8] = b"ACGAAT";
        let r: &[u8] = b"ACGT";
        let model = model(0, -6, 5, 3);
        let (full_score, _) = crate::dp::global::align(&q, &r, &model, false);
        let (band_score, _) = align(&q, &r, &model, 2, 2, false).unwrap();
        assert_eq!(full_score, band_score);
    }

    #[test]
    fn zero_width_band_excludes_endpoints_for_unequal_lengths() {
        let q: &[u8] = b"ACGT";
        let r: &[u8] = b"ACG";
        let model = model(0, -6, 5, 3);
        let result = align(&q, &r, &model, 0, 0, false);
        assert!(matches!(result, Err(AlignError::BandExcludesEndpoints { .. })));
    }

    #[test]
    fn traceback_agrees_with_score_only() {
        let q: &[u8] = b"ACGTACGT";
        let r: &[u8] = b"ACGTTCGT";
        let model = model(2, -3, 4, 2);
        let (score_only, _) = align(&q, &r, &model, 3, 3, false).unwrap();
        let (with_traceback, _) = align(&q, &r, &model, 3, 3, true).unwrap();
        assert_eq!(score_only, with_traceback);
    }
}
