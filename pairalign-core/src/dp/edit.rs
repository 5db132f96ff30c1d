//! Edit-distance DP (§4.6), with Levenshtein (§4.7) and Hamming (§4.8)
//! specializations. A single-matrix minimization, structurally the same
//! shape as [`crate::dp::global`]'s H matrix but without gap affinity:
//! every step costs `insertion_cost`/`deletion_cost`/`submat[x,y]` flatly.

use crate::anchor::{Alignment, AnchorBuilder};
use crate::dp::traceback::{DIR_DEL, DIR_DIAG, DIR_INS};
use crate::error::AlignError;
use crate::model::{levenshtein_model, CostModel};
use crate::op::Operation;
use crate::sequence::{Sequence, SubstitutionMatrix};

/// A `(rows) x (cols)` grid of one traceback byte per cell, holding only a
/// `DIR_*` direction. Edit-distance has no E/F gap-affinity matrices, so
/// unlike the affine engines' [`crate::dp::traceback::TracebackMatrix`] it
/// needs no bits beyond the single H-direction field — a plain byte buffer
/// rather than three per-cell buffers of which two would go unused.
struct DirMatrix {
    cols: usize,
    cells: Vec<u8>,
}

impl DirMatrix {
    fn new(rows: usize, cols: usize, default: u8) -> Self {
        Self {
            cols,
            cells: vec![default; rows * cols],
        }
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, dir: u8) {
        self.cells[row * self.cols + col] = dir;
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.cols + col]
    }
}

/// Runs the edit-distance DP. Returns the minimal cost and, when
/// `traceback` is set, the reconstructed [`Alignment`] anchored at `(0, 0)`.
///
/// Tie-break (smallest cost wins; on a tie, prefer substitution, then
/// deletion, then insertion) mirrors §4.2's `DIAG > DEL > INS` convention,
/// inverted for a minimization instead of a maximization.
pub fn align<S, Sym, M>(
    query: &S,
    reference: &S,
    model: &CostModel<M>,
    traceback: bool,
) -> (i64, Option<Alignment>)
where
    S: Sequence<Symbol = Sym>,
    Sym: Copy,
    M: SubstitutionMatrix<Sym>,
{
    let m = query.len();
    let n = reference.len();
    let ins = model.insertion_cost;
    let del = model.deletion_cost;

    if m == 0 && n == 0 {
        return (0, traceback.then(|| AnchorBuilder::new(0, 0).finish()));
    }

    let mut d_row = vec![0i64; m + 1];
    for j in 1..=m {
        d_row[j] = d_row[j - 1] + ins;
    }
    let mut trace = traceback.then(|| DirMatrix::new(n + 1, m + 1, DIR_DIAG));
    if let Some(t) = trace.as_mut() {
        for j in 1..=m {
            t.set(0, j, DIR_INS);
        }
    }

    for i in 1..=n {
        let r = reference.get(i);
        let mut d_diag = d_row[0];
        d_row[0] += del;
        if let Some(t) = trace.as_mut() {
            t.set(i, 0, DIR_DEL);
        }
        for j in 1..=m {
            let q = query.get(j);
            let d_up = d_row[j];

            let sub = d_diag + model.cost(q, r);
            let deletion = d_up + del;
            let insertion = d_row[j - 1] + ins;

            let mut best = sub;
            let mut dir = DIR_DIAG;
            if deletion < best {
                best = deletion;
                dir = DIR_DEL;
            }
            if insertion < best {
                best = insertion;
                dir = DIR_INS;
            }
            if let Some(t) = trace.as_mut() {
                t.set(i, j, dir);
            }
            d_row[j] = best;
            d_diag = d_up;
        }
    }

    let cost = d_row[m];
    let Some(trace) = trace else {
        return (cost, None);
    };

    (cost, Some(traceback_walk(&trace, n, m)))
}

fn traceback_walk(trace: &DirMatrix, n: usize, m: usize) -> Alignment {
    let mut i = n;
    let mut j = m;
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
        match trace.get(i, j) {
            DIR_DIAG => {
                builder.push(Operation::Match);
                i -= 1;
                j -= 1;
            }
            DIR_DEL => {
                builder.push(Operation::Delete);
                i -= 1;
            }
            DIR_INS => {
                builder.push(Operation::Insert);
                j -= 1;
            }
            _ => unreachable!("edit-distance traceback never clamps to zero"),
        }
    }

    builder.finish()
}

/// Levenshtein distance: §4.7's specialization with a unit dichotomous
/// submatrix and unit insertion/deletion costs, no caller-supplied model.
pub fn levenshtein<S, Sym>(query: &S, reference: &S, traceback: bool) -> (i64, Option<Alignment>)
where
    S: Sequence<Symbol = Sym>,
    Sym: Copy + PartialEq,
{
    let model = levenshtein_model::<Sym>();
    align(query, reference, &model, traceback)
}

/// Hamming distance (§4.8): the count of mismatched positions between two
/// equal-length sequences. Fails with [`AlignError::LengthMismatch`]
/// otherwise. The resulting alignment, when requested, is a single
/// match-family run covering every position.
pub fn hamming<S, Sym>(
    query: &S,
    reference: &S,
    traceback: bool,
) -> Result<(i64, Option<Alignment>), AlignError>
where
    S: Sequence<Symbol = Sym>,
    Sym: Copy + PartialEq,
{
    let m = query.len();
    let n = reference.len();
    if m != n {
        return Err(AlignError::LengthMismatch { a_len: m, b_len: n });
    }

    let mut mismatches = 0i64;
    for i in 1..=m {
        if query.get(i) != reference.get(i) {
            mismatches += 1;
        }
    }

    let alignment = traceback.then(|| {
        let mut builder = AnchorBuilder::new(0, 0);
        for _ in 0..m {
            builder.push(Operation::Match);
        }
        builder.finish()
    });

    Ok((mismatches, alignment))
}
