//! Scoring and cost models (§4.1).
//!
//! Gap penalties are stored as non-negative magnitudes and subtracted inside
//! the DP, per spec.md's resolution of the teacher's inconsistent sign
//! convention (the teacher stored them pre-negated, e.g.
//! `assert!(gap_open <= 0.0)`).

use crate::sequence::SubstitutionMatrix;

/// `submat[x,y] = match` if `x == y`, else `mismatch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DichotomousSubstitutionMatrix {
    pub match_score: i64,
    pub mismatch_score: i64,
}

impl DichotomousSubstitutionMatrix {
    pub fn new(match_score: i64, mismatch_score: i64) -> Self {
        Self {
            match_score,
            mismatch_score,
        }
    }
}

impl<Symbol: PartialEq> SubstitutionMatrix<Symbol> for DichotomousSubstitutionMatrix {
    fn get(&self, a: Symbol, b: Symbol) -> i64 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

/// Affine-gap scoring model: `(submat, gap_open, gap_extend)`.
///
/// The cost of a gap of length `L >= 1` is `gap_open + L * gap_extend`
/// (§4.1); both penalties are non-negative magnitudes.
#[derive(Clone, Copy, Debug)]
pub struct AffineGapScoreModel<M> {
    pub submat: M,
    pub gap_open: i64,
    pub gap_extend: i64,
}

impl<M> AffineGapScoreModel<M> {
    pub fn new(submat: M, gap_open_penalty: i64, gap_extend_penalty: i64) -> Self {
        assert!(gap_open_penalty >= 0, "gap_open_penalty must be >= 0");
        assert!(gap_extend_penalty >= 0, "gap_extend_penalty must be >= 0");
        Self {
            submat,
            gap_open: gap_open_penalty,
            gap_extend: gap_extend_penalty,
        }
    }

    #[inline]
    pub fn score<Symbol>(&self, a: Symbol, b: Symbol) -> i64
    where
        M: SubstitutionMatrix<Symbol>,
    {
        self.submat.get(a, b)
    }

    /// Cost of opening and extending one position of a gap.
    #[inline]
    pub fn gap_open_cost(&self) -> i64 {
        self.gap_open + self.gap_extend
    }
}

/// Linear edit-cost model: `(submat, insertion_cost, deletion_cost)`.
///
/// `submat[x,y]` is 0 on match, positive on mismatch.
#[derive(Clone, Copy, Debug)]
pub struct CostModel<M> {
    pub submat: M,
    pub insertion_cost: i64,
    pub deletion_cost: i64,
}

impl<M> CostModel<M> {
    pub fn new(submat: M, insertion_cost: i64, deletion_cost: i64) -> Self {
        assert!(insertion_cost >= 0, "insertion_cost must be >= 0");
        assert!(deletion_cost >= 0, "deletion_cost must be >= 0");
        Self {
            submat,
            insertion_cost,
            deletion_cost,
        }
    }

    #[inline]
    pub fn cost<Symbol>(&self, a: Symbol, b: Symbol) -> i64
    where
        M: SubstitutionMatrix<Symbol>,
    {
        self.submat.get(a, b)
    }
}

/// `submat[x,y] = [x != y]`, `insertion_cost = deletion_cost = 1` (§4.7).
pub fn levenshtein_model<Symbol: PartialEq>(
) -> CostModel<DichotomousSubstitutionMatrix> {
    CostModel::new(DichotomousSubstitutionMatrix::new(0, 1), 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dichotomous_matrix_scores() {
        let m = DichotomousSubstitutionMatrix::new(2, -1);
        assert_eq!(m.get(b'A', b'A'), 2);
        assert_eq!(m.get(b'A', b'C'), -1);
    }

    #[test]
    fn affine_model_gap_open_cost() {
        let model = AffineGapScoreModel::new(DichotomousSubstitutionMatrix::new(2, -1), 5, 3);
        assert_eq!(model.gap_open_cost(), 8);
    }

    #[test]
    fn levenshtein_model_is_unit_cost() {
        let model = levenshtein_model::<u8>();
        assert_eq!(model.cost(b'A', b'A'), 0);
        assert_eq!(model.cost(b'A', b'C'), 1);
        assert_eq!(model.insertion_cost, 1);
        assert_eq!(model.deletion_cost, 1);
    }

    #[test]
    #[should_panic(expected = "gap_open_penalty must be >= 0")]
    fn negative_gap_open_panics() {
        AffineGapScoreModel::new(DichotomousSubstitutionMatrix::new(1, -1), -1, 0);
    }
}
