//! The dispatch entry point (§4.11): one `pairalign` call per regime, plus
//! the `rayon`-backed batch convenience (§4.12).
//!
//! Regimes are a closed, finite set (§9 "Variant enums over inheritance"),
//! so [`Regime`] is a tagged enum that carries its own model reference
//! instead of threading a separate `model: Option<_>` parameter through
//! every call site — there is exactly one model shape per regime, and the
//! enum makes that total at compile time.

pub mod banded;
pub mod edit;
pub mod global;
pub mod local;
pub mod semiglobal;
pub mod traceback;

use crate::anchor::Alignment;
use crate::error::{AlignError, AlignResult};
use crate::model::{AffineGapScoreModel, CostModel};
use crate::sequence::{Sequence, SubstitutionMatrix};

/// Which DP engine `pairalign` dispatches to, carrying the model each
/// regime needs (absent for the two caller-model-free distance regimes).
pub enum Regime<'a, Ms, Mc> {
    Global(&'a AffineGapScoreModel<Ms>),
    SemiGlobal(&'a AffineGapScoreModel<Ms>),
    Local(&'a AffineGapScoreModel<Ms>),
    EditDistance(&'a CostModel<Mc>),
    Levenshtein,
    Hamming,
}

impl<'a, Ms, Mc> Clone for Regime<'a, Ms, Mc> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, Ms, Mc> Copy for Regime<'a, Ms, Mc> {}

/// Options recognized by `pairalign` (§4.11, §6). `banded`/`lower`/`upper`
/// are only meaningful for [`Regime::Global`] and are ignored otherwise;
/// `score_only` doubles as "distance_only" for the distance regimes (both
/// mean "skip traceback, return the bare score/distance").
#[derive(Clone, Copy, Debug, Default)]
pub struct PairwiseOptions {
    pub score_only: bool,
    pub banded: bool,
    /// Signed lower band offset; must be `<= 0`. Global only.
    pub lower: i64,
    /// Signed upper band offset; must be `>= 0`. Global only.
    pub upper: i64,
}

/// Score (or distance) plus, unless `score_only` was requested, the
/// reconstructed [`Alignment`] (§3 `PairwiseAlignment`/`AlignmentResult`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentResult {
    pub score: i64,
    pub alignment: Option<Alignment>,
}

impl AlignmentResult {
    /// Renders the "aligned query"/"aligned reference" printable views
    /// (§6) for byte sequences, or `None` for a score-only result.
    pub fn aligned_strings<S>(&self, query: &S, reference: &S) -> Option<(String, String)>
    where
        S: Sequence<Symbol = u8>,
    {
        self.alignment
            .as_ref()
            .map(|a| crate::view::aligned_strings(query, reference, a))
    }
}

/// The single dispatch entry point (§4.11): `pairalign(regime, a, b, model,
/// options)`, with `model` folded into `regime` (see [`Regime`]).
///
/// Dispatch is total: every `(regime, options)` combination returns a
/// result or fails with a specific [`AlignError`] (§9 "Failure over
/// ambiguity") — only [`Regime::Global`] with `banded: true` and
/// [`Regime::Hamming`] can fail, with [`AlignError::BandExcludesEndpoints`]
/// and [`AlignError::LengthMismatch`] respectively.
pub fn pairalign<S, Sym, Ms, Mc>(
    regime: Regime<'_, Ms, Mc>,
    query: &S,
    reference: &S,
    opts: PairwiseOptions,
) -> AlignResult<AlignmentResult>
where
    S: Sequence<Symbol = Sym>,
    Sym: Copy + PartialEq,
    Ms: SubstitutionMatrix<Sym>,
    Mc: SubstitutionMatrix<Sym>,
{
    let traceback = !opts.score_only;
    match regime {
        Regime::Global(model) if opts.banded => {
            assert!(
                opts.lower <= 0 && opts.upper >= 0,
                "banded global requires lower <= 0 <= upper"
            );
            // The banded matrix's own (lower, upper) are both non-negative
            // offsets from the diagonal; the signed spec convention L <= 0
            // <= U maps onto them as lower_param = U, upper_param = -L.
            let (score, alignment) =
                banded::align(query, reference, model, opts.upper, -opts.lower, traceback)?;
            Ok(AlignmentResult { score, alignment })
        }
        Regime::Global(model) => {
            let (score, alignment) = global::align(query, reference, model, traceback);
            Ok(AlignmentResult { score, alignment })
        }
        Regime::SemiGlobal(model) => {
            let (score, alignment) = semiglobal::align(query, reference, model, traceback);
            Ok(AlignmentResult { score, alignment })
        }
        Regime::Local(model) => {
            let (score, alignment) = local::align(query, reference, model, traceback);
            Ok(AlignmentResult { score, alignment })
        }
        Regime::EditDistance(model) => {
            let (score, alignment) = edit::align(query, reference, model, traceback);
            Ok(AlignmentResult { score, alignment })
        }
        Regime::Levenshtein => {
            let (score, alignment) = edit::levenshtein(query, reference, traceback);
            Ok(AlignmentResult { score, alignment })
        }
        Regime::Hamming => {
            let (score, alignment) = edit::hamming(query, reference, traceback)?;
            Ok(AlignmentResult { score, alignment })
        }
    }
}

/// Runs `pairalign` over many independent `(query, reference)` pairs
/// (§4.12), using the crate's `par_try_map!` convention: `rayon`'s thread
/// pool when the `parallel` feature is enabled, a plain serial iterator
/// otherwise. Not a new alignment regime — §5 already guarantees distinct
/// `pairalign` calls need no cross-call synchronization, so this only
/// saves callers the `rayon`/serial split.
pub fn pairalign_batch<S, Sym, Ms, Mc>(
    regime: Regime<'_, Ms, Mc>,
    pairs: &[(S, S)],
    opts: PairwiseOptions,
) -> Vec<AlignResult<AlignmentResult>>
where
    S: Sequence<Symbol = Sym> + Sync,
    Sym: Copy + PartialEq,
    Ms: SubstitutionMatrix<Sym> + Sync,
    Mc: SubstitutionMatrix<Sym> + Sync,
{
    par_try_map!(pairs, |(a, b): &(S, S)| pairalign(regime, a, b, opts))
}
