//! Pairwise sequence alignment core: affine-gap global, semi-global, and
//! local DP (Gotoh), banded global DP, edit-distance/Levenshtein/Hamming
//! distance, and the anchor-based alignment representation with a CIGAR
//! round trip. See each module's doc comment for the section of the design
//! it implements.

#[macro_use]
mod par;

pub mod anchor;
pub mod cigar;
pub mod dp;
pub mod error;
pub mod model;
pub mod op;
pub mod sequence;
pub mod view;

pub use anchor::{AlignedSequence, Alignment, AlignmentAnchor};
pub use dp::{pairalign, pairalign_batch, AlignmentResult, PairwiseOptions, Regime};
pub use error::{AlignError, AlignResult};
pub use model::{AffineGapScoreModel, CostModel, DichotomousSubstitutionMatrix};
pub use op::Operation;
pub use sequence::{Sequence, SubstitutionMatrix};
