//! String similarity and normalization utilities shared by validators and
//! adapters.

pub mod kana;
pub mod normalize;
pub mod similarity;

pub use normalize::{normalize, NormalizeOptions};
pub use similarity::{
    levenshtein_distance, normalized_similarity, token_order_overlap, token_set_overlap,
};
