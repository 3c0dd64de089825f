//! Text normalization, similarity scoring, and field location

pub mod locate;
pub mod normalize;
pub mod similarity;

pub use locate::{FieldLocator, Located};
pub use normalize::normalize;
pub use similarity::{default_scorer, SimilarityScorer};
