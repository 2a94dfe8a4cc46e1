//! Turning a resolved assignment into the caller-facing [`Solution`].
//!
//! [`Solution`]: crate::models::Solution

mod extractor;

pub use extractor::SolutionExtractor;
