//! Analysis of declared dependencies against the requirement catalog
//!
//! This module provides:
//! - Comparator: one classified comparison per requirement
//! - Recommendation generator: tiered guidance and snippet groups
//! - Stack-consistency filter applied before insertion
//! - Compatibility warnings (informational only)

mod comparator;
mod compatibility;
mod filter;
mod recommend;

pub use comparator::{classify, compare, recommendation_for, DeprecatedReporting};
pub use compatibility::compatibility_warnings;
pub use filter::StackFilter;
pub use recommend::{framework_observation, recommendations, snippet_set};
