//! Matching-and-merge engine
//!
//! Ties the pieces together: for each rule, resolve its layer and template in
//! the document, compute the matched entities, add an element per entity that
//! does not already have one, and collect the enriched rule output.
//!
//! The merge owns the document exclusively for its duration and is the only
//! place document mutation happens. Running it twice over the same inputs is
//! a no-op the second time: elements are keyed by entity id and never
//! duplicated.

mod aggregator;
mod engine;

pub use aggregator::MergedRuleSet;
pub use engine::{merge, MergeOutcome};
