//! Weighted counts of complete assignments.

use crate::variable::{all_assignments, Assignment, Evidence};

use indexmap::IndexMap;

/// An accumulator mapping complete assignments to the total weight of the samples that produced
/// them. Keys that were never added have weight zero; reading never inserts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutcomeCounts {
    counts: IndexMap<Assignment, f64>
}

impl OutcomeCounts {

    /// Construct an empty `OutcomeCounts`
    pub fn new() -> Self {
        OutcomeCounts { counts: IndexMap::new() }
    }

    /// Construct an `OutcomeCounts` holding a zero weight for every complete assignment of
    /// `names`.
    pub fn with_outcome_space<S: AsRef<str>>(names: &[S]) -> Self {
        OutcomeCounts { counts: all_assignments(names).into_iter().map(|a| (a, 0.0)).collect() }
    }

    /// The weight accumulated for `assignment`
    pub fn get(&self, assignment: &Assignment) -> f64 {
        self.counts.get(assignment).cloned().unwrap_or(0.0)
    }

    /// Add `weight` to the total for `assignment`
    pub fn add(&mut self, assignment: Assignment, weight: f64) {
        *self.counts.entry(assignment).or_insert(0.0) += weight;
    }

    /// A copy holding only the assignments that agree with `evidence`
    pub fn consistent_with(&self, evidence: &Evidence) -> Self {
        OutcomeCounts {
            counts: self.counts
                        .iter()
                        .filter(|(a, _)| a.is_consistent_with(evidence))
                        .map(|(a, &w)| (a.clone(), w))
                        .collect()
        }
    }

    /// Iterate over the stored assignments and their weights
    pub fn iter(&self) -> impl Iterator<Item = (&Assignment, &f64)> {
        self.counts.iter()
    }

    /// The sum of all weights
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

}
