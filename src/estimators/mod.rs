//! Defines an `Estimator`, which summarizes a dataset of repeated posterior estimates.

use crate::inference::Posterior;
use crate::util::Result;

mod moments;
pub use self::moments::{MomentEstimator, PosteriorMoments, PosteriorSummary};

/// A trait that represents the ability to estimate some statistic of a dataset of
/// `Posterior`s.
pub trait Estimator<'a, T> {

    /// Estimate the value of the statistic from the given dataset
    fn estimate(&mut self, dataset: impl Iterator<Item = &'a Posterior>) -> Result<T>;

}
