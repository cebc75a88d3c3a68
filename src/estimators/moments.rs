//! Sample mean and variance of repeated posterior estimates, used to characterize the variance
//! of the likelihood-weighting estimator itself.

use super::Estimator;
use crate::inference::Posterior;
use crate::util::{LwError, Result};


/// Running sums over a stream of `Posterior`s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PosteriorMoments {

    /// The number of observed posteriors
    count: usize,

    /// Component-wise sum, ```[true, false]```
    sum: [f64; 2],

    /// Component-wise sum of squares, ```[true, false]```
    sum_sqr: [f64; 2]

}

impl PosteriorMoments {

    pub fn new() -> Self {
        PosteriorMoments::default()
    }

    /// Add one estimate
    pub fn observe(&mut self, p: &Posterior) {
        for (i, x) in p.to_array().iter().enumerate() {
            self.sum[i] += x;
            self.sum_sqr[i] += x * x;
        }
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The sample mean of each component
    ///
    /// # Errors
    /// * `LwError::NotEnoughData` if nothing has been observed
    pub fn mean(&self) -> Result<Posterior> {
        if self.count == 0 {
            return Err(LwError::NotEnoughData);
        }

        let n = self.count as f64;
        Ok(Posterior { p_true: self.sum[0] / n, p_false: self.sum[1] / n })
    }

    /// The sample variance of each component, ```[true, false]```, with Bessel's correction.
    ///
    /// # Errors
    /// * `LwError::NotEnoughData` if fewer than two estimates have been observed
    pub fn variance(&self) -> Result<[f64; 2]> {
        if self.count < 2 {
            return Err(LwError::NotEnoughData);
        }

        let n = self.count as f64;
        let var = |i: usize| ((self.sum_sqr[i] - self.sum[i] * self.sum[i] / n) / (n - 1.0)).max(0.0);

        Ok([var(0), var(1)])
    }

    /// Summarize everything observed so far
    pub fn summary(&self) -> Result<PosteriorSummary> {
        Ok(PosteriorSummary { trials: self.count, mean: self.mean()?, variance: self.variance()? })
    }

}


/// The mean and variance of a set of posterior estimates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PosteriorSummary {

    /// The number of estimates summarized
    pub trials: usize,

    /// The component-wise mean
    pub mean: Posterior,

    /// The component-wise sample variance, ```[true, false]```
    pub variance: [f64; 2]

}


/// Estimates a `PosteriorSummary` from a dataset of estimates.
#[derive(Clone, Debug, Default)]
pub struct MomentEstimator {
    moments: PosteriorMoments
}

impl MomentEstimator {

    pub fn new() -> Self {
        MomentEstimator::default()
    }

}

impl<'a> Estimator<'a, PosteriorSummary> for MomentEstimator {

    fn estimate(&mut self, dataset: impl Iterator<Item = &'a Posterior>) -> Result<PosteriorSummary> {
        // each call to estimate must be independent
        self.moments = PosteriorMoments::new();

        for p in dataset {
            self.moments.observe(p);
        }

        self.moments.summary()
    }

}
