//! Defines an importance-sampling `InferenceEngine` for approximate inference using particle-based
//! approximations.
//!
//! Implementation of Importance Sampling via Normalized Likelihood Weighting, described in Koller &
//! Friedman 12.2.3.3

use super::{normalize, ConditionalInferenceEngine, OutcomeCounts, Posterior};
use crate::model::directed::BayesianNetwork;
use crate::samplers::{LikelihoodWeightedSampler, WeightedSample, WeightedSampler};
use crate::util::{LwError, Result};
use crate::variable::Evidence;

use log::debug;
use rand::Rng;

/// An `InferenceEngine` for Bayesian networks using likelihood-weighted importance sampling
pub struct ImportanceSamplingEngine<'a, R: Rng> {

    /// The model over which to perform inference
    model: &'a BayesianNetwork,

    /// The evidence on which every query is conditioned
    evidence: &'a Evidence,

    /// The Likelihood-Weighted sampler for the given `BayesianNetwork`
    sampler: LikelihoodWeightedSampler<'a, R>,

    /// The number of samples to use
    samples: usize
}

impl<'a, R: Rng> ImportanceSamplingEngine<'a, R> {

    /// Construct an engine answering queries about `model` given `evidence`, drawing `samples`
    /// weighted samples per query.
    ///
    /// # Errors
    /// * `LwError::InvalidArgument` if `samples` is zero
    /// * `LwError::UnknownVariable` if an evidence variable is not in the model
    pub fn new(model: &'a BayesianNetwork, evidence: &'a Evidence, samples: usize, rng: R) -> Result<Self> {
        if samples == 0 {
            return Err(LwError::InvalidArgument(String::from("sample count must be positive")));
        }

        let sampler = LikelihoodWeightedSampler::new(model, evidence, rng)?;

        Ok(ImportanceSamplingEngine { model, evidence, sampler, samples })
    }

    /// Draw a fresh batch of weighted samples.
    ///
    /// # Returns
    /// a copy of the model's outcome counts (if any were initialized), restricted to assignments
    /// consistent with the evidence, with the weight of every sample added to the count of its
    /// assignment
    pub fn weighted_counts(&mut self) -> Result<OutcomeCounts> {
        let stored = self.model.outcome_counts();
        let mut counts = if stored.is_empty() {
            OutcomeCounts::new()
        } else {
            stored.consistent_with(self.evidence)
        };

        // sample away...
        for _ in 0..self.samples {
            let WeightedSample(a, w) = self.sampler.weighted_sample()?;
            counts.add(a, w);
        }

        debug!(
            "drew {} samples given {}: {} outcomes, total weight {}",
            self.samples, self.evidence, counts.len(), counts.total()
        );

        Ok(counts)
    }

}

impl<'a, R: Rng> ConditionalInferenceEngine for ImportanceSamplingEngine<'a, R> {

    fn infer(&mut self, query: &str) -> Result<Posterior> {
        // check input arguments
        if self.model.index_of(query).is_none() {
            return Err(LwError::UnknownVariable(String::from(query)));
        }

        let counts = self.weighted_counts()?;
        normalize(query, &counts)
    }

}
