//! Defines a `Sampler` for likelihood weighted particle generation for `BayesianNetwork`s.
//!
//! Koller & Friedman Algorithm 12.2 (pp 493), with the network traversed breadth first from its
//! roots.

use super::{WeightedSample, WeightedSampler};
use crate::model::directed::BayesianNetwork;
use crate::util::Result;
use crate::variable::{Assignment, Evidence};

use itertools::Itertools;
use log::trace;
use rand::Rng;


/// A `Sampler` for Bayesian networks that uses likelihood weighted sampling to draw full
/// assignments from the network given evidence.
///
/// Evidence variables are never sampled. They keep their observed value, and the weight of the
/// sample is multiplied by the probability of that value given the sampled parents. Every other
/// variable is drawn from its own CPT.
pub struct LikelihoodWeightedSampler<'a, R: Rng> {

    /// The model from which to sample
    model: &'a BayesianNetwork,

    /// The evidence on which to condition
    evidence: &'a Evidence,

    /// Nodes without parents, where every traversal starts
    roots: Vec<usize>,

    /// The source of randomness
    rng: R

}


impl<'a, R: Rng> LikelihoodWeightedSampler<'a, R> {

    /// Construct a sampler for `model` conditioned on `evidence`.
    ///
    /// # Errors
    /// * `LwError::UnknownVariable` if an evidence variable is not in the model
    pub fn new(model: &'a BayesianNetwork, evidence: &'a Evidence, rng: R) -> Result<Self> {
        model.check_evidence(evidence)?;
        let roots = model.roots();

        Ok(LikelihoodWeightedSampler { model, evidence, roots, rng })
    }


    /// Run one traversal of the network.
    ///
    /// Every sample starts from an empty assignment, so nothing sampled in a previous round can
    /// leak into this one.
    fn get_sample(&mut self) -> Result<WeightedSample> {
        let mut assignment = Assignment::new();
        let mut weight = 1.0;
        let mut frontier = self.roots.clone();

        while !frontier.is_empty() {
            let mut next = Vec::new();

            for &idx in frontier.iter() {
                let node = self.model.node_at(idx);
                let cpt = self.model.cpt_at(idx);

                let value = match self.evidence.get(node.name()) {
                    Some(observed) => {
                        // update the weight by P(node = observed | Pa(node))
                        weight *= cpt.probability(&assignment, observed)?;
                        observed
                    },
                    None => {
                        let draw: f64 = self.rng.gen();
                        cpt.probability(&assignment, true)? > draw
                    }
                };

                assignment.set(node.name(), value);
                next.extend(node.children().iter().cloned());
            }

            // A child reached through several parents is visited once, and only after all of
            // its parents have values.
            frontier = next.into_iter()
                           .unique()
                           .filter(|&c| self.is_ready(c, &assignment))
                           .collect();
        }

        trace!("sampled {} with weight {}", assignment, weight);

        Ok(WeightedSample(assignment, weight))
    }


    /// Check that the node at `idx` has not been visited but all of its parents have
    fn is_ready(&self, idx: usize, assignment: &Assignment) -> bool {
        let node = self.model.node_at(idx);

        !assignment.contains(node.name())
            && node.parents().iter().all(|&p| assignment.contains(self.model.node_at(p).name()))
    }

}


impl<'a, R: Rng> WeightedSampler for LikelihoodWeightedSampler<'a, R> {

    fn weighted_sample(&mut self) -> Result<WeightedSample> {
        self.get_sample()
    }

}
