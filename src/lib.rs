//! Approximate inference in Bayesian networks over boolean variables, by likelihood weighting.

pub mod cli;
pub mod cpt;
pub mod estimators;
pub mod inference;
pub mod model;
pub mod samplers;
pub mod scenarios;
pub mod trials;
pub mod util;
pub mod variable;

pub use util::{ErrorKind, LwError, Result};
pub use variable::{all_assignments, Assignment, Evidence};
pub use cpt::{Cpt, ProbabilityTable};
pub use model::{Model, Node};
pub use model::directed::{BayesianNetwork, NetworkBuilder};
pub use model::definition::NetworkDefinition;
pub use inference::{normalize, ConditionalInferenceEngine, ImportanceSamplingEngine, OutcomeCounts, Posterior};
pub use samplers::{LikelihoodWeightedSampler, WeightedSample, WeightedSampler};
pub use estimators::{Estimator, MomentEstimator, PosteriorMoments, PosteriorSummary};
pub use trials::run_trials;
