//! Defines the `WeightedSampler` trait - an object that draws weighted samples from a model.

use crate::util::Result;
use crate::variable::Assignment;

pub mod likelihood;

pub use self::likelihood::LikelihoodWeightedSampler;


/// A sample (a full assignment) and the associated weight.
/// Used for likelihood weighting.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedSample(pub Assignment, pub f64);

pub trait WeightedSampler {

    /// Draw one weighted sample from the associated model.
    fn weighted_sample(&mut self) -> Result<WeightedSample>;

}
