//! Defines the interface to inference engines

use crate::util::{LwError, Result};

use std::fmt;

mod counts;
mod importance_sampling;

pub use self::counts::OutcomeCounts;
pub use self::importance_sampling::ImportanceSamplingEngine;


/// The estimated distribution of a boolean query variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Posterior {

    /// ```P(query = true | evidence)```
    pub p_true: f64,

    /// ```P(query = false | evidence)```
    pub p_false: f64

}

impl Posterior {

    /// The probability of `query = value`
    pub fn get(&self, value: bool) -> f64 {
        if value { self.p_true } else { self.p_false }
    }

    /// Both components, ```[P(true), P(false)]```
    pub fn to_array(&self) -> [f64; 2] {
        [self.p_true, self.p_false]
    }

    /// Round both components to `places` decimal places, for reporting
    pub fn rounded(&self, places: u32) -> Self {
        let scale = 10f64.powi(places as i32);
        Posterior {
            p_true: (self.p_true * scale).round() / scale,
            p_false: (self.p_false * scale).round() / scale
        }
    }

}

impl fmt::Display for Posterior {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "[{:.*}, {:.*}]", p, self.p_true, p, self.p_false),
            None => write!(f, "[{}, {}]", self.p_true, self.p_false)
        }
    }

}


/// Normalize weighted counts into the posterior of `x`.
///
/// The weights of all assignments with ```x = true``` are summed against those of all other
/// assignments.
///
/// # Errors
/// * `LwError::DegenerateResult` if the total weight is zero, i.e. no sample was consistent
///   with the evidence
pub fn normalize(x: &str, counts: &OutcomeCounts) -> Result<Posterior> {
    let (t, f) = counts.iter().fold((0.0, 0.0), |(t, f), (a, &w)| {
        if a.get(x) == Some(true) { (t + w, f) } else { (t, f + w) }
    });

    let total = t + f;
    if total <= 0.0 {
        return Err(LwError::DegenerateResult(String::from(x)));
    }

    Ok(Posterior { p_true: t / total, p_false: f / total })
}


/// A `ConditionalInferenceEngine` is capable of answering Conditional Probability Queries of
/// the form:
///     ```P(Y | E = e)```
///
/// `ConditionalInferenceEngine`s are stateful and must take the evidence `e` as an argument to
/// whatever construction mechanism they employ.
pub trait ConditionalInferenceEngine {

    /// Infer the distribution ```P(query | evidence)```
    fn infer(&mut self, query: &str) -> Result<Posterior>;

}
