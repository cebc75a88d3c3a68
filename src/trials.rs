//! Repeated likelihood-weighting runs for a fixed query, used to measure how much the estimate
//! itself varies with the number of samples.

use crate::estimators::{PosteriorMoments, PosteriorSummary};
use crate::model::directed::BayesianNetwork;
use crate::util::{LwError, Result};
use crate::variable::Evidence;

use log::info;
use rand::Rng;

/// Estimate ```P(query | evidence)``` `trials` times, each time from `samples` weighted samples,
/// and summarize the estimates.
///
/// # Args
/// * `progress`: called with the number of completed trials after each trial
///
/// # Errors
/// * `LwError::InvalidArgument` if fewer than two trials are requested
/// * any error from `BayesianNetwork::likelihood_weight`
pub fn run_trials<R, F>(
    model: &BayesianNetwork,
    query: &str,
    evidence: &Evidence,
    samples: usize,
    trials: usize,
    rng: &mut R,
    mut progress: F
) -> Result<PosteriorSummary>
    where R: Rng,
          F: FnMut(usize)
{
    if trials < 2 {
        return Err(LwError::InvalidArgument(String::from("at least two trials are needed for a variance")));
    }

    let mut moments = PosteriorMoments::new();
    for i in 0..trials {
        let p = model.likelihood_weight_with_rng(query, evidence, samples, &mut *rng)?;
        moments.observe(&p);
        progress(i + 1);
    }

    let summary = moments.summary()?;
    info!(
        "P({} | {}) over {} trials of {} samples: mean {:.4}, variance [{:.6}, {:.6}]",
        query, evidence, trials, samples, summary.mean, summary.variance[0], summary.variance[1]
    );

    Ok(summary)
}
