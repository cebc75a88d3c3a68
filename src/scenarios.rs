//! Ready-made networks.

use crate::cpt::ProbabilityTable;
use crate::model::directed::{BayesianNetwork, NetworkBuilder};
use crate::model::Node;
use crate::util::Result;
use crate::variable::{Assignment, Evidence};

/// The sprinkler network of Russell & Norvig (Figure 14.12a).
///
/// ```text
///            cloudy
///           /      \
///     sprinkler    rain
///           \      /
///           wet_grass
/// ```
///
/// The outcome space of the returned network is already initialized.
pub fn sprinkler() -> Result<BayesianNetwork> {
    let cloudy = Node::new("cloudy").with_probability_table(ProbabilityTable::prior("cloudy", 0.5));

    let rain = Node::new("rain").with_probability_table(ProbabilityTable::conditional(
        "rain",
        &["cloudy"],
        &[(&[true], 0.8), (&[false], 0.2)]
    ));

    let sprinkler = Node::new("sprinkler").with_probability_table(ProbabilityTable::conditional(
        "sprinkler",
        &["cloudy"],
        &[(&[true], 0.1), (&[false], 0.5)]
    ));

    let wet_grass = Node::new("wet_grass").with_probability_table(ProbabilityTable::conditional(
        "wet_grass",
        &["sprinkler", "rain"],
        &[(&[true, true], 0.99), (&[true, false], 0.9), (&[false, true], 0.9), (&[false, false], 0.0)]
    ));

    let mut model = NetworkBuilder::new()
        .with_child("cloudy", "sprinkler")
        .with_child("cloudy", "rain")
        .with_child("sprinkler", "wet_grass")
        .with_child("rain", "wet_grass")
        .with_node(cloudy)
        .with_node(rain)
        .with_node(sprinkler)
        .with_node(wet_grass)
        .build()?;

    model.initialize_outcome_space();
    Ok(model)
}

/// The evidence of the classic sprinkler query: ```sprinkler = true, wet_grass = true```
pub fn sprinkler_evidence() -> Evidence {
    Assignment::new().with("sprinkler", true).with("wet_grass", true)
}
