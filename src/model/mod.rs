//! Defines the structure of a Bayesian network: its `Node`s and the `Model` trait.

use crate::cpt::ProbabilityTable;
use crate::util::Result;
use crate::variable::Assignment;

pub mod definition;
pub mod directed;

/// A single boolean random variable in a network.
///
/// A `Node` is created by the caller with a name and, usually, a `ProbabilityTable`. Its edges
/// are added through the `NetworkBuilder`, which fills in the `parents` and `children` views
/// when the network is built. After that the `Node` is never modified; the values sampled for a
/// node live in an `Assignment`, not on the node.
#[derive(Clone, Debug)]
pub struct Node {

    /// The name of the variable, unique within a network
    name: String,

    /// Indices of the parent nodes, in the order their edges were added
    parents: Vec<usize>,

    /// Indices of the child nodes, in the order their edges were added
    children: Vec<usize>,

    /// The probabilities as provided by the caller
    table: Option<ProbabilityTable>

}

impl Node {

    /// Construct a new `Node` without edges or probabilities
    pub fn new(name: &str) -> Self {
        Node {
            name: String::from(name),
            parents: Vec::new(),
            children: Vec::new(),
            table: None
        }
    }

    /// Attach the conditional probabilities of this node, replacing any previous table.
    pub fn set_probability_table(&mut self, table: ProbabilityTable) {
        self.table = Some(table);
    }

    /// Builder form of `set_probability_table`
    pub fn with_probability_table(mut self, table: ProbabilityTable) -> Self {
        self.set_probability_table(table);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Indices (into the owning network) of this node's parents
    pub fn parents(&self) -> &[usize] {
        &self.parents
    }

    /// Indices (into the owning network) of this node's children
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn probability_table(&self) -> Option<&ProbabilityTable> {
        self.table.as_ref()
    }

    /// Check if the node has no parents
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

}


/// The `Model` trait represents a Probabilistic Graphical Model over named boolean variables.
pub trait Model {

    /// Lookup a `Node` in the model based on the name
    fn lookup_node(&self, name: &str) -> Option<&Node>;


    /// Get the names of all variables in the model, in registration order.
    fn variables(&self) -> Vec<&str>;


    /// Get the number of variables in the model
    fn num_variables(&self) -> usize;


    /// Determine the probability of a full `Assignment` to the variables in the `Model`.
    ///
    /// Specifically, this computes ```P(zeta)```, where ```zeta``` is a full assignment.
    ///
    /// # Args
    /// * `assignment`: a full `Assignment` to the `Model`
    ///
    /// # Returns
    /// the probability of the `Assignment` given the `Model`
    fn probability(&self, assignment: &Assignment) -> Result<f64>;
}
