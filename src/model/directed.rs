//! Defines a `BayesianNetwork`, a directed model over boolean variables, and the
//! `NetworkBuilder` used to assemble one.

use crate::cpt::{Cpt, ProbabilityTable};
use crate::inference::{ConditionalInferenceEngine, ImportanceSamplingEngine, OutcomeCounts, Posterior};
use crate::util::{LwError, Result};
use crate::variable::{Assignment, Evidence};
use super::{Model, Node};

use indexmap::IndexMap;
use log::debug;
use rand::Rng;

use std::collections::{HashSet, VecDeque};


/// Represents a Bayesian Network - a Directed Probabilistic Graphical Model.
///
/// # Representation
/// The `Node`s are held in registration order. Edges are stored on the nodes as indices into
/// that order, and each node carries a compiled `Cpt` at the same index. A built network is
/// immutable apart from its table of outcome counts.
#[derive(Clone, Debug)]
pub struct BayesianNetwork {

    /// The nodes of the network, keyed by name
    nodes: IndexMap<String, Node>,

    /// The compiled distribution ```P(X | Pa(X))``` of each node, by node index
    cpts: Vec<Cpt>,

    /// Accumulated weights for complete assignments. Queries work on a filtered copy.
    outcome_counts: OutcomeCounts

}

impl BayesianNetwork {

    /// Start building a new network
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::new()
    }

    /// The position of the named node in registration order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.get_index_of(name)
    }

    /// The node at `idx` in registration order.
    ///
    /// # Panics
    /// if `idx` is out of range. Indices handed out by the network itself are always valid.
    pub fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// The compiled distribution of the node at `idx`
    pub fn cpt_at(&self, idx: usize) -> &Cpt {
        &self.cpts[idx]
    }

    /// The compiled distribution of the named node
    pub fn cpt(&self, name: &str) -> Option<&Cpt> {
        self.index_of(name).map(|idx| &self.cpts[idx])
    }

    /// All nodes, in registration order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Indices of the nodes without parents. Sampling always starts here.
    pub fn roots(&self) -> Vec<usize> {
        self.nodes.values().enumerate().filter(|(_, n)| n.is_root()).map(|(i, _)| i).collect()
    }

    /// Names of the parents of `name`, in edge order
    pub fn parents_of(&self, name: &str) -> Option<Vec<&str>> {
        self.nodes.get(name).map(|n| n.parents().iter().map(|&i| self.node_at(i).name()).collect())
    }

    /// Names of the children of `name`, in edge order
    pub fn children_of(&self, name: &str) -> Option<Vec<&str>> {
        self.nodes.get(name).map(|n| n.children().iter().map(|&i| self.node_at(i).name()).collect())
    }

    /// Populate the outcome counts with a zero weight for every complete assignment of the
    /// network's variables.
    pub fn initialize_outcome_space(&mut self) {
        let names: Vec<&str> = self.nodes.keys().map(|k| k.as_str()).collect();
        self.outcome_counts = OutcomeCounts::with_outcome_space(&names);
        debug!("initialized {} outcomes", self.outcome_counts.len());
    }

    /// The network's table of outcome counts
    pub fn outcome_counts(&self) -> &OutcomeCounts {
        &self.outcome_counts
    }

    /// Check that every evidence variable belongs to the network
    pub fn check_evidence(&self, evidence: &Evidence) -> Result<()> {
        match evidence.names().find(|name| !self.nodes.contains_key(*name)) {
            Some(name) => Err(LwError::UnknownVariable(String::from(name))),
            None => Ok(())
        }
    }

    /// Estimate ```P(query | evidence)``` by likelihood weighting with `samples` weighted samples,
    /// drawing random numbers from the thread-local generator.
    ///
    /// # Errors
    /// * `LwError::InvalidArgument` if `samples` is zero
    /// * `LwError::UnknownVariable` if `query` or an evidence variable is not in the network
    /// * `LwError::DegenerateResult` if no sample carried any weight
    pub fn likelihood_weight(&self, query: &str, evidence: &Evidence, samples: usize) -> Result<Posterior> {
        self.likelihood_weight_with_rng(query, evidence, samples, rand::thread_rng())
    }

    /// As `likelihood_weight`, drawing random numbers from `rng`.
    pub fn likelihood_weight_with_rng<R: Rng>(
        &self,
        query: &str,
        evidence: &Evidence,
        samples: usize,
        rng: R
    ) -> Result<Posterior> {
        let mut engine = ImportanceSamplingEngine::new(self, evidence, samples, rng)?;
        engine.infer(query)
    }

}

impl Model for BayesianNetwork {

    fn lookup_node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    fn variables(&self) -> Vec<&str> {
        self.nodes.keys().map(|k| k.as_str()).collect()
    }

    fn num_variables(&self) -> usize {
        self.nodes.len()
    }

    /// Determine the probability of a full `Assignment` by the chain rule.
    fn probability(&self, assignment: &Assignment) -> Result<f64> {
        let missing: Vec<String> = self.nodes.keys().filter(|k| !assignment.contains(k)).cloned().collect();
        if !missing.is_empty() {
            return Err(LwError::IncompleteAssignment(missing));
        }

        // for every variable in the graph
        self.cpts.iter()
                 // get the probability of its value given its parents
                 .map(|cpt| assignment.get(cpt.var()).map_or(Ok(0.0), |v| cpt.probability(assignment, v)))
                 // and multiply those probabilities, stopping at the first error
                 .fold(Ok(1.0), |acc, val| acc.and_then(|p| val.map(|v| p * v)))
    }
}


/// An implementation of the [builder pattern] for creating a `BayesianNetwork`.
///
/// Nodes, edges and tables may be added in any order. Errors found while adding put the builder
/// into an error state; later calls are ignored and the first error is returned by `build`.
/// Everything else (unknown edge endpoints, cycles, malformed tables) is checked by `build`.
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
#[derive(Debug, Default)]
pub struct NetworkBuilder {

    /// The registered nodes, by name
    nodes: IndexMap<String, Node>,

    /// ```(parent, child)``` edges, in the order they were added
    edges: Vec<(String, String)>,

    /// The error state of the builder
    err: Option<LwError>

}

impl NetworkBuilder {

    /// Construct a new `NetworkBuilder` representing an empty network
    pub fn new() -> Self {
        NetworkBuilder {
            nodes: IndexMap::new(),
            edges: Vec::new(),
            err: None
        }
    }

    /// Register a `Node` with the network.
    pub fn add_node(&mut self, node: Node) {
        if self.err.is_some() {
            return;
        }

        if self.nodes.contains_key(node.name()) {
            self.err = Some(LwError::DuplicateVariable(node.name.clone()));
            return;
        }

        self.nodes.insert(node.name.clone(), node);
    }

    /// Add the edge ```parent -> child```. Both nodes must be registered by the time the network
    /// is built.
    pub fn add_child(&mut self, parent: &str, child: &str) {
        if self.err.is_some() {
            return;
        }

        self.edges.push((String::from(parent), String::from(child)));
    }

    /// Attach a `ProbabilityTable` to a node that is already registered.
    pub fn set_probability_table(&mut self, name: &str, table: ProbabilityTable) {
        if self.err.is_some() {
            return;
        }

        match self.nodes.get_mut(name) {
            Some(node) => node.set_probability_table(table),
            None => self.err = Some(LwError::UnknownVariable(String::from(name)))
        }
    }

    /// Builder form of `add_node`
    pub fn with_node(mut self, node: Node) -> Self {
        self.add_node(node);
        self
    }

    /// Builder form of `add_child`
    pub fn with_child(mut self, parent: &str, child: &str) -> Self {
        self.add_child(parent, child);
        self
    }

    /// Builder form of `set_probability_table`
    pub fn with_probability_table(mut self, name: &str, table: ProbabilityTable) -> Self {
        self.set_probability_table(name, table);
        self
    }

    /// Complete building the network.
    ///
    /// # Returns
    /// the `BayesianNetwork`, or the first error generated during the building process
    ///
    /// # Errors
    /// * any error recorded while adding nodes or tables
    /// * `LwError::UnknownVariable` if an edge names an unregistered node
    /// * `LwError::DuplicateEdge` if an edge was added twice
    /// * `LwError::Cycle` if the edges do not form a DAG
    /// * `LwError::MissingTable` or any error from `Cpt::compile` if a table is malformed
    pub fn build(self) -> Result<BayesianNetwork> {
        if let Some(e) = self.err {
            return Err(e);
        }

        let mut nodes = self.nodes;

        ///////////////////////////////////////////////////////////////////////
        // 1) Give both endpoints of every edge their view of it
        let mut seen = HashSet::new();
        for (parent, child) in self.edges.iter() {
            let p = nodes.get_index_of(parent.as_str()).ok_or_else(|| LwError::UnknownVariable(parent.clone()))?;
            let c = nodes.get_index_of(child.as_str()).ok_or_else(|| LwError::UnknownVariable(child.clone()))?;

            if p == c {
                return Err(LwError::Cycle(parent.clone()));
            }

            if !seen.insert((p, c)) {
                return Err(LwError::DuplicateEdge { parent: parent.clone(), child: child.clone() });
            }

            nodes[p].children.push(c);
            nodes[c].parents.push(p);
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) The traversal only reaches every node if the graph is acyclic
        check_acyclic(&nodes)?;

        ///////////////////////////////////////////////////////////////////////
        // 3) Compile and validate every table against the node's parents
        let cpts = nodes.values()
                        .map(|node| {
                            let parents: Vec<String> = node.parents.iter().map(|&i| nodes[i].name.clone()).collect();
                            match node.table {
                                Some(ref table) => Cpt::compile(&node.name, &parents, table),
                                None => Err(LwError::MissingTable(node.name.clone()))
                            }
                        })
                        .collect::<Result<Vec<Cpt>>>()?;

        debug!("built network with {} nodes and {} edges", nodes.len(), seen.len());

        Ok(BayesianNetwork { nodes, cpts, outcome_counts: OutcomeCounts::new() })
    }
}


/// Kahn's algorithm: repeatedly remove nodes whose parents have all been removed. Anything left
/// over lies on, or below, a cycle.
fn check_acyclic(nodes: &IndexMap<String, Node>) -> Result<()> {
    let mut remaining: Vec<usize> = nodes.values().map(|n| n.parents.len()).collect();
    let mut ready: VecDeque<usize> = remaining.iter().enumerate().filter(|(_, &d)| d == 0).map(|(i, _)| i).collect();
    let mut visited = 0;

    while let Some(idx) = ready.pop_front() {
        visited += 1;
        for &c in nodes[idx].children.iter() {
            remaining[c] -= 1;
            if remaining[c] == 0 {
                ready.push_back(c);
            }
        }
    }

    if visited == nodes.len() {
        return Ok(());
    }

    let stuck = remaining.iter().position(|&d| d > 0).unwrap_or(0);
    Err(LwError::Cycle(nodes[stuck].name.clone()))
}
