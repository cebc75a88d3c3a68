//! Loading a `BayesianNetwork` from a JSON definition.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "name": "cloudy",
//!       "table": [ { "assignment": { "cloudy": true },  "probability": 0.5 },
//!                  { "assignment": { "cloudy": false }, "probability": 0.5 } ] },
//!     { "name": "rain",
//!       "parents": [ "cloudy" ],
//!       "table": [ { "assignment": { "cloudy": true,  "rain": true },  "probability": 0.8 },
//!                  ... ] }
//!   ]
//! }
//! ```
//!
//! Nodes are registered in the order they are listed. A definition goes through the same
//! `NetworkBuilder` checks as a network assembled in code.

use super::directed::{BayesianNetwork, NetworkBuilder};
use super::Node;
use crate::cpt::ProbabilityTable;
use crate::util::{LwError, Result};
use crate::variable::Assignment;

use serde::Deserialize;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A whole network
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkDefinition {
    pub nodes: Vec<NodeDefinition>
}

/// One node, its parents and its probability table
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDefinition {
    pub name: String,

    #[serde(default)]
    pub parents: Vec<String>,

    #[serde(default)]
    pub table: Vec<EntryDefinition>
}

/// ```P(assignment)```, where the assignment covers the node and all of its parents
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryDefinition {
    pub assignment: BTreeMap<String, bool>,
    pub probability: f64
}

impl NetworkDefinition {

    /// Parse a definition from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LwError::Definition(e.to_string()))
    }

    /// Read and parse a definition from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| LwError::Definition(format!("{}: {}", path.display(), e)))?;

        NetworkDefinition::from_json(&json)
    }

    /// Build the network. As with `NetworkBuilder`, the outcome counts start out empty.
    pub fn build(&self) -> Result<BayesianNetwork> {
        let mut builder = NetworkBuilder::new();

        for def in self.nodes.iter() {
            let table = def.table.iter().fold(ProbabilityTable::new(), |table, entry| {
                let key: Assignment = entry.assignment.iter().map(|(k, &v)| (k.clone(), v)).collect();
                table.with_entry(key, entry.probability)
            });

            builder.add_node(Node::new(&def.name).with_probability_table(table));

            for parent in def.parents.iter() {
                builder.add_child(parent, &def.name);
            }
        }

        builder.build()
    }

}
