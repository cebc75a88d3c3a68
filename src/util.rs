//! Defines the `Error` type for the lweight library

use thiserror::Error;

use std::result;

pub type Result<T> = result::Result<T, LwError>;

/// The broad class an `LwError` belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {

    /// The network, its probability tables, or the names used to query it are malformed
    Configuration,

    /// An argument to a query was out of range
    InvalidArgument,

    /// The computation completed but its result is undefined
    DegenerateResult

}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum LwError {

    /// A name did not match any variable registered in the network
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    /// A variable was registered more than once
    #[error("variable `{0}` was registered more than once")]
    DuplicateVariable(String),

    /// The same parent -> child edge was added twice
    #[error("edge `{parent}` -> `{child}` was added more than once")]
    DuplicateEdge { parent: String, child: String },

    /// The graph is not acyclic. The value is one of the variables on (or behind) the cycle.
    #[error("the network contains a cycle through `{0}`")]
    Cycle(String),

    /// A variable was never given a probability table
    #[error("variable `{0}` has no probability table")]
    MissingTable(String),

    /// A probability table does not cover every parent/self combination
    #[error("probability table for `{var}` has no entry for {key}")]
    MissingEntry { var: String, key: String },

    /// A probability table holds two entries for the same parent/self combination
    #[error("probability table for `{var}` has more than one entry for {key}")]
    DuplicateEntry { var: String, key: String },

    /// A table entry is not keyed by exactly the variable and its parents
    #[error("entry {key} does not assign exactly `{var}` and its parents")]
    InvalidScope { var: String, key: String },

    /// A table entry is not a probability
    #[error("probability {value} for `{var}` at {key} is outside [0, 1]")]
    InvalidProbability { var: String, key: String, value: f64 },

    /// P(var = true | u) + P(var = false | u) is not 1 for some parent assignment u
    #[error("probabilities for `{var}` given {key} sum to {sum}, not 1")]
    NotACPD { var: String, key: String, sum: f64 },

    /// An assignment was missing values for the named variables
    #[error("assignment is missing values for {0:?}")]
    IncompleteAssignment(Vec<String>),

    /// A network definition could not be read or parsed
    #[error("invalid network definition: {0}")]
    Definition(String),

    /// The report could not be written
    #[error("failed to write report: {0}")]
    Report(String),

    /// An argument was out of range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// There is not enough data to compute a statistic
    #[error("not enough data has been provided")]
    NotEnoughData,

    /// No sample carried any weight, so the posterior of the named query is undefined
    #[error("no sample carried weight; P({0} | evidence) is undefined")]
    DegenerateResult(String)

}

impl LwError {

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LwError::InvalidArgument(_) | LwError::NotEnoughData => ErrorKind::InvalidArgument,
            LwError::DegenerateResult(_) => ErrorKind::DegenerateResult,
            _ => ErrorKind::Configuration
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(ErrorKind::Configuration, LwError::UnknownVariable(String::from("a")).kind());
        assert_eq!(ErrorKind::Configuration, LwError::Cycle(String::from("a")).kind());
        assert_eq!(
            ErrorKind::InvalidArgument,
            LwError::InvalidArgument(String::from("sample count must be positive")).kind()
        );
        assert_eq!(ErrorKind::InvalidArgument, LwError::NotEnoughData.kind());
        assert_eq!(ErrorKind::Configuration, LwError::Report(String::from("broken pipe")).kind());
        assert_eq!(ErrorKind::DegenerateResult, LwError::DegenerateResult(String::from("a")).kind());
    }

    #[test]
    fn messages() {
        let e = LwError::MissingEntry { var: String::from("rain"), key: String::from("{cloudy=false, rain=false}") };
        assert_eq!("probability table for `rain` has no entry for {cloudy=false, rain=false}", e.to_string());
    }
}
