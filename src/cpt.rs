//! Definition of the conditional probability table module
//!
//! A `ProbabilityTable` is what a caller attaches to a `Node`: an unordered list of entries,
//! each mapping a complete parent-plus-self assignment to a probability. When the network is
//! built, every table is compiled into a `Cpt` against the node's parents. Compilation is where
//! malformed tables are rejected, so a compiled `Cpt` always covers every combination.

use crate::util::{LwError, Result};
use crate::variable::{all_assignments, Assignment};

use ndarray::prelude as nd;

/// Alias f64 ndarray::ArrayD as Table
pub type Table = nd::ArrayD<f64>;

/// Tolerance used when checking that a row of a CPT sums to one
const TOLERANCE: f64 = 0.001;


/// The probabilities attached to a single `Node`, as provided by the caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProbabilityTable {
    entries: Vec<(Assignment, f64)>
}

impl ProbabilityTable {

    /// Construct an empty `ProbabilityTable`
    pub fn new() -> Self {
        ProbabilityTable { entries: Vec::new() }
    }

    /// Record ```P(key)```, where `key` assigns the variable and every one of its parents.
    ///
    /// Entries are never merged here. A repeated key is kept and reported when the table is
    /// compiled.
    pub fn insert(&mut self, key: Assignment, probability: f64) {
        self.entries.push((key, probability));
    }

    /// Builder form of `insert`
    pub fn with_entry(mut self, key: Assignment, probability: f64) -> Self {
        self.insert(key, probability);
        self
    }

    /// A table for a variable without parents, ```P(var = true) = p```.
    pub fn prior(var: &str, p: f64) -> Self {
        ProbabilityTable::new()
            .with_entry(Assignment::new().with(var, true), p)
            .with_entry(Assignment::new().with(var, false), 1.0 - p)
    }

    /// A table built from rows of ```P(var = true | parents = row)```. The complementary
    /// ```var = false``` entry of each row is filled in with ```1 - p```.
    ///
    /// # Args
    /// * `var`: the variable the table belongs to
    /// * `parents`: the parent names, in the order the row values are given
    /// * `rows`: pairs of parent values and ```P(var = true | parents)```
    pub fn conditional(var: &str, parents: &[&str], rows: &[(&[bool], f64)]) -> Self {
        let mut table = ProbabilityTable::new();

        for &(values, p) in rows.iter() {
            let given: Assignment = parents.iter().cloned().zip(values.iter().cloned()).collect();
            table.insert(given.clone().with(var, true), p);
            table.insert(given.with(var, false), 1.0 - p);
        }

        table
    }

    pub fn entries(&self) -> &[(Assignment, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}


/// A validated conditional probability distribution ```P(var | parents)```.
///
/// # Representation
/// The values are held in a dense table with one axis per parent, in parent order, followed by
/// an axis for the variable itself. Every axis has length two, indexed ```false = 0``` and
/// ```true = 1```.
#[derive(Clone, Debug)]
pub struct Cpt {

    /// The variable this distribution is over
    var: String,

    /// The conditioning variables, in axis order
    parents: Vec<String>,

    /// The values of the distribution
    table: Table

}

impl Cpt {

    /// Compile and validate a `ProbabilityTable` for `var` given `parents`.
    ///
    /// # Errors
    /// * `LwError::InvalidScope` if an entry does not assign exactly `var` and its parents
    /// * `LwError::InvalidProbability` if an entry is outside ```[0, 1]```
    /// * `LwError::DuplicateEntry` if two entries share a key
    /// * `LwError::MissingEntry` if some of the ```2^(|parents| + 1)``` keys have no entry
    /// * `LwError::NotACPD` if ```P(var = true | u) + P(var = false | u) != 1``` for some ```u```
    pub fn compile(var: &str, parents: &[String], probabilities: &ProbabilityTable) -> Result<Self> {
        let shape = vec![2; parents.len() + 1];
        let mut cpt = Cpt {
            var: String::from(var),
            parents: parents.to_vec(),
            table: Table::zeros(shape.clone())
        };
        let mut seen = nd::ArrayD::from_elem(shape, false);

        for &(ref key, p) in probabilities.entries().iter() {
            let idx = match cpt.index(key) {
                Some(idx) if key.len() == parents.len() + 1 => idx,
                _ => return Err(LwError::InvalidScope { var: cpt.var.clone(), key: key.to_string() })
            };

            if !(0.0..=1.0).contains(&p) {
                return Err(LwError::InvalidProbability { var: cpt.var.clone(), key: key.to_string(), value: p });
            }

            if seen[&idx[..]] {
                return Err(LwError::DuplicateEntry { var: cpt.var.clone(), key: key.to_string() });
            }

            seen[&idx[..]] = true;
            cpt.table[&idx[..]] = p;
        }

        for given in all_assignments(parents) {
            let mut sum = 0.0;

            for &value in [true, false].iter() {
                let key = given.clone().with(var, value);
                // every key built from the scope resolves to an index
                let covered = cpt.index(&key).map(|idx| seen[&idx[..]]).unwrap_or(false);
                if !covered {
                    return Err(LwError::MissingEntry { var: cpt.var.clone(), key: key.to_string() });
                }

                sum += cpt.probability(&given, value)?;
            }

            if (sum - 1.0).abs() > TOLERANCE {
                return Err(LwError::NotACPD { var: cpt.var.clone(), key: given.to_string(), sum });
            }
        }

        Ok(cpt)
    }

    /// The variable this distribution is over
    pub fn var(&self) -> &str {
        &self.var
    }

    /// The conditioning variables
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// Look up ```P(var = value | parents)```.
    ///
    /// # Args
    /// * `given`: an assignment to (at least) every parent. Any value it holds for `var` itself
    ///   is ignored.
    /// * `value`: the value of `var`
    ///
    /// # Errors
    /// * `LwError::IncompleteAssignment` if a parent has no value in `given`
    pub fn probability(&self, given: &Assignment, value: bool) -> Result<f64> {
        let missing: Vec<String> = self.parents.iter().filter(|p| !given.contains(p)).cloned().collect();
        if !missing.is_empty() {
            return Err(LwError::IncompleteAssignment(missing));
        }

        let mut idx: Vec<usize> = self.parents.iter().filter_map(|p| given.get(p)).map(|v| v as usize).collect();
        idx.push(value as usize);

        Ok(self.table[&idx[..]])
    }

    /// Map a key over the full scope to an index into the table
    fn index(&self, key: &Assignment) -> Option<Vec<usize>> {
        self.parents
            .iter()
            .chain(std::iter::once(&self.var))
            .map(|name| key.get(name).map(|v| v as usize))
            .collect()
    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::util::ErrorKind;

    fn parents(names: &[&str]) -> Vec<String> {
        names.iter().map(|&n| String::from(n)).collect()
    }

    #[test]
    fn prior() {
        let cpt = Cpt::compile("cloudy", &[], &ProbabilityTable::prior("cloudy", 0.3)).unwrap();

        assert_eq!("cloudy", cpt.var());
        assert!(cpt.parents().is_empty());
        assert!((0.3 - cpt.probability(&Assignment::new(), true).unwrap()).abs() < f64::EPSILON);
        assert!((0.7 - cpt.probability(&Assignment::new(), false).unwrap()).abs() < f64::EPSILON);
    }

    #[test]
    fn conditional() {
        let tbl = ProbabilityTable::conditional(
            "wet_grass",
            &["sprinkler", "rain"],
            &[(&[true, true], 0.99), (&[true, false], 0.9), (&[false, true], 0.9), (&[false, false], 0.0)]
        );
        assert_eq!(8, tbl.len());

        let cpt = Cpt::compile("wet_grass", &parents(&["sprinkler", "rain"]), &tbl).unwrap();

        let given = Assignment::new().with("sprinkler", true).with("rain", false);
        assert!((0.9 - cpt.probability(&given, true).unwrap()).abs() < 1e-12);
        assert!((0.1 - cpt.probability(&given, false).unwrap()).abs() < 1e-12);

        // values for unrelated variables and for the variable itself are ignored
        let given = given.with("cloudy", true).with("wet_grass", false);
        assert!((0.9 - cpt.probability(&given, true).unwrap()).abs() < 1e-12);

        let given = Assignment::new().with("sprinkler", false).with("rain", false);
        assert_eq!(0.0, cpt.probability(&given, true).unwrap());
        assert_eq!(1.0, cpt.probability(&given, false).unwrap());
    }

    #[test]
    fn entry_order_is_irrelevant() {
        let tbl = ProbabilityTable::new()
            .with_entry(Assignment::new().with("rain", false).with("cloudy", false), 0.8)
            .with_entry(Assignment::new().with("cloudy", true).with("rain", true), 0.8)
            .with_entry(Assignment::new().with("rain", true).with("cloudy", false), 0.2)
            .with_entry(Assignment::new().with("cloudy", true).with("rain", false), 0.2);

        let cpt = Cpt::compile("rain", &parents(&["cloudy"]), &tbl).unwrap();
        let given = Assignment::new().with("cloudy", false);
        assert!((0.2 - cpt.probability(&given, true).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn incomplete_assignment() {
        let tbl = ProbabilityTable::conditional("rain", &["cloudy"], &[(&[true], 0.8), (&[false], 0.2)]);
        let cpt = Cpt::compile("rain", &parents(&["cloudy"]), &tbl).unwrap();

        match cpt.probability(&Assignment::new(), true) {
            Err(LwError::IncompleteAssignment(names)) => assert_eq!(vec![String::from("cloudy")], names),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn missing_entry() {
        // P(rain | cloudy = false) was never given
        let tbl = ProbabilityTable::new()
            .with_entry(Assignment::new().with("cloudy", true).with("rain", true), 0.8)
            .with_entry(Assignment::new().with("cloudy", true).with("rain", false), 0.2)
            .with_entry(Assignment::new().with("cloudy", false).with("rain", true), 0.2);

        let err = Cpt::compile("rain", &parents(&["cloudy"]), &tbl).unwrap_err();
        assert_eq!(ErrorKind::Configuration, err.kind());
        match err {
            LwError::MissingEntry { var, key } => {
                assert_eq!("rain", var);
                assert_eq!("{cloudy=false, rain=false}", key);
            },
            other => panic!("wrong error type {:?}", other)
        }
    }

    #[test]
    fn duplicate_entry() {
        let tbl = ProbabilityTable::new()
            .with_entry(Assignment::new().with("cloudy", true).with("rain", true), 0.8)
            .with_entry(Assignment::new().with("cloudy", true).with("rain", false), 0.2)
            .with_entry(Assignment::new().with("cloudy", false).with("rain", true), 0.2)
            .with_entry(Assignment::new().with("cloudy", false).with("rain", true), 0.8);

        match Cpt::compile("rain", &parents(&["cloudy"]), &tbl) {
            Err(LwError::DuplicateEntry { key, .. }) => assert_eq!("{cloudy=false, rain=true}", key),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn rows_must_sum_to_one() {
        let tbl = ProbabilityTable::new()
            .with_entry(Assignment::new().with("sprinkler", true), 0.5)
            .with_entry(Assignment::new().with("sprinkler", false), 0.88);

        match Cpt::compile("sprinkler", &[], &tbl) {
            Err(LwError::NotACPD { sum, .. }) => assert!((sum - 1.38).abs() < 1e-9),
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn probability_out_of_range() {
        let tbl = ProbabilityTable::new()
            .with_entry(Assignment::new().with("a", true), 1.5)
            .with_entry(Assignment::new().with("a", false), -0.5);

        match Cpt::compile("a", &[], &tbl) {
            Err(LwError::InvalidProbability { value, .. }) => assert_eq!(1.5, value),
            other => panic!("unexpected result {:?}", other)
        }

        let tbl = ProbabilityTable::new()
            .with_entry(Assignment::new().with("a", true), f64::NAN)
            .with_entry(Assignment::new().with("a", false), 0.5);
        assert!(Cpt::compile("a", &[], &tbl).is_err());
    }

    #[test]
    fn invalid_scope() {
        // key mentions a variable that is not a parent
        let tbl = ProbabilityTable::prior("a", 0.5)
            .with_entry(Assignment::new().with("a", true).with("z", true), 0.5);
        match Cpt::compile("a", &[], &tbl) {
            Err(LwError::InvalidScope { var, .. }) => assert_eq!("a", var),
            other => panic!("unexpected result {:?}", other)
        }

        // key is missing a parent
        let tbl = ProbabilityTable::prior("a", 0.5);
        assert!(Cpt::compile("a", &parents(&["b"]), &tbl).is_err());
    }

}
