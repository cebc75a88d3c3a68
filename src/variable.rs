//! Definition of the variable module
//!
//! Every random variable in a network is boolean and is identified by its name. An
//! `Assignment` maps variable names to values. Assignments are kept in a canonical (sorted)
//! order, so two assignments holding the same pairs are equal and hash identically no matter
//! the order in which the pairs were set.

use itertools::Itertools;

use std::collections::BTreeMap;
use std::fmt;
use std::iter::FromIterator;

/// A partial or complete assignment of boolean values to named variables.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Assignment {
    values: BTreeMap<String, bool>
}

/// Observed values, fixed for the duration of a query
pub type Evidence = Assignment;

impl Assignment {

    /// Construct an empty `Assignment`
    pub fn new() -> Self {
        Assignment { values: BTreeMap::new() }
    }

    /// Set `name` to `value`, replacing any existing value
    pub fn set(&mut self, name: &str, value: bool) {
        self.values.insert(String::from(name), value);
    }

    /// Builder form of `set`
    pub fn with(mut self, name: &str, value: bool) -> Self {
        self.set(name, value);
        self
    }

    /// Remove `name` from the assignment
    pub fn unset(&mut self, name: &str) {
        self.values.remove(name);
    }

    /// The value of `name`, if it is assigned
    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the `(name, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The assigned names, in canonical order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    /// Check that every variable in `evidence` is assigned here, to the same value.
    pub fn is_consistent_with(&self, evidence: &Assignment) -> bool {
        evidence.iter().all(|(name, value)| self.get(name) == Some(value))
    }

}

impl FromIterator<(String, bool)> for Assignment {

    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Assignment { values: iter.into_iter().collect() }
    }

}

impl<'a> FromIterator<(&'a str, bool)> for Assignment {

    fn from_iter<I: IntoIterator<Item = (&'a str, bool)>>(iter: I) -> Self {
        Assignment { values: iter.into_iter().map(|(k, v)| (String::from(k), v)).collect() }
    }

}

impl fmt::Display for Assignment {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pairs = self.values.iter().map(|(k, v)| format!("{}={}", k, v)).join(", ");
        write!(f, "{{{}}}", pairs)
    }

}


/// Enumerate the outcome space of a set of variables: every complete assignment of boolean
/// values to `names`.
///
/// The space is built one variable at a time. Each partial assignment accumulated so far is
/// extended twice, once with the variable `true` and once `false`.
///
/// # Args
/// * `names`: the variables to enumerate. Repeated names are only enumerated once.
///
/// # Returns
/// ```2^k``` distinct assignments, where ```k``` is the number of distinct names. An empty set
/// of names yields a single, empty assignment.
pub fn all_assignments<S: AsRef<str>>(names: &[S]) -> Vec<Assignment> {
    let mut rows = vec![Assignment::new()];

    for name in names.iter().map(|n| n.as_ref()).unique() {
        let mut extended = Vec::with_capacity(rows.len() * 2);

        for row in rows.iter() {
            for &value in [true, false].iter() {
                extended.push(row.clone().with(name, value));
            }
        }

        rows = extended;
    }

    rows
}


#[cfg(test)]
mod tests {

    use super::*;

    use std::collections::HashSet;

    #[test]
    fn canonical_order() {
        let mut a = Assignment::new();
        a.set("rain", true);
        a.set("cloudy", false);

        let b: Assignment = vec![("cloudy", false), ("rain", true)].into_iter().collect();

        assert_eq!(a, b);
        assert_eq!(vec!["cloudy", "rain"], a.names().collect::<Vec<_>>());

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn set_get_unset() {
        let mut a = Assignment::new();
        assert_eq!(None, a.get("foo"));
        assert!(a.is_empty());

        a.set("foo", true);
        assert_eq!(Some(true), a.get("foo"));

        a.set("foo", false);
        assert_eq!(Some(false), a.get("foo"));
        assert_eq!(1, a.len());

        a.unset("foo");
        assert!(!a.contains("foo"));
    }

    #[test]
    fn consistency() {
        let key = Assignment::new().with("a", true).with("b", false).with("c", true);

        assert!(key.is_consistent_with(&Assignment::new()));
        assert!(key.is_consistent_with(&Assignment::new().with("a", true)));
        assert!(key.is_consistent_with(&Assignment::new().with("a", true).with("b", false)));
        assert!(!key.is_consistent_with(&Assignment::new().with("b", true)));
        assert!(!key.is_consistent_with(&Assignment::new().with("d", true)));
    }

    #[test]
    fn display() {
        let a = Assignment::new().with("wet_grass", true).with("cloudy", false);
        assert_eq!("{cloudy=false, wet_grass=true}", a.to_string());
        assert_eq!("{}", Assignment::new().to_string());
    }

    #[test]
    fn empty_outcome_space() {
        let names: Vec<&str> = vec![];
        let space = all_assignments(&names);

        assert_eq!(1, space.len());
        assert!(space[0].is_empty());
    }

    #[test]
    fn outcome_space_sizes() {
        let names = vec!["a", "b", "c", "d", "e"];

        for k in 0..names.len() + 1 {
            let scope = &names[..k];
            let space = all_assignments(scope);

            assert_eq!(1 << k, space.len());

            let distinct: HashSet<&Assignment> = space.iter().collect();
            assert_eq!(space.len(), distinct.len());

            for a in space.iter() {
                assert_eq!(k, a.len());
                assert!(scope.iter().all(|n| a.contains(n)));
            }
        }
    }

    #[test]
    fn outcome_space_repeated_names() {
        let space = all_assignments(&["a", "b", "a"]);
        assert_eq!(4, space.len());
    }

}
