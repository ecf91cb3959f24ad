/*!
Reports from a query.

A [Solution] is the consumer-facing record of one way a goal holds: the named
variables of the query, each with the value it had at the moment the goal
succeeded.
Values are deep copies resolved against the environment, so a solution stays
meaningful after the engine has backtracked past the state which produced it.
*/

use crate::structures::term::{format_term, Term};

/// One solution of a query: the query's named variables and their values.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    bindings: Vec<(String, Term)>,
}

impl Solution {
    pub(crate) fn new(bindings: Vec<(String, Term)>) -> Self {
        Solution { bindings }
    }

    /// True if the query named no variables.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// A count of the named variables.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// The value of a variable, by its source-level name.
    pub fn value(&self, name: &str) -> Option<&Term> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, term)| term)
    }

    /// The bindings, in order of first occurrence in the query.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.bindings
            .iter()
            .map(|(name, term)| (name.as_str(), term))
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.bindings.is_empty() {
            return write!(f, "true");
        }

        let rendered = self
            .bindings
            .iter()
            .map(|(name, term)| format!("{name} = {}", format_term(term, 999)))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{rendered}")
    }
}
