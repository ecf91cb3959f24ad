/*!
The clause database --- the stored program.

Clauses are grouped by [predicate key](crate::db::PredicateKey) and kept in insertion order within each group.
That order is the resolution order: a goal tries its predicate's clauses first to last.
Predicates themselves are listed in first-definition order, which keeps program listings stable.

The database is mutable only through whole-clause operations: `assertz/1` appends to a predicate, `asserta/1` prepends, `retract/1` removes one clause.
Stored clauses are shared behind [Rc] so a predicate call can snapshot its clause list cheaply --- a call resolves against the clauses present when it started, and later database updates affect only later calls.
*/

use std::collections::HashMap;
use std::rc::Rc;

use crate::{
    db::PredicateKey,
    structures::clause::Clause,
};

/// Where to place a clause within its predicate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClausePosition {
    /// Before all existing clauses, as `asserta/1` does.
    Front,

    /// After all existing clauses, as `assertz/1` and `load` do.
    Back,
}

/// The clauses of a single predicate, in resolution order.
pub struct Predicate {
    pub key: PredicateKey,
    pub clauses: Vec<Rc<Clause>>,
}

/// A structure to hold the stored program.
#[derive(Default)]
pub struct ClauseDB {
    /// Predicates in first-definition order.
    predicates: Vec<Predicate>,

    /// Key to index in `predicates`.
    index: HashMap<PredicateKey, usize>,
}

impl ClauseDB {
    /// Stores `clause` under `key` at the given position.
    pub fn add(&mut self, key: PredicateKey, clause: Clause, position: ClausePosition) {
        log::trace!(target: crate::misc::log::targets::CLAUSE_DB, "Storing {clause} under {key}");

        let index = match self.index.get(&key) {
            Some(index) => *index,
            None => {
                let index = self.predicates.len();
                self.predicates.push(Predicate {
                    key: key.clone(),
                    clauses: Vec::default(),
                });
                self.index.insert(key, index);
                index
            }
        };

        let clauses = &mut self.predicates[index].clauses;
        match position {
            ClausePosition::Front => clauses.insert(0, Rc::new(clause)),
            ClausePosition::Back => clauses.push(Rc::new(clause)),
        }
    }

    /// The clauses stored under `key`, in resolution order.
    pub fn matching(&self, key: &PredicateKey) -> Option<&[Rc<Clause>]> {
        self.index
            .get(key)
            .map(|index| self.predicates[*index].clauses.as_slice())
    }

    /// A snapshot of the clauses stored under `key`, for resolution against a fixed clause list.
    pub fn snapshot(&self, key: &PredicateKey) -> Vec<Rc<Clause>> {
        match self.matching(key) {
            Some(clauses) => clauses.to_vec(),
            None => Vec::default(),
        }
    }

    /// Removes the clause at `position` within the predicate of `key`, returning it.
    pub fn remove(&mut self, key: &PredicateKey, position: usize) -> Option<Rc<Clause>> {
        let index = *self.index.get(key)?;
        let clauses = &mut self.predicates[index].clauses;
        if position < clauses.len() {
            Some(clauses.remove(position))
        } else {
            None
        }
    }

    /// An iterator over all predicates, in first-definition order.
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }

    /// A count of all stored clauses.
    pub fn clause_count(&self) -> usize {
        self.predicates.iter().map(|p| p.clauses.len()).sum()
    }

    /// A count of all predicates, including any emptied by `retract/1`.
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// Forgets all clauses.
    pub fn clear(&mut self) {
        self.predicates.clear();
        self.index.clear();
    }
}
