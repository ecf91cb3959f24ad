/*!
The binding store --- the mutable substitution under which goals are proved.

Each variable is a u32 index into a vector of optional terms.
A `None` slot is an unbound variable; a `Some` slot holds the bound term, which may itself be (or contain) further variables, so bindings form chains.
[dereference](BindingDB::dereference) follows such a chain until it reaches an unbound variable or a non-variable term.

Every [bind](BindingDB::bind) is recorded on the [trail](crate::db::trail).
Since only unbound variables are ever bound, the prior state of a trailed variable is always "unbound", and a [rewind](BindingDB::rewind) simply clears each slot recorded after the mark, in reverse order.
No path compression is performed, so nothing beyond the trail is needed to restore an earlier state.

Fresh variables are allocated here as well, by pushing an unbound slot.
Identities are never reused: a rewind clears bindings but does not return identities, keeping renamed clauses disjoint for the lifetime of the context.
*/

use std::collections::HashMap;
use std::rc::Rc;

use crate::{
    db::trail::{Mark, Trail},
    structures::term::{Compound, Term, Variable},
};

/// The binding store, with its trail.
#[derive(Default)]
pub struct BindingDB {
    /// The value of each variable, indexed by identity.
    values: Vec<Option<Term>>,

    /// The trail of bindings, for rewinding.
    pub trail: Trail,
}

impl BindingDB {
    /// Allocates a fresh, unbound variable.
    pub fn fresh_variable(&mut self) -> Variable {
        let id = self.values.len() as Variable;
        self.values.push(None);
        id
    }

    /// A count of all variables allocated.
    pub fn variable_count(&self) -> usize {
        self.values.len()
    }

    /// The direct value of `variable`: a term, or None while unbound.
    pub fn lookup(&self, variable: Variable) -> Option<&Term> {
        self.values
            .get(variable as usize)
            .and_then(|slot| slot.as_ref())
    }

    /// Binds `variable` to `term` and records the binding on the trail.
    ///
    /// # Soundness
    /// `variable` must be unbound: rewinding restores a trailed variable to unbound, never to an earlier term.
    pub fn bind(&mut self, variable: Variable, term: Term) {
        debug_assert!(self.values[variable as usize].is_none());
        self.values[variable as usize] = Some(term);
        self.trail.record(variable);
    }

    /// Follows the binding chain from `term` to an unbound variable or a non-variable term.
    ///
    /// The walk is shallow: arguments of a compound are not themselves dereferenced.
    pub fn dereference<'t>(&'t self, term: &'t Term) -> &'t Term {
        let mut current = term;
        while let Term::Variable(v) = current {
            match self.lookup(*v) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// The current trail position.
    pub fn mark(&self) -> Mark {
        self.trail.mark()
    }

    /// Undoes every binding recorded after `mark`, in reverse order.
    pub fn rewind(&mut self, mark: Mark) {
        while let Some(variable) = self.trail.pop_above(mark) {
            self.values[variable as usize] = None;
        }
    }

    /// A deep copy of `term` under the current bindings.
    ///
    /// Bound variables are replaced by their values, recursively.
    /// Unbound variables remain as themselves, so the result is stable only until they are bound.
    pub fn resolve(&self, term: &Term) -> Term {
        let current = self.dereference(term);
        match current {
            Term::Compound(c) => Term::Compound(Rc::new(Compound {
                functor: c.functor.clone(),
                args: c.args.iter().map(|arg| self.resolve(arg)).collect(),
            })),
            other => other.clone(),
        }
    }

    /// A deep copy of `term` under the current bindings, with every unbound variable replaced by a fresh one.
    ///
    /// Variables shared within `term` remain shared in the copy, via `map`.
    /// The copy is independent of later bindings and later rewinds, which is what `findall/3` and `assert` require.
    pub fn copy_term(&mut self, term: &Term, map: &mut HashMap<Variable, Variable>) -> Term {
        let current = self.dereference(term).clone();
        match current {
            Term::Variable(v) => {
                if let Some(fresh) = map.get(&v) {
                    Term::Variable(*fresh)
                } else {
                    let fresh = self.fresh_variable();
                    map.insert(v, fresh);
                    Term::Variable(fresh)
                }
            }
            Term::Compound(c) => Term::Compound(Rc::new(Compound {
                functor: c.functor.clone(),
                args: c.args.iter().map(|arg| self.copy_term(arg, map)).collect(),
            })),
            other => other,
        }
    }

    /// Forgets all variables and the trail.
    pub fn clear(&mut self) {
        self.values.clear();
        self.trail.clear();
    }
}
