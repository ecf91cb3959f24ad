//! Keys to the clause database.

use smol_str::SmolStr;

use crate::structures::term::Term;

/// The identity of a predicate: a functor name paired with an arity.
///
/// All clauses stored under the same key belong to the same predicate, and an atom goal keys the predicate of arity zero.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PredicateKey {
    pub name: SmolStr,
    pub arity: usize,
}

impl PredicateKey {
    /// The key of a callable term, i.e. of an atom or compound.
    pub fn of_term(term: &Term) -> Option<PredicateKey> {
        match term {
            Term::Atom(name) => Some(PredicateKey {
                name: name.clone(),
                arity: 0,
            }),
            Term::Compound(c) => Some(PredicateKey {
                name: c.functor.clone(),
                arity: c.args.len(),
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for PredicateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}
