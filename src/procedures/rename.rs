/*!
Standardizing a clause apart.

Before a clause is used to resolve a goal, every variable in it is replaced by a
fresh variable from the binding store.
A per-call map keeps variables shared within the clause shared in the copy, and
two independent renames of the same clause share no variables at all --- fresh
identities are never reused across the lifetime of the context.

Stored clauses keep the variables the parser gave them, and those variables are
never bound directly: resolution only ever binds the fresh copies.
*/

use std::collections::HashMap;
use std::rc::Rc;

use crate::{
    db::bindings::BindingDB,
    structures::{
        clause::Clause,
        term::{Compound, Term, Variable},
    },
};

/// A copy of `clause` with every variable replaced by a fresh one.
pub fn rename_clause(bindings: &mut BindingDB, clause: &Clause) -> Clause {
    let mut map = HashMap::default();
    Clause {
        head: rename_term(bindings, &clause.head, &mut map),
        body: rename_term(bindings, &clause.body, &mut map),
    }
}

fn rename_term(
    bindings: &mut BindingDB,
    term: &Term,
    map: &mut HashMap<Variable, Variable>,
) -> Term {
    match term {
        Term::Variable(v) => {
            if let Some(fresh) = map.get(v) {
                Term::Variable(*fresh)
            } else {
                let fresh = bindings.fresh_variable();
                map.insert(*v, fresh);
                Term::Variable(fresh)
            }
        }

        Term::Compound(c) => Term::Compound(Rc::new(Compound {
            functor: c.functor.clone(),
            args: c
                .args
                .iter()
                .map(|arg| rename_term(bindings, arg, map))
                .collect(),
        })),

        other => other.clone(),
    }
}
