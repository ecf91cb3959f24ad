/*!
Clauses --- facts and rules.

A clause pairs a head term with a body goal.
A fact is a clause whose body is the atom `true`, so `parent(tom, bob).` and `parent(tom, bob) :- true.` store identically.

A clause read from source is immutable once stored.
Dynamic updates add or remove whole clauses, never mutate one in place.
*/

use crate::structures::term::Term;

/// A stored clause: a head and a body goal.
#[derive(Clone, Debug, PartialEq)]
pub struct Clause {
    /// The head. Always an atom or a compound.
    pub head: Term,

    /// The body goal. The atom `true` for a fact.
    pub body: Term,
}

impl Clause {
    /// A fact, i.e. a clause with the body `true`.
    pub fn fact(head: Term) -> Self {
        Clause {
            head,
            body: Term::atom("true"),
        }
    }

    /// A rule with the given head and body.
    pub fn rule(head: Term, body: Term) -> Self {
        Clause { head, body }
    }

    /// Reads a clause from a term: `Head :- Body` becomes a rule, any other callable term a fact.
    ///
    /// None if the head is not callable.
    pub fn from_term(term: &Term) -> Option<Clause> {
        match term.name_arity() {
            Some((":-", 2)) => {
                let Term::Compound(c) = term else {
                    unreachable!("arity two implies a compound");
                };
                if c.args[0].is_callable() {
                    Some(Clause::rule(c.args[0].clone(), c.args[1].clone()))
                } else {
                    None
                }
            }
            Some(_) => Some(Clause::fact(term.clone())),
            None => None,
        }
    }

    /// True if the body is the atom `true`.
    pub fn is_fact(&self) -> bool {
        matches!(&self.body, Term::Atom(name) if name == "true")
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_fact() {
            write!(f, "{}.", self.head)
        } else {
            write!(f, "{} :- {}.", self.head, self.body)
        }
    }
}
