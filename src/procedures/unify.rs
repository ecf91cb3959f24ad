/*!
Unification, and the structural comparison behind `==/2`.

[unify] attempts to make two terms identical under the current bindings.
Bindings made along the way are trailed and left in place on failure: the caller
is responsible for rewinding to a mark taken before the call.
Every choicepoint in the solve machine takes such a mark, so a failed head
unification is always undone before the next clause is tried.

The occurs-check is optional, per the context configuration.
With it enabled, binding a variable to a term containing that variable fails
instead of building a term which loops under later dereference.
*/

use crate::{
    db::bindings::BindingDB,
    structures::term::{Term, Variable},
};

/// Attempts to make `left` and `right` identical by binding variables.
///
/// On success new bindings are in place (and trailed).
/// On failure any partial bindings remain: rewind to a mark taken before the call.
pub fn unify(bindings: &mut BindingDB, occurs_check: bool, left: &Term, right: &Term) -> bool {
    let mut queue = vec![(left.clone(), right.clone())];

    while let Some((a, b)) = queue.pop() {
        let a = bindings.dereference(&a).clone();
        let b = bindings.dereference(&b).clone();

        match (a, b) {
            (Term::Variable(x), Term::Variable(y)) if x == y => {}

            (Term::Variable(x), t) | (t, Term::Variable(x)) => {
                if occurs_check && occurs(bindings, x, &t) {
                    log::trace!(target: crate::misc::log::targets::UNIFY, "Occurs check: _G{x} in {t}");
                    return false;
                }
                bindings.bind(x, t);
            }

            (Term::Atom(p), Term::Atom(q)) => {
                if p != q {
                    return false;
                }
            }

            (Term::Number(p), Term::Number(q)) => {
                if p != q {
                    return false;
                }
            }

            (Term::Str(p), Term::Str(q)) => {
                if p != q {
                    return false;
                }
            }

            (Term::Compound(p), Term::Compound(q)) => {
                if p.functor != q.functor || p.args.len() != q.args.len() {
                    return false;
                }
                for pair in p.args.iter().cloned().zip(q.args.iter().cloned()) {
                    queue.push(pair);
                }
            }

            _ => return false,
        }
    }

    true
}

/// True if `variable` occurs in `term` under the current bindings.
pub fn occurs(bindings: &BindingDB, variable: Variable, term: &Term) -> bool {
    match bindings.dereference(term) {
        Term::Variable(v) => *v == variable,
        Term::Compound(c) => c.args.iter().any(|arg| occurs(bindings, variable, arg)),
        _ => false,
    }
}

/// Structural equality of two terms under the current bindings, without unifying.
///
/// Two unbound variables are identical only when they are the same variable.
pub fn identical(bindings: &BindingDB, left: &Term, right: &Term) -> bool {
    let a = bindings.dereference(left);
    let b = bindings.dereference(right);

    match (a, b) {
        (Term::Variable(x), Term::Variable(y)) => x == y,
        (Term::Atom(p), Term::Atom(q)) => p == q,
        (Term::Number(p), Term::Number(q)) => p == q,
        (Term::Str(p), Term::Str(q)) => p == q,
        (Term::Compound(p), Term::Compound(q)) => {
            p.functor == q.functor
                && p.args.len() == q.args.len()
                && p.args
                    .iter()
                    .zip(q.args.iter())
                    .all(|(x, y)| identical(bindings, x, y))
        }
        _ => false,
    }
}
