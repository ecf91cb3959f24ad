/*!
Arithmetic evaluation, for `is/2` and the numeric comparisons.

An expression term reduces recursively:
- A number is its own value.
- A variable is dereferenced and its value evaluated; an unbound variable is an instantiation error.
- A compound with an arithmetic functor evaluates its arguments and applies the operation.

Anything else --- an atom, a string, a compound with no arithmetic reading --- is reported, not failed: evaluation errors abort the current solution stream rather than driving backtracking.

The integer/float discipline lives with [Number](crate::structures::number::Number); see there for the behavior of `/`, `//`, `mod`, and `**`.
*/

use crate::{
    db::bindings::BindingDB,
    structures::{number::Number, term::Term},
    types::err::{ErrorKind, EvaluateError},
};

/// Reduces `expression` to a number under the current bindings.
pub fn evaluate(bindings: &BindingDB, expression: &Term) -> Result<Number, ErrorKind> {
    match bindings.dereference(expression) {
        Term::Number(n) => Ok(*n),

        Term::Variable(_) => Err(EvaluateError::Instantiation.into()),

        Term::Atom(name) => Err(EvaluateError::NotNumeric {
            term: name.to_string(),
        }
        .into()),

        Term::Str(s) => Err(EvaluateError::NotNumeric {
            term: format!("\"{s}\""),
        }
        .into()),

        Term::Compound(c) => {
            let operation = match (c.functor.as_str(), c.args.len()) {
                ("+", 2) => Number::add,
                ("-", 2) => Number::sub,
                ("*", 2) => Number::mul,
                ("/", 2) => Number::div,
                ("//", 2) => Number::int_div,
                ("mod", 2) => Number::modulo,
                ("**", 2) => Number::pow,
                ("min", 2) => Number::min,
                ("max", 2) => Number::max,

                ("-", 1) => {
                    let operand = evaluate(bindings, &c.args[0])?;
                    return operand.neg().map_err(ErrorKind::from);
                }
                ("+", 1) => return evaluate(bindings, &c.args[0]),
                ("abs", 1) => {
                    let operand = evaluate(bindings, &c.args[0])?;
                    return operand.abs().map_err(ErrorKind::from);
                }

                (name, arity) => {
                    log::trace!(target: crate::misc::log::targets::EVALUATE, "No arithmetic reading of {name}/{arity}");
                    return Err(EvaluateError::UnknownFunction {
                        name: name.to_string(),
                        arity,
                    }
                    .into());
                }
            };

            let left = evaluate(bindings, &c.args[0])?;
            let right = evaluate(bindings, &c.args[1])?;
            operation(left, right).map_err(ErrorKind::from)
        }
    }
}
