/*!
The built-in predicates.

[dispatch] offers a dereferenced goal to the built-ins by name and arity:
- `Ok(None)`: no built-in claims the goal; the machine resolves it against the clause database.
- `Ok(Some(true))` / `Ok(Some(false))`: the built-in ran and was met / was not met.
- `Err(_)`: the built-in ran and aborted the stream (instantiation, type, domain, or evaluation errors).

Every built-in dereferences its arguments before inspection, and each succeeds
at most once: alternatives on backtracking come only from the clause database
and from disjunction.
Trial bindings which must not survive --- those of `\=/2` and those made while
running the goal of `findall/3` --- are rewound here; bindings of a failed
`=/2` are left for the machine's choicepoint rewind, per the unification
contract.

`member/2` and `append/3` are not built in: they are ordinary clauses from the
[prelude](crate::builder::PRELUDE).
*/

use std::collections::HashMap;
use std::io::{Read, Write};

use smol_str::SmolStr;

use crate::{
    context::Context,
    db::{clause::ClausePosition, PredicateKey},
    procedures::{
        evaluate::evaluate,
        rename::rename_clause,
        solve::Machine,
        unify::{identical, unify},
    },
    structures::{clause::Clause, number::Number, term::Term},
    types::err::{ErrorKind, EvaluateError, SolveError},
};

/// Runs `goal` as a built-in, if one claims its name and arity.
pub fn dispatch(ctx: &mut Context, goal: &Term) -> Result<Option<bool>, ErrorKind> {
    let (name, args): (&str, &[Term]) = match goal {
        Term::Atom(name) => (name.as_str(), &[]),
        Term::Compound(c) => (c.functor.as_str(), c.args.as_slice()),
        _ => return Ok(None),
    };

    match (name, args.len()) {
        ("=", 2) => {
            let occurs = ctx.config.occurs_check.value;
            Ok(Some(unify(&mut ctx.bindings, occurs, &args[0], &args[1])))
        }

        ("\\=", 2) => {
            let mark = ctx.bindings.mark();
            let occurs = ctx.config.occurs_check.value;
            let unifiable = unify(&mut ctx.bindings, occurs, &args[0], &args[1]);
            ctx.bindings.rewind(mark);
            Ok(Some(!unifiable))
        }

        ("==", 2) => Ok(Some(identical(&ctx.bindings, &args[0], &args[1]))),

        ("\\==", 2) => Ok(Some(!identical(&ctx.bindings, &args[0], &args[1]))),

        ("is", 2) => {
            let value = evaluate(&ctx.bindings, &args[1])?;
            let occurs = ctx.config.occurs_check.value;
            Ok(Some(unify(
                &mut ctx.bindings,
                occurs,
                &args[0],
                &Term::Number(value),
            )))
        }

        ("=:=", 2) | ("=\\=", 2) | ("<", 2) | ("=<", 2) | (">", 2) | (">=", 2) => {
            compare(ctx, name, args)
        }

        ("var", 1) => Ok(Some(matches!(
            ctx.bindings.dereference(&args[0]),
            Term::Variable(_)
        ))),

        ("nonvar", 1) => Ok(Some(!matches!(
            ctx.bindings.dereference(&args[0]),
            Term::Variable(_)
        ))),

        ("atom", 1) => Ok(Some(matches!(
            ctx.bindings.dereference(&args[0]),
            Term::Atom(_)
        ))),

        ("number", 1) => Ok(Some(matches!(
            ctx.bindings.dereference(&args[0]),
            Term::Number(_)
        ))),

        ("integer", 1) => Ok(Some(matches!(
            ctx.bindings.dereference(&args[0]),
            Term::Number(Number::Int(_))
        ))),

        ("float", 1) => Ok(Some(matches!(
            ctx.bindings.dereference(&args[0]),
            Term::Number(Number::Float(_))
        ))),

        ("compound", 1) => Ok(Some(matches!(
            ctx.bindings.dereference(&args[0]),
            Term::Compound(_)
        ))),

        ("atomic", 1) => Ok(Some(matches!(
            ctx.bindings.dereference(&args[0]),
            Term::Atom(_) | Term::Number(_) | Term::Str(_)
        ))),

        ("functor", 3) => functor(ctx, args),

        ("arg", 3) => nth_arg(ctx, args),

        ("=..", 2) => univ(ctx, args),

        ("asserta", 1) => assert_clause(ctx, &args[0], ClausePosition::Front),

        ("assertz", 1) => assert_clause(ctx, &args[0], ClausePosition::Back),

        ("retract", 1) => retract(ctx, &args[0]),

        ("findall", 3) => findall(ctx, args),

        ("write", 1) => {
            print!("{}", ctx.bindings.resolve(&args[0]));
            let _ = std::io::stdout().flush();
            Ok(Some(true))
        }

        ("nl", 0) => {
            println!();
            Ok(Some(true))
        }

        ("tab", 1) => {
            let count = match evaluate(&ctx.bindings, &args[0])? {
                Number::Int(i) => i,
                found @ Number::Float(_) => {
                    return Err(EvaluateError::IntegerExpected {
                        found: found.to_string(),
                    }
                    .into())
                }
            };
            for _ in 0..count.max(0) {
                print!(" ");
            }
            let _ = std::io::stdout().flush();
            Ok(Some(true))
        }

        ("put_char", 1) => {
            let current = ctx.bindings.dereference(&args[0]);
            match current {
                Term::Atom(name) if name.chars().count() == 1 => {
                    print!("{name}");
                    let _ = std::io::stdout().flush();
                    Ok(Some(true))
                }
                Term::Variable(_) => Err(SolveError::Instantiation {
                    context: "put_char/1",
                }
                .into()),
                other => Err(SolveError::Type {
                    context: "put_char/1",
                    expected: "a one-character atom",
                    found: other.to_string(),
                }
                .into()),
            }
        }

        ("get_char", 1) => {
            let mut byte = [0u8; 1];
            let read = match std::io::stdin().read(&mut byte) {
                Ok(1) => Term::Atom(SmolStr::new((byte[0] as char).to_string())),
                _ => Term::atom("end_of_file"),
            };
            let occurs = ctx.config.occurs_check.value;
            Ok(Some(unify(&mut ctx.bindings, occurs, &args[0], &read)))
        }

        _ => Ok(None),
    }
}

/// The numeric comparisons: evaluate both sides, compare.
fn compare(ctx: &mut Context, name: &str, args: &[Term]) -> Result<Option<bool>, ErrorKind> {
    use std::cmp::Ordering;

    let left = evaluate(&ctx.bindings, &args[0])?;
    let right = evaluate(&ctx.bindings, &args[1])?;

    let met = match left.compare(right) {
        None => false,
        Some(ordering) => match name {
            "=:=" => ordering == Ordering::Equal,
            "=\\=" => ordering != Ordering::Equal,
            "<" => ordering == Ordering::Less,
            "=<" => ordering != Ordering::Greater,
            ">" => ordering == Ordering::Greater,
            ">=" => ordering != Ordering::Less,
            _ => unreachable!("dispatched on comparison names"),
        },
    };
    Ok(Some(met))
}

/// `functor(?T, ?Name, ?Arity)`: decompose a bound term, or construct one from
/// a name and arity.
fn functor(ctx: &mut Context, args: &[Term]) -> Result<Option<bool>, ErrorKind> {
    let occurs = ctx.config.occurs_check.value;
    let term = ctx.bindings.dereference(&args[0]).clone();

    match term {
        Term::Compound(c) => {
            let name = Term::Atom(c.functor.clone());
            let arity = Term::int(c.args.len() as i64);
            Ok(Some(
                unify(&mut ctx.bindings, occurs, &args[1], &name)
                    && unify(&mut ctx.bindings, occurs, &args[2], &arity),
            ))
        }

        Term::Variable(_) => {
            let name = ctx.bindings.dereference(&args[1]).clone();
            let arity = match ctx.bindings.dereference(&args[2]) {
                Term::Number(Number::Int(i)) => *i,
                Term::Variable(_) => {
                    return Err(SolveError::Instantiation {
                        context: "functor/3",
                    }
                    .into())
                }
                other => {
                    return Err(SolveError::Type {
                        context: "functor/3",
                        expected: "an integer",
                        found: other.to_string(),
                    }
                    .into())
                }
            };

            if arity < 0 {
                return Err(SolveError::Domain {
                    context: "functor/3",
                    expected: "a non-negative integer",
                    found: arity.to_string(),
                }
                .into());
            }

            if arity == 0 {
                match name {
                    Term::Variable(_) => Err(SolveError::Instantiation {
                        context: "functor/3",
                    }
                    .into()),
                    atomic => Ok(Some(unify(&mut ctx.bindings, occurs, &args[0], &atomic))),
                }
            } else {
                let Term::Atom(functor) = name else {
                    return Err(SolveError::Type {
                        context: "functor/3",
                        expected: "an atom",
                        found: name.to_string(),
                    }
                    .into());
                };
                let fresh_args = (0..arity)
                    .map(|_| Term::Variable(ctx.bindings.fresh_variable()))
                    .collect();
                let constructed = Term::compound(&functor, fresh_args);
                Ok(Some(unify(
                    &mut ctx.bindings,
                    occurs,
                    &args[0],
                    &constructed,
                )))
            }
        }

        atomic => Ok(Some(
            unify(&mut ctx.bindings, occurs, &args[1], &atomic)
                && unify(&mut ctx.bindings, occurs, &args[2], &Term::int(0)),
        )),
    }
}

/// `arg(+N, +T, ?A)`: the Nth argument, one-based, of compound `T`.
fn nth_arg(ctx: &mut Context, args: &[Term]) -> Result<Option<bool>, ErrorKind> {
    let n = match ctx.bindings.dereference(&args[0]) {
        Term::Number(Number::Int(i)) => *i,
        Term::Variable(_) => {
            return Err(SolveError::Instantiation { context: "arg/3" }.into());
        }
        other => {
            return Err(SolveError::Type {
                context: "arg/3",
                expected: "an integer",
                found: other.to_string(),
            }
            .into())
        }
    };

    let term = ctx.bindings.dereference(&args[1]).clone();
    let Term::Compound(c) = term else {
        return match term {
            Term::Variable(_) => Err(SolveError::Instantiation { context: "arg/3" }.into()),
            other => Err(SolveError::Type {
                context: "arg/3",
                expected: "a compound",
                found: other.to_string(),
            }
            .into()),
        };
    };

    if n < 1 {
        return Err(SolveError::Domain {
            context: "arg/3",
            expected: "a positive integer",
            found: n.to_string(),
        }
        .into());
    }

    match c.args.get((n - 1) as usize) {
        None => Ok(Some(false)),
        Some(argument) => {
            let argument = argument.clone();
            let occurs = ctx.config.occurs_check.value;
            Ok(Some(unify(&mut ctx.bindings, occurs, &args[2], &argument)))
        }
    }
}

/// `=..(?T, ?List)`: `T` and `[Name|Args]` are equivalent.
fn univ(ctx: &mut Context, args: &[Term]) -> Result<Option<bool>, ErrorKind> {
    let occurs = ctx.config.occurs_check.value;
    let term = ctx.bindings.dereference(&args[0]).clone();

    match term {
        Term::Compound(c) => {
            let mut elements = vec![Term::Atom(c.functor.clone())];
            elements.extend(c.args.iter().cloned());
            let list = Term::list(elements);
            Ok(Some(unify(&mut ctx.bindings, occurs, &args[1], &list)))
        }

        Term::Variable(_) => {
            let elements = proper_list(ctx, &args[1], "=../2")?;
            let Some((head, rest)) = elements.split_first() else {
                return Err(SolveError::Domain {
                    context: "=../2",
                    expected: "a non-empty list",
                    found: "[]".to_string(),
                }
                .into());
            };

            if rest.is_empty() {
                match head {
                    Term::Variable(_) => {
                        Err(SolveError::Instantiation { context: "=../2" }.into())
                    }
                    Term::Compound(_) => Err(SolveError::Type {
                        context: "=../2",
                        expected: "an atomic term",
                        found: head.to_string(),
                    }
                    .into()),
                    atomic => Ok(Some(unify(&mut ctx.bindings, occurs, &args[0], atomic))),
                }
            } else {
                let Term::Atom(functor) = head else {
                    return Err(SolveError::Type {
                        context: "=../2",
                        expected: "an atom",
                        found: head.to_string(),
                    }
                    .into());
                };
                let constructed = Term::compound(functor, rest.to_vec());
                Ok(Some(unify(
                    &mut ctx.bindings,
                    occurs,
                    &args[0],
                    &constructed,
                )))
            }
        }

        atomic => {
            let list = Term::list(vec![atomic]);
            Ok(Some(unify(&mut ctx.bindings, occurs, &args[1], &list)))
        }
    }
}

/// The elements of a proper list, dereferencing each cell.
fn proper_list(ctx: &Context, term: &Term, context: &'static str) -> Result<Vec<Term>, ErrorKind> {
    let mut elements = Vec::default();
    let mut tail = ctx.bindings.dereference(term).clone();

    loop {
        match tail {
            Term::Atom(ref name) if name == "[]" => return Ok(elements),

            Term::Compound(ref c) if c.functor == "." && c.args.len() == 2 => {
                elements.push(ctx.bindings.dereference(&c.args[0]).clone());
                tail = ctx.bindings.dereference(&c.args[1]).clone();
            }

            Term::Variable(_) => return Err(SolveError::Instantiation { context }.into()),

            other => {
                return Err(SolveError::Type {
                    context,
                    expected: "a list",
                    found: other.to_string(),
                }
                .into())
            }
        }
    }
}

/// `asserta/1` and `assertz/1`: store a copy of the clause, resolved under the
/// current bindings with fresh variables for anything unbound.
fn assert_clause(
    ctx: &mut Context,
    term: &Term,
    position: ClausePosition,
) -> Result<Option<bool>, ErrorKind> {
    let mut map = HashMap::default();
    let copied = ctx.bindings.copy_term(term, &mut map);

    let Some(clause) = Clause::from_term(&copied) else {
        return match copied {
            Term::Variable(_) => Err(SolveError::Instantiation { context: "assert/1" }.into()),
            other => Err(SolveError::Type {
                context: "assert/1",
                expected: "a callable term",
                found: other.to_string(),
            }
            .into()),
        };
    };
    let Some(key) = PredicateKey::of_term(&clause.head) else {
        return Err(SolveError::Type {
            context: "assert/1",
            expected: "a callable head",
            found: clause.head.to_string(),
        }
        .into());
    };

    ctx.clause_db.add(key, clause, position);
    ctx.counters.clauses_added += 1;
    Ok(Some(true))
}

/// `retract(?Clause)`: removes the first stored clause whose renamed head and
/// body unify with the argument. Succeeds at most once.
fn retract(ctx: &mut Context, arg: &Term) -> Result<Option<bool>, ErrorKind> {
    let target = ctx.bindings.dereference(arg).clone();

    let (head, body) = match target.name_arity() {
        Some((":-", 2)) => {
            let Term::Compound(c) = &target else {
                unreachable!("arity two implies a compound");
            };
            (c.args[0].clone(), c.args[1].clone())
        }
        Some(_) => (target.clone(), Term::atom("true")),
        None => {
            return match target {
                Term::Variable(_) => {
                    Err(SolveError::Instantiation { context: "retract/1" }.into())
                }
                other => Err(SolveError::Type {
                    context: "retract/1",
                    expected: "a callable term",
                    found: other.to_string(),
                }
                .into()),
            }
        }
    };

    let Some(key) = PredicateKey::of_term(ctx.bindings.dereference(&head)) else {
        return Err(SolveError::Instantiation { context: "retract/1" }.into());
    };

    let clauses = ctx.clause_db.snapshot(&key);
    let occurs = ctx.config.occurs_check.value;

    for (position, clause) in clauses.iter().enumerate() {
        let mark = ctx.bindings.mark();
        ctx.counters.total_renames += 1;
        let renamed = rename_clause(&mut ctx.bindings, clause);

        if unify(&mut ctx.bindings, occurs, &head, &renamed.head)
            && unify(&mut ctx.bindings, occurs, &body, &renamed.body)
        {
            ctx.clause_db.remove(&key, position);
            return Ok(Some(true));
        }
        ctx.bindings.rewind(mark);
    }

    Ok(Some(false))
}

/// `findall(?Template, +Goal, -List)`: collects an instance of the template
/// for every solution of the goal.
///
/// The goal runs in a protected scope: a mark is taken before the first
/// solution and rewound after the last, so of the work done here only the
/// binding of `List` is visible to the caller.
/// Instances are copied out with fresh variables before the rewind.
fn findall(ctx: &mut Context, args: &[Term]) -> Result<Option<bool>, ErrorKind> {
    let template = args[0].clone();
    let goal = args[1].clone();

    let mark = ctx.bindings.mark();
    let mut machine = Machine::for_goal(goal);

    let collected: Result<Vec<Term>, ErrorKind> = (|| {
        let mut instances = Vec::default();
        while machine.next_solution(ctx)?.is_some() {
            let mut map = HashMap::default();
            instances.push(ctx.bindings.copy_term(&template, &mut map));
        }
        Ok(instances)
    })();

    ctx.bindings.rewind(mark);
    let instances = collected?;

    let list = Term::list(instances);
    let occurs = ctx.config.occurs_check.value;
    Ok(Some(unify(&mut ctx.bindings, occurs, &args[2], &list)))
}
