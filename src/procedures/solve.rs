/*!
The solve machine: enumerates, one at a time, every environment under which a goal is provable.

# Overview

A solve is a depth-first walk over the alternatives the program offers, with the
binding store as the single mutable environment and the trail as the means of
stepping back.

The machine holds two stacks:
- A goal stack: the conjunction still to prove, top first.
- A choicepoint stack: one entry per point where alternatives remain, each
  recording a trail mark, a snapshot of the goal stack, and the alternatives
  not yet tried (remaining clauses of a predicate, or the remaining branch of a
  disjunction).

Forward execution pops a goal and dispatches on it.
Control constructs (`,`, `;`, `->`, `\+`, `!`, `call/1`) are handled here;
everything else is offered to the [builtins](crate::procedures::builtins) and
otherwise resolved against the clause database: the machine pushes a
choicepoint over the predicate's clauses (a snapshot, in insertion order) and
seeks the first one whose renamed head unifies with the goal.

When a goal fails the machine backtracks: the top choicepoint is rewound to its
mark --- restoring the environment exactly --- its goal stack is reinstated, and
its next alternative is tried.
An empty goal stack is a solution; the machine suspends, and asking for the
next solution resumes by backtracking.

# Cut

Each goal entry carries a barrier: the height of the choicepoint stack at the
activation whose body the goal belongs to.
Dispatching `!` truncates the choicepoint stack to that barrier, which removes
the remaining clauses of the predicate and every alternative opened to the left
within the body, while leaving the caller's choicepoints intact.
Goals inside `\+`, `findall/3`, the condition of `->`, and `call/1` run with a
barrier of their own, so a cut inside them is local.

# Laziness and cancellation

[query](crate::context::Context::query) wraps a machine in an [Answers]
iterator.
Progress happens only when the consumer asks for the next solution, and the
`&mut` borrow of the context keeps a second query from starting mid-stream.
Dropping the iterator rewinds every binding the query made, so an abandoned
stream releases its trail and mark state unconditionally.
*/

use std::rc::Rc;

use smol_str::SmolStr;

use crate::{
    builder::parser::Parser,
    context::{Context, ContextState},
    db::{trail::Mark, PredicateKey},
    procedures::{builtins, rename::rename_clause, unify::unify},
    reports::Solution,
    structures::{
        clause::Clause,
        term::{Term, Variable},
    },
    types::err::ErrorKind,
};

/// A goal awaiting proof, with the cut barrier of the body it belongs to.
#[derive(Clone)]
struct GoalEntry {
    goal: Term,
    barrier: usize,
}

/// The alternatives a choicepoint has left to offer.
enum Alternative {
    /// Remaining clauses for a predicate call, tried in insertion order.
    Clauses {
        goal: Term,
        clauses: Vec<Rc<Clause>>,
        next: usize,
    },

    /// Remaining branches of a disjunction.
    Branches {
        branches: Vec<Term>,
        next: usize,
        barrier: usize,
    },
}

/// A point to which the machine can step back.
struct ChoicePoint {
    /// Trail position before any alternative was tried.
    mark: Mark,

    /// The goal stack to reinstate.
    goals: Vec<GoalEntry>,

    alternative: Alternative,
}

/// A machine enumerating the solutions of a single goal.
pub struct Machine {
    goals: Vec<GoalEntry>,
    choicepoints: Vec<ChoicePoint>,

    /// Set while suspended on a yielded solution; resuming backtracks first.
    yielded: bool,
}

impl Machine {
    /// A machine for `goal`, not yet advanced.
    pub fn for_goal(goal: Term) -> Self {
        Machine {
            goals: vec![GoalEntry { goal, barrier: 0 }],
            choicepoints: Vec::default(),
            yielded: false,
        }
    }

    /// Runs the machine to its next solution.
    ///
    /// On `Ok(Some(()))` the binding store holds the solution; the machine
    /// suspends until the next call, which backtracks into the remaining
    /// alternatives.
    /// `Ok(None)` means the alternatives are exhausted.
    pub fn next_solution(&mut self, ctx: &mut Context) -> Result<Option<()>, ErrorKind> {
        if self.yielded {
            self.yielded = false;
            ctx.counters.total_backtracks += 1;
            if !self.backtrack(ctx) {
                return Ok(None);
            }
        }

        loop {
            let Some(entry) = self.goals.pop() else {
                self.yielded = true;
                ctx.counters.total_solutions += 1;
                return Ok(Some(()));
            };

            ctx.counters.total_goals += 1;
            if !self.dispatch(ctx, entry)? {
                ctx.counters.total_backtracks += 1;
                if !self.backtrack(ctx) {
                    return Ok(None);
                }
            }
        }
    }

    /// Dispatches one goal.
    ///
    /// True to continue forward, false to seek an alternative.
    fn dispatch(&mut self, ctx: &mut Context, entry: GoalEntry) -> Result<bool, ErrorKind> {
        let goal = ctx.bindings.dereference(&entry.goal).clone();
        log::trace!(target: crate::misc::log::targets::SOLVE, "Goal: {goal}");

        match &goal {
            // An unbound goal is not callable. Uncallable goals fail silently.
            Term::Variable(_) | Term::Number(_) | Term::Str(_) => Ok(false),

            Term::Atom(name) => match name.as_str() {
                "true" => Ok(true),

                "fail" | "false" => Ok(false),

                "!" => {
                    self.choicepoints.truncate(entry.barrier);
                    Ok(true)
                }

                _ => self.call_goal(ctx, goal.clone()),
            },

            Term::Compound(c) => match (c.functor.as_str(), c.args.len()) {
                (",", 2) => {
                    self.goals.push(GoalEntry {
                        goal: c.args[1].clone(),
                        barrier: entry.barrier,
                    });
                    self.goals.push(GoalEntry {
                        goal: c.args[0].clone(),
                        barrier: entry.barrier,
                    });
                    Ok(true)
                }

                (";", 2) => {
                    if let Some((condition, then)) = as_if_then(ctx, &c.args[0]) {
                        self.if_then_else(ctx, condition, then, Some(c.args[1].clone()), entry.barrier)
                    } else {
                        self.choicepoints.push(ChoicePoint {
                            mark: ctx.bindings.mark(),
                            goals: self.goals.clone(),
                            alternative: Alternative::Branches {
                                branches: vec![c.args[0].clone(), c.args[1].clone()],
                                next: 0,
                                barrier: entry.barrier,
                            },
                        });
                        // Seek the first branch the way any alternative is sought.
                        Ok(false)
                    }
                }

                ("->", 2) => {
                    self.if_then_else(ctx, c.args[0].clone(), c.args[1].clone(), None, entry.barrier)
                }

                ("\\+", 1) => {
                    let mark = ctx.bindings.mark();
                    let proved = solve_first(ctx, c.args[0].clone());
                    ctx.bindings.rewind(mark);
                    Ok(!proved?)
                }

                ("call", 1) => {
                    // The called goal gets a barrier of its own: cut inside is local.
                    let barrier = self.choicepoints.len();
                    self.goals.push(GoalEntry {
                        goal: c.args[0].clone(),
                        barrier,
                    });
                    Ok(true)
                }

                _ => self.call_goal(ctx, goal.clone()),
            },
        }
    }

    /// Proves the first solution of `condition` and commits to it (soft cut),
    /// continuing with `then`; on no solution, rewinds and continues with
    /// `otherwise`, failing if there is none.
    fn if_then_else(
        &mut self,
        ctx: &mut Context,
        condition: Term,
        then: Term,
        otherwise: Option<Term>,
        barrier: usize,
    ) -> Result<bool, ErrorKind> {
        let mark = ctx.bindings.mark();

        match solve_first(ctx, condition) {
            Err(e) => {
                ctx.bindings.rewind(mark);
                Err(e)
            }

            Ok(true) => {
                self.goals.push(GoalEntry { goal: then, barrier });
                Ok(true)
            }

            Ok(false) => {
                ctx.bindings.rewind(mark);
                match otherwise {
                    Some(goal) => {
                        self.goals.push(GoalEntry { goal, barrier });
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
        }
    }

    /// Dispatches a goal which is not a control construct: a built-in, or a
    /// call to be resolved against the clause database.
    fn call_goal(&mut self, ctx: &mut Context, goal: Term) -> Result<bool, ErrorKind> {
        if let Some(met) = builtins::dispatch(ctx, &goal)? {
            return Ok(met);
        }

        let Some(key) = PredicateKey::of_term(&goal) else {
            return Ok(false);
        };

        let clauses = ctx.clause_db.snapshot(&key);
        if clauses.is_empty() {
            log::trace!(target: crate::misc::log::targets::SOLVE, "No clauses for {key}");
            return Ok(false);
        }

        self.choicepoints.push(ChoicePoint {
            mark: ctx.bindings.mark(),
            goals: self.goals.clone(),
            alternative: Alternative::Clauses {
                goal,
                clauses,
                next: 0,
            },
        });
        Ok(false)
    }

    /// Steps back to the most recent choicepoint with an alternative left.
    ///
    /// Rewinds the trail to each choicepoint's mark before trying its
    /// alternatives, so the environment state is fully restored between
    /// independent choices.
    /// False when every choicepoint is exhausted.
    fn backtrack(&mut self, ctx: &mut Context) -> bool {
        loop {
            let Some(mut cp) = self.choicepoints.pop() else {
                return false;
            };
            ctx.bindings.rewind(cp.mark);

            // With the choicepoint popped, its own index is the barrier for
            // goals it introduces: a cut to that height removes it.
            let barrier = self.choicepoints.len();

            let resumed = match cp.alternative {
                Alternative::Clauses {
                    ref goal,
                    ref clauses,
                    ref mut next,
                } => {
                    let mut body = None;
                    while *next < clauses.len() {
                        let clause = clauses[*next].clone();
                        *next += 1;

                        ctx.counters.total_renames += 1;
                        let renamed = rename_clause(&mut ctx.bindings, &clause);

                        let occurs = ctx.config.occurs_check.value;
                        if unify(&mut ctx.bindings, occurs, goal, &renamed.head) {
                            log::trace!(target: crate::misc::log::targets::BACKTRACK, "{goal} via {clause}");
                            body = Some(renamed.body);
                            break;
                        }
                        ctx.bindings.rewind(cp.mark);
                    }

                    match body {
                        Some(body) => {
                            self.goals = cp.goals.clone();
                            if !matches!(&body, Term::Atom(name) if name == "true") {
                                self.goals.push(GoalEntry { goal: body, barrier });
                            }
                            Some(*next < clauses.len())
                        }
                        None => None,
                    }
                }

                Alternative::Branches {
                    ref branches,
                    ref mut next,
                    barrier: inherited,
                } => {
                    if *next < branches.len() {
                        let branch = branches[*next].clone();
                        *next += 1;
                        self.goals = cp.goals.clone();
                        self.goals.push(GoalEntry {
                            goal: branch,
                            barrier: inherited,
                        });
                        Some(*next < branches.len())
                    } else {
                        None
                    }
                }
            };

            match resumed {
                // Alternatives remain: the choicepoint stays, at its old index.
                Some(true) => {
                    self.choicepoints.push(cp);
                    return true;
                }

                Some(false) => return true,

                None => continue,
            }
        }
    }
}

fn as_if_then(ctx: &Context, term: &Term) -> Option<(Term, Term)> {
    match ctx.bindings.dereference(term) {
        Term::Compound(c) if c.functor == "->" && c.args.len() == 2 => {
            Some((c.args[0].clone(), c.args[1].clone()))
        }
        _ => None,
    }
}

/// Proves the first solution of `goal`, leaving its bindings in place.
///
/// Used for directives and wherever the machine needs an isolated sub-proof
/// (`\+`, the condition of `->`).
/// The sub-machine has choicepoints of its own, so a cut inside `goal` is
/// local to it.
pub fn solve_first(ctx: &mut Context, goal: Term) -> Result<bool, ErrorKind> {
    let mut machine = Machine::for_goal(goal);
    Ok(machine.next_solution(ctx)?.is_some())
}

/// The lazy solution stream of a query.
///
/// Dropping the stream rewinds every binding the query made.
pub struct Answers<'a> {
    ctx: &'a mut Context,
    machine: Machine,
    variables: Vec<(SmolStr, Variable)>,
    base_mark: Mark,
    done: bool,
}

impl Iterator for Answers<'_> {
    type Item = Result<Solution, ErrorKind>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.machine.next_solution(self.ctx) {
            Ok(Some(())) => {
                let bindings = self
                    .variables
                    .iter()
                    .filter(|(name, _)| !name.starts_with('_'))
                    .map(|(name, variable)| {
                        (
                            name.to_string(),
                            self.ctx.bindings.resolve(&Term::Variable(*variable)),
                        )
                    })
                    .collect();
                Some(Ok(Solution::new(bindings)))
            }

            Ok(None) => {
                self.done = true;
                None
            }

            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl Drop for Answers<'_> {
    fn drop(&mut self) {
        self.ctx.bindings.rewind(self.base_mark);
        self.ctx.state = ContextState::Input;
    }
}

impl Context {
    /// Parses `goal` and returns its lazy solution stream.
    ///
    /// Each solution maps the named variables of the query to their values at
    /// the moment the goal succeeded; asking for the next solution backtracks.
    /// Solutions arrive in a deterministic order fixed by clause insertion
    /// order and left-to-right, depth-first search.
    pub fn query<'a>(&'a mut self, goal: &str) -> Result<Answers<'a>, ErrorKind> {
        let (goal, variables) = {
            let parser = Parser::new(goal, &self.operators, &mut self.bindings)?;
            parser.query_goal()?
        };

        log::info!(target: crate::misc::log::targets::SOLVE, "Query: {goal}");
        self.counters.queries += 1;

        let base_mark = self.bindings.mark();
        self.state = ContextState::Solving;

        Ok(Answers {
            machine: Machine::for_goal(goal),
            variables,
            base_mark,
            done: false,
            ctx: self,
        })
    }
}
