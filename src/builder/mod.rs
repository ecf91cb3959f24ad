/*!
Tools for building a context.

The library has two basic methods for storing a program:
- [load](crate::context::Context::load), to parse source text and append its clauses.
- [assert_one](crate::context::Context::assert_one), to add a single clause from text.

Both read clauses through the [tokenizer](tokens) and [parser](parser), and both retain previously stored clauses when the text is malformed: a tokenize or parse error aborts the current call only.

A clause of the form `:- Goal.` in loaded source is a directive: `Goal` is proved once, immediately, with its bindings discarded.
A directive which fails is logged and skipped; a directive which errors aborts the load.

# Examples

```rust
# use stoat_prolog::config::Config;
# use stoat_prolog::context::Context;
let mut ctx = Context::from_config(Config::default());

assert_eq!(ctx.load("likes(mary, wine). likes(john, wine)."), Ok(2));
assert!(ctx.assert_one("likes(tom, beer).").is_ok());

assert!(ctx.load("likes(").is_err());
assert!(ctx.clause_db.clause_count() >= 3);
```
*/

pub(crate) mod parser;
pub mod tokens;

use crate::{
    context::{Context, ContextState},
    db::{clause::ClausePosition, PredicateKey},
    procedures::solve::solve_first,
    structures::{clause::Clause, term::Term},
    types::err::{ErrorKind, ParseError},
};

/// List predicates available in every context unless configured away.
pub(crate) const PRELUDE: &str = "\
member(X, [X|_]).
member(X, [_|T]) :- member(X, T).

append([], L, L).
append([H|T], L, [H|R]) :- append(T, L, R).
";

impl Context {
    /// Parses `source` and appends its clauses to the database, returning how many were added.
    ///
    /// Directives are executed as they are read.
    /// On a tokenize or parse error the load stops, previously read clauses (from this and earlier calls) are retained, and the error is returned.
    pub fn load(&mut self, source: &str) -> Result<usize, ErrorKind> {
        let terms = {
            let mut parser = parser::Parser::new(source, &self.operators, &mut self.bindings)?;
            let mut terms = Vec::default();
            while let Some(item) = parser.next_clause_term()? {
                terms.push(item);
            }
            terms
        };

        let mut added = 0;
        for (term, line) in terms {
            if let Some((":-", 1)) = term.name_arity() {
                let Term::Compound(c) = &term else {
                    unreachable!("arity one implies a compound");
                };
                let goal = c.args[0].clone();

                let mark = self.bindings.mark();
                let proved = solve_first(self, goal);
                self.bindings.rewind(mark);

                if !proved? {
                    log::warn!(target: crate::misc::log::targets::PARSER, "Directive on line {line} failed");
                }
                continue;
            }

            self.add_clause_term(&term, line, ClausePosition::Back)?;
            added += 1;
        }

        if self.state == ContextState::Configuration {
            self.state = ContextState::Input;
        }
        Ok(added)
    }

    /// Parses a single clause and appends it to the database.
    pub fn assert_one(&mut self, clause: &str) -> Result<(), ErrorKind> {
        let (term, line) = {
            let mut parser = parser::Parser::new(clause, &self.operators, &mut self.bindings)?;
            let Some(item) = parser.next_clause_term()? else {
                return Err(ParseError::UnexpectedEnd.into());
            };
            if let Some((_, extra_line)) = parser.next_clause_term()? {
                return Err(ParseError::UnexpectedToken {
                    line: extra_line,
                    token: "a second clause".to_string(),
                }
                .into());
            }
            item
        };

        self.add_clause_term(&term, line, ClausePosition::Back)?;
        if self.state == ContextState::Configuration {
            self.state = ContextState::Input;
        }
        Ok(())
    }

    fn add_clause_term(
        &mut self,
        term: &Term,
        line: usize,
        position: ClausePosition,
    ) -> Result<(), ErrorKind> {
        let Some(clause) = Clause::from_term(term) else {
            return Err(ParseError::InvalidClauseHead { line }.into());
        };
        let Some(key) = PredicateKey::of_term(&clause.head) else {
            return Err(ParseError::InvalidClauseHead { line }.into());
        };

        self.clause_db.add(key, clause, position);
        self.counters.clauses_added += 1;
        Ok(())
    }
}
