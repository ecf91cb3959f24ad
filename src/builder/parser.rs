/*!
The parser: a token stream to clause terms or a query goal.

Parsing is operator-precedence, driven by the context's [operator registry](crate::structures::operators).

The central routine reads an expression under a precedence limit: parse a
primary term, then, while the next token is an infix operator whose precedence
fits both the limit and the term built so far, consume it and read the right
operand under the operator's own limit (the operator's precedence for a
right-associative entry, one less otherwise).

Inside `f(...)` and `[...]` arguments are read at precedence 999, so a comma is
a structural separator there rather than the `','/2` operator.
List syntax builds right-nested `'.'(Head, Tail)` cells ending in `[]`, or in an
explicit tail term after `|`.

Variables are allocated from the binding store as they are first read, with a
per-clause map keeping repeated names shared.
A bare `_` is a fresh variable at every occurrence.
*/

use smol_str::SmolStr;

use crate::{
    builder::tokens::{token_text, tokenize, Token},
    db::bindings::BindingDB,
    structures::{
        operators::{Assoc, OperatorTable},
        term::{Term, Variable},
    },
    types::err::{ErrorKind, ParseError},
};

pub(crate) struct Parser<'a> {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
    operators: &'a OperatorTable,
    bindings: &'a mut BindingDB,

    /// Source-level names read so far in the current clause or query, with their variables.
    variables: Vec<(SmolStr, Variable)>,
}

impl<'a> Parser<'a> {
    pub fn new(
        source: &str,
        operators: &'a OperatorTable,
        bindings: &'a mut BindingDB,
    ) -> Result<Self, ErrorKind> {
        Ok(Parser {
            tokens: tokenize(source)?,
            cursor: 0,
            operators,
            bindings,
            variables: Vec::default(),
        })
    }

    /// Reads the next clause term and the line it started on, or None at the end of input.
    pub fn next_clause_term(&mut self) -> Result<Option<(Term, usize)>, ErrorKind> {
        if self.cursor >= self.tokens.len() {
            return Ok(None);
        }
        self.variables.clear();

        let line = self.current_line();
        let term = self.parse_expr(1200)?;

        match self.advance() {
            Some((Token::Dot, _)) => Ok(Some((term, line))),
            Some((_, line)) => Err(ParseError::MissingTerminator { line }.into()),
            None => Err(ParseError::MissingTerminator {
                line: self.last_line(),
            }
            .into()),
        }
    }

    /// Reads a single goal term, consuming the whole token stream.
    ///
    /// A terminating `.` is accepted but not required.
    /// Returns the goal together with the named variables it mentions, in order of first occurrence.
    pub fn query_goal(mut self) -> Result<(Term, Vec<(SmolStr, Variable)>), ErrorKind> {
        self.variables.clear();
        let term = self.parse_expr(1200)?;

        if matches!(self.peek(), Some(Token::Dot)) {
            self.advance();
        }
        if let Some((token, line)) = self.advance() {
            return Err(ParseError::UnexpectedToken {
                line,
                token: token_text(&token),
            }
            .into());
        }

        Ok((term, self.variables))
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|(token, _)| token)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let item = self.tokens.get(self.cursor).cloned();
        if item.is_some() {
            self.cursor += 1;
        }
        item
    }

    fn current_line(&self) -> usize {
        self.tokens
            .get(self.cursor)
            .map(|(_, line)| *line)
            .unwrap_or_else(|| self.last_line())
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map(|(_, line)| *line).unwrap_or(1)
    }

    /// The infix entry continuing the expression at the cursor, if any.
    fn peek_infix(&self) -> Option<(SmolStr, u16, Assoc)> {
        match self.peek()? {
            Token::Atom(name) => self
                .operators
                .infix(name)
                .map(|op| (name.clone(), op.precedence, op.assoc)),
            Token::Comma => self
                .operators
                .infix(",")
                .map(|op| (SmolStr::new(","), op.precedence, op.assoc)),
            _ => None,
        }
    }

    /// True if the token at the cursor can begin a term.
    fn starts_term(&self) -> bool {
        matches!(
            self.peek(),
            Some(
                Token::Atom(_)
                    | Token::Var(_)
                    | Token::Int(_)
                    | Token::Float(_)
                    | Token::Str(_)
                    | Token::Open
                    | Token::OpenList
            )
        )
    }

    fn parse_expr(&mut self, max: u16) -> Result<Term, ErrorKind> {
        let (mut left, mut left_prec) = self.parse_primary(max)?;

        loop {
            let Some((symbol, precedence, assoc)) = self.peek_infix() else {
                break;
            };
            if precedence > max {
                break;
            }
            let left_fits = match assoc {
                Assoc::Left => left_prec <= precedence,
                _ => left_prec < precedence,
            };
            if !left_fits {
                break;
            }

            self.advance();
            let rmax = match assoc {
                Assoc::Right => precedence,
                _ => precedence - 1,
            };
            let right = self.parse_expr(rmax)?;
            left = Term::compound(&symbol, vec![left, right]);
            left_prec = precedence;
        }

        Ok(left)
    }

    /// Reads a primary term: a constant, variable, compound, bracketed
    /// expression, list, or prefix-operator application.
    ///
    /// Returns the term with the precedence of its principal operator (zero
    /// for anything bracketed or atomic).
    fn parse_primary(&mut self, max: u16) -> Result<(Term, u16), ErrorKind> {
        let Some((token, line)) = self.advance() else {
            return Err(ParseError::UnexpectedEnd.into());
        };

        match token {
            Token::Int(i) => Ok((Term::int(i), 0)),
            Token::Float(x) => Ok((Term::float(x), 0)),
            Token::Str(s) => Ok((Term::Str(s), 0)),
            Token::Var(name) => Ok((self.variable(&name), 0)),

            Token::Open => {
                let term = self.parse_expr(1200)?;
                self.expect(Token::Close)?;
                Ok((term, 0))
            }

            Token::OpenList => Ok((self.parse_list()?, 0)),

            Token::Atom(name) => {
                if matches!(self.peek(), Some(Token::Open)) {
                    self.advance();
                    let args = self.parse_args()?;
                    return Ok((Term::compound(&name, args), 0));
                }

                if let Some(op) = self.operators.prefix(&name) {
                    let (precedence, assoc) = (op.precedence, op.assoc);
                    if precedence <= max && self.starts_term() {
                        // A sign directly before a numeric literal folds into it.
                        if name == "-" || name == "+" {
                            match self.peek() {
                                Some(Token::Int(i)) => {
                                    let value = if name == "-" { -i } else { *i };
                                    self.advance();
                                    return Ok((Term::int(value), 0));
                                }
                                Some(Token::Float(x)) => {
                                    let value = if name == "-" { -x } else { *x };
                                    self.advance();
                                    return Ok((Term::float(value), 0));
                                }
                                _ => {}
                            }
                        }

                        let omax = match assoc {
                            Assoc::Right => precedence,
                            _ => precedence - 1,
                        };
                        let operand = self.parse_expr(omax)?;
                        return Ok((Term::compound(&name, vec![operand]), precedence));
                    }
                }

                Ok((Term::Atom(name), 0))
            }

            other => Err(ParseError::UnexpectedToken {
                line,
                token: token_text(&other),
            }
            .into()),
        }
    }

    /// Reads `expr, ..., expr )` after the opening bracket of a compound.
    fn parse_args(&mut self) -> Result<Vec<Term>, ErrorKind> {
        let mut args = vec![self.parse_expr(999)?];

        loop {
            match self.advance() {
                Some((Token::Comma, _)) => args.push(self.parse_expr(999)?),
                Some((Token::Close, _)) => break,
                Some((token, line)) => {
                    return Err(ParseError::UnexpectedToken {
                        line,
                        token: token_text(&token),
                    }
                    .into())
                }
                None => return Err(ParseError::UnexpectedEnd.into()),
            }
        }

        Ok(args)
    }

    /// Reads the remainder of a list after the opening bracket.
    fn parse_list(&mut self) -> Result<Term, ErrorKind> {
        if matches!(self.peek(), Some(Token::CloseList)) {
            self.advance();
            return Ok(Term::nil());
        }

        let mut elements = vec![self.parse_expr(999)?];

        loop {
            match self.advance() {
                Some((Token::Comma, _)) => elements.push(self.parse_expr(999)?),

                Some((Token::CloseList, _)) => return Ok(Term::list(elements)),

                Some((Token::Bar, _)) => {
                    let tail = self.parse_expr(999)?;
                    self.expect(Token::CloseList)?;
                    return Ok(elements
                        .into_iter()
                        .rev()
                        .fold(tail, |tail, head| Term::cons(head, tail)));
                }

                Some((token, line)) => {
                    return Err(ParseError::UnexpectedToken {
                        line,
                        token: token_text(&token),
                    }
                    .into())
                }

                None => return Err(ParseError::UnexpectedEnd.into()),
            }
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), ErrorKind> {
        match self.advance() {
            Some((token, _)) if token == expected => Ok(()),
            Some((token, line)) => Err(ParseError::UnexpectedToken {
                line,
                token: token_text(&token),
            }
            .into()),
            None => Err(ParseError::UnexpectedEnd.into()),
        }
    }

    /// The variable for a source-level name, allocating on first occurrence.
    fn variable(&mut self, name: &SmolStr) -> Term {
        if name == "_" {
            return Term::Variable(self.bindings.fresh_variable());
        }

        if let Some((_, variable)) = self.variables.iter().find(|(n, _)| n == name) {
            return Term::Variable(*variable);
        }

        let variable = self.bindings.fresh_variable();
        self.variables.push((name.clone(), variable));
        Term::Variable(variable)
    }
}
