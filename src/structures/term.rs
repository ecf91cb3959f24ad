/*!
(The internal representation of) a term --- the universal runtime value.

Broadly, a term is one of:
- An atom: a symbolic constant, identified by its name.
- A number: an integer or float, see [Number].
- A string: a double-quoted character sequence, distinct from any atom.
- A variable: an identity which is either unbound or bound through the binding store.
- A compound: an atom functor applied to a fixed sequence of argument terms.

Lists are compound terms.
The empty list is the atom `[]`, and a non-empty list is the compound `'.'(Head, Tail)`.

Variables are identified by a [Variable] --- a u32 allocated by the binding store.
Identity goes beyond the source-level name: every use of a clause renames its variables to fresh identities, and the source-level name survives only in the per-query map kept for reporting solutions.

Compound arguments are held by value behind an [Rc], so cloning a term is cheap and terms contain no cycles of ownership --- chains of variables live in the binding store, not in the term structure.

# Printed form

[Display](std::fmt::Display) renders a term the way the reader would accept it:
lists in `[a, b|T]` form, operators from the standard table infix or prefix with
parentheses only where precedence requires them, floats always with a decimal
point, and unbound variables as `_G<id>`.
*/

use std::rc::Rc;

use smol_str::SmolStr;

use crate::structures::{
    number::Number,
    operators::{Assoc, INFIX_DEFAULTS, PREFIX_DEFAULTS},
};

/// A variable identity.
pub type Variable = u32;

/// A term.
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    /// A symbolic constant.
    Atom(SmolStr),

    /// An integer or float.
    Number(Number),

    /// A double-quoted string.
    Str(SmolStr),

    /// A variable, identified independently of any source-level name.
    Variable(Variable),

    /// A functor applied to one or more arguments.
    Compound(Rc<Compound>),
}

/// A functor together with its arguments.
///
/// The arity of a compound is fixed at construction as the length of `args`.
#[derive(Clone, Debug, PartialEq)]
pub struct Compound {
    /// The functor. Always an atom.
    pub functor: SmolStr,

    /// The arguments, in order.
    pub args: Vec<Term>,
}

impl Term {
    /// An atom with the given name.
    pub fn atom(name: &str) -> Self {
        Term::Atom(SmolStr::new(name))
    }

    /// An integer term.
    pub fn int(value: i64) -> Self {
        Term::Number(Number::Int(value))
    }

    /// A float term.
    pub fn float(value: f64) -> Self {
        Term::Number(Number::Float(value))
    }

    /// A compound term, or an atom if `args` is empty.
    pub fn compound(functor: &str, args: Vec<Term>) -> Self {
        if args.is_empty() {
            Term::atom(functor)
        } else {
            Term::Compound(Rc::new(Compound {
                functor: SmolStr::new(functor),
                args,
            }))
        }
    }

    /// The empty list.
    pub fn nil() -> Self {
        Term::atom("[]")
    }

    /// A list cell.
    pub fn cons(head: Term, tail: Term) -> Self {
        Term::compound(".", vec![head, tail])
    }

    /// A proper list of the given elements.
    pub fn list(elements: Vec<Term>) -> Self {
        elements
            .into_iter()
            .rev()
            .fold(Term::nil(), |tail, head| Term::cons(head, tail))
    }

    /// True for the atom `[]`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Term::Atom(name) if name == "[]")
    }

    /// True for terms which may head a clause or stand as a goal.
    pub fn is_callable(&self) -> bool {
        matches!(self, Term::Atom(_) | Term::Compound(_))
    }

    /// The functor name and arity, for atoms (arity zero) and compounds.
    pub fn name_arity(&self) -> Option<(&str, usize)> {
        match self {
            Term::Atom(name) => Some((name.as_str(), 0)),
            Term::Compound(c) => Some((c.functor.as_str(), c.args.len())),
            _ => None,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_term(self, 1200))
    }
}

/// Characters which may glue together when two symbolic tokens are adjacent.
fn is_symbol_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '\\' | '^' | '<' | '>' | '=' | '~' | ':' | '.' | '?' | '@' | '#' | '&' | '$'
    )
}

fn infix_entry(symbol: &str) -> Option<(u16, Assoc)> {
    INFIX_DEFAULTS
        .iter()
        .find(|(s, _, _, _)| *s == symbol)
        .map(|&(_, p, a, _)| (p, a))
}

fn prefix_entry(symbol: &str) -> Option<(u16, Assoc)> {
    PREFIX_DEFAULTS
        .iter()
        .find(|(s, _, _, _)| *s == symbol)
        .map(|&(_, p, a, _)| (p, a))
}

fn wrap(rendered: String, precedence: u16, max: u16) -> String {
    if precedence > max {
        format!("({rendered})")
    } else {
        rendered
    }
}

/// Renders `term`, parenthesising it if its principal operator exceeds `max`.
pub(crate) fn format_term(term: &Term, max: u16) -> String {
    match term {
        Term::Atom(name) => name.to_string(),
        Term::Number(n) => n.to_string(),
        Term::Str(s) => format!("\"{s}\""),
        Term::Variable(v) => format!("_G{v}"),

        Term::Compound(c) => {
            if c.functor == "." && c.args.len() == 2 {
                return format_list(c);
            }

            if c.args.len() == 2 {
                if let Some((precedence, assoc)) = infix_entry(&c.functor) {
                    let (lmax, rmax) = match assoc {
                        Assoc::Left => (precedence, precedence - 1),
                        Assoc::Right => (precedence - 1, precedence),
                        Assoc::None => (precedence - 1, precedence - 1),
                    };
                    let left = format_term(&c.args[0], lmax);
                    let right = format_term(&c.args[1], rmax);

                    let rendered = if c.functor == "," {
                        format!("{left}, {right}")
                    } else if c.functor.chars().next().is_some_and(|ch| ch.is_alphabetic()) {
                        format!("{left} {} {right}", c.functor)
                    } else {
                        // Space out symbol runs which would otherwise re-tokenize as one.
                        let lpad = match left.chars().last() {
                            Some(l) if is_symbol_char(l) => " ",
                            _ => "",
                        };
                        let rpad = match right.chars().next() {
                            Some(r) if is_symbol_char(r) => " ",
                            _ => "",
                        };
                        format!("{left}{lpad}{}{rpad}{right}", c.functor)
                    };
                    return wrap(rendered, precedence, max);
                }
            }

            if c.args.len() == 1 {
                if let Some((precedence, assoc)) = prefix_entry(&c.functor) {
                    let omax = match assoc {
                        Assoc::Right => precedence,
                        _ => precedence - 1,
                    };
                    let operand = format_term(&c.args[0], omax);
                    let sep = if c.functor.chars().next().is_some_and(|ch| ch.is_alphabetic()) {
                        " "
                    } else {
                        match operand.chars().next() {
                            Some(o) if is_symbol_char(o) => " ",
                            _ => "",
                        }
                    };
                    return wrap(format!("{}{sep}{operand}", c.functor), precedence, max);
                }
            }

            let args = c
                .args
                .iter()
                .map(|arg| format_term(arg, 999))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({args})", c.functor)
        }
    }
}

fn format_list(cell: &Compound) -> String {
    let mut out = String::from("[");
    out.push_str(&format_term(&cell.args[0], 999));

    let mut tail = &cell.args[1];
    loop {
        match tail {
            Term::Compound(next) if next.functor == "." && next.args.len() == 2 => {
                out.push_str(", ");
                out.push_str(&format_term(&next.args[0], 999));
                tail = &next.args[1];
            }
            Term::Atom(name) if name == "[]" => break,
            other => {
                out.push('|');
                out.push_str(&format_term(other, 999));
                break;
            }
        }
    }

    out.push(']');
    out
}
