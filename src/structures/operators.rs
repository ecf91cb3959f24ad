/*!
The operator registry.

Operators are indexed by symbol and arity --- an infix entry for arity two, a prefix entry for arity one.
The same symbol may carry both (e.g. binary and unary `-`).

Each entry records a precedence between 1 and 1200 (lower binds tighter), an associativity, and a broad kind.
The registry is built once with the standard table and is read-only thereafter, unless user operators are defined through [define_infix](OperatorTable::define_infix)/[define_prefix](OperatorTable::define_prefix) --- additions follow the same single-threaded discipline as clause database updates.
*/

use std::collections::HashMap;

use smol_str::SmolStr;

/// Associativity of an operator.
///
/// For an infix operator of precedence p:
/// - Left allows a left operand of precedence p (e.g. `1 - 2 - 3` reads as `(1 - 2) - 3`).
/// - Right allows a right operand of precedence p (e.g. `a, b, c` reads as `a, (b, c)`).
/// - None requires both operands below p (e.g. `a = b = c` is rejected).
///
/// For a prefix operator, Right allows an operand of precedence p, anything else requires below p.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Assoc {
    Left,
    Right,
    None,
}

/// The broad role of an operator, for inspection and diagnostics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpKind {
    Arithmetic,
    Comparison,
    Unification,
    Logical,
    Control,
    Io,
}

/// A single operator entry.
#[derive(Clone, Debug)]
pub struct Operator {
    /// The symbol, as it appears in source text.
    pub symbol: SmolStr,

    /// Precedence, 1..=1200, lower binds tighter.
    pub precedence: u16,

    pub assoc: Assoc,

    pub kind: OpKind,

    /// Two for infix entries, one for prefix entries.
    pub arity: usize,
}

/// The standard infix table.
pub(crate) const INFIX_DEFAULTS: &[(&str, u16, Assoc, OpKind)] = &[
    ("**", 200, Assoc::Right, OpKind::Arithmetic),
    ("*", 400, Assoc::Left, OpKind::Arithmetic),
    ("/", 400, Assoc::Left, OpKind::Arithmetic),
    ("//", 400, Assoc::Left, OpKind::Arithmetic),
    ("mod", 400, Assoc::Left, OpKind::Arithmetic),
    ("+", 500, Assoc::Left, OpKind::Arithmetic),
    ("-", 500, Assoc::Left, OpKind::Arithmetic),
    ("=:=", 700, Assoc::None, OpKind::Comparison),
    ("=\\=", 700, Assoc::None, OpKind::Comparison),
    ("<", 700, Assoc::None, OpKind::Comparison),
    ("=<", 700, Assoc::None, OpKind::Comparison),
    (">", 700, Assoc::None, OpKind::Comparison),
    (">=", 700, Assoc::None, OpKind::Comparison),
    ("==", 700, Assoc::None, OpKind::Comparison),
    ("\\==", 700, Assoc::None, OpKind::Comparison),
    ("is", 700, Assoc::None, OpKind::Arithmetic),
    ("=", 700, Assoc::None, OpKind::Unification),
    ("\\=", 700, Assoc::None, OpKind::Unification),
    ("=..", 700, Assoc::None, OpKind::Control),
    (",", 1000, Assoc::Right, OpKind::Control),
    ("->", 1050, Assoc::Right, OpKind::Control),
    (";", 1100, Assoc::Right, OpKind::Logical),
    (":-", 1200, Assoc::None, OpKind::Control),
];

/// The standard prefix table.
pub(crate) const PREFIX_DEFAULTS: &[(&str, u16, Assoc, OpKind)] = &[
    ("-", 200, Assoc::Right, OpKind::Arithmetic),
    ("+", 200, Assoc::Right, OpKind::Arithmetic),
    ("\\+", 900, Assoc::Right, OpKind::Logical),
    (":-", 1200, Assoc::None, OpKind::Control),
];

/// A registry of operators, indexed by symbol and arity.
pub struct OperatorTable {
    infix: HashMap<SmolStr, Operator>,
    prefix: HashMap<SmolStr, Operator>,
}

impl Default for OperatorTable {
    fn default() -> Self {
        let mut table = OperatorTable {
            infix: HashMap::default(),
            prefix: HashMap::default(),
        };

        for &(symbol, precedence, assoc, kind) in INFIX_DEFAULTS {
            table.define_infix(Operator {
                symbol: SmolStr::new(symbol),
                precedence,
                assoc,
                kind,
                arity: 2,
            });
        }

        for &(symbol, precedence, assoc, kind) in PREFIX_DEFAULTS {
            table.define_prefix(Operator {
                symbol: SmolStr::new(symbol),
                precedence,
                assoc,
                kind,
                arity: 1,
            });
        }

        table
    }
}

impl OperatorTable {
    /// The infix entry for `symbol`, if any.
    pub fn infix(&self, symbol: &str) -> Option<&Operator> {
        self.infix.get(symbol)
    }

    /// The prefix entry for `symbol`, if any.
    pub fn prefix(&self, symbol: &str) -> Option<&Operator> {
        self.prefix.get(symbol)
    }

    /// Adds or replaces an infix entry.
    pub fn define_infix(&mut self, operator: Operator) {
        self.infix.insert(operator.symbol.clone(), operator);
    }

    /// Adds or replaces a prefix entry.
    pub fn define_prefix(&mut self, operator: Operator) {
        self.prefix.insert(operator.symbol.clone(), operator);
    }
}
