/*!
Error types used in the library.

- Some of these surface to the consumer of a query --- e.g. an evaluation error aborts the current solution stream while the context remains usable for further queries.
- Others are only ever seen while reading source text --- tokenize and parse errors abort the current load, with any previously stored clauses retained.

Logical failure (a goal which cannot be proved) is never represented here.
Failure drives backtracking, and an exhausted stream is signalled by the stream ending.

Names of the error enums --- for the most part --- overlap with the subsystem they belong to.
*/

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error at the character level of some source text.
    Tokenize(TokenizeError),

    /// An error in the token stream of some source text.
    Parse(ParseError),

    /// An error while solving a goal.
    Solve(SolveError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tokenize(e) => write!(f, "tokenize error: {e}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Solve(e) => write!(f, "{e}"),
        }
    }
}

/// Errors at the character level of some source text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenizeError {
    /// A character which no token can start with.
    UnknownCharacter { line: usize },

    /// A double-quoted string with no closing quote.
    UnterminatedString { line: usize },

    /// A quoted atom with no closing quote.
    UnterminatedQuote { line: usize },

    /// A block comment with no closing delimiter.
    UnterminatedComment { line: usize },

    /// A numeric literal outside the representable range.
    NumberOutOfRange { line: usize },
}

impl From<TokenizeError> for ErrorKind {
    fn from(e: TokenizeError) -> Self {
        ErrorKind::Tokenize(e)
    }
}

impl std::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCharacter { line } => write!(f, "unknown character on line {line}"),
            Self::UnterminatedString { line } => write!(f, "unterminated string on line {line}"),
            Self::UnterminatedQuote { line } => write!(f, "unterminated quoted atom on line {line}"),
            Self::UnterminatedComment { line } => {
                write!(f, "unterminated block comment opened on line {line}")
            }
            Self::NumberOutOfRange { line } => {
                write!(f, "numeric literal out of range on line {line}")
            }
        }
    }
}

/// Errors in the token stream of some source text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// A token which cannot appear at its position.
    UnexpectedToken { line: usize, token: String },

    /// The token stream ended while a term was incomplete.
    UnexpectedEnd,

    /// A clause without a terminating `.`.
    MissingTerminator { line: usize },

    /// A clause head which is neither an atom nor a compound.
    InvalidClauseHead { line: usize },
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { line, token } => {
                write!(f, "unexpected {token} on line {line}")
            }
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
            Self::MissingTerminator { line } => {
                write!(f, "expected '.' to end the clause on line {line}")
            }
            Self::InvalidClauseHead { line } => {
                write!(f, "clause head is not callable on line {line}")
            }
        }
    }
}

/// Errors raised while solving a goal.
///
/// These abort the current solution stream.
/// The clause database is unaffected, and a fresh query may be made.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolveError {
    /// An argument which needed to be bound was not.
    Instantiation { context: &'static str },

    /// An argument of the wrong kind.
    Type {
        context: &'static str,
        expected: &'static str,
        found: String,
    },

    /// An argument of the right kind but outside the valid range.
    Domain {
        context: &'static str,
        expected: &'static str,
        found: String,
    },

    /// An error while evaluating an arithmetic expression.
    Evaluate(EvaluateError),
}

impl From<SolveError> for ErrorKind {
    fn from(e: SolveError) -> Self {
        ErrorKind::Solve(e)
    }
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instantiation { context } => {
                write!(f, "instantiation error: {context}: argument is not sufficiently bound")
            }
            Self::Type {
                context,
                expected,
                found,
            } => write!(f, "type error: {context}: expected {expected}, found {found}"),
            Self::Domain {
                context,
                expected,
                found,
            } => write!(f, "domain error: {context}: expected {expected}, found {found}"),
            Self::Evaluate(e) => write!(f, "evaluation error: {e}"),
        }
    }
}

/// Errors raised while evaluating an arithmetic expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EvaluateError {
    /// An unbound variable in the expression.
    Instantiation,

    /// A term which is neither a number nor an arithmetic expression.
    NotNumeric { term: String },

    /// A compound whose functor and arity match no arithmetic operation.
    UnknownFunction { name: String, arity: usize },

    /// Division, integer division, or modulus with a zero divisor.
    DivisionByZero,

    /// An integer operation which left the representable range.
    Overflow,

    /// An operation restricted to integers was given a float.
    IntegerExpected { found: String },
}

impl From<EvaluateError> for SolveError {
    fn from(e: EvaluateError) -> Self {
        SolveError::Evaluate(e)
    }
}

impl From<EvaluateError> for ErrorKind {
    fn from(e: EvaluateError) -> Self {
        ErrorKind::Solve(SolveError::Evaluate(e))
    }
}

impl std::fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instantiation => write!(f, "expression is not sufficiently instantiated"),
            Self::NotNumeric { term } => write!(f, "{term} is not an arithmetic expression"),
            Self::UnknownFunction { name, arity } => {
                write!(f, "unknown arithmetic function {name}/{arity}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::Overflow => write!(f, "integer overflow"),
            Self::IntegerExpected { found } => write!(f, "expected an integer, found {found}"),
        }
    }
}
