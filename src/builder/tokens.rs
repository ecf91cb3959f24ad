/*!
The tokenizer: source text to a stream of tokens with line numbers.

Lexing is handled by a [logos]-derived lexer, with callbacks for the three
constructs a regular pattern handles poorly: quoted atoms, double-quoted
strings, and block comments.
Operator lexemes match longest-first (`=\=` beats `=\` and `=`), which falls
out of logos resolving overlaps by match length.

`%` comments run to end of line and `/* ... */` comments to the closing
delimiter; both are skipped.
An unterminated string, quoted atom, or block comment, and any character no
token can start with, is reported as a [TokenizeError] carrying the line it
occurred on.
*/

use logos::{FilterResult, Lexer, Logos};
use smol_str::SmolStr;

use crate::types::err::{ErrorKind, TokenizeError};

/// The ways lexing can go wrong, before line numbers are attached.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LexFault {
    #[default]
    Unknown,
    UnterminatedString,
    UnterminatedQuote,
    UnterminatedComment,
    BadNumber,
}

/// A token.
#[derive(Clone, Debug, Logos, PartialEq)]
#[logos(error = LexFault)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"%[^\n]*")]
pub enum Token {
    #[token("(")]
    Open,

    #[token(")")]
    Close,

    #[token("[")]
    OpenList,

    #[token("]")]
    CloseList,

    #[token(",")]
    Comma,

    #[token("|")]
    Bar,

    /// End of clause, and the list-cell functor when directly applied.
    #[token(".")]
    Dot,

    /// An atom: identifier, symbolic, solo, or quoted.
    ///
    /// `*` and `/` are enumerated apart from the symbolic run so that `/*` is
    /// free to open a comment.
    #[regex(r"[a-z][a-zA-Z0-9_]*", |lex| SmolStr::new(lex.slice()))]
    #[regex(r"[+\-\\^<>=~:?@#&$]+", |lex| SmolStr::new(lex.slice()))]
    #[token("*", |lex| SmolStr::new(lex.slice()))]
    #[token("**", |lex| SmolStr::new(lex.slice()))]
    #[token("/", |lex| SmolStr::new(lex.slice()))]
    #[token("//", |lex| SmolStr::new(lex.slice()))]
    #[token("=..", |lex| SmolStr::new(lex.slice()))]
    #[token(";", |lex| SmolStr::new(lex.slice()))]
    #[token("!", |lex| SmolStr::new(lex.slice()))]
    #[token("'", lex_quoted_atom)]
    Atom(SmolStr),

    /// A variable name. A bare `_` reads as a fresh anonymous variable.
    #[regex(r"[A-Z_][a-zA-Z0-9_]*", |lex| SmolStr::new(lex.slice()))]
    Var(SmolStr),

    #[regex(r"[0-9]+", lex_int)]
    Int(i64),

    #[regex(r"[0-9]+\.[0-9]+", lex_float)]
    Float(f64),

    #[token("\"", lex_string)]
    Str(SmolStr),

    /// Never emitted: the callback either skips the comment or reports it unterminated.
    #[regex(r"/\*", lex_block_comment)]
    BlockComment,
}

fn lex_int(lex: &mut Lexer<Token>) -> Result<i64, LexFault> {
    lex.slice().parse().map_err(|_| LexFault::BadNumber)
}

fn lex_float(lex: &mut Lexer<Token>) -> Result<f64, LexFault> {
    lex.slice().parse().map_err(|_| LexFault::BadNumber)
}

fn lex_quoted_atom(lex: &mut Lexer<Token>) -> Result<SmolStr, LexFault> {
    lex_quoted(lex, '\'').ok_or(LexFault::UnterminatedQuote)
}

fn lex_string(lex: &mut Lexer<Token>) -> Result<SmolStr, LexFault> {
    lex_quoted(lex, '"').ok_or(LexFault::UnterminatedString)
}

/// Scans the remainder for the closing quote, translating escapes.
///
/// A doubled quote reads as a literal quote, and a backslash escapes the
/// following character (`\n` and `\t` translate, anything else stands for
/// itself).
/// None if the input ends before the quote closes.
fn lex_quoted(lex: &mut Lexer<Token>, quote: char) -> Option<SmolStr> {
    let remainder = lex.remainder();
    let mut out = String::new();
    let mut chars = remainder.char_indices();

    while let Some((at, c)) = chars.next() {
        if c == quote {
            let mut ahead = chars.clone();
            if let Some((_, next)) = ahead.next() {
                if next == quote {
                    out.push(quote);
                    chars = ahead;
                    continue;
                }
            }
            lex.bump(at + c.len_utf8());
            return Some(SmolStr::new(out));
        }

        if c == '\\' {
            match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, other)) => out.push(other),
                None => return None,
            }
        } else {
            out.push(c);
        }
    }

    None
}

fn lex_block_comment(lex: &mut Lexer<Token>) -> FilterResult<(), LexFault> {
    match lex.remainder().find("*/") {
        Some(at) => {
            lex.bump(at + 2);
            FilterResult::Skip
        }
        None => FilterResult::Error(LexFault::UnterminatedComment),
    }
}

/// A short description of a token, for parse errors.
pub fn token_text(token: &Token) -> String {
    match token {
        Token::Open => "'('".to_string(),
        Token::Close => "')'".to_string(),
        Token::OpenList => "'['".to_string(),
        Token::CloseList => "']'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Bar => "'|'".to_string(),
        Token::Dot => "'.'".to_string(),
        Token::Atom(name) => format!("'{name}'"),
        Token::Var(name) => format!("variable {name}"),
        Token::Int(i) => format!("integer {i}"),
        Token::Float(x) => format!("float {x}"),
        Token::Str(s) => format!("string \"{s}\""),
        Token::BlockComment => "comment".to_string(),
    }
}

/// Tokenizes `source`, attaching a line number to each token.
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ErrorKind> {
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(source.match_indices('\n').map(|(at, _)| at + 1))
        .collect();

    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::default();

    while let Some(item) = lexer.next() {
        let line = line_starts.partition_point(|&start| start <= lexer.span().start);
        match item {
            Ok(token) => tokens.push((token, line)),
            Err(fault) => {
                let error = match fault {
                    LexFault::Unknown => TokenizeError::UnknownCharacter { line },
                    LexFault::UnterminatedString => TokenizeError::UnterminatedString { line },
                    LexFault::UnterminatedQuote => TokenizeError::UnterminatedQuote { line },
                    LexFault::UnterminatedComment => TokenizeError::UnterminatedComment { line },
                    LexFault::BadNumber => TokenizeError::NumberOutOfRange { line },
                };
                return Err(error.into());
            }
        }
    }

    Ok(tokens)
}
