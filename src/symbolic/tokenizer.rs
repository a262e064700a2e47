//! Lexer for canonical expression strings built from `nom` combinators.
//!
//! Operators are tried before numbers so that a leading `-` is always a token of its
//! own; `recognize_float` never sees the sign.
use crate::symbolic::symbolic_errors::ExpressionError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{map, map_res, recognize, value},
    multi::many0,
    number::complete::recognize_float,
    sequence::pair,
};
use std::fmt;

/// Matched grouping pairs: `()`, `[]`, `{}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Round,
    Square,
    Curly,
}

impl Bracket {
    pub fn opening(self) -> char {
        match self {
            Bracket::Round => '(',
            Bracket::Square => '[',
            Bracket::Curly => '{',
        }
    }

    pub fn closing(self) -> char {
        match self {
            Bracket::Round => ')',
            Bracket::Square => ']',
            Bracket::Curly => '}',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `**` or `^`
    Power,
    Open(Bracket),
    Close(Bracket),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(v) => write!(f, "{}", v),
            TokenKind::Ident(name) => write!(f, "{}", name),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Power => write!(f, "**"),
            TokenKind::Open(b) => write!(f, "{}", b.opening()),
            TokenKind::Close(b) => write!(f, "{}", b.closing()),
        }
    }
}

/// A token together with its byte offset in the source string
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

fn operator(input: &str) -> IResult<&str, TokenKind> {
    alt((
        value(TokenKind::Power, tag("**")),
        value(TokenKind::Power, tag("^")),
        value(TokenKind::Plus, tag("+")),
        value(TokenKind::Minus, tag("-")),
        value(TokenKind::Star, tag("*")),
        value(TokenKind::Slash, tag("/")),
    ))
    .parse(input)
}

fn bracket(input: &str) -> IResult<&str, TokenKind> {
    alt((
        value(TokenKind::Open(Bracket::Round), char('(')),
        value(TokenKind::Open(Bracket::Square), char('[')),
        value(TokenKind::Open(Bracket::Curly), char('{')),
        value(TokenKind::Close(Bracket::Round), char(')')),
        value(TokenKind::Close(Bracket::Square), char(']')),
        value(TokenKind::Close(Bracket::Curly), char('}')),
    ))
    .parse(input)
}

/// decimal and scientific literals: `2`, `2.5`, `.5`, `1e-3`
fn number(input: &str) -> IResult<&str, TokenKind> {
    map_res(recognize_float, |s: &str| {
        s.parse::<f64>().map(TokenKind::Number)
    })
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, TokenKind> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(parser, |s: &str| TokenKind::Ident(s.to_string())).parse(input)
}

fn token(input: &str) -> IResult<&str, TokenKind> {
    alt((operator, bracket, number, identifier)).parse(input)
}

/// Splits an expression string into positioned tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut rest = source;
    loop {
        let (after_ws, _) = multispace0::<&str, nom::error::Error<&str>>(rest)
            .map_err(|_| ExpressionError::syntax(source.len() - rest.len(), "unreadable input"))?;
        rest = after_ws;
        if rest.is_empty() {
            break;
        }
        let position = source.len() - rest.len();
        match token(rest) {
            Ok((remaining, kind)) => {
                tokens.push(Token { kind, position });
                rest = remaining;
            }
            Err(_) => {
                let found = rest.chars().next().unwrap_or(' ');
                return Err(ExpressionError::syntax(
                    position,
                    format!("unexpected character '{}'", found),
                ));
            }
        }
    }
    Ok(tokens)
}
