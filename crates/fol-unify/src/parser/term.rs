//! Recursive-descent parser for terms
//!
//! Grammar:
//! ```text
//! <term>      ::= <name> | <name> "(" <term> { "," <term> } ")"
//! <name>      ::= <word> | <quoted>
//! <word>      ::= [A-Za-z0-9_]+
//! <quoted>    ::= "'" { <char> | "''" } "'"
//! ```
//! A bare `<word>` whose first character is lowercase is a variable, any other
//! atomic name is a constant. Quoted names are always constants.

use super::prescan::check_balanced;
use crate::fol::Term;
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{cut, map, opt},
    multi::separated_list1,
    sequence::{preceded, terminated},
    IResult,
};
use thiserror::Error;

/// Errors reported by [`parse_term`]. Positions are byte offsets into the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,

    #[error("unbalanced parentheses at position {position}")]
    UnbalancedParens { position: usize },

    #[error("unterminated quoted name starting at position {position}")]
    UnterminatedQuote { position: usize },

    #[error("missing functor name before '(' at position {position}")]
    MissingFunctor { position: usize },

    #[error("empty argument at position {position}")]
    EmptyArgument { position: usize },

    #[error("empty quoted name at position {position}")]
    EmptyName { position: usize },

    #[error("unexpected character '{found}' at position {position}")]
    Unexpected { position: usize, found: char },

    #[error("unexpected trailing input '{found}' at position {position}")]
    TrailingInput { position: usize, found: String },

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("term nesting exceeds depth limit {max_depth} at position {position}")]
    TooDeep { position: usize, max_depth: usize },
}

/// Parse a term from text
pub fn parse_term(input: &str) -> Result<Term, ParseError> {
    parse_term_with_depth(input, None)
}

/// Parse a term, refusing input nested more than `max_depth` levels deep
/// (the outermost term is level 0).
///
/// The limit is enforced by the pre-scan, before the recursive parser runs.
pub fn parse_term_with_depth(input: &str, max_depth: Option<usize>) -> Result<Term, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    check_balanced(input, max_depth)?;

    match parse_term_inner(input) {
        Ok((rest, term)) => {
            let rest = rest.trim_start();
            if rest.trim_end().is_empty() {
                Ok(term)
            } else {
                Err(ParseError::TrailingInput {
                    position: offset(input, rest),
                    found: rest.trim_end().to_string(),
                })
            }
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(classify(input, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::UnexpectedEnd),
    }
}

/// Byte offset of `rest` inside `source`; `rest` is always a suffix slice
fn offset(source: &str, rest: &str) -> usize {
    source.len() - rest.len()
}

/// Turn the input left over at a failure into a specific error
fn classify(source: &str, rest: &str) -> ParseError {
    let position = offset(source, rest);
    match rest.chars().next() {
        None => ParseError::UnexpectedEnd,
        Some('(') => ParseError::MissingFunctor { position },
        Some(',') | Some(')') => ParseError::EmptyArgument { position },
        Some('\'') if rest.starts_with("''") => ParseError::EmptyName { position },
        Some(found) => ParseError::Unexpected { position, found },
    }
}

/// Parse a term: a name, optionally followed by an argument list
fn parse_term_inner(input: &str) -> IResult<&str, Term> {
    let (input, _) = multispace0(input)?;
    let (input, (name, quoted)) = parse_name(input)?;
    let (input, args) = opt(preceded(multispace0, parse_arguments))(input)?;

    let term = match args {
        Some(args) => Term::compound(name, args),
        None if quoted => Term::constant(name),
        None => Term::atom(name),
    };
    Ok((input, term))
}

/// Parse a parenthesized, comma separated argument list.
///
/// Commas split arguments only at the top level of the list; nested lists are
/// consumed by the recursive `parse_term_inner` calls.
fn parse_arguments(input: &str) -> IResult<&str, Vec<Term>> {
    preceded(
        char('('),
        cut(terminated(
            separated_list1(preceded(multispace0, char(',')), parse_term_inner),
            preceded(multispace0, char(')')),
        )),
    )(input)
}

/// Parse a name, returning it and whether it was quoted
fn parse_name(input: &str) -> IResult<&str, (String, bool)> {
    alt((
        map(parse_single_quoted, |s| (s, true)),
        map(parse_word, |s: &str| (s.to_string(), false)),
    ))(input)
}

fn parse_word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// Parse a single-quoted name, unescaping doubled quotes
fn parse_single_quoted(input: &str) -> IResult<&str, String> {
    if !input.starts_with('\'') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }

    let mut name = String::new();
    let mut chars = input.char_indices().skip(1).peekable();
    while let Some((pos, ch)) = chars.next() {
        if ch != '\'' {
            name.push(ch);
            continue;
        }
        // Escaped quote
        if let Some((_, '\'')) = chars.peek() {
            name.push('\'');
            chars.next();
            continue;
        }
        if name.is_empty() {
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Verify,
            )));
        }
        return Ok((&input[pos + 1..], name));
    }

    Err(nom::Err::Failure(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Tag,
    )))
}
