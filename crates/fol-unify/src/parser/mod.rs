//! Term parser
//!
//! `Name` or `Name(Arg1, ..., ArgN)`, nested to any depth.

mod prescan;
pub mod term;

pub use term::{parse_term, parse_term_with_depth, ParseError};
