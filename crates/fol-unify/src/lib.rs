//! fol-unify: syntactic unification for first-order logic terms
//!
//! Terms are parsed from text (`Eats(x, Apple)`), unified with an
//! occurs-check, and the resulting substitution can be rendered as text or
//! JSON.
//!
//! ```
//! use fol_unify::{parse_term, unify};
//!
//! let left = parse_term("Eats(x, Apple)").unwrap();
//! let right = parse_term("Eats(Riya, y)").unwrap();
//! let subst = unify(&left, &right).unwrap();
//! assert_eq!(subst.to_string(), "{x -> Riya, y -> Apple}");
//! ```

pub mod config;
pub mod error;
pub mod fol;
pub mod json;
pub mod parser;
pub mod unification;

pub use config::UnifyConfig;
pub use error::{Error, Result};
pub use fol::{
    Constant, FunctionSymbol, InvalidVariableName, ResolvedRef, Substitution, Term, Variable,
};
pub use parser::{parse_term, parse_term_with_depth, ParseError};
pub use unification::{
    occurs_check, unify, unify_var, unify_with, unify_with_config, UnificationError,
    UnificationResult,
};

/// Parse two expressions and unify them under `config`.
///
/// `config.max_depth` also bounds the parser, so over-deep text is rejected as
/// invalid input before any term is built.
pub fn unify_expressions(left: &str, right: &str, config: &UnifyConfig) -> Result<Substitution> {
    let mut subst = Substitution::new();
    unify_expressions_with(left, right, &mut subst, config)?;
    Ok(subst)
}

/// Like [`unify_expressions`], extending `subst`. With rollback disabled a
/// failed call leaves its partial bindings in `subst`.
pub fn unify_expressions_with(
    left: &str,
    right: &str,
    subst: &mut Substitution,
    config: &UnifyConfig,
) -> Result<()> {
    let left = parse_term_with_depth(left, config.max_depth)?;
    let right = parse_term_with_depth(right, config.max_depth)?;
    unify_with_config(&left, &right, subst, config)?;
    Ok(())
}
