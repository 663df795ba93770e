//! First-order logic representation
//!
//! Terms and the substitutions the unifier builds over them.

pub mod substitution;
pub mod term;

pub use substitution::{ResolvedRef, Substitution};
pub use term::{is_variable_name, Constant, FunctionSymbol, InvalidVariableName, Term, Variable};
