//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A name that cannot denote a variable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a variable name: variables are words starting with a lowercase letter")]
pub struct InvalidVariableName(pub String);

/// A variable: a placeholder that unification may bind.
///
/// The name always starts with a lowercase letter, so a variable prints as
/// text that parses back to a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Variable {
    name: String,
}

/// A constant symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Constant {
    pub name: String,
}

/// A functor (function or predicate symbol); its arity is the length of the
/// argument list it is applied to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionSymbol {
    pub name: String,
}

/// A term in first-order logic
///
/// The role of a term is fixed by its tag when it is built; nothing looks at
/// the spelling of a name after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Compound(FunctionSymbol, Vec<Term>),
}

impl Variable {
    /// Checked constructor: `None` unless [`is_variable_name`] accepts the name
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        is_variable_name(&name).then_some(Variable { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<String> for Variable {
    type Error = InvalidVariableName;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        if is_variable_name(&name) {
            Ok(Variable { name })
        } else {
            Err(InvalidVariableName(name))
        }
    }
}

impl From<Variable> for String {
    fn from(var: Variable) -> String {
        var.name
    }
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionSymbol { name: name.into() }
    }
}

/// Whether a bare name denotes a variable: a plain word (alphanumerics and
/// underscores) whose first character is lowercase.
pub fn is_variable_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_lowercase) && is_plain_word(name)
}

impl Term {
    /// Variable term; `None` for names that would read back as something else
    pub fn var(name: impl Into<String>) -> Option<Term> {
        Variable::new(name).map(Term::Variable)
    }

    pub fn constant(name: impl Into<String>) -> Term {
        Term::Constant(Constant::new(name))
    }

    pub fn compound(name: impl Into<String>, args: Vec<Term>) -> Term {
        Term::Compound(FunctionSymbol::new(name), args)
    }

    /// Build an atomic term, classifying it by the lexical rule: a name whose
    /// first character is lowercase is a variable, anything else a constant.
    pub fn atom(name: impl Into<String>) -> Term {
        let name = name.into();
        if is_variable_name(&name) {
            Term::Variable(Variable { name })
        } else {
            Term::Constant(Constant { name })
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// A term is ground when it contains no variables
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Constant(_) => true,
            Term::Compound(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Number of arguments; zero for atomic terms
    pub fn arity(&self) -> usize {
        match self {
            Term::Compound(_, args) => args.len(),
            _ => 0,
        }
    }

    /// Variables of this term in left-to-right order of first occurrence
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        self.collect_variables(&mut seen, &mut out);
        out
    }

    fn collect_variables(&self, seen: &mut HashSet<Variable>, out: &mut Vec<Variable>) {
        match self {
            Term::Variable(v) => {
                if seen.insert(v.clone()) {
                    out.push(v.clone());
                }
            }
            Term::Constant(_) => {}
            Term::Compound(_, args) => {
                for arg in args {
                    arg.collect_variables(seen, out);
                }
            }
        }
    }

    /// Nesting depth: atomic terms have depth 0
    pub fn depth(&self) -> usize {
        match self {
            Term::Compound(_, args) => 1 + args.iter().map(Term::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

// Display implementations produce text that `parse_term` reads back.

fn is_plain_word(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    write!(f, "'{}'", name.replace('\'', "''"))
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A lowercase-initial constant would read back as a variable
        if is_plain_word(&self.name) && !is_variable_name(&self.name) {
            write!(f, "{}", self.name)
        } else {
            write_quoted(f, &self.name)
        }
    }
}

impl fmt::Display for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_plain_word(&self.name) {
            write!(f, "{}", self.name)
        } else {
            write_quoted(f, &self.name)
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Compound(func, args) => {
                write!(f, "{}(", func)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_classification() {
        assert!(Term::atom("x").is_variable());
        assert!(Term::atom("riya").is_variable());
        assert_eq!(Term::atom("Riya"), Term::constant("Riya"));
        assert_eq!(Term::atom("42"), Term::constant("42"));
        assert_eq!(Term::atom("_tmp"), Term::constant("_tmp"));
    }

    #[test]
    fn test_compound_arity() {
        let t = Term::compound("f", vec![Term::var("x").unwrap(), Term::constant("A")]);
        assert_eq!(t.arity(), 2);
        assert!(!t.is_variable());
    }

    #[test]
    fn test_variables_first_occurrence_order() {
        let t = Term::compound(
            "f",
            vec![
                Term::var("y").unwrap(),
                Term::compound("g", vec![Term::var("x").unwrap(), Term::var("y").unwrap()]),
            ],
        );
        let names: Vec<String> = t.variables().into_iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, vec!["y", "x"]);
        assert!(!t.is_ground());
        assert!(Term::compound("f", vec![Term::constant("A")]).is_ground());
    }

    #[test]
    fn test_depth() {
        assert_eq!(Term::constant("A").depth(), 0);
        let t = Term::compound("f", vec![Term::compound("g", vec![Term::var("x").unwrap()])]);
        assert_eq!(t.depth(), 2);
    }

    #[test]
    fn test_display() {
        let t = Term::compound(
            "Eats",
            vec![Term::var("x").unwrap(), Term::constant("Apple")],
        );
        assert_eq!(t.to_string(), "Eats(x, Apple)");
        assert_eq!(Term::constant("a").to_string(), "'a'");
        assert_eq!(Term::constant("it's").to_string(), "'it''s'");
        assert_eq!(Term::compound("has space", vec![Term::var("x").unwrap()]).to_string(), "'has space'(x)");
    }

    #[test]
    fn test_uppercase_variable_rejected() {
        assert_eq!(Term::var("X"), None);
        assert_eq!(Variable::new("X"), None);
        assert_eq!(Variable::new("x y"), None);
        assert_eq!(Variable::new(""), None);
        assert!(serde_json::from_str::<Variable>("\"X\"").is_err());

        let v: Variable = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(v.name(), "x");
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"x\"");
    }
}
