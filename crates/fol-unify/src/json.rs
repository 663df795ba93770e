//! JSON serialization types for unification results

use crate::error::Error;
use crate::fol::{InvalidVariableName, Substitution, Term, Variable};
use serde::{Deserialize, Serialize};

/// JSON representation of a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TermJson {
    Variable { name: String },
    Constant { name: String },
    Compound { name: String, args: Vec<TermJson> },
}

impl From<&Term> for TermJson {
    fn from(term: &Term) -> Self {
        match term {
            Term::Variable(v) => TermJson::Variable {
                name: v.name().to_string(),
            },
            Term::Constant(c) => TermJson::Constant {
                name: c.name.clone(),
            },
            Term::Compound(func, args) => TermJson::Compound {
                name: func.name.clone(),
                args: args.iter().map(TermJson::from).collect(),
            },
        }
    }
}

impl TryFrom<&TermJson> for Term {
    type Error = InvalidVariableName;

    fn try_from(json: &TermJson) -> Result<Self, Self::Error> {
        Ok(match json {
            TermJson::Variable { name } => {
                Term::Variable(Variable::try_from(name.clone())?)
            }
            TermJson::Constant { name } => Term::constant(name.as_str()),
            TermJson::Compound { name, args } => Term::compound(
                name.as_str(),
                args.iter().map(Term::try_from).collect::<Result<_, _>>()?,
            ),
        })
    }
}

/// JSON representation of one binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingJson {
    pub variable: String,
    /// The bound term in readable form
    pub text: String,
    pub term: TermJson,
}

/// JSON representation of a substitution, bindings fully dereferenced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionJson {
    pub bindings: Vec<BindingJson>,
}

impl From<&Substitution> for SubstitutionJson {
    fn from(subst: &Substitution) -> Self {
        let resolved = subst.resolved();
        SubstitutionJson {
            bindings: resolved
                .iter()
                .map(|(var, term)| BindingJson {
                    variable: var.name().to_string(),
                    text: term.to_string(),
                    term: TermJson::from(term),
                })
                .collect(),
        }
    }
}

/// JSON representation of a unification outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum UnifyResultJson {
    Unified { substitution: SubstitutionJson },
    Failed { reason: String },
    InvalidInput { reason: String },
}

impl UnifyResultJson {
    pub fn from_result(result: &Result<Substitution, Error>) -> Self {
        match result {
            Ok(subst) => UnifyResultJson::Unified {
                substitution: SubstitutionJson::from(subst),
            },
            Err(Error::Unification(e)) => UnifyResultJson::Failed {
                reason: e.to_string(),
            },
            Err(Error::Parse(e)) => UnifyResultJson::InvalidInput {
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unification::{unify, UnificationError};

    #[test]
    fn test_term_json_shape() {
        let term = Term::compound("Eats", vec![Term::var("x").unwrap(), Term::constant("Apple")]);
        let value = serde_json::to_value(TermJson::from(&term)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "Compound",
                "name": "Eats",
                "args": [
                    {"type": "Variable", "name": "x"},
                    {"type": "Constant", "name": "Apple"}
                ]
            })
        );
    }

    #[test]
    fn test_term_json_back_to_term() {
        let term = Term::compound("f", vec![Term::var("x").unwrap(), Term::compound("g", vec![Term::constant("A")])]);
        let json = TermJson::from(&term);
        let text = serde_json::to_string(&json).unwrap();
        let parsed: TermJson = serde_json::from_str(&text).unwrap();
        assert_eq!(Term::try_from(&parsed), Ok(term));
    }

    #[test]
    fn test_term_json_rejects_uppercase_variable() {
        let json: TermJson = serde_json::from_str(r#"{"type": "Variable", "name": "X"}"#).unwrap();
        assert_eq!(
            Term::try_from(&json),
            Err(InvalidVariableName("X".to_string()))
        );
    }

    #[test]
    fn test_substitution_json_is_resolved() {
        let t1 = Term::compound("f", vec![Term::var("x").unwrap(), Term::var("y").unwrap()]);
        let t2 = Term::compound("f", vec![Term::var("y").unwrap(), Term::constant("A")]);
        let subst = unify(&t1, &t2).unwrap();

        let json = SubstitutionJson::from(&subst);
        let texts: Vec<(&str, &str)> = json
            .bindings
            .iter()
            .map(|b| (b.variable.as_str(), b.text.as_str()))
            .collect();
        assert_eq!(texts, vec![("x", "A"), ("y", "A")]);
    }

    #[test]
    fn test_result_json_tags() {
        let failed: Result<Substitution, Error> = Err(Error::Unification(
            UnificationError::FunctorClash("f".to_string(), "g".to_string()),
        ));
        let value = serde_json::to_value(UnifyResultJson::from_result(&failed)).unwrap();
        assert_eq!(value["result"], "Failed");
        assert_eq!(value["reason"], "functor clash: f vs g");
    }
}
