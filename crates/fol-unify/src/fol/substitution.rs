//! Variable substitutions

use super::term::{Term, Variable};
use indexmap::IndexMap;
use std::fmt;

/// A substitution mapping variables to terms.
///
/// Bindings are kept in the order they were made. Every binding made through
/// [`Substitution::bind`] is recorded on a trail, so a caller can take a
/// [`mark`](Substitution::mark) and later [`backtrack`](Substitution::backtrack)
/// to it.
///
/// The map is triangular: a bound term may mention other bound variables.
/// Use [`Term::apply_substitution`] or [`Substitution::resolved`] to see fully
/// dereferenced values.
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    map: IndexMap<Variable, Term>,
    trail: Vec<Variable>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: IndexMap::new(),
            trail: Vec::new(),
        }
    }

    /// Bind variable, recording on trail for backtracking.
    ///
    /// Callers are responsible for the occurs-check; the unifier is the only
    /// place that binds.
    pub(crate) fn bind(&mut self, var: Variable, term: Term) {
        self.trail.push(var.clone());
        self.map.insert(var, term);
    }

    /// Save current position for later backtrack
    #[inline]
    pub fn mark(&self) -> usize {
        self.trail.len()
    }

    /// Undo bindings back to saved position
    pub fn backtrack(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some(var) = self.trail.pop() {
                self.map.shift_remove(&var);
            }
        }
    }

    /// Get the term a variable is directly bound to, if any
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    /// Check if a variable is bound
    pub fn contains(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bindings in the order they were made
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.map.iter()
    }

    /// Follow a chain of variable-to-variable bindings starting at `var`.
    ///
    /// Returns the first term on the chain that is not a bound variable: an
    /// unbound variable or a non-variable term (whose arguments are not
    /// dereferenced).
    pub fn resolve<'a>(&'a self, var: &'a Variable) -> ResolvedRef<'a> {
        let mut current = var;
        loop {
            match self.map.get(current) {
                Some(Term::Variable(next)) => current = next,
                Some(term) => return ResolvedRef::Term(term),
                None => return ResolvedRef::Unbound(current),
            }
        }
    }

    /// A copy of this substitution in which every bound term is fully
    /// dereferenced, so each binding can be read on its own.
    pub fn resolved(&self) -> Substitution {
        let map = self
            .map
            .iter()
            .map(|(var, term)| (var.clone(), term.apply_substitution(self)))
            .collect();
        Substitution {
            map,
            trail: Vec::new(),
        }
    }
}

// The trail is bookkeeping for rollback, not part of the mapping.
impl PartialEq for Substitution {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl Eq for Substitution {}

/// End point of a variable chain, see [`Substitution::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRef<'a> {
    Unbound(&'a Variable),
    Term(&'a Term),
}

impl FromIterator<(Variable, Term)> for Substitution {
    /// Collect bindings without the occurs-check; meant for building expected
    /// values. The bindings must not form a cycle.
    fn from_iter<I: IntoIterator<Item = (Variable, Term)>>(iter: I) -> Self {
        Substitution {
            map: iter.into_iter().collect(),
            trail: Vec::new(),
        }
    }
}

impl Term {
    /// Apply a substitution to this term, dereferencing every variable fully.
    ///
    /// Terminates for any substitution built by the unifier, since the
    /// occurs-check keeps bindings acyclic.
    pub fn apply_substitution(&self, subst: &Substitution) -> Term {
        match self {
            Term::Variable(v) => match subst.resolve(v) {
                ResolvedRef::Unbound(u) => Term::Variable(u.clone()),
                ResolvedRef::Term(t) => t.apply_substitution(subst),
            },
            Term::Constant(_) => self.clone(),
            Term::Compound(f, args) => {
                let new_args = args
                    .iter()
                    .map(|arg| arg.apply_substitution(subst))
                    .collect();
                Term::Compound(f.clone(), new_args)
            }
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", var, term)?;
        }
        write!(f, "}}")
    }
}
