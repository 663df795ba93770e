//! Most General Unifier (MGU) computation

use crate::config::UnifyConfig;
use crate::fol::{Constant, ResolvedRef, Substitution, Term, Variable};
use thiserror::Error;
use tracing::{debug, trace};

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Errors that can occur during unification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnificationError {
    /// Occurs check failed - variable occurs in term
    #[error("occurs check failed: {0} occurs in {1}")]
    OccursCheck(Variable, Term),

    /// Functor names don't match
    #[error("functor clash: {0} vs {1}")]
    FunctorClash(String, String),

    /// Same functor, different number of arguments
    #[error("arity mismatch for {functor}: {left} vs {right}")]
    ArityMismatch {
        functor: String,
        left: usize,
        right: usize,
    },

    /// Constant symbols don't match
    #[error("constant clash: {0} vs {1}")]
    ConstantClash(Constant, Constant),

    /// Constant against compound
    #[error("cannot unify {0} with {1}")]
    ShapeMismatch(Term, Term),

    #[error("term nesting exceeds depth limit {0}")]
    DepthLimitExceeded(usize),
}

/// Unify two terms, returning a most general unifier (MGU) if one exists
pub fn unify(term1: &Term, term2: &Term) -> UnificationResult {
    let mut subst = Substitution::new();
    unify_with(term1, term2, &mut subst)?;
    Ok(subst)
}

/// Unify two terms, extending an existing substitution.
///
/// On failure the substitution is restored to its state before the call.
pub fn unify_with(
    term1: &Term,
    term2: &Term,
    subst: &mut Substitution,
) -> Result<(), UnificationError> {
    unify_with_config(term1, term2, subst, &UnifyConfig::default())
}

/// Unify two terms, extending an existing substitution, with explicit options.
///
/// With `config.max_depth` set, no traversal goes below that nesting level:
/// inputs are measured without recursion first, and bound variables are
/// dereferenced only as far as the unifier actually walks into them.
pub fn unify_with_config(
    term1: &Term,
    term2: &Term,
    subst: &mut Substitution,
    config: &UnifyConfig,
) -> Result<(), UnificationError> {
    Unifier { subst, config }.run(|u| {
        u.check_input(term1)?;
        u.check_input(term2)?;
        u.unify_terms(term1, term2, 0)
    })
}

/// Unify a variable with a term under an existing substitution.
///
/// Respects prior bindings of either side, then binds `var` to `term` unless
/// the occurs-check rejects it.
pub fn unify_var(
    var: &Variable,
    term: &Term,
    subst: &mut Substitution,
) -> Result<(), UnificationError> {
    let config = UnifyConfig::default();
    Unifier {
        subst,
        config: &config,
    }
    .run(|u| u.unify_terms(&Term::Variable(var.clone()), term, 0))
}

/// Check if variable occurs in term (occurs check)
pub fn occurs_check(var: &Variable, term: &Term) -> bool {
    match term {
        Term::Variable(v) => v == var,
        Term::Constant(_) => false,
        Term::Compound(_, args) => args.iter().any(|arg| occurs_check(var, arg)),
    }
}

/// Whether some subterm of `term` sits below nesting level `max`.
/// Uses an explicit stack, so arbitrarily deep input is safe to measure.
fn nested_deeper_than(term: &Term, max: usize) -> bool {
    let mut pending = vec![(term, 0usize)];
    while let Some((t, level)) = pending.pop() {
        if level > max {
            return true;
        }
        if let Term::Compound(_, args) = t {
            pending.extend(args.iter().map(|arg| (arg, level + 1)));
        }
    }
    false
}

/// State of one unification run: the substitution it owns exclusively for
/// the duration of the call, and its options.
struct Unifier<'a> {
    subst: &'a mut Substitution,
    config: &'a UnifyConfig,
}

impl Unifier<'_> {
    fn run(
        mut self,
        step: impl FnOnce(&mut Self) -> Result<(), UnificationError>,
    ) -> Result<(), UnificationError> {
        let mark = self.subst.mark();
        let result = step(&mut self);
        if let Err(err) = &result {
            if self.config.rollback_on_failure {
                debug!(undone = self.subst.mark() - mark, error = %err, "rolling back");
                self.subst.backtrack(mark);
            }
        }
        result
    }

    fn check_depth(&self, depth: usize) -> Result<(), UnificationError> {
        match self.config.max_depth {
            Some(max) if depth > max => Err(UnificationError::DepthLimitExceeded(max)),
            _ => Ok(()),
        }
    }

    fn check_input(&self, term: &Term) -> Result<(), UnificationError> {
        match self.config.max_depth {
            Some(max) if nested_deeper_than(term, max) => {
                Err(UnificationError::DepthLimitExceeded(max))
            }
            _ => Ok(()),
        }
    }

    /// Replace a bound variable by the end of its binding chain. Arguments of
    /// the result are left as they are; `None` means `term` is already final.
    fn dereference(&self, term: &Term) -> Option<Term> {
        let Term::Variable(var) = term else {
            return None;
        };
        match self.subst.resolve(var) {
            ResolvedRef::Unbound(end) if end == var => None,
            ResolvedRef::Unbound(end) => Some(Term::Variable(end.clone())),
            ResolvedRef::Term(bound) => Some(bound.clone()),
        }
    }

    fn unify_terms(&mut self, term1: &Term, term2: &Term, depth: usize) -> Result<(), UnificationError> {
        self.check_depth(depth)?;

        let deref1 = self.dereference(term1);
        let deref2 = self.dereference(term2);
        let t1 = deref1.as_ref().unwrap_or(term1);
        let t2 = deref2.as_ref().unwrap_or(term2);
        trace!(left = %t1, right = %t2, depth, "unify");

        match (t1, t2) {
            // var = var: never record a self-binding
            (Term::Variable(v1), Term::Variable(v2)) if v1 == v2 => Ok(()),

            // Both sides are dereferenced, so `v` is unbound here; with two
            // variables the left one gets bound
            (Term::Variable(v), t) | (t, Term::Variable(v)) => self.bind(v, t, depth),

            (Term::Compound(f1, args1), Term::Compound(f2, args2)) => {
                if f1.name != f2.name {
                    return Err(UnificationError::FunctorClash(
                        f1.name.clone(),
                        f2.name.clone(),
                    ));
                }
                if args1.len() != args2.len() {
                    return Err(UnificationError::ArityMismatch {
                        functor: f1.name.clone(),
                        left: args1.len(),
                        right: args2.len(),
                    });
                }

                // Left to right, each pair sees the bindings of the previous ones
                for (arg1, arg2) in args1.iter().zip(args2.iter()) {
                    self.unify_terms(arg1, arg2, depth + 1)?;
                }
                Ok(())
            }

            (Term::Constant(c1), Term::Constant(c2)) if c1 == c2 => Ok(()),
            (Term::Constant(c1), Term::Constant(c2)) => {
                Err(UnificationError::ConstantClash(c1.clone(), c2.clone()))
            }

            _ => Err(UnificationError::ShapeMismatch(t1.clone(), t2.clone())),
        }
    }

    /// Bind an unbound variable after the occurs-check
    fn bind(&mut self, var: &Variable, term: &Term, depth: usize) -> Result<(), UnificationError> {
        if self.occurs(var, term, depth)? {
            debug!(variable = %var, term = %term, "occurs check failed");
            return Err(UnificationError::OccursCheck(var.clone(), term.clone()));
        }

        debug!(variable = %var, term = %term, "bind");
        self.subst.bind(var.clone(), term.clone());
        Ok(())
    }

    /// Occurs-check that follows bindings lazily, one level at a time, under
    /// the same depth limit as unification.
    fn occurs(&self, var: &Variable, term: &Term, depth: usize) -> Result<bool, UnificationError> {
        self.check_depth(depth)?;
        match term {
            Term::Variable(v) => match self.subst.resolve(v) {
                ResolvedRef::Unbound(end) => Ok(end == var),
                ResolvedRef::Term(bound) => self.occurs(var, bound, depth),
            },
            Term::Constant(_) => Ok(false),
            Term::Compound(_, args) => {
                for arg in args {
                    if self.occurs(var, arg, depth + 1)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}
