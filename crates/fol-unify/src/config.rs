//! Unifier configuration types.

/// Configuration for a unification call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifyConfig {
    /// Undo the bindings made by a call that ends in failure, leaving a
    /// threaded substitution exactly as it was before the call. When false,
    /// bindings made for earlier argument pairs stay in place and the caller
    /// must discard the substitution.
    pub rollback_on_failure: bool,
    /// Deepest nesting level the unifier (and `unify_expressions`' parser)
    /// will walk to; the outermost term is level 0. None means no limit.
    pub max_depth: Option<usize>,
}

impl Default for UnifyConfig {
    fn default() -> Self {
        UnifyConfig {
            rollback_on_failure: true,
            max_depth: None,
        }
    }
}

impl UnifyConfig {
    /// The behaviour of a plain in-place unifier: no rollback, no depth limit
    pub fn keep_partial() -> Self {
        UnifyConfig {
            rollback_on_failure: false,
            ..Default::default()
        }
    }
}
