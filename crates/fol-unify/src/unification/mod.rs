//! Unification and occurs-check for first-order terms

pub mod mgu;


pub use mgu::{
    occurs_check, unify, unify_var, unify_with, unify_with_config, UnificationError,
    UnificationResult,
};
