//! Request identity and ownership-based authorization.
//!
//! # Responsibility
//! - Represent the caller of one request (anonymous or authenticated).
//! - Decide whether an identity may perform an action on an article.
//!
//! # Invariants
//! - Identity is always passed explicitly; core never reads ambient session
//!   state.
//! - Authorization is a pure function of identity, article and action.

pub mod guard;
pub mod identity;
