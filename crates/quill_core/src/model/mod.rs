//! Domain model for users, articles and their submission forms.
//!
//! # Responsibility
//! - Define canonical records shared by repositories, services and handlers.
//! - Own field validation for user-submitted forms.
//!
//! # Invariants
//! - Every record is identified by a stable UUID that is never reused.
//! - Every article has exactly one owner, fixed at creation.
//! - Validated field sets (`ArticleFields`, `RegistrationFields`) can only be
//!   obtained through form validation.

pub mod article;
pub mod form;
pub mod user;
