//! Core use-case services.
//!
//! # Responsibility
//! - Sequence guard, validation and repository calls per use case.
//! - Keep the request layer decoupled from storage details.
//!
//! # Invariants
//! - Validation runs before any store call; a failed validation never
//!   reaches the store.
//! - A successful write is exactly one store mutation.

pub mod article_service;
pub mod user_service;
