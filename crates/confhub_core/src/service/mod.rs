//! Scheduling use-case services.
//!
//! # Responsibility
//! - `validator`: read-only conflict and capacity predicates.
//! - `engine`: ordered rule evaluation and store mutation.
//! - `facade`: actor checks, locking and persistence orchestration for
//!   UI/CLI callers.

pub mod engine;
pub mod facade;
pub mod validator;
