//! Shared helpers: input validation and the project change log.

pub mod changelog;
pub mod validation;
