//! Row models and DTOs, one module per entity.

pub mod credit;
pub mod mrv_submission;
pub mod profile;
pub mod project;
pub mod public;
pub mod session;
pub mod transaction;
