//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod credit;
pub mod health;
pub mod mrv;
pub mod project;
pub mod public;
