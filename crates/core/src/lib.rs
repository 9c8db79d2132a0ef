//! Domain logic for the blue carbon registry.
//!
//! This crate has no I/O: it defines the status state machines (project
//! lifecycle, MRV verification, credit ledger), the validation rules applied
//! before anything is persisted, serial-number generation, the ledger hash
//! chain, and the shared error taxonomy. The `db` and `api` crates consume
//! it; nothing here depends on them.

pub mod audit;
pub mod error;
pub mod hashing;
pub mod ledger;
pub mod mrv;
pub mod project;
pub mod roles;
pub mod serial;
pub mod types;
