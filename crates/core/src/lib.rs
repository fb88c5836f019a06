//! Domain logic for parking-validation records.
//!
//! Pure functions only: no I/O, no async. The sheet reader, the store client
//! and the admin API build on these.

pub mod cleanup;
pub mod decision;
pub mod dedup;
pub mod error;
pub mod issues;
pub mod status;
pub mod types;
