//! Demo command implementations.

pub mod anneal;
pub mod backends;
pub mod common;
pub mod decompose;
pub mod run;
