//! Built-in compilation passes.

pub mod check;
pub mod legalize;

pub use check::ConstraintCheck;
pub use legalize::{GateLegalization, legalize_gate};
