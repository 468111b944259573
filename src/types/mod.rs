//! Data types for the grid: column specs and records.

mod column;
mod value;

pub use column::*;
pub use value::*;
