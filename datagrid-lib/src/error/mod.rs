//! Error types

mod config;
mod edit;
mod field;

pub use config::*;
pub use edit::*;
pub use field::*;
