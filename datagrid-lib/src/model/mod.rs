//! Row, column and cell value models

mod coerce;
mod column;
mod format;
mod row;
mod value;

pub use coerce::*;
pub use column::*;
pub use format::*;
pub use row::*;
pub use value::*;
