//! Data grid processing engine
//!
//! Turns a raw dataset into the exact rows a data grid displays: filtering,
//! global search, sorting, pagination and virtualized windowing, plus the
//! headless grid state (selection, column resizing, inline editing) that
//! drives them.

pub mod error;
pub mod model;
pub mod query;
pub mod view;

pub use model::Column;
pub use model::ColumnType;
pub use model::Row;
pub use model::Value;
pub use view::GridConfig;
pub use view::GridState;
pub use view::GridView;
