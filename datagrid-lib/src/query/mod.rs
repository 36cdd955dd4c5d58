//! Row processing stages: ordering, filtering, searching and paging.
//!
//! A grid always runs them in the same order: [`filter`] then [`search`], then
//! [`sort`], then either [`page`] or the virtualization window in
//! [`crate::view::compute_window`]. Every stage borrows its input and returns a new
//! sequence.

pub mod compare;
pub mod filter;
pub mod order;
pub mod page;
pub mod search;
pub mod sort;

pub use compare::*;
pub use filter::*;
pub use order::*;
pub use page::*;
pub use search::*;
pub use sort::*;
