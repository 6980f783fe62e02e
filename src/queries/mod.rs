//! Query modules for the margin SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Dataset`](crate::dataset::Dataset) snapshot and computes its answer in
//! memory. Queries never touch the source files.

pub mod details;
pub mod margins;
pub mod products;

pub use details::DetailQuery;
pub use margins::MarginQuery;
pub use products::ProductQuery;
