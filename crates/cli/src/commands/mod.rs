//! CLI command implementations.

mod evaluate;
mod reallocate;
mod select;

pub use evaluate::evaluate;
pub use reallocate::{reallocate_grid, render_weights};
pub use select::select;
