//! Layout calculation modules for imposition
//!
//! This module handles the pure geometry and ordering of page imposition:
//! - Booklet pairing (which logical page goes on which side of which sheet)
//! - Stack grids (how many pages tile a sheet, in which cells)
//! - Output layout types consumed by renderers and exporters

mod grid;
mod signature;
mod types;

pub use grid::*;
pub use signature::*;
pub use types::*;
