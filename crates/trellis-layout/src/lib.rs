//! Weighted grid layout for Trellis components.
//!
//! This crate sizes the rows and columns of a grid so that every component
//! gets at least its minimum size, fixed components get exactly what they
//! need, and leftover space is shared out by per-row and per-column weights.
//!
//! # Architecture
//!
//! 1. **Component contract**: every participant answers space offers
//! 2. **Grid**: owns the cells, weights and padding
//! 3. **Solver**: iterates offers until allocations settle
//!
//! # Example
//!
//! ```
//! use trellis_core::Bounds;
//! use trellis_layout::{Block, Grid};
//!
//! let mut grid = Grid::new().with_padding(0.0, 10.0);
//! grid.add_component(0, 0, Block::new(50.0, 20.0).with_fixed_width(true))?;
//! grid.add_component(0, 1, Block::new(0.0, 20.0))?;
//!
//! let allocation = grid.compute_layout(Bounds::new(0.0, 0.0, 200.0, 40.0))?;
//! assert_eq!(allocation.column_widths(), vec![50.0, 140.0]);
//! # Ok::<(), trellis_core::LayoutError>(())
//! ```

mod aggregate;
mod block;
mod component;
mod grid;
mod solver;

pub use aggregate::{aggregate_fixedness, aggregate_minimum, proportional_space, resolve_weights, ZeroWeightPolicy};
pub use block::Block;
pub use component::{Component, SpaceRequest};
pub use grid::{ComponentId, Grid};
pub use solver::{solve, GridAllocation, SolverOptions};
