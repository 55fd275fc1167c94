//! Core types for the Trellis grid layout solver.
//!
//! This crate provides the foundational types shared by the layout crates:
//! - Geometry value types (sizes, bounds, axes)
//! - Error types

pub mod errors;
pub mod geometry;

pub use errors::*;
pub use geometry::*;
