//! Divide-and-conquer merging of planar Voronoi diagrams.
//!
//! This crate implements the merge step of the divide-and-conquer Voronoi
//! construction: given two diagrams computed over horizontally separated
//! point sets, [`merge`] produces the diagram of the union by walking the
//! dividing chain between them, cutting the edges the chain crosses and
//! pruning the ones stranded on the wrong side.
//!
//! Per-half construction (e.g. Fortune's sweep) and the recursive driver
//! that splits the input and composes merges are external collaborators;
//! they hand this crate [`Diagram`] values in the shape described on that
//! type.
//!
//! # Example
//!
//! ```
//! use dc_voronoi::{merge, Diagram, Point, Site};
//!
//! let left = Diagram::single(Site::new(0, Point::new(0.0, 0.0)));
//! let right = Diagram::single(Site::new(1, Point::new(2.0, 0.0)));
//!
//! let merged = merge(left, right).expect("separated inputs");
//! assert_eq!(merged.num_edges(), 1);
//! assert_eq!(merged.hull.len(), 2);
//! ```

pub mod geometry;
pub mod hull;
pub mod validation;

mod diagram;
mod error;
mod merge;
mod types;

pub use diagram::Diagram;
pub use error::MergeError;
pub use merge::merge;
pub use types::{Edge, Point, Site, SiteId};
