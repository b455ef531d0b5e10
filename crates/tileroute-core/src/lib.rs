//! **tileroute-core** — core types for tile-graph routing.
//!
//! This crate provides the pieces a route resolver reads from: geometry
//! primitives, the [`Graph`] capability with its borrowed [`Node`] view, and
//! two graph producers: [`AdjacencyGraph`] for arbitrary ids and [`TileMap`]
//! for rectangular tile grids.

pub mod geom;
pub mod graph;
pub mod tilemap;

pub use geom::{Point, Range, RangeIter};
pub use graph::{AdjacencyGraph, Graph, Node};
pub use tilemap::{Connectivity, Terrain, Tile, TileMap, TileMapError};
