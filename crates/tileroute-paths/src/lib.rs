//! Allocation-frugal A* route resolution over arbitrary graphs.
//!
//! The crate is built around [`PathResolver`], which answers "route from
//! node A to node B" queries on anything implementing
//! [`tileroute_core::Graph`]. It is meant to be called many times per frame
//! (one query per moving unit), so it owns and recycles everything a search
//! needs:
//!
//! - a [`StatePool`] of per-node [`SearchState`] records, reset in O(1);
//! - an [`IndexedHeap`] open queue whose entries know their own position,
//!   so a priority change is re-sifted in O(log n) without a search;
//! - a by-id state map and a neighbor buffer.
//!
//! After warm-up a search allocates only the route it returns.
//!
//! Routes are returned **goal first, start last**. Costs come from three
//! pluggable callbacks:
//!
//! | Trait | Default | Closure form |
//! |---|---|---|
//! | [`Heuristic`] | [`ZeroHeuristic`] | `Fn(Node, Node) -> f64` |
//! | [`Distance`] | [`UnitDistance`] | `Fn(Node, Node) -> f64` |
//! | [`Exclusion`] | [`NoExclusion`] | `Fn(&Data) -> bool` |
//!
//! Behavior on failure is chosen by [`ResolverConfig`]: an exact search
//! returns an empty route, a best-effort search returns the route to the
//! touched node that looked closest to the goal.

mod config;
mod distance;
mod error;
mod heap;
mod pool;
mod resolver;
mod traits;

pub use config::ResolverConfig;
pub use distance::{chebyshev, euclidean, manhattan, octile};
pub use error::{Endpoint, UnknownNodeError};
pub use heap::{HeapEntry, IndexedHeap};
pub use pool::{SearchState, StatePool};
pub use resolver::{PathResolver, SearchOutcome, SearchStats};
pub use traits::{
    Distance, Exclusion, Heuristic, NoExclusion, NodeOf, UnitDistance, ZeroHeuristic,
};
