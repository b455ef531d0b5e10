use tileroute_core::{Graph, Node};

use crate::pool::SearchState;

/// Shorthand for a node view of graph `G`.
pub type NodeOf<'g, G> = Node<'g, <G as Graph>::Id, <G as Graph>::Data>;

/// Estimate of the remaining cost from one node to the goal.
///
/// For optimal routes the estimate must never overestimate the true cost
/// (admissible). Returning `+∞` marks the node as hopeless.
///
/// Any `Fn(Node, Node) -> f64` is a heuristic that ignores the state
/// argument.
pub trait Heuristic<G: Graph> {
    /// Estimate the cost from `from` to `to`. `state` is the search state of
    /// `from` when it has one (neighbor relaxation), `None` for the start.
    fn estimate(
        &self,
        from: NodeOf<'_, G>,
        to: NodeOf<'_, G>,
        state: Option<&SearchState<G::Id>>,
    ) -> f64;
}

/// Cost of the edge between two adjacent nodes. Must be non-negative.
///
/// Any `Fn(Node, Node) -> f64` is a distance.
pub trait Distance<G: Graph> {
    /// Cost of moving from `from` to its neighbor `to`.
    fn distance(&self, from: NodeOf<'_, G>, to: NodeOf<'_, G>) -> f64;
}

/// Predicate over node payloads. Every edge into an excluded node costs
/// `+∞`, which models temporary obstructions without touching the graph.
///
/// Any `Fn(&Data) -> bool` is an exclusion predicate.
pub trait Exclusion<G: Graph> {
    /// Whether the node carrying `data` is excluded.
    fn is_excluded(&self, data: &G::Data) -> bool;
}

/// Constant zero estimate; turns A* into Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

/// Every edge costs 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitDistance;

/// Nothing is excluded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExclusion;

impl<G: Graph> Heuristic<G> for ZeroHeuristic {
    #[inline]
    fn estimate(
        &self,
        _: NodeOf<'_, G>,
        _: NodeOf<'_, G>,
        _: Option<&SearchState<G::Id>>,
    ) -> f64 {
        0.0
    }
}

impl<G: Graph> Distance<G> for UnitDistance {
    #[inline]
    fn distance(&self, _: NodeOf<'_, G>, _: NodeOf<'_, G>) -> f64 {
        1.0
    }
}

impl<G: Graph> Exclusion<G> for NoExclusion {
    #[inline]
    fn is_excluded(&self, _: &G::Data) -> bool {
        false
    }
}

impl<G, F> Heuristic<G> for F
where
    G: Graph,
    F: Fn(NodeOf<'_, G>, NodeOf<'_, G>) -> f64,
{
    #[inline]
    fn estimate(
        &self,
        from: NodeOf<'_, G>,
        to: NodeOf<'_, G>,
        _: Option<&SearchState<G::Id>>,
    ) -> f64 {
        self(from, to)
    }
}

impl<G, F> Distance<G> for F
where
    G: Graph,
    F: Fn(NodeOf<'_, G>, NodeOf<'_, G>) -> f64,
{
    #[inline]
    fn distance(&self, from: NodeOf<'_, G>, to: NodeOf<'_, G>) -> f64 {
        self(from, to)
    }
}

impl<G, F> Exclusion<G> for F
where
    G: Graph,
    F: Fn(&G::Data) -> bool,
{
    #[inline]
    fn is_excluded(&self, data: &G::Data) -> bool {
        self(data)
    }
}
