//! A* route resolution with a best-effort fallback and an expansion budget.

use rustc_hash::FxHashMap;
use tileroute_core::Graph;

use crate::config::ResolverConfig;
use crate::error::{Endpoint, UnknownNodeError};
use crate::heap::IndexedHeap;
use crate::pool::StatePool;
use crate::traits::{
    Distance, Exclusion, Heuristic, NoExclusion, NodeOf, UnitDistance, ZeroHeuristic,
};

/// How the last search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// Start and goal are the same node; nothing was searched.
    AlreadyThere,
    /// The goal was reached.
    Found,
    /// The start estimate was not finite and the goal is a direct neighbor
    /// of the start. Reported as an empty route without searching.
    AdjacentNonFinite,
    /// The open queue ran dry, or the goal only surfaced at infinite cost.
    Unreachable,
    /// The expansion budget ran out first.
    BudgetExhausted,
    /// The goal was not reached and the partial route to the closest
    /// touched node was returned.
    BestEffort { budget_exhausted: bool },
}

/// Counters for the last search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    pub outcome: SearchOutcome,
    /// Nodes popped and expanded (the quantity the budget bounds).
    pub expanded: usize,
    /// Search states issued from the pool.
    pub touched: usize,
}

/// Reusable A* resolver over any [`Graph`].
///
/// The resolver owns its state pool, open queue, by-id state map and
/// neighbor buffer, and reuses all of them across calls: after warm-up a
/// search allocates only the returned route. One resolver runs one search
/// at a time; use one resolver per worker for parallelism.
///
/// Cost callbacks are fixed at construction:
///
/// ```
/// use tileroute_core::{Connectivity, Node, Point, Tile, TileMap};
/// use tileroute_paths::{PathResolver, ResolverConfig, manhattan};
///
/// fn estimate(a: Node<'_, Point, Tile>, b: Node<'_, Point, Tile>) -> f64 {
///     manhattan(a.id, b.id)
/// }
///
/// let map = TileMap::new(3, 3, Connectivity::Four);
/// let mut resolver = PathResolver::<TileMap>::new(ResolverConfig::default())
///     .with_heuristic(estimate)
///     .with_exclusion(|t: &Tile| t.occupied);
/// let route = resolver.find(&map, Point::new(0, 0), Point::new(2, 2)).unwrap();
/// // Goal first, start last.
/// assert_eq!(route.first().map(|n| n.id), Some(Point::new(2, 2)));
/// assert_eq!(route.last().map(|n| n.id), Some(Point::new(0, 0)));
/// ```
pub struct PathResolver<G: Graph, H = ZeroHeuristic, D = UnitDistance, X = NoExclusion> {
    config: ResolverConfig,
    heuristic: H,
    distance: D,
    exclusion: X,
    pool: StatePool<G::Id>,
    open: IndexedHeap,
    by_id: FxHashMap<G::Id, usize>,
    nbuf: Vec<G::Id>,
    last: Option<SearchStats>,
}

impl<G: Graph> PathResolver<G> {
    /// Create a resolver with unit edge costs, a zero heuristic and no
    /// exclusions.
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            heuristic: ZeroHeuristic,
            distance: UnitDistance,
            exclusion: NoExclusion,
            pool: StatePool::new(),
            open: IndexedHeap::new(),
            by_id: FxHashMap::default(),
            nbuf: Vec::with_capacity(8),
            last: None,
        }
    }
}

impl<G: Graph> Default for PathResolver<G> {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl<G: Graph, H, D, X> PathResolver<G, H, D, X> {
    /// Replace the heuristic.
    pub fn with_heuristic<H2: Heuristic<G>>(self, heuristic: H2) -> PathResolver<G, H2, D, X> {
        PathResolver {
            config: self.config,
            heuristic,
            distance: self.distance,
            exclusion: self.exclusion,
            pool: self.pool,
            open: self.open,
            by_id: self.by_id,
            nbuf: self.nbuf,
            last: self.last,
        }
    }

    /// Replace the edge-cost function.
    pub fn with_distance<D2: Distance<G>>(self, distance: D2) -> PathResolver<G, H, D2, X> {
        PathResolver {
            config: self.config,
            heuristic: self.heuristic,
            distance,
            exclusion: self.exclusion,
            pool: self.pool,
            open: self.open,
            by_id: self.by_id,
            nbuf: self.nbuf,
            last: self.last,
        }
    }

    /// Replace the exclusion predicate.
    pub fn with_exclusion<X2: Exclusion<G>>(self, exclusion: X2) -> PathResolver<G, H, D, X2> {
        PathResolver {
            config: self.config,
            heuristic: self.heuristic,
            distance: self.distance,
            exclusion,
            pool: self.pool,
            open: self.open,
            by_id: self.by_id,
            nbuf: self.nbuf,
            last: self.last,
        }
    }

    /// The settings this resolver was built with.
    #[inline]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Counters for the most recent successful `find` call, `None` before
    /// the first call or after an [`UnknownNodeError`].
    #[inline]
    pub fn last_search(&self) -> Option<&SearchStats> {
        self.last.as_ref()
    }

    /// The state pool, holding the states touched by the most recent search
    /// that got past its trivial checks.
    #[inline]
    pub fn pool(&self) -> &StatePool<G::Id> {
        &self.pool
    }
}

impl<G, H, D, X> PathResolver<G, H, D, X>
where
    G: Graph,
    H: Heuristic<G>,
    D: Distance<G>,
    X: Exclusion<G>,
{
    /// Find a route from `from` to `to`.
    ///
    /// The route is ordered **goal first, start last**; reverse it for the
    /// direction of travel. An empty route means "already there" or "could
    /// not route". With `best_effort`, a failed search instead returns the
    /// route to the touched node with the smallest remaining-cost estimate,
    /// which is at least the start node itself.
    ///
    /// Fails only when `from` or `to` is not in the graph (`from` is checked
    /// first).
    pub fn find<'g>(
        &mut self,
        graph: &'g G,
        from: G::Id,
        to: G::Id,
    ) -> Result<Vec<NodeOf<'g, G>>, UnknownNodeError<G::Id>> {
        self.last = None;
        let start = graph
            .node(from)
            .ok_or(UnknownNodeError::new(from, Endpoint::From))?;
        let goal = graph
            .node(to)
            .ok_or(UnknownNodeError::new(to, Endpoint::To))?;

        if start.id == goal.id {
            self.finish(from, to, SearchOutcome::AlreadyThere, 0, 0);
            return Ok(Vec::new());
        }

        self.pool.reset();
        self.open.clear();
        self.by_id.clear();
        let high_water = self.pool.allocated();

        let goal_excluded = self.exclusion.is_excluded(goal.data);
        let start_slot = self.pool.create_new_state(from);
        self.by_id.insert(from, start_slot);
        let start_f = if goal_excluded {
            f64::INFINITY
        } else {
            self.heuristic.estimate(start, goal, None)
        };

        // A non-finite start estimate next to the goal is reported as
        // "nothing to do" rather than searched.
        if !start_f.is_finite() && self.is_linked(graph, from, to) {
            self.finish(from, to, SearchOutcome::AdjacentNonFinite, 0, 1);
            return Ok(Vec::new());
        }

        {
            let state = self.pool.get_mut(start_slot);
            state.f_score = start_f;
            state.distance_to_source = 0.0;
            state.open = true;
        }
        self.open.push(self.pool.issued_mut(), start_slot);

        let mut best = start_slot;
        let mut expanded = 0usize;
        let mut budget_exhausted = false;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let reached = 'search: loop {
            let Some(current_slot) = self.open.pop(self.pool.issued_mut()) else {
                break 'search None;
            };
            let (current_id, current_g) = {
                let state = self.pool.get(current_slot);
                (state.node, state.distance_to_source)
            };
            if current_id == goal.id {
                // Popped at infinite cost: the goal was queued but never
                // relaxed, so nothing still queued can reach it either.
                if current_g.is_finite() {
                    break 'search Some(current_slot);
                }
                break 'search None;
            }

            expanded += 1;
            if !self.config.is_within_budget(expanded) {
                budget_exhausted = true;
                break 'search None;
            }
            self.pool.get_mut(current_slot).closed = true;

            let Some(current) = graph.node(current_id) else {
                continue;
            };
            nbuf.clear();
            graph.neighbors(current_id, &mut nbuf);

            for &next_id in &nbuf {
                let Some(next) = graph.node(next_id) else {
                    continue;
                };
                let slot = match self.by_id.get(&next_id) {
                    Some(&slot) => slot,
                    None => {
                        let slot = self.pool.create_new_state(next_id);
                        self.by_id.insert(next_id, slot);
                        slot
                    }
                };
                if self.pool.get(slot).closed {
                    continue;
                }
                if !self.pool.get(slot).open {
                    self.pool.get_mut(slot).open = true;
                    self.open.push(self.pool.issued_mut(), slot);
                }

                let tentative = if self.exclusion.is_excluded(next.data) {
                    f64::INFINITY
                } else {
                    current_g + self.distance.distance(current, next)
                };
                let state = self.pool.get_mut(slot);
                if tentative >= state.distance_to_source {
                    continue;
                }
                state.parent = Some(current_slot);
                state.distance_to_source = tentative;
                let f_score = if goal_excluded {
                    f64::INFINITY
                } else {
                    tentative + self.heuristic.estimate(next, goal, Some(&*state))
                };
                state.f_score = f_score;
                let remaining = state.remaining_estimate();
                let heap_index = state.heap_index;

                if remaining < self.pool.get(best).remaining_estimate() {
                    best = slot;
                }
                if let Some(index) = heap_index {
                    self.open.update_item(self.pool.issued_mut(), index);
                }
            }
        };
        self.nbuf = nbuf;

        if self.pool.allocated() > high_water {
            log::debug!(
                "state pool grew from {high_water} to {} records",
                self.pool.allocated()
            );
        }
        if budget_exhausted {
            log::debug!(
                "route {from:?} -> {to:?}: expansion budget of {:?} exhausted",
                self.config.max_expanded_nodes
            );
        }

        let (outcome, terminal) = match reached {
            Some(slot) => (SearchOutcome::Found, Some(slot)),
            None if self.config.best_effort => {
                (SearchOutcome::BestEffort { budget_exhausted }, Some(best))
            }
            None if budget_exhausted => (SearchOutcome::BudgetExhausted, None),
            None => (SearchOutcome::Unreachable, None),
        };
        self.finish(from, to, outcome, expanded, self.pool.len());

        Ok(match terminal {
            Some(slot) => self.reconstruct(graph, slot),
            None => Vec::new(),
        })
    }

    /// Walk parent links from `terminal` back to the start. Goal first.
    fn reconstruct<'g>(&self, graph: &'g G, terminal: usize) -> Vec<NodeOf<'g, G>> {
        let mut route = Vec::new();
        let mut cursor = Some(terminal);
        while let Some(slot) = cursor {
            let state = self.pool.get(slot);
            if let Some(node) = graph.node(state.node) {
                route.push(node);
            }
            cursor = state.parent;
        }
        route
    }

    fn is_linked(&mut self, graph: &G, from: G::Id, to: G::Id) -> bool {
        self.nbuf.clear();
        graph.neighbors(from, &mut self.nbuf);
        self.nbuf.contains(&to)
    }

    fn finish(
        &mut self,
        from: G::Id,
        to: G::Id,
        outcome: SearchOutcome,
        expanded: usize,
        touched: usize,
    ) {
        log::trace!(
            "route {from:?} -> {to:?}: {outcome:?}, {expanded} expanded, {touched} touched"
        );
        self.last = Some(SearchStats {
            outcome,
            expanded,
            touched,
        });
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn stats_serialize_with_outcome_tag() {
        let stats = SearchStats {
            outcome: SearchOutcome::BestEffort {
                budget_exhausted: true,
            },
            expanded: 12,
            touched: 30,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("BestEffort"));
        let back: SearchStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
