//! Crowd model shared by the demo binaries.
//!
//! Every tick, each agent asks one shared [`PathResolver`] for a route to its
//! goal and steps one tile along it. Tiles held by other agents are excluded,
//! so agents route around each other. The resolver runs best-effort with an
//! expansion budget: a blocked or distant agent still shuffles toward its
//! goal instead of freezing.

use rand::{Rng, RngExt};
use tileroute_core::{Connectivity, Node, Point, Terrain, Tile, TileMap};
use tileroute_paths::{PathResolver, ResolverConfig, SearchOutcome, octile};

pub const WIDTH: i32 = 48;
pub const HEIGHT: i32 = 20;
/// Expansion budget per route request.
pub const BUDGET: usize = 400;

type TileCost = fn(Node<'_, Point, Tile>, Node<'_, Point, Tile>) -> f64;
type TileFilter = fn(&Tile) -> bool;
type CrowdResolver = PathResolver<TileMap, TileCost, TileCost, TileFilter>;

// ---------------------------------------------------------------------------
// Cost callbacks
// ---------------------------------------------------------------------------

/// Octile distance; admissible for [`step_cost`] on an eight-way map.
pub fn estimate(from: Node<'_, Point, Tile>, to: Node<'_, Point, Tile>) -> f64 {
    octile(from.id, to.id)
}

/// Entry cost of the destination tile, scaled by √2 for diagonal steps.
pub fn step_cost(from: Node<'_, Point, Tile>, to: Node<'_, Point, Tile>) -> f64 {
    let base = to.data.terrain.entry_cost();
    if from.id.is_diagonal_to(to.id) {
        base * std::f64::consts::SQRT_2
    } else {
        base
    }
}

pub fn is_occupied(tile: &Tile) -> bool {
    tile.occupied
}

// ---------------------------------------------------------------------------
// Map generation
// ---------------------------------------------------------------------------

/// Random eight-way map: mostly open ground with scattered walls and rough
/// patches, and a bridge row across the middle.
pub fn random_map(rng: &mut impl Rng, width: i32, height: i32) -> TileMap {
    let mut map = TileMap::new(width, height, Connectivity::Eight);
    for p in map.range() {
        let terrain = match rng.random_range(0..100) {
            0..15 => Terrain::Wall,
            15..30 => Terrain::Rough,
            _ => Terrain::Open,
        };
        map.set_terrain(p, terrain);
    }
    let mid = height / 2;
    for x in 0..width {
        map.set_terrain(Point::new(x, mid), Terrain::Bridge);
    }
    map
}

fn random_free_tile(rng: &mut impl Rng, map: &TileMap) -> Option<Point> {
    let rg = map.range();
    for _ in 0..1000 {
        let p = Point::new(
            rng.random_range(0..rg.width().max(1)),
            rng.random_range(0..rg.height().max(1)),
        );
        if map.tile(p).is_some_and(|t| t.terrain.is_passable() && !t.occupied) {
            return Some(p);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Crowd
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    pub id: usize,
    pub pos: Point,
    pub goal: Point,
}

impl Agent {
    pub fn arrived(&self) -> bool {
        self.pos == self.goal
    }
}

/// What happened during one [`Crowd::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Agents that stepped one tile.
    pub moved: usize,
    /// Agents standing on their goal at the end of the tick.
    pub arrived: usize,
    /// Agents that had a goal but could not step.
    pub waiting: usize,
    /// Agents that moved along a best-effort partial route.
    pub partial: usize,
    /// Node expansions over all route requests.
    pub expanded: usize,
}

pub struct Crowd {
    map: TileMap,
    agents: Vec<Agent>,
    resolver: CrowdResolver,
    ticks: usize,
}

impl Crowd {
    /// Create an empty crowd on `map`. Occupancy flags are cleared.
    pub fn new(mut map: TileMap, budget: usize) -> Self {
        map.clear_occupancy();
        let config = ResolverConfig::default()
            .with_best_effort(true)
            .with_max_expanded_nodes(budget);
        let resolver = PathResolver::new(config)
            .with_heuristic(estimate as TileCost)
            .with_distance(step_cost as TileCost)
            .with_exclusion(is_occupied as TileFilter);
        Self {
            map,
            agents: Vec::new(),
            resolver,
            ticks: 0,
        }
    }

    /// Random map with `count` agents at random free tiles.
    pub fn random(rng: &mut impl Rng, width: i32, height: i32, count: usize) -> Self {
        let mut crowd = Self::new(random_map(rng, width, height), BUDGET);
        for _ in 0..count {
            let Some(pos) = random_free_tile(rng, &crowd.map) else {
                break;
            };
            // Goals may coincide; agents then queue around the spot.
            let goal = random_free_tile(rng, &crowd.map).unwrap_or(pos);
            crowd.add_agent(pos, goal);
        }
        crowd
    }

    /// Place an agent at `pos`. Returns its id, or `None` when `pos` is a
    /// wall, off the map, or already occupied.
    pub fn add_agent(&mut self, pos: Point, goal: Point) -> Option<usize> {
        if !self.map.tile(pos).is_some_and(|t| t.terrain.is_passable() && !t.occupied) {
            return None;
        }
        let id = self.agents.len();
        self.map.set_occupied(pos, true);
        self.agents.push(Agent { id, pos, goal });
        Some(id)
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Route every agent in turn and step it one tile.
    ///
    /// Agents move sequentially, so each request sees the occupancy left by
    /// the agents before it in the same tick.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        for i in 0..self.agents.len() {
            let agent = self.agents[i];
            if agent.arrived() {
                report.arrived += 1;
                continue;
            }

            let next = match self.resolver.find(&self.map, agent.pos, agent.goal) {
                // Goal first: the step to take is next to the start.
                Ok(route) if route.len() >= 2 => Some(route[route.len() - 2].id),
                Ok(_) => None,
                Err(err) => {
                    log::warn!("agent {}: {err}", agent.id);
                    None
                }
            };
            if let Some(stats) = self.resolver.last_search() {
                report.expanded += stats.expanded;
                if next.is_some() && matches!(stats.outcome, SearchOutcome::BestEffort { .. }) {
                    report.partial += 1;
                }
            }

            match next {
                Some(step) if !self.map.tile(step).is_some_and(|t| t.occupied) => {
                    self.map.set_occupied(agent.pos, false);
                    self.map.set_occupied(step, true);
                    self.agents[i].pos = step;
                    report.moved += 1;
                    if step == agent.goal {
                        report.arrived += 1;
                    }
                }
                _ => report.waiting += 1,
            }
        }
        self.ticks += 1;
        log::debug!("tick {}: {report:?}", self.ticks);
        report
    }

    /// Render the map with agents as `@` and unoccupied goals as `*`.
    pub fn render(&self) -> String {
        let rg = self.map.range();
        let mut out = String::with_capacity(rg.len() + rg.height().max(0) as usize);
        for y in 0..rg.height() {
            for x in 0..rg.width() {
                let p = Point::new(x, y);
                let ch = match self.map.tile(p) {
                    Some(t) if t.occupied => '@',
                    _ if self.agents.iter().any(|a| a.goal == p) => '*',
                    Some(t) => match t.terrain {
                        Terrain::Open => '.',
                        Terrain::Rough => ',',
                        Terrain::Bridge => '=',
                        Terrain::Wall => '#',
                    },
                    None => ' ',
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
