//! The graph capability consumed by route resolvers, and a general-purpose
//! adjacency-list implementation of it.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A borrowed view of one graph vertex: its stable id and its payload.
///
/// Views are cheap to copy. Routes are returned as sequences of them.
pub struct Node<'g, I, D> {
    pub id: I,
    pub data: &'g D,
}

impl<'g, I: Copy, D> Node<'g, I, D> {
    /// Create a view from an id and a payload reference.
    #[inline]
    pub fn new(id: I, data: &'g D) -> Self {
        Self { id, data }
    }
}

impl<I: Copy, D> Clone for Node<'_, I, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: Copy, D> Copy for Node<'_, I, D> {}

impl<I: fmt::Debug, D: fmt::Debug> fmt::Debug for Node<'_, I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("data", self.data)
            .finish()
    }
}

impl<I: PartialEq, D> PartialEq for Node<'_, I, D> {
    /// Nodes are equal when their ids are; payloads are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<I: Eq, D> Eq for Node<'_, I, D> {}

/// Minimal graph interface: id lookup and neighbor enumeration.
///
/// Implementations own topology and passability rules. A resolver only ever
/// reads through this trait.
pub trait Graph {
    /// Stable vertex identity.
    type Id: Copy + Eq + Hash + fmt::Debug;
    /// Opaque per-vertex payload handed to cost callbacks.
    type Data;

    /// Look up a vertex by id. Returns `None` for ids the graph does not know.
    fn node(&self, id: Self::Id) -> Option<Node<'_, Self::Id, Self::Data>>;

    /// Append the ids adjacent to `id` into `buf`. The caller clears `buf`
    /// before calling. Enumeration order affects tie-breaking only.
    fn neighbors(&self, id: Self::Id, buf: &mut Vec<Self::Id>);
}

// ---------------------------------------------------------------------------
// AdjacencyGraph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Vertex<I, D> {
    data: D,
    links: Vec<I>,
}

/// A directed graph stored as a hash map of insertion-ordered link lists.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph<I, D> {
    vertices: HashMap<I, Vertex<I, D>>,
}

impl<I, D> Default for AdjacencyGraph<I, D> {
    fn default() -> Self {
        Self {
            vertices: HashMap::new(),
        }
    }
}

impl<I: Copy + Eq + Hash + fmt::Debug, D> AdjacencyGraph<I, D> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex, or replace the payload of an existing one. Links
    /// are kept on replacement.
    pub fn add_node(&mut self, id: I, data: D) -> &mut Self {
        match self.vertices.get_mut(&id) {
            Some(v) => v.data = data,
            None => {
                self.vertices.insert(
                    id,
                    Vertex {
                        data,
                        links: Vec::new(),
                    },
                );
            }
        }
        self
    }

    /// Add a directed link `from -> to`.
    ///
    /// Returns `false` (and adds nothing) if either endpoint is missing or
    /// the link already exists.
    pub fn add_link(&mut self, from: I, to: I) -> bool {
        if !self.vertices.contains_key(&to) {
            return false;
        }
        let Some(v) = self.vertices.get_mut(&from) else {
            return false;
        };
        if v.links.contains(&to) {
            return false;
        }
        v.links.push(to);
        true
    }

    /// Add links in both directions between `a` and `b`.
    pub fn link(&mut self, a: I, b: I) -> &mut Self {
        self.add_link(a, b);
        self.add_link(b, a);
        self
    }

    /// Remove the directed link `from -> to`. Returns whether it existed.
    pub fn remove_link(&mut self, from: I, to: I) -> bool {
        let Some(v) = self.vertices.get_mut(&from) else {
            return false;
        };
        match v.links.iter().position(|&l| l == to) {
            Some(i) => {
                v.links.remove(i);
                true
            }
            None => false,
        }
    }

    /// Whether a vertex with this id exists.
    pub fn contains(&self, id: I) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Mutable access to a vertex payload.
    pub fn data_mut(&mut self, id: I) -> Option<&mut D> {
        self.vertices.get_mut(&id).map(|v| &mut v.data)
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl<I: Copy + Eq + Hash + fmt::Debug, D> Graph for AdjacencyGraph<I, D> {
    type Id = I;
    type Data = D;

    fn node(&self, id: I) -> Option<Node<'_, I, D>> {
        self.vertices.get(&id).map(|v| Node::new(id, &v.data))
    }

    fn neighbors(&self, id: I, buf: &mut Vec<I>) {
        if let Some(v) = self.vertices.get(&id) {
            buf.extend_from_slice(&v.links);
        }
    }
}
