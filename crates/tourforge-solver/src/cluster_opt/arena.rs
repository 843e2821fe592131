//! Work buffers for the cluster optimization dynamic program.

use tourforge_core::Cost;

/// Per-vertex cost-to-go and arg-min successor, indexed by vertex ID.
///
/// Owned by a [`ClusterOptimizer`](super::ClusterOptimizer) and reused
/// across solves; [`reset`](Self::reset) only reallocates when the vertex
/// count grows.
#[derive(Debug, Clone)]
pub struct DynProgArena<C> {
    cost_to_go: Vec<C>,
    best_next: Vec<usize>,
}

impl<C: Cost> DynProgArena<C> {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            cost_to_go: vec![C::max_value(); num_vertices],
            best_next: vec![usize::MAX; num_vertices],
        }
    }

    /// Sizes the arena for `num_vertices` vertices and clears every entry.
    pub fn reset(&mut self, num_vertices: usize) {
        self.cost_to_go.resize(num_vertices, C::max_value());
        self.best_next.resize(num_vertices, usize::MAX);
        self.clear();
    }

    pub fn clear(&mut self) {
        self.cost_to_go.fill(C::max_value());
        self.best_next.fill(usize::MAX);
    }

    pub fn num_vertices(&self) -> usize {
        self.cost_to_go.len()
    }

    pub fn cost_to_go(&self, v: usize) -> C {
        self.cost_to_go[v]
    }

    /// Successor chosen for `v` on its cheapest path to the cut vertex.
    pub fn best_next(&self, v: usize) -> usize {
        self.best_next[v]
    }

    pub fn set(&mut self, v: usize, cost_to_go: C, best_next: usize) {
        self.cost_to_go[v] = cost_to_go;
        self.best_next[v] = best_next;
    }
}

impl<C: Cost> Default for DynProgArena<C> {
    fn default() -> Self {
        Self::new(0)
    }
}
