use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{GraphError, GraphResult};

/// Index into a graph's label arena.
type LabelId = usize;

/// Directed graph with labeled edges and at most one edge per ordered pair.
///
/// Traversals in this crate only touch a graph through this trait, so any
/// implementation honoring these contracts can be queried.
pub trait Graph {
    type Vertex: Eq + Hash + Clone;
    type Label;

    /// Add a vertex. Returns false (and does nothing) if it is already present.
    fn insert_vertex(&mut self, v: Self::Vertex) -> bool;

    fn has_vertex(&self, v: &Self::Vertex) -> bool;

    fn has_edge(&self, from: &Self::Vertex, to: &Self::Vertex) -> bool;

    /// Create or overwrite the `from → to` edge. Both endpoints must exist.
    fn insert_directed(
        &mut self,
        from: &Self::Vertex,
        to: &Self::Vertex,
        label: Self::Label,
    ) -> GraphResult<(), Self::Vertex>;

    /// Create or overwrite both `a → b` and `b → a`, sharing one stored label.
    fn insert_undirected(
        &mut self,
        a: &Self::Vertex,
        b: &Self::Vertex,
        label: Self::Label,
    ) -> GraphResult<(), Self::Vertex>;

    fn label(
        &self,
        from: &Self::Vertex,
        to: &Self::Vertex,
    ) -> GraphResult<&Self::Label, Self::Vertex>;

    /// Mutable label access. For an undirected edge the change is visible from both directions.
    fn label_mut(
        &mut self,
        from: &Self::Vertex,
        to: &Self::Vertex,
    ) -> GraphResult<&mut Self::Label, Self::Vertex>;

    /// Targets of edges leaving `v`. Empty if `v` is absent.
    fn out_neighbors(&self, v: &Self::Vertex) -> impl Iterator<Item = &Self::Vertex>;

    /// Sources of edges entering `v`. Empty if `v` is absent.
    fn in_neighbors(&self, v: &Self::Vertex) -> impl Iterator<Item = &Self::Vertex>;

    fn out_degree(&self, v: &Self::Vertex) -> usize;

    fn in_degree(&self, v: &Self::Vertex) -> usize;

    /// All vertices, in an implementation-defined order.
    fn vertices(&self) -> impl Iterator<Item = &Self::Vertex>;

    fn vertex_count(&self) -> usize;

    /// Number of directed edges (an undirected insertion counts twice).
    fn edge_count(&self) -> usize;
}

/// In-memory graph: outgoing and incoming adjacency maps + a label arena.
///
/// `outgoing[a][b]` and `incoming[b][a]` both hold the arena slot of the
/// `a → b` label. An undirected insertion stores its label once and points
/// both directions at the same slot. Every vertex has an entry in both maps,
/// possibly empty.
///
/// The maps use a fixed hasher, so vertex and neighbor order depend only on
/// the sequence of insertions: two graphs built the same way iterate the same
/// way, and BFS breaks ties identically on every run.
#[derive(Debug, Clone)]
pub struct AdjacencyMapGraph<V, E> {
    outgoing: FxHashMap<V, FxHashMap<V, LabelId>>,
    incoming: FxHashMap<V, FxHashMap<V, LabelId>>,
    labels: Vec<E>,
    /// Arena slots no edge points at any more, reused before the arena grows.
    free: Vec<LabelId>,
}

impl<V: Eq + Hash + Clone, E> AdjacencyMapGraph<V, E> {
    pub fn new() -> Self {
        Self {
            outgoing: FxHashMap::default(),
            incoming: FxHashMap::default(),
            labels: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            outgoing: FxHashMap::with_capacity_and_hasher(vertex_count, Default::default()),
            incoming: FxHashMap::with_capacity_and_hasher(vertex_count, Default::default()),
            labels: Vec::with_capacity(edge_count),
            free: Vec::new(),
        }
    }

    /// Bulk load undirected edges, inserting any missing endpoints first.
    pub fn load_undirected<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (V, V, E)>,
    {
        for (a, b, label) in edges {
            self.insert_vertex(a.clone());
            self.insert_vertex(b.clone());
            self.put_undirected(&a, &b, label);
        }
    }

    /// Bulk load directed edges, inserting any missing endpoints first.
    pub fn load_directed<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (V, V, E)>,
    {
        for (from, to, label) in edges {
            self.insert_vertex(from.clone());
            self.insert_vertex(to.clone());
            self.put_directed(&from, &to, label);
        }
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let entry = size_of::<V>() + size_of::<LabelId>() + 8;
        let vertices_mem = self.outgoing.len() * 2 * (size_of::<V>() + 48);
        let out_mem: usize = self.outgoing.values().map(|m| m.len() * entry).sum();
        let in_mem: usize = self.incoming.values().map(|m| m.len() * entry).sum();
        let labels_mem = self.labels.len() * size_of::<E>();
        let free_mem = self.free.len() * size_of::<LabelId>();

        vertices_mem + out_mem + in_mem + labels_mem + free_mem
    }

    /// Number of arena slots, live or waiting for reuse.
    pub fn label_slots(&self) -> usize {
        self.labels.len()
    }

    fn edge_slot(&self, from: &V, to: &V) -> Option<LabelId> {
        self.outgoing.get(from).and_then(|out| out.get(to)).copied()
    }

    fn store_label(&mut self, label: E) -> LabelId {
        match self.free.pop() {
            Some(id) => {
                self.labels[id] = label;
                id
            }
            None => {
                self.labels.push(label);
                self.labels.len() - 1
            }
        }
    }

    /// Point `from → to` at a label slot. Callers guarantee both endpoints exist.
    fn link(&mut self, from: &V, to: &V, id: LabelId) {
        if let Some(out) = self.outgoing.get_mut(from) {
            out.insert(to.clone(), id);
        }
        if let Some(inc) = self.incoming.get_mut(to) {
            inc.insert(from.clone(), id);
        }
    }

    /// Create or overwrite `from → to`. A slot of its own (a self-loop's
    /// included) is rewritten in place. A slot shared with `to → from` stays
    /// with the reverse edge.
    fn put_directed(&mut self, from: &V, to: &V, label: E) {
        let reverse = self.edge_slot(to, from);
        match self.edge_slot(from, to) {
            Some(id) if from == to || reverse != Some(id) => self.labels[id] = label,
            _ => {
                let id = self.store_label(label);
                self.link(from, to, id);
            }
        }
    }

    /// Create or overwrite both directions on one slot. If the two directions
    /// had separate slots, the second one is released.
    fn put_undirected(&mut self, a: &V, b: &V, label: E) {
        let forward = self.edge_slot(a, b);
        let reverse = self.edge_slot(b, a);
        let id = match forward.or(reverse) {
            Some(id) => {
                self.labels[id] = label;
                id
            }
            None => self.store_label(label),
        };
        self.link(a, b, id);
        self.link(b, a, id);
        if let (Some(f), Some(r)) = (forward, reverse) {
            if f != r {
                self.free.push(r);
            }
        }
    }

    fn require_vertex(&self, v: &V) -> GraphResult<(), V> {
        if self.outgoing.contains_key(v) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(v.clone()))
        }
    }

    fn slot(&self, from: &V, to: &V) -> GraphResult<LabelId, V> {
        self.require_vertex(from)?;
        self.require_vertex(to)?;
        self.edge_slot(from, to).ok_or_else(|| GraphError::UnknownEdge {
            from: from.clone(),
            to: to.clone(),
        })
    }
}

impl<V: Eq + Hash + Clone, E> Default for AdjacencyMapGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Eq + Hash + Clone, E> Graph for AdjacencyMapGraph<V, E> {
    type Vertex = V;
    type Label = E;

    fn insert_vertex(&mut self, v: V) -> bool {
        if self.outgoing.contains_key(&v) {
            return false;
        }
        self.incoming.insert(v.clone(), FxHashMap::default());
        self.outgoing.insert(v, FxHashMap::default());
        true
    }

    fn has_vertex(&self, v: &V) -> bool {
        self.outgoing.contains_key(v)
    }

    fn has_edge(&self, from: &V, to: &V) -> bool {
        self.outgoing
            .get(from)
            .is_some_and(|out| out.contains_key(to))
    }

    fn insert_directed(&mut self, from: &V, to: &V, label: E) -> GraphResult<(), V> {
        self.require_vertex(from)?;
        self.require_vertex(to)?;
        self.put_directed(from, to, label);
        Ok(())
    }

    fn insert_undirected(&mut self, a: &V, b: &V, label: E) -> GraphResult<(), V> {
        self.require_vertex(a)?;
        self.require_vertex(b)?;
        self.put_undirected(a, b, label);
        Ok(())
    }

    fn label(&self, from: &V, to: &V) -> GraphResult<&E, V> {
        let id = self.slot(from, to)?;
        Ok(&self.labels[id])
    }

    fn label_mut(&mut self, from: &V, to: &V) -> GraphResult<&mut E, V> {
        let id = self.slot(from, to)?;
        Ok(&mut self.labels[id])
    }

    fn out_neighbors(&self, v: &V) -> impl Iterator<Item = &V> {
        self.outgoing.get(v).into_iter().flat_map(|out| out.keys())
    }

    fn in_neighbors(&self, v: &V) -> impl Iterator<Item = &V> {
        self.incoming.get(v).into_iter().flat_map(|inc| inc.keys())
    }

    fn out_degree(&self, v: &V) -> usize {
        self.outgoing.get(v).map_or(0, |out| out.len())
    }

    fn in_degree(&self, v: &V) -> usize {
        self.incoming.get(v).map_or(0, |inc| inc.len())
    }

    fn vertices(&self) -> impl Iterator<Item = &V> {
        self.outgoing.keys()
    }

    fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    fn edge_count(&self) -> usize {
        self.outgoing.values().map(|out| out.len()).sum()
    }
}
