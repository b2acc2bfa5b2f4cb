use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;

use crate::error::{GraphError, GraphResult};
use crate::graph::{AdjacencyMapGraph, Graph};

/// Degree information for a single vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeResult<V> {
    pub vertex: V,
    pub in_degree: usize,
    pub out_degree: usize,
}

/// A vertex whose own shortest-path tree has an average separation near a target.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterResult<V> {
    pub vertex: V,
    pub average_separation: f64,
    /// Size of the vertex's tree, itself included.
    pub reachable: usize,
}

/// Breadth-first shortest-path tree rooted at `source`.
///
/// The returned graph holds exactly the vertices reachable from `source`.
/// Every vertex except `source` has one outgoing edge, pointing at the vertex
/// it was discovered from and labeled with the input graph's `(child, parent)`
/// label. Edges point toward the root so a path is a chain of single hops.
///
/// Vertices are marked when enqueued, so each is expanded at most once.
/// Fails if `source` is not in `graph`, or if a discovered edge has no label
/// in the child → parent direction (possible only for directed graphs).
pub fn bfs<G>(
    graph: &G,
    source: &G::Vertex,
) -> GraphResult<AdjacencyMapGraph<G::Vertex, G::Label>, G::Vertex>
where
    G: Graph,
    G::Label: Clone,
{
    if !graph.has_vertex(source) {
        return Err(GraphError::UnknownVertex(source.clone()));
    }

    let mut tree: AdjacencyMapGraph<G::Vertex, G::Label> = AdjacencyMapGraph::new();
    let mut queue: VecDeque<G::Vertex> = VecDeque::new();

    tree.insert_vertex(source.clone());
    queue.push_back(source.clone());

    while let Some(current) = queue.pop_front() {
        for neighbor in graph.out_neighbors(&current) {
            if tree.has_vertex(neighbor) {
                continue;
            }
            let label = graph.label(neighbor, &current)?.clone();
            tree.insert_vertex(neighbor.clone());
            tree.insert_directed(neighbor, &current, label)?;
            queue.push_back(neighbor.clone());
        }
    }

    log::debug!(
        "bfs: tree reaches {} of {} vertices",
        tree.vertex_count(),
        graph.vertex_count()
    );
    Ok(tree)
}

/// Walk parent edges from `v` to the root of `tree`, both endpoints included.
///
/// `tree` must have out-degree at most one everywhere, as trees from [`bfs`]
/// do. A vertex with several outgoing edges has no single parent, so the
/// walk stops with [`GraphError::Branching`] instead of picking one.
pub fn path_to_root<G>(tree: &G, v: &G::Vertex) -> GraphResult<Vec<G::Vertex>, G::Vertex>
where
    G: Graph,
    G::Vertex: Debug,
{
    if !tree.has_vertex(v) {
        return Err(GraphError::NotInTree(v.clone()));
    }

    let mut path = vec![v.clone()];
    let mut current = v.clone();

    loop {
        let out_degree = tree.out_degree(&current);
        if out_degree == 0 {
            break;
        }
        if out_degree > 1 {
            log::warn!(
                "path_to_root: {:?} has {} outgoing edges, not a shortest-path tree",
                current,
                out_degree
            );
            return Err(GraphError::Branching {
                vertex: current,
                out_degree,
            });
        }
        // A simple path cannot be longer than the vertex set.
        if path.len() >= tree.vertex_count() {
            log::warn!("path_to_root: walk from {:?} loops", v);
            return Err(GraphError::Cycle(v.clone()));
        }

        let parent = match tree.out_neighbors(&current).next() {
            Some(parent) => parent.clone(),
            None => break,
        };
        path.push(parent.clone());
        current = parent;
    }

    Ok(path)
}

/// Vertices of `graph` that are absent from `subgraph`.
pub fn missing_vertices<G, S>(graph: &G, subgraph: &S) -> HashSet<G::Vertex>
where
    G: Graph,
    S: Graph<Vertex = G::Vertex>,
{
    graph
        .vertices()
        .filter(|v| !subgraph.has_vertex(v))
        .cloned()
        .collect()
}

/// Mean depth of the vertices of `tree`, measured in edges from `root`.
///
/// Children are found through incoming edges, since tree edges point at the
/// parent. The sum of depths is divided by the tree's full vertex count, so a
/// single-vertex tree averages 0.
pub fn average_separation<G>(tree: &G, root: &G::Vertex) -> GraphResult<f64, G::Vertex>
where
    G: Graph,
{
    let mut total: usize = 0;
    walk_down(tree, root, |_, depth| total += depth)?;
    Ok(total as f64 / tree.vertex_count() as f64)
}

/// Depth of every vertex below `root`, `root` included at depth 0.
pub fn separations<G>(
    tree: &G,
    root: &G::Vertex,
) -> GraphResult<HashMap<G::Vertex, usize>, G::Vertex>
where
    G: Graph,
{
    let mut depths = HashMap::with_capacity(tree.vertex_count());
    walk_down(tree, root, |v, depth| {
        depths.insert(v.clone(), depth);
    })?;
    Ok(depths)
}

/// Vertices exactly `steps` edges below `root`.
pub fn vertices_at_separation<G>(
    tree: &G,
    root: &G::Vertex,
    steps: usize,
) -> GraphResult<HashSet<G::Vertex>, G::Vertex>
where
    G: Graph,
{
    let mut found = HashSet::new();
    walk_down(tree, root, |v, depth| {
        if depth == steps {
            found.insert(v.clone());
        }
    })?;
    Ok(found)
}

/// Explicit-stack walk from `root` against the tree edges, visiting each vertex once.
fn walk_down<G, F>(tree: &G, root: &G::Vertex, mut visit: F) -> GraphResult<(), G::Vertex>
where
    G: Graph,
    F: FnMut(&G::Vertex, usize),
{
    if !tree.has_vertex(root) {
        return Err(GraphError::NotInTree(root.clone()));
    }

    let mut seen: HashSet<G::Vertex> = HashSet::with_capacity(tree.vertex_count());
    let mut stack: Vec<(G::Vertex, usize)> = vec![(root.clone(), 0)];
    seen.insert(root.clone());

    while let Some((vertex, depth)) = stack.pop() {
        visit(&vertex, depth);
        for child in tree.in_neighbors(&vertex) {
            if seen.insert(child.clone()) {
                stack.push((child.clone(), depth + 1));
            }
        }
    }

    Ok(())
}

/// Rank vertices by in-degree.
///
/// If `top_n` is 0, returns all vertices. Otherwise returns the top N by
/// in-degree (descending). Ties are broken by vertex (ascending).
pub fn degree_ranking<G>(graph: &G, top_n: usize) -> Vec<DegreeResult<G::Vertex>>
where
    G: Graph,
    G::Vertex: Ord,
{
    let mut results: Vec<DegreeResult<G::Vertex>> = graph
        .vertices()
        .map(|v| DegreeResult {
            vertex: v.clone(),
            in_degree: graph.in_degree(v),
            out_degree: graph.out_degree(v),
        })
        .collect();

    results.sort_by(|a, b| {
        b.in_degree
            .cmp(&a.in_degree)
            .then_with(|| a.vertex.cmp(&b.vertex))
    });

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}

/// Every vertex whose own shortest-path tree has an average separation in
/// `[target - tolerance, target + tolerance]`, sorted by vertex.
///
/// Builds one tree per vertex: O(V * (V + E)).
pub fn similar_centers<G>(
    graph: &G,
    target: f64,
    tolerance: f64,
) -> GraphResult<Vec<CenterResult<G::Vertex>>, G::Vertex>
where
    G: Graph,
    G::Vertex: Ord,
    G::Label: Clone,
{
    let bounds = (target - tolerance)..=(target + tolerance);
    let mut centers = Vec::new();

    for v in graph.vertices() {
        let tree = bfs(graph, v)?;
        let average = average_separation(&tree, v)?;
        if bounds.contains(&average) {
            centers.push(CenterResult {
                vertex: v.clone(),
                average_separation: average,
                reachable: tree.vertex_count(),
            });
        }
    }

    centers.sort_by(|a, b| a.vertex.cmp(&b.vertex));
    log::debug!(
        "similar_centers: {} of {} vertices within {} of {}",
        centers.len(),
        graph.vertex_count(),
        tolerance,
        target
    );
    Ok(centers)
}
