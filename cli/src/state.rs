use sixdeg_core::{
    average_separation, bfs, degree_ranking, missing_vertices, path_to_root, similar_centers,
    vertices_at_separation, Graph, GraphError,
};

use crate::error::{CliError, CliResult};
use crate::load::{CollabGraph, LoadSummary};
use crate::report::{
    AverageReport, DegreeEntry, DegreeReport, DegreeScope, Hop, MissingReport, PathReport,
    SimilarEntry, SimilarReport, StatsReport, WithinReport,
};

/// The loaded graph plus the shortest-path tree of the current center.
pub struct Session {
    graph: CollabGraph,
    summary: LoadSummary,
    center: String,
    tree: CollabGraph,
}

impl Session {
    pub fn new(graph: CollabGraph, summary: LoadSummary, center: &str) -> CliResult<Self> {
        let tree = build_tree(&graph, center)?;
        Ok(Self {
            graph,
            summary,
            center: center.to_string(),
            tree,
        })
    }

    pub fn center(&self) -> &str {
        &self.center
    }

    /// Move the center. On error the previous center and tree are kept.
    pub fn set_center(&mut self, center: &str) -> CliResult<()> {
        self.tree = build_tree(&self.graph, center)?;
        self.center = center.to_string();
        Ok(())
    }

    pub fn stats(&self) -> StatsReport {
        StatsReport {
            center: self.center.clone(),
            load: self.summary.clone(),
            tree_vertices: self.tree.vertex_count(),
            unreachable: self.graph.vertex_count() - self.tree.vertex_count(),
        }
    }

    /// Path from `actor` to the center. An actor outside the center's
    /// component gets an empty path and no separation.
    pub fn path(&self, actor: &str) -> CliResult<PathReport> {
        let actor = actor.to_string();
        if !self.graph.has_vertex(&actor) {
            return Err(CliError::UnknownActor(actor));
        }

        let path = match path_to_root(&self.tree, &actor) {
            Ok(path) => path,
            Err(GraphError::NotInTree(_)) => {
                return Ok(PathReport {
                    center: self.center.clone(),
                    actor,
                    separation: None,
                    path: Vec::new(),
                    hops: Vec::new(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let hops = path
            .windows(2)
            .map(|pair| -> CliResult<Hop> {
                let movies = self.tree.label(&pair[0], &pair[1])?;
                Ok(Hop {
                    from: pair[0].clone(),
                    to: pair[1].clone(),
                    movies: movies.iter().cloned().collect(),
                })
            })
            .collect::<CliResult<Vec<Hop>>>()?;

        Ok(PathReport {
            center: self.center.clone(),
            actor,
            separation: Some(path.len() - 1),
            path,
            hops,
        })
    }

    pub fn missing(&self) -> MissingReport {
        let mut actors: Vec<String> = missing_vertices(&self.graph, &self.tree)
            .into_iter()
            .collect();
        actors.sort();
        MissingReport {
            center: self.center.clone(),
            actors,
        }
    }

    pub fn average(&self) -> CliResult<AverageReport> {
        Ok(AverageReport {
            center: self.center.clone(),
            average_separation: average_separation(&self.tree, &self.center)?,
            reachable: self.tree.vertex_count(),
        })
    }

    pub fn within(&self, steps: usize) -> CliResult<WithinReport> {
        let mut actors: Vec<String> = vertices_at_separation(&self.tree, &self.center, steps)?
            .into_iter()
            .collect();
        actors.sort();
        Ok(WithinReport {
            center: self.center.clone(),
            steps,
            actors,
        })
    }

    /// Actors of the center's tree ranked by tree in-degree: how many actors
    /// reach the center through each one in a single hop.
    pub fn degree(&self, top: usize) -> DegreeReport {
        self.rank(&self.tree, DegreeScope::Tree, top)
    }

    /// Every actor ranked by number of costars, center or not.
    pub fn costars(&self, top: usize) -> DegreeReport {
        self.rank(&self.graph, DegreeScope::Graph, top)
    }

    fn rank(&self, graph: &CollabGraph, scope: DegreeScope, top: usize) -> DegreeReport {
        DegreeReport {
            center: self.center.clone(),
            scope,
            entries: degree_ranking(graph, top)
                .into_iter()
                .map(|d| DegreeEntry {
                    actor: d.vertex,
                    degree: d.in_degree,
                })
                .collect(),
        }
    }

    /// Actors whose own average separation is within `tolerance` of the center's.
    pub fn similar(&self, tolerance: f64) -> CliResult<SimilarReport> {
        let target = average_separation(&self.tree, &self.center)?;
        let centers = similar_centers(&self.graph, target, tolerance)?
            .into_iter()
            .map(|c| SimilarEntry {
                actor: c.vertex,
                average_separation: c.average_separation,
                reachable: c.reachable,
            })
            .collect();
        Ok(SimilarReport {
            center: self.center.clone(),
            target,
            tolerance,
            centers,
        })
    }
}

fn build_tree(graph: &CollabGraph, center: &str) -> CliResult<CollabGraph> {
    let center = center.to_string();
    match bfs(graph, &center) {
        Ok(tree) => Ok(tree),
        Err(GraphError::UnknownVertex(v)) if v == center => Err(CliError::UnknownActor(center)),
        Err(e) => Err(e.into()),
    }
}
