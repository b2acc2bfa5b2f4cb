//! Loading the actor collaboration graph from `|`-delimited record files.
//!
//! Three files feed the graph: actor names by id, movie titles by id, and
//! the cast list pairing movie ids with actor ids. Every actor becomes a
//! vertex. Two actors who share a movie are joined by an undirected edge
//! labeled with the set of movie titles they share.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use sixdeg_core::{AdjacencyMapGraph, Graph};

use crate::config::DataFiles;
use crate::error::{CliError, CliResult};

/// Actor names as vertices, shared movie titles as edge labels.
pub type CollabGraph = AdjacencyMapGraph<String, BTreeSet<String>>;

pub type RecordId = u32;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    pub actors: usize,
    pub movies: usize,
    pub credits: usize,
    /// Cast rows naming an unknown movie or actor id.
    pub skipped_credits: usize,
    pub vertices: usize,
    /// Directed edge count; each collaboration counts twice.
    pub edges: usize,
    pub load_time_ms: f64,
}

/// Read all three files and build the collaboration graph.
pub fn load(files: &DataFiles) -> CliResult<(CollabGraph, LoadSummary)> {
    let start = Instant::now();

    let actors = read_id_map(&files.actors)?;
    let movies = read_id_map(&files.movies)?;
    let credits = read_credits(&files.movie_actors)?;
    log::debug!(
        "load: {} actors, {} movies, {} credits read",
        actors.len(),
        movies.len(),
        credits.len()
    );

    let (graph, skipped) = build_graph(&actors, &movies, &credits)?;

    let summary = LoadSummary {
        actors: actors.len(),
        movies: movies.len(),
        credits: credits.len(),
        skipped_credits: skipped,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        load_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };
    log::info!(
        "load: {} vertices, {} edges in {:.1}ms",
        summary.vertices,
        summary.edges,
        summary.load_time_ms
    );

    Ok((graph, summary))
}

/// Parse an `id|name` file. Everything after the first `|` is the name.
pub fn read_id_map(path: &Path) -> CliResult<BTreeMap<RecordId, String>> {
    let mut map = BTreeMap::new();
    for_each_record(path, |line, id, rest| {
        let id = parse_id(path, line, id)?;
        map.insert(id, rest.to_string());
        Ok(())
    })?;
    Ok(map)
}

/// Parse a `movie_id|actor_id` file into (movie, actor) pairs in file order.
pub fn read_credits(path: &Path) -> CliResult<Vec<(RecordId, RecordId)>> {
    let mut credits = Vec::new();
    for_each_record(path, |line, movie, actor| {
        credits.push((parse_id(path, line, movie)?, parse_id(path, line, actor)?));
        Ok(())
    })?;
    Ok(credits)
}

/// Build the graph. Returns it with the number of credits skipped for naming
/// an unknown id.
///
/// Actors are inserted by id and casts are linked by movie id, so the same
/// files always produce the same graph iteration order.
pub fn build_graph(
    actors: &BTreeMap<RecordId, String>,
    movies: &BTreeMap<RecordId, String>,
    credits: &[(RecordId, RecordId)],
) -> CliResult<(CollabGraph, usize)> {
    let mut graph = CollabGraph::with_capacity(actors.len(), credits.len());
    for name in actors.values() {
        graph.insert_vertex(name.clone());
    }

    // Group each movie's cast, members in file order.
    let mut casts: BTreeMap<RecordId, Vec<&String>> = BTreeMap::new();
    let mut skipped = 0;
    for &(movie_id, actor_id) in credits {
        match (movies.contains_key(&movie_id), actors.get(&actor_id)) {
            (true, Some(actor)) => casts.entry(movie_id).or_default().push(actor),
            _ => {
                log::warn!(
                    "load: skipping credit {}|{}, unknown movie or actor id",
                    movie_id,
                    actor_id
                );
                skipped += 1;
            }
        }
    }

    for (movie_id, cast) in &casts {
        let title = &movies[movie_id];
        for (i, &a) in cast.iter().enumerate() {
            for &b in &cast[i + 1..] {
                if a == b {
                    continue;
                }
                if graph.has_edge(a, b) {
                    graph.label_mut(a, b)?.insert(title.clone());
                } else {
                    graph.insert_undirected(a, b, BTreeSet::from([title.clone()]))?;
                }
            }
        }
    }

    Ok((graph, skipped))
}

/// Call `f(line_number, first_field, rest)` for every non-blank line of `path`.
fn for_each_record<F>(path: &Path, mut f: F) -> CliResult<()>
where
    F: FnMut(usize, &str, &str) -> CliResult<()>,
{
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| CliError::Io {
        path: display.clone(),
        source,
    })?;

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: display.clone(),
            source,
        })?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let (first, rest) = line.split_once('|').ok_or_else(|| CliError::Parse {
            path: display.clone(),
            line: idx + 1,
            reason: "expected two fields separated by '|'".to_string(),
        })?;
        f(idx + 1, first, rest)?;
    }

    Ok(())
}

fn parse_id(path: &Path, line: usize, field: &str) -> CliResult<RecordId> {
    field.trim().parse().map_err(|_| CliError::Parse {
        path: path.display().to_string(),
        line,
        reason: format!("invalid id '{}'", field),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sixdeg_core::{bfs, path_to_root};
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn universe_files(dir: &TempDir) -> DataFiles {
        DataFiles {
            actors: write(
                dir,
                "actors.txt",
                concat!(
                    "1|Alice\n2|Bob\n3|Charlie\n4|Kevin Bacon\n5|Dartmouth\n",
                    "6|Nobody\n7|Nobody's Friend\n",
                ),
            ),
            movies: write(
                dir,
                "movies.txt",
                "10|Movie A\n11|Movie B\n12|Movie C\n13|Movie D\n14|Movie E\n15|Movie F\n",
            ),
            movie_actors: write(
                dir,
                "movie-actors.txt",
                "10|1\n10|2\n10|4\n11|3\n11|5\n12|2\n12|3\n13|1\n13|3\n14|1\n14|4\n15|6\n15|7\n",
            ),
        }
    }

    #[test]
    fn test_load_universe() {
        let dir = TempDir::new().unwrap();
        let (graph, summary) = load(&universe_files(&dir)).unwrap();

        assert_eq!(summary.actors, 7);
        assert_eq!(summary.movies, 6);
        assert_eq!(summary.credits, 13);
        assert_eq!(summary.skipped_credits, 0);
        assert_eq!(graph.vertex_count(), 7);
        // Seven collaborations, each stored in both directions
        assert_eq!(graph.edge_count(), 14);

        let alice = "Alice".to_string();
        let kevin = "Kevin Bacon".to_string();
        let shared: Vec<&String> = graph.label(&kevin, &alice).unwrap().iter().collect();
        assert_eq!(shared, vec!["Movie A", "Movie E"]);
        assert_eq!(
            graph.label(&alice, &kevin).unwrap(),
            graph.label(&kevin, &alice).unwrap()
        );
    }

    #[test]
    fn test_reload_gives_same_paths() {
        let dir = TempDir::new().unwrap();
        let files = universe_files(&dir);
        let center = "Kevin Bacon".to_string();

        let (first, _) = load(&files).unwrap();
        let first_tree = bfs(&first, &center).unwrap();
        for _ in 0..20 {
            let (graph, _) = load(&files).unwrap();
            let tree = bfs(&graph, &center).unwrap();
            for actor in first_tree.vertices() {
                assert_eq!(
                    path_to_root(&tree, actor).unwrap(),
                    path_to_root(&first_tree, actor).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_isolated_actor_is_vertex() {
        let dir = TempDir::new().unwrap();
        let files = DataFiles {
            actors: write(&dir, "a.txt", "1|Solo\n2|Duo One\n3|Duo Two\n"),
            movies: write(&dir, "m.txt", "1|Pair\n"),
            movie_actors: write(&dir, "ma.txt", "1|2\n1|3\n"),
        };
        let (graph, _) = load(&files).unwrap();
        assert!(graph.has_vertex(&"Solo".to_string()));
        assert_eq!(graph.out_degree(&"Solo".to_string()), 0);
    }

    #[test]
    fn test_unknown_ids_skipped() {
        let dir = TempDir::new().unwrap();
        let files = DataFiles {
            actors: write(&dir, "a.txt", "1|Ann\n2|Ben\n"),
            movies: write(&dir, "m.txt", "1|Film\n"),
            movie_actors: write(&dir, "ma.txt", "1|1\n1|2\n1|99\n42|1\n"),
        };
        let (graph, summary) = load(&files).unwrap();
        assert_eq!(summary.skipped_credits, 2);
        assert!(graph.has_edge(&"Ann".to_string(), &"Ben".to_string()));
    }

    #[test]
    fn test_repeated_credit_adds_no_self_edge() {
        let actors = BTreeMap::from([(1, "Ann".to_string())]);
        let movies = BTreeMap::from([(1, "Film".to_string())]);
        let (graph, _) = build_graph(&actors, &movies, &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", "1|Ann\r\n\r\n2|Ben|Jr.\r\n");
        let map = read_id_map(&path).unwrap();
        assert_eq!(map[&1], "Ann");
        // Names may contain the delimiter
        assert_eq!(map[&2], "Ben|Jr.");
    }

    #[test]
    fn test_parse_error_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "ma.txt", "1|2\n\nx|3\n");
        match read_credits(&path) {
            Err(CliError::Parse { line, reason, .. }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("'x'"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", "1|Ann\njust a name\n");
        assert!(matches!(
            read_id_map(&path),
            Err(CliError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_id_map(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
