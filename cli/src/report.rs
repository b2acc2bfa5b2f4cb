//! Query results, rendered as plain text or JSON.

use std::fmt;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::CliResult;
use crate::load::LoadSummary;

#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub center: String,
    pub load: LoadSummary,
    pub tree_vertices: usize,
    pub unreachable: usize,
}

/// One edge of a path, with the movies shared across it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hop {
    pub from: String,
    pub to: String,
    pub movies: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    pub center: String,
    pub actor: String,
    /// None when the actor has no path to the center.
    pub separation: Option<usize>,
    /// Actor first, center last. Empty when unreachable.
    pub path: Vec<String>,
    pub hops: Vec<Hop>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissingReport {
    pub center: String,
    pub actors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AverageReport {
    pub center: String,
    pub average_separation: f64,
    pub reachable: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WithinReport {
    pub center: String,
    pub steps: usize,
    pub actors: Vec<String>,
}

/// Which graph a degree ranking was taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeScope {
    /// The center's shortest-path tree: degree counts the actors whose next
    /// hop toward the center is this actor.
    Tree,
    /// The full collaboration graph: degree counts costars.
    Graph,
}

#[derive(Debug, Clone, Serialize)]
pub struct DegreeEntry {
    pub actor: String,
    pub degree: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DegreeReport {
    pub center: String,
    pub scope: DegreeScope,
    pub entries: Vec<DegreeEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarEntry {
    pub actor: String,
    pub average_separation: f64,
    pub reachable: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarReport {
    pub center: String,
    pub target: f64,
    pub tolerance: f64,
    pub centers: Vec<SimilarEntry>,
}

/// Print a report to stdout in the requested format.
pub fn emit<R: Serialize + fmt::Display>(report: &R, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return writeln!(f, "  (none)");
    }
    for item in items {
        writeln!(f, "  {}", item)?;
    }
    Ok(())
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "actors:          {}", self.load.actors)?;
        writeln!(f, "movies:          {}", self.load.movies)?;
        writeln!(
            f,
            "credits:         {} ({} skipped)",
            self.load.credits, self.load.skipped_credits
        )?;
        writeln!(f, "vertices:        {}", self.load.vertices)?;
        writeln!(f, "edges:           {}", self.load.edges)?;
        writeln!(f, "load time:       {:.1}ms", self.load.load_time_ms)?;
        writeln!(f, "center:          {}", self.center)?;
        writeln!(f, "reachable:       {}", self.tree_vertices)?;
        writeln!(f, "unreachable:     {}", self.unreachable)
    }
}

impl fmt::Display for PathReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(separation) = self.separation else {
            return writeln!(f, "{}: no path to {} (separation infinite)", self.actor, self.center);
        };
        writeln!(f, "{}: separation {} from {}", self.actor, separation, self.center)?;
        for hop in &self.hops {
            writeln!(f, "  {} -> {} [{}]", hop.from, hop.to, hop.movies.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for MissingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} actors with no path to {}:", self.actors.len(), self.center)?;
        write_list(f, &self.actors)
    }
}

impl fmt::Display for AverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "average separation from {}: {:.4} over {} actors",
            self.center, self.average_separation, self.reachable
        )
    }
}

impl fmt::Display for WithinReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} actors at separation {} from {}:",
            self.actors.len(),
            self.steps,
            self.center
        )?;
        write_list(f, &self.actors)
    }
}

impl fmt::Display for DegreeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = match self.scope {
            DegreeScope::Tree => {
                writeln!(
                    f,
                    "Actors connected to {}, by direct links in its tree:",
                    self.center
                )?;
                "links"
            }
            DegreeScope::Graph => {
                writeln!(f, "All actors, by number of costars:")?;
                "costars"
            }
        };
        writeln!(f, "{:>8}  actor", column)?;
        for entry in &self.entries {
            writeln!(f, "{:>8}  {}", entry.degree, entry.actor)?;
        }
        Ok(())
    }
}

impl fmt::Display for SimilarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} actors with average separation {:.4} ± {} (like {}):",
            self.centers.len(),
            self.target,
            self.tolerance,
            self.center
        )?;
        for entry in &self.centers {
            writeln!(
                f,
                "  {:.4}  {:>8}  {}",
                entry.average_separation, entry.reachable, entry.actor
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_path_json() {
        let report = PathReport {
            center: "Kevin Bacon".to_string(),
            actor: "Nobody".to_string(),
            separation: None,
            path: Vec::new(),
            hops: Vec::new(),
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert!(json["separation"].is_null());
        assert!(report.to_string().contains("infinite"));
    }

    #[test]
    fn test_path_text_lists_hops() {
        let report = PathReport {
            center: "C".to_string(),
            actor: "A".to_string(),
            separation: Some(2),
            path: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            hops: vec![
                Hop {
                    from: "A".to_string(),
                    to: "B".to_string(),
                    movies: vec!["One".to_string(), "Two".to_string()],
                },
                Hop {
                    from: "B".to_string(),
                    to: "C".to_string(),
                    movies: vec!["Three".to_string()],
                },
            ],
        };
        let text = report.to_string();
        assert!(text.starts_with("A: separation 2 from C"));
        assert!(text.contains("A -> B [One, Two]"));
        assert!(text.contains("B -> C [Three]"));
    }

    #[test]
    fn test_degree_scope_in_output() {
        let report = DegreeReport {
            center: "C".to_string(),
            scope: DegreeScope::Tree,
            entries: vec![DegreeEntry {
                actor: "B".to_string(),
                degree: 2,
            }],
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scope"], "tree");
        assert_eq!(json["entries"][0]["degree"], 2);

        let text = report.to_string();
        assert!(text.starts_with("Actors connected to C"));
        assert!(text.contains("links"));
    }

    #[test]
    fn test_empty_list_text() {
        let report = MissingReport {
            center: "C".to_string(),
            actors: Vec::new(),
        };
        assert!(report.to_string().contains("(none)"));
    }
}
