use sixdeg_core::{
    average_separation, bfs, missing_vertices, path_to_root, separations, AdjacencyMapGraph,
    Graph,
};
use std::time::Instant;

type BenchGraph = AdjacencyMapGraph<u64, &'static str>;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: sixdeg-bench [mode] [vertex_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Branching tree (deep paths, one component)");
        println!("  scalefree   Preferential attachment (hub-and-spoke)");
        println!("  smallworld  Ring lattice + random shortcuts");
        println!("  random      Uniform random edges (leaves stragglers unreachable)");
        println!("  barbell     Two dense clusters joined by a long bridge");
        println!();
        println!("Default vertex_count: 200000");
        return;
    }

    println!("sixdeg-bench");
    println!("============");
    println!();

    let generators: Vec<(&str, fn(u64) -> BenchGraph)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free", gen_scale_free)],
        "smallworld" => vec![("Small-world", gen_small_world)],
        "random" => vec![("Uniform random", gen_random)],
        "barbell" => vec![("Barbell", gen_barbell)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(u64) -> BenchGraph),
            ("Scale-free", gen_scale_free),
            ("Small-world", gen_small_world),
            ("Uniform random", gen_random),
            ("Barbell", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, vertex_count);
    }
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: fn(u64) -> BenchGraph, vertex_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} vertices", vertex_count);

    let t = Instant::now();
    let graph = generator(vertex_count);
    println!(
        "Generated in {:.2}s: {} vertices, {} directed edges, ~{:.0}MB",
        t.elapsed().as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
    println!();

    let t = Instant::now();
    let tree = match bfs(&graph, &0) {
        Ok(tree) => tree,
        Err(e) => {
            println!("bfs failed: {}", e);
            return;
        }
    };
    println!("{:<20} {:>10.1}ms  {} vertices in tree", "bfs", ms(t), tree.vertex_count());

    let t = Instant::now();
    let missing = missing_vertices(&graph, &tree);
    println!("{:<20} {:>10.1}ms  {} unreachable", "missing_vertices", ms(t), missing.len());

    let t = Instant::now();
    match average_separation(&tree, &0) {
        Ok(avg) => println!("{:<20} {:>10.1}ms  {:.3}", "average_separation", ms(t), avg),
        Err(e) => println!("average_separation failed: {}", e),
    }

    // Deepest vertex gives the longest root walk
    let deepest = separations(&tree, &0)
        .ok()
        .and_then(|depths| depths.into_iter().max_by_key(|&(v, depth)| (depth, v)));
    if let Some((far, depth)) = deepest {
        let t = Instant::now();
        match path_to_root(&tree, &far) {
            Ok(path) => println!(
                "{:<20} {:>10.3}ms  {} → 0: {} hops (depth {})",
                "path_to_root",
                ms(t),
                far,
                path.len() - 1,
                depth
            ),
            Err(e) => println!("path_to_root failed: {}", e),
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, undirected
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

const TITLES: [&str; 5] = ["Footloose", "Apollo 13", "Diner", "Tremors", "Mystic River"];

fn with_vertices(vertex_count: u64, edges_per_vertex: u64) -> BenchGraph {
    let mut graph = BenchGraph::with_capacity(
        vertex_count as usize,
        (vertex_count * edges_per_vertex) as usize,
    );
    for v in 0..vertex_count {
        graph.insert_vertex(v);
    }
    graph
}

/// Join two existing vertices. Generators only link vertices they inserted.
fn join(graph: &mut BenchGraph, rng: &mut FastRng, a: u64, b: u64) {
    let title = TITLES[rng.next(TITLES.len() as u64) as usize];
    if let Err(e) = graph.insert_undirected(&a, &b, title) {
        eprintln!("generator bug: {}", e);
    }
}

/// Each vertex gets three children: log-depth paths, exponential width.
fn gen_lsystem(vertex_count: u64) -> BenchGraph {
    let mut graph = with_vertices(vertex_count, 2);
    let mut rng = FastRng::new(42);

    for child in 1..vertex_count {
        join(&mut graph, &mut rng, (child - 1) / 3, child);
    }
    graph
}

/// Preferential attachment by sampling endpoints of existing edges, so
/// well-connected vertices attract more edges.
fn gen_scale_free(vertex_count: u64) -> BenchGraph {
    let edges_per_vertex = 5u64;
    let mut graph = with_vertices(vertex_count, edges_per_vertex * 2);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<u64> =
        Vec::with_capacity((vertex_count * edges_per_vertex * 2) as usize);

    let seed = 5u64.min(vertex_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            join(&mut graph, &mut rng, i, j);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for v in seed..vertex_count {
        for _ in 0..edges_per_vertex.min(v) {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != v {
                join(&mut graph, &mut rng, v, target);
                endpoints.push(v);
                endpoints.push(target);
            }
        }
    }
    graph
}

/// Watts-Strogatz: K nearest ring neighbors, each edge rewired with probability p.
fn gen_small_world(vertex_count: u64) -> BenchGraph {
    let k = 5u64;
    let p = 0.05f64;
    let mut graph = with_vertices(vertex_count, k * 2);
    let mut rng = FastRng::new(67890);

    for i in 0..vertex_count {
        for j in 1..=k {
            let neighbor = if rng.next_f64() < p {
                rng.next(vertex_count)
            } else {
                (i + j) % vertex_count
            };
            if neighbor != i {
                join(&mut graph, &mut rng, i, neighbor);
            }
        }
    }
    graph
}

/// Uniform random edges, about two per vertex: a giant component plus stragglers.
fn gen_random(vertex_count: u64) -> BenchGraph {
    let target_edges = vertex_count * 2;
    let mut graph = with_vertices(vertex_count, target_edges * 2 / vertex_count.max(1));
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let a = rng.next(vertex_count);
        let b = rng.next(vertex_count);
        if a != b {
            join(&mut graph, &mut rng, a, b);
        }
    }
    graph
}

/// Two random clusters joined by a chain of bridge vertices.
fn gen_barbell(vertex_count: u64) -> BenchGraph {
    let bridge_len = 10u64.min(vertex_count);
    let cluster = (vertex_count - bridge_len) / 2;
    let mut graph = with_vertices(vertex_count, 20);
    let mut rng = FastRng::new(99999);

    let b_start = cluster + bridge_len;
    for base in [0, b_start] {
        for i in 0..cluster {
            for _ in 0..10u64.min(cluster.saturating_sub(1)) {
                let target = rng.next(cluster);
                if target != i {
                    join(&mut graph, &mut rng, base + i, base + target);
                }
            }
        }
    }

    // Chain: last of cluster A → bridge → first of cluster B
    let mut prev = cluster.saturating_sub(1);
    for id in cluster..b_start.min(vertex_count) {
        join(&mut graph, &mut rng, prev, id);
        prev = id;
    }
    if b_start < vertex_count {
        join(&mut graph, &mut rng, prev, b_start);
    }
    graph
}
