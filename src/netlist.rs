use crate::{Graph, PartitionError};
use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

impl Graph {
    /// Reads a netlist file with one edge per line: `<node> <node> [weight]`.
    pub fn deserialize_netlist<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
        Self::parse_netlist(BufReader::new(file)).with_context(|| format!("could not parse {}", path.display()))
    }

    /// Blank lines and `#` comments are skipped. Node names must start with `N`. A missing or
    /// non-numeric weight counts as 1. Malformed lines and self-loops are skipped with a warning.
    pub fn parse_netlist<R: BufRead>(reader: R) -> Result<Self> {
        let mut graph = Graph::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("could not read line {}", line_no + 1))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts = line.split_ascii_whitespace().collect::<Vec<_>>();
            if parts.len() < 2 || !parts[0].starts_with('N') || !parts[1].starts_with('N') {
                log::warn!("skipping malformed line {}: '{line}'", line_no + 1);
                continue;
            }
            let weight = parts
                .get(2)
                .filter(|w| w.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|w| w.parse::<u32>().ok())
                .unwrap_or(1);

            if let Err(e) = graph.add_edge(parts[0], parts[1], weight) {
                log::warn!("skipping line {}: {e}", line_no + 1);
            }
        }

        log::debug!(
            "parsed netlist with {} nodes and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Writes the graph in netlist format, edges ordered by vertex id.
    pub fn serialize_netlist<W: Write>(&self, mut writer: W, title: &str) -> Result<()> {
        writeln!(writer, "# {title}")?;
        writeln!(writer, "# Nodes: {}, Edges: {}", self.vertex_count(), self.edge_count())?;
        writeln!(writer)?;
        for (src, v) in self.vertices.iter().enumerate() {
            let mut edges = v.edges.iter().filter(|e| e.dst as usize > src).collect::<Vec<_>>();
            edges.sort_by_key(|e| e.dst);
            for e in edges {
                writeln!(writer, "{} {} {}", v.name, self.name(e.dst), e.weight)?;
            }
        }
        Ok(())
    }

    /// Generates a connected random graph on `N0..N{n-1}` with unit weights.
    ///
    /// A random spanning tree is built first, then the remaining edges are drawn uniformly from
    /// the unused vertex pairs. Requests above the complete graph's edge count are clamped.
    pub fn generate_connected<R: Rng>(num_nodes: usize, num_edges: usize, rng: &mut R) -> Result<Self, PartitionError> {
        if num_nodes == 0 {
            return Err(PartitionError::EmptyGraph);
        }
        if num_edges + 1 < num_nodes {
            return Err(PartitionError::NotEnoughEdges {
                vertices: num_nodes,
                requested: num_edges,
            });
        }
        let max_edges = num_nodes * (num_nodes - 1) / 2;
        let num_edges = if num_edges > max_edges {
            log::warn!("{num_edges} edges requested but at most {max_edges} are possible");
            max_edges
        } else {
            num_edges
        };

        let mut order = (0..num_nodes).collect::<Vec<_>>();
        order.shuffle(rng);

        let mut edges = Vec::with_capacity(num_edges);
        let mut used = vec![false; num_nodes * num_nodes];
        for i in 1..num_nodes {
            let u = order[rng.gen_range(0..i)];
            let v = order[i];
            let (lo, hi) = (u.min(v), u.max(v));
            used[lo * num_nodes + hi] = true;
            edges.push((lo, hi));
        }

        let mut remaining = Vec::with_capacity(max_edges - edges.len());
        for lo in 0..num_nodes {
            for hi in lo + 1..num_nodes {
                if !used[lo * num_nodes + hi] {
                    remaining.push((lo, hi));
                }
            }
        }
        remaining.shuffle(rng);
        edges.extend(remaining.into_iter().take(num_edges - edges.len()));
        edges.sort_unstable();

        let mut graph = Graph::new();
        for i in 0..num_nodes {
            graph.add_vertex(&format!("N{i}"));
        }
        for (lo, hi) in edges {
            graph.add_edge(&format!("N{lo}"), &format!("N{hi}"), 1)?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Graph, PartitionError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NETLIST: &str = "\
# sample
N0 N1 3

N1 N2
N2 N3 x
bad line
X1 N2 4
N3 N3 1
N1 N0 2
";

    #[test]
    fn parse_netlist_skips_malformed_lines() {
        let graph = Graph::parse_netlist(NETLIST.as_bytes()).unwrap();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        // later lines overwrite the weight of an existing edge
        assert_eq!(graph.edge_weight(0, 1), 2);
        assert_eq!(graph.edge_weight(1, 2), 1);
        assert_eq!(graph.edge_weight(2, 3), 1);
        assert_eq!(graph.vertex_id("X1"), None);
    }

    #[test]
    fn serialized_netlist_reads_back() {
        let graph = Graph::parse_netlist(NETLIST.as_bytes()).unwrap();
        let mut buf = Vec::new();
        graph.serialize_netlist(&mut buf, "copy").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("# copy\n# Nodes: 4, Edges: 3\n"));
        assert!(text.contains("N0 N1 2\n"));

        let copy = Graph::parse_netlist(text.as_bytes()).unwrap();
        assert_eq!(copy.total_edge_weight(), graph.total_edge_weight());
    }

    #[test]
    fn generated_graph_is_connected() {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = Graph::generate_connected(20, 40, &mut rng).unwrap();
        assert_eq!(graph.vertex_count(), 20);
        assert_eq!(graph.edge_count(), 40);
        assert!(graph.vertices.iter().all(|v| !v.edges.is_empty()));

        let mut visited = vec![false; 20];
        let mut stack = vec![0u32];
        while let Some(vx) = stack.pop() {
            if std::mem::replace(&mut visited[vx as usize], true) {
                continue;
            }
            stack.extend(graph.neighbours(vx).iter().map(|e| e.dst));
        }
        assert!(visited.iter().all(|&v| v));
    }

    #[test]
    fn generator_checks_edge_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Graph::generate_connected(10, 8, &mut rng).unwrap_err(),
            PartitionError::NotEnoughEdges { vertices: 10, requested: 8 }
        );
        let tree = Graph::generate_connected(10, 9, &mut rng).unwrap();
        assert_eq!(tree.edge_count(), 9);
        let complete = Graph::generate_connected(5, 100, &mut rng).unwrap();
        assert_eq!(complete.edge_count(), 10);
        let single = Graph::generate_connected(1, 0, &mut rng).unwrap();
        assert_eq!(single.vertex_count(), 1);
    }
}
