use dagql_core::{ConversionGraph, NodeIx};

/// Every simple path `S -> M` with its synthetic flow.
#[derive(Debug, Clone)]
pub struct PathFlows {
    paths: Vec<PathFlow>,
}

#[derive(Debug, Clone)]
struct PathFlow {
    /// Interior node ids, endpoints excluded.
    interior: Vec<String>,
    flow: f64,
    direct: bool,
}

impl PathFlows {
    /// Enumerate paths and classify them against `competing_hops`.
    pub fn new(
        graph: &ConversionGraph,
        split: &str,
        merge: &str,
        competing_hops: &[String],
        n_start: f64,
    ) -> Self {
        let (Some(s), Some(m)) = (graph.node_ix(split), graph.node_ix(merge)) else {
            return Self { paths: Vec::new() };
        };

        let paths = graph
            .simple_paths(s, m)
            .map(|path| {
                let interior: Vec<String> = graph
                    .ids(&path[1..path.len() - 1])
                    .into_iter()
                    .map(str::to_owned)
                    .collect();
                let direct = !interior.iter().any(|n| competing_hops.contains(n));
                PathFlow {
                    flow: path_flow(graph, &path, n_start),
                    interior,
                    direct,
                }
            })
            .collect();

        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn total_flow(&self) -> f64 {
        self.paths.iter().map(|p| p.flow).sum()
    }

    pub fn direct_flow(&self) -> f64 {
        self.paths.iter().filter(|p| p.direct).map(|p| p.flow).sum()
    }

    pub fn non_direct_flow(&self) -> f64 {
        self.paths.iter().filter(|p| !p.direct).map(|p| p.flow).sum()
    }

    /// Non-direct flow whose interior contains every node of `visited`.
    pub fn flow_visiting(&self, visited: &[String]) -> f64 {
        self.paths
            .iter()
            .filter(|p| !p.direct)
            .filter(|p| visited.iter().all(|v| p.interior.contains(v)))
            .map(|p| p.flow)
            .sum()
    }

    /// `(interior, flow)` for each path, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&[String], f64)> {
        self.paths.iter().map(|p| (p.interior.as_slice(), p.flow))
    }
}

fn path_flow(graph: &ConversionGraph, path: &[NodeIx], n_start: f64) -> f64 {
    path[..path.len() - 1]
        .iter()
        .fold(n_start, |flow, &node| flow / graph.out_degree(node) as f64)
}
