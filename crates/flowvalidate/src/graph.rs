use flowcore::{WorkflowEdge, WorkflowNode};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};

/// Borrowed index over a canvas' nodes and edges.
///
/// Only edges whose endpoints both exist end up in the petgraph structure, so
/// cycle detection and reachability ignore dangling connections. Outgoing
/// counts and the connected set are taken from the raw edge list.
pub struct WorkflowGraph<'a> {
    graph: DiGraph<&'a str, ()>,
    index: HashMap<&'a str, NodeIndex>,
    out_degree: HashMap<&'a str, usize>,
    connected: HashSet<&'a str>,
    dangling: Vec<&'a WorkflowEdge>,
    duplicates: Vec<&'a str>,
}

impl<'a> WorkflowGraph<'a> {
    pub fn new(nodes: &'a [WorkflowNode], edges: &'a [WorkflowEdge]) -> Self {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        let mut duplicates = Vec::new();

        // Add all nodes, first occurrence of an id wins
        for node in nodes {
            let id = node.id.as_str();
            if index.contains_key(id) {
                duplicates.push(id);
                continue;
            }
            let idx = graph.add_node(id);
            index.insert(id, idx);
        }

        let mut out_degree: HashMap<&str, usize> = HashMap::new();
        let mut connected = HashSet::new();
        let mut dangling = Vec::new();

        // Add edges from connections
        for edge in edges {
            *out_degree.entry(edge.source.as_str()).or_default() += 1;
            connected.insert(edge.source.as_str());
            connected.insert(edge.target.as_str());

            match (index.get(edge.source.as_str()), index.get(edge.target.as_str())) {
                (Some(&from), Some(&to)) => {
                    graph.add_edge(from, to, ());
                }
                _ => dangling.push(edge),
            }
        }

        Self {
            graph,
            index,
            out_degree,
            connected,
            dangling,
            duplicates,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of edges leaving `node_id`, dangling ones included.
    pub fn out_degree(&self, node_id: &str) -> usize {
        self.out_degree.get(node_id).copied().unwrap_or(0)
    }

    /// Whether `node_id` is the source or target of any edge.
    pub fn is_connected(&self, node_id: &str) -> bool {
        self.connected.contains(node_id)
    }

    /// Self loops count as cycles.
    pub fn has_cycle(&self) -> bool {
        toposort(&self.graph, None).is_err()
    }

    /// Node ids in dependency order, or `None` when the graph is cyclic.
    pub fn topological_order(&self) -> Option<Vec<&'a str>> {
        toposort(&self.graph, None)
            .ok()
            .map(|order| order.into_iter().map(|idx| self.graph[idx]).collect())
    }

    /// Breadth-first closure of `starts` along outgoing edges, starts included.
    pub fn reachable_from<I>(&self, starts: I) -> HashSet<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen: HashSet<NodeIndex> = HashSet::new();
        let mut queue = VecDeque::new();

        for id in starts {
            if let Some(&idx) = self.index.get(id) {
                if seen.insert(idx) {
                    queue.push_back(idx);
                }
            }
        }

        while let Some(idx) = queue.pop_front() {
            for next in self.graph.neighbors(idx) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        seen.into_iter().map(|idx| self.graph[idx]).collect()
    }

    /// Edges whose source or target is not a known node.
    pub fn dangling_edges(&self) -> &[&'a WorkflowEdge] {
        &self.dangling
    }

    /// Node ids that appear more than once, once per repeat.
    pub fn duplicate_ids(&self) -> &[&'a str] {
        &self.duplicates
    }
}
