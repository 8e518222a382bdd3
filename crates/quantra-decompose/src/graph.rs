//! Connected components of an undirected interaction graph.
//!
//! Vertices are plain indices in `0..num_vertices`; edges are index pairs.
//! Self-loops and edges touching an out-of-range vertex are ignored.

use petgraph::unionfind::UnionFind;
use rustc_hash::FxHashMap;

/// One connected component with its edges renumbered locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPartition {
    /// Global vertex indices, ascending. Local index `i` is `vertices[i]`.
    pub vertices: Vec<usize>,
    /// Edges of the component in local indices, in input order.
    pub edges: Vec<(usize, usize)>,
}

impl GraphPartition {
    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check whether the component has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

fn valid_edges(num_vertices: usize, edges: &[(usize, usize)]) -> impl Iterator<Item = (usize, usize)> + '_ {
    edges
        .iter()
        .copied()
        .filter(move |&(a, b)| a != b && a < num_vertices && b < num_vertices)
}

/// Label every vertex with the index of its component.
///
/// Components are numbered in order of their smallest vertex.
fn component_labels(num_vertices: usize, edges: &[(usize, usize)]) -> (Vec<usize>, usize) {
    let mut uf = UnionFind::<usize>::new(num_vertices);
    for (a, b) in valid_edges(num_vertices, edges) {
        uf.union(a, b);
    }
    let mut ids: FxHashMap<usize, usize> = FxHashMap::default();
    let labels = uf
        .into_labeling()
        .into_iter()
        .map(|root| {
            let next = ids.len();
            *ids.entry(root).or_insert(next)
        })
        .collect();
    (labels, ids.len())
}

/// Connected components, each a sorted list of vertices, ordered by their
/// smallest vertex. Isolated vertices form singleton components.
pub fn connected_components(num_vertices: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let (labels, count) = component_labels(num_vertices, edges);
    let mut components = vec![Vec::new(); count];
    for (vertex, label) in labels.into_iter().enumerate() {
        components[label].push(vertex);
    }
    components
}

/// Split the graph into its components with locally renumbered edges.
pub fn partition_by_components(
    num_vertices: usize,
    edges: &[(usize, usize)],
) -> Vec<GraphPartition> {
    let (labels, count) = component_labels(num_vertices, edges);
    let mut partitions = vec![
        GraphPartition {
            vertices: Vec::new(),
            edges: Vec::new(),
        };
        count
    ];
    let mut local = vec![0; num_vertices];
    for (vertex, &label) in labels.iter().enumerate() {
        local[vertex] = partitions[label].vertices.len();
        partitions[label].vertices.push(vertex);
    }
    for (a, b) in valid_edges(num_vertices, edges) {
        partitions[labels[a]].edges.push((local[a], local[b]));
    }
    partitions
}

/// Check whether every component fits `qubit_limit` at `qubits_per_vertex`
/// qubits per vertex.
pub fn can_decompose_within_limit(
    num_vertices: usize,
    edges: &[(usize, usize)],
    qubit_limit: usize,
    qubits_per_vertex: usize,
) -> bool {
    connected_components(num_vertices, edges)
        .iter()
        .all(|component| component.len().saturating_mul(qubits_per_vertex) <= qubit_limit)
}
