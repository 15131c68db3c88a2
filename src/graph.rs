//! Neighbor-graph adapter traits.
//!
//! The analysis engines only ever read out-neighbor lists. Points are dense ids in
//! `[0, point_count)`; a neighbor id outside that range is a configuration error that the
//! engines report rather than repair.

/// A read-only graph view that lends **borrowed** neighbor slices.
///
/// This is the hot-path adapter: traversals revisit a point's list many times and must not
/// allocate per visit.
pub trait NeighborGraph {
    fn point_count(&self) -> usize;

    /// Out-neighbors of `point`, in the order the index stores them.
    fn neighbors(&self, point: usize) -> &[usize];

    fn out_degree(&self, point: usize) -> usize {
        self.neighbors(point).len()
    }
}

/// A graph source that can only hand out **owned** neighbor lists.
///
/// Convert it once with [`CsrGraph::from_source`] before running an analysis.
pub trait NeighborSource {
    fn point_count(&self) -> usize;
    fn neighbors(&self, point: usize) -> Vec<usize>;
}

/// Borrowed adjacency lists, one `Vec` per point.
pub struct AdjacencyLists<'a>(pub &'a [Vec<usize>]);

impl<'a> NeighborGraph for AdjacencyLists<'a> {
    fn point_count(&self) -> usize {
        self.0.len()
    }
    fn neighbors(&self, point: usize) -> &[usize] {
        self.0.get(point).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl NeighborSource for Vec<Vec<usize>> {
    fn point_count(&self) -> usize {
        self.len()
    }
    fn neighbors(&self, point: usize) -> Vec<usize> {
        self.get(point).cloned().unwrap_or_default()
    }
}

/// Compressed sparse row graph: `targets[offsets[p]..offsets[p + 1]]` are `p`'s neighbors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrGraph {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl CsrGraph {
    pub fn from_source<S: NeighborSource>(source: &S) -> Self {
        let n = source.point_count();
        let mut offsets = Vec::with_capacity(n + 1);
        let mut targets = Vec::new();
        offsets.push(0);
        for p in 0..n {
            targets.extend(source.neighbors(p));
            offsets.push(targets.len());
        }
        Self { offsets, targets }
    }

    pub fn from_adjacency(adj: &[Vec<usize>]) -> Self {
        let mut offsets = Vec::with_capacity(adj.len() + 1);
        let mut targets = Vec::with_capacity(adj.iter().map(Vec::len).sum());
        offsets.push(0);
        for nbrs in adj {
            targets.extend_from_slice(nbrs);
            offsets.push(targets.len());
        }
        Self { offsets, targets }
    }

    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }
}

impl NeighborGraph for CsrGraph {
    fn point_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }
    fn neighbors(&self, point: usize) -> &[usize] {
        match (self.offsets.get(point), self.offsets.get(point + 1)) {
            (Some(&start), Some(&end)) => &self.targets[start..end],
            _ => &[],
        }
    }
}

/// Fixed-width slot layout used by graph ANN indexes.
///
/// Every point owns `max_degree` slots; `fill[p]` of them are live.
#[derive(Debug, Clone)]
pub struct FixedDegreeGraph {
    max_degree: usize,
    slots: Vec<usize>,
    fill: Vec<usize>,
}

impl FixedDegreeGraph {
    pub fn new(point_count: usize, max_degree: usize) -> Self {
        Self {
            max_degree,
            slots: vec![0; point_count * max_degree],
            fill: vec![0; point_count],
        }
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Replace `point`'s neighbor list, truncating to `max_degree`.
    ///
    /// Panics if `point` is out of range.
    pub fn set_neighbors(&mut self, point: usize, nbrs: &[usize]) {
        let len = nbrs.len().min(self.max_degree);
        let start = point * self.max_degree;
        self.slots[start..start + len].copy_from_slice(&nbrs[..len]);
        self.fill[point] = len;
    }
}

impl NeighborGraph for FixedDegreeGraph {
    fn point_count(&self) -> usize {
        self.fill.len()
    }
    fn neighbors(&self, point: usize) -> &[usize] {
        match self.fill.get(point) {
            Some(&len) => {
                let start = point * self.max_degree;
                &self.slots[start..start + len]
            }
            None => &[],
        }
    }
}

#[cfg(feature = "petgraph")]
impl<N, E, Ty, Ix> NeighborSource for petgraph::Graph<N, E, Ty, Ix>
where
    Ty: petgraph::EdgeType,
    Ix: petgraph::graph::IndexType,
{
    fn point_count(&self) -> usize {
        self.node_count()
    }
    fn neighbors(&self, point: usize) -> Vec<usize> {
        // petgraph yields the most recently added edge first; reverse to insertion order.
        let mut out: Vec<usize> = petgraph::Graph::neighbors(self, petgraph::graph::NodeIndex::new(point))
            .map(|idx| idx.index())
            .collect();
        out.reverse();
        out
    }
}
