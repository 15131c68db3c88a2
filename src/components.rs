//! Strongly connected components of a label-induced subgraph.
//!
//! Tarjan's algorithm with the call stack replaced by an explicit DFS stack plus a per-point
//! frame arena (see [`crate::context::ComponentScratch`]). Each frame remembers its neighbor
//! cursor, so a resumed frame continues where it stopped and every active edge is scanned a
//! constant number of times. Memory is `O(point_count)` and never depends on recursion depth.
//!
//! Only *active* edges participate: both endpoints must carry the target label. Non-members
//! are never discovered, pushed, or emitted.
//!
//! Public invariants (after a successful run):
//! - every member point appears in exactly one component;
//! - components are maximal;
//! - components are emitted in reverse topological order of the condensation (a component is
//!   emitted before any component that can reach it).

use crate::context::ComponentScratch;
use crate::error::Result;
use crate::graph::NeighborGraph;
use crate::predicate::LabelPredicate;

/// Components of one label's induced subgraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentReport {
    pub label: String,
    /// Points carrying the label.
    pub member_count: usize,
    /// Components in emission order. Points inside a component are listed in the order they
    /// left the trace stack (latest discovered first).
    pub components: Vec<Vec<usize>>,
}

impl ComponentReport {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn largest_size(&self) -> usize {
        self.components.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn singleton_count(&self) -> usize {
        self.components.iter().filter(|c| c.len() == 1).count()
    }

    /// Component index of every point in `0..point_count`; `None` for non-members.
    pub fn component_of(&self, point_count: usize) -> Vec<Option<usize>> {
        let mut out = vec![None; point_count];
        for (idx, comp) in self.components.iter().enumerate() {
            for &p in comp {
                if let Some(slot) = out.get_mut(p) {
                    *slot = Some(idx);
                }
            }
        }
        out
    }
}

impl ComponentScratch {
    #[inline]
    fn discover(&mut self, point: usize, parent: usize) {
        self.next_index += 1;
        let frame = &mut self.frames[point];
        frame.dfn = self.next_index;
        frame.low = self.next_index;
        frame.parent = parent as u32;
        frame.cursor = 0;
        self.on_stack[point] = true;
        self.dfs.push(point as u32);
        self.trace.push(point as u32);
    }

    /// Pop the trace stack down to and including `root`.
    fn extract_component(&mut self, root: usize) -> Vec<usize> {
        let mut comp = Vec::new();
        while let Some(w) = self.trace.pop() {
            let w = w as usize;
            self.on_stack[w] = false;
            if !self.emitted[w] {
                self.emitted[w] = true;
                comp.push(w);
            }
            if w == root {
                break;
            }
        }
        comp
    }
}

/// Partition the members of `predicate` into strongly connected components.
///
/// Roots are tried in ascending point order. The graph must agree with the predicate's point
/// count: a neighbor id `>= predicate.point_count()` aborts the run with
/// [`crate::AnalysisError::NeighborOutOfRange`].
pub fn strongly_connected_components<G: NeighborGraph + ?Sized>(
    graph: &G,
    predicate: &LabelPredicate,
    scratch: &mut ComponentScratch,
) -> Result<ComponentReport> {
    let n = predicate.point_count();
    scratch.prepare(n)?;
    let mut components: Vec<Vec<usize>> = Vec::new();

    for root in predicate.members() {
        if scratch.frames[root].dfn != 0 {
            continue;
        }
        scratch.discover(root, root);

        while let Some(&top) = scratch.dfs.last() {
            let v = top as usize;
            let nbrs = graph.neighbors(v);

            let mut cursor = scratch.frames[v].cursor as usize;
            let mut child = None;
            while cursor < nbrs.len() {
                let w = nbrs[cursor];
                cursor += 1;
                if predicate.is_active_edge(v, w)? && scratch.frames[w].dfn == 0 {
                    child = Some(w);
                    break;
                }
            }
            scratch.frames[v].cursor = cursor as u32;
            if let Some(w) = child {
                scratch.discover(w, v);
                continue;
            }

            // Scan exhausted: close `v`. Neighbors already closed into an earlier component are
            // off the stack and cannot lower `low[v]`.
            let mut low = scratch.frames[v].low;
            for &w in nbrs {
                if predicate.is_member(w) && scratch.on_stack[w] {
                    low = low.min(scratch.frames[w].dfn);
                }
            }
            scratch.frames[v].low = low;
            scratch.dfs.pop();

            let parent = scratch.frames[v].parent as usize;
            if parent != v {
                let plow = &mut scratch.frames[parent].low;
                *plow = (*plow).min(low);
            }

            if low == scratch.frames[v].dfn {
                let comp = scratch.extract_component(v);
                if comp.len() > 1 {
                    tracing::debug!(root = v, size = comp.len(), "component closed");
                } else {
                    tracing::trace!(root = v, "singleton component");
                }
                components.push(comp);
            }
        }
    }

    let report = ComponentReport {
        label: predicate.label().to_owned(),
        member_count: predicate.member_count(),
        components,
    };
    tracing::info!(
        label = %report.label,
        members = report.member_count,
        components = report.len(),
        largest = report.largest_size(),
        singletons = report.singleton_count(),
        "strongly connected components computed"
    );
    Ok(report)
}
