//! Label predicate: O(1) "does point `p` carry the target label".
//!
//! An edge `u -> v` is *active* when both endpoints are members. Membership is resolved once
//! into a bitmap so the engines never touch the label dictionary on the hot path.

use crate::error::{AnalysisError, Result};
use crate::graph::NeighborGraph;
use crate::labels::LabelDictionary;

#[derive(Debug, Clone)]
pub struct LabelPredicate {
    label: String,
    members: Vec<bool>,
    member_count: usize,
}

impl LabelPredicate {
    /// Resolve membership of `label` for points `0..point_count`.
    ///
    /// The empty label has no members. Points the dictionary does not cover are non-members.
    pub fn new<L: LabelDictionary + ?Sized>(labels: &L, label: &str, point_count: usize) -> Self {
        let members: Vec<bool> = if label.is_empty() {
            vec![false; point_count]
        } else {
            (0..point_count).map(|p| labels.has_label(p, label)).collect()
        };
        let member_count = members.iter().filter(|&&m| m).count();
        Self { label: label.to_owned(), members, member_count }
    }

    /// Build directly from a membership bitmap.
    pub fn from_members(label: impl Into<String>, members: Vec<bool>) -> Self {
        let member_count = members.iter().filter(|&&m| m).count();
        Self { label: label.into(), members, member_count }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn point_count(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_member(&self, point: usize) -> bool {
        self.members.get(point).copied().unwrap_or(false)
    }

    pub fn member_count(&self) -> usize {
        self.member_count
    }

    /// Member ids in ascending order.
    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().enumerate().filter(|(_, &m)| m).map(|(p, _)| p)
    }

    /// Whether `point -> neighbor` is an active edge.
    ///
    /// Fails if `neighbor` is not a valid point id.
    #[inline]
    pub fn is_active_edge(&self, point: usize, neighbor: usize) -> Result<bool> {
        let point_count = self.members.len();
        if neighbor >= point_count {
            return Err(AnalysisError::NeighborOutOfRange { point, neighbor, point_count });
        }
        Ok(self.members[neighbor])
    }

    /// Number of active out-edges of `point` (0 for non-members).
    pub fn out_degree_in_label<G: NeighborGraph + ?Sized>(&self, graph: &G, point: usize) -> Result<usize> {
        if !self.is_member(point) {
            return Ok(0);
        }
        let mut degree = 0usize;
        for &w in graph.neighbors(point) {
            if self.is_active_edge(point, w)? {
                degree += 1;
            }
        }
        Ok(degree)
    }

    /// Same-label out-degree of every point (0 for non-members), written into `out`.
    ///
    /// Always rescans `graph`; `out` is only a reusable buffer.
    pub fn fill_label_degrees<G: NeighborGraph + ?Sized>(&self, graph: &G, out: &mut Vec<u32>) -> Result<()> {
        out.clear();
        out.resize(self.members.len(), 0);
        for p in self.members() {
            // Degrees are bounded by the index's max out-degree.
            out[p] = self.out_degree_in_label(graph, p)? as u32;
        }
        Ok(())
    }

    pub fn label_degrees<G: NeighborGraph + ?Sized>(&self, graph: &G) -> Result<Vec<u32>> {
        let mut out = Vec::new();
        self.fill_label_degrees(graph, &mut out)?;
        Ok(out)
    }
}
