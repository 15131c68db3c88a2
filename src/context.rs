//! Run-scoped scratch buffers.
//!
//! Each engine owns a disjoint scratch struct so the two passes can run side by side. Buffers
//! are sized to the graph's point count and reused across runs: a run resets what it needs
//! instead of reallocating.
//!
//! Point ids and discovery indices are stored as `u32`; at 10^7 points this halves the
//! footprint of the per-point arrays compared with `usize`.

use crate::error::{AnalysisError, Result};

/// Per-point DFS record. `dfn == 0` means undiscovered.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Frame {
    pub(crate) dfn: u32,
    pub(crate) low: u32,
    pub(crate) parent: u32,
    /// Next neighbor slot to scan when this frame is resumed.
    pub(crate) cursor: u32,
}

pub(crate) fn check_point_count(point_count: usize) -> Result<()> {
    // Discovery indices start at 1, so `u32::MAX` itself must stay unused.
    if point_count >= u32::MAX as usize {
        return Err(AnalysisError::PointCountOverflow { point_count });
    }
    Ok(())
}

/// Scratch for the connectivity engine.
#[derive(Debug, Default)]
pub struct ComponentScratch {
    pub(crate) frames: Vec<Frame>,
    pub(crate) on_stack: Vec<bool>,
    pub(crate) emitted: Vec<bool>,
    pub(crate) dfs: Vec<u32>,
    pub(crate) trace: Vec<u32>,
    pub(crate) next_index: u32,
}

impl ComponentScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size for `point_count` points and clear all state from a previous run.
    pub(crate) fn prepare(&mut self, point_count: usize) -> Result<()> {
        check_point_count(point_count)?;
        self.frames.clear();
        self.frames.resize(point_count, Frame::default());
        self.on_stack.clear();
        self.on_stack.resize(point_count, false);
        self.emitted.clear();
        self.emitted.resize(point_count, false);
        self.dfs.clear();
        self.trace.clear();
        self.next_index = 0;
        Ok(())
    }

    pub fn point_capacity(&self) -> usize {
        self.frames.len()
    }
}

/// Scratch for the reachability profiler.
///
/// Per-seed visited sets are "stamped": a point is visited by the current traversal iff its
/// stamp equals the current one. Bumping the stamp gives every seed a fresh set without
/// clearing `point_count` entries.
#[derive(Debug, Default)]
pub struct VisitScratch {
    stamps: Vec<u32>,
    stamp: u32,
    pub(crate) queue: Vec<(u32, u32)>,
    pub(crate) covered: Vec<bool>,
    /// Same-label degrees of the current run, recomputed every run.
    pub(crate) degrees: Vec<u32>,
}

impl VisitScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size for `point_count` points and clear all marks, including the union.
    pub(crate) fn prepare(&mut self, point_count: usize) -> Result<()> {
        check_point_count(point_count)?;
        self.stamps.clear();
        self.stamps.resize(point_count, 0);
        self.stamp = 0;
        self.queue.clear();
        self.covered.clear();
        self.covered.resize(point_count, false);
        Ok(())
    }

    /// Start a fresh visited set.
    pub(crate) fn next_traversal(&mut self) {
        if self.stamp == u32::MAX {
            self.stamps.fill(0);
            self.stamp = 0;
        }
        self.stamp += 1;
        self.queue.clear();
    }

    /// Mark `point` visited; returns `false` if it already was.
    #[inline]
    pub(crate) fn visit(&mut self, point: usize) -> bool {
        if self.stamps[point] == self.stamp {
            return false;
        }
        self.stamps[point] = self.stamp;
        true
    }

    pub fn point_capacity(&self) -> usize {
        self.stamps.len()
    }
}

/// Scratch for both engines, reusable across labels and runs on the same graph.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    pub components: ComponentScratch,
    pub visits: VisitScratch,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_give_each_traversal_a_fresh_set() {
        let mut s = VisitScratch::new();
        s.prepare(4).unwrap();
        s.next_traversal();
        assert!(s.visit(2));
        assert!(!s.visit(2));
        s.next_traversal();
        assert!(s.visit(2));
    }

    #[test]
    fn stamp_wraparound_clears_marks() {
        let mut s = VisitScratch::new();
        s.prepare(2).unwrap();
        s.stamp = u32::MAX - 1;
        s.next_traversal();
        assert!(s.visit(0));
        s.next_traversal();
        assert_eq!(s.stamp, 1);
        assert!(s.visit(0));
        assert!(!s.visit(0));
    }

    #[test]
    fn prepare_resets_previous_run() {
        let mut s = ComponentScratch::new();
        s.prepare(3).unwrap();
        s.frames[1].dfn = 5;
        s.on_stack[1] = true;
        s.trace.push(1);
        s.next_index = 5;
        s.prepare(3).unwrap();
        assert_eq!(s.frames[1].dfn, 0);
        assert!(!s.on_stack[1]);
        assert!(s.trace.is_empty());
        assert_eq!(s.next_index, 0);
        assert_eq!(s.point_capacity(), 3);
    }

    #[test]
    fn oversized_graphs_are_rejected() {
        assert!(matches!(
            check_point_count(u32::MAX as usize),
            Err(AnalysisError::PointCountOverflow { .. })
        ));
        assert!(check_point_count(10_000_000).is_ok());
    }
}
