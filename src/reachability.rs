//! Label-restricted reachability from high-degree entry points.
//!
//! Filtered search enters the graph at a handful of points and may only walk active edges.
//! This module estimates how much of a label that walk can reach:
//! - rank members by same-label out-degree and keep the top K as seeds;
//! - BFS from each seed independently (a fresh visited set per seed);
//! - report each seed's reachable count and the size of the union over all seeds.
//!
//! Reachable sets are order-independent; only the visitation order within a BFS level
//! depends on the graph's neighbor order, and nothing here exposes it.

use crate::context::VisitScratch;
use crate::error::{AnalysisError, Result};
use crate::graph::NeighborGraph;
use crate::predicate::LabelPredicate;
use crate::seeds::{top_k_seeds, TieBreak};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileConfig {
    /// Number of seeds (K).
    pub seed_count: usize,
    pub tie_break: TieBreak,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self { seed_count: 10, tie_break: TieBreak::LowestPoint }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedReach {
    pub point: usize,
    /// Same-label out-degree of the seed.
    pub degree: usize,
    /// Members reachable from the seed, the seed included.
    pub reachable: usize,
    /// Deepest BFS level reached (the seed is level 0).
    pub max_depth: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachabilityReport {
    pub label: String,
    pub member_count: usize,
    /// Seeds by degree descending.
    pub seeds: Vec<SeedReach>,
    /// Size of the union of all seeds' reachable sets.
    pub union_coverage: usize,
}

impl ReachabilityReport {
    /// `union_coverage / member_count`, or 0 for an empty label.
    pub fn coverage_fraction(&self) -> f64 {
        if self.member_count == 0 {
            return 0.0;
        }
        self.union_coverage as f64 / self.member_count as f64
    }
}

/// BFS from `seed` over active edges.
///
/// On return `scratch.queue` holds every reached point (the seed first) with its level.
/// Returns the deepest level reached.
fn bfs<G: NeighborGraph + ?Sized>(
    graph: &G,
    predicate: &LabelPredicate,
    seed: usize,
    scratch: &mut VisitScratch,
) -> Result<usize> {
    scratch.next_traversal();
    scratch.visit(seed);
    scratch.queue.push((seed as u32, 0));

    let mut max_depth = 0u32;
    let mut head = 0usize;
    while head < scratch.queue.len() {
        let (cur, depth) = scratch.queue[head];
        head += 1;
        max_depth = max_depth.max(depth);
        let cur = cur as usize;
        for &nx in graph.neighbors(cur) {
            if predicate.is_active_edge(cur, nx)? && scratch.visit(nx) {
                scratch.queue.push((nx as u32, depth + 1));
            }
        }
    }
    Ok(max_depth as usize)
}

/// Profile reachability of `predicate`'s label from its top `config.seed_count` members.
///
/// Same-label degrees are recomputed from `graph` on every call, into a buffer owned by
/// `scratch`. A label with no members, or `seed_count == 0`, yields an empty report.
pub fn profile_reachability<G: NeighborGraph + ?Sized>(
    graph: &G,
    predicate: &LabelPredicate,
    config: ProfileConfig,
    scratch: &mut VisitScratch,
) -> Result<ReachabilityReport> {
    let mut report = ReachabilityReport {
        label: predicate.label().to_owned(),
        member_count: predicate.member_count(),
        ..ReachabilityReport::default()
    };
    if report.member_count == 0 || config.seed_count == 0 {
        tracing::info!(label = %report.label, members = report.member_count, "nothing to profile");
        return Ok(report);
    }

    // Size check first: stamps and the BFS queue store point ids as `u32`.
    scratch.prepare(predicate.point_count())?;
    predicate.fill_label_degrees(graph, &mut scratch.degrees)?;
    let candidates = top_k_seeds(predicate.members(), &scratch.degrees, config.seed_count, config.tie_break);

    for seed in candidates {
        let max_depth = bfs(graph, predicate, seed.point, scratch)?;
        for &(p, _) in &scratch.queue {
            let p = p as usize;
            if !scratch.covered[p] {
                scratch.covered[p] = true;
                report.union_coverage += 1;
            }
        }
        let reach = SeedReach {
            point: seed.point,
            degree: seed.degree,
            reachable: scratch.queue.len(),
            max_depth,
        };
        tracing::debug!(
            seed = reach.point,
            degree = reach.degree,
            reachable = reach.reachable,
            max_depth = reach.max_depth,
            "seed traversal finished"
        );
        report.seeds.push(reach);
    }

    tracing::info!(
        label = %report.label,
        members = report.member_count,
        seeds = report.seeds.len(),
        union_coverage = report.union_coverage,
        "reachability profiled"
    );
    Ok(report)
}

/// Members reachable from `seed` over active edges, sorted ascending.
///
/// A non-member seed reaches nothing: non-members are outside the induced subgraph.
pub fn reachable_from<G: NeighborGraph + ?Sized>(
    graph: &G,
    predicate: &LabelPredicate,
    seed: usize,
    scratch: &mut VisitScratch,
) -> Result<Vec<usize>> {
    let point_count = predicate.point_count();
    if seed >= point_count {
        return Err(AnalysisError::SeedOutOfRange { seed, point_count });
    }
    if !predicate.is_member(seed) {
        return Ok(Vec::new());
    }
    if scratch.point_capacity() != point_count {
        scratch.prepare(point_count)?;
    }
    bfs(graph, predicate, seed, scratch)?;
    let mut out: Vec<usize> = scratch.queue.iter().map(|&(p, _)| p as usize).collect();
    out.sort_unstable();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyLists;

    fn two_cycles() -> Vec<Vec<usize>> {
        // 0 -> 1 -> 2 -> 0, 2 -> 3, 3 -> 4 -> 5 -> 3
        vec![vec![1], vec![2], vec![0, 3], vec![4], vec![5], vec![3]]
    }

    #[test]
    fn single_seed_in_upstream_cycle_covers_everything() {
        let adj = two_cycles();
        let pred = LabelPredicate::from_members("A", vec![true; 6]);
        let mut scratch = VisitScratch::new();
        let cfg = ProfileConfig { seed_count: 1, ..ProfileConfig::default() };
        let report = profile_reachability(&AdjacencyLists(&adj), &pred, cfg, &mut scratch).unwrap();
        // Point 2 has two active out-edges, every other point has one.
        assert_eq!(report.seeds.len(), 1);
        assert_eq!(report.seeds[0].point, 2);
        assert_eq!(report.seeds[0].degree, 2);
        assert_eq!(report.seeds[0].reachable, 6);
        assert_eq!(report.union_coverage, 6);
        assert!((report.coverage_fraction() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn max_depth_counts_levels_from_seed() {
        // 0 -> 1 -> 2 -> 3
        let adj = vec![vec![1], vec![2], vec![3], vec![]];
        let pred = LabelPredicate::from_members("A", vec![true; 4]);
        let mut scratch = VisitScratch::new();
        let cfg = ProfileConfig { seed_count: 1, ..ProfileConfig::default() };
        let report = profile_reachability(&AdjacencyLists(&adj), &pred, cfg, &mut scratch).unwrap();
        assert_eq!(report.seeds[0].point, 0);
        assert_eq!(report.seeds[0].max_depth, 3);
    }

    #[test]
    fn traversal_never_crosses_non_members() {
        // 0 -> 1 -> 2, 1 lacks the label.
        let adj = vec![vec![1], vec![2], vec![]];
        let pred = LabelPredicate::from_members("A", vec![true, false, true]);
        let mut scratch = VisitScratch::new();
        let got = reachable_from(&AdjacencyLists(&adj), &pred, 0, &mut scratch).unwrap();
        assert_eq!(got, vec![0]);
        assert!(reachable_from(&AdjacencyLists(&adj), &pred, 1, &mut scratch).unwrap().is_empty());
    }

    #[test]
    fn union_counts_overlap_once() {
        // Two seeds whose reachable sets overlap in {2}.
        let adj = vec![vec![2, 4], vec![2, 3], vec![], vec![], vec![]];
        let pred = LabelPredicate::from_members("A", vec![true; 5]);
        let mut scratch = VisitScratch::new();
        let cfg = ProfileConfig { seed_count: 2, ..ProfileConfig::default() };
        let report = profile_reachability(&AdjacencyLists(&adj), &pred, cfg, &mut scratch).unwrap();
        let reach: Vec<usize> = report.seeds.iter().map(|s| s.reachable).collect();
        assert_eq!(reach, vec![3, 3]);
        assert_eq!(report.union_coverage, 5);
    }

    #[test]
    fn reusing_a_predicate_on_another_graph_reranks_seeds() {
        let pred = LabelPredicate::from_members("A", vec![true; 3]);
        let mut scratch = VisitScratch::new();
        let cfg = ProfileConfig { seed_count: 1, ..ProfileConfig::default() };

        let first = vec![vec![1, 2], vec![], vec![]];
        let report = profile_reachability(&AdjacencyLists(&first), &pred, cfg, &mut scratch).unwrap();
        assert_eq!(report.seeds[0], SeedReach { point: 0, degree: 2, reachable: 3, max_depth: 1 });

        let second = vec![vec![], vec![0, 2], vec![]];
        let report = profile_reachability(&AdjacencyLists(&second), &pred, cfg, &mut scratch).unwrap();
        assert_eq!(report.seeds[0], SeedReach { point: 1, degree: 2, reachable: 3, max_depth: 1 });
    }

    #[test]
    fn empty_label_profiles_nothing() {
        let adj = two_cycles();
        let pred = LabelPredicate::from_members("A", vec![false; 6]);
        let mut scratch = VisitScratch::new();
        let report =
            profile_reachability(&AdjacencyLists(&adj), &pred, ProfileConfig::default(), &mut scratch).unwrap();
        assert!(report.seeds.is_empty());
        assert_eq!(report.union_coverage, 0);
        assert_eq!(report.coverage_fraction(), 0.0);
    }

    #[test]
    fn seed_out_of_range_is_an_error() {
        let adj = two_cycles();
        let pred = LabelPredicate::from_members("A", vec![true; 6]);
        let mut scratch = VisitScratch::new();
        let err = reachable_from(&AdjacencyLists(&adj), &pred, 6, &mut scratch).unwrap_err();
        assert!(matches!(err, AnalysisError::SeedOutOfRange { seed: 6, point_count: 6 }));
    }
}
