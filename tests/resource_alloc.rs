use labelgraph::{
    profile_reachability, strongly_connected_components, AnalysisContext, CsrGraph, LabelPredicate,
    ProfileConfig,
};
use stats_alloc::{Region, StatsAlloc, INSTRUMENTED_SYSTEM};
use std::alloc::System;

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

// Single test in this binary: the global allocator counters are shared across threads.
#[test]
fn reused_context_does_not_reallocate_scratch() {
    // This is a "resource consumption" test: per-point scratch arrays are O(point_count) bytes,
    // so a warm second run must allocate far less than one of them.
    let n = 100_000usize;
    let adj: Vec<Vec<usize>> = (0..n).map(|u| vec![(u + 1) % n, (u + 7) % n]).collect();
    let graph = CsrGraph::from_adjacency(&adj);

    // Only a handful of members: outputs stay tiny while scratch is sized to all points.
    let mut members = vec![false; n];
    for p in [0, 1, 7, 8, 14] {
        members[p] = true;
    }
    let predicate = LabelPredicate::from_members("sparse", members);
    let mut ctx = AnalysisContext::new();
    let cfg = ProfileConfig { seed_count: 3, ..ProfileConfig::default() };

    // Cold runs size every buffer, the degree buffer included.
    let cold = Region::new(&GLOBAL);
    let comps = strongly_connected_components(&graph, &predicate, &mut ctx.components).unwrap();
    let reach = profile_reachability(&graph, &predicate, cfg, &mut ctx.visits).unwrap();
    let s_cold = cold.change();
    assert_eq!(comps.member_count, 5);
    assert_eq!(reach.seeds.len(), 3);

    let warm = Region::new(&GLOBAL);
    let comps2 = strongly_connected_components(&graph, &predicate, &mut ctx.components).unwrap();
    let reach2 = profile_reachability(&graph, &predicate, cfg, &mut ctx.visits).unwrap();
    let s_warm = warm.change();
    assert_eq!(comps2, comps);
    assert_eq!(reach2, reach);

    let cold_bytes = s_cold.bytes_allocated + s_cold.bytes_reallocated.max(0) as usize;
    let warm_bytes = s_warm.bytes_allocated + s_warm.bytes_reallocated.max(0) as usize;

    // The smallest per-point array (`on_stack`) is n bytes.
    assert!(cold_bytes >= n, "cold run should size scratch buffers (bytes={cold_bytes})");

    // Heuristic guardrail: warm runs allocate only their (small) reports.
    assert!(
        warm_bytes * 20 < n,
        "expected warm run to reuse scratch (cold={cold_bytes}, warm={warm_bytes})"
    );
}
