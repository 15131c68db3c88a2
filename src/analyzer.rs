//! One graph, many labels.
//!
//! [`Analyzer`] binds a neighbor graph and a label dictionary and keeps the scratch buffers
//! alive between runs, so checking many labels against a 10^7-point graph allocates the
//! per-point arrays once.

use crate::components::{strongly_connected_components, ComponentReport};
use crate::context::AnalysisContext;
use crate::error::Result;
use crate::graph::NeighborGraph;
use crate::labels::LabelDictionary;
use crate::predicate::LabelPredicate;
use crate::reachability::{profile_reachability, reachable_from, ProfileConfig, ReachabilityReport};

/// Both reports for one label, sharing a single predicate build.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelAnalysis {
    pub components: ComponentReport,
    pub reachability: ReachabilityReport,
}

pub struct Analyzer<'a, G: ?Sized, L: ?Sized> {
    graph: &'a G,
    labels: &'a L,
    config: ProfileConfig,
    context: AnalysisContext,
}

impl<'a, G, L> Analyzer<'a, G, L>
where
    G: NeighborGraph + ?Sized,
    L: LabelDictionary + ?Sized,
{
    pub fn new(graph: &'a G, labels: &'a L) -> Self {
        Self { graph, labels, config: ProfileConfig::default(), context: AnalysisContext::new() }
    }

    /// Use `config` for the seed tie-break (and the seed count of [`Self::analyze`]).
    pub fn with_config(mut self, config: ProfileConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> ProfileConfig {
        self.config
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.context
    }

    /// Membership view of `label` over the graph's points.
    pub fn predicate(&self, label: &str) -> LabelPredicate {
        let predicate = LabelPredicate::new(self.labels, label, self.graph.point_count());
        let dictionary_count = self.labels.label_member_count(label);
        if !label.is_empty() && dictionary_count != predicate.member_count() {
            tracing::warn!(
                label,
                dictionary_count,
                graph_members = predicate.member_count(),
                "label dictionary covers points the graph does not have"
            );
        }
        predicate
    }

    #[tracing::instrument(level = "info", skip(self))]
    pub fn find_components(&mut self, label: &str) -> Result<ComponentReport> {
        let predicate = self.predicate(label);
        strongly_connected_components(self.graph, &predicate, &mut self.context.components)
    }

    #[tracing::instrument(level = "info", skip(self))]
    pub fn profile_reachability(&mut self, label: &str, seed_count: usize) -> Result<ReachabilityReport> {
        let predicate = self.predicate(label);
        let config = ProfileConfig { seed_count, ..self.config };
        profile_reachability(self.graph, &predicate, config, &mut self.context.visits)
    }

    /// Members of `label` reachable from `seed`, sorted.
    pub fn reachable_from(&mut self, label: &str, seed: usize) -> Result<Vec<usize>> {
        let predicate = self.predicate(label);
        reachable_from(self.graph, &predicate, seed, &mut self.context.visits)
    }

    /// Components and reachability for `label` with the configured seed count.
    #[cfg(not(feature = "parallel"))]
    #[tracing::instrument(level = "info", skip(self))]
    pub fn analyze(&mut self, label: &str) -> Result<LabelAnalysis> {
        let predicate = self.predicate(label);
        let components = strongly_connected_components(self.graph, &predicate, &mut self.context.components)?;
        let reachability = profile_reachability(self.graph, &predicate, self.config, &mut self.context.visits)?;
        Ok(LabelAnalysis { components, reachability })
    }

    /// Components and reachability for `label` with the configured seed count.
    ///
    /// The two passes share only read-only state and own disjoint scratch, so they run on
    /// separate rayon tasks. Each pass is itself sequential.
    #[cfg(feature = "parallel")]
    #[tracing::instrument(level = "info", skip(self))]
    pub fn analyze(&mut self, label: &str) -> Result<LabelAnalysis>
    where
        G: Sync,
    {
        let predicate = self.predicate(label);
        let (graph, config) = (self.graph, self.config);
        let AnalysisContext { components: comp_scratch, visits: visit_scratch } = &mut self.context;
        let (components, reachability) = rayon::join(
            || strongly_connected_components(graph, &predicate, comp_scratch),
            || profile_reachability(graph, &predicate, config, visit_scratch),
        );
        Ok(LabelAnalysis { components: components?, reachability: reachability? })
    }
}
