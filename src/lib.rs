//! # labelgraph
//!
//! Connectivity diagnostics for label-filtered nearest-neighbor graphs.
//!
//! Filtered graph search only walks edges whose endpoints both carry the query's label. Whether
//! that walk can reach the label's members depends on the shape of the *label-induced*
//! subgraph, which this crate measures directly:
//! - [`strongly_connected_components`]: exact SCCs of the induced subgraph (iterative Tarjan,
//!   safe on 10^7-point graphs);
//! - [`profile_reachability`]: coverage reached by BFS from the top-K same-label-degree
//!   members.
//!
//! Both engines read the graph through [`NeighborGraph`] and labels through
//! [`LabelDictionary`]; neither mutates them. [`Analyzer`] ties the pieces together and
//! reuses scratch buffers across labels.

pub mod analyzer;
pub mod components;
pub mod context;
pub mod error;
pub mod graph;
pub mod labels;
pub mod predicate;
pub mod reachability;
pub mod seeds;

pub use analyzer::{Analyzer, LabelAnalysis};
pub use components::{strongly_connected_components, ComponentReport};
pub use context::{AnalysisContext, ComponentScratch, VisitScratch};
pub use error::{AnalysisError, Result};
pub use graph::{AdjacencyLists, CsrGraph, FixedDegreeGraph, NeighborGraph, NeighborSource};
pub use labels::{LabelDictionary, LabelMap, LabelSet, PointLabels};
pub use predicate::LabelPredicate;
pub use reachability::{profile_reachability, reachable_from, ProfileConfig, ReachabilityReport, SeedReach};
pub use seeds::{top_k_seeds, SeedCandidate, TieBreak};
