//! Per-point label inputs.
//!
//! Two collaborators feed an analysis:
//! - a [`LabelDictionary`] answering "which labels does point `p` carry", and
//! - a [`LabelMap`] resolving the numeric filter ids used by query workloads into the label
//!   strings stored in the dictionary.
//!
//! Both are read-only once built.

use crate::error::Result;
use std::collections::{HashMap, HashSet};
use std::io::BufRead;

pub type LabelSet = HashSet<String>;

pub trait LabelDictionary {
    fn point_count(&self) -> usize;

    /// Labels of `point`, or `None` if the dictionary has no entry for it.
    fn labels_of(&self, point: usize) -> Option<&LabelSet>;

    /// Number of points carrying `label`. Informational only.
    fn label_member_count(&self, label: &str) -> usize;

    fn has_label(&self, point: usize, label: &str) -> bool {
        self.labels_of(point).is_some_and(|set| set.contains(label))
    }
}

/// In-memory label table indexed by point id.
#[derive(Debug, Clone, Default)]
pub struct PointLabels {
    sets: Vec<LabelSet>,
    member_counts: HashMap<String, usize>,
}

impl PointLabels {
    /// Build from one label iterator per point, in point-id order.
    pub fn from_points<I, L, S>(points: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sets = Vec::new();
        let mut member_counts: HashMap<String, usize> = HashMap::new();
        for labels in points {
            let set: LabelSet = labels.into_iter().map(Into::into).collect();
            for label in &set {
                *member_counts.entry(label.clone()).or_default() += 1;
            }
            sets.push(set);
        }
        Self { sets, member_counts }
    }

    /// Parse a label file: line `i` lists point `i`'s labels, comma-separated.
    ///
    /// Surrounding whitespace is trimmed and empty tokens are dropped, so a blank line is a
    /// point with no labels.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let labels: Vec<String> = line
                .split(',')
                .map(str::trim)
                .filter(|tok| !tok.is_empty())
                .map(str::to_owned)
                .collect();
            lines.push(labels);
        }
        Ok(Self::from_points(lines))
    }

    /// Every label seen, with its member count.
    pub fn member_counts(&self) -> &HashMap<String, usize> {
        &self.member_counts
    }
}

impl LabelDictionary for PointLabels {
    fn point_count(&self) -> usize {
        self.sets.len()
    }

    fn labels_of(&self, point: usize) -> Option<&LabelSet> {
        self.sets.get(point)
    }

    fn label_member_count(&self, label: &str) -> usize {
        self.member_counts.get(label).copied().unwrap_or(0)
    }
}

/// Filter-id to label-string lookup.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    entries: HashMap<String, String>,
}

impl LabelMap {
    /// Parse tab-separated `id<TAB>label` lines.
    ///
    /// Lines without a tab are skipped. Extra columns after the label are ignored. A repeated
    /// id keeps its last label.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut entries = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            let Some((id, rest)) = line.split_once('\t') else {
                continue;
            };
            let label = rest.split('\t').next().unwrap_or_default();
            entries.insert(id.to_owned(), label.to_owned());
        }
        Ok(Self { entries })
    }

    pub fn insert(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.entries.insert(id.into(), label.into());
    }

    /// Resolve `id`; unknown ids resolve to `""`, which no point carries.
    pub fn resolve(&self, id: &str) -> &str {
        self.entries.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
