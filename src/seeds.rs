//! Seed ranking: the top-K label members by same-label out-degree.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Secondary key for members with equal degree.
///
/// Either choice is deterministic. `LowestPoint` keeps the smaller ids, which is what a
/// max-heap over `(-degree, point)` pairs retains when it evicts its top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    #[default]
    LowestPoint,
    HighestPoint,
}

impl TieBreak {
    /// Larger key wins a tie.
    #[inline]
    fn key(self, point: usize) -> usize {
        match self {
            TieBreak::LowestPoint => !point,
            TieBreak::HighestPoint => point,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedCandidate {
    pub point: usize,
    /// Active out-edges of `point`.
    pub degree: usize,
}

/// Pick up to `k` members with the largest `degrees[p]`.
///
/// Uses a bounded min-heap of size `k`, so memory is `O(k)` regardless of member count.
/// Results are ordered by degree descending, ties by `tie_break`.
pub fn top_k_seeds<I>(members: I, degrees: &[u32], k: usize, tie_break: TieBreak) -> Vec<SeedCandidate>
where
    I: IntoIterator<Item = usize>,
{
    if k == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<Reverse<(u32, usize, usize)>> = BinaryHeap::with_capacity(k + 1);
    for point in members {
        let Some(&degree) = degrees.get(point) else { continue };
        let entry = (degree, tie_break.key(point), point);
        if heap.len() < k {
            heap.push(Reverse(entry));
        } else if let Some(&Reverse(min)) = heap.peek() {
            if entry > min {
                heap.pop();
                heap.push(Reverse(entry));
            }
        }
    }
    let mut ranked: Vec<(u32, usize, usize)> = heap.into_iter().map(|Reverse(e)| e).collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    ranked
        .into_iter()
        .map(|(degree, _, point)| SeedCandidate { point, degree: degree as usize })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_highest_degrees_in_order() {
        let degrees = [3, 9, 0, 4, 9, 1];
        let got = top_k_seeds(0..6, &degrees, 3, TieBreak::LowestPoint);
        let points: Vec<usize> = got.iter().map(|s| s.point).collect();
        assert_eq!(points, vec![1, 4, 3]);
        assert_eq!(got[0].degree, 9);
        assert_eq!(got[2].degree, 4);
    }

    #[test]
    fn tie_break_selects_which_equal_degree_survives() {
        let degrees = [2, 2, 2, 2];
        let low = top_k_seeds(0..4, &degrees, 2, TieBreak::LowestPoint);
        assert_eq!(low.iter().map(|s| s.point).collect::<Vec<_>>(), vec![0, 1]);
        let high = top_k_seeds(0..4, &degrees, 2, TieBreak::HighestPoint);
        assert_eq!(high.iter().map(|s| s.point).collect::<Vec<_>>(), vec![3, 2]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn tie_keys_do_not_truncate_wide_point_ids() {
        let wide = 1usize << 40;
        assert!(TieBreak::LowestPoint.key(wide) < TieBreak::LowestPoint.key(5));
        assert!(TieBreak::HighestPoint.key(wide) > TieBreak::HighestPoint.key(5));
    }

    #[test]
    fn zero_degree_members_are_eligible() {
        let degrees = [0, 0];
        let got = top_k_seeds([1], &degrees, 5, TieBreak::LowestPoint);
        assert_eq!(got, vec![SeedCandidate { point: 1, degree: 0 }]);
    }

    #[test]
    fn k_zero_or_no_members_is_empty() {
        assert!(top_k_seeds(0..3, &[1, 2, 3], 0, TieBreak::LowestPoint).is_empty());
        assert!(top_k_seeds(std::iter::empty(), &[1, 2, 3], 4, TieBreak::LowestPoint).is_empty());
    }
}
