use super::{RegionId, WingedEdge};

/// A read-only CSR adjacency matrix over regions.
///
/// `offsets[r]..offsets[r + 1]` indexes into `neighbors` to give the sorted
/// list of bounded regions sharing at least one link with region `r`. Row 0
/// (the exterior) is always empty. This is the binary contiguity view an
/// adjacency-list writer consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionAdjacency {
    /// Row offsets; length = `num_regions + 1`.
    offsets: Vec<usize>,
    /// Flattened neighbor lists; sorted within each row.
    neighbors: Vec<RegionId>,
}

impl RegionAdjacency {
    /// Builds the matrix from unordered region pairs. Pairs touching the
    /// exterior or pairing a region with itself are ignored; duplicates
    /// collapse.
    pub(crate) fn from_pairs(
        num_regions: usize,
        pairs: impl IntoIterator<Item = (RegionId, RegionId)>,
    ) -> Self {
        let mut rows: Vec<Vec<RegionId>> = vec![Vec::new(); num_regions];
        for (a, b) in pairs {
            if a == b || a.is_exterior() || b.is_exterior() {
                continue;
            }
            if a.0 >= num_regions || b.0 >= num_regions {
                continue;
            }
            rows[a.0].push(b);
            rows[b.0].push(a);
        }

        let mut offsets = Vec::with_capacity(num_regions + 1);
        let mut neighbors = Vec::new();
        offsets.push(0);
        for mut row in rows {
            row.sort_unstable();
            row.dedup();
            neighbors.extend(row);
            offsets.push(neighbors.len());
        }
        Self { offsets, neighbors }
    }

    /// Number of rows, including the exterior row.
    #[must_use]
    pub fn num_regions(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Sorted neighbors of `region`. Empty for unknown regions.
    #[must_use]
    pub fn neighbors(&self, region: RegionId) -> &[RegionId] {
        match (self.offsets.get(region.0), self.offsets.get(region.0 + 1)) {
            (Some(&lo), Some(&hi)) => &self.neighbors[lo..hi],
            _ => &[],
        }
    }

    /// Returns `true` if `other` is adjacent to `region` (binary search).
    #[must_use]
    pub fn contains(&self, region: RegionId, other: RegionId) -> bool {
        self.neighbors(region).binary_search(&other).is_ok()
    }

    /// Binary weights, one per neighbor.
    #[must_use]
    pub fn weights(&self, region: RegionId) -> Vec<f64> {
        vec![1.0; self.neighbors(region).len()]
    }

    /// Total number of (ordered) adjacency entries.
    #[must_use]
    pub fn num_entries(&self) -> usize {
        self.neighbors.len()
    }
}

impl WingedEdge {
    /// Regions that share a link, as a CSR matrix.
    #[must_use]
    pub fn region_adjacency(&self) -> RegionAdjacency {
        RegionAdjacency::from_pairs(
            self.regions.len(),
            self.edges.values().map(|e| (e.left, e.right)),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn csr_rows_are_sorted_and_deduplicated() {
        let adj = RegionAdjacency::from_pairs(
            4,
            [
                (RegionId(3), RegionId(1)),
                (RegionId(1), RegionId(2)),
                (RegionId(1), RegionId(3)),
                (RegionId(0), RegionId(2)),
                (RegionId(2), RegionId(2)),
            ],
        );
        assert_eq!(adj.num_regions(), 4);
        assert!(adj.neighbors(RegionId(0)).is_empty());
        assert_eq!(adj.neighbors(RegionId(1)), &[RegionId(2), RegionId(3)]);
        assert_eq!(adj.neighbors(RegionId(2)), &[RegionId(1)]);
        assert_eq!(adj.neighbors(RegionId(3)), &[RegionId(1)]);
        assert_eq!(adj.num_entries(), 4);
    }

    #[test]
    fn contains_and_weights() {
        let adj = RegionAdjacency::from_pairs(3, [(RegionId(1), RegionId(2))]);
        assert!(adj.contains(RegionId(1), RegionId(2)));
        assert!(adj.contains(RegionId(2), RegionId(1)));
        assert!(!adj.contains(RegionId(1), RegionId(1)));
        assert_eq!(adj.weights(RegionId(1)), vec![1.0]);
        assert!(adj.neighbors(RegionId(9)).is_empty());
    }

    #[test]
    fn empty_matrix() {
        let adj = RegionAdjacency::from_pairs(1, std::iter::empty());
        assert_eq!(adj.num_regions(), 1);
        assert_eq!(adj.num_entries(), 0);
    }
}
