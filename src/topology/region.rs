use std::fmt;

use crate::graph::NodeId;

/// Index of a region (face) in a winged-edge structure.
///
/// `RegionId(0)` is the exterior (unbounded) face; bounded regions start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

impl RegionId {
    /// The exterior region, conceptually at infinity.
    pub const EXTERIOR: Self = Self(0);

    /// Returns `true` for the exterior region.
    #[must_use]
    pub fn is_exterior(self) -> bool {
        self == Self::EXTERIOR
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exterior() {
            write!(f, "RegionId(EXTERIOR)")
        } else {
            write!(f, "RegionId({})", self.0)
        }
    }
}

/// A face traced as a closed sequence of nodes (first == last).
///
/// The exterior placeholder has an empty boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    boundary: Vec<NodeId>,
}

impl Region {
    /// The exterior placeholder.
    #[must_use]
    pub fn exterior() -> Self {
        Self::default()
    }

    /// Builds a region from a node cycle, closing it if the first node is not
    /// already repeated at the end.
    #[must_use]
    pub fn closed(mut nodes: Vec<NodeId>) -> Self {
        if let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) {
            if nodes.len() == 1 || first != last {
                nodes.push(first);
            }
        }
        Self { boundary: nodes }
    }

    /// The closed boundary, first node repeated at the end.
    #[must_use]
    pub fn boundary(&self) -> &[NodeId] {
        &self.boundary
    }

    /// The boundary without its closing duplicate.
    #[must_use]
    pub fn ring(&self) -> &[NodeId] {
        match self.boundary.split_last() {
            Some((_, ring)) => ring,
            None => &[],
        }
    }

    /// Number of boundary edges (equal to the number of ring nodes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty()
    }

    /// Ring node at cyclic index `i`, wrapping past the end.
    ///
    /// Callers step backwards with `i + len - 1`. Returns `None` only for an
    /// empty region.
    #[must_use]
    pub fn at(&self, i: usize) -> Option<NodeId> {
        let ring = self.ring();
        if ring.is_empty() {
            return None;
        }
        Some(ring[i % ring.len()])
    }

    /// First position of `node` in the ring.
    #[must_use]
    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.ring().iter().position(|&n| n == node)
    }

    /// Consecutive node pairs of the boundary, i.e. its directed edges.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.boundary.windows(2).map(|w| (w[0], w[1]))
    }

    /// The same boundary traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut boundary = self.boundary.clone();
        boundary.reverse();
        Self { boundary }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut sm: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    #[test]
    fn exterior_display() {
        assert_eq!(RegionId::EXTERIOR.to_string(), "RegionId(EXTERIOR)");
        assert_eq!(RegionId(3).to_string(), "RegionId(3)");
        assert!(RegionId(0).is_exterior());
        assert!(!RegionId(1).is_exterior());
    }

    #[test]
    fn closed_appends_first_node_once() {
        let n = ids(3);
        let open = Region::closed(n.clone());
        assert_eq!(open.boundary(), &[n[0], n[1], n[2], n[0]]);

        let already = Region::closed(vec![n[0], n[1], n[2], n[0]]);
        assert_eq!(already, open);
        assert_eq!(open.len(), 3);
        assert_eq!(open.ring(), &[n[0], n[1], n[2]]);
    }

    #[test]
    fn exterior_is_empty() {
        let ext = Region::exterior();
        assert!(ext.is_empty());
        assert_eq!(ext.len(), 0);
        assert_eq!(ext.at(0), None);
        assert_eq!(ext.edges().count(), 0);
    }

    #[test]
    fn cyclic_index_wraps() {
        let n = ids(4);
        let r = Region::closed(n.clone());
        assert_eq!(r.at(0), Some(n[0]));
        assert_eq!(r.at(3), Some(n[3]));
        assert_eq!(r.at(4), Some(n[0]));
        assert_eq!(r.at(5), Some(n[1]));
        // one step back from index 0
        assert_eq!(r.at(4 - 1), Some(n[3]));
    }

    #[test]
    fn edges_and_reversal() {
        let n = ids(3);
        let r = Region::closed(n.clone());
        let e: Vec<_> = r.edges().collect();
        assert_eq!(e, vec![(n[0], n[1]), (n[1], n[2]), (n[2], n[0])]);

        let rev = r.reversed();
        assert_eq!(rev.boundary(), &[n[0], n[2], n[1], n[0]]);
        assert_eq!(rev.position(n[2]), Some(1));
    }
}
