use core::fmt;
use core::num::NonZeroU32;

/// Edge weight (and flow capacity). Absent weights default to [`DEFAULT_WEIGHT`].
pub type Weight = u64;

/// Effective weight of an edge with no stored weight, or of any edge in an
/// unweighted graph.
pub const DEFAULT_WEIGHT: Weight = 1;

/// Largest weight an edge may carry.
///
/// With at most `u32::MAX` vertices, any sum of per-edge weights an
/// algorithm forms (tree totals, flow values, residual capacities) stays
/// below `u64::MAX`.
pub const MAX_WEIGHT: Weight = u32::MAX as Weight;

/// Compact vertex identity.
///
/// Vertices are always numbered contiguously from 0, so an id doubles as an
/// index into per-vertex arrays.
///
/// - `u32` keeps adjacency arrays small
/// - `NonZero` enables `Option<VertexId>` (parent links) to be niche-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(NonZeroU32);

impl VertexId {
    /// Create a VertexId from a 0-based index by storing index+1.
    ///
    /// Panics if the index does not fit in a `u32`.
    pub fn from_index(index: usize) -> Self {
        Self::try_from_index(index).expect("vertex index fits in u32")
    }

    /// Like [`VertexId::from_index`], but None instead of panicking.
    pub fn try_from_index(index: usize) -> Option<Self> {
        u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(NonZeroU32::new)
            .map(Self)
    }

    /// Recover the 0-based index.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.index())
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl From<VertexId> for usize {
    fn from(v: VertexId) -> usize {
        v.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_usize, 1, 2, 42, 10_000] {
            let id = VertexId::from_index(i);
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn try_from_index_rejects_overflow() {
        assert_eq!(VertexId::try_from_index(7).map(VertexId::index), Some(7));
        assert!(VertexId::try_from_index(u32::MAX as usize).is_none());
        assert!(VertexId::try_from_index(usize::MAX).is_none());
    }

    #[test]
    fn weight_sums_fit() {
        // A spanning tree over the most vertices an id can name
        let edges = u32::MAX as Weight - 1;
        assert!(edges.checked_mul(MAX_WEIGHT).is_some());
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<VertexId>(),
            core::mem::size_of::<Option<VertexId>>()
        );
    }

    #[test]
    fn ordering_follows_index() {
        assert!(VertexId::from_index(0) < VertexId::from_index(1));
        assert!(None < Some(VertexId::from_index(0)));
    }

    #[test]
    #[should_panic]
    fn index_past_u32_panics() {
        VertexId::from_index(u32::MAX as usize);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn display_matches_index(i in 0_usize..1_000_000) {
            prop_assert_eq!(VertexId::from_index(i).to_string(), i.to_string());
        }
    }
}
