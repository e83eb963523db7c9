use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

use crate::model::NodeId;

/// Total ordering over `f64` costs so frontier entries can live in a
/// `BinaryHeap`. Costs are finite by construction (positive weights,
/// origin at zero).
#[derive(Copy, Clone, Debug, Default)]
pub(super) struct FloatOrd(pub(super) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Pending frontier entry. Duplicates for a node are allowed; the search
/// discards entries whose node is already finalized (lazy deletion).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) struct FrontierEntry {
    pub(super) cost: FloatOrd,
    pub(super) node: NodeIndex,
    pub(super) id: NodeId,
}

impl FrontierEntry {
    pub(super) fn new(node: NodeIndex, id: NodeId, cost: f64) -> Self {
        Self {
            cost: FloatOrd(cost),
            node,
            id,
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap); equal
        // costs break by ascending node id for a reproducible pop order.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn pops_lowest_cost_first_then_lowest_id() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry::new(NodeIndex::new(0), 30, 2.5));
        heap.push(FrontierEntry::new(NodeIndex::new(1), 20, 1.0));
        heap.push(FrontierEntry::new(NodeIndex::new(2), 10, 1.0));

        assert_eq!(heap.pop().unwrap().id, 10);
        assert_eq!(heap.pop().unwrap().id, 20);
        assert_eq!(heap.pop().unwrap().id, 30);
    }
}
