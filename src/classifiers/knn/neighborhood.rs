use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A training case considered for a query, with its distance and label.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub distance: f64,
    pub label: String,
}

impl Neighbor {
    pub fn new(distance: f64, label: impl Into<String>) -> Neighbor {
        Neighbor {
            distance,
            label: label.into(),
        }
    }
}

/// Heap entry. `seq` is the offer order; among equal distances the later
/// offer ranks as farther, so it is evicted first.
#[derive(Debug)]
struct Ranked {
    neighbor: Neighbor,
    seq: u64,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.neighbor
            .distance
            .total_cmp(&other.neighbor.distance)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Keeps the `k` closest candidates offered so far.
///
/// Backed by a max-heap keyed on distance: the root is always the farthest
/// retained candidate, and it is popped whenever the size exceeds `k`.
/// Each offer costs O(log k).
#[derive(Debug)]
pub struct Neighborhood {
    k: usize,
    heap: BinaryHeap<Ranked>,
    offered: u64,
}

impl Neighborhood {
    pub fn new(k: usize) -> Neighborhood {
        Neighborhood {
            k,
            heap: BinaryHeap::with_capacity(k.saturating_add(1)),
            offered: 0,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Inserts `candidate`, then evicts the farthest one if over capacity.
    /// Returns the evicted candidate, if any.
    pub fn offer(&mut self, candidate: Neighbor) -> Option<Neighbor> {
        let seq = self.offered;
        self.offered += 1;
        self.heap.push(Ranked {
            neighbor: candidate,
            seq,
        });
        if self.heap.len() > self.k {
            return self.heap.pop().map(|r| r.neighbor);
        }
        None
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn offered(&self) -> u64 {
        self.offered
    }

    pub fn farthest(&self) -> Option<&Neighbor> {
        self.heap.peek().map(|r| &r.neighbor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Neighbor> {
        self.heap.iter().map(|r| &r.neighbor)
    }

    /// Retained candidates by ascending distance, ties in offer order.
    pub fn into_sorted_vec(self) -> Vec<Neighbor> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|r| r.neighbor)
            .collect()
    }
}
