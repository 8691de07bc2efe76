//! Disjoint-set union (union-find) with path compression.

/// Partition of `0..len` into disjoint sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of `x`'s set. Every element on the way is re-pointed
    /// directly at the root.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`, attaching `a`'s root under `b`'s.
    /// Returns false if they were already one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        self.parent[ra] = rb;
        true
    }

    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons() {
        let mut ds = DisjointSet::new(3);
        assert_eq!(ds.len(), 3);
        for i in 0..3 {
            assert_eq!(ds.find(i), i);
        }
        assert!(!ds.same_set(0, 1));
    }

    #[test]
    fn union_merges_once() {
        let mut ds = DisjointSet::new(4);
        assert!(ds.union(0, 1));
        assert!(ds.union(2, 3));
        assert!(!ds.union(1, 0));
        assert!(ds.union(1, 3));
        assert!(ds.same_set(0, 2));
        assert!(!ds.union(0, 3));
    }

    #[test]
    fn first_root_goes_under_second() {
        let mut ds = DisjointSet::new(2);
        ds.union(0, 1);
        assert_eq!(ds.find(0), 1);
    }

    #[test]
    fn find_compresses_paths() {
        let mut ds = DisjointSet::new(5);
        // Chain 0 -> 1 -> 2 -> 3 -> 4
        for i in 0..4 {
            ds.union(i, i + 1);
        }
        assert_eq!(ds.find(0), 4);
        assert_eq!(ds.parent, vec![4, 4, 4, 4, 4]);
    }
}
