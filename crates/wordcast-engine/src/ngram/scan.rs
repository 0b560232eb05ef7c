// Ordered scan along the leaf chain

use super::NgramIndex;
use super::node::{LeafNode, NodeId};

/// Iterator over `(key, count)` pairs following the leaf chain.
///
/// Created by [`NgramIndex::scan_all`]. Yields keys in ascending order.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    index: &'a NgramIndex,
    leaf: Option<&'a LeafNode>,
    pos: usize,
}

impl<'a> Entries<'a> {
    pub(crate) fn new(index: &'a NgramIndex, start: Option<NodeId>) -> Self {
        Self {
            index,
            leaf: start.and_then(|id| index.leaf(id)),
            pos: 0,
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, u64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let leaf = self.leaf?;
            let entry = (leaf.keys.get(self.pos), leaf.counts.get(self.pos));
            if let (Some(key), Some(&count)) = entry {
                self.pos += 1;
                return Some((key.as_str(), count));
            }
            self.leaf = leaf.next.and_then(|id| self.index.leaf(id));
            self.pos = 0;
        }
    }
}
