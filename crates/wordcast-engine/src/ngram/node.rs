// Ordered tree nodes: leaf and internal variants stored in an arena

/// Index of a node inside the [`NgramIndex`](super::NgramIndex) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A leaf: sorted unique keys, one count per key, and the link to the next
/// leaf in ascending key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafNode {
    pub(crate) keys: Vec<String>,
    pub(crate) counts: Vec<u64>,
    pub(crate) next: Option<NodeId>,
}

impl LeafNode {
    /// Insert `key` in sorted position, or add `count` to it if present.
    ///
    /// Returns `true` if a new key was added.
    pub(crate) fn upsert(&mut self, key: &str, count: u64) -> bool {
        match self.keys.binary_search_by(|k| k.as_str().cmp(key)) {
            Ok(pos) => {
                self.counts[pos] = self.counts[pos].saturating_add(count);
                false
            }
            Err(pos) => {
                self.keys.insert(pos, key.to_string());
                self.counts.insert(pos, count);
                true
            }
        }
    }

    /// Keys held by this leaf, ascending.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Counts, parallel to [`keys`](Self::keys).
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// The next leaf in the chain.
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }
}

/// An internal node: `keys.len() + 1` children, where `keys[i]` is the first
/// key reachable under `children[i + 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternalNode {
    pub(crate) keys: Vec<String>,
    pub(crate) children: Vec<NodeId>,
}

impl InternalNode {
    /// Child slot for inserting `key`.
    ///
    /// Keys equal to a separator live in the subtree right of it, since the
    /// separator is that subtree's first key.
    pub(crate) fn insert_slot(&self, key: &str) -> usize {
        self.keys.partition_point(|k| k.as_str() <= key)
    }

    /// Child slot for a query guided by `word`: the first slot `i` with
    /// `word <= keys[i]`. Every key greater than or equal to `word` lives
    /// in this slot's subtree or to its right.
    pub(crate) fn query_slot(&self, word: &str) -> usize {
        self.keys.partition_point(|k| k.as_str() < word)
    }

    /// Separator keys, ascending.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Child node ids, one more than the number of keys.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A node of the ordered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf(LeafNode),
    Internal(InternalNode),
}

impl TreeNode {
    /// Keys held by this node.
    pub fn keys(&self) -> &[String] {
        match self {
            TreeNode::Leaf(leaf) => leaf.keys(),
            TreeNode::Internal(node) => node.keys(),
        }
    }

    /// Returns `true` for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }
}

/// Result of splitting an overflowing node: the separator to insert into
/// the parent and the new right sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Split {
    pub(crate) separator: String,
    pub(crate) right: NodeId,
}
