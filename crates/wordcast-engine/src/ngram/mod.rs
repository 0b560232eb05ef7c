// N-gram frequency index: a left-biased B+ tree with chained leaves
//
// Keys are the literal space-joined n-gram text. Leaves hold the keys and
// their counts and are linked in ascending order; internal nodes only hold
// separators (each separator is the first key of the subtree to its right).
//
// Nodes live in an arena (`Vec<TreeNode>`) and refer to each other by
// `NodeId`, which gives the leaf chain a plain index instead of a shared
// pointer. Nodes are never removed.

mod node;
mod scan;

pub use node::{InternalNode, LeafNode, NodeId, TreeNode};
pub use scan::Entries;

use tracing::debug;
use wordcast_core::RankedCandidates;
use wordcast_core::WordcastError;

use node::Split;

/// Default maximum number of keys per node.
pub const DEFAULT_NODE_CAPACITY: usize = 200;

/// Smallest node capacity that still splits into two non-empty halves.
pub const MIN_NODE_CAPACITY: usize = 2;

/// How a bigram query compares stored keys with the query word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BigramMatch {
    /// Raw character prefix: `"cat"` also matches `"category fits"`.
    #[default]
    RawPrefix,
    /// The query word must be the whole first word of the key.
    WordBoundary,
}

impl BigramMatch {
    fn accepts(self, key: &str, word: &str) -> bool {
        match self {
            BigramMatch::RawPrefix => key.starts_with(word),
            BigramMatch::WordBoundary => key
                .strip_prefix(word)
                .is_some_and(|rest| rest.starts_with(' ')),
        }
    }
}

/// Returns `true` if the first two space-separated words of `key` are
/// exactly `word1` and `word2`.
fn trigram_accepts(key: &str, word1: &str, word2: &str) -> bool {
    let mut words = key.split(' ').filter(|w| !w.is_empty());
    words.next() == Some(word1) && words.next() == Some(word2)
}

/// Ordered frequency store for bigram or trigram keys.
#[derive(Debug, Clone)]
pub struct NgramIndex {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
    capacity: usize,
    /// Sum of every inserted count, including accumulations.
    total_ngram_count: u64,
    /// Number of distinct keys.
    key_count: usize,
}

impl Default for NgramIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl NgramIndex {
    /// Create an empty index with [`DEFAULT_NODE_CAPACITY`].
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            capacity: DEFAULT_NODE_CAPACITY,
            total_ngram_count: 0,
            key_count: 0,
        }
    }

    /// Create an empty index whose nodes hold at most `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Result<Self, WordcastError> {
        if capacity < MIN_NODE_CAPACITY {
            return Err(WordcastError::InvalidCapacity {
                capacity,
                minimum: MIN_NODE_CAPACITY,
            });
        }
        Ok(Self {
            capacity,
            ..Self::new()
        })
    }

    /// Maximum number of keys per node.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sum of every inserted count.
    pub fn total_count(&self) -> u64 {
        self.total_ngram_count
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.key_count
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if the index is not empty.
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.map(|id| &self.nodes[id.0])
    }

    /// The node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// The leaf with the given id, or `None` if `id` is not a leaf.
    pub fn leaf(&self, id: NodeId) -> Option<&LeafNode> {
        match self.nodes.get(id.0)? {
            TreeNode::Leaf(leaf) => Some(leaf),
            TreeNode::Internal(_) => None,
        }
    }

    /// Number of levels (0 when empty, 1 for a single leaf).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(id) = current {
            height += 1;
            current = match &self.nodes[id.0] {
                TreeNode::Internal(node) => node.children.first().copied(),
                TreeNode::Leaf(_) => None,
            };
        }
        height
    }

    fn push(&mut self, node: TreeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Insert `key` with `count` occurrences.
    ///
    /// An existing key accumulates `count`. The total count always grows by
    /// `count`. Overflowing nodes are split on the way back up; a root split
    /// grows the tree by one level.
    pub fn insert(&mut self, key: &str, count: u64) {
        self.total_ngram_count = self.total_ngram_count.saturating_add(count);

        let Some(root) = self.root else {
            let leaf = LeafNode {
                keys: vec![key.to_string()],
                counts: vec![count],
                next: None,
            };
            self.root = Some(self.push(TreeNode::Leaf(leaf)));
            self.key_count = 1;
            return;
        };

        if let Some(split) = self.insert_recursive(root, key, count) {
            let new_root = InternalNode {
                keys: vec![split.separator],
                children: vec![root, split.right],
            };
            self.root = Some(self.push(TreeNode::Internal(new_root)));
            debug!(height = self.height(), keys = self.key_count, "n-gram index grew");
        }
    }

    fn insert_recursive(&mut self, id: NodeId, key: &str, count: u64) -> Option<Split> {
        let descend = match &mut self.nodes[id.0] {
            TreeNode::Leaf(leaf) => {
                if leaf.upsert(key, count) {
                    self.key_count += 1;
                }
                None
            }
            TreeNode::Internal(node) => {
                let slot = node.insert_slot(key);
                Some((slot, node.children[slot]))
            }
        };

        match descend {
            None => self.split_leaf(id),
            Some((slot, child)) => {
                let split = self.insert_recursive(child, key, count)?;
                self.absorb_split(id, slot, split)
            }
        }
    }

    /// Split leaf `id` if it holds more than `capacity` keys.
    ///
    /// The left leaf keeps the first `(capacity + 1) / 2` keys; the new right
    /// leaf takes the rest, is linked right after the left one, and its first
    /// key becomes the separator.
    fn split_leaf(&mut self, id: NodeId) -> Option<Split> {
        let capacity = self.capacity;
        let right_id = NodeId(self.nodes.len());
        let TreeNode::Leaf(leaf) = &mut self.nodes[id.0] else {
            return None;
        };
        if leaf.keys.len() <= capacity {
            return None;
        }

        let split_at = (capacity + 1) / 2;
        let right = LeafNode {
            keys: leaf.keys.split_off(split_at),
            counts: leaf.counts.split_off(split_at),
            next: leaf.next.replace(right_id),
        };
        let separator = right.keys[0].clone();
        self.push(TreeNode::Leaf(right));
        Some(Split {
            separator,
            right: right_id,
        })
    }

    /// Insert a child's split into internal node `id` at `slot`, splitting
    /// `id` in turn if it overflows.
    ///
    /// The left node keeps the first `capacity / 2` keys, the key at
    /// `capacity / 2` moves up to the parent, and the new right node takes
    /// the remaining keys and children.
    fn absorb_split(&mut self, id: NodeId, slot: usize, split: Split) -> Option<Split> {
        let capacity = self.capacity;
        let right_id = NodeId(self.nodes.len());
        let TreeNode::Internal(node) = &mut self.nodes[id.0] else {
            return None;
        };
        node.keys.insert(slot, split.separator);
        node.children.insert(slot + 1, split.right);
        if node.keys.len() <= capacity {
            return None;
        }

        let mid = capacity / 2;
        let right = InternalNode {
            keys: node.keys.split_off(mid + 1),
            children: node.children.split_off(mid + 1),
        };
        let separator = node.keys.pop()?;
        self.push(TreeNode::Internal(right));
        Some(Split {
            separator,
            right: right_id,
        })
    }

    /// Id of the leftmost leaf.
    fn leftmost_leaf(&self) -> Option<NodeId> {
        let mut id = self.root?;
        while let TreeNode::Internal(node) = &self.nodes[id.0] {
            id = *node.children.first()?;
        }
        Some(id)
    }

    /// Descend to the leaf a query guided by `word` starts from.
    fn query_leaf(&self, word: &str) -> Option<NodeId> {
        let mut id = self.root?;
        while let TreeNode::Internal(node) = &self.nodes[id.0] {
            id = node.children[node.query_slot(word)];
        }
        Some(id)
    }

    /// Every `(key, count)` in ascending key order, following the leaf chain
    /// from the leftmost leaf.
    pub fn scan_all(&self) -> Entries<'_> {
        Entries::new(self, self.leftmost_leaf())
    }

    /// Query keys by their first word with the default bigram policy and
    /// ranking capacity.
    ///
    /// Without `word2`, keys starting with `word1` match (bigram mode); with
    /// `word2`, keys whose first two words are `word1` and `word2` match
    /// (trigram mode). Matches are ranked by count.
    pub fn query_by_first_word(&self, word1: &str, word2: Option<&str>) -> RankedCandidates<u64> {
        let mut out = RankedCandidates::new();
        self.query_into(word1, word2, BigramMatch::default(), &mut out);
        out
    }

    /// Like [`query_by_first_word`](Self::query_by_first_word), ranking into
    /// `out` with an explicit bigram policy.
    ///
    /// Descends guided by `word1`, then walks the leaf chain to its end.
    /// Returns the number of matching keys.
    pub fn query_into(
        &self,
        word1: &str,
        word2: Option<&str>,
        policy: BigramMatch,
        out: &mut RankedCandidates<u64>,
    ) -> usize {
        let Some(start) = self.query_leaf(word1) else {
            debug!(word1, "query on empty n-gram index");
            return 0;
        };

        let mut matches = 0;
        for (key, count) in Entries::new(self, Some(start)) {
            let accepted = match word2 {
                None => policy.accepts(key, word1),
                Some(word2) => trigram_accepts(key, word1, word2),
            };
            if accepted {
                matches += 1;
                out.insert(key, count);
            }
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(capacity: usize, keys: &[(&str, u64)]) -> NgramIndex {
        let mut index = NgramIndex::with_capacity(capacity).unwrap();
        for (key, count) in keys {
            index.insert(key, *count);
        }
        index
    }

    fn scanned_keys(index: &NgramIndex) -> Vec<String> {
        index.scan_all().map(|(k, _)| k.to_string()).collect()
    }

    fn words_of(ranked: &RankedCandidates<u64>) -> Vec<&str> {
        ranked.iter().map(|c| c.word.as_str()).collect()
    }

    /// First key reachable under `id`.
    fn first_key(index: &NgramIndex, id: NodeId) -> String {
        match &index.nodes[id.0] {
            TreeNode::Leaf(leaf) => leaf.keys[0].clone(),
            TreeNode::Internal(node) => first_key(index, node.children[0]),
        }
    }

    /// Check structural invariants below `id`; returns the leaf depth.
    fn check_node(index: &NgramIndex, id: NodeId) -> usize {
        match &index.nodes[id.0] {
            TreeNode::Leaf(leaf) => {
                assert!(leaf.keys.len() <= index.capacity);
                assert_eq!(leaf.keys.len(), leaf.counts.len());
                assert!(leaf.keys.windows(2).all(|w| w[0] < w[1]));
                1
            }
            TreeNode::Internal(node) => {
                assert!(node.keys.len() <= index.capacity);
                assert_eq!(node.children.len(), node.keys.len() + 1);
                for (i, key) in node.keys.iter().enumerate() {
                    assert_eq!(key, &first_key(index, node.children[i + 1]));
                }
                let depths: Vec<usize> =
                    node.children.iter().map(|&c| check_node(index, c)).collect();
                assert!(depths.windows(2).all(|w| w[0] == w[1]), "unbalanced");
                depths[0] + 1
            }
        }
    }

    fn check_invariants(index: &NgramIndex) {
        if let Some(root) = index.root {
            assert_eq!(check_node(index, root), index.height());
        }
        let keys = scanned_keys(index);
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "scan not strictly ascending");
        assert_eq!(keys.len(), index.len());
    }

    #[test]
    fn rejects_tiny_capacity() {
        assert_eq!(
            NgramIndex::with_capacity(1).unwrap_err(),
            WordcastError::InvalidCapacity {
                capacity: 1,
                minimum: MIN_NODE_CAPACITY
            }
        );
        assert_eq!(NgramIndex::new().capacity(), DEFAULT_NODE_CAPACITY);
    }

    #[test]
    fn empty_index_has_no_results() {
        let index = NgramIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.height(), 0);
        assert_eq!(index.scan_all().count(), 0);
        assert!(index.query_by_first_word("the", None).is_empty());
        assert!(index.query_by_first_word("the", Some("cat")).is_empty());
    }

    #[test]
    fn overflow_splits_root_into_two_leaves() {
        let keys = ["e f", "a b", "d e", "b c", "c d"];
        let mut index = NgramIndex::with_capacity(4).unwrap();
        for key in keys {
            index.insert(key, 1);
        }

        let Some(TreeNode::Internal(root)) = index.root() else {
            panic!("root should be internal");
        };
        assert_eq!(root.keys(), &["c d"]);
        assert_eq!(root.children().len(), 2);

        let left = index.leaf(root.children()[0]).unwrap();
        let right = index.leaf(root.children()[1]).unwrap();
        // (4 + 1) / 2 keys stay on the left.
        assert_eq!(left.keys(), &["a b", "b c"]);
        assert_eq!(right.keys(), &["c d", "d e", "e f"]);
        assert_eq!(left.next(), Some(root.children()[1]));
        assert_eq!(right.next(), None);
        check_invariants(&index);
    }

    #[test]
    fn internal_split_promotes_middle_key() {
        let index = index(2, &[("a", 1), ("b", 1), ("c", 1), ("d", 1), ("e", 1)]);
        assert_eq!(index.height(), 3);

        let Some(TreeNode::Internal(root)) = index.root() else {
            panic!("root should be internal");
        };
        assert_eq!(root.keys(), &["c"]);
        let left = index.node(root.children()[0]).unwrap();
        let right = index.node(root.children()[1]).unwrap();
        assert_eq!(left.keys(), &["b"]);
        assert_eq!(right.keys(), &["d"]);
        assert!(!left.is_leaf() && !right.is_leaf());
        assert_eq!(scanned_keys(&index), vec!["a", "b", "c", "d", "e"]);
        check_invariants(&index);
    }

    #[test]
    fn duplicate_keys_accumulate() {
        let index = index(4, &[("the cat", 2), ("a dog", 1), ("the cat", 3)]);
        let entries: Vec<(&str, u64)> = index.scan_all().collect();
        assert_eq!(entries, vec![("a dog", 1), ("the cat", 5)]);
        assert_eq!(index.total_count(), 6);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn separator_keys_accumulate_instead_of_duplicating() {
        let keys: Vec<String> = (0..200).map(|i| format!("w{i:03} x")).collect();
        let mut index = NgramIndex::with_capacity(3).unwrap();
        for key in &keys {
            index.insert(key, 1);
        }
        for key in keys.iter().rev() {
            index.insert(key, 1);
        }
        check_invariants(&index);
        assert_eq!(index.len(), 200);
        assert!(index.scan_all().all(|(_, count)| count == 2));
        assert_eq!(index.total_count(), 400);
    }

    #[test]
    fn scrambled_insertion_keeps_order() {
        let mut index = NgramIndex::with_capacity(4).unwrap();
        for i in 0..1000u64 {
            let n = (i * 7919) % 1000;
            index.insert(&format!("k{n:04} v"), n + 1);
        }
        check_invariants(&index);
        assert_eq!(index.len(), 1000);
        assert!(index.height() > 3);
        let first = index.scan_all().next().unwrap();
        assert_eq!(first, ("k0000 v", 1));
    }

    #[test]
    fn scan_is_restartable() {
        let index = index(2, &[("b", 1), ("a", 1), ("c", 1)]);
        assert_eq!(scanned_keys(&index), scanned_keys(&index));
    }

    #[test]
    fn bigram_query_uses_raw_prefix_by_default() {
        let index = index(4, &[("cat sits", 2), ("category fits", 9), ("dog runs", 4)]);
        let ranked = index.query_by_first_word("cat", None);
        assert_eq!(words_of(&ranked), vec!["category fits", "cat sits"]);
    }

    #[test]
    fn bigram_query_word_boundary_policy() {
        let index = index(4, &[("cat sits", 2), ("category fits", 9), ("cat", 1)]);
        let mut out = RankedCandidates::new();
        let matches = index.query_into("cat", None, BigramMatch::WordBoundary, &mut out);
        assert_eq!(matches, 1);
        assert_eq!(words_of(&out), vec!["cat sits"]);
    }

    #[test]
    fn trigram_query_requires_both_words() {
        let index = index(
            4,
            &[
                ("the cat sat", 5),
                ("the cat ran", 3),
                ("the cats sat", 7),
                ("then cat sat", 8),
                ("the dog sat", 9),
            ],
        );
        let ranked = index.query_by_first_word("the", Some("cat"));
        assert_eq!(words_of(&ranked), vec!["the cat sat", "the cat ran"]);
        assert_eq!(ranked.best().unwrap().score, 5);
    }

    #[test]
    fn query_walks_across_leaves() {
        let mut index = NgramIndex::with_capacity(2).unwrap();
        for (i, word) in ["apple", "bird", "cloud", "dance", "eagle", "flame"].iter().enumerate() {
            index.insert(&format!("the {word}"), i as u64 + 1);
        }
        index.insert("a the", 100);
        index.insert("zebra the", 100);
        assert!(index.height() > 2);

        let mut out = RankedCandidates::new();
        let matches = index.query_into("the", None, BigramMatch::RawPrefix, &mut out);
        assert_eq!(matches, 6);
        assert_eq!(words_of(&out), vec!["the flame", "the eagle", "the dance"]);
    }
}
