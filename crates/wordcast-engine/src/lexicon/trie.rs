// Trie node and depth-first word enumeration

use wordcast_core::character::{ALPHABET_SIZE, letter_at, letter_index};

/// One node of the lexicon trie.
///
/// Each node owns up to 26 children, one per lowercase letter. A node is a
/// word end when `end_of_word` is set; `count` is then its accumulated
/// occurrence count. Nodes are never pruned.
#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    children: [Option<Box<TrieNode>>; ALPHABET_SIZE],
    count: u64,
    end_of_word: bool,
}

impl TrieNode {
    /// Occurrence count (0 unless this node ends a word).
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns `true` if a word ends at this node.
    pub fn is_end_of_word(&self) -> bool {
        self.end_of_word
    }

    /// Child for `c`, or `None` if the path does not exist or `c` is
    /// outside the alphabet.
    pub fn child(&self, c: char) -> Option<&TrieNode> {
        self.children[letter_index(c)?].as_deref()
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_some()).count()
    }

    /// Child for slot `index`, created on demand.
    pub(crate) fn child_or_insert(&mut self, index: usize) -> &mut TrieNode {
        self.children[index].get_or_insert_with(Box::default)
    }

    /// Mark this node as a word end and add `count` to it.
    pub(crate) fn mark_word(&mut self, count: u64) {
        self.end_of_word = true;
        self.count = self.count.saturating_add(count);
    }

    /// Walk `path` from this node. Fails on the first missing letter.
    pub fn descend(&self, path: &str) -> Option<&TrieNode> {
        path.chars().try_fold(self, |node, c| node.child(c))
    }

    /// Visit every word end in this subtree in alphabetical order.
    ///
    /// `buf` holds the path leading to this node and is restored before
    /// returning; the visitor receives the full word for each word end.
    pub fn for_each_word<F>(&self, buf: &mut String, visit: &mut F)
    where
        F: FnMut(&str, &TrieNode),
    {
        if self.end_of_word {
            visit(buf, self);
        }
        for (index, slot) in self.children.iter().enumerate() {
            if let (Some(child), Some(letter)) = (slot, letter_at(index)) {
                buf.push(letter);
                child.for_each_word(buf, visit);
                buf.pop();
            }
        }
    }
}
