/// Prefix trie over hanzi keys for longest-match segmentation.
use std::collections::HashMap;

/// Stores every traditional and simplified form in the dictionary, each
/// pointing at the index of its first entry. Walking the trie from a
/// position answers "what is the longest dictionary key starting here" in
/// time bounded by the longest key, instead of probing every substring.
#[derive(Debug, Default)]
pub(crate) struct Trie {
    children: HashMap<char, Box<Trie>>,
    entry: Option<usize>,
}

impl Trie {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert a hanzi key pointing at an entry index.
    ///
    /// The first insertion for a key wins, so inserting entries in source
    /// order makes each key resolve to its first entry, matching the exact
    /// hanzi lookup.
    pub(crate) fn insert(&mut self, key: &str, entry: usize) {
        let mut node = self;
        for ch in key.chars() {
            node = node.children.entry(ch).or_default();
        }
        if node.entry.is_none() {
            node.entry = Some(entry);
        }
    }

    /// Walk from `start` in `input` and return the longest key match as
    /// `(end_index, entry_index)`, where `end_index` is the exclusive
    /// character index after the match.
    pub(crate) fn longest_match(&self, input: &[char], start: usize) -> Option<(usize, usize)> {
        let mut node = self;
        let mut best = None;
        let mut idx = start;
        while idx < input.len() {
            match node.children.get(&input[idx]) {
                Some(child) => {
                    node = child;
                    idx += 1;
                    if let Some(entry) = node.entry {
                        best = Some((idx, entry));
                    }
                }
                None => break,
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_longest_key() {
        let mut trie = Trie::new();
        trie.insert("中", 0);
        trie.insert("中文", 1);
        trie.insert("中文老師", 2);

        let input: Vec<char> = "中文老師好".chars().collect();
        assert_eq!(trie.longest_match(&input, 0), Some((4, 2)));

        let input: Vec<char> = "中文字".chars().collect();
        assert_eq!(trie.longest_match(&input, 0), Some((2, 1)));
        assert_eq!(trie.longest_match(&input, 1), None);
    }

    #[test]
    fn no_match_on_unknown_start() {
        let mut trie = Trie::new();
        trie.insert("中文", 0);
        let input: Vec<char> = "文中".chars().collect();
        assert_eq!(trie.longest_match(&input, 0), None);
    }

    #[test]
    fn first_insert_wins_for_duplicate_keys() {
        let mut trie = Trie::new();
        trie.insert("行", 3);
        trie.insert("行", 7);
        let input: Vec<char> = "行".chars().collect();
        assert_eq!(trie.longest_match(&input, 0), Some((1, 3)));
    }
}
