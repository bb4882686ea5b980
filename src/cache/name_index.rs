//! Name Index Module
//!
//! Prefix tree over name components mapping exact names to entry ids.
//!
//! Every operation walks one tree level per component, so its cost depends
//! on the length of the name and not on how many entries are indexed.
//! Children of a node are hashed by component, so a node with many siblings
//! is no slower to extend than one with few.

use std::collections::HashMap;

use crate::cache::entry::EntryId;
use crate::cache::name::{Name, NameComponent};

// == Index Node ==
#[derive(Debug, Default)]
struct IndexNode {
    entry: Option<EntryId>,
    children: HashMap<NameComponent, IndexNode>,
}

impl IndexNode {
    fn child(&self, component: &NameComponent) -> Option<&IndexNode> {
        self.children.get(component)
    }

    fn get_or_insert_child(&mut self, component: &NameComponent) -> &mut IndexNode {
        self.children.entry(component.clone()).or_default()
    }

    fn is_empty(&self) -> bool {
        self.entry.is_none() && self.children.is_empty()
    }

    // Removes the id stored at `remaining` below this node and prunes
    // branches left without ids.
    fn remove(&mut self, remaining: &[NameComponent]) -> Option<EntryId> {
        let Some((first, rest)) = remaining.split_first() else {
            return self.entry.take();
        };

        let child = self.children.get_mut(first)?;
        let removed = child.remove(rest);
        if child.is_empty() {
            self.children.remove(first);
        }
        removed
    }
}

// == Name Index ==
#[derive(Debug, Default)]
pub struct NameIndex {
    root: IndexNode,
    len: usize,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Maps `name` to `id`, overwriting any id already mapped.
    ///
    /// Returns the previously mapped id.
    pub fn insert(&mut self, name: &Name, id: EntryId) -> Option<EntryId> {
        let mut node = &mut self.root;
        for component in name.components() {
            node = node.get_or_insert_child(component);
        }
        let previous = node.entry.replace(id);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    // == Lookup Exact ==
    pub fn lookup_exact(&self, name: &Name) -> Option<EntryId> {
        let mut node = &self.root;
        for component in name.components() {
            node = node.child(component)?;
        }
        node.entry
    }

    // == Longest Prefix ==
    /// Returns the id mapped to the longest indexed prefix of `name`,
    /// together with the length of that prefix.
    pub fn longest_prefix(&self, name: &Name) -> Option<(usize, EntryId)> {
        let mut node = &self.root;
        let mut best = node.entry.map(|id| (0, id));
        for (depth, component) in name.components().enumerate() {
            match node.child(component) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(id) = node.entry {
                best = Some((depth + 1, id));
            }
        }
        best
    }

    // == Remove ==
    /// Removes the mapping for `name`. Absent names are a no-op.
    pub fn remove(&mut self, name: &Name) -> Option<EntryId> {
        let removed = self.root.remove(name.as_slice());
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Returns the number of mapped names.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn name(uri: &str) -> Name {
        uri.parse().unwrap()
    }

    #[test]
    fn test_insert_and_lookup_exact() {
        let mut index = NameIndex::new();
        index.insert(&name("/prefix/0"), EntryId(1));
        index.insert(&name("/prefix/1"), EntryId(2));

        assert_eq!(index.lookup_exact(&name("/prefix/0")), Some(EntryId(1)));
        assert_eq!(index.lookup_exact(&name("/prefix/1")), Some(EntryId(2)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_exact_match_only() {
        let mut index = NameIndex::new();
        index.insert(&name("/a/b"), EntryId(1));

        assert_eq!(index.lookup_exact(&name("/a")), None);
        assert_eq!(index.lookup_exact(&name("/a/b/c")), None);
        assert_eq!(index.lookup_exact(&name("/a/c")), None);
    }

    #[test]
    fn test_duplicate_insert_overwrites() {
        let mut index = NameIndex::new();
        assert_eq!(index.insert(&name("/a"), EntryId(1)), None);
        assert_eq!(index.insert(&name("/a"), EntryId(7)), Some(EntryId(1)));

        assert_eq!(index.lookup_exact(&name("/a")), Some(EntryId(7)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut index = NameIndex::new();
        index.insert(&name("/a/b"), EntryId(1));

        assert_eq!(index.remove(&name("/a")), None);
        assert_eq!(index.remove(&name("/x/y")), None);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup_exact(&name("/a/b")), Some(EntryId(1)));
    }

    #[test]
    fn test_remove_keeps_descendants() {
        let mut index = NameIndex::new();
        index.insert(&name("/a"), EntryId(1));
        index.insert(&name("/a/b"), EntryId(2));

        assert_eq!(index.remove(&name("/a")), Some(EntryId(1)));
        assert_eq!(index.lookup_exact(&name("/a")), None);
        assert_eq!(index.lookup_exact(&name("/a/b")), Some(EntryId(2)));
    }

    #[test]
    fn test_remove_prunes_empty_branches() {
        let mut index = NameIndex::new();
        index.insert(&name("/a/b/c"), EntryId(1));
        index.remove(&name("/a/b/c"));

        assert!(index.is_empty());
        assert!(index.root.is_empty());
    }

    #[test]
    fn test_wide_fan_out_under_one_prefix() {
        let mut index = NameIndex::new();
        let names: Vec<Name> = (0..10_000).map(|n| name(&format!("/prefix/{}", n))).collect();
        for (n, name) in names.iter().enumerate() {
            assert_eq!(index.insert(name, EntryId(n as u64)), None);
        }
        assert_eq!(index.len(), 10_000);
        assert_eq!(index.lookup_exact(&names[9_999]), Some(EntryId(9_999)));

        for (n, name) in names.iter().enumerate() {
            assert_eq!(index.remove(name), Some(EntryId(n as u64)));
        }
        assert!(index.is_empty());
        assert!(index.root.is_empty());
    }

    #[test]
    fn test_root_name_is_indexable() {
        let mut index = NameIndex::new();
        index.insert(&Name::new(), EntryId(3));
        assert_eq!(index.lookup_exact(&Name::new()), Some(EntryId(3)));
        assert_eq!(index.remove(&Name::new()), Some(EntryId(3)));
        assert!(index.is_empty());
    }

    #[test]
    fn test_longest_prefix() {
        let mut index = NameIndex::new();
        index.insert(&name("/a"), EntryId(1));
        index.insert(&name("/a/b/c"), EntryId(2));

        assert_eq!(index.longest_prefix(&name("/a/b")), Some((1, EntryId(1))));
        assert_eq!(index.longest_prefix(&name("/a/b/c/d")), Some((3, EntryId(2))));
        assert_eq!(index.longest_prefix(&name("/z")), None);
    }
}
