//! Category tree index
//!
//! Categories are stored flat, each with an optional parent id. The index is
//! rebuilt from a snapshot whenever it is needed; nothing here is persisted.
//!
//! A category whose parent id does not name a category in the snapshot
//! (its parent was deleted) is treated as a root. Every traversal tracks the
//! ids it has seen, so a cycle in the data cannot make it loop.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::db::Category;

/// Parent → children adjacency derived from a category snapshot
#[derive(Debug)]
pub struct CategoryTree<'a> {
    categories: &'a [Category],
    by_id:      HashMap<&'a str, &'a Category>,
    children:   HashMap<&'a str, Vec<&'a Category>>,
}

impl<'a> CategoryTree<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        let by_id: HashMap<&str, &Category> =
            categories.iter().map(|c| (c.id.as_str(), c)).collect();

        let mut children: HashMap<&str, Vec<&Category>> = HashMap::new();
        for category in categories {
            if let Some(parent) = category.parent_id.as_deref() {
                if by_id.contains_key(parent) {
                    children.entry(parent).or_default().push(category);
                }
            }
        }

        Self {
            categories,
            by_id,
            children,
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a Category> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Direct children of `id`, in snapshot order
    pub fn children(&self, id: &str) -> &[&'a Category] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when the category has no parent or its parent is missing
    pub fn is_root(&self, category: &Category) -> bool {
        match category.parent_id.as_deref() {
            None => true,
            Some(parent) => !self.contains(parent),
        }
    }

    /// Root-level categories, in snapshot order
    pub fn roots(&self) -> Vec<&'a Category> {
        self.categories.iter().filter(|c| self.is_root(c)).collect()
    }

    /// `id` together with every category reachable below it
    ///
    /// An id that is not in the snapshot yields just itself.
    pub fn subtree_ids(&self, id: &str) -> HashSet<String> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        visited.insert(id.to_string());
        queue.push_back(id);

        while let Some(current) = queue.pop_front() {
            for child in self.children(current) {
                if visited.insert(child.id.clone()) {
                    queue.push_back(child.id.as_str());
                }
            }
        }

        visited
    }

    /// Ids on the parent chain of `id`, nearest first
    ///
    /// Stops at a root, at a dangling parent, or when an id repeats.
    pub fn ancestors(&self, id: &str) -> Vec<&'a str> {
        let mut chain = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(id);

        let mut current = self.get(id);
        while let Some(category) = current {
            let Some(parent) = category.parent_id.as_deref() else {
                break;
            };
            let Some(parent) = self.get(parent) else {
                break;
            };
            if !seen.insert(parent.id.as_str()) {
                break;
            }
            chain.push(parent.id.as_str());
            current = Some(parent);
        }

        chain
    }

    pub fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        self.ancestors(id).iter().any(|a| *a == ancestor)
    }

    /// Whether making `new_parent` the parent of `id` would close a loop
    pub fn would_cycle(&self, id: &str, new_parent: &str) -> bool {
        new_parent == id || self.is_ancestor(id, new_parent)
    }

    /// Depth-first listing for display: every category once, with its depth
    ///
    /// Roots come first in snapshot order, each followed by its subtree.
    /// Categories stuck on a cycle (never reachable from a root) are appended
    /// at depth 0 so nothing is silently dropped.
    pub fn walk(&self) -> Vec<TreeRow<'a>> {
        let mut rows = Vec::with_capacity(self.categories.len());
        let mut visited: HashSet<&str> = HashSet::new();

        for root in self.roots() {
            self.walk_from(root, 0, &mut visited, &mut rows);
        }
        for category in self.categories {
            if !visited.contains(category.id.as_str()) {
                self.walk_from(category, 0, &mut visited, &mut rows);
            }
        }

        rows
    }

    fn walk_from(
        &self,
        category: &'a Category,
        depth: usize,
        visited: &mut HashSet<&'a str>,
        rows: &mut Vec<TreeRow<'a>>,
    ) {
        if !visited.insert(category.id.as_str()) {
            return;
        }
        rows.push(TreeRow { depth, category });
        for child in self.children(category.id.as_str()) {
            self.walk_from(child, depth + 1, visited, rows);
        }
    }
}

/// One line of [`CategoryTree::walk`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeRow<'a> {
    pub depth:    usize,
    pub category: &'a Category,
}
