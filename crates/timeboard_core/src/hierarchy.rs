//! Category hierarchy index.
//!
//! # Responsibility
//! - Build a parent -> children adjacency from a flat category snapshot.
//! - Answer leaf, root, parent and ancestor queries for one snapshot.
//!
//! # Invariants
//! - Roots live under the explicit `LevelKey::Root` sentinel, never under a
//!   real id.
//! - Children keep snapshot order.
//! - Id uniqueness and acyclicity are caller invariants and are not
//!   validated here; `ancestors` still terminates on malformed cycles.

use crate::model::category::{Category, CategoryId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One browsable hierarchy level: the roots, or the children of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "parent_id")]
pub enum LevelKey {
    Root,
    Children(CategoryId),
}

impl LevelKey {
    /// Level a category with `parent_id` lives on.
    pub fn for_parent(parent_id: Option<CategoryId>) -> Self {
        match parent_id {
            Some(parent_id) => Self::Children(parent_id),
            None => Self::Root,
        }
    }

    pub fn parent_id(self) -> Option<CategoryId> {
        match self {
            Self::Root => None,
            Self::Children(parent_id) => Some(parent_id),
        }
    }
}

/// Adjacency and membership index over one category snapshot.
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    children: HashMap<LevelKey, Vec<CategoryId>>,
    parents: HashMap<CategoryId, Option<CategoryId>>,
    known: HashSet<CategoryId>,
    order: Vec<CategoryId>,
}

impl HierarchyIndex {
    /// Indexes `categories`; later duplicates of an id overwrite its parent.
    pub fn build(categories: &[Category]) -> Self {
        let mut index = Self::default();
        for category in categories {
            index
                .children
                .entry(LevelKey::for_parent(category.parent_id))
                .or_default()
                .push(category.id);
            index.parents.insert(category.id, category.parent_id);
            if index.known.insert(category.id) {
                index.order.push(category.id);
            }
        }
        index
    }

    /// Direct children of a level, in snapshot order.
    pub fn children_of(&self, level: LevelKey) -> &[CategoryId] {
        self.children
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Direct children of one category.
    pub fn children_of_category(&self, id: CategoryId) -> &[CategoryId] {
        self.children_of(LevelKey::Children(id))
    }

    pub fn roots(&self) -> &[CategoryId] {
        self.children_of(LevelKey::Root)
    }

    /// True when no category names `id` as its parent.
    pub fn is_leaf(&self, id: CategoryId) -> bool {
        self.children_of_category(id).is_empty()
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.known.contains(&id)
    }

    /// Known ids in first-seen snapshot order.
    pub fn ids(&self) -> &[CategoryId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Parent of a known category; `None` for roots and unknown ids.
    pub fn parent_of(&self, id: CategoryId) -> Option<CategoryId> {
        self.parents.get(&id).copied().flatten()
    }

    /// Level a known category is listed on.
    pub fn level_of(&self, id: CategoryId) -> Option<LevelKey> {
        self.parents.get(&id).map(|parent| LevelKey::for_parent(*parent))
    }

    /// Ancestors of `id`, nearest first.
    ///
    /// Includes a dangling parent id once, then stops. Stops before any id
    /// already visited, so a cyclic chain yields a finite path.
    pub fn ancestors(&self, id: CategoryId) -> Vec<CategoryId> {
        let mut visited = HashSet::from([id]);
        let mut path = Vec::new();
        let mut cursor = self.parent_of(id);
        while let Some(current) = cursor {
            if !visited.insert(current) {
                break;
            }
            path.push(current);
            cursor = self.parent_of(current);
        }
        path
    }
}
