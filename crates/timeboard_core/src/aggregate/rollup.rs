//! Rollup of descendant time into ancestors.
//!
//! # Invariants
//! - `rolled(id) = direct(id) + sum(rolled(child))` for every known id.
//! - Each id is folded exactly once per call; the memo lives only for the
//!   duration of that call.
//! - A cyclic parent chain fails with `EngineError::CycleDetected` instead
//!   of looping.
//! - Direct seconds keyed by unknown ids never reach any rolled total.

use crate::aggregate::{seconds_for, CategorySeconds};
use crate::error::{EngineError, EngineResult};
use crate::hierarchy::HierarchyIndex;
use crate::model::category::{Category, CategoryId};
use log::{debug, warn};
use std::collections::HashSet;

/// Rolled seconds for every category in `categories`.
///
/// # Errors
/// - `EngineError::CycleDetected` when parent links form a cycle.
pub fn rollup_seconds(
    categories: &[Category],
    direct: &CategorySeconds,
) -> EngineResult<CategorySeconds> {
    rollup_with_index(&HierarchyIndex::build(categories), direct)
}

/// Same as [`rollup_seconds`] over an index the caller already built.
pub fn rollup_with_index(
    index: &HierarchyIndex,
    direct: &CategorySeconds,
) -> EngineResult<CategorySeconds> {
    let orphaned = direct.keys().filter(|id| !index.contains(**id)).count();
    if orphaned > 0 {
        debug!(
            "event=rollup_orphans module=aggregate status=ok orphaned_categories={orphaned}"
        );
    }

    let mut rolled = CategorySeconds::with_capacity(index.len());
    // Ids whose children are being folded: exactly the current DFS path.
    let mut on_path = HashSet::new();

    for &start in index.ids() {
        if rolled.contains_key(&start) {
            continue;
        }

        let mut stack = vec![Visit::Enter(start)];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    if rolled.contains_key(&id) {
                        continue;
                    }
                    if !on_path.insert(id) {
                        return Err(cycle_at(id));
                    }
                    stack.push(Visit::Exit(id));
                    for &child in index.children_of_category(id).iter().rev() {
                        if on_path.contains(&child) {
                            return Err(cycle_at(child));
                        }
                        if !rolled.contains_key(&child) {
                            stack.push(Visit::Enter(child));
                        }
                    }
                }
                Visit::Exit(id) => {
                    let total = index
                        .children_of_category(id)
                        .iter()
                        .fold(seconds_for(direct, id), |acc, child| {
                            acc + seconds_for(&rolled, *child)
                        });
                    on_path.remove(&id);
                    rolled.insert(id, total);
                }
            }
        }
    }

    Ok(rolled)
}

enum Visit {
    Enter(CategoryId),
    Exit(CategoryId),
}

fn cycle_at(category_id: CategoryId) -> EngineError {
    warn!("event=rollup_cycle module=aggregate status=error category_id={category_id}");
    EngineError::CycleDetected { category_id }
}
