//! Value-semantic edits over a category collection.
//!
//! [`apply`] borrows the current state, works on its own copy, and hands back
//! the new state together with what a remote store needs to hear about it:
//! the changed categories (the `PATCH` body) and removed ids (the `DELETE`
//! body). A missing category or task is not an error here; it comes back as
//! `found: false` with the input unchanged.

use serde::Serialize;

use crate::model::category::{Category, CategoryChanges, NewCategory};
use crate::model::task::{NewTask, TaskChanges};
use crate::ops::category_ops::{self, CategoryError};
use crate::ops::priority;
use crate::ops::task_ops::{self, TaskError};

/// One user action against the collection.
#[derive(Debug, Clone)]
pub enum Edit {
    AddCategory(NewCategory),
    UpdateCategory {
        category_id: String,
        changes: CategoryChanges,
    },
    SetCategoryDone {
        category_id: String,
        done: bool,
    },
    SetCategoryPriority {
        category_id: String,
        priority: u32,
    },
    ReorderCategories {
        from: usize,
        to: usize,
    },
    RemoveCategory {
        category_id: String,
    },
    AddTask {
        category_id: String,
        task: NewTask,
    },
    UpdateTask {
        category_id: String,
        task_id: String,
        changes: TaskChanges,
    },
    SetTaskDone {
        category_id: String,
        task_id: String,
        done: bool,
    },
    SetTaskPriority {
        category_id: String,
        task_id: String,
        priority: u32,
    },
    ReorderTasks {
        category_id: String,
        from: usize,
        to: usize,
    },
    RemoveTask {
        category_id: String,
        task_id: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Task(#[from] TaskError),
}

/// Result of [`apply`].
#[derive(Debug, Clone)]
pub struct Applied {
    /// Full collection after the edit
    pub categories: Vec<Category>,
    /// Categories that are new or differ from the input
    pub patch: Vec<Category>,
    /// Ids of categories that no longer exist
    pub deleted: Vec<String>,
    /// Id of a category or task created by the edit
    pub created: Option<String>,
    /// False when the target category or task did not resolve
    pub found: bool,
}

impl Applied {
    pub fn is_noop(&self) -> bool {
        self.patch.is_empty() && self.deleted.is_empty()
    }

    pub fn payload(&self) -> Payload<'_> {
        Payload {
            patch: &self.patch,
            deleted: &self.deleted,
        }
    }
}

/// The bodies a caller sends to the remote store.
#[derive(Debug, Serialize)]
pub struct Payload<'a> {
    pub patch: &'a [Category],
    pub deleted: &'a [String],
}

/// Apply `edit` to a copy of `categories`.
///
/// Validation failures (empty names, unknown colors, bad indexes) are errors.
/// Unresolved ids are not: the input comes back unchanged with `found: false`.
pub fn apply(categories: &[Category], edit: Edit) -> Result<Applied, EditError> {
    let mut next = categories.to_vec();
    tracing::debug!(?edit, "applying edit");

    let outcome = run(&mut next, edit);
    let created = match outcome {
        Ok(created) => created,
        Err(e) if is_not_found(&e) => {
            tracing::debug!(error = %e, "edit target not found");
            return Ok(Applied {
                categories: categories.to_vec(),
                patch: Vec::new(),
                deleted: Vec::new(),
                created: None,
                found: false,
            });
        }
        Err(e) => return Err(e),
    };

    let patch = priority::diff(categories, &next);
    let deleted = priority::removed_keys(categories, &next);
    tracing::debug!(changed = patch.len(), deleted = deleted.len(), "edit applied");
    Ok(Applied {
        categories: next,
        patch,
        deleted,
        created,
        found: true,
    })
}

fn run(categories: &mut Vec<Category>, edit: Edit) -> Result<Option<String>, EditError> {
    match edit {
        Edit::AddCategory(new) => Ok(Some(category_ops::add_category(categories, new)?)),
        Edit::UpdateCategory {
            category_id,
            changes,
        } => {
            category_ops::update_category(categories, &category_id, changes)?;
            Ok(None)
        }
        Edit::SetCategoryDone { category_id, done } => {
            category_ops::set_category_done(categories, &category_id, done)?;
            Ok(None)
        }
        Edit::SetCategoryPriority {
            category_id,
            priority,
        } => {
            category_ops::set_category_priority(categories, &category_id, priority)?;
            Ok(None)
        }
        Edit::ReorderCategories { from, to } => {
            category_ops::reorder_categories(categories, from, to)?;
            Ok(None)
        }
        Edit::RemoveCategory { category_id } => {
            category_ops::remove_category(categories, &category_id)?;
            Ok(None)
        }
        Edit::AddTask { category_id, task } => {
            Ok(Some(task_ops::insert_task(categories, &category_id, task)?))
        }
        Edit::UpdateTask {
            category_id,
            task_id,
            changes,
        } => {
            task_ops::update_task(categories, &category_id, &task_id, changes)?;
            Ok(None)
        }
        Edit::SetTaskDone {
            category_id,
            task_id,
            done,
        } => {
            task_ops::set_task_done(categories, &category_id, &task_id, done)?;
            Ok(None)
        }
        Edit::SetTaskPriority {
            category_id,
            task_id,
            priority,
        } => {
            task_ops::set_task_priority(categories, &category_id, &task_id, priority)?;
            Ok(None)
        }
        Edit::ReorderTasks {
            category_id,
            from,
            to,
        } => {
            task_ops::reorder_tasks(categories, &category_id, from, to)?;
            Ok(None)
        }
        Edit::RemoveTask {
            category_id,
            task_id,
        } => {
            task_ops::remove_task(categories, &category_id, &task_id)?;
            Ok(None)
        }
    }
}

fn is_not_found(e: &EditError) -> bool {
    match e {
        EditError::Category(CategoryError::NotFound(_)) => true,
        EditError::Task(t) => t.is_not_found(),
        _ => false,
    }
}
