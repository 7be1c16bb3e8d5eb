use crate::model::category::Category;
use crate::model::task::{NewTask, Task, TaskChanges};
use crate::ops::priority::{self, PriorityError};

/// Error type for task operations. On any error the collection is unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("category not found: {0}")]
    CategoryNotFound(String),
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("task name cannot be empty")]
    EmptyName,
    #[error("duplicate task id: {0}")]
    DuplicateId(String),
    #[error(transparent)]
    Priority(#[from] PriorityError),
}

impl TaskError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::CategoryNotFound(_) | TaskError::NotFound(_))
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Set a task's done flag. Only that task changes.
pub fn set_task_done(
    categories: &mut [Category],
    category_id: &str,
    task_id: &str,
    done: bool,
) -> Result<(), TaskError> {
    find_task_mut(categories, category_id, task_id)?.done = done;
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Append a task to a category with `priority = count + 1`. Returns the new id.
pub fn insert_task(
    categories: &mut [Category],
    category_id: &str,
    new: NewTask,
) -> Result<String, TaskError> {
    let name = validated_name(&new.name)?;
    let category = find_category_mut(categories, category_id)?;
    let id = new.id.unwrap_or_else(super::new_id);
    if category.task(&id).is_some() {
        return Err(TaskError::DuplicateId(id));
    }

    let mut task = Task::new(id.clone(), name);
    task.notes = clean_notes(new.notes);
    task.done = new.done.unwrap_or(false);
    task.can_be_repeated = new.can_be_repeated;
    task.when = new.when;
    task.priority = Some(category.tasks.len() as u32 + 1);
    category.tasks.push(task);
    Ok(id)
}

/// Apply a partial edit to a task.
pub fn update_task(
    categories: &mut [Category],
    category_id: &str,
    task_id: &str,
    changes: TaskChanges,
) -> Result<(), TaskError> {
    let name = changes.name.as_deref().map(validated_name).transpose()?;
    let task = find_task_mut(categories, category_id, task_id)?;
    if let Some(name) = name {
        task.name = name;
    }
    if let Some(notes) = changes.notes {
        task.notes = clean_notes(notes);
    }
    if let Some(repeat) = changes.can_be_repeated {
        task.can_be_repeated = repeat;
    }
    if let Some(when) = changes.when {
        task.when = when.filter(|w| !w.trim().is_empty());
    }
    Ok(())
}

/// Delete a task, then renumber its siblings.
pub fn remove_task(categories: &mut [Category], category_id: &str, task_id: &str) -> Result<Task, TaskError> {
    let category = find_category_mut(categories, category_id)?;
    let idx = task_position(category, task_id)?;
    let removed = category.tasks.remove(idx);
    priority::renumber(&mut category.tasks);
    Ok(removed)
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Move a task to `new_priority` (clamped to `1..=count`) within its
/// category and renumber that category's tasks. Other categories are not
/// touched. Moving to its current priority changes nothing.
pub fn set_task_priority(
    categories: &mut [Category],
    category_id: &str,
    task_id: &str,
    new_priority: u32,
) -> Result<(), TaskError> {
    let category = find_category_mut(categories, category_id)?;
    let idx = task_position(category, task_id)?;
    priority::move_to_priority(&mut category.tasks, idx, new_priority)?;
    Ok(())
}

/// Drag-and-drop reorder by index within one category.
pub fn reorder_tasks(
    categories: &mut [Category],
    category_id: &str,
    from: usize,
    to: usize,
) -> Result<(), TaskError> {
    let category = find_category_mut(categories, category_id)?;
    priority::move_index(&mut category.tasks, from, to)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn find_task<'a>(categories: &'a [Category], category_id: &str, task_id: &str) -> Option<&'a Task> {
    categories
        .iter()
        .find(|c| c.id == category_id)
        .and_then(|c| c.task(task_id))
}

fn find_category_mut<'a>(categories: &'a mut [Category], category_id: &str) -> Result<&'a mut Category, TaskError> {
    categories
        .iter_mut()
        .find(|c| c.id == category_id)
        .ok_or_else(|| TaskError::CategoryNotFound(category_id.to_string()))
}

fn find_task_mut<'a>(
    categories: &'a mut [Category],
    category_id: &str,
    task_id: &str,
) -> Result<&'a mut Task, TaskError> {
    find_category_mut(categories, category_id)?
        .task_mut(task_id)
        .ok_or_else(|| TaskError::NotFound(task_id.to_string()))
}

fn task_position(category: &Category, task_id: &str) -> Result<usize, TaskError> {
    category
        .tasks
        .iter()
        .position(|t| t.id == task_id)
        .ok_or_else(|| TaskError::NotFound(task_id.to_string()))
}

fn validated_name(name: &str) -> Result<String, TaskError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn clean_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
