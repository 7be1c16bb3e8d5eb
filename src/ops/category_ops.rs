use crate::model::category::{Category, CategoryChanges, NewCategory};
use crate::model::palette::{PaletteColor, default_color, find_color};
use crate::ops::priority::{self, PriorityError};

/// Error type for category operations. On any error the collection is unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error("category not found: {0}")]
    NotFound(String),
    #[error("category name cannot be empty")]
    EmptyName,
    #[error("unknown color: {0}")]
    UnknownColor(String),
    #[error("duplicate category id: {0}")]
    DuplicateId(String),
    #[error(transparent)]
    Priority(#[from] PriorityError),
}

// ---------------------------------------------------------------------------
// Create / edit / delete
// ---------------------------------------------------------------------------

/// Append a new category with `priority = count + 1`. Returns the new id.
pub fn add_category(categories: &mut Vec<Category>, new: NewCategory) -> Result<String, CategoryError> {
    let name = validated_name(&new.name)?;
    let color = resolve_color(new.color.as_deref())?;
    let id = new.id.unwrap_or_else(super::new_id);
    if categories.iter().any(|c| c.id == id) {
        return Err(CategoryError::DuplicateId(id));
    }

    let mut category = Category::new(id.clone(), name);
    category.set_color(color);
    category.priority = Some(categories.len() as u32 + 1);
    categories.push(category);
    Ok(id)
}

/// Rename and/or recolor a category.
pub fn update_category(
    categories: &mut [Category],
    category_id: &str,
    changes: CategoryChanges,
) -> Result<(), CategoryError> {
    let name = changes.name.as_deref().map(validated_name).transpose()?;
    let color = match changes.color.as_deref() {
        Some(c) => Some(resolve_color(Some(c))?),
        None => None,
    };
    let category = find_category_mut(categories, category_id)?;
    if let Some(name) = name {
        category.name = name;
    }
    if let Some(color) = color {
        category.set_color(color);
    }
    Ok(())
}

/// Delete a category, then renumber the remaining ones.
pub fn remove_category(categories: &mut Vec<Category>, category_id: &str) -> Result<Category, CategoryError> {
    let idx = position(categories, category_id)?;
    let removed = categories.remove(idx);
    priority::renumber(categories);
    Ok(removed)
}

// ---------------------------------------------------------------------------
// State and ordering
// ---------------------------------------------------------------------------

pub fn set_category_done(
    categories: &mut [Category],
    category_id: &str,
    done: bool,
) -> Result<(), CategoryError> {
    find_category_mut(categories, category_id)?.is_marked_done = done;
    Ok(())
}

/// Move a category to `new_priority` (clamped to `1..=count`) and renumber the
/// whole list. Moving to its current priority changes nothing.
pub fn set_category_priority(
    categories: &mut Vec<Category>,
    category_id: &str,
    new_priority: u32,
) -> Result<(), CategoryError> {
    let idx = position(categories, category_id)?;
    priority::move_to_priority(categories, idx, new_priority)?;
    Ok(())
}

/// Drag-and-drop reorder by list index.
pub fn reorder_categories(categories: &mut Vec<Category>, from: usize, to: usize) -> Result<(), CategoryError> {
    priority::move_index(categories, from, to)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn find_category<'a>(categories: &'a [Category], category_id: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.id == category_id)
}

pub(crate) fn find_category_mut<'a>(
    categories: &'a mut [Category],
    category_id: &str,
) -> Result<&'a mut Category, CategoryError> {
    categories
        .iter_mut()
        .find(|c| c.id == category_id)
        .ok_or_else(|| CategoryError::NotFound(category_id.to_string()))
}

fn position(categories: &[Category], category_id: &str) -> Result<usize, CategoryError> {
    categories
        .iter()
        .position(|c| c.id == category_id)
        .ok_or_else(|| CategoryError::NotFound(category_id.to_string()))
}

fn validated_name(name: &str) -> Result<String, CategoryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CategoryError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn resolve_color(name: Option<&str>) -> Result<&'static PaletteColor, CategoryError> {
    match name {
        None => Ok(default_color()),
        Some(n) => find_color(n).ok_or_else(|| CategoryError::UnknownColor(n.to_string())),
    }
}
