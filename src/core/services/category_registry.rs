//! The single registry merging built-in and user-defined categories.

use tracing::debug;

use crate::domain::book::ExpenseBook;
use crate::domain::category::{builtin, CategoryEntry, CategoryId, CategoryMeta, BUILTIN_CATEGORIES};
use crate::errors::{MoniError, Result};

/// Validated operations over the category sets. Built-ins win every lookup
/// and can never be edited or deleted.
pub struct CategoryRegistry;

impl CategoryRegistry {
    /// Resolves display metadata for an id: built-in first, then custom,
    /// else a synthesized fallback. Never fails, so dangling references in
    /// old records always render.
    pub fn resolve(book: &ExpenseBook, id: &CategoryId) -> CategoryMeta {
        if let Some(entry) = builtin(id) {
            return entry.meta.clone();
        }
        book.custom_categories
            .get(id)
            .cloned()
            .unwrap_or_else(|| CategoryMeta::fallback(id))
    }

    pub fn exists(book: &ExpenseBook, id: &CategoryId) -> bool {
        builtin(id).is_some() || book.custom_categories.contains_key(id)
    }

    /// Creates a custom category, deriving its id from the name. Rejects id
    /// collisions against either set rather than overwriting.
    pub fn create(
        book: &mut ExpenseBook,
        name: &str,
        icon: &str,
        color: &str,
    ) -> Result<CategoryId> {
        let name = name.trim();
        if name.is_empty() || icon.trim().is_empty() || color.trim().is_empty() {
            return Err(MoniError::InvalidInput(
                "category name, icon and color are required".into(),
            ));
        }
        let id = CategoryId::from_name(name);
        if id.is_empty() {
            return Err(MoniError::InvalidInput(format!(
                "name `{name}` produces an empty id"
            )));
        }
        if Self::exists(book, &id) {
            return Err(MoniError::DuplicateCategory(id.to_string()));
        }
        book.custom_categories
            .insert(id.clone(), CategoryMeta::custom(name, icon.trim(), color.trim()));
        debug!(category = %id, "custom category created");
        Ok(id)
    }

    /// Updates a custom category's display metadata in place.
    pub fn update(
        book: &mut ExpenseBook,
        id: &CategoryId,
        name: &str,
        icon: &str,
        color: &str,
    ) -> Result<()> {
        if builtin(id).is_some() {
            return Err(MoniError::BuiltinCategory(id.to_string()));
        }
        if name.trim().is_empty() || icon.trim().is_empty() || color.trim().is_empty() {
            return Err(MoniError::InvalidInput(
                "category name, icon and color are required".into(),
            ));
        }
        let meta = book
            .custom_categories
            .get_mut(id)
            .ok_or_else(|| MoniError::CategoryNotFound(id.to_string()))?;
        meta.name = name.trim().to_string();
        meta.icon = icon.trim().to_string();
        meta.color = color.trim().to_string();
        Ok(())
    }

    /// Deletes a custom category. Records referencing it are left untouched
    /// (soft orphaning): their id simply resolves to the fallback afterwards.
    /// Callers use [`Self::references`] to warn before confirming.
    pub fn delete(book: &mut ExpenseBook, id: &CategoryId) -> Result<CategoryMeta> {
        if builtin(id).is_some() {
            return Err(MoniError::BuiltinCategory(id.to_string()));
        }
        let removed = book
            .custom_categories
            .remove(id)
            .ok_or_else(|| MoniError::CategoryNotFound(id.to_string()))?;
        debug!(category = %id, "custom category deleted");
        Ok(removed)
    }

    /// Number of expense records currently referencing the id.
    pub fn references(book: &ExpenseBook, id: &CategoryId) -> usize {
        book.expenses
            .iter()
            .filter(|expense| &expense.category == id)
            .count()
    }

    /// Every category: built-ins in seed order, then customs by id.
    pub fn all(book: &ExpenseBook) -> Vec<CategoryEntry> {
        BUILTIN_CATEGORIES
            .iter()
            .cloned()
            .chain(book.custom_categories.iter().map(|(id, meta)| CategoryEntry {
                id: id.clone(),
                meta: meta.clone(),
            }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_duplicate_ids() {
        let mut book = ExpenseBook::new();
        let id = CategoryRegistry::create(&mut book, "Mascotas", "🐕", "#8b5cf6").unwrap();
        assert_eq!(id.as_str(), "mascotas");

        let err = CategoryRegistry::create(&mut book, "Mascotas", "🐈", "#111111").unwrap_err();
        assert!(matches!(err, MoniError::DuplicateCategory(ref dup) if dup == "mascotas"));
    }

    #[test]
    fn create_rejects_builtin_collisions() {
        let mut book = ExpenseBook::new();
        let err = CategoryRegistry::create(&mut book, "Comida", "🍕", "#ffffff").unwrap_err();
        assert!(matches!(err, MoniError::DuplicateCategory(_)));
    }

    #[test]
    fn builtins_are_immutable() {
        let mut book = ExpenseBook::new();
        let id = CategoryId::new("comida");
        assert!(matches!(
            CategoryRegistry::update(&mut book, &id, "Food", "🍔", "#000"),
            Err(MoniError::BuiltinCategory(_))
        ));
        assert!(matches!(
            CategoryRegistry::delete(&mut book, &id),
            Err(MoniError::BuiltinCategory(_))
        ));
    }

    #[test]
    fn resolve_never_fails() {
        let book = ExpenseBook::new();
        let meta = CategoryRegistry::resolve(&book, &CategoryId::new("desconocida"));
        assert_eq!(meta.name, "desconocida");
        assert!(!meta.icon.is_empty());
        assert!(!meta.color.is_empty());
    }

    #[test]
    fn listing_puts_builtins_first() {
        let mut book = ExpenseBook::new();
        CategoryRegistry::create(&mut book, "Viajes", "✈️", "#0ea5e9").unwrap();
        let all = CategoryRegistry::all(&book);
        assert_eq!(all.len(), 7);
        assert_eq!(all[0].id.as_str(), "comida");
        assert_eq!(all.last().unwrap().id.as_str(), "viajes");
    }
}
