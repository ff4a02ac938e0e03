//! Category identifiers and display metadata.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Stable slug identifying a category across the built-in and custom sets.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Derives a slug from a display name: lowercased, diacritics folded,
    /// whitespace collapsed to hyphens. Collisions are possible and must be
    /// rejected by the registry, never silently overwritten.
    pub fn from_name(name: &str) -> Self {
        let mut slug = String::new();
        let mut pending_hyphen = false;
        for ch in name.trim().to_lowercase().chars() {
            if ch.is_whitespace() {
                pending_hyphen = !slug.is_empty();
            } else {
                if pending_hyphen {
                    slug.push('-');
                    pending_hyphen = false;
                }
                slug.push(fold_diacritic(ch));
            }
        }
        Self(slug)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

fn fold_diacritic(ch: char) -> char {
    match ch {
        'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Display metadata attached to a category id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryMeta {
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default, rename = "isDefault")]
    pub is_default: bool,
}

impl CategoryMeta {
    pub fn custom(name: impl Into<String>, icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            is_default: false,
        }
    }

    /// Synthesized metadata for ids that resolve to neither set.
    pub fn fallback(id: &CategoryId) -> Self {
        Self {
            name: id.as_str().to_string(),
            icon: FALLBACK_ICON.into(),
            color: FALLBACK_COLOR.into(),
            is_default: false,
        }
    }

    /// Label combining icon and name, as shown in legends and tables.
    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

/// A category id together with its metadata, as returned by listings.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEntry {
    pub id: CategoryId,
    pub meta: CategoryMeta,
}

pub const FALLBACK_ICON: &str = "🏷️";
pub const FALLBACK_COLOR: &str = "#64748b";

/// Built-in categories, seeded at first use. Immutable and non-deletable.
pub static BUILTIN_CATEGORIES: Lazy<Vec<CategoryEntry>> = Lazy::new(|| {
    [
        ("comida", "Comida", "🍔", "#f59e0b"),
        ("transporte", "Transporte", "🚗", "#3b82f6"),
        ("entretenimiento", "Entretenimiento", "🎮", "#ec4899"),
        ("educación", "Educación", "📚", "#6366f1"),
        ("salud", "Salud", "⚕️", "#10b981"),
        ("hogar", "Hogar", "🏠", "#f97316"),
    ]
    .into_iter()
    .map(|(id, name, icon, color)| CategoryEntry {
        id: CategoryId::new(id),
        meta: CategoryMeta {
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            is_default: true,
        },
    })
    .collect()
});

/// Looks up a built-in category by id.
pub fn builtin(id: &CategoryId) -> Option<&'static CategoryEntry> {
    BUILTIN_CATEGORIES.iter().find(|entry| &entry.id == id)
}
