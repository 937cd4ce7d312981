//! Category types for product organization.

use serde::{Deserialize, Serialize};

/// A product category.
///
/// Categories are flat; products refer to them by display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Category {
    /// Category name.
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
}

impl Category {
    /// Create a category, deriving the slug from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self { name, slug }
    }

    /// Check whether a name or slug refers to this category.
    pub fn matches(&self, name_or_slug: &str) -> bool {
        self.name.eq_ignore_ascii_case(name_or_slug) || self.slug == slugify(name_or_slug)
    }
}

/// Lowercase, ASCII-fold common Portuguese accents, and join words with `-`.
fn slugify(name: &str) -> String {
    let folded: String = name
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' | 'Ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect();

    folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
