//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// URL-safe identifier, unique
    pub slug: String,
    pub icon: Option<String>,
    pub display_order: i32,
    pub created_at: i64,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: String,
    /// Derived from `name` when blank
    pub slug: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
}

/// Derive a URL slug from a display name.
///
/// Lowercases, folds Portuguese accents, turns whitespace runs into `-` and
/// drops anything outside `[a-z0-9-]`. Repeated and edge dashes are collapsed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        let ch = fold_accent(ch);
        if ch.is_whitespace() || ch == '-' {
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Eletrônicos"), "eletronicos");
        assert_eq!(slugify("Casa e Decoração"), "casa-e-decoracao");
        assert_eq!(slugify("  Moda   Praia "), "moda-praia");
    }

    #[test]
    fn test_slugify_drops_symbols() {
        assert_eq!(slugify("Bebidas & Sucos"), "bebidas-sucos");
        assert_eq!(slugify("Top-10 Ofertas!"), "top-10-ofertas");
        assert_eq!(slugify("!!!"), "");
    }
}
