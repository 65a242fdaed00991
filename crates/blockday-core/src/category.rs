//! Category colours.
//!
//! Blocks reference categories by free-form key. Keys are looked up in the
//! built-in palette first, then in the user's custom categories; unknown keys
//! get [`FALLBACK_COLOR`] instead of an error.

use crate::error::CoreError;
use crate::models::{Block, CustomCategory};

pub const FALLBACK_COLOR: &str = "#6B7280";

pub const DEFAULT_CATEGORIES: [(&str, &str); 5] = [
    ("work", "#3B82F6"),
    ("study", "#10B981"),
    ("personal", "#8B5CF6"),
    ("meeting", "#F59E0B"),
    ("break", "#6B7280"),
];

/// Resolves a category key to a display colour.
pub trait ColorResolver {
    fn color_for(&self, category: &str) -> &str;

    /// The block's explicit colour wins over its category's.
    fn block_color<'a>(&'a self, block: &'a Block) -> &'a str {
        block
            .color
            .as_deref()
            .unwrap_or_else(|| self.color_for(&block.category))
    }
}

/// One row of the category list shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub name: String,
    pub color: String,
    pub is_default: bool,
}

/// Built-in categories plus the user's custom ones.
#[derive(Debug, Clone, Default)]
pub struct CategoryPalette {
    custom: Vec<CustomCategory>,
}

impl CategoryPalette {
    pub fn new(custom: Vec<CustomCategory>) -> Self {
        Self { custom }
    }

    pub fn is_default(name: &str) -> bool {
        DEFAULT_CATEGORIES.iter().any(|(default, _)| *default == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        Self::is_default(name) || self.custom.iter().any(|c| c.name == name)
    }

    /// Defaults first, then custom categories in creation order.
    pub fn all(&self) -> Vec<CategoryEntry> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(name, color)| CategoryEntry {
                name: name.to_string(),
                color: color.to_string(),
                is_default: true,
            })
            .chain(self.custom.iter().map(|c| CategoryEntry {
                name: c.name.clone(),
                color: c.color.clone(),
                is_default: false,
            }))
            .collect()
    }
}

impl ColorResolver for CategoryPalette {
    fn color_for(&self, category: &str) -> &str {
        DEFAULT_CATEGORIES
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, color)| *color)
            .or_else(|| {
                self.custom
                    .iter()
                    .find(|c| c.name == category)
                    .map(|c| c.color.as_str())
            })
            .unwrap_or(FALLBACK_COLOR)
    }
}

/// Category names are stored lower-cased and trimmed.
pub fn normalize_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Err(CoreError::InvalidInput("Category name cannot be empty".to_string()));
    }
    Ok(name)
}

/// Accepts `#RRGGBB` (case-insensitive) and returns it upper-cased.
pub fn normalize_color(color: &str) -> Result<String, CoreError> {
    let color = color.trim();
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].bytes().all(|b| b.is_ascii_hexdigit());
    if !valid {
        return Err(CoreError::InvalidInput(format!(
            "Invalid colour '{}', expected #RRGGBB",
            color
        )));
    }
    Ok(color.to_uppercase())
}

/// Splits a `#RRGGBB` colour into its components.
pub fn hex_to_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn palette() -> CategoryPalette {
        CategoryPalette::new(vec![CustomCategory {
            id: "c1".to_string(),
            name: "startup".to_string(),
            color: "#FACC15".to_string(),
            created_at: Utc::now(),
        }])
    }

    #[rstest]
    #[case("work", "#3B82F6")]
    #[case("break", "#6B7280")]
    #[case("startup", "#FACC15")]
    #[case("gardening", FALLBACK_COLOR)]
    #[case("Work", FALLBACK_COLOR)]
    fn test_color_for(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(palette().color_for(key), expected);
    }

    #[test]
    fn test_block_color_prefers_explicit() {
        let mut block: Block = serde_json::from_str(
            r##"{"id":"b","title":"t","date":"2024-06-03","startTime":"09:00",
                "endTime":"10:00","category":"work","color":"#000000"}"##,
        )
        .unwrap();
        let palette = palette();
        assert_eq!(palette.block_color(&block), "#000000");
        block.color = None;
        assert_eq!(palette.block_color(&block), "#3B82F6");
    }

    #[test]
    fn test_all_lists_defaults_then_custom() {
        let all = palette().all();
        assert_eq!(all.len(), 6);
        assert!(all[..5].iter().all(|c| c.is_default));
        assert_eq!(all[5].name, "startup");
        assert!(!all[5].is_default);
        assert!(palette().contains("startup"));
        assert!(!palette().contains("gym"));
    }

    #[rstest]
    #[case("#ff00aa", Some("#FF00AA"))]
    #[case(" #123456 ", Some("#123456"))]
    #[case("123456", None)]
    #[case("#12345", None)]
    #[case("#GGGGGG", None)]
    fn test_normalize_color(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_color(input).ok().as_deref(), expected);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Gym ").unwrap(), "gym");
        assert!(normalize_name("   ").is_err());
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#3B82F6"), Some((0x3B, 0x82, 0xF6)));
        assert_eq!(hex_to_rgb("3B82F6"), None);
        assert_eq!(hex_to_rgb("#3B82"), None);
    }
}
