//! Category filter for the catalog tabs.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Label of the catch-all tab.
pub const ALL_CATEGORIES: &str = "All";

/// Which catalog tab is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Show every product.
    #[default]
    All,
    /// Show products whose category matches exactly.
    Named(String),
}

impl CategoryFilter {
    /// Build a filter from a tab label; "All" maps to [`CategoryFilter::All`].
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(label.to_string())
        }
    }

    /// Tab label for this filter.
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Named(name) => name,
        }
    }

    /// Check if a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => &product.category == name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(CategoryFilter::from_label("All"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_label("Cities"),
            CategoryFilter::Named("Cities".to_string())
        );
        assert_eq!(CategoryFilter::from_label("Cities").label(), "Cities");
        assert_eq!(CategoryFilter::All.label(), ALL_CATEGORIES);
    }
}
