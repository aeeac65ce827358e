//! The static product catalog.

use crate::catalog::{CategoryFilter, Product, ALL_CATEGORIES};
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// An ordered, immutable list of products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from products in display order.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by ID.
    pub fn get(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Tab labels: "All" followed by each distinct category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut labels = vec![ALL_CATEGORIES.to_string()];
        for product in &self.products {
            if !labels.contains(&product.category) {
                labels.push(product.category.clone());
            }
        }
        labels
    }

    /// Products visible under a category filter, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| filter.matches(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    #[test]
    fn test_categories_in_first_seen_order() {
        let catalog = sample::catalog();
        assert_eq!(catalog.categories(), vec!["All", "Nature", "Cities", "Abstract"]);
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let catalog = sample::catalog();
        let all: Vec<_> = catalog.filter(&CategoryFilter::All).collect();
        assert_eq!(all.len(), catalog.len());
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = sample::catalog();
        let filter = CategoryFilter::Named("Nature".to_string());
        let ids: Vec<_> = catalog.filter(&filter).map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "5"]);

        let none = CategoryFilter::Named("Space".to_string());
        assert_eq!(catalog.filter(&none).count(), 0);
    }

    #[test]
    fn test_get_missing_product() {
        let catalog = sample::catalog();
        assert!(catalog.get(&ProductId::new("3")).is_ok());
        assert_eq!(
            catalog.get(&ProductId::new("99")),
            Err(CommerceError::ProductNotFound("99".to_string()))
        );
    }
}
