//! Product catalog methods.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use sadok_core::ProductId;

use super::cache::CacheValue;
use super::types::Product;
use super::{ApiError, BackendClient};

/// Sort orders accepted by the product listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Alphabetical by name.
    #[default]
    Name,
    /// Cheapest first.
    PriceAscending,
    /// Most expensive first.
    PriceDescending,
}

impl ProductSort {
    const fn as_query_value(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceAscending => "price",
            Self::PriceDescending => "-price",
        }
    }
}

/// Filters for the product listing endpoint.
///
/// An all-default query returns the first page of the whole catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    /// Free-text search over name, description, and article.
    pub search: Option<String>,
    /// Filter by category name.
    pub category: Option<String>,
    /// Filter by badge ("hit", "sale", "new").
    pub badge: Option<String>,
    /// Minimum price.
    pub min_price: Option<Decimal>,
    /// Maximum price.
    pub max_price: Option<Decimal>,
    /// Sort order.
    pub sort_by: ProductSort,
    /// Page size.
    pub limit: Option<u32>,
    /// Pagination offset.
    pub skip: Option<u32>,
}

impl ProductQuery {
    /// Query that searches the catalog by free text.
    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    /// Query filtered to one category.
    #[must_use]
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            category: Some(name.into()),
            ..Self::default()
        }
    }

    /// True when no filter is set, i.e. the result is cacheable.
    fn is_unfiltered(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.badge.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(badge) = &self.badge {
            pairs.push(("badge", badge.clone()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("minPrice", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("maxPrice", max_price.to_string()));
        }
        pairs.push(("sortBy", self.sort_by.as_query_value().to_string()));
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        pairs
    }
}

impl BackendClient {
    /// Get products matching `query`.
    ///
    /// Unfiltered listings are cached; searches and filtered listings always
    /// hit the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let cache_key = format!(
            "products:{}:{}:{}",
            query.sort_by.as_query_value(),
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(0),
        );

        if query.is_unfiltered()
            && let Some(CacheValue::Products(products)) = self.cache().get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Vec<Product> = self
            .get_json("/api/products", &query.to_query_pairs())
            .await?;

        if query.is_unfiltered() {
            self.cache()
                .insert(cache_key, CacheValue::Products(products.clone()))
                .await;
        }

        Ok(products)
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.cache().get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get_json(&format!("/api/products/{id}"), &[]).await?;

        self.cache()
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_query_is_cacheable() {
        assert!(ProductQuery::default().is_unfiltered());
        assert!(!ProductQuery::search("туя").is_unfiltered());
        assert!(!ProductQuery::category("Хвойні").is_unfiltered());
    }

    #[test]
    fn test_query_pairs() {
        let query = ProductQuery {
            search: Some("туя".to_owned()),
            min_price: Some(Decimal::from(100)),
            sort_by: ProductSort::PriceDescending,
            limit: Some(20),
            ..ProductQuery::default()
        };

        let pairs = query.to_query_pairs();
        assert!(pairs.contains(&("search", "туя".to_string())));
        assert!(pairs.contains(&("minPrice", "100".to_string())));
        assert!(pairs.contains(&("sortBy", "-price".to_string())));
        assert!(pairs.contains(&("limit", "20".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "skip"));
    }
}
