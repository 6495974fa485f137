//! Catalog repository: products, categories, reviews, banners, news.

use chrono::Utc;
use lustre_core::{ProductId, ReviewId};

use crate::models::{Banner, Category, News, Product, Review};
use crate::store::{Store, StoreError};

const PRODUCTS_KEY: &str = "products";
const CATEGORIES_KEY: &str = "categories";
const BANNERS_KEY: &str = "banners";
const NEWS_KEY: &str = "news";

fn reviews_key(product_id: ProductId) -> String {
    format!("reviews:{product_id}")
}

/// Repository for everything catalog-shaped.
pub struct CatalogRepository<'a> {
    store: &'a Store,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All products, with categories embedded, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn products(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self.store.get(PRODUCTS_KEY)?.unwrap_or_default();
        let categories = self.categories()?;
        for product in &mut products {
            product.category = categories.iter().find(|c| c.id == product.category_id).cloned();
        }
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    /// One product by id, with its category embedded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.products()?.into_iter().find(|p| p.id == id))
    }

    /// The products matching the given ids, in catalog order.
    ///
    /// Unknown ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .products()?
            .into_iter()
            .filter(|p| ids.contains(&p.id))
            .collect())
    }

    /// All categories, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories: Vec<Category> = self.store.get(CATEGORIES_KEY)?.unwrap_or_default();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    /// Reviews for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn reviews(&self, product_id: ProductId) -> Result<Vec<Review>, StoreError> {
        let mut reviews: Vec<Review> = self
            .store
            .get(&reviews_key(product_id))?
            .unwrap_or_default();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    /// Append a review for a product.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be accessed.
    pub fn add_review(
        &self,
        product_id: ProductId,
        name: &str,
        text: &str,
        rating: i64,
    ) -> Result<Review, StoreError> {
        let review = Review {
            id: ReviewId::new(self.store.next_id("review")?),
            product_id,
            name: name.to_owned(),
            text: text.to_owned(),
            rating,
            created_at: Utc::now(),
        };
        let key = reviews_key(product_id);
        let mut reviews: Vec<Review> = self.store.get(&key)?.unwrap_or_default();
        reviews.push(review.clone());
        self.store.set(&key, &reviews)?;
        Ok(review)
    }

    /// All banners with their products embedded, in position order.
    ///
    /// Banners whose product has disappeared are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn banners(&self) -> Result<Vec<Banner>, StoreError> {
        let mut banners: Vec<Banner> = self.store.get(BANNERS_KEY)?.unwrap_or_default();
        let products = self.products()?;
        banners.retain_mut(|banner| {
            banner.product = products.iter().find(|p| p.id == banner.product_id).cloned();
            banner.product.is_some()
        });
        banners.sort_by_key(|b| b.position);
        Ok(banners)
    }

    /// All news items, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn news(&self) -> Result<Vec<News>, StoreError> {
        let mut news: Vec<News> = self.store.get(NEWS_KEY)?.unwrap_or_default();
        news.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(news)
    }

    /// Replace the stored product list (seeding).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be written.
    pub fn set_products(&self, products: &[Product]) -> Result<(), StoreError> {
        self.store.set(PRODUCTS_KEY, &products)
    }

    /// Replace the stored category list (seeding).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be written.
    pub fn set_categories(&self, categories: &[Category]) -> Result<(), StoreError> {
        self.store.set(CATEGORIES_KEY, &categories)
    }

    /// Replace the stored banner list (seeding).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be written.
    pub fn set_banners(&self, banners: &[Banner]) -> Result<(), StoreError> {
        self.store.set(BANNERS_KEY, &banners)
    }

    /// Replace the stored news list (seeding).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be written.
    pub fn set_news(&self, news: &[News]) -> Result<(), StoreError> {
        self.store.set(NEWS_KEY, &news)
    }
}
