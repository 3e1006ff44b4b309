//! # Domain Types
//!
//! Core domain types for the Tienda catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductImage   │   │  ProductPlain   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  id (row id)    │   │  Product with   │       │
//! │  │  title / slug   │   │  url            │   │  images as bare │       │
//! │  │  price, stock   │   │                 │   │  URL strings    │       │
//! │  │  images (owned) │   │                 │   │  (API shape)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   NewProduct    │   │  ProductPatch   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  create payload │   │  every field is │                             │
//! │  │  images default │   │  Option<_> so   │                             │
//! │  │  to empty       │   │  absent ≠ unset │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Invariant
//! A product's images are exclusively owned by that product: deleting the
//! product, or replacing its image set on update, deletes the prior rows.
//! `ProductImage` carries only a foreign key back to its owner, never the
//! other way around.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug::slugify;

// =============================================================================
// Product Image
// =============================================================================

/// An image row owned by a product.
///
/// The owning `product_id` is implicit: images are only ever reached through
/// their product, and deletion cascades from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Row identifier (BIGSERIAL).
    pub id: i64,

    /// Image URL or stored file name.
    pub url: String,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product with its owned image rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// Display title. Unique together with the slug.
    pub title: String,

    /// Sale price.
    pub price: f64,

    /// Optional long-form description.
    pub description: Option<String>,

    /// URL-safe identifier derived from the title when not supplied. Unique.
    pub slug: String,

    /// Units in stock.
    pub stock: i32,

    /// Available sizes (free-form labels such as "XS", "M").
    pub sizes: Vec<String>,

    /// Target audience. One of [`crate::VALID_GENDERS`].
    pub gender: String,

    /// Free-form tags for filtering.
    pub tags: Vec<String>,

    /// Owned image rows, in row order.
    pub images: Vec<ProductImage>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Plain Representation
// =============================================================================

/// The "plain" product view: image rows flattened to bare URL strings.
///
/// This is the response shape of every endpoint; the row-object form of
/// [`Product`] never leaves the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPlain {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub slug: String,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: String,
    pub tags: Vec<String>,
    /// Bare URLs, flattened from the owned image rows.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductPlain {
    fn from(p: Product) -> Self {
        ProductPlain {
            id: p.id,
            title: p.title,
            price: p.price,
            description: p.description,
            slug: p.slug,
            stock: p.stock,
            sizes: p.sizes,
            gender: p.gender,
            tags: p.tags,
            images: p.images.into_iter().map(|img| img.url).collect(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// =============================================================================
// Create Payload
// =============================================================================

/// Payload for creating a product.
///
/// Images are supplied as plain URL strings and converted to owned
/// `product_images` rows at creation time. Absent optional collections
/// default to empty, matching the HTTP contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub description: Option<String>,

    /// Optional explicit slug; derived from the title when absent.
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub stock: i32,

    pub sizes: Vec<String>,

    pub gender: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub images: Vec<String>,
}

// =============================================================================
// Update Payload
// =============================================================================

/// Partial update payload.
///
/// Every field is wrapped in `Option` so that "field absent" is
/// distinguishable from "field set to empty/zero". Only present fields are
/// applied; the rest keep their stored values (the "preload merge").
///
/// `images`, when present, is a FULL replacement list: the prior image rows
/// are deleted wholesale and fresh rows are attached, never diffed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub stock: Option<i32>,

    #[serde(default)]
    pub sizes: Option<Vec<String>>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl ProductPatch {
    /// Applies the present scalar fields to `product`, leaving absent fields
    /// (and the image set) untouched.
    ///
    /// A supplied slug is re-normalized; a title change alone does NOT
    /// re-derive the slug, the stored one stays.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title = title.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = &self.description {
            product.description = Some(description.clone());
        }
        if let Some(slug) = &self.slug {
            product.slug = slugify(slug);
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(sizes) = &self.sizes {
            product.sizes = sizes.clone();
        }
        if let Some(gender) = &self.gender {
            product.gender = gender.clone();
        }
        if let Some(tags) = &self.tags {
            product.tags = tags.clone();
        }
    }

    /// Whether the patch carries an image replacement list.
    pub fn replaces_images(&self) -> bool {
        self.images.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            title: "Cybertruck Owl Tee".to_string(),
            price: 35.0,
            description: Some("100% cotton".to_string()),
            slug: "cybertruck_owl_tee".to_string(),
            stock: 10,
            sizes: vec!["M".to_string(), "L".to_string()],
            gender: "men".to_string(),
            tags: vec!["shirt".to_string()],
            images: vec![
                ProductImage { id: 1, url: "a.jpg".to_string() },
                ProductImage { id: 2, url: "b.jpg".to_string() },
            ],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_plain_flattens_images_to_urls() {
        let plain: ProductPlain = sample_product().into();
        assert_eq!(plain.images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut product = sample_product();
        let patch = ProductPatch {
            price: Some(42.0),
            stock: Some(0),
            ..Default::default()
        };

        patch.apply_to(&mut product);

        assert_eq!(product.price, 42.0);
        assert_eq!(product.stock, 0);
        // Untouched fields keep their stored values
        assert_eq!(product.title, "Cybertruck Owl Tee");
        assert_eq!(product.images.len(), 2);
    }

    #[test]
    fn test_patch_normalizes_supplied_slug() {
        let mut product = sample_product();
        let patch = ProductPatch {
            slug: Some("New Owl Tee".to_string()),
            ..Default::default()
        };

        patch.apply_to(&mut product);

        assert_eq!(product.slug, "new_owl_tee");
    }

    #[test]
    fn test_title_change_keeps_stored_slug() {
        let mut product = sample_product();
        let patch = ProductPatch {
            title: Some("Renamed Tee".to_string()),
            ..Default::default()
        };

        patch.apply_to(&mut product);

        assert_eq!(product.slug, "cybertruck_owl_tee");
    }

    #[test]
    fn test_empty_patch_is_a_noop() {
        let mut product = sample_product();
        let before = format!("{:?}", product);

        ProductPatch::default().apply_to(&mut product);

        assert_eq!(format!("{:?}", product), before);
        assert!(!ProductPatch::default().replaces_images());
    }

    #[test]
    fn test_new_product_defaults() {
        let payload: NewProduct = serde_json::from_str(
            r#"{"title": "Basic Tee", "sizes": ["M"], "gender": "unisex"}"#,
        )
        .unwrap();

        assert_eq!(payload.price, 0.0);
        assert_eq!(payload.stock, 0);
        assert!(payload.images.is_empty());
        assert!(payload.tags.is_empty());
        assert!(payload.slug.is_none());
    }

    #[test]
    fn test_patch_distinguishes_absent_from_supplied_images() {
        let absent: ProductPatch = serde_json::from_str(r#"{"price": 1.0}"#).unwrap();
        assert!(!absent.replaces_images());

        let supplied: ProductPatch = serde_json::from_str(r#"{"images": []}"#).unwrap();
        assert!(supplied.replaces_images());
        assert_eq!(supplied.images, Some(vec![]));
    }
}
