//! # Product Repository
//!
//! The repository facade over `products` and `product_images`: the thin layer
//! translating payloads to store calls.
//!
//! ## Update-With-Image-Replacement (the core operation)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              PATCH /api/products/{id} with images                       │
//! │                                                                         │
//! │  1. Preload merge: fetch row, apply only present patch fields          │
//! │         │  (absent → NotFound, before any write)                        │
//! │         ▼                                                               │
//! │  2. BEGIN transaction                                                  │
//! │         │                                                               │
//! │         ├── images supplied?                                            │
//! │         │     YES: DELETE all prior image rows for this product,       │
//! │         │          INSERT one fresh row per supplied URL               │
//! │         │          (wholesale replacement, never diffed)               │
//! │         │     NO:  leave the image set untouched                       │
//! │         ▼                                                               │
//! │  3. UPDATE the merged product fields (same transaction)                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. COMMIT ── on any failure the scope rolls back before the error     │
//! │         │      propagates; either way the connection is released       │
//! │         ▼                                                               │
//! │  5. Re-fetch and return the committed plain representation             │
//! │                                                                         │
//! │  Invariant: fields and the full image set change together or not at    │
//! │  all; no partial replacement is visible to a concurrent reader.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use tienda_core::slug::slug_or_derived;
use tienda_core::{NewProduct, Product, ProductImage, ProductPatch, ProductPlain};

/// Column list shared by every product SELECT.
const PRODUCT_COLUMNS: &str =
    "id, title, price, description, slug, stock, sizes, gender, tags, created_at, updated_at";

// =============================================================================
// Row Types
// =============================================================================

/// A `products` row, before its images are attached.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    title: String,
    price: f64,
    description: Option<String>,
    slug: String,
    stock: i32,
    sizes: Vec<String>,
    gender: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, images: Vec<ProductImage>) -> Product {
        Product {
            id: self.id,
            title: self.title,
            price: self.price,
            description: self.description,
            slug: self.slug,
            stock: self.stock,
            sizes: self.sizes,
            gender: self.gender,
            tags: self.tags,
            images,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A `product_images` row.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ImageRow {
    id: i64,
    url: String,
    product_id: Uuid,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let created = repo.create(payload).await?;
/// let page = repo.list(10, 0).await?;
/// let one = repo.find_one_plain("mens_t_logo_tee").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: PgPool) -> Self {
        ProductRepository { pool }
    }

    /// Creates a product with its owned image rows in one write.
    ///
    /// Image URLs become fresh `product_images` rows; the returned plain
    /// product carries the original URL list rather than a re-read of the
    /// persisted rows.
    ///
    /// ## Failure
    /// * `DbError::UniqueViolation` - title or slug already taken (detail
    ///   comes from the store and is client-safe)
    /// * any other store failure surfaces through the shared translation
    ///   point as an opaque server error
    pub async fn create(&self, payload: NewProduct) -> DbResult<ProductPlain> {
        let NewProduct {
            title,
            price,
            description,
            slug,
            stock,
            sizes,
            gender,
            tags,
            images,
        } = payload;

        let id = Uuid::new_v4();
        let slug = slug_or_derived(slug.as_deref(), &title);
        let now = Utc::now();

        debug!(%id, %slug, image_count = images.len(), "Inserting product");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, title, price, description, slug, stock,
                sizes, gender, tags, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(id)
        .bind(&title)
        .bind(price)
        .bind(&description)
        .bind(&slug)
        .bind(stock)
        .bind(&sizes)
        .bind(&gender)
        .bind(&tags)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for url in &images {
            sqlx::query("INSERT INTO product_images (url, product_id) VALUES ($1, $2)")
                .bind(url)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(ProductPlain {
            id,
            title,
            price,
            description,
            slug,
            stock,
            sizes,
            gender,
            tags,
            images,
            created_at: now,
            updated_at: now,
        })
    }

    /// Lists a page of products with their images flattened to URLs.
    ///
    /// No ordering is guaranteed beyond store default.
    ///
    /// ## Arguments
    /// * `limit` - Page size
    /// * `offset` - Rows to skip
    pub async fn list(&self, limit: i64, offset: i64) -> DbResult<Vec<ProductPlain>> {
        debug!(limit, offset, "Listing products");

        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut images = self.images_for_many(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let owned = images.remove(&row.id).unwrap_or_default();
                ProductPlain::from(row.into_product(owned))
            })
            .collect())
    }

    /// Finds one product by term: a UUID looks up the primary key, anything
    /// else matches case-insensitively on title or exactly on the lowercased
    /// slug. Images come joined.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The matching product with its image rows
    /// * `Err(DbError::NotFound)` - No match
    pub async fn find_by_term(&self, term: &str) -> DbResult<Product> {
        let row: Option<ProductRow> = match Uuid::parse_str(term) {
            Ok(id) => {
                sqlx::query_as(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
                ))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
            Err(_) => {
                sqlx::query_as(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products \
                     WHERE UPPER(title) = UPPER($1) OR slug = LOWER($1)"
                ))
                .bind(term)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        let row = row.ok_or_else(|| DbError::not_found("Product", term))?;
        let images = self.images_for(row.id).await?;
        Ok(row.into_product(images))
    }

    /// [`Self::find_by_term`] with the image rows flattened to URLs - the
    /// response shape every endpoint uses.
    pub async fn find_one_plain(&self, term: &str) -> DbResult<ProductPlain> {
        Ok(self.find_by_term(term).await?.into())
    }

    /// Updates a product, optionally replacing its whole image set, in a
    /// single transactional scope. See the module header for the protocol.
    ///
    /// ## Arguments
    /// * `id` - Product UUID
    /// * `patch` - Partial fields; `images`, when present, is a FULL
    ///   replacement list
    ///
    /// ## Returns
    /// The committed plain representation (re-fetched, not the in-memory
    /// merge).
    pub async fn update(&self, id: Uuid, patch: ProductPatch) -> DbResult<ProductPlain> {
        // Preload merge: unset fields keep their stored values. NotFound
        // fires here, before any write.
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| DbError::not_found("Product", id.to_string()))?;
        let mut product = row.into_product(Vec::new());
        patch.apply_to(&mut product);
        product.updated_at = Utc::now();

        // One scope for the destructive image swap and the field update.
        // Dropping `tx` on any early return rolls the scope back, so the
        // prior image set stays visible to other readers.
        let mut tx = self.pool.begin().await?;

        if let Some(urls) = &patch.images {
            debug!(%id, replacement_count = urls.len(), "Replacing image set");

            sqlx::query("DELETE FROM product_images WHERE product_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for url in urls {
                sqlx::query("INSERT INTO product_images (url, product_id) VALUES ($1, $2)")
                    .bind(url)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let result = sqlx::query(
            r#"
            UPDATE products SET
                title = $2,
                price = $3,
                description = $4,
                slug = $5,
                stock = $6,
                sizes = $7,
                gender = $8,
                tags = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&product.title)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.slug)
        .bind(product.stock)
        .bind(&product.sizes)
        .bind(&product.gender)
        .bind(&product.tags)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Row vanished between preload and update; scope rolls back on drop.
            return Err(DbError::not_found("Product", id.to_string()));
        }

        tx.commit().await?;

        // Return committed state, not the client-supplied merge.
        self.find_one_plain(&id.to_string()).await
    }

    /// Deletes a product resolved by term; image rows cascade.
    ///
    /// Note: callers always pass a UUID, but the shared term lookup means a
    /// slug or title match would also delete. Kept to match the documented
    /// behavior rather than silently tightened.
    pub async fn remove(&self, term: &str) -> DbResult<()> {
        let product = self.find_by_term(term).await?;

        debug!(id = %product.id, "Deleting product");

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Unconditionally deletes every product row (images cascade).
    ///
    /// Used only by the seed runner.
    ///
    /// ## Returns
    /// The number of deleted products.
    pub async fn delete_all(&self) -> DbResult<u64> {
        debug!("Deleting all products");

        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Image Helpers
    // =========================================================================

    /// Fetches the image rows owned by one product, in row order.
    async fn images_for(&self, product_id: Uuid) -> DbResult<Vec<ProductImage>> {
        let rows: Vec<ImageRow> = sqlx::query_as(
            "SELECT id, url, product_id FROM product_images WHERE product_id = $1 ORDER BY id",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ProductImage { id: r.id, url: r.url })
            .collect())
    }

    /// Fetches the image rows for a whole page of products, grouped by owner.
    async fn images_for_many(
        &self,
        product_ids: &[Uuid],
    ) -> DbResult<HashMap<Uuid, Vec<ProductImage>>> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<ImageRow> = sqlx::query_as(
            "SELECT id, url, product_id FROM product_images \
             WHERE product_id = ANY($1) ORDER BY id",
        )
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
        for r in rows {
            grouped
                .entry(r.product_id)
                .or_default()
                .push(ProductImage { id: r.id, url: r.url });
        }
        Ok(grouped)
    }
}
