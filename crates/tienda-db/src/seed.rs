//! # Seed Runner
//!
//! Repopulates the product table from a static fixture.
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Seed Execution                                   │
//! │                                                                         │
//! │  POST /api/seed  (or `cargo run -p tienda-db --bin seed`)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  delete_all()  ── bulk wipe, images cascade                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  create(record) ┬ fired concurrently for every fixture record          │
//! │  create(record) ┤                                                       │
//! │  create(record) ┘                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  try_join_all ── fails as soon as any one create rejects;              │
//! │                  already-issued creates are NOT rolled back, so        │
//! │                  partial seeding on failure is possible (known gap)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use futures::future::try_join_all;
use tracing::info;

use crate::error::DbResult;
use crate::repository::product::ProductRepository;
use tienda_core::NewProduct;

// =============================================================================
// Fixture
// =============================================================================

/// One fixture record. `&'static` throughout so the table can be a `const`.
#[derive(Debug, Clone, Copy)]
pub struct SeedProduct {
    pub title: &'static str,
    pub price: f64,
    pub description: &'static str,
    pub sizes: &'static [&'static str],
    pub stock: i32,
    pub gender: &'static str,
    pub tags: &'static [&'static str],
    pub images: &'static [&'static str],
}

impl SeedProduct {
    /// Converts the fixture record into a create payload. The slug is left
    /// for the repository to derive from the title.
    pub fn to_new_product(&self) -> NewProduct {
        NewProduct {
            title: self.title.to_string(),
            price: self.price,
            description: Some(self.description.to_string()),
            slug: None,
            stock: self.stock,
            sizes: self.sizes.iter().map(|s| s.to_string()).collect(),
            gender: self.gender.to_string(),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            images: self.images.iter().map(|i| i.to_string()).collect(),
        }
    }
}

/// The static product fixture.
///
/// Titles are unique (and stay unique after slug derivation) so a full seed
/// never trips the uniqueness constraint against itself.
pub const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        title: "Men's Chill Crew Neck Sweatshirt",
        price: 75.0,
        description: "Introducing the softest crew ever. Made from recycled materials with a relaxed silhouette.",
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        stock: 7,
        gender: "men",
        tags: &["sweatshirt"],
        images: &["1740176-00-A_0_2000.jpg", "1740176-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Quilted Shirt Jacket",
        price: 200.0,
        description: "Weather-resistant quilted jacket with a cropped silhouette and signature hexagonal quilting.",
        sizes: &["XS", "S", "M", "XL", "XXL"],
        stock: 5,
        gender: "men",
        tags: &["jacket"],
        images: &["1740507-00-A_0_2000.jpg", "1740507-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Raven Lightweight Zip Up Bomber Jacket",
        price: 130.0,
        description: "Lightweight bomber with premium matte finish and tonal hardware.",
        sizes: &["S", "M", "L", "XL", "XXL"],
        stock: 10,
        gender: "men",
        tags: &["shirt"],
        images: &["1740250-00-A_0_2000.jpg", "1740250-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Turbine Long Sleeve Tee",
        price: 45.0,
        description: "Long sleeve tee in ultra-soft jersey with a subtle logo across the chest.",
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        stock: 50,
        gender: "men",
        tags: &["shirt"],
        images: &["1740280-00-A_0_2000.jpg", "1740280-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Turbine Short Sleeve Tee",
        price: 40.0,
        description: "Short sleeve tee with tonal logo across the chest, made from a cotton blend.",
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        stock: 50,
        gender: "men",
        tags: &["shirt"],
        images: &["1741416-00-A_0_2000.jpg", "1741416-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Cybertruck Owl Tee",
        price: 35.0,
        description: "Designed for comfort, this tee is made from 100% cotton and features the Cybertruck owl graphic.",
        sizes: &["M", "L", "XL", "XXL"],
        stock: 0,
        gender: "men",
        tags: &["shirt"],
        images: &["1741111-00-A_0_2000.jpg", "1741111-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Solar Roof Tee",
        price: 35.0,
        description: "Inspired by our fully integrated home solar and storage system.",
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        stock: 15,
        gender: "men",
        tags: &["shirt"],
        images: &["1703767-00-A_0_2000.jpg", "1703767-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Let the Sun Shine Tee",
        price: 35.0,
        description: "Celebrate renewable energy with this cotton tee featuring a sunset graphic on the back.",
        sizes: &["S", "M", "L", "XL", "XXL"],
        stock: 17,
        gender: "men",
        tags: &["shirt"],
        images: &["1700280-00-A_0_2000.jpg", "1700280-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's 3D Large Wordmark Tee",
        price: 35.0,
        description: "100% Peruvian cotton tee with a 3D silicone-printed wordmark on the chest.",
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        stock: 12,
        gender: "men",
        tags: &["shirt"],
        images: &["8764734-00-A_0_2000.jpg", "8764734-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's 3D T Logo Tee",
        price: 35.0,
        description: "Classic tee with a 3D silicone-printed T logo on the left chest.",
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        stock: 5,
        gender: "men",
        tags: &["shirt"],
        images: &["7532109-00-A_0_2000.jpg", "7532109-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Plaid Mode Tee",
        price: 35.0,
        description: "A bold graphic tee celebrating Plaid Mode, made from 100% cotton.",
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        stock: 82,
        gender: "men",
        tags: &["shirt"],
        images: &["1549268-00-A_0_2000.jpg", "1549268-00-A_2.jpg"],
    },
    SeedProduct {
        title: "Men's Powerwall Tee",
        price: 35.0,
        description: "Inspired by our popular home battery, this tee is made from 100% cotton.",
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        stock: 24,
        gender: "men",
        tags: &["shirt"],
        images: &["9877034-00-A_0_2000.jpg", "9877034-00-A_2.jpg"],
    },
    SeedProduct {
        title: "Men's Battery Day Tee",
        price: 30.0,
        description: "Commemorating Battery Day, this tee features the specially designed battery cell on the chest.",
        sizes: &["XS", "S", "XXL"],
        stock: 5,
        gender: "men",
        tags: &["shirt"],
        images: &["1633802-00-A_0_2000.jpg", "1633802-00-A_2.jpg"],
    },
    SeedProduct {
        title: "Women's Cropped Puffer Jacket",
        price: 225.0,
        description: "Cropped puffer with a unique quilt pattern and stowable hood.",
        sizes: &["XS", "S", "M"],
        stock: 85,
        gender: "women",
        tags: &["hoodie"],
        images: &["1740535-00-A_0_2000.jpg", "1740535-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Women's Chill Half Zip Cropped Hoodie",
        price: 130.0,
        description: "Soft fleece hoodie with a cropped silhouette and custom half-zip design.",
        sizes: &["XS", "S", "M", "XXL"],
        stock: 10,
        gender: "women",
        tags: &["hoodie"],
        images: &["1740226-00-A_0_2000.jpg", "1740226-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Women's Raven Slouchy Crew Sweatshirt",
        price: 110.0,
        description: "Slouchy crew in a soft viscose blend with a relaxed, dropped-shoulder fit.",
        sizes: &["XS", "S", "M"],
        stock: 9,
        gender: "women",
        tags: &["hoodie"],
        images: &["1740260-00-A_0_2000.jpg", "1740260-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Women's Turbine Cropped Long Sleeve Tee",
        price: 45.0,
        description: "Cropped long sleeve tee in ultra-soft jersey with a subtle wordmark.",
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        stock: 10,
        gender: "women",
        tags: &["shirt"],
        images: &["1740290-00-A_0_2000.jpg", "1740290-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Women's T Logo Short Sleeve Scoop Neck Tee",
        price: 35.0,
        description: "Scoop neck tee with a tonal logo, made from 50% cotton and 50% polyester.",
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        stock: 30,
        gender: "women",
        tags: &["shirt"],
        images: &["8765090-00-A_0_2000.jpg", "8765090-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Women's Plaid Mode Tee",
        price: 35.0,
        description: "Relaxed crew neck tee with a shorter length, featuring the Plaid Mode graphic.",
        sizes: &["S", "M"],
        stock: 16,
        gender: "women",
        tags: &["shirt"],
        images: &["1549275-00-A_0_2000.jpg", "1549275-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Women's Powerwall Tee",
        price: 130.0,
        description: "Inspired by our popular home battery, made from 100% cotton with a tri-blend feel.",
        sizes: &["XS", "S"],
        stock: 10,
        gender: "women",
        tags: &["shirt"],
        images: &["9877040-00-A_0_2000.jpg", "9877040-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Kids Cybertruck Long Sleeve Tee",
        price: 30.0,
        description: "Long sleeve tee with the Cybertruck graphic on the chest, made from 100% cotton.",
        sizes: &["XS", "S", "M"],
        stock: 10,
        gender: "kid",
        tags: &["shirt"],
        images: &["1742694-00-A_1_2000.jpg", "1742694-00-A_3.jpg"],
    },
    SeedProduct {
        title: "Kids Scribble T Logo Tee",
        price: 25.0,
        description: "Made from 100% Peruvian cotton, featuring the T logo scribbled by a young artist.",
        sizes: &["XS", "S", "M"],
        stock: 0,
        gender: "kid",
        tags: &["shirt"],
        images: &["8529312-00-A_0_2000.jpg", "8529312-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Kids Cyberquad Bomber Jacket",
        price: 65.0,
        description: "Bomber jacket with a graffiti-style illustration of the Cyberquad silhouette.",
        sizes: &["XS", "S", "M"],
        stock: 10,
        gender: "kid",
        tags: &["shirt"],
        images: &["1742702-00-A_0_2000.jpg", "1742702-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Kids Corp Jacket",
        price: 30.0,
        description: "Nylon bomber in classic corp colorways with a double-stitched collar.",
        sizes: &["XS", "S", "M"],
        stock: 10,
        gender: "kid",
        tags: &["shirt"],
        images: &["1742706-00-A_0_2000.jpg", "1742706-00-A_1.jpg"],
    },
];

// =============================================================================
// Runner
// =============================================================================

/// Clears all products, then recreates them from [`PRODUCTS`].
///
/// Creates run concurrently with no ordering guarantee between them and no
/// cross-record atomicity.
#[derive(Debug, Clone)]
pub struct SeedRunner {
    repo: ProductRepository,
}

impl SeedRunner {
    /// Creates a new SeedRunner over the given repository.
    pub fn new(repo: ProductRepository) -> Self {
        SeedRunner { repo }
    }

    /// Runs the seed.
    ///
    /// ## Returns
    /// The number of seeded products.
    pub async fn run(&self) -> DbResult<usize> {
        let wiped = self.repo.delete_all().await?;
        info!(wiped, "Cleared product table");

        // Fire every create at once and wait on all of them. The aggregate
        // fails as soon as any one create rejects; creates already in flight
        // are not rolled back.
        let inserts = PRODUCTS
            .iter()
            .map(|record| self.repo.create(record.to_new_product()));
        let created = try_join_all(inserts).await?;

        info!(count = created.len(), "Seed complete");
        Ok(created.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tienda_core::slug::slugify;
    use tienda_core::validation::validate_new_product;

    #[test]
    fn test_fixture_titles_are_unique() {
        let titles: HashSet<_> = PRODUCTS.iter().map(|p| p.title).collect();
        assert_eq!(titles.len(), PRODUCTS.len());
    }

    #[test]
    fn test_fixture_slugs_stay_unique_after_derivation() {
        let slugs: HashSet<_> = PRODUCTS.iter().map(|p| slugify(p.title)).collect();
        assert_eq!(slugs.len(), PRODUCTS.len());
    }

    #[test]
    fn test_fixture_records_pass_validation() {
        for record in PRODUCTS {
            validate_new_product(&record.to_new_product())
                .unwrap_or_else(|e| panic!("{}: {}", record.title, e));
        }
    }

    #[test]
    fn test_fixture_records_carry_images() {
        assert!(PRODUCTS.iter().all(|p| !p.images.is_empty()));
    }
}
