//! # tienda-core: Pure Domain Logic for the Tienda Catalog
//!
//! This crate is the **heart** of the product catalog. It contains the domain
//! types and rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tienda Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP Clients                                 │   │
//! │  │    POST /api/products ── GET /api/products/{term} ── ...        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (Axum handlers)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tienda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   slug    │  │ validation│  │   error   │  │   │
//! │  │   │  Product  │  │  slugify  │  │   rules   │  │   enums   │  │   │
//! │  │   │   Patch   │  │           │  │  checks   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tienda-db (Database Layer)                   │   │
//! │  │            PostgreSQL queries, migrations, repositories         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductImage, NewProduct, ProductPatch)
//! - [`slug`] - Slug derivation and normalization
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Partiality**: Update payloads use `Option` per field so "absent"
//!    is distinguishable from "set to empty"
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::slug::slugify;
//!
//! assert_eq!(slugify("Men's Chill Crew Neck"), "mens_chill_crew_neck");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod slug;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tienda_core::Product` instead of
// `use tienda_core::types::Product`

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default page size for product listings when the caller does not supply one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Default page offset for product listings.
pub const DEFAULT_OFFSET: i64 = 0;

/// The accepted `gender` values for a product.
///
/// Stored as plain text in the database; validated here before any write.
pub const VALID_GENDERS: &[&str] = &["men", "women", "kid", "unisex"];

/// Maximum allowed length for a product title.
pub const MAX_TITLE_LEN: usize = 200;
