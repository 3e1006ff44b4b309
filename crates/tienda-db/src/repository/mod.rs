//! # Repository Module
//!
//! Database repository implementations for the Tienda catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Axum handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().find_one_plain(term)                            │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── create(&self, payload)                                            │
//! │  ├── list(&self, limit, offset)                                        │
//! │  ├── find_by_term(&self, term)                                         │
//! │  ├── update(&self, id, patch)      ← the one real transaction          │
//! │  ├── remove(&self, term)                                               │
//! │  └── delete_all(&self)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  PostgreSQL                                                            │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • One translation point for store errors                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
