//! HTTP request handlers, grouped by resource.

pub mod files;
pub mod products;
pub mod seed;
