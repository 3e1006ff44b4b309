//! # Validation Module
//!
//! Input validation for product payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Axum extractors (Rust)                                       │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Rejects malformed JSON / wrong types                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required / bounded strings                                        │
//! │  ├── Non-negative numbers                                              │
//! │  └── Gender within the allowed set                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (PostgreSQL)                                        │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (title, slug)                                  │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use tienda_core::validation::validate_new_product;
//! # let payload: tienda_core::NewProduct = serde_json::from_str(
//! #     r#"{"title": "Tee", "sizes": ["M"], "gender": "men"}"#).unwrap();
//!
//! validate_new_product(&payload).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{NewProduct, ProductPatch};
use crate::{MAX_TITLE_LEN, VALID_GENDERS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_TITLE_LEN`] characters
///
/// ## Example
/// ```rust
/// use tienda_core::validation::validate_title;
///
/// assert!(validate_title("Chill Pullover Hoodie").is_ok());
/// assert!(validate_title("  ").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a price. Negative prices are rejected; zero is allowed (the
/// create payload defaults to it).
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if price.is_sign_negative() || !price.is_finite() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock count.
pub fn validate_stock(stock: i32) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

/// Validates a gender value against [`VALID_GENDERS`].
pub fn validate_gender(gender: &str) -> ValidationResult<()> {
    if !VALID_GENDERS.contains(&gender) {
        return Err(ValidationError::NotAllowed {
            field: "gender".to_string(),
            allowed: VALID_GENDERS.iter().map(|g| g.to_string()).collect(),
        });
    }
    Ok(())
}

/// Validates an image URL string. Only emptiness is checked; the string is
/// stored verbatim (it may be a bare stored-file name or an absolute URL).
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    if url.trim().is_empty() {
        return Err(ValidationError::InvalidFormat {
            field: "images".to_string(),
            reason: "image URLs must not be empty".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a complete create payload.
pub fn validate_new_product(payload: &NewProduct) -> ValidationResult<()> {
    validate_title(&payload.title)?;
    validate_price(payload.price)?;
    validate_stock(payload.stock)?;
    validate_gender(&payload.gender)?;
    for url in &payload.images {
        validate_image_url(url)?;
    }
    Ok(())
}

/// Validates a partial update payload. Only present fields are checked.
pub fn validate_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(stock) = patch.stock {
        validate_stock(stock)?;
    }
    if let Some(gender) = &patch.gender {
        validate_gender(gender)?;
    }
    if let Some(images) = &patch.images {
        for url in images {
            validate_image_url(url)?;
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn base_payload() -> NewProduct {
        serde_json::from_str(r#"{"title": "Basic Tee", "sizes": ["M"], "gender": "men"}"#)
            .unwrap()
    }

    #[test]
    fn test_valid_payload_passes() {
        assert!(validate_new_product(&base_payload()).is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut payload = base_payload();
        payload.title = "   ".to_string();
        assert!(matches!(
            validate_new_product(&payload),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut payload = base_payload();
        payload.price = -1.0;
        assert!(matches!(
            validate_new_product(&payload),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_unknown_gender_rejected() {
        let mut payload = base_payload();
        payload.gender = "robots".to_string();
        assert!(matches!(
            validate_new_product(&payload),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_empty_image_url_rejected() {
        let mut payload = base_payload();
        payload.images = vec!["ok.jpg".to_string(), "".to_string()];
        assert!(validate_new_product(&payload).is_err());
    }

    #[test]
    fn test_patch_ignores_absent_fields() {
        let patch = ProductPatch::default();
        assert!(validate_patch(&patch).is_ok());
    }

    #[test]
    fn test_patch_checks_present_fields() {
        let patch = ProductPatch {
            stock: Some(-5),
            ..Default::default()
        };
        assert!(matches!(
            validate_patch(&patch),
            Err(ValidationError::Negative { .. })
        ));
    }
}
