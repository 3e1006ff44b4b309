//! # Slug Derivation
//!
//! Slug normalization rules for products.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Slug Normalization                                │
//! │                                                                         │
//! │  Input:  "Men's Chill Crew Neck Sweatshirt"                            │
//! │       │                                                                 │
//! │       ▼  lowercase                                                      │
//! │  "men's chill crew neck sweatshirt"                                    │
//! │       │                                                                 │
//! │       ▼  spaces → underscore                                            │
//! │  "men's_chill_crew_neck_sweatshirt"                                    │
//! │       │                                                                 │
//! │       ▼  apostrophes removed                                            │
//! │  "mens_chill_crew_neck_sweatshirt"                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Applied both when a slug is supplied by the client (normalization) and
//! when it is derived from the title (no slug supplied). On update only a
//! supplied slug is re-normalized; a title-only change keeps the stored
//! slug, so a stored slug is always in normal form but never silently moves.

/// Normalizes a slug (or derives one from a title).
///
/// ## Example
/// ```rust
/// use tienda_core::slug::slugify;
///
/// assert_eq!(slugify("Kids Scribble T Logo Tee"), "kids_scribble_t_logo_tee");
/// assert_eq!(slugify("Women's T Logo"), "womens_t_logo");
/// ```
pub fn slugify(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .replace('\'', "")
}

/// Returns the slug to store for a create payload: the supplied slug when
/// present, otherwise one derived from the title. Normalized either way.
pub fn slug_or_derived(slug: Option<&str>, title: &str) -> String {
    match slug {
        Some(s) if !s.trim().is_empty() => slugify(s),
        _ => slugify(title),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_underscores() {
        assert_eq!(slugify("Men's Raven Lightweight Hoodie"), "mens_raven_lightweight_hoodie");
    }

    #[test]
    fn test_slugify_trims() {
        assert_eq!(slugify("  Cyber Shirt  "), "cyber_shirt");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let once = slugify("Women's Powerwall Tee");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_slug_derived_from_title_when_absent() {
        assert_eq!(slug_or_derived(None, "Solar Roof Tee"), "solar_roof_tee");
        assert_eq!(slug_or_derived(Some("   "), "Solar Roof Tee"), "solar_roof_tee");
    }

    #[test]
    fn test_supplied_slug_is_normalized() {
        assert_eq!(slug_or_derived(Some("Solar ROOF tee"), "ignored"), "solar_roof_tee");
    }
}
