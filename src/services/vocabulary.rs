//! Style vocabulary tables.
//!
//! Token matching is data, not scattered string checks: declared style text
//! resolves through `STYLE_TOKENS`, partial scoring through `RELATED_TAGS`,
//! and body-shape boosts through `body_shape_boosts`. Bump
//! `VOCABULARY_VERSION` whenever an entry changes, since persisted profiles
//! built against an older table are not comparable.

use crate::models::BodyShape;

pub const VOCABULARY_VERSION: &str = "2026-08";

/// (token, category, canonical value)
const STYLE_TOKENS: &[(&str, &str, &str)] = &[
    ("vintage", "era", "vintage"),
    ("retro", "era", "vintage"),
    ("classic", "era", "vintage"),
    ("timeless", "era", "vintage"),
    ("modern", "era", "modern"),
    ("y2k", "era", "y2k"),
    ("streetwear", "style", "streetwear"),
    ("street", "style", "streetwear"),
    ("urban", "style", "streetwear"),
    ("edgy", "style", "streetwear"),
    ("formal", "style", "formal"),
    ("elegant", "style", "formal"),
    ("sophisticated", "style", "formal"),
    ("professional", "style", "formal"),
    ("casual", "style", "casual"),
    ("relaxed", "style", "casual"),
    ("comfortable", "style", "casual"),
    ("everyday", "style", "casual"),
    ("bohemian", "style", "bohemian"),
    ("boho", "style", "bohemian"),
    ("artistic", "style", "bohemian"),
    ("minimalist", "style", "minimalist"),
    ("minimal", "style", "minimalist"),
    ("clean", "style", "minimalist"),
    ("simple", "style", "minimalist"),
    ("oversized", "fit", "oversized"),
    ("slim", "fit", "slim"),
    ("fitted", "fit", "fitted"),
    ("high-waisted", "fit", "high-waist"),
    ("high-waist", "fit", "high-waist"),
    ("wide-leg", "fit", "wide-leg"),
    ("wrap", "silhouette", "wrap"),
    ("a-line", "silhouette", "a-line"),
    ("flowy", "silhouette", "flowy"),
    ("structured", "silhouette", "structured"),
    ("belted", "silhouette", "belted"),
    ("layered", "silhouette", "layered"),
];

/// Unordered pairs of tag values considered adjacent for partial matches
const RELATED_TAGS: &[(&str, &str)] = &[
    ("vintage", "retro"),
    ("vintage", "classic"),
    ("streetwear", "urban"),
    ("streetwear", "casual"),
    ("formal", "minimalist"),
    ("modern", "minimalist"),
    ("casual", "relaxed"),
    ("slim", "fitted"),
    ("oversized", "relaxed"),
    ("flowy", "a-line"),
    ("wrap", "belted"),
    ("structured", "fitted"),
];

/// Resolves a normalized (lowercase) style token to its canonical
/// (category, value) pair. Exact match first, then substring in either
/// direction so "streets" and "high-waisted jeans" tokens still resolve.
pub fn lookup(token: &str) -> Option<(&'static str, &'static str)> {
    for (known, category, value) in STYLE_TOKENS {
        if *known == token {
            return Some((category, value));
        }
    }
    for (known, category, value) in STYLE_TOKENS {
        if token.contains(known) || known.contains(token) {
            return Some((category, value));
        }
    }
    None
}

/// True when two tag values are adjacent in the vocabulary
pub fn related(a: &str, b: &str) -> bool {
    RELATED_TAGS
        .iter()
        .any(|(x, y)| (*x == a && *y == b) || (*x == b && *y == a))
}

/// Attribute categories (with target values) boosted by a body shape
pub fn body_shape_boosts(shape: BodyShape) -> &'static [(&'static str, &'static str)] {
    match shape {
        BodyShape::Hourglass => &[
            ("silhouette", "wrap"),
            ("silhouette", "belted"),
            ("fit", "fitted"),
        ],
        BodyShape::Pear => &[
            ("fit", "high-waist"),
            ("silhouette", "structured"),
            ("silhouette", "a-line"),
        ],
        BodyShape::Apple => &[
            ("silhouette", "a-line"),
            ("silhouette", "flowy"),
            ("neckline", "v-neck"),
        ],
        BodyShape::Rectangle => &[
            ("silhouette", "structured"),
            ("silhouette", "layered"),
            ("fit", "fitted"),
        ],
        BodyShape::InvertedTriangle => &[
            ("fit", "wide-leg"),
            ("silhouette", "a-line"),
            ("silhouette", "flowy"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        assert_eq!(lookup("vintage"), Some(("era", "vintage")));
        assert_eq!(lookup("boho"), Some(("style", "bohemian")));
    }

    #[test]
    fn test_substring_lookup() {
        // Token containing a known word resolves to that word's entry
        assert_eq!(lookup("high-waisted"), Some(("fit", "high-waist")));
        assert_eq!(lookup("streetwear-inspired"), Some(("style", "streetwear")));
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(lookup("cottagecore"), None);
    }

    #[test]
    fn test_related_is_symmetric() {
        assert!(related("vintage", "retro"));
        assert!(related("retro", "vintage"));
        assert!(!related("vintage", "modern"));
    }

    #[test]
    fn test_every_shape_has_boosts() {
        for shape in [
            BodyShape::Hourglass,
            BodyShape::Pear,
            BodyShape::Apple,
            BodyShape::Rectangle,
            BodyShape::InvertedTriangle,
        ] {
            assert!(!body_shape_boosts(shape).is_empty());
        }
    }
}
