//! Slug rules shared by posts and categories.

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 100;

/// Derive a slug from free text, e.g. a post title.
///
/// The result is lowercase ASCII with runs of other characters collapsed to a
/// single hyphen, cut to [`MAX_SLUG_LEN`] characters.
pub fn slugify(text: &str) -> String {
    let full = ::slug::slugify(text);
    if full.len() <= MAX_SLUG_LEN {
        return full;
    }
    full[..MAX_SLUG_LEN].trim_end_matches('-').to_string()
}

/// A slug is non-empty, at most [`MAX_SLUG_LEN`] characters, and made of ASCII
/// letters, digits, underscores and hyphens only, so every valid slug is
/// reachable through the `[-\w]+` route segment.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
