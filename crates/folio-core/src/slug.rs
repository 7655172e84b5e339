//! URL slug generation and uniqueness resolution.

use std::collections::HashSet;

/// Maximum stored slug length, suffix included.
pub const MAX_SLUG_LEN: usize = 200;

/// Longest suffix [`assign_slug`] can append: `-` plus the digits of `u64::MAX`.
const MAX_SUFFIX_LEN: usize = 21;

/// Convert text into a URL-safe slug.
///
/// Lowercases, turns every run of characters outside `[a-z0-9]` into a single
/// hyphen and trims hyphens from both ends. `"Hello, World!"` becomes
/// `"hello-world"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().map(|c| c.to_ascii_lowercase()) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Whether `slug` only contains characters allowed in a caller-supplied slug.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Pick the first free slug starting from `base`.
///
/// `existing` holds the slugs already taken by other posts. If `base` is
/// free it is returned unchanged, otherwise `-1`, `-2`, ... are appended until
/// an unused candidate turns up. Probing is linear and unbounded.
pub fn assign_slug(base: &str, existing: &HashSet<String>) -> String {
    let base = truncate(base, MAX_SLUG_LEN);
    if !existing.contains(base) {
        return base.to_string();
    }

    let mut counter: u64 = 1;
    loop {
        let suffix = format!("-{counter}");
        let stem = truncate(base, MAX_SLUG_LEN.saturating_sub(suffix.len()));
        let candidate = format!("{stem}{suffix}");
        if !existing.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Prefix shared by every candidate [`assign_slug`] can produce for `base`.
///
/// Suffixed candidates shorten long bases, so slugs taken by earlier
/// collisions only share this shorter stem with `base`.
pub fn candidate_prefix(base: &str) -> &str {
    truncate(base, MAX_SLUG_LEN - MAX_SUFFIX_LEN)
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn taken(slugs: &[&str]) -> HashSet<String> {
        slugs.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("Hello World", "hello-world")]
    #[case("  Leading and trailing  ", "leading-and-trailing")]
    #[case("Rust -- 2024 edition!!", "rust-2024-edition")]
    #[case("already-a-slug", "already-a-slug")]
    #[case("snake_case_title", "snake-case-title")]
    #[case("!!!", "")]
    #[case("Café au lait", "caf-au-lait")]
    #[case("Don't stop", "don-t-stop")]
    fn slugify_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[test]
    fn free_base_is_kept() {
        assert_eq!(assign_slug("hello-world", &taken(&[])), "hello-world");
    }

    #[test]
    fn collisions_get_incrementing_suffixes() {
        assert_eq!(
            assign_slug("hello-world", &taken(&["hello-world"])),
            "hello-world-1"
        );
        assert_eq!(
            assign_slug("hello-world", &taken(&["hello-world", "hello-world-1"])),
            "hello-world-2"
        );
    }

    #[test]
    fn gaps_are_reused() {
        assert_eq!(
            assign_slug("post", &taken(&["post", "post-2"])),
            "post-1"
        );
    }

    #[test]
    fn suffixed_slug_stays_within_limit() {
        let base = "a".repeat(MAX_SLUG_LEN);
        let slug = assign_slug(&base, &taken(&[base.as_str()]));

        assert_eq!(slug.len(), MAX_SLUG_LEN);
        assert!(slug.ends_with("a-1"));
    }

    #[test]
    fn long_base_keeps_probing_past_shortened_suffixes() {
        let base = "a".repeat(MAX_SLUG_LEN);
        let first = assign_slug(&base, &taken(&[base.as_str()]));
        let second = assign_slug(&base, &taken(&[base.as_str(), first.as_str()]));

        assert_eq!(second.len(), MAX_SLUG_LEN);
        assert!(second.ends_with("a-2"));
    }

    #[test]
    fn candidate_prefix_covers_every_candidate() {
        let base = "b".repeat(MAX_SLUG_LEN);
        let prefix = candidate_prefix(&base);

        let mut existing = taken(&[base.as_str()]);
        for _ in 0..12 {
            let slug = assign_slug(&base, &existing);
            assert!(slug.starts_with(prefix));
            existing.insert(slug);
        }
        assert_eq!(candidate_prefix("short"), "short");
    }

    #[rstest]
    #[case("my-post_2", true)]
    #[case("", false)]
    #[case("has space", false)]
    #[case("slash/y", false)]
    fn slug_validity(#[case] slug: &str, #[case] valid: bool) {
        assert_eq!(is_valid_slug(slug), valid);
    }
}
