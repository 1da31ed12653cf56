//! Query variant fan-out.
//!
//! A base query is broadened into a bounded set of modifier variants so that
//! one seed covers engagement, format, and freshness phrasings without
//! changing intent.

/// Upper bound on variants produced for one base query.
pub const MAX_QUERY_VARIANTS: usize = 8;

/// Collapses internal whitespace and trims.
fn normalize(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Expands a query into at most [`MAX_QUERY_VARIANTS`] variants: the
/// original, the original plus each quality modifier, and — unless the query
/// already mentions the freshness prefix — a freshness-prefixed variant.
/// Deduplicates by exact normalized string, first occurrence winning.
///
/// An empty or whitespace-only query yields no variants.
#[must_use]
pub fn build_query_variants(
    query: &str,
    quality_modifiers: &[String],
    freshness_prefix: &str,
) -> Vec<String> {
    let normalized = normalize(query);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut variants: Vec<String> = Vec::new();
    let mut push = |candidate: String| {
        if !variants.contains(&candidate) && variants.len() < MAX_QUERY_VARIANTS {
            variants.push(candidate);
        }
    };

    push(normalized.clone());
    for modifier in quality_modifiers {
        push(normalize(&format!("{normalized} {modifier}")));
    }
    if !normalized.to_lowercase().contains(freshness_prefix) {
        push(normalize(&format!("{freshness_prefix} {normalized}")));
    }

    variants
}
