use url::Url;

/// Generic reference patterns that are unlikely to stay meaningful
/// long-term: status homepages, health dashboards, support portals.
pub const GENERIC_PATTERNS: [&str; 4] = ["status.", "/status", "/health", "support."];

/// Decide whether a reference URL is eligible for enrichment: absent, empty,
/// or a bare generic page.
///
/// A pattern hit only counts when the URL has no query string and ends with
/// the pattern itself (trailing slash stripped from the pattern). That keeps
/// specific pages like `status.example.com/incidents/2025-10-20?id=42` out
/// of the problematic set.
pub fn is_problematic_url(url: Option<&str>) -> bool {
    let url = match url {
        Some(u) if !u.is_empty() => u,
        _ => return true,
    };

    let url_lower = url.to_lowercase();

    for pattern in GENERIC_PATTERNS {
        if url_lower.contains(pattern)
            && !has_query(url)
            && url_lower.ends_with(pattern.trim_end_matches('/'))
        {
            return true;
        }
    }

    false
}

fn has_query(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => !parsed.query().unwrap_or("").is_empty(),
        // Unparsable input: a literal '?' scan is the best we can do.
        Err(_) => url.contains('?'),
    }
}
