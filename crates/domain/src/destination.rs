/// Reduce a raw `dst-address` value to the bare address used as the
/// dedup and cache key.
///
/// Accepted shapes:
/// - `a.b.c.d` and `a.b.c.d:port`
/// - `[v6]` and `[v6]:port`
/// - bare IPv6 (two or more colons, no brackets), kept as is
///
/// Returns `None` when nothing usable is left.
pub fn normalize_destination(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    let host = if let Some(rest) = trimmed.strip_prefix('[') {
        match rest.find(']') {
            Some(end) => &rest[..end],
            None => rest,
        }
    } else if trimmed.matches(':').count() == 1 {
        trimmed.split(':').next().unwrap_or_default()
    } else {
        trimmed
    };

    let host = host.trim();
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
