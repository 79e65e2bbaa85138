use fancy_regex::Regex;
use std::sync::LazyLock;

/// First `OrgName|Org|netname|descr|owner: value` anywhere in the text,
/// case-insensitive. Not anchored to line starts.
static ORG_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(OrgName|Org|netname|descr|owner):\s*(.+)")
        .expect("WHOIS organization pattern must compile")
});

/// Extract the organization value from a raw WHOIS response.
///
/// Only the first match counts, even when its value trims to nothing.
pub fn extract_org_info(whois_text: &str) -> Option<String> {
    ORG_FIELD
        .captures(whois_text)
        .ok()
        .flatten()
        .and_then(|caps| caps.get(2).map(|m| m.as_str().trim().to_string()))
}
