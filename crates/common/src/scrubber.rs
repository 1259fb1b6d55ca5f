use once_cell::sync::Lazy;
use regex::Regex;

/// Scrubber for partner API responses before they are placed in error messages.
///
/// Error messages are surfaced to operators and aggregated in logs, while response
/// bodies frequently echo the identifiers that were sent. Patterns are best-effort.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    // (XXX) XXX-XXXX or XXX-XXX-XXXX, optional +1 prefix. Separators are required so
    // bare digit runs (ids, timestamps) are left alone.
    Regex::new(r"(?:\+?1[-. ])?(?:\(\d{3}\) ?|\b\d{3}[-. ])\d{3}[-. ]\d{4}\b").unwrap()
});

static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)("(?:access_token|refresh_token|client_secret)"\s*:\s*")[^"]*(")"#)
        .unwrap()
});

static BEARER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(bearer)\s+[A-Za-z0-9._~+/=-]+").unwrap());

pub fn scrub(input: &str) -> String {
    let mut scrubbed = input.to_string();

    scrubbed = TOKEN_REGEX
        .replace_all(&scrubbed, "${1}[REDACTED]${2}")
        .to_string();
    scrubbed = BEARER_REGEX
        .replace_all(&scrubbed, "${1} [REDACTED]")
        .to_string();
    scrubbed = EMAIL_REGEX.replace_all(&scrubbed, "[EMAIL]").to_string();
    scrubbed = PHONE_REGEX.replace_all(&scrubbed, "[PHONE]").to_string();

    scrubbed
}

/// Scrub and cut to at most `max_chars` characters.
pub fn scrub_excerpt(input: &str, max_chars: usize) -> String {
    let scrubbed = scrub(input.trim());
    if scrubbed.chars().count() <= max_chars {
        return scrubbed;
    }
    let mut excerpt: String = scrubbed.chars().take(max_chars).collect();
    excerpt.push_str("...");
    excerpt
}
