//! Boot command-line token helpers.
//!
//! The command line is a whitespace-separated list of `key=value` tokens.
//! Consumers walk the tokens themselves with `strip_prefix`; these helpers
//! cover the value parsing every consumer repeats.

/// Accepts the usual on/off spellings. `None` means "not a boolean".
pub fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("on")
        || value.eq_ignore_ascii_case("true")
        || value.eq_ignore_ascii_case("yes")
        || value.eq_ignore_ascii_case("enabled")
        || value == "1"
    {
        Some(true)
    } else if value.eq_ignore_ascii_case("off")
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no")
        || value.eq_ignore_ascii_case("disabled")
        || value == "0"
    {
        Some(false)
    } else {
        None
    }
}

/// Decimal or `0x`-prefixed hexadecimal.
pub fn parse_u32(value: &str) -> Option<u32> {
    if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else {
        value.parse::<u32>().ok()
    }
}

/// Value of the last `key=` token, if any. Later tokens override earlier ones.
pub fn find_value<'a>(cmdline: &'a str, key: &str) -> Option<&'a str> {
    let mut found = None;
    for token in cmdline.split_whitespace() {
        if let Some(value) = token.strip_prefix(key).and_then(|rest| rest.strip_prefix('=')) {
            found = Some(value);
        }
    }
    found
}
