//! C literal decoding shared by every dialect.

/// Parse an integer literal, honoring `0x`, `0o` and `0b` prefixes
/// (case-insensitive) and an optional leading sign. Anything else is decimal.
pub fn parse_int_literal(literal: &str) -> Option<i64> {
    let literal = literal.trim();
    let (negative, body) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };

    let (radix, digits) = if let Some(rest) = strip_radix_prefix(body, "0x") {
        (16, rest)
    } else if let Some(rest) = strip_radix_prefix(body, "0o") {
        (8, rest)
    } else if let Some(rest) = strip_radix_prefix(body, "0b") {
        (2, rest)
    } else {
        (10, body)
    };

    // from_str_radix would accept a second sign
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let value = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -value } else { value })
}

fn strip_radix_prefix<'a>(body: &'a str, prefix: &str) -> Option<&'a str> {
    body.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &body[prefix.len()..])
}

/// Decode a name/description token. `0` and `NULL` mean "no value";
/// anything else has its surrounding double quotes stripped.
pub fn decode_c_literal(token: &str) -> Option<String> {
    match token {
        "0" | "NULL" => None,
        quoted => Some(quoted.trim_matches('"').to_string()),
    }
}
