//! Pure prime predicates and label helpers.

/// Returns true if `n` is prime.
///
/// Values `<= 1` are never prime. Otherwise this is plain trial division over
/// every candidate in `[2, n)`, so the cost is linear in `n`.
pub fn is_prime(n: i64) -> bool {
    n > 1 && !(2..n).any(|d| n % d == 0)
}

/// Render `n` as an English ordinal ("1st", "2nd", "13th", "-3rd").
pub fn ordinal(n: i64) -> String {
    let magnitude = n.unsigned_abs();
    let suffix = match (magnitude % 10, magnitude % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Extract the first integer embedded in free-form text.
///
/// A `-` immediately before the first digit run makes the value negative.
/// Returns `None` when there are no digits or the run overflows `i64`.
pub fn extract_first_integer(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |offset| start + offset);

    let signed_start = if start > 0 && bytes[start - 1] == b'-' {
        start - 1
    } else {
        start
    };

    text[signed_start..end].parse().ok()
}
