//! Clock speed parsing
//!
//! Speeds are given as a number with an optional `M`/`m` (MHz) or `K`/`k`
//! (kHz) suffix, e.g. `4.1M`, `500K` or `250000`. Parsing is permissive:
//! whatever numeric prefix C's `strtod` would accept is honoured, anything
//! after the first suffix character is ignored, and text without a numeric
//! prefix yields 0.

/// Whitespace as recognised by C `isspace` in the "C" locale
pub(crate) fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Parse a clock speed argument into Hz
///
/// ```
/// use spixfer_core::speed::parse_clock_speed;
///
/// assert_eq!(parse_clock_speed("1.5M"), 1_500_000.0);
/// assert_eq!(parse_clock_speed("500k"), 500_000.0);
/// assert_eq!(parse_clock_speed("250000"), 250_000.0);
/// assert_eq!(parse_clock_speed("fast"), 0.0);
/// ```
pub fn parse_clock_speed(text: &str) -> f64 {
    let (speed, end) = parse_float_prefix(text);
    match text.as_bytes().get(end) {
        Some(b'M' | b'm') => speed * 1_000_000.0,
        Some(b'K' | b'k') => speed * 1_000.0,
        _ => speed,
    }
}

/// Convert a parsed speed to the `speed_hz` value handed to the kernel
///
/// Fractions are truncated. Negative values and NaN become 0, values above
/// `u32::MAX` saturate.
pub fn to_speed_hz(speed: f64) -> u32 {
    speed as u32
}

/// Parse the longest floating point prefix of `text`
///
/// Returns the value and the byte offset just past the prefix. When no
/// number is found the result is `(0.0, 0)`, i.e. the offset points at the
/// start of `text` (leading whitespace included), as `strtod` does.
pub fn parse_float_prefix(text: &str) -> (f64, usize) {
    let bytes = text.as_bytes();
    let mut pos = bytes.iter().take_while(|&&b| is_c_space(b)).count();

    let mut negative = false;
    if let Some(&sign @ (b'+' | b'-')) = bytes.get(pos) {
        negative = sign == b'-';
        pos += 1;
    }

    let parsed = special_prefix(&bytes[pos..])
        .or_else(|| hex_prefix(&bytes[pos..]))
        .or_else(|| decimal_prefix(&text[pos..]));

    match parsed {
        Some((value, len)) => (if negative { -value } else { value }, pos + len),
        None => (0.0, 0),
    }
}

/// `inf`, `infinity` and `nan`, case-insensitive
fn special_prefix(bytes: &[u8]) -> Option<(f64, usize)> {
    if starts_with_ignore_case(bytes, b"infinity") {
        Some((f64::INFINITY, 8))
    } else if starts_with_ignore_case(bytes, b"inf") {
        Some((f64::INFINITY, 3))
    } else if starts_with_ignore_case(bytes, b"nan") {
        // nan(n-char-sequence)
        let mut len = 3;
        if bytes.get(3) == Some(&b'(') {
            let inner = bytes[4..]
                .iter()
                .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
                .count();
            if bytes.get(4 + inner) == Some(&b')') {
                len = 5 + inner;
            }
        }
        Some((f64::NAN, len))
    } else {
        None
    }
}

/// Hexadecimal float such as `0x1A`, `0x1.8p3`
fn hex_prefix(bytes: &[u8]) -> Option<(f64, usize)> {
    if bytes.len() < 2 || bytes[0] != b'0' || !matches!(bytes[1], b'x' | b'X') {
        return None;
    }

    let hex_digit = |pos: usize| bytes.get(pos).and_then(|&b| (b as char).to_digit(16));

    let mut pos = 2;
    let mut mantissa = 0f64;
    let mut digits = 0;
    while let Some(d) = hex_digit(pos) {
        mantissa = mantissa * 16.0 + f64::from(d);
        pos += 1;
        digits += 1;
    }

    let mut scale: i32 = 0;
    if bytes.get(pos) == Some(&b'.') {
        let mut frac = pos + 1;
        while let Some(d) = hex_digit(frac) {
            mantissa = mantissa * 16.0 + f64::from(d);
            scale -= 4;
            frac += 1;
            digits += 1;
        }
        if digits > 0 {
            pos = frac;
        }
    }

    // "0x" without digits is just the number 0 followed by garbage
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'p' | b'P')) {
        let mut exp_pos = pos + 1;
        let mut exp_negative = false;
        if let Some(&sign @ (b'+' | b'-')) = bytes.get(exp_pos) {
            exp_negative = sign == b'-';
            exp_pos += 1;
        }
        let exp_digits = count_digits(&bytes[exp_pos..]);
        if exp_digits > 0 {
            let exp = bytes[exp_pos..exp_pos + exp_digits]
                .iter()
                .fold(0i32, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(i32::from(b - b'0'))
                });
            scale = scale.saturating_add(if exp_negative { -exp } else { exp });
            pos = exp_pos + exp_digits;
        }
    }

    Some((mantissa * 2f64.powi(scale), pos))
}

/// Decimal float: digits, optional fraction, optional exponent
fn decimal_prefix(text: &str) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let int_digits = count_digits(bytes);
    let mut pos = int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits + frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(bytes.get(exp_pos), Some(b'+' | b'-')) {
            exp_pos += 1;
        }
        let exp_digits = count_digits(&bytes[exp_pos..]);
        if exp_digits > 0 {
            pos = exp_pos + exp_digits;
        }
    }

    text[..pos].parse::<f64>().ok().map(|value| (value, pos))
}

fn starts_with_ignore_case(bytes: &[u8], word: &[u8]) -> bool {
    bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
