//! Payload/delay argument stream
//!
//! The tokens after the clock speed alternate between a mandatory hex
//! payload and an optional delay in nanoseconds that applies after that
//! payload's transfer:
//!
//! ```text
//! <payload> [<delay-ns>] <payload> [<delay-ns>] ...
//! ```
//!
//! A token following a payload is a delay only when it parses as a positive
//! integer; otherwise it is the next payload.

use crate::speed::is_c_space;

/// One payload token and the delay that follows its transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    /// Raw hex payload token
    pub payload: &'a str,
    /// Delay after the transfer, if one was given
    pub delay_ns: Option<u64>,
}

/// Lazy iterator over the payload/delay stream
///
/// Payload tokens are yielded undecoded so that a bad token only surfaces
/// once every step before it has been carried out.
#[derive(Debug, Clone)]
pub struct ArgStream<'a, S> {
    tokens: &'a [S],
    pos: usize,
    strict: bool,
}

impl<'a, S: AsRef<str>> ArgStream<'a, S> {
    /// Walk `tokens`, accepting delays with `atoi` semantics unless `strict`
    pub fn new(tokens: &'a [S], strict: bool) -> Self {
        Self {
            tokens,
            pos: 0,
            strict,
        }
    }
}

impl<'a, S: AsRef<str>> Iterator for ArgStream<'a, S> {
    type Item = Step<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let payload = self.tokens.get(self.pos)?.as_ref();
        self.pos += 1;

        let delay_ns = self
            .tokens
            .get(self.pos)
            .and_then(|token| parse_delay(token.as_ref(), self.strict));
        if delay_ns.is_some() {
            self.pos += 1;
        }

        Some(Step { payload, delay_ns })
    }
}

/// Interpret a token as a delay in nanoseconds
///
/// Lenient mode follows `atoi`: leading whitespace, an optional sign and a
/// run of digits, with trailing characters ignored. Strict mode accepts only
/// tokens made entirely of decimal digits. Either way the delay must be
/// positive.
pub fn parse_delay(token: &str, strict: bool) -> Option<u64> {
    if strict {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = token.parse::<u64>().unwrap_or(u64::MAX);
        return (value > 0).then_some(value);
    }

    let value = parse_int_prefix(token);
    (value > 0).then_some(value as u64)
}

/// `atoi`-style integer prefix; 0 when there are no digits
///
/// Out-of-range values saturate instead of wrapping.
pub fn parse_int_prefix(text: &str) -> i64 {
    let bytes = text.as_bytes();
    let mut pos = bytes.iter().take_while(|&&b| is_c_space(b)).count();

    let mut negative = false;
    if let Some(&sign @ (b'+' | b'-')) = bytes.get(pos) {
        negative = sign == b'-';
        pos += 1;
    }

    let magnitude = bytes[pos..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, &b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}
