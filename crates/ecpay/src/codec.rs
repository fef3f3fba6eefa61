//! Percent-encoding and digest primitives for the CheckMacValue wire contract.
//!
//! The gateway verifies checksums against the output of a legacy .NET
//! `HttpUtility.UrlEncode`, which leaves `- _ . ! * ( )` unescaped and writes
//! lower-case hex. [`percent_encode`] produces a generic form encoding
//! (everything outside `[A-Za-z0-9]` escaped, space as `+`) lower-cased in full;
//! [`apply_legacy_unescape`] then restores the seven literal characters.
//! The two steps must run in that order.

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};

use crate::config::DigestAlgorithm;

/// Percent-sequences the legacy encoder leaves as literal characters.
const LEGACY_LITERALS: [(&str, char); 7] = [
    ("2d", '-'),
    ("5f", '_'),
    ("2e", '.'),
    ("21", '!'),
    ("2a", '*'),
    ("28", '('),
    ("29", ')'),
];

/// Form-encode `s` (space as `+`, every other non-alphanumeric byte as `%XX`)
/// and lower-case the whole result.
pub fn percent_encode(s: &str) -> String {
    let encoded = s
        .split(' ')
        .map(|part| utf8_percent_encode(part, NON_ALPHANUMERIC).to_string())
        .collect::<Vec<_>>()
        .join("+");
    encoded.to_ascii_lowercase()
}

/// Replace the percent-sequences for `- _ . ! * ( )` with the literal
/// characters, matching hex digits case-insensitively. Every other
/// percent-sequence (`%26`, `%3d`, ...) is left untouched.
pub fn apply_legacy_unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        let literal = tail.get(..2).and_then(|hex| {
            LEGACY_LITERALS
                .iter()
                .find(|(seq, _)| seq.eq_ignore_ascii_case(hex))
                .map(|(_, c)| *c)
        });
        match literal {
            Some(c) => {
                out.push(c);
                rest = &tail[2..];
            }
            None => {
                out.push('%');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// [`percent_encode`] followed by [`apply_legacy_unescape`]: the full
/// encoding the gateway applies before hashing.
pub fn dotnet_url_encode(s: &str) -> String {
    apply_legacy_unescape(&percent_encode(s))
}

/// Reverse form encoding: `+` becomes a space, then `%XX` sequences are decoded.
/// Invalid UTF-8 is replaced rather than rejected.
pub fn form_decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Upper-case hex digest of the UTF-8 bytes of `s`.
pub fn digest(algorithm: DigestAlgorithm, s: &str) -> String {
    match algorithm {
        DigestAlgorithm::Md5 => hex::encode_upper(md5::compute(s.as_bytes()).0),
        DigestAlgorithm::Sha256 => hex::encode_upper(Sha256::digest(s.as_bytes())),
    }
}
