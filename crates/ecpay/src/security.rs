//! Timing-safe comparison of `CheckMacValue` strings.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Compare a recomputed checksum with the one a peer presented.
///
/// Both sides are reduced to SHA-256 digests first so the comparison runs
/// over equal-length inputs whatever was presented. Letter case matters:
/// the gateway always sends upper-case hex.
pub fn checksums_match(expected: &str, presented: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let presented = Sha256::digest(presented.as_bytes());
    expected.ct_eq(&presented).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC: &str = "7B1A26A39DBBF63B5E7D0646B8C47D16";

    #[test]
    fn test_identical_checksums_match() {
        assert!(checksums_match(MAC, MAC));
    }

    #[test]
    fn test_lower_case_checksum_is_rejected() {
        assert!(!checksums_match(MAC, &MAC.to_ascii_lowercase()));
    }

    #[test]
    fn test_truncated_checksum_is_rejected() {
        assert!(!checksums_match(MAC, &MAC[..16]));
        assert!(!checksums_match(MAC, ""));
    }

    #[test]
    fn test_single_digit_change_is_rejected() {
        let tampered = format!("{}7", &MAC[..MAC.len() - 1]);
        assert!(!checksums_match(MAC, &tampered));
    }
}
