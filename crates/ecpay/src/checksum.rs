//! CheckMacValue computation and verification.
//!
//! The signing string is built from the present parameters sorted by
//! lower-cased key, wrapped in `HashKey=...&` / `&HashIV=...`, run through
//! [`dotnet_url_encode`](crate::codec::dotnet_url_encode) (delimiters
//! included) and hashed to upper-case hex. The gateway recomputes the same
//! value and compares byte for byte.

use crate::codec::{digest, dotnet_url_encode};
use crate::config::DigestAlgorithm;
use crate::constants::CHECK_MAC_VALUE;
use crate::credentials::Credentials;
use crate::params::ParameterSet;
use crate::security::checksums_match;

/// The raw, unencoded string that gets encoded and hashed.
///
/// Absent values are skipped; keys keep their original case and values
/// their raw text.
pub fn signing_string(credentials: &Credentials, params: &ParameterSet) -> String {
    let mut entries: Vec<(&str, &str)> = params.iter().collect();
    entries.sort_by(|(a, _), (b, _)| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });

    let joined = entries
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "HashKey={}&{}&HashIV={}",
        credentials.hash_key, joined, credentials.hash_iv
    )
}

/// Compute the CheckMacValue of `params`.
///
/// Every present field is signed, so the caller removes the checksum field
/// beforehand.
pub fn sign(credentials: &Credentials, params: &ParameterSet, algorithm: DigestAlgorithm) -> String {
    let encoded = dotnet_url_encode(&signing_string(credentials, params));
    digest(algorithm, &encoded)
}

/// Sign `params` and attach the result as `CheckMacValue`.
pub fn sign_and_attach(
    credentials: &Credentials,
    params: &mut ParameterSet,
    algorithm: DigestAlgorithm,
) {
    params.remove(CHECK_MAC_VALUE);
    let mac = sign(credentials, params, algorithm);
    params.insert(CHECK_MAC_VALUE, mac);
}

/// Check the checksum carried in `params` under `checksum_field`.
///
/// Fields in `excluded_fields` are removed before recomputing. Returns
/// `false` when the checksum field is absent or differs in any byte,
/// including letter case.
pub fn verify(
    credentials: &Credentials,
    params: &ParameterSet,
    checksum_field: &str,
    excluded_fields: &[&str],
    algorithm: DigestAlgorithm,
) -> bool {
    let mut remaining = params.clone();
    let Some(presented) = remaining.remove(checksum_field) else {
        return false;
    };
    for field in excluded_fields {
        remaining.remove(field);
    }

    let expected = sign(credentials, &remaining, algorithm);
    checksums_match(&expected, &presented)
}
