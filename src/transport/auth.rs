use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use rand::distr::Alphanumeric;
use sha2::Sha256;

use crate::domain::Credentials;

type HmacSha256 = Hmac<Sha256>;

/// Length of the per-request salt.
pub const SALT_LEN: usize = 32;

/// Random alphanumeric salt, fresh for every request.
///
/// Signatures over the same timestamp must still differ between calls, so
/// the salt is drawn from the thread RNG rather than derived from the clock.
pub fn generate_salt() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect()
}

/// `hex(HMAC-SHA256(secret, date + salt))`.
pub fn sign(secret: &str, date: &str, salt: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(date.as_bytes());
    mac.update(salt.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// `Authorization` header value for one request at instant `now`.
///
/// The header carries the API key, timestamp, salt, and derived signature;
/// the secret itself never leaves the process. Values are recomputed per
/// request because the server only accepts timestamps within a small
/// clock-skew window.
pub fn authorization_header(credentials: &Credentials, now: DateTime<Utc>) -> String {
    let date = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let salt = generate_salt();
    let signature = sign(credentials.api_secret().as_str(), &date, &salt);
    format!(
        "HMAC-SHA256 apiKey={}, date={date}, salt={salt}, signature={signature}",
        credentials.api_key().as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_matches_known_hmac_sha256_vector() {
        // RFC-style vector: HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog").
        // The signer concatenates date and salt, so splitting the message
        // across the two arguments must produce the same digest.
        let expected = "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8";
        assert_eq!(
            sign("key", "The quick brown fox jumps over ", "the lazy dog"),
            expected
        );
        assert_eq!(
            sign("key", "The quick brown fox jumps over the lazy dog", ""),
            expected
        );
    }

    #[test]
    fn salts_and_signatures_differ_within_the_same_instant() {
        let now = Utc::now();
        let date = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        let salt_a = generate_salt();
        let salt_b = generate_salt();
        assert_ne!(salt_a, salt_b);
        assert_eq!(salt_a.len(), SALT_LEN);
        assert!(salt_a.chars().all(|c| c.is_ascii_alphanumeric()));

        let sig_a = sign("secret", &date, &salt_a);
        let sig_b = sign("secret", &date, &salt_b);
        assert_ne!(sig_a, sig_b);
        assert_eq!(sig_a.len(), 64);
        assert!(sig_a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn header_carries_key_but_never_the_secret() {
        let credentials = Credentials::new("NCS_KEY", "super-secret").unwrap();
        let header = authorization_header(&credentials, Utc::now());

        assert!(header.starts_with("HMAC-SHA256 apiKey=NCS_KEY, date="));
        assert!(header.contains(", salt="));
        assert!(header.contains(", signature="));
        assert!(!header.contains("super-secret"));
    }

    #[test]
    fn header_signature_is_reproducible_from_its_own_parts() {
        let credentials = Credentials::new("key", "secret").unwrap();
        let header = authorization_header(&credentials, Utc::now());

        let mut date = None;
        let mut salt = None;
        let mut signature = None;
        for part in header.trim_start_matches("HMAC-SHA256 ").split(", ") {
            match part.split_once('=') {
                Some(("date", v)) => date = Some(v.to_owned()),
                Some(("salt", v)) => salt = Some(v.to_owned()),
                Some(("signature", v)) => signature = Some(v.to_owned()),
                _ => {}
            }
        }

        let date = date.unwrap();
        let salt = salt.unwrap();
        assert_eq!(sign("secret", &date, &salt), signature.unwrap());
    }
}
