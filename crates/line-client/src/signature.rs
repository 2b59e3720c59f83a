//! Webhook signature verification.
//!
//! The platform signs every webhook delivery with HMAC-SHA256 over the
//! raw request body, base64-encoded into the `X-Line-Signature` header.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify an `X-Line-Signature` header value against the raw body.
///
/// Comparison is constant-time; a malformed header simply fails.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = BASE64.decode(signature) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);

    mac.verify_slice(&expected).is_ok()
}

/// Compute the signature for a body, base64-encoded.
pub fn sign(channel_secret: &str, body: &[u8]) -> String {
    // HMAC accepts keys of any length, so this cannot fail.
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"));
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}
