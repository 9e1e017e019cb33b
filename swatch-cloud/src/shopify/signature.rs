//! Request signature verification
//!
//! Both schemes are HMAC-SHA256 keyed with the app secret:
//! - order webhooks sign the raw body, base64 in `X-Shopify-Hmac-Sha256`
//! - app proxy requests sign the sorted query string, hex in `signature`

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &str) -> Result<HmacSha256, &'static str> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| "HMAC key error")
}

/// Verify a webhook body against its base64 HMAC header
pub fn verify_webhook_hmac(body: &[u8], header: &str, secret: &str) -> Result<(), &'static str> {
    let expected = BASE64
        .decode(header.trim())
        .map_err(|_| "Invalid HMAC base64")?;
    let mut mac = mac(secret)?;
    mac.update(body);
    // constant-time comparison
    mac.verify_slice(&expected)
        .map_err(|_| "Webhook HMAC mismatch")
}

/// Base64 HMAC of a webhook body
pub fn sign_webhook(body: &[u8], secret: &str) -> Result<String, &'static str> {
    let mut mac = mac(secret)?;
    mac.update(body);
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Canonical app proxy message: `key=value` pairs sorted by key, no separator
///
/// `signature` itself is excluded; repeated keys are joined with commas in
/// the order they appeared.
fn proxy_message(params: &[(String, String)]) -> String {
    let mut grouped: std::collections::BTreeMap<&str, Vec<&str>> = Default::default();
    for (key, value) in params {
        if key == "signature" {
            continue;
        }
        grouped.entry(key.as_str()).or_default().push(value.as_str());
    }
    grouped
        .into_iter()
        .map(|(key, values)| format!("{key}={}", values.join(",")))
        .collect()
}

/// Verify the `signature` query parameter of an app proxy request
pub fn verify_proxy_signature(
    params: &[(String, String)],
    secret: &str,
) -> Result<(), &'static str> {
    let signature = params
        .iter()
        .find(|(k, _)| k == "signature")
        .map(|(_, v)| v.as_str())
        .ok_or("Missing signature parameter")?;
    let expected = hex::decode(signature).map_err(|_| "Invalid signature hex")?;

    let mut mac = mac(secret)?;
    mac.update(proxy_message(params).as_bytes());
    mac.verify_slice(&expected)
        .map_err(|_| "Proxy signature mismatch")
}

/// Hex signature for a set of app proxy query parameters
pub fn sign_proxy_params(params: &[(String, String)], secret: &str) -> Result<String, &'static str> {
    let mut mac = mac(secret)?;
    mac.update(proxy_message(params).as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
