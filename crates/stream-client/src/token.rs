//! User token generation.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use platform_core::PlatformError;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Create an HS256 JWT granting the given user access to the platform.
///
/// The token carries only a `user_id` claim; expiry is managed
/// platform-side.
pub fn create_user_token(secret: &str, user_id: &str) -> Result<String, PlatformError> {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = serde_json::json!({ "user_id": user_id });
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());

    let signing_input = format!("{header}.{payload}");
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PlatformError::Configuration(format!("invalid signing secret: {}", e)))?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature}"))
}
