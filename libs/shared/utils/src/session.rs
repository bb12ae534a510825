use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use http::HeaderValue;
use sha2::Sha256;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::{AuthContext, SessionClaims, SessionHeader};

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "clinic_session";

fn sign(signing_input: &str, secret: &str) -> Result<Vec<u8>, String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn issue_session_token(context: &AuthContext, secret: &str, ttl_seconds: i64) -> Result<String, String> {
    if secret.is_empty() {
        return Err("Session secret is not set".to_string());
    }

    let now = Utc::now().timestamp();
    let header = SessionHeader { alg: "HS256".to_string(), typ: "JWT".to_string() };
    let claims = SessionClaims {
        context: context.clone(),
        iat: now,
        exp: now.saturating_add(ttl_seconds),
    };

    let header_json = serde_json::to_vec(&header).map_err(|e| e.to_string())?;
    let claims_json = serde_json::to_vec(&claims).map_err(|e| e.to_string())?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(claims_json)
    );
    let signature = sign(&signing_input, secret)?;

    Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature)))
}

pub fn validate_session_token(token: &str, secret: &str) -> Result<AuthContext, String> {
    if secret.is_empty() {
        return Err("Session secret is not set".to_string());
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];
    let signature_b64 = parts[2];

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|e| {
        debug!("Failed to decode signature: {}", e);
        "Invalid signature encoding".to_string()
    })?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(format!("{}.{}", header_b64, claims_b64).as_bytes());

    // constant-time comparison
    if mac.verify_slice(&signature).is_err() {
        debug!("Session signature verification failed");
        return Err("Invalid token signature".to_string());
    }

    let claims_json = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| "Invalid claims encoding".to_string())?;

    let claims: SessionClaims = serde_json::from_slice(&claims_json).map_err(|e| {
        debug!("Failed to parse claims: {}", e);
        "Invalid claims format".to_string()
    })?;

    let now = Utc::now().timestamp();
    if claims.exp < now {
        debug!("Session expired at {} (now: {})", claims.exp, now);
        return Err("Token expired".to_string());
    }

    Ok(claims.context)
}

/// `Set-Cookie` value establishing a session for `context`.
pub fn session_cookie(context: &AuthContext, config: &AppConfig) -> Result<HeaderValue, String> {
    let ttl = config.session_ttl_seconds();
    let token = issue_session_token(context, &config.session_secret, ttl)?;
    let secure = if config.session_cookie_secure { "; Secure" } else { "" };
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
        SESSION_COOKIE, token, ttl, secure
    ))
    .map_err(|e| e.to_string())
}

/// `Set-Cookie` value that drops the session on the client.
pub fn cleared_session_cookie() -> HeaderValue {
    HeaderValue::from_static("clinic_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
